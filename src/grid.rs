use std::ops::Add;

/// A whole-cell coordinate on the board. `y` grows upwards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct GridPosition {
    pub x: i32,
    pub y: i32,
}

impl GridPosition {
    pub const ORIGIN: GridPosition = GridPosition { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        GridPosition { x, y }
    }
}

impl Add<Direction> for GridPosition {
    type Output = GridPosition;

    fn add(self, dir: Direction) -> GridPosition {
        let delta = dir.delta();
        GridPosition {
            x: self.x + delta.x,
            y: self.y + delta.y,
        }
    }
}

/// Where a segment actually sits. Usually a whole cell, but hosts that
/// move things continuously may leave it between cells, so every grid
/// question goes through `rounded`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Position { x, y }
    }

    /// Nearest cell, ties to even.
    pub fn rounded(&self) -> GridPosition {
        GridPosition {
            x: self.x.round_ties_even() as i32,
            y: self.y.round_ties_even() as i32,
        }
    }
}

impl From<GridPosition> for Position {
    fn from(pos: GridPosition) -> Self {
        Position {
            x: pos.x as f32,
            y: pos.y as f32,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn delta(&self) -> GridPosition {
        match self {
            Direction::Up => GridPosition { x: 0, y: 1 },
            Direction::Down => GridPosition { x: 0, y: -1 },
            Direction::Left => GridPosition { x: -1, y: 0 },
            Direction::Right => GridPosition { x: 1, y: 0 },
        }
    }

    /// Heading of the head sprite in degrees, counter-clockwise from +x.
    pub fn orientation_angle(&self) -> f32 {
        match self {
            Direction::Right => 0.0,
            Direction::Up => 90.0,
            Direction::Down => -90.0,
            Direction::Left => 180.0,
        }
    }

    pub fn is_horizontal(&self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_directions() {
        assert_eq!(Direction::Up.opposite(), Direction::Down);
        assert_eq!(Direction::Down.opposite(), Direction::Up);
        assert_eq!(Direction::Left.opposite(), Direction::Right);
        assert_eq!(Direction::Right.opposite(), Direction::Left);

        for dir in Direction::ALL {
            assert_eq!(dir.opposite().opposite(), dir);
        }
    }

    #[test]
    fn test_opposites_cancel_out() {
        for dir in Direction::ALL {
            let pos = GridPosition::new(3, -2);
            assert_eq!(pos + dir + dir.opposite(), pos);
        }
    }

    #[test]
    fn test_all_directions() {
        let pos = GridPosition::new(5, 5);

        assert_eq!(pos + Direction::Up, GridPosition::new(5, 6));
        assert_eq!(pos + Direction::Down, GridPosition::new(5, 4));
        assert_eq!(pos + Direction::Right, GridPosition::new(6, 5));
        assert_eq!(pos + Direction::Left, GridPosition::new(4, 5));
    }

    #[test]
    fn test_orientation_angles() {
        assert_eq!(Direction::Right.orientation_angle(), 0.0);
        assert_eq!(Direction::Up.orientation_angle(), 90.0);
        assert_eq!(Direction::Down.orientation_angle(), -90.0);
        assert_eq!(Direction::Left.orientation_angle(), 180.0);
    }

    #[test]
    fn test_rounding() {
        assert_eq!(Position::new(10.4, 3.0).rounded(), GridPosition::new(10, 3));
        assert_eq!(Position::new(-0.6, 2.7).rounded(), GridPosition::new(-1, 3));

        // Halfway cases go to the even neighbour
        assert_eq!(Position::new(0.5, 1.5).rounded(), GridPosition::new(0, 2));
        assert_eq!(Position::new(-2.5, 2.5).rounded(), GridPosition::new(-2, 2));
    }
}
