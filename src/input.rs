use log::debug;

use crate::grid::Direction;

pub const DEFAULT_SWIPE_THRESHOLD: f32 = 50.0;

/// Turns a press/release pair into at most one direction.
///
/// Coordinates are taken with `y` growing upwards; hosts whose pointer
/// reports screen rows must flip `y` before feeding it in.
#[derive(Clone, Debug)]
pub struct SwipeTranslator {
    threshold: f32,
    start: Option<(f32, f32)>,
}

impl Default for SwipeTranslator {
    fn default() -> Self {
        Self::new(DEFAULT_SWIPE_THRESHOLD)
    }
}

impl SwipeTranslator {
    pub fn new(threshold: f32) -> Self {
        SwipeTranslator {
            threshold,
            start: None,
        }
    }

    /// Gesture began. A second `begin` without an `end` restarts the gesture.
    pub fn begin(&mut self, x: f32, y: f32) {
        self.start = Some((x, y));
    }

    /// Gesture ended. Returns the swipe direction, or `None` for a tap or
    /// for an `end` that had no matching `begin`.
    pub fn end(&mut self, x: f32, y: f32) -> Option<Direction> {
        let (start_x, start_y) = self.start.take()?;
        let direction = classify(x - start_x, y - start_y, self.threshold);
        debug!(
            "Swipe ({:.1}, {:.1}) -> {:?}",
            x - start_x,
            y - start_y,
            direction
        );
        direction
    }
}

/// Dominant axis wins; ties go vertical. Short drags are taps.
pub fn classify(dx: f32, dy: f32, threshold: f32) -> Option<Direction> {
    if dx.hypot(dy) <= threshold {
        return None;
    }

    if dx.abs() > dy.abs() {
        Some(if dx > 0.0 {
            Direction::Right
        } else {
            Direction::Left
        })
    } else {
        Some(if dy > 0.0 {
            Direction::Up
        } else {
            Direction::Down
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_axes() {
        assert_eq!(classify(80.0, 10.0, 50.0), Some(Direction::Right));
        assert_eq!(classify(-80.0, 10.0, 50.0), Some(Direction::Left));
        assert_eq!(classify(10.0, 80.0, 50.0), Some(Direction::Up));
        assert_eq!(classify(10.0, -80.0, 50.0), Some(Direction::Down));
    }

    #[test]
    fn test_short_drag_is_a_tap() {
        assert_eq!(classify(30.0, 30.0, 50.0), None);
        // Exactly on the threshold does not count
        assert_eq!(classify(50.0, 0.0, 50.0), None);
        assert_eq!(classify(0.0, 0.0, 50.0), None);
    }

    #[test]
    fn test_magnitude_not_axis_decides_threshold() {
        // Neither component exceeds 50 but the diagonal does
        assert_eq!(classify(40.0, 39.0, 50.0), Some(Direction::Right));
    }

    #[test]
    fn test_diagonal_tie_goes_vertical() {
        assert_eq!(classify(60.0, 60.0, 50.0), Some(Direction::Up));
        assert_eq!(classify(60.0, -60.0, 50.0), Some(Direction::Down));
    }

    #[test]
    fn test_gesture_lifecycle() {
        let mut swipe = SwipeTranslator::default();

        // No begin, nothing to measure against
        assert_eq!(swipe.end(500.0, 0.0), None);

        swipe.begin(100.0, 100.0);
        assert_eq!(swipe.end(200.0, 110.0), Some(Direction::Right));

        // The start point is consumed by end
        assert_eq!(swipe.end(300.0, 110.0), None);

        swipe.begin(100.0, 100.0);
        assert_eq!(swipe.end(110.0, 105.0), None);
    }

    #[test]
    fn test_restarted_gesture_uses_latest_start() {
        let mut swipe = SwipeTranslator::new(5.0);
        swipe.begin(0.0, 0.0);
        swipe.begin(20.0, 0.0);
        assert_eq!(swipe.end(10.0, 0.0), Some(Direction::Left));
    }
}
