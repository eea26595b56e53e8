use log::{debug, warn};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{Result, SnakeError};
use crate::events::SnakeHost;
use crate::grid::{GridPosition, Position};
use crate::snake::{ContactOutcome, SnakeSimulation};

/// A walled board centred on the origin, with food and obstacles on it.
///
/// The simulation never looks at the board. After each tick the arena checks
/// what the head landed on and reports it through the matching contact call,
/// the way a physics layer would.
#[derive(Clone, Debug)]
pub struct Arena {
    half_width: i32,
    half_height: i32,
    food: Option<GridPosition>,
    obstacles: Vec<GridPosition>,
}

impl Arena {
    /// Walls sit on `x = ±half_width` and `y = ±half_height`.
    pub fn new(half_width: i32, half_height: i32) -> Result<Self> {
        if half_width < 2 || half_height < 2 {
            return Err(SnakeError::InvalidConfiguration(format!(
                "arena half extents {}x{} leave no room to move",
                half_width, half_height
            )));
        }
        Ok(Arena {
            half_width,
            half_height,
            food: None,
            obstacles: Vec::new(),
        })
    }

    pub fn half_width(&self) -> i32 {
        self.half_width
    }

    pub fn half_height(&self) -> i32 {
        self.half_height
    }

    pub fn food(&self) -> Option<GridPosition> {
        self.food
    }

    pub fn obstacles(&self) -> &[GridPosition] {
        &self.obstacles
    }

    pub fn is_wall(&self, cell: GridPosition) -> bool {
        cell.x.abs() >= self.half_width || cell.y.abs() >= self.half_height
    }

    pub fn is_obstacle(&self, cell: GridPosition) -> bool {
        self.obstacles.contains(&cell)
    }

    pub fn place_food(&mut self, cell: GridPosition) {
        self.food = Some(cell);
    }

    /// Adds an obstacle inside the walls. Returns false if the cell is a wall
    /// or already blocked.
    pub fn add_obstacle(&mut self, cell: GridPosition) -> bool {
        if self.is_wall(cell) || self.is_obstacle(cell) {
            return false;
        }
        self.obstacles.push(cell);
        true
    }

    /// Cells inside the walls that hold nothing and no part of the snake.
    pub fn free_cells<H: SnakeHost>(&self, sim: &SnakeSimulation<H>) -> Vec<GridPosition> {
        let mut cells = Vec::new();
        for y in (1 - self.half_height)..self.half_height {
            for x in (1 - self.half_width)..self.half_width {
                let cell = GridPosition { x, y };
                if !sim.occupies(x, y) && !self.is_obstacle(cell) && self.food != Some(cell) {
                    cells.push(cell);
                }
            }
        }
        cells
    }

    /// Moves the food to a random free cell. Leaves the board without food
    /// if the snake has filled it.
    pub fn spawn_food<H: SnakeHost>(
        &mut self,
        sim: &SnakeSimulation<H>,
        rng: &mut impl Rng,
    ) -> Option<GridPosition> {
        self.food = None;
        self.food = self.free_cells(sim).choose(rng).copied();
        match self.food {
            Some(cell) => debug!("Food placed at {:?}", cell),
            None => warn!("No free cell left for food"),
        }
        self.food
    }

    /// Drops `count` obstacles on random free cells off the starting row.
    pub fn scatter_obstacles<H: SnakeHost>(
        &mut self,
        sim: &SnakeSimulation<H>,
        count: usize,
        rng: &mut impl Rng,
    ) {
        let mut cells = self.free_cells(sim);
        cells.retain(|cell| cell.y != 0);
        for cell in cells.choose_multiple(rng, count) {
            self.obstacles.push(*cell);
        }
    }

    /// Reports whatever the head is touching to the simulation.
    ///
    /// A wrap through a wall can land the head on something else, which is
    /// then reported as well, so more than one contact may fire. Returns the
    /// last outcome, or `None` if the head touched nothing.
    pub fn resolve<H: SnakeHost>(
        &mut self,
        sim: &mut SnakeSimulation<H>,
        rng: &mut impl Rng,
    ) -> Result<Option<ContactOutcome>> {
        let mut outcome = None;

        // A wrap lands strictly inside the walls, so two passes are enough.
        for _ in 0..2 {
            if !sim.is_running() {
                break;
            }
            let head = sim.head();

            let contact = if self.is_wall(head) {
                sim.on_wall_contact(Position::from(head))
            } else if self.is_obstacle(head) || sim.positions()[1..].contains(&head) {
                sim.on_obstacle_contact()
            } else if self.food == Some(head) {
                let grew = sim.on_food_contact()?;
                self.spawn_food(&*sim, &mut *rng);
                grew
            } else {
                break;
            };

            outcome = Some(contact);
            if !matches!(contact, ContactOutcome::Traversed(_)) {
                break;
            }
        }

        Ok(outcome)
    }
}
