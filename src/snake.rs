use std::time::Duration;

use log::{debug, info, warn};

use crate::config::SnakeConfig;
use crate::error::{Result, SnakeError};
use crate::events::{SnakeEvent, SnakeHost};
use crate::grid::{Direction, GridPosition, Position};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundState {
    Running,
    Ended,
}

#[derive(Clone, Debug, PartialEq)]
pub enum StepResult {
    /// The chain advanced one cell.
    Moved {
        head: GridPosition,
        angle: f32,
        /// Every segment's cell, head first.
        positions: Vec<GridPosition>,
    },
    /// The round is over; nothing moved.
    Halted,
}

/// What a contact reported by the host led to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ContactOutcome {
    Grew,
    RoundOver,
    /// The head wrapped through a wall and now sits here.
    Traversed(Position),
    /// The round had already ended.
    Ignored,
}

/// The snake itself: a head followed by its body, stepped one cell per tick.
///
/// Collision *detection* belongs to the host, which reports what the head ran
/// into through the `on_*_contact` methods. Everything that follows from a
/// contact is decided here and announced through the [`SnakeHost`].
#[derive(Debug)]
pub struct SnakeSimulation<H: SnakeHost> {
    config: SnakeConfig,
    host: H,
    /// Index 0 is the head, the last entry the tail.
    segments: Vec<Position>,
    direction: Direction,
    pending_direction: Option<Direction>,
    speed_multiplier: f32,
    state: RoundState,
}

impl<H: SnakeHost> SnakeSimulation<H> {
    /// Builds a simulation and starts the first round from `config`.
    pub fn new(config: SnakeConfig, host: H) -> Result<Self> {
        config.validate()?;

        let mut sim = SnakeSimulation {
            direction: config.start_direction,
            config,
            host,
            segments: Vec::new(),
            pending_direction: None,
            speed_multiplier: 1.0,
            state: RoundState::Running,
        };
        sim.reset(sim.config.initial_size, sim.config.start_direction)?;
        Ok(sim)
    }

    /// Starts a new round with `initial_size` segments stacked on the origin.
    ///
    /// The body is built by growing, so the host sees one `SegmentAdded` per
    /// extra segment. Those growths award no score and leave the speed alone.
    pub fn reset(&mut self, initial_size: usize, start_direction: Direction) -> Result {
        if initial_size < 1 {
            return Err(SnakeError::InvalidConfiguration(format!(
                "cannot start a round with {} segments",
                initial_size
            )));
        }

        self.segments.clear();
        self.segments.push(Position::from(GridPosition::ORIGIN));
        for _ in 1..initial_size {
            self.grow_silently()?;
        }

        self.direction = start_direction;
        self.pending_direction = None;
        self.speed_multiplier = 1.0;
        self.state = RoundState::Running;
        self.announce_head();

        info!(
            "New round: {} segments heading {:?}",
            initial_size, start_direction
        );
        Ok(())
    }

    /// Queues a direction for the next tick, replacing any earlier one.
    /// `None` leaves the queue as it is.
    ///
    /// Nothing stops the queued direction from being the reverse of the
    /// current heading; turning back into the body is the player's problem.
    pub fn set_pending_direction(&mut self, direction: impl Into<Option<Direction>>) {
        if let Some(direction) = direction.into() {
            self.pending_direction = Some(direction);
        }
    }

    pub fn tick(&mut self) -> StepResult {
        if self.state == RoundState::Ended {
            return StepResult::Halted;
        }

        if let Some(direction) = self.pending_direction.take() {
            self.direction = direction;
        }

        // Back to front, so each segment reads its predecessor before that
        // predecessor is overwritten.
        for i in (1..self.segments.len()).rev() {
            self.segments[i] = self.segments[i - 1];
        }

        let head = self.segments[0].rounded() + self.direction;
        self.segments[0] = head.into();
        self.announce_head();

        debug!("Tick: head at {:?} heading {:?}", head, self.direction);

        StepResult::Moved {
            head,
            angle: self.direction.orientation_angle(),
            positions: self.positions(),
        }
    }

    /// Adds a segment on top of the tail, speeds up and scores.
    pub fn grow(&mut self) -> Result {
        if self.state == RoundState::Ended {
            warn!("Ignoring growth after the round ended");
            return Ok(());
        }

        self.grow_silently()?;
        self.speed_multiplier += self.config.speed_increase_factor;
        self.host.on_event(SnakeEvent::ScoreIncrement);
        Ok(())
    }

    fn grow_silently(&mut self) -> Result {
        let tail = *self.segments.last().ok_or(SnakeError::EmptyChain)?;
        self.segments.push(tail);
        self.host.on_event(SnakeEvent::SegmentAdded(tail));
        Ok(())
    }

    pub fn on_food_contact(&mut self) -> Result<ContactOutcome> {
        if self.state == RoundState::Ended {
            return Ok(ContactOutcome::Ignored);
        }
        self.grow()?;
        debug!("Ate food, now {} segments", self.segments.len());
        Ok(ContactOutcome::Grew)
    }

    pub fn on_obstacle_contact(&mut self) -> ContactOutcome {
        if self.state == RoundState::Ended {
            return ContactOutcome::Ignored;
        }
        self.end_round("obstacle");
        ContactOutcome::RoundOver
    }

    pub fn on_wall_contact(&mut self, wall: Position) -> ContactOutcome {
        if self.state == RoundState::Ended {
            return ContactOutcome::Ignored;
        }
        if !self.config.move_through_walls {
            self.end_round("wall");
            return ContactOutcome::RoundOver;
        }
        ContactOutcome::Traversed(self.traverse(wall))
    }

    /// Mirrors the head through the wall along the axis of travel, landing
    /// one cell past the mirrored wall. The other axis is left untouched.
    fn traverse(&mut self, wall: Position) -> Position {
        let delta = self.direction.delta();
        let head = &mut self.segments[0];

        if self.direction.is_horizontal() {
            head.x = (-wall.x + delta.x as f32).round_ties_even();
        } else {
            head.y = (-wall.y + delta.y as f32).round_ties_even();
        }

        let head = *head;
        debug!("Wrapped through wall at {:?} to {:?}", wall, head);
        self.announce_head();
        head
    }

    fn end_round(&mut self, cause: &str) {
        self.state = RoundState::Ended;
        info!(
            "Round over ({}) with {} segments",
            cause,
            self.segments.len()
        );
        self.host.on_event(SnakeEvent::RoundOver);
    }

    fn announce_head(&mut self) {
        self.host.on_event(SnakeEvent::HeadMoved {
            position: self.segments[0],
            angle: self.direction.orientation_angle(),
        });
    }

    /// Whether any segment sits on the cell (x, y).
    pub fn occupies(&self, x: i32, y: i32) -> bool {
        let cell = GridPosition { x, y };
        self.segments.iter().any(|segment| segment.rounded() == cell)
    }

    pub fn positions(&self) -> Vec<GridPosition> {
        self.segments.iter().map(Position::rounded).collect()
    }

    pub fn segments(&self) -> &[Position] {
        &self.segments
    }

    pub fn head(&self) -> GridPosition {
        self.segments[0].rounded()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending_direction
    }

    pub fn speed_multiplier(&self) -> f32 {
        self.speed_multiplier
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == RoundState::Running
    }

    /// Time until the next tick at the current speed.
    pub fn tick_interval(&self) -> Duration {
        self.config.tick_interval(self.speed_multiplier)
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}
