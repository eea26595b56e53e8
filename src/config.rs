use std::time::Duration;

use crate::error::{Result, SnakeError};
use crate::grid::Direction;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Levels as a slider would report them: 0, 1 or 2.
    pub fn from_level(level: u8) -> Option<Difficulty> {
        match level {
            0 => Some(Difficulty::Easy),
            1 => Some(Difficulty::Medium),
            2 => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn steps_per_second(&self) -> f32 {
        match self {
            Difficulty::Easy => 5.0,
            Difficulty::Medium => 7.0,
            Difficulty::Hard => 10.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SnakeConfig {
    /// Segments in a fresh snake, head included.
    pub initial_size: usize,
    pub start_direction: Direction,
    pub difficulty: Difficulty,
    /// Added to the speed multiplier on every growth.
    pub speed_increase_factor: f32,
    pub move_through_walls: bool,
    /// Minimum drag distance that counts as a swipe.
    pub swipe_threshold: f32,
}

impl Default for SnakeConfig {
    fn default() -> Self {
        Self {
            initial_size: 4,
            start_direction: Direction::Right,
            difficulty: Difficulty::Medium,
            speed_increase_factor: 0.05,
            move_through_walls: false,
            swipe_threshold: 50.0,
        }
    }
}

impl SnakeConfig {
    pub fn validate(&self) -> Result {
        if self.initial_size < 1 {
            return Err(SnakeError::InvalidConfiguration(
                "initial size must be at least 1".into(),
            ));
        }
        if !self.speed_increase_factor.is_finite() || self.speed_increase_factor < 0.0 {
            return Err(SnakeError::InvalidConfiguration(format!(
                "speed increase factor {} must be finite and non-negative",
                self.speed_increase_factor
            )));
        }
        if !self.swipe_threshold.is_finite() || self.swipe_threshold < 0.0 {
            return Err(SnakeError::InvalidConfiguration(format!(
                "swipe threshold {} must be finite and non-negative",
                self.swipe_threshold
            )));
        }
        Ok(())
    }

    pub fn base_speed(&self) -> f32 {
        self.difficulty.steps_per_second()
    }

    /// Time between ticks for the given speed multiplier.
    pub fn tick_interval(&self, speed_multiplier: f32) -> Duration {
        Duration::from_secs_f64(1.0 / (self.base_speed() as f64 * speed_multiplier as f64))
    }
}
