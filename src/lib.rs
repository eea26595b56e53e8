pub mod arena;
pub mod config;
pub mod error;
pub mod events;
pub mod grid;
pub mod input;
pub mod score;
pub mod snake;

pub use arena::Arena;
pub use config::{Difficulty, SnakeConfig};
pub use error::{Result, SnakeError};
pub use events::{SnakeEvent, SnakeHost};
pub use grid::{Direction, GridPosition, Position};
pub use input::SwipeTranslator;
pub use score::ScoreBoard;
pub use snake::{ContactOutcome, RoundState, SnakeSimulation, StepResult};
