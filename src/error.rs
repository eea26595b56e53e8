use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnakeError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    /// The segment chain lost its head. Only reachable through a bug.
    #[error("segment chain is empty")]
    EmptyChain,
}

pub type Result<T = ()> = std::result::Result<T, SnakeError>;
