//! Errors surfaced by the battle driver.

use battle_core::{ActionError, ErrorSeverity, GameError, InitializationError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("failed to initialize battlefield")]
    InitialState(#[source] InitializationError),

    #[error("action execution failed")]
    Action(#[from] ActionError),
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InitialState(err) => err.severity(),
            Self::Action(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InitialState(err) => err.error_code(),
            Self::Action(err) => err.error_code(),
        }
    }
}
