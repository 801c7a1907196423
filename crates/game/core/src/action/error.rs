//! Skill execution errors.

use crate::error::{ErrorSeverity, GameError};
use crate::state::UnitId;

/// Caller-input failures of [`execute_skill`](super::execute_skill).
///
/// Recoverable conditions (unknown skill, missing targets) never surface
/// here; they degrade to Standby.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionError {
    #[error("unit {0} not found on the battlefield")]
    ActorNotFound(UnitId),

    #[error("unit {0} has fallen and cannot act")]
    ActorDefeated(UnitId),
}

impl GameError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ActorNotFound(_) => ErrorSeverity::Validation,
            Self::ActorDefeated(_) => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ActorNotFound(_) => "ACTION_ACTOR_NOT_FOUND",
            Self::ActorDefeated(_) => "ACTION_ACTOR_DEFEATED",
        }
    }
}
