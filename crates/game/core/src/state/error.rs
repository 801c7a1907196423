//! Battlefield initialization errors.

use crate::config::BattleConfig;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{Position, Team, UnitId};

/// Errors returned when the supplied contexts cannot form a valid battlefield.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InitializationError {
    #[error("unit id '{0}' appears more than once")]
    DuplicateUnit(UnitId),

    #[error("{team} position {position} is outside the 2x3 formation grid")]
    InvalidPosition { team: Team, position: Position },

    #[error("{team} position {position} is occupied by '{occupant}' and '{unit}'")]
    PositionOccupied {
        team: Team,
        position: Position,
        occupant: UnitId,
        unit: UnitId,
    },

    #[error("{team} fields {count} units (max: {max})", max = BattleConfig::TEAM_SIZE)]
    TeamTooLarge { team: Team, count: usize },

    #[error("{0} has no units")]
    EmptyTeam(Team),
}

impl GameError for InitializationError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        use InitializationError::*;
        match self {
            DuplicateUnit(_) => "INIT_DUPLICATE_UNIT",
            InvalidPosition { .. } => "INIT_INVALID_POSITION",
            PositionOccupied { .. } => "INIT_POSITION_OCCUPIED",
            TeamTooLarge { .. } => "INIT_TEAM_TOO_LARGE",
            EmptyTeam(_) => "INIT_EMPTY_TEAM",
        }
    }
}
