//! Oracle lookup errors.

use crate::env::{Class, EquipmentId, GrowthType, SkillId};
use crate::error::{ErrorSeverity, GameError};

/// Errors that occur when a static table has no entry for a reference.
///
/// The rules never abort on these: callers log them and fall back to a
/// neutral result (skill slot skipped, item contributes nothing).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    #[error("skill definition '{0}' not found")]
    SkillNotFound(SkillId),

    #[error("equipment definition '{0}' not found")]
    EquipmentNotFound(EquipmentId),

    #[error("class definition {0} not found")]
    ClassNotFound(Class),

    #[error("growth definition {0} not found")]
    GrowthNotFound(GrowthType),

    #[error("no stat table row for level {0}")]
    LevelNotFound(u8),
}

impl GameError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        use OracleError::*;
        match self {
            SkillNotFound(_) => "ORACLE_SKILL_NOT_FOUND",
            EquipmentNotFound(_) => "ORACLE_EQUIPMENT_NOT_FOUND",
            ClassNotFound(_) => "ORACLE_CLASS_NOT_FOUND",
            GrowthNotFound(_) => "ORACLE_GROWTH_NOT_FOUND",
            LevelNotFound(_) => "ORACLE_LEVEL_NOT_FOUND",
        }
    }
}
