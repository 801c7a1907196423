//! Traits describing read-only battle data.
//!
//! Oracles expose skill, equipment, class and stat tables. [`GameEnv`] bundles
//! them with the [`BattleConfig`] so the rules can reach everything they need
//! without coupling to a concrete storage. Randomness is not part of the
//! bundle: it is threaded as `&mut impl RngOracle` through each stochastic call.
mod classes;
mod error;
mod items;
mod rng;
mod skills;
mod snapshot;

pub use classes::{
    Class, ClassDefinition, ClassOracle, ClassTier, CombatantType, GrowthDefinition, GrowthType,
    MovementType, StatTableOracle,
};
pub use error::OracleError;
pub use items::{DualWieldTag, EquipmentDefinition, EquipmentId, EquipmentKind, EquipmentOracle};
pub use rng::{PcgRng, RngOracle, seed_from_str};
pub use skills::{
    ConditionalPattern, DamageEffect, HitRate, PatternCondition, Potency, SkillCategory,
    SkillCost, SkillDefinition, SkillEffect, SkillFlags, SkillId, SkillOracle, SkillType,
    TargetGroup, TargetPattern, Targeting,
};
pub use snapshot::TablesSnapshot;

use crate::config::BattleConfig;
use crate::stats::CombatStats;

/// Aggregates the read-only oracles and configuration used by the rules.
#[derive(Clone, Copy)]
pub struct GameEnv<'a> {
    skills: &'a dyn SkillOracle,
    equipment: &'a dyn EquipmentOracle,
    classes: &'a dyn ClassOracle,
    stat_tables: &'a dyn StatTableOracle,
    config: &'a BattleConfig,
}

impl<'a> GameEnv<'a> {
    pub fn new(
        skills: &'a dyn SkillOracle,
        equipment: &'a dyn EquipmentOracle,
        classes: &'a dyn ClassOracle,
        stat_tables: &'a dyn StatTableOracle,
        config: &'a BattleConfig,
    ) -> Self {
        Self {
            skills,
            equipment,
            classes,
            stat_tables,
            config,
        }
    }

    /// Environment backed by a single in-memory snapshot.
    pub fn from_tables(tables: &'a TablesSnapshot, config: &'a BattleConfig) -> Self {
        Self::new(tables, tables, tables, tables, config)
    }

    pub fn skills(&self) -> &'a dyn SkillOracle {
        self.skills
    }

    pub fn equipment(&self) -> &'a dyn EquipmentOracle {
        self.equipment
    }

    pub fn classes(&self) -> &'a dyn ClassOracle {
        self.classes
    }

    pub fn stat_tables(&self) -> &'a dyn StatTableOracle {
        self.stat_tables
    }

    pub fn config(&self) -> &'a BattleConfig {
        self.config
    }

    /// Looks up a skill definition.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::SkillNotFound` if the table has no such skill.
    pub fn skill(&self, id: &SkillId) -> Result<&'a SkillDefinition, OracleError> {
        self.skills
            .skill(id)
            .ok_or_else(|| OracleError::SkillNotFound(id.clone()))
    }

    /// Looks up an equipment definition.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::EquipmentNotFound` if the table has no such item.
    pub fn equipment_definition(
        &self,
        id: &EquipmentId,
    ) -> Result<&'a EquipmentDefinition, OracleError> {
        self.equipment
            .equipment(id)
            .ok_or_else(|| OracleError::EquipmentNotFound(id.clone()))
    }

    /// Looks up a class definition.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::ClassNotFound` if the table has no such class.
    pub fn class_definition(&self, class: Class) -> Result<&'a ClassDefinition, OracleError> {
        self.classes
            .class(class)
            .ok_or(OracleError::ClassNotFound(class))
    }

    /// Looks up the universal stat row for a level.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::LevelNotFound` if the table has no such row.
    pub fn level_row(&self, level: u8) -> Result<&'a CombatStats, OracleError> {
        self.stat_tables
            .level_row(level)
            .ok_or(OracleError::LevelNotFound(level))
    }

    /// Looks up a growth correction.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::GrowthNotFound` if the table has no such growth.
    pub fn growth_definition(
        &self,
        growth: GrowthType,
    ) -> Result<&'a GrowthDefinition, OracleError> {
        self.stat_tables
            .growth(growth)
            .ok_or(OracleError::GrowthNotFound(growth))
    }
}

impl core::fmt::Debug for GameEnv<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GameEnv")
            .field("config", self.config)
            .finish_non_exhaustive()
    }
}
