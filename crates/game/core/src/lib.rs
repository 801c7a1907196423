//! Deterministic tactical combat rules shared by content loaders and the runtime.
//!
//! `battle-core` defines the canonical battle rules (stat resolution, damage,
//! turn order, targeting, tactics, skill selection and execution) as pure
//! functions of `(state, inputs, rng)`. Static content is read through the
//! oracle traits in [`env`], every random draw goes through an injected
//! [`env::RngOracle`], and every state transition returns a new
//! [`state::BattlefieldState`] instead of mutating the previous one.
pub mod action;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod state;
pub mod stats;
pub mod tactics;
pub mod targeting;

#[cfg(test)]
pub(crate) mod testing;

pub use action::{
    ActingUnit, ActionError, BattleEvent, BattleEventKind, ExecutionOutcome, HitRecord, SkillChoice,
    SkillResults, TargetResult, execute_skill, select_active_skill,
};
pub use combat::{
    AttackType, DamageBreakdown, DamageResult, DamageType, calculate_multi_hit_damage,
    calculate_skill_damage,
};
pub use config::BattleConfig;
pub use engine::{calculate_turn_order, next_actor, start_round};
pub use env::{
    Class, ClassDefinition, ClassOracle, ClassTier, CombatantType, DamageEffect, DualWieldTag,
    EquipmentDefinition, EquipmentId, EquipmentKind, EquipmentOracle, GameEnv, GrowthDefinition,
    GrowthType, HitRate, MovementType, OracleError, PcgRng, Potency, RngOracle, SkillCategory,
    SkillDefinition, SkillEffect, SkillFlags, SkillId, SkillOracle, SkillType, StatTableOracle,
    TablesSnapshot, TargetGroup, TargetPattern, Targeting,
};
pub use error::{ErrorSeverity, GameError};
pub use state::{
    Affliction, BattleContext, BattleOutcome, BattlePhase, BattlefieldState, Deployment, Formation, Formations,
    InitializationError, Position, SkillSlot, StatModifier, Team, Unit, UnitId,
    create_all_battle_contexts, create_battle_context, create_initial_battlefield_state,
};
pub use stats::{CombatStats, StatKind, base_stats, equipment_bonus, resolve_combat_stats};
pub use tactics::{TacticOutcome, TacticalCondition, evaluate_skill_slot_tactics};
pub use targeting::{TargetOrder, get_default_targets, resolve_targets};
