//! Skill selection and execution.
//!
//! An orchestrator drives one unit's turn as
//! [`select_active_skill`] → [`execute_skill`], receiving the next
//! [`BattlefieldState`](crate::state::BattlefieldState) and a [`BattleEvent`].
mod effects;
mod error;
mod event;
mod execute;
mod select;

pub use error::ActionError;
pub use event::{ActingUnit, BattleEvent, BattleEventKind, HitRecord, SkillResults, TargetResult};
pub use execute::{ExecutionOutcome, execute_skill};
pub use select::{SkillChoice, select_active_skill};
