pub mod common;
pub mod context;
pub mod formation;
pub mod status;
pub mod unit;

pub use common::{Position, Row, Team, UnitId};
pub use context::{BattleContext, Deployment, create_all_battle_contexts, create_battle_context};
pub use formation::{Formation, Formations};
pub use status::{Affliction, ContextFlags, StatModifier, StatusEffects};
pub use unit::{SkillSlot, Unit};
