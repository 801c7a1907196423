//! Data-driven battle content and loaders.
//!
//! This crate reads static battle content from RON/TOML data files:
//! - Skill catalog (RON)
//! - Equipment catalog (RON)
//! - Class catalog (RON)
//! - Level and growth stat tables (TOML)
//! - Battle configuration (TOML)
//! - Battle setups: deployments for both teams (RON)
//!
//! Content is consumed through the `battle-core` oracle traits and never
//! appears in battle state. All loaders use `battle-core` types directly with
//! serde.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    BattleLoader, BattleSetup, ClassLoader, ConfigLoader, ContentFactory, EquipmentLoader,
    LoadResult, SkillLoader, StatTables, TablesLoader,
};
