//! Content loaders for reading battle data from files.
//!
//! Each loader turns one RON/TOML file into `battle-core` types;
//! [`ContentFactory`] ties them to a data directory.

pub mod battle;
pub mod classes;
pub mod config;
pub mod equipment;
pub mod factory;
pub mod skills;
pub mod tables;

pub use battle::{BattleLoader, BattleSetup};
pub use classes::ClassLoader;
pub use config::ConfigLoader;
pub use equipment::EquipmentLoader;
pub use factory::ContentFactory;
pub use skills::SkillLoader;
pub use tables::{StatTables, TablesLoader};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
