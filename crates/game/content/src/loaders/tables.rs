//! Level and growth stat tables loader.

use std::path::Path;

use battle_core::{CombatStats, GrowthDefinition};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// One row of the universal level table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelRow {
    pub level: u8,
    #[serde(flatten)]
    pub stats: CombatStats,
}

/// Stat tables as authored in `tables.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatTables {
    #[serde(default)]
    pub levels: Vec<LevelRow>,
    #[serde(default)]
    pub growths: Vec<GrowthDefinition>,
}

/// Loader for the level and growth tables from TOML files.
pub struct TablesLoader;

impl TablesLoader {
    pub fn load(path: &Path) -> LoadResult<StatTables> {
        let content = read_file(path)?;
        let tables: StatTables = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse stat tables TOML: {}", e))?;

        if tables.levels.is_empty() {
            tracing::warn!(path = %path.display(), "stat tables define no levels");
        }

        Ok(tables)
    }
}
