//! Battle setup loader.

use std::path::Path;

use battle_core::Deployment;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Both teams' deployments plus the battle's seed and time of day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BattleSetup {
    /// Default seed; callers may override it.
    #[serde(default)]
    pub seed: Option<String>,
    #[serde(default)]
    pub is_night: bool,
    pub player: Vec<Deployment>,
    pub enemy: Vec<Deployment>,
}

/// Loader for battle setups from RON files.
pub struct BattleLoader;

impl BattleLoader {
    pub fn load(path: &Path) -> LoadResult<BattleSetup> {
        let content = read_file(path)?;
        let setup: BattleSetup = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse battle setup RON: {}", e))?;

        Ok(setup)
    }
}
