//! Battle configuration loader.

use std::path::Path;

use battle_core::BattleConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for battle configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys keep their [`BattleConfig::default`] values. Guard
    /// reduction settings above [`BattleConfig::GUARD_REDUCTION_CEILING`] are
    /// rejected.
    pub fn load(path: &Path) -> LoadResult<BattleConfig> {
        let content = read_file(path)?;
        let config: BattleConfig = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        let ceiling = BattleConfig::GUARD_REDUCTION_CEILING;
        if config.max_guard_reduction > ceiling {
            anyhow::bail!(
                "max_guard_reduction {} exceeds the {}% ceiling",
                config.max_guard_reduction,
                ceiling
            );
        }
        if config.base_guard_reduction > ceiling {
            anyhow::bail!(
                "base_guard_reduction {} exceeds the {}% ceiling",
                config.base_guard_reduction,
                ceiling
            );
        }

        Ok(config)
    }
}
