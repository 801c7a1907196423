//! Skill catalog loader.

use std::path::Path;

use battle_core::SkillDefinition;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Skill catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillCatalog {
    pub skills: Vec<SkillDefinition>,
}

/// Loader for the skill catalog from RON files.
pub struct SkillLoader;

impl SkillLoader {
    /// Load the skill catalog from a RON file.
    ///
    /// Duplicate ids are rejected.
    pub fn load(path: &Path) -> LoadResult<Vec<SkillDefinition>> {
        let content = read_file(path)?;
        let catalog: SkillCatalog = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse skill catalog RON: {}", e))?;

        let mut seen = std::collections::BTreeSet::new();
        for skill in &catalog.skills {
            if !seen.insert(&skill.id) {
                anyhow::bail!("Duplicate skill id '{}' in {}", skill.id, path.display());
            }
        }

        Ok(catalog.skills)
    }
}
