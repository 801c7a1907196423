//! Class catalog loader.

use std::path::Path;

use battle_core::ClassDefinition;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Class catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassCatalog {
    pub classes: Vec<ClassDefinition>,
}

/// Loader for the class catalog from RON files.
pub struct ClassLoader;

impl ClassLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<ClassDefinition>> {
        let content = read_file(path)?;
        let catalog: ClassCatalog = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse class catalog RON: {}", e))?;

        Ok(catalog.classes)
    }
}
