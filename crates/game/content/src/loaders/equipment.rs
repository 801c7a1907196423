//! Equipment catalog loader.

use std::path::Path;

use battle_core::EquipmentDefinition;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Equipment catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquipmentCatalog {
    pub equipment: Vec<EquipmentDefinition>,
}

/// Loader for the equipment catalog from RON files.
pub struct EquipmentLoader;

impl EquipmentLoader {
    /// Load the equipment catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<Vec<EquipmentDefinition>> {
        let content = read_file(path)?;
        let catalog: EquipmentCatalog = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse equipment catalog RON: {}", e))?;

        Ok(catalog.equipment)
    }
}
