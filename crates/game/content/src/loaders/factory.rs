//! Content factory for building oracle tables from data files.

use std::path::{Path, PathBuf};

use battle_core::{
    BattleConfig, ClassDefinition, EquipmentDefinition, SkillDefinition, TablesSnapshot,
};

use crate::loaders::{
    BattleLoader, BattleSetup, ClassLoader, ConfigLoader, EquipmentLoader, LoadResult,
    SkillLoader, StatTables, TablesLoader,
};

/// Content factory that loads all battle content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── tables.toml
/// ├── skills.ron
/// ├── equipment.ron
/// ├── classes.ron
/// └── battles/
///     └── skirmish.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load battle configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<BattleConfig> {
        ConfigLoader::load(&self.data_dir.join("config.toml"))
    }

    /// Load level and growth tables from `tables.toml`.
    pub fn load_stat_tables(&self) -> LoadResult<StatTables> {
        TablesLoader::load(&self.data_dir.join("tables.toml"))
    }

    /// Load the skill catalog from `skills.ron`.
    pub fn load_skills(&self) -> LoadResult<Vec<SkillDefinition>> {
        SkillLoader::load(&self.data_dir.join("skills.ron"))
    }

    /// Load the equipment catalog from `equipment.ron`.
    pub fn load_equipment(&self) -> LoadResult<Vec<EquipmentDefinition>> {
        EquipmentLoader::load(&self.data_dir.join("equipment.ron"))
    }

    /// Load the class catalog from `classes.ron`.
    pub fn load_classes(&self) -> LoadResult<Vec<ClassDefinition>> {
        ClassLoader::load(&self.data_dir.join("classes.ron"))
    }

    /// Load every static table into one snapshot implementing all oracles.
    pub fn load_tables(&self) -> LoadResult<TablesSnapshot> {
        let mut snapshot = TablesSnapshot::new();
        snapshot.extend_skills(self.load_skills()?);
        snapshot.extend_equipment(self.load_equipment()?);
        snapshot.extend_classes(self.load_classes()?);

        let stat_tables = self.load_stat_tables()?;
        for row in stat_tables.levels {
            snapshot.levels.insert(row.level, row.stats);
        }
        for growth in stat_tables.growths {
            snapshot.growths.insert(growth.growth, growth);
        }

        tracing::debug!(
            skills = snapshot.skills.len(),
            equipment = snapshot.equipment.len(),
            classes = snapshot.classes.len(),
            levels = snapshot.levels.len(),
            "content tables loaded"
        );
        Ok(snapshot)
    }

    /// Load a battle setup from `battles/{name}.ron`.
    pub fn load_battle(&self, name: &str) -> LoadResult<BattleSetup> {
        let path = self.data_dir.join("battles").join(format!("{}.ron", name));
        BattleLoader::load(&path)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::Class;

    fn bundled() -> ContentFactory {
        ContentFactory::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("data"))
    }

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn bundled_content_loads() {
        let factory = bundled();
        let config = factory.load_config().unwrap();
        assert_eq!(config, BattleConfig::default());

        let tables = factory.load_tables().unwrap();
        assert!(!tables.skills.is_empty());
        assert!(!tables.classes.is_empty());
        assert!(tables.levels.contains_key(&10));
    }

    #[test]
    fn bundled_battle_references_known_content() {
        let factory = bundled();
        let tables = factory.load_tables().unwrap();
        let setup = factory.load_battle("skirmish").unwrap();

        for deployment in setup.player.iter().chain(&setup.enemy) {
            let unit = &deployment.unit;
            assert!(tables.classes.contains_key(&unit.class), "{}", unit.id);
            assert!(tables.levels.contains_key(&unit.level), "{}", unit.id);
            for item in &unit.equipment {
                assert!(tables.equipment.contains_key(item), "{item}");
            }
            for slot in &unit.skill_slots {
                if let Some(skill) = &slot.skill_id {
                    assert!(tables.skills.contains_key(skill), "{skill}");
                }
            }
        }
    }

    #[test]
    fn bundled_classes_cover_every_class() {
        use strum::IntoEnumIterator;

        let tables = bundled().load_tables().unwrap();
        for class in Class::iter() {
            assert!(tables.classes.contains_key(&class), "{class}");
        }
    }

    #[test]
    fn only_swordmaster_crusader_and_valkyria_dual_equip() {
        let tables = bundled().load_tables().unwrap();
        let mut dual: Vec<Class> = tables
            .classes
            .values()
            .filter(|definition| definition.dual_equipment)
            .map(|definition| definition.class)
            .collect();
        dual.sort_by_key(|class| class.to_string());

        assert_eq!(dual, vec![Class::Crusader, Class::Swordmaster, Class::Valkyria]);
    }

    #[test]
    fn missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = ContentFactory::new(dir.path()).load_skills().unwrap_err();
        assert!(err.to_string().contains("skills.ron"));
    }
}
