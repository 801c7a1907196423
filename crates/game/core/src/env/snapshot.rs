//! In-memory oracle tables.
//!
//! [`TablesSnapshot`] owns every static table the rules read and implements
//! all oracle traits over plain maps. Content loaders build one from RON data;
//! tests build one with the `with_*` builders.

use std::collections::BTreeMap;

use super::{
    Class, ClassDefinition, ClassOracle, EquipmentDefinition, EquipmentId, EquipmentOracle,
    GrowthDefinition, GrowthType, SkillDefinition, SkillId, SkillOracle, StatTableOracle,
};
use crate::stats::CombatStats;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TablesSnapshot {
    pub skills: BTreeMap<SkillId, SkillDefinition>,
    pub equipment: BTreeMap<EquipmentId, EquipmentDefinition>,
    pub classes: BTreeMap<Class, ClassDefinition>,
    pub growths: BTreeMap<GrowthType, GrowthDefinition>,
    pub levels: BTreeMap<u8, CombatStats>,
}

impl TablesSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_skill(mut self, skill: SkillDefinition) -> Self {
        self.skills.insert(skill.id.clone(), skill);
        self
    }

    pub fn with_equipment(mut self, item: EquipmentDefinition) -> Self {
        self.equipment.insert(item.id.clone(), item);
        self
    }

    pub fn with_class(mut self, class: ClassDefinition) -> Self {
        self.classes.insert(class.class, class);
        self
    }

    pub fn with_growth(mut self, growth: GrowthDefinition) -> Self {
        self.growths.insert(growth.growth, growth);
        self
    }

    pub fn with_level(mut self, level: u8, row: CombatStats) -> Self {
        self.levels.insert(level, row);
        self
    }

    pub fn extend_skills(&mut self, skills: impl IntoIterator<Item = SkillDefinition>) {
        for skill in skills {
            self.skills.insert(skill.id.clone(), skill);
        }
    }

    pub fn extend_equipment(&mut self, items: impl IntoIterator<Item = EquipmentDefinition>) {
        for item in items {
            self.equipment.insert(item.id.clone(), item);
        }
    }

    pub fn extend_classes(&mut self, classes: impl IntoIterator<Item = ClassDefinition>) {
        for class in classes {
            self.classes.insert(class.class, class);
        }
    }
}

impl SkillOracle for TablesSnapshot {
    fn skill(&self, id: &SkillId) -> Option<&SkillDefinition> {
        self.skills.get(id)
    }
}

impl EquipmentOracle for TablesSnapshot {
    fn equipment(&self, id: &EquipmentId) -> Option<&EquipmentDefinition> {
        self.equipment.get(id)
    }
}

impl ClassOracle for TablesSnapshot {
    fn class(&self, class: Class) -> Option<&ClassDefinition> {
        self.classes.get(&class)
    }
}

impl StatTableOracle for TablesSnapshot {
    fn level_row(&self, level: u8) -> Option<&CombatStats> {
        self.levels.get(&level)
    }

    fn growth(&self, growth: GrowthType) -> Option<&GrowthDefinition> {
        self.growths.get(&growth)
    }
}
