use crate::config::BattleConfig;
use crate::env::{Class, EquipmentId, GrowthType, SkillId, SkillType};
use crate::tactics::TacticalCondition;

use super::UnitId;

/// Static roster member. Read-only during battle.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Unit {
    pub id: UnitId,
    pub name: String,
    pub class: Class,
    pub level: u8,
    pub growths: [GrowthType; 2],
    #[cfg_attr(feature = "serde", serde(default))]
    pub equipment: Vec<EquipmentId>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub skill_slots: Vec<SkillSlot>,
}

impl Unit {
    pub fn new(id: impl Into<String>, name: impl Into<String>, class: Class, level: u8) -> Self {
        Self {
            id: UnitId::new(id),
            name: name.into(),
            class,
            level,
            growths: [GrowthType::Balanced; 2],
            equipment: Vec::new(),
            skill_slots: Vec::new(),
        }
    }

    pub fn with_growths(mut self, growths: [GrowthType; 2]) -> Self {
        self.growths = growths;
        self
    }

    pub fn with_equipment(mut self, equipment: impl IntoIterator<Item = EquipmentId>) -> Self {
        self.equipment.extend(equipment);
        self
    }

    /// Appends a slot. Its `order` is its index unless set explicitly.
    pub fn with_slot(mut self, mut slot: SkillSlot) -> Self {
        if slot.order.is_none() {
            slot.order = Some(self.skill_slots.len() as u8);
        }
        self.skill_slots.push(slot);
        self
    }

    /// Slots sorted by evaluation order. Ties keep declaration order.
    pub fn ordered_slots(&self) -> Vec<&SkillSlot> {
        let mut slots: Vec<&SkillSlot> = self.skill_slots.iter().collect();
        slots.sort_by_key(|slot| slot.order.unwrap_or(u8::MAX));
        slots
    }
}

/// A unit's equipped skill plus up to two tactics.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillSlot {
    /// `None` for an empty slot.
    pub skill_id: Option<SkillId>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub skill_type: SkillType,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tactics: [Option<TacticalCondition>; BattleConfig::MAX_TACTICS],
    #[cfg_attr(feature = "serde", serde(default))]
    pub order: Option<u8>,
}

impl SkillSlot {
    pub fn active(skill_id: impl Into<String>) -> Self {
        Self {
            skill_id: Some(SkillId::new(skill_id)),
            skill_type: SkillType::Active,
            tactics: [None, None],
            order: None,
        }
    }

    pub fn passive(skill_id: impl Into<String>) -> Self {
        Self {
            skill_type: SkillType::Passive,
            ..Self::active(skill_id)
        }
    }

    pub fn empty() -> Self {
        Self {
            skill_id: None,
            skill_type: SkillType::Active,
            tactics: [None, None],
            order: None,
        }
    }

    pub fn with_tactic(mut self, tactic: TacticalCondition) -> Self {
        if let Some(free) = self.tactics.iter_mut().find(|slot| slot.is_none()) {
            *free = Some(tactic);
        }
        self
    }

    pub fn with_order(mut self, order: u8) -> Self {
        self.order = Some(order);
        self
    }

    /// Declared tactics in slot order.
    pub fn declared_tactics(&self) -> impl Iterator<Item = &TacticalCondition> {
        self.tactics.iter().flatten()
    }
}
