//! Class, growth and per-level stat tables.
//!
//! Class definitions carry everything the rules read from a class: tier (which
//! fixes base AP/PP), movement type, trait tags, and whether the class follows
//! the dual-equipment rule. Stat tables hold the universal per-level row and the
//! growth corrections applied on top of it.

use crate::stats::CombatStats;

/// Unit class.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Class {
    Fighter,
    Berserker,
    Swordfighter,
    Swordmaster,
    Soldier,
    Halberdier,
    Hoplite,
    Crusader,
    Knight,
    GreatKnight,
    Archer,
    Sniper,
    Thief,
    Rogue,
    Wizard,
    Sorcerer,
    Cleric,
    Bishop,
    GryphonKnight,
    GryphonMaster,
    WyvernKnight,
    WyvernMaster,
    ElvenArcher,
    Valkyria,
}

impl Class {
    /// Sky knights deal effective damage to cavalry.
    pub const fn is_sky_knight(self) -> bool {
        matches!(
            self,
            Self::GryphonKnight | Self::GryphonMaster | Self::WyvernKnight | Self::WyvernMaster
        )
    }
}

/// Promotion tier. Base classes start with 1 AP/PP, advanced classes with 2.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ClassTier {
    #[default]
    Base,
    Advanced,
}

impl ClassTier {
    pub const fn base_resource(self) -> i32 {
        match self {
            Self::Base => 1,
            Self::Advanced => 2,
        }
    }
}

/// Movement type of a class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MovementType {
    #[default]
    Infantry,
    Cavalry,
    Flying,
}

impl MovementType {
    pub const fn combatant_type(self) -> CombatantType {
        match self {
            Self::Infantry => CombatantType::Infantry,
            Self::Cavalry => CombatantType::Cavalry,
            Self::Flying => CombatantType::Flying,
        }
    }
}

/// Tag used by tactics and effectiveness rules.
///
/// Movement types double as combatant types, so a unit's tag set is its
/// movement type plus its class traits.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::EnumCount,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatantType {
    Infantry,
    Cavalry,
    Flying,
    Armored,
    Scout,
    Archer,
    Caster,
    Elven,
    Bestral,
    Angel,
}

/// Static class data.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassDefinition {
    pub class: Class,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tier: ClassTier,
    #[cfg_attr(feature = "serde", serde(default))]
    pub movement: MovementType,
    #[cfg_attr(feature = "serde", serde(default))]
    pub traits: Vec<CombatantType>,
    /// Class equips two pieces sharing a dual-wield tag under the dual rule.
    #[cfg_attr(feature = "serde", serde(default))]
    pub dual_equipment: bool,
}

impl ClassDefinition {
    pub fn new(class: Class, tier: ClassTier, movement: MovementType) -> Self {
        Self {
            class,
            tier,
            movement,
            traits: Vec::new(),
            dual_equipment: false,
        }
    }

    pub fn with_traits(mut self, traits: impl IntoIterator<Item = CombatantType>) -> Self {
        self.traits.extend(traits);
        self
    }

    pub fn with_dual_equipment(mut self) -> Self {
        self.dual_equipment = true;
        self
    }

    pub fn has_trait(&self, tag: CombatantType) -> bool {
        self.traits.contains(&tag)
    }

    /// Movement type followed by traits, without duplicates.
    pub fn combatant_types(&self) -> Vec<CombatantType> {
        let mut tags = vec![self.movement.combatant_type()];
        for tag in &self.traits {
            if !tags.contains(tag) {
                tags.push(*tag);
            }
        }
        tags
    }
}

/// Growth type. Every unit carries two.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GrowthType {
    Balanced,
    Power,
    Guard,
    Magic,
    Technique,
    Speed,
    Vitality,
}

/// Growth correction applied to the universal stat row.
///
/// `multiplier` holds percentages (100 = neutral) and `addend` flat values.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GrowthDefinition {
    pub growth: GrowthType,
    pub multiplier: CombatStats,
    #[cfg_attr(feature = "serde", serde(default))]
    pub addend: CombatStats,
}

impl GrowthDefinition {
    pub fn neutral(growth: GrowthType) -> Self {
        Self {
            growth,
            multiplier: CombatStats::splat(100),
            addend: CombatStats::default(),
        }
    }
}

/// Oracle for class definitions.
pub trait ClassOracle: Send + Sync {
    fn class(&self, class: Class) -> Option<&ClassDefinition>;
}

/// Oracle for the universal level table and growth corrections.
pub trait StatTableOracle: Send + Sync {
    /// Universal stat row for a level.
    fn level_row(&self, level: u8) -> Option<&CombatStats>;

    fn growth(&self, growth: GrowthType) -> Option<&GrowthDefinition>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combatant_types_start_with_movement() {
        let def = ClassDefinition::new(Class::Archer, ClassTier::Base, MovementType::Infantry)
            .with_traits([CombatantType::Archer, CombatantType::Infantry]);
        assert_eq!(
            def.combatant_types(),
            vec![CombatantType::Infantry, CombatantType::Archer]
        );
    }

    #[test]
    fn sky_knights() {
        assert!(Class::WyvernMaster.is_sky_knight());
        assert!(!Class::Knight.is_sky_knight());
    }
}
