//! Skill definitions and the skill oracle.
//!
//! Skills are immutable content. A definition describes who it can target
//! ([`Targeting`]), what it costs, which categories it belongs to, and the
//! ordered list of effects applied to each resolved target.

use std::collections::BTreeSet;

use bitflags::bitflags;

use crate::combat::AttackType;
use crate::env::CombatantType;
use crate::state::{Affliction, StatModifier};

/// Stable identifier of a skill definition.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SkillId(pub String);

impl SkillId {
    /// Identifier of the built-in zero-cost fallback skill.
    pub const STANDBY: &'static str = "standby";

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn standby() -> Self {
        Self::new(Self::STANDBY)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_standby(&self) -> bool {
        self.0 == Self::STANDBY
    }
}

impl core::fmt::Display for SkillId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SkillId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

pub trait SkillOracle: Send + Sync {
    fn skill(&self, id: &SkillId) -> Option<&SkillDefinition>;
}

/// Active skills are chosen on the unit's turn and cost AP. Passive skills
/// trigger from other units' actions and cost PP.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkillType {
    #[default]
    Active,
    Passive,
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkillCategory {
    Damage,
    Sabotage,
    Heal,
    Support,
    Counter,
    Pursuit,
    Guard,
    Standby,
}

bitflags! {
    /// Behaviour modifiers carried by a skill.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct SkillFlags: u16 {
        /// Hit chance is always 100.
        const TRUE_STRIKE   = 1 << 0;
        /// Every hit is a critical hit; no crit roll is drawn.
        const TRUE_CRITICAL = 1 << 1;
        /// Targets cannot guard.
        const UNGUARDABLE   = 1 << 2;
        /// Melee attack ignores front-row blocking.
        const PIERCING      = 1 << 3;
        /// The caster is removed from ally target pools.
        const EXCLUDE_SELF  = 1 << 4;
    }
}

/// AP and PP cost of a skill.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SkillCost {
    pub ap: u8,
    pub pp: u8,
}

/// Which side of the battlefield a skill draws its candidates from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetGroup {
    Ally,
    Enemy,
    #[cfg_attr(feature = "serde", serde(rename = "Self"))]
    Caster,
}

/// Shape of the final target set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetPattern {
    Single,
    Row,
    Column,
    All,
    Two,
    Three,
    #[cfg_attr(feature = "serde", serde(rename = "Self"))]
    Caster,
}

impl TargetPattern {
    /// Number of picks for iterative multi-target patterns.
    pub const fn pick_count(self) -> Option<usize> {
        match self {
            Self::Two => Some(2),
            Self::Three => Some(3),
            _ => None,
        }
    }
}

/// Condition that switches a skill to its conditional pattern.
///
/// Battlefield conditions are checked before resolution. Target conditions
/// are checked against the initial single pick and are only meaningful for
/// skills whose base pattern is [`TargetPattern::Single`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PatternCondition {
    Night,
    Day,
    AlliesAtMost(u8),
    AlliesAtLeast(u8),
    EnemiesAtMost(u8),
    EnemiesAtLeast(u8),
    /// `None` matches any affliction.
    TargetHasAffliction(Option<Affliction>),
    TargetIsType(CombatantType),
    TargetHpBelowPercent(u8),
}

impl PatternCondition {
    pub const fn is_target_condition(&self) -> bool {
        matches!(
            self,
            Self::TargetHasAffliction(_) | Self::TargetIsType(_) | Self::TargetHpBelowPercent(_)
        )
    }
}

/// Replacement pattern used when every condition holds.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConditionalPattern {
    pub pattern: TargetPattern,
    pub conditions: Vec<PatternCondition>,
}

impl ConditionalPattern {
    pub fn has_target_conditions(&self) -> bool {
        self.conditions.iter().any(PatternCondition::is_target_condition)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Targeting {
    pub group: TargetGroup,
    pub pattern: TargetPattern,
    #[cfg_attr(feature = "serde", serde(default))]
    pub conditional_pattern: Option<ConditionalPattern>,
}

impl Targeting {
    pub const fn new(group: TargetGroup, pattern: TargetPattern) -> Self {
        Self {
            group,
            pattern,
            conditional_pattern: None,
        }
    }

    pub fn with_conditional(mut self, conditional: ConditionalPattern) -> Self {
        self.conditional_pattern = Some(conditional);
        self
    }
}

/// Percent potency per damage component. A missing or zero component deals no
/// damage of that kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Potency {
    pub physical: Option<u32>,
    pub magical: Option<u32>,
}

impl Potency {
    pub const fn physical(value: u32) -> Self {
        Self {
            physical: Some(value),
            magical: None,
        }
    }

    pub const fn magical(value: u32) -> Self {
        Self {
            physical: None,
            magical: Some(value),
        }
    }

    pub const fn hybrid(physical: u32, magical: u32) -> Self {
        Self {
            physical: Some(physical),
            magical: Some(magical),
        }
    }

    pub fn physical_value(&self) -> u32 {
        self.physical.unwrap_or(0)
    }

    pub fn magical_value(&self) -> u32 {
        self.magical.unwrap_or(0)
    }

    pub fn has_physical(&self) -> bool {
        self.physical_value() > 0
    }

    pub fn has_magical(&self) -> bool {
        self.magical_value() > 0
    }
}

/// Hit rate of a damage effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HitRate {
    /// Always hits.
    True,
    Percent(u32),
}

impl Default for HitRate {
    fn default() -> Self {
        Self::Percent(100)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageEffect {
    pub potency: Potency,
    #[cfg_attr(feature = "serde", serde(default))]
    pub hit_rate: HitRate,
    #[cfg_attr(feature = "serde", serde(default = "default_hit_count"))]
    pub hit_count: u8,
}

#[cfg(feature = "serde")]
fn default_hit_count() -> u8 {
    1
}

impl DamageEffect {
    pub const fn new(potency: Potency, hit_rate: HitRate, hit_count: u8) -> Self {
        Self {
            potency,
            hit_rate,
            hit_count,
        }
    }
}

/// One effect of a skill, applied to each resolved target in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkillEffect {
    Damage(DamageEffect),
    /// Restores `MATK × potency / 100` HP, at least 1.
    Heal { potency: u32 },
    Buff(StatModifier),
    /// Same hit rule as [`SkillEffect::Inflict`].
    Debuff(StatModifier),
    /// Applied only to targets that were hit by an earlier damage effect of the
    /// same skill, or unconditionally when the skill deals no damage.
    Inflict(Affliction),
    Cleanse,
    RestoreAp(u8),
    RestorePp(u8),
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillDefinition {
    pub id: SkillId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub skill_type: SkillType,
    #[cfg_attr(feature = "serde", serde(default))]
    pub cost: SkillCost,
    pub targeting: Targeting,
    #[cfg_attr(feature = "serde", serde(default))]
    pub categories: BTreeSet<SkillCategory>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub effects: Vec<SkillEffect>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub flags: SkillFlags,
    /// Innate attack type overriding the class-derived one.
    #[cfg_attr(feature = "serde", serde(default))]
    pub attack_type: Option<AttackType>,
}

impl SkillDefinition {
    pub fn new(id: impl Into<String>, name: impl Into<String>, targeting: Targeting) -> Self {
        Self {
            id: SkillId::new(id),
            name: name.into(),
            skill_type: SkillType::Active,
            cost: SkillCost::default(),
            targeting,
            categories: BTreeSet::new(),
            effects: Vec::new(),
            flags: SkillFlags::empty(),
            attack_type: None,
        }
    }

    /// Built-in fallback: self-targeted, free, no effects.
    pub fn standby() -> Self {
        Self::new(
            SkillId::STANDBY,
            "Standby",
            Targeting::new(TargetGroup::Caster, TargetPattern::Caster),
        )
        .with_category(SkillCategory::Standby)
    }

    pub fn with_ap_cost(mut self, ap: u8) -> Self {
        self.cost.ap = ap;
        self
    }

    pub fn with_pp_cost(mut self, pp: u8) -> Self {
        self.skill_type = SkillType::Passive;
        self.cost.pp = pp;
        self
    }

    pub fn with_category(mut self, category: SkillCategory) -> Self {
        self.categories.insert(category);
        self
    }

    pub fn with_effect(mut self, effect: SkillEffect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn with_flags(mut self, flags: SkillFlags) -> Self {
        self.flags |= flags;
        self
    }

    pub fn with_attack_type(mut self, attack_type: AttackType) -> Self {
        self.attack_type = Some(attack_type);
        self
    }

    pub fn is_active(&self) -> bool {
        self.skill_type == SkillType::Active
    }

    pub fn has_category(&self, category: SkillCategory) -> bool {
        self.categories.contains(&category)
    }

    pub fn damage_effects(&self) -> impl Iterator<Item = &DamageEffect> {
        self.effects.iter().filter_map(|effect| match effect {
            SkillEffect::Damage(damage) => Some(damage),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standby_is_free_and_self_targeted() {
        let standby = SkillDefinition::standby();
        assert!(standby.id.is_standby());
        assert_eq!(standby.cost.ap, 0);
        assert_eq!(standby.targeting.pattern, TargetPattern::Caster);
        assert!(standby.effects.is_empty());
    }

    #[test]
    fn target_conditions_are_detected() {
        let conditional = ConditionalPattern {
            pattern: TargetPattern::Row,
            conditions: vec![
                PatternCondition::Night,
                PatternCondition::TargetHasAffliction(Some(Affliction::Poison)),
            ],
        };
        assert!(conditional.has_target_conditions());
        assert!(!PatternCondition::AlliesAtMost(2).is_target_condition());
    }
}
