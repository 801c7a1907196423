//! Attack and damage classification.

use crate::env::{CombatantType, DamageEffect, SkillCategory, SkillDefinition};
use crate::state::BattleContext;

/// How an attack reaches its target. Melee attacks are subject to front-row
/// blocking.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackType {
    Melee,
    Ranged,
    Magical,
}

/// Which stats a damage effect scales with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DamageType {
    Physical,
    Magical,
    Hybrid,
}

/// Attack type of `skill` used by `actor`, unless the skill carries an
/// innate one.
///
/// Read from the actor's combatant tags (the class movement type plus
/// traits): Flying or Archer make attacks ranged; everything else is melee.
pub fn skill_attack_type(actor: &BattleContext, skill: &SkillDefinition) -> AttackType {
    if let Some(innate) = skill.attack_type {
        return innate;
    }
    if actor.has_type(CombatantType::Flying) || actor.has_type(CombatantType::Archer) {
        AttackType::Ranged
    } else {
        AttackType::Melee
    }
}

pub fn damage_type(effect: &DamageEffect) -> DamageType {
    match (effect.potency.has_physical(), effect.potency.has_magical()) {
        (true, true) => DamageType::Hybrid,
        (false, true) => DamageType::Magical,
        _ => DamageType::Physical,
    }
}

pub fn is_damage_skill(skill: &SkillDefinition) -> bool {
    skill.has_category(SkillCategory::Damage)
}

/// Damage or Sabotage.
pub fn is_hostile_skill(skill: &SkillDefinition) -> bool {
    skill.has_category(SkillCategory::Damage) || skill.has_category(SkillCategory::Sabotage)
}

pub fn is_ally_only_skill(skill: &SkillDefinition) -> bool {
    !is_hostile_skill(skill)
}

pub fn is_counter_skill(skill: &SkillDefinition) -> bool {
    skill.has_category(SkillCategory::Counter)
}

pub fn is_pursuit_skill(skill: &SkillDefinition) -> bool {
    skill.has_category(SkillCategory::Pursuit)
}
