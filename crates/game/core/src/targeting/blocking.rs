//! Front-row blocking.
//!
//! While any enemy front-row unit lives, a non-piercing melee damage skill
//! aimed at the enemy group may only reach front-row units.

use crate::combat::{AttackType, is_damage_skill, skill_attack_type};
use crate::env::{SkillDefinition, SkillFlags, TargetGroup};
use crate::state::{BattleContext, BattlefieldState};

/// Whether blocking restricts `skill` used by `actor` on this battlefield.
pub fn is_blocking_active(
    actor: &BattleContext,
    skill: &SkillDefinition,
    state: &BattlefieldState,
) -> bool {
    skill.targeting.group == TargetGroup::Enemy
        && is_damage_skill(skill)
        && !skill.flags.contains(SkillFlags::PIERCING)
        && skill_attack_type(actor, skill) == AttackType::Melee
        && state.front_row_alive(actor.team.opponent())
}

/// Applies blocking to a (possibly pre-filtered) pool.
///
/// Returns `None` when the pool holds only back-row units while blocking is
/// active: the skill use is blocked entirely. A mixed pool loses its back-row
/// entries. Pool order is preserved.
pub fn apply_front_row_blocking<'s>(
    actor: &BattleContext,
    skill: &SkillDefinition,
    pool: Vec<&'s BattleContext>,
    state: &BattlefieldState,
) -> Option<Vec<&'s BattleContext>> {
    if !is_blocking_active(actor, skill, state) {
        return Some(pool);
    }
    let front: Vec<&BattleContext> = pool.into_iter().filter(|ctx| ctx.is_front_row()).collect();
    if front.is_empty() {
        tracing::debug!(
            actor = %actor.id(),
            skill = %skill.id,
            "melee skill blocked by living front row"
        );
        return None;
    }
    Some(front)
}
