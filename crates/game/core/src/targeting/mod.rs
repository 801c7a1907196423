//! Target resolution.
//!
//! One pipeline serves both the default (no tactics) path and the tactics
//! path: candidate pool, front-row blocking, conditional pattern, pattern
//! expansion. Tactics hand in an already filtered and possibly sorted pool.
mod blocking;
mod conditional;
mod group;
mod pattern;

pub use blocking::{apply_front_row_blocking, is_blocking_active};
pub use conditional::{battlefield_conditions_hold, target_conditions_hold};
pub use group::candidate_pool;
pub use pattern::{TargetOrder, apply_pattern, closest, pick_primary};

use crate::env::{RngOracle, SkillDefinition, TargetGroup, TargetPattern};
use crate::state::{BattleContext, BattlefieldState, UnitId};

/// Resolves the final targets of `skill` from `pool`.
///
/// Returns an empty list when blocking forbids the skill use or the pool is
/// empty. Caster-group and caster-pattern skills always target the actor.
pub fn resolve_targets(
    actor: &BattleContext,
    skill: &SkillDefinition,
    pool: Vec<&BattleContext>,
    order: TargetOrder,
    state: &BattlefieldState,
    rng: &mut (impl RngOracle + ?Sized),
) -> Vec<UnitId> {
    let targeting = &skill.targeting;
    if targeting.group == TargetGroup::Caster || targeting.pattern == TargetPattern::Caster {
        return vec![actor.id().clone()];
    }

    let Some(pool) = apply_front_row_blocking(actor, skill, pool, state) else {
        return Vec::new();
    };
    if pool.is_empty() {
        return Vec::new();
    }

    let Some(conditional) = &targeting.conditional_pattern else {
        return apply_pattern(targeting.pattern, actor, &pool, None, order, rng);
    };

    if !conditional.has_target_conditions() {
        let pattern = if battlefield_conditions_hold(conditional, actor, state) {
            conditional.pattern
        } else {
            targeting.pattern
        };
        return apply_pattern(pattern, actor, &pool, None, order, rng);
    }

    if targeting.pattern != TargetPattern::Single {
        tracing::warn!(
            skill = %skill.id,
            pattern = ?targeting.pattern,
            "target conditions require a Single base pattern; ignoring conditional pattern"
        );
        return apply_pattern(targeting.pattern, actor, &pool, None, order, rng);
    }

    let Some(primary) = pick_primary(actor, &pool, order, rng) else {
        return Vec::new();
    };
    if battlefield_conditions_hold(conditional, actor, state)
        && target_conditions_hold(conditional, primary)
    {
        apply_pattern(conditional.pattern, actor, &pool, Some(primary), order, rng)
    } else {
        vec![primary.id().clone()]
    }
}

/// Targets of `skill` when no tactic applies.
pub fn get_default_targets(
    actor: &BattleContext,
    skill: &SkillDefinition,
    state: &BattlefieldState,
    rng: &mut (impl RngOracle + ?Sized),
) -> Vec<UnitId> {
    let pool = candidate_pool(actor, skill.targeting.group, skill.flags, state);
    resolve_targets(actor, skill, pool, TargetOrder::Default, state, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{
        ConditionalPattern, PatternCondition, SkillCategory, SkillFlags, Targeting,
    };
    use crate::state::{Affliction, Position, Team};
    use crate::testing::{ScriptedRng, battlefield, context, stats};

    fn melee(pattern: TargetPattern) -> SkillDefinition {
        SkillDefinition::new("slash", "Slash", Targeting::new(TargetGroup::Enemy, pattern))
            .with_category(SkillCategory::Damage)
    }

    fn names(ids: &[UnitId]) -> Vec<&str> {
        ids.iter().map(UnitId::as_str).collect()
    }

    fn two_rows() -> BattlefieldState {
        battlefield(vec![
            context("p1", Team::Player, Position::front(0), stats()),
            context("ef", Team::Enemy, Position::front(1), stats()),
            context("eb", Team::Enemy, Position::back(0), stats()),
        ])
    }

    #[test]
    fn back_row_only_pool_is_blocked_for_melee() {
        let state = two_rows();
        let actor = state.unit(&UnitId::from("p1")).unwrap();
        let back_only = vec![state.unit(&UnitId::from("eb")).unwrap()];
        let mut rng = ScriptedRng::new(&[]);

        let targets = resolve_targets(
            actor,
            &melee(TargetPattern::Single),
            back_only,
            TargetOrder::Pinned,
            &state,
            &mut rng,
        );
        assert!(targets.is_empty());
    }

    #[test]
    fn piercing_and_ranged_skills_reach_back_row() {
        let state = two_rows();
        let actor = state.unit(&UnitId::from("p1")).unwrap();
        let back_only = || vec![state.unit(&UnitId::from("eb")).unwrap()];
        let mut rng = ScriptedRng::new(&[]);

        let piercing = melee(TargetPattern::Single).with_flags(SkillFlags::PIERCING);
        let targets = resolve_targets(actor, &piercing, back_only(), TargetOrder::Pinned, &state, &mut rng);
        assert_eq!(names(&targets), ["eb"]);

        let ranged = melee(TargetPattern::Single).with_attack_type(crate::combat::AttackType::Ranged);
        let targets = resolve_targets(actor, &ranged, back_only(), TargetOrder::Pinned, &state, &mut rng);
        assert_eq!(names(&targets), ["eb"]);
    }

    #[test]
    fn default_targets_strip_back_row_when_blocked() {
        let state = two_rows();
        let actor = state.unit(&UnitId::from("p1")).unwrap();
        let mut rng = ScriptedRng::new(&[]);

        let all = get_default_targets(actor, &melee(TargetPattern::All), &state, &mut rng);
        assert_eq!(names(&all), ["ef"]);
    }

    #[test]
    fn caster_targets_self() {
        let state = two_rows();
        let actor = state.unit(&UnitId::from("p1")).unwrap();
        let skill = SkillDefinition::new(
            "focus",
            "Focus",
            Targeting::new(TargetGroup::Caster, TargetPattern::Caster),
        )
        .with_category(SkillCategory::Support);
        let mut rng = ScriptedRng::new(&[]);
        assert_eq!(names(&get_default_targets(actor, &skill, &state, &mut rng)), ["p1"]);
    }

    #[test]
    fn night_conditional_widens_pattern() {
        let mut state = battlefield(vec![
            context("p1", Team::Player, Position::front(0), stats()),
            context("e0", Team::Enemy, Position::front(0), stats()),
            context("e1", Team::Enemy, Position::front(1), stats()),
        ]);
        let skill = SkillDefinition::new(
            "moon",
            "Moon Slash",
            Targeting::new(TargetGroup::Enemy, TargetPattern::Single).with_conditional(
                ConditionalPattern {
                    pattern: TargetPattern::Row,
                    conditions: vec![PatternCondition::Night],
                },
            ),
        )
        .with_category(SkillCategory::Damage);
        let mut rng = ScriptedRng::new(&[]);

        let actor = state.unit(&UnitId::from("p1")).unwrap().clone();
        assert_eq!(names(&get_default_targets(&actor, &skill, &state, &mut rng)), ["e0"]);

        state.is_night = true;
        assert_eq!(names(&get_default_targets(&actor, &skill, &state, &mut rng)), ["e0", "e1"]);
    }

    #[test]
    fn target_condition_checks_initial_pick() {
        let mut poisoned = context("e0", Team::Enemy, Position::front(0), stats());
        poisoned.status.afflict(Affliction::Poison);
        let state = battlefield(vec![
            context("p1", Team::Player, Position::front(0), stats()),
            poisoned,
            context("e1", Team::Enemy, Position::front(1), stats()),
            context("e2", Team::Enemy, Position::front(2), stats()),
        ]);
        let skill = SkillDefinition::new(
            "spread",
            "Spread Venom",
            Targeting::new(TargetGroup::Enemy, TargetPattern::Single).with_conditional(
                ConditionalPattern {
                    pattern: TargetPattern::All,
                    conditions: vec![PatternCondition::TargetHasAffliction(Some(Affliction::Poison))],
                },
            ),
        )
        .with_category(SkillCategory::Sabotage);
        let actor = state.unit(&UnitId::from("p1")).unwrap();
        let mut rng = ScriptedRng::new(&[]);

        let targets = get_default_targets(actor, &skill, &state, &mut rng);
        assert_eq!(names(&targets), ["e0", "e1", "e2"]);

        // Pinned to a healthy target: the conditional does not trigger.
        let pool = vec![state.unit(&UnitId::from("e2")).unwrap()];
        let targets = resolve_targets(actor, &skill, pool, TargetOrder::Pinned, &state, &mut rng);
        assert_eq!(names(&targets), ["e2"]);
    }
}
