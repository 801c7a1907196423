//! Per-slot tactic evaluation.

use std::cmp::Ordering;

use crate::env::{RngOracle, SkillDefinition, TargetPattern};
use crate::state::{BattleContext, BattlefieldState, Row, SkillSlot, UnitId};
use crate::targeting::{TargetOrder, candidate_pool, closest, resolve_targets};

use super::condition::{ConditionKind, ConditionMetadata, TacticalCondition, ValueType};
use super::registry::{SortHandler, TacticContext, filter_handler, skip_handler, sort_handler};

/// Verdict of a skill slot's tactics.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TacticOutcome {
    pub should_use_skill: bool,
    pub targets: Vec<UnitId>,
}

impl TacticOutcome {
    fn skipped() -> Self {
        Self::default()
    }
}

/// Runs a slot's tactics and resolves the targets of `skill`.
///
/// Skip tactics abandon the slot before any targeting. Filters narrow the
/// candidate pool in tactic order. Sort tactics are folded into one stable
/// sort, tactic 1 as the primary key. When the two leading candidates tie on
/// every sort, the tied group is broken by the default front-row/distance
/// rule, restricted to a declared formation row. The pool then goes through
/// blocking and pattern resolution.
pub fn evaluate_skill_slot_tactics(
    actor: &BattleContext,
    slot: &SkillSlot,
    skill: &SkillDefinition,
    state: &BattlefieldState,
    rng: &mut (impl RngOracle + ?Sized),
) -> TacticOutcome {
    let ctx = TacticContext { actor, state };
    let tactics: Vec<(TacticalCondition, ConditionMetadata)> = slot
        .declared_tactics()
        .map(|tactic| (*tactic, tactic.metadata()))
        .collect();

    for (tactic, metadata) in &tactics {
        let Some(skip) = skip_handler(metadata.value_type) else {
            continue;
        };
        if skip(metadata, &ctx) {
            tracing::trace!(actor = %actor.id(), skill = %skill.id, ?tactic, "slot skipped by tactic");
            return TacticOutcome::skipped();
        }
    }

    let mut pool = candidate_pool(actor, skill.targeting.group, skill.flags, state);
    let mut sorts: Vec<SortHandler> = Vec::new();

    for (tactic, metadata) in &tactics {
        if skip_handler(metadata.value_type).is_some() {
            continue;
        }
        match metadata.kind {
            ConditionKind::Filter => match filter_handler(metadata.value_type) {
                Some(filter) => pool.retain(|unit| filter(metadata, &ctx, unit) != metadata.negate),
                None => unsupported(tactic, metadata),
            },
            ConditionKind::Sort => match sort_handler(metadata) {
                Some(sort) => sorts.push(sort),
                None => unsupported(tactic, metadata),
            },
        }
    }

    if !sorts.is_empty() {
        pool.sort_by(|a, b| {
            sorts
                .iter()
                .fold(Ordering::Equal, |acc, sort| acc.then_with(|| sort.ordering(&ctx, a, b)))
        });
        if needs_primary(skill.targeting.pattern) {
            break_true_tie(&ctx, &mut pool, &sorts, declared_row(&tactics), rng);
        }
    }

    let order = if sorts.is_empty() {
        TargetOrder::Default
    } else {
        TargetOrder::Pinned
    };
    let targets = resolve_targets(actor, skill, pool, order, state, rng);

    TacticOutcome {
        should_use_skill: !targets.is_empty(),
        targets,
    }
}

fn unsupported(tactic: &TacticalCondition, metadata: &ConditionMetadata) {
    tracing::warn!(
        ?tactic,
        kind = ?metadata.kind,
        value_type = %metadata.value_type,
        "unsupported tactic; ignoring"
    );
}

fn needs_primary(pattern: TargetPattern) -> bool {
    !matches!(pattern, TargetPattern::All | TargetPattern::Caster)
}

fn declared_row(tactics: &[(TacticalCondition, ConditionMetadata)]) -> Option<Row> {
    tactics
        .iter()
        .filter(|(_, metadata)| metadata.value_type == ValueType::Formation)
        .find_map(|(_, metadata)| metadata.row)
}

/// Moves the default pick among the leading tied candidates to the front.
fn break_true_tie(
    ctx: &TacticContext<'_>,
    pool: &mut Vec<&BattleContext>,
    sorts: &[SortHandler],
    row: Option<Row>,
    rng: &mut (impl RngOracle + ?Sized),
) {
    let [first, second, ..] = pool.as_slice() else {
        return;
    };
    let ties = |a: &BattleContext, b: &BattleContext| sorts.iter().all(|sort| sort.ties(ctx, a, b));
    let leader: &BattleContext = *first;
    if !ties(leader, *second) {
        return;
    }

    let mut tied: Vec<&BattleContext> = pool
        .iter()
        .copied()
        .take_while(|unit| ties(leader, *unit))
        .collect();
    if let Some(row) = row {
        let in_row: Vec<&BattleContext> = tied
            .iter()
            .copied()
            .filter(|unit| unit.position.row_kind() == row)
            .collect();
        if !in_row.is_empty() {
            tied = in_row;
        }
    }

    let prefer_front = row.is_none();
    let Some(pick) = closest(ctx.actor, &tied, prefer_front, rng) else {
        return;
    };
    if let Some(index) = pool.iter().position(|unit| unit.id() == pick.id()) {
        let unit = pool.remove(index);
        pool.insert(0, unit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{CombatantType, SkillCategory, TargetGroup, Targeting};
    use crate::state::{Position, Team};
    use crate::testing::{ScriptedRng, battlefield, context, context_with, stats};
    use crate::env::Class;

    fn skill(group: TargetGroup, category: SkillCategory) -> SkillDefinition {
        SkillDefinition::new("s", "Skill", Targeting::new(group, TargetPattern::Single))
            .with_category(category)
    }

    fn names(ids: &[UnitId]) -> Vec<&str> {
        ids.iter().map(UnitId::as_str).collect()
    }

    fn slot(tactics: &[TacticalCondition]) -> SkillSlot {
        tactics
            .iter()
            .fold(SkillSlot::active("s"), |slot, tactic| slot.with_tactic(*tactic))
    }

    #[test]
    fn back_row_tactic_on_blocked_melee_yields_nothing() {
        let state = battlefield(vec![
            context("p1", Team::Player, Position::front(0), stats()),
            context("ef", Team::Enemy, Position::front(0), stats()),
            context("eb", Team::Enemy, Position::back(0), stats()),
        ]);
        let actor = state.unit(&UnitId::from("p1")).unwrap();
        let mut rng = ScriptedRng::new(&[]);

        let outcome = evaluate_skill_slot_tactics(
            actor,
            &slot(&[TacticalCondition::BackRow]),
            &skill(TargetGroup::Enemy, SkillCategory::Damage),
            &state,
            &mut rng,
        );
        assert!(!outcome.should_use_skill);
        assert!(outcome.targets.is_empty());
    }

    #[test]
    fn own_hp_skip_abandons_slot() {
        let state = battlefield(vec![
            context("p1", Team::Player, Position::front(0), stats()),
            context("e1", Team::Enemy, Position::front(0), stats()),
        ]);
        let actor = state.unit(&UnitId::from("p1")).unwrap();
        let mut rng = ScriptedRng::new(&[]);

        let outcome = evaluate_skill_slot_tactics(
            actor,
            &slot(&[TacticalCondition::OwnHpBelowPercent(50)]),
            &skill(TargetGroup::Enemy, SkillCategory::Damage),
            &state,
            &mut rng,
        );
        assert_eq!(outcome, TacticOutcome::default());
    }

    #[test]
    fn lowest_hp_percent_targets_weakest_ally() {
        let mut hurt = context("p2", Team::Player, Position::back(2), stats());
        hurt.current_hp = 20;
        let mut scratched = context("p3", Team::Player, Position::front(1), stats());
        scratched.current_hp = 90;
        let state = battlefield(vec![
            context("p1", Team::Player, Position::front(0), stats()),
            hurt,
            scratched,
            context("e1", Team::Enemy, Position::front(0), stats()),
        ]);
        let actor = state.unit(&UnitId::from("p1")).unwrap();
        let mut rng = ScriptedRng::new(&[]);

        let outcome = evaluate_skill_slot_tactics(
            actor,
            &slot(&[TacticalCondition::LowestHpPercent]),
            &skill(TargetGroup::Ally, SkillCategory::Heal),
            &state,
            &mut rng,
        );
        assert!(outcome.should_use_skill);
        assert_eq!(names(&outcome.targets), ["p2"]);
    }

    #[test]
    fn second_tactic_breaks_first_sort_ties() {
        let state = battlefield(vec![
            context("p1", Team::Player, Position::front(0), stats()),
            context("e1", Team::Enemy, Position::front(0), stats().patk(20)),
            context("e2", Team::Enemy, Position::front(1), stats().patk(70)),
            context("e3", Team::Enemy, Position::front(2), stats().patk(40)),
        ]);
        let actor = state.unit(&UnitId::from("p1")).unwrap();
        let mut rng = ScriptedRng::new(&[]);

        let outcome = evaluate_skill_slot_tactics(
            actor,
            &slot(&[
                TacticalCondition::LowestHpPercent,
                TacticalCondition::HighestStat(crate::stats::StatKind::Patk),
            ]),
            &skill(TargetGroup::Enemy, SkillCategory::Damage),
            &state,
            &mut rng,
        );
        assert_eq!(names(&outcome.targets), ["e2"]);
    }

    #[test]
    fn full_tie_falls_back_to_distance() {
        // Every enemy has full HP: the sort ties, so the closest wins instead
        // of the first in id order.
        let state = battlefield(vec![
            context("p1", Team::Player, Position::front(2), stats()),
            context("e1", Team::Enemy, Position::front(0), stats()),
            context("e2", Team::Enemy, Position::front(2), stats()),
        ]);
        let actor = state.unit(&UnitId::from("p1")).unwrap();
        let mut rng = ScriptedRng::new(&[]);

        let outcome = evaluate_skill_slot_tactics(
            actor,
            &slot(&[TacticalCondition::LowestHpPercent]),
            &skill(TargetGroup::Enemy, SkillCategory::Damage),
            &state,
            &mut rng,
        );
        assert_eq!(names(&outcome.targets), ["e2"]);
    }

    #[test]
    fn formation_sort_tie_break_keeps_declared_row() {
        let state = battlefield(vec![
            context("p1", Team::Player, Position::front(0), stats()),
            context("ef", Team::Enemy, Position::front(0), stats()),
            context("eb1", Team::Enemy, Position::back(1), stats()),
            context("eb2", Team::Enemy, Position::back(2), stats()),
        ]);
        let actor = state.unit(&UnitId::from("p1")).unwrap();
        let mut rng = ScriptedRng::new(&[]);
        let ranged = skill(TargetGroup::Enemy, SkillCategory::Damage)
            .with_attack_type(crate::combat::AttackType::Ranged);

        let outcome = evaluate_skill_slot_tactics(
            actor,
            &slot(&[TacticalCondition::PrioritizeBackRow]),
            &ranged,
            &state,
            &mut rng,
        );
        assert_eq!(names(&outcome.targets), ["eb1"]);
    }

    #[test]
    fn combatant_type_filters_and_negation() {
        let state = battlefield(vec![
            context("p1", Team::Player, Position::front(0), stats()),
            context_with(
                "knight",
                Team::Enemy,
                Position::front(0),
                stats(),
                Class::Knight,
                &[CombatantType::Cavalry, CombatantType::Armored],
            ),
            context("grunt", Team::Enemy, Position::front(1), stats()),
        ]);
        let actor = state.unit(&UnitId::from("p1")).unwrap();
        let mut rng = ScriptedRng::new(&[]);
        let hostile = skill(TargetGroup::Enemy, SkillCategory::Damage);

        let only = evaluate_skill_slot_tactics(
            actor,
            &slot(&[TacticalCondition::Only(CombatantType::Cavalry)]),
            &hostile,
            &state,
            &mut rng,
        );
        assert_eq!(names(&only.targets), ["knight"]);

        let exclude = evaluate_skill_slot_tactics(
            actor,
            &slot(&[TacticalCondition::Exclude(CombatantType::Armored)]),
            &hostile,
            &state,
            &mut rng,
        );
        assert_eq!(names(&exclude.targets), ["grunt"]);

        let absent = evaluate_skill_slot_tactics(
            actor,
            &slot(&[TacticalCondition::EnemyAbsent(CombatantType::Flying)]),
            &hostile,
            &state,
            &mut rng,
        );
        assert!(absent.should_use_skill);

        let present = evaluate_skill_slot_tactics(
            actor,
            &slot(&[TacticalCondition::EnemyPresent(CombatantType::Flying)]),
            &hostile,
            &state,
            &mut rng,
        );
        assert!(!present.should_use_skill);
    }
}
