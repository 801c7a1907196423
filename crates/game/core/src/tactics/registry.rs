//! Typed handler registries.
//!
//! Each registry maps a [`ValueType`] to a plain function. A value type a
//! registry does not cover yields `None`; the evaluator logs and treats the
//! tactic as a no-op.

use std::cmp::Ordering;

use crate::state::{BattleContext, BattlefieldState, Row};

use super::condition::{ConditionMetadata, History, Operator, Side, SortDirection, StatusQuery, ValueType};

/// What handlers can see besides the candidate.
#[derive(Clone, Copy, Debug)]
pub struct TacticContext<'a> {
    pub actor: &'a BattleContext,
    pub state: &'a BattlefieldState,
}

/// Returns true when the whole skill slot must be abandoned.
pub type SkipHandler = fn(&ConditionMetadata, &TacticContext<'_>) -> bool;
/// Candidate predicate, before negation.
pub type FilterHandler = fn(&ConditionMetadata, &TacticContext<'_>, &BattleContext) -> bool;
/// Ascending comparison of two candidates by the value type's key.
pub type CompareHandler =
    fn(&ConditionMetadata, &TacticContext<'_>, &BattleContext, &BattleContext) -> Ordering;

pub fn skip_handler(value_type: ValueType) -> Option<SkipHandler> {
    match value_type {
        ValueType::OwnHpPercent => Some(skip_own_hp_percent),
        ValueType::OwnAp => Some(skip_own_ap),
        ValueType::OwnPp => Some(skip_own_pp),
        _ => None,
    }
}

pub fn filter_handler(value_type: ValueType) -> Option<FilterHandler> {
    match value_type {
        ValueType::HpPercent => Some(filter_hp_percent),
        ValueType::HpAverage => Some(filter_hp_average),
        ValueType::Ap => Some(filter_ap),
        ValueType::Pp => Some(filter_pp),
        ValueType::CombatantType => Some(filter_combatant_type),
        ValueType::Status => Some(filter_status),
        ValueType::Formation => Some(filter_formation),
        ValueType::EnemyPresence => Some(filter_enemy_presence),
        ValueType::UnitCount => Some(filter_unit_count),
        ValueType::UserCondition => Some(filter_user_condition),
        ValueType::ActionNumber => Some(filter_action_number),
        ValueType::HpRaw
        | ValueType::OwnHpPercent
        | ValueType::OwnAp
        | ValueType::OwnPp
        | ValueType::StatHigh
        | ValueType::StatLow
        | ValueType::AttackHistory => None,
    }
}

pub fn compare_handler(value_type: ValueType) -> Option<CompareHandler> {
    match value_type {
        ValueType::HpPercent => Some(compare_hp_percent),
        ValueType::HpRaw => Some(compare_hp_raw),
        ValueType::Ap => Some(compare_ap),
        ValueType::Pp => Some(compare_pp),
        ValueType::CombatantType => Some(compare_combatant_type),
        ValueType::Formation => Some(compare_row),
        ValueType::StatHigh | ValueType::StatLow => Some(compare_stat),
        ValueType::AttackHistory => Some(compare_history),
        _ => None,
    }
}

/// A sort tactic: the compare handler of its value type with the tactic's
/// direction applied.
#[derive(Clone, Copy)]
pub struct SortHandler {
    metadata: ConditionMetadata,
    compare: CompareHandler,
}

impl SortHandler {
    pub fn ordering(&self, ctx: &TacticContext<'_>, a: &BattleContext, b: &BattleContext) -> Ordering {
        let ordering = (self.compare)(&self.metadata, ctx, a, b);
        match self.metadata.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }

    /// Equality under the raw key, independent of direction.
    pub fn ties(&self, ctx: &TacticContext<'_>, a: &BattleContext, b: &BattleContext) -> bool {
        (self.compare)(&self.metadata, ctx, a, b) == Ordering::Equal
    }

    pub fn metadata(&self) -> &ConditionMetadata {
        &self.metadata
    }
}

pub fn sort_handler(metadata: &ConditionMetadata) -> Option<SortHandler> {
    let compare = compare_handler(metadata.value_type)?;
    Some(SortHandler {
        metadata: *metadata,
        compare,
    })
}

fn holds(metadata: &ConditionMetadata, value: i32) -> bool {
    let (Some(operator), Some(threshold)) = (metadata.operator, metadata.threshold) else {
        return true;
    };
    operator.holds(value, threshold)
}

fn holds_percent(metadata: &ConditionMetadata, percent: f64) -> bool {
    let (Some(operator), Some(threshold)) = (metadata.operator, metadata.threshold) else {
        return true;
    };
    operator.holds(percent, f64::from(threshold))
}

fn matches_status(query: Option<StatusQuery>, unit: &BattleContext) -> bool {
    match query {
        Some(StatusQuery::Afflicted(Some(affliction))) => unit.has_affliction(affliction),
        Some(StatusQuery::Afflicted(None)) => unit.status.is_afflicted(),
        Some(StatusQuery::Buffed) => !unit.status.buffs.is_empty(),
        Some(StatusQuery::Debuffed) => !unit.status.debuffs.is_empty(),
        None => true,
    }
}

// Skip

fn skip_own_hp_percent(metadata: &ConditionMetadata, ctx: &TacticContext<'_>) -> bool {
    !holds_percent(metadata, ctx.actor.hp_percent())
}

fn skip_own_ap(metadata: &ConditionMetadata, ctx: &TacticContext<'_>) -> bool {
    !holds(metadata, i32::from(ctx.actor.current_ap))
}

fn skip_own_pp(metadata: &ConditionMetadata, ctx: &TacticContext<'_>) -> bool {
    !holds(metadata, i32::from(ctx.actor.current_pp))
}

// Filter

fn filter_hp_percent(metadata: &ConditionMetadata, _: &TacticContext<'_>, unit: &BattleContext) -> bool {
    holds_percent(metadata, unit.hp_percent())
}

/// Pool-level: average HP percentage of the actor's living allies.
fn filter_hp_average(metadata: &ConditionMetadata, ctx: &TacticContext<'_>, _: &BattleContext) -> bool {
    let (sum, count) = ctx
        .state
        .living_units(ctx.actor.team)
        .fold((0.0, 0u32), |(sum, count), ally| (sum + ally.hp_percent(), count + 1));
    if count == 0 {
        return false;
    }
    holds_percent(metadata, sum / f64::from(count))
}

fn filter_ap(metadata: &ConditionMetadata, _: &TacticContext<'_>, unit: &BattleContext) -> bool {
    holds(metadata, i32::from(unit.current_ap))
}

fn filter_pp(metadata: &ConditionMetadata, _: &TacticContext<'_>, unit: &BattleContext) -> bool {
    holds(metadata, i32::from(unit.current_pp))
}

fn filter_combatant_type(metadata: &ConditionMetadata, _: &TacticContext<'_>, unit: &BattleContext) -> bool {
    metadata.combatant_type.is_none_or(|tag| unit.has_type(tag))
}

fn filter_status(metadata: &ConditionMetadata, _: &TacticContext<'_>, unit: &BattleContext) -> bool {
    matches_status(metadata.status, unit)
}

fn filter_formation(metadata: &ConditionMetadata, _: &TacticContext<'_>, unit: &BattleContext) -> bool {
    match metadata.row {
        Some(Row::Front) => unit.is_front_row(),
        Some(Row::Back) => !unit.is_front_row(),
        None => true,
    }
}

/// Pool-level: a living enemy carries the combatant type.
fn filter_enemy_presence(metadata: &ConditionMetadata, ctx: &TacticContext<'_>, _: &BattleContext) -> bool {
    let Some(tag) = metadata.combatant_type else {
        return true;
    };
    ctx.state
        .living_units(ctx.actor.team.opponent())
        .any(|enemy| enemy.has_type(tag))
}

/// Pool-level: living unit count of one side.
fn filter_unit_count(metadata: &ConditionMetadata, ctx: &TacticContext<'_>, _: &BattleContext) -> bool {
    let team = match metadata.side {
        Some(Side::Enemies) => ctx.actor.team.opponent(),
        Some(Side::Allies) | None => ctx.actor.team,
    };
    let count = i32::try_from(ctx.state.living_count(team)).unwrap_or(i32::MAX);
    holds(metadata, count)
}

/// Pool-level: status of the acting unit.
fn filter_user_condition(metadata: &ConditionMetadata, ctx: &TacticContext<'_>, _: &BattleContext) -> bool {
    matches_status(metadata.status, ctx.actor)
}

/// Pool-level: actions the acting unit has already taken.
fn filter_action_number(metadata: &ConditionMetadata, ctx: &TacticContext<'_>, _: &BattleContext) -> bool {
    let taken = i32::try_from(ctx.actor.actions_taken).unwrap_or(i32::MAX);
    holds(metadata, taken)
}

// Compare

fn compare_hp_percent(
    _: &ConditionMetadata,
    _: &TacticContext<'_>,
    a: &BattleContext,
    b: &BattleContext,
) -> Ordering {
    a.hp_percent().total_cmp(&b.hp_percent())
}

fn compare_hp_raw(
    _: &ConditionMetadata,
    _: &TacticContext<'_>,
    a: &BattleContext,
    b: &BattleContext,
) -> Ordering {
    a.current_hp.cmp(&b.current_hp)
}

fn compare_ap(
    _: &ConditionMetadata,
    _: &TacticContext<'_>,
    a: &BattleContext,
    b: &BattleContext,
) -> Ordering {
    a.current_ap.cmp(&b.current_ap)
}

fn compare_pp(
    _: &ConditionMetadata,
    _: &TacticContext<'_>,
    a: &BattleContext,
    b: &BattleContext,
) -> Ordering {
    a.current_pp.cmp(&b.current_pp)
}

/// Back row (0) before front row (1).
fn compare_row(
    _: &ConditionMetadata,
    _: &TacticContext<'_>,
    a: &BattleContext,
    b: &BattleContext,
) -> Ordering {
    a.position.row.cmp(&b.position.row)
}

fn compare_combatant_type(
    metadata: &ConditionMetadata,
    _: &TacticContext<'_>,
    a: &BattleContext,
    b: &BattleContext,
) -> Ordering {
    let Some(tag) = metadata.combatant_type else {
        return Ordering::Equal;
    };
    a.has_type(tag).cmp(&b.has_type(tag))
}

fn compare_stat(
    metadata: &ConditionMetadata,
    _: &TacticContext<'_>,
    a: &BattleContext,
    b: &BattleContext,
) -> Ordering {
    let Some(stat) = metadata.stat else {
        return Ordering::Equal;
    };
    a.effective_stat(stat).cmp(&b.effective_stat(stat))
}

fn compare_history(
    metadata: &ConditionMetadata,
    ctx: &TacticContext<'_>,
    a: &BattleContext,
    b: &BattleContext,
) -> Ordering {
    let remembered = match metadata.history {
        Some(History::LastTarget) => ctx.actor.last_target.as_ref(),
        Some(History::LastAttacker) => ctx.actor.last_attacker.as_ref(),
        None => None,
    };
    let is_remembered = |unit: &BattleContext| remembered.is_some_and(|id| id == unit.id());
    is_remembered(a).cmp(&is_remembered(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Position, Team, UnitId};
    use crate::tactics::TacticalCondition;
    use crate::testing::{battlefield, context, stats};
    use strum::IntoEnumIterator;

    #[test]
    fn own_value_types_are_skips_only() {
        for value_type in ValueType::iter() {
            let is_own = matches!(value_type, ValueType::OwnHpPercent | ValueType::OwnAp | ValueType::OwnPp);
            assert_eq!(skip_handler(value_type).is_some(), is_own, "{value_type}");
            if is_own {
                assert!(filter_handler(value_type).is_none());
                assert!(compare_handler(value_type).is_none());
            }
        }
    }

    #[test]
    fn own_hp_skip_uses_actor() {
        let mut hurt = context("p1", Team::Player, Position::front(0), stats().hp(100));
        hurt.current_hp = 30;
        let state = battlefield(vec![
            hurt,
            context("e1", Team::Enemy, Position::front(0), stats()),
        ]);
        let ctx = TacticContext {
            actor: state.unit(&UnitId::from("p1")).unwrap(),
            state: &state,
        };
        let skip = skip_handler(ValueType::OwnHpPercent).unwrap();

        assert!(!skip(&TacticalCondition::OwnHpBelowPercent(50).metadata(), &ctx));
        assert!(skip(&TacticalCondition::OwnHpAtLeastPercent(50).metadata(), &ctx));
    }

    #[test]
    fn descending_sort_reverses_compare() {
        let state = battlefield(vec![
            context("p1", Team::Player, Position::front(0), stats()),
            context("e1", Team::Enemy, Position::front(0), stats().patk(10)),
            context("e2", Team::Enemy, Position::front(1), stats().patk(90)),
        ]);
        let ctx = TacticContext {
            actor: state.unit(&UnitId::from("p1")).unwrap(),
            state: &state,
        };
        let weak = state.unit(&UnitId::from("e1")).unwrap();
        let strong = state.unit(&UnitId::from("e2")).unwrap();

        let high = TacticalCondition::HighestStat(crate::stats::StatKind::Patk).metadata();
        let sort = sort_handler(&high).unwrap();
        assert_eq!(sort.ordering(&ctx, strong, weak), Ordering::Less);
        assert!(!sort.ties(&ctx, strong, weak));

        let compare = compare_handler(high.value_type).unwrap();
        assert_eq!(compare(&high, &ctx, strong, weak), Ordering::Greater);
    }
}
