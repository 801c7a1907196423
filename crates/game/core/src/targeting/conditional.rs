//! Conditional target patterns.

use crate::env::{ConditionalPattern, PatternCondition};
use crate::state::{BattleContext, BattlefieldState};

/// Checks the battlefield conditions of a conditional pattern. Target
/// conditions are ignored here.
pub fn battlefield_conditions_hold(
    conditional: &ConditionalPattern,
    actor: &BattleContext,
    state: &BattlefieldState,
) -> bool {
    let allies = state.living_count(actor.team);
    let enemies = state.living_count(actor.team.opponent());
    conditional.conditions.iter().all(|condition| match *condition {
        PatternCondition::Night => state.is_night,
        PatternCondition::Day => !state.is_night,
        PatternCondition::AlliesAtMost(n) => allies <= usize::from(n),
        PatternCondition::AlliesAtLeast(n) => allies >= usize::from(n),
        PatternCondition::EnemiesAtMost(n) => enemies <= usize::from(n),
        PatternCondition::EnemiesAtLeast(n) => enemies >= usize::from(n),
        PatternCondition::TargetHasAffliction(_)
        | PatternCondition::TargetIsType(_)
        | PatternCondition::TargetHpBelowPercent(_) => true,
    })
}

/// Checks the target conditions of a conditional pattern against the chosen
/// target. Battlefield conditions are ignored here.
pub fn target_conditions_hold(conditional: &ConditionalPattern, target: &BattleContext) -> bool {
    conditional.conditions.iter().all(|condition| match *condition {
        PatternCondition::TargetHasAffliction(Some(affliction)) => target.has_affliction(affliction),
        PatternCondition::TargetHasAffliction(None) => target.status.is_afflicted(),
        PatternCondition::TargetIsType(tag) => target.has_type(tag),
        PatternCondition::TargetHpBelowPercent(percent) => target.hp_percent() < f64::from(percent),
        _ => true,
    })
}
