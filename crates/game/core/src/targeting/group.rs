//! Candidate pools by target group.

use crate::env::{SkillFlags, TargetGroup};
use crate::state::{BattleContext, BattlefieldState};

/// Raw candidate pool for a target group, in unit id order.
///
/// `Ally` is the actor's living teammates (without the actor when the skill
/// has `ExcludeSelf`), `Enemy` the living opponents, `Self` the actor.
pub fn candidate_pool<'s>(
    actor: &BattleContext,
    group: TargetGroup,
    flags: SkillFlags,
    state: &'s BattlefieldState,
) -> Vec<&'s BattleContext> {
    match group {
        TargetGroup::Ally => state
            .living_units(actor.team)
            .filter(|ctx| !(flags.contains(SkillFlags::EXCLUDE_SELF) && ctx.id() == actor.id()))
            .collect(),
        TargetGroup::Enemy => state.living_units(actor.team.opponent()).collect(),
        TargetGroup::Caster => state.unit(actor.id()).into_iter().collect(),
    }
}
