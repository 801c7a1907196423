//! Skill execution.

use crate::env::{GameEnv, RngOracle, SkillDefinition, SkillId};
use crate::state::{BattleContext, BattlefieldState, UnitId};

use super::effects::{EffectContext, Scratch};
use super::error::ActionError;
use super::event::{BattleEvent, SkillResults};
use super::select::SkillChoice;

/// New state plus the event describing the action.
#[derive(Clone, Debug)]
pub struct ExecutionOutcome {
    pub state: BattlefieldState,
    pub event: BattleEvent,
}

/// Resolves `choice` for `actor_id` and returns the resulting state.
///
/// The actor pays the skill's AP and PP cost and is marked as having acted.
/// Every effect is applied to every target in order; targets that fell
/// earlier in the same action take no further damage. An unknown skill or a
/// choice whose targets are all gone resolves as Standby.
///
/// # Errors
///
/// [`ActionError`] when the actor does not exist or has fallen.
pub fn execute_skill(
    state: &BattlefieldState,
    actor_id: &UnitId,
    choice: &SkillChoice,
    env: &GameEnv<'_>,
    rng: &mut (impl RngOracle + ?Sized),
) -> Result<ExecutionOutcome, ActionError> {
    let actor = state
        .unit(actor_id)
        .ok_or_else(|| ActionError::ActorNotFound(actor_id.clone()))?;
    if !actor.is_alive() {
        return Err(ActionError::ActorDefeated(actor_id.clone()));
    }

    let SkillChoice::Skill { skill_id, targets } = choice else {
        return Ok(stand_by(state, actor));
    };
    let skill = match env.skill(skill_id) {
        Ok(skill) => skill,
        Err(err) => {
            tracing::warn!(unit = %actor_id, %err, "standing by instead");
            return Ok(stand_by(state, actor));
        }
    };
    let targets: Vec<UnitId> = targets
        .iter()
        .filter(|id| state.unit(id).is_some_and(BattleContext::is_alive))
        .cloned()
        .collect();
    if targets.is_empty() {
        tracing::warn!(unit = %actor_id, skill = %skill_id, "no living targets; standing by");
        return Ok(stand_by(state, actor));
    }

    Ok(use_skill(state, actor, skill, targets, env, rng))
}

fn mark_acted(actor: &mut BattleContext) {
    actor.has_acted_this_round = true;
    actor.actions_taken += 1;
}

fn stand_by(state: &BattlefieldState, actor: &BattleContext) -> ExecutionOutcome {
    let mut acted = actor.clone();
    mark_acted(&mut acted);

    let mut next = state.with_context(acted);
    next.action_count += 1;
    tracing::debug!(unit = %actor.id(), round = state.round, "standby");

    let event = BattleEvent::standby(actor, state.round, next.action_count);
    ExecutionOutcome { state: next, event }
}

fn use_skill(
    state: &BattlefieldState,
    actor: &BattleContext,
    skill: &SkillDefinition,
    targets: Vec<UnitId>,
    env: &GameEnv<'_>,
    rng: &mut (impl RngOracle + ?Sized),
) -> ExecutionOutcome {
    let mut scratch = Scratch::new(state);

    let caster = {
        let Some(caster) = scratch.get_mut(actor.id()) else {
            return stand_by(state, actor);
        };
        caster.current_ap = caster.current_ap.saturating_sub(skill.cost.ap);
        caster.current_pp = caster.current_pp.saturating_sub(skill.cost.pp);
        mark_acted(caster);
        caster.last_target = targets.first().cloned();
        caster.clone()
    };

    let effects = EffectContext {
        caster: &caster,
        skill,
        config: env.config(),
    };
    let mut results = SkillResults::default();
    for target_id in &targets {
        let Some(target) = scratch.get_mut(target_id) else {
            continue;
        };
        results.target_results.push(effects.apply(target, rng));
    }

    let dealt: u32 = results.target_results.iter().map(|result| result.total_damage).sum();
    let defeated = results
        .target_results
        .iter()
        .filter(|result| scratch.get(&result.target_id).is_some_and(|ctx| !ctx.is_alive()))
        .count();
    if dealt > 0 || defeated > 0 {
        results.summary = Some(match defeated {
            0 => format!("{dealt} total damage"),
            n => format!("{dealt} total damage, {n} defeated"),
        });
    }

    let mut next = state.with_contexts(scratch.into_contexts());
    next.action_count += 1;
    tracing::debug!(
        unit = %actor.id(),
        skill = %skill.id,
        ?targets,
        damage = dealt,
        "skill executed"
    );

    let event = BattleEvent::skill_use(
        actor,
        skill.id.clone(),
        &skill.name,
        state.round,
        next.action_count,
        targets,
        results,
    );
    ExecutionOutcome { state: next, event }
}
