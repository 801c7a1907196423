//! Active skill selection.

use crate::env::{GameEnv, RngOracle, SkillId, SkillType};
use crate::state::{BattlefieldState, UnitId};
use crate::tactics::evaluate_skill_slot_tactics;

/// What a unit does on its turn.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkillChoice {
    Skill {
        skill_id: SkillId,
        targets: Vec<UnitId>,
    },
    Standby,
}

/// Picks the first slot, in slot order, that is affordable and whose tactics
/// produce targets. Falls back to [`SkillChoice::Standby`].
///
/// Empty, passive and unknown slots are skipped. A unit without AP should
/// never be asked to act; if it is, the call is logged and resolves to
/// Standby.
pub fn select_active_skill(
    actor_id: &UnitId,
    state: &BattlefieldState,
    env: &GameEnv<'_>,
    rng: &mut (impl RngOracle + ?Sized),
) -> SkillChoice {
    let Some(actor) = state.unit(actor_id) else {
        tracing::warn!(unit = %actor_id, "unknown unit asked to act; standing by");
        return SkillChoice::Standby;
    };
    if actor.current_ap == 0 {
        tracing::error!(unit = %actor_id, "unit without AP asked to act; standing by");
        return SkillChoice::Standby;
    }

    for slot in actor.unit.ordered_slots() {
        let Some(skill_id) = &slot.skill_id else {
            continue;
        };
        if slot.skill_type != SkillType::Active {
            continue;
        }
        let skill = match env.skill(skill_id) {
            Ok(skill) => skill,
            Err(err) => {
                tracing::warn!(unit = %actor_id, %err, "skipping slot");
                continue;
            }
        };
        if !skill.is_active() {
            continue;
        }
        if skill.cost.ap > actor.current_ap || skill.cost.pp > actor.current_pp {
            tracing::trace!(unit = %actor_id, skill = %skill_id, "cannot afford skill");
            continue;
        }

        let outcome = evaluate_skill_slot_tactics(actor, slot, skill, state, rng);
        if outcome.should_use_skill && !outcome.targets.is_empty() {
            tracing::debug!(unit = %actor_id, skill = %skill_id, targets = ?outcome.targets, "skill selected");
            return SkillChoice::Skill {
                skill_id: skill_id.clone(),
                targets: outcome.targets,
            };
        }
    }

    SkillChoice::Standby
}
