//! Battle event records.
//!
//! Events are the only output of the engine besides the new state. With the
//! `serde` feature they serialize as camelCase JSON:
//!
//! ```text
//! { id, type, turn, description, actingUnit?: {id, name, class, team},
//!   targets: [unitId], skillId?, skillResults?: { targetResults: [
//!     { targetId, targetName, hits: [{hit, damage, wasCritical, wasGuarded,
//!       hitChance}], totalDamage } ], summary? } }
//! ```

use crate::combat::DamageResult;
use crate::env::{Class, SkillId};
use crate::state::{BattleContext, BattleOutcome, Team, UnitId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleEventKind {
    RoundStart,
    Standby,
    SkillUse,
    BattleEnd,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActingUnit {
    pub id: UnitId,
    pub name: String,
    pub class: Class,
    pub team: Team,
}

impl From<&BattleContext> for ActingUnit {
    fn from(ctx: &BattleContext) -> Self {
        Self {
            id: ctx.id().clone(),
            name: ctx.name().to_owned(),
            class: ctx.class(),
            team: ctx.team,
        }
    }
}

/// One hit of a damage effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct HitRecord {
    pub hit: bool,
    pub damage: u32,
    pub was_critical: bool,
    pub was_guarded: bool,
    pub hit_chance: u32,
}

impl From<&DamageResult> for HitRecord {
    fn from(result: &DamageResult) -> Self {
        Self {
            hit: result.hit,
            damage: result.damage,
            was_critical: result.was_critical,
            was_guarded: result.was_guarded,
            hit_chance: result.hit_chance,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct TargetResult {
    pub target_id: UnitId,
    pub target_name: String,
    pub hits: Vec<HitRecord>,
    pub total_damage: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SkillResults {
    pub target_results: Vec<TargetResult>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub summary: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct BattleEvent {
    pub id: String,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: BattleEventKind,
    /// Round the event happened in.
    pub turn: u32,
    pub description: String,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub acting_unit: Option<ActingUnit>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub targets: Vec<UnitId>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub skill_id: Option<SkillId>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub skill_results: Option<SkillResults>,
}

impl BattleEvent {
    fn bare(id: String, kind: BattleEventKind, turn: u32, description: String) -> Self {
        Self {
            id,
            kind,
            turn,
            description,
            acting_unit: None,
            targets: Vec::new(),
            skill_id: None,
            skill_results: None,
        }
    }

    pub fn round_start(round: u32) -> Self {
        Self::bare(
            format!("round-{round}"),
            BattleEventKind::RoundStart,
            round,
            format!("Round {round} begins"),
        )
    }

    pub fn battle_end(round: u32, outcome: BattleOutcome) -> Self {
        let description = match outcome {
            BattleOutcome::Victory(team) => format!("{team} team wins"),
            BattleOutcome::Draw => "The battle ends in a draw".to_owned(),
        };
        Self::bare("battle-end".to_owned(), BattleEventKind::BattleEnd, round, description)
    }

    /// `action` is the 1-based battle-wide action number.
    pub fn standby(actor: &BattleContext, round: u32, action: u32) -> Self {
        let mut event = Self::bare(
            format!("action-{action}"),
            BattleEventKind::Standby,
            round,
            format!("{} stands by", actor.name()),
        );
        event.acting_unit = Some(ActingUnit::from(actor));
        event
    }

    pub fn skill_use(
        actor: &BattleContext,
        skill_id: SkillId,
        skill_name: &str,
        round: u32,
        action: u32,
        targets: Vec<UnitId>,
        results: SkillResults,
    ) -> Self {
        let description = format!(
            "{} uses {} on {}",
            actor.name(),
            skill_name,
            results
                .target_results
                .iter()
                .map(|result| result.target_name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
        Self {
            id: format!("action-{action}"),
            kind: BattleEventKind::SkillUse,
            turn: round,
            description,
            acting_unit: Some(ActingUnit::from(actor)),
            targets,
            skill_id: Some(skill_id),
            skill_results: Some(results),
        }
    }
}
