//! Damage calculation.
//!
//! One damage roll consumes draws in a fixed order: hit, then crit (skipped
//! when `TrueCritical` forces it), then guard (skipped when the effect has no
//! physical component, is unguardable, or the target cannot guard). A miss
//! returns before any further draw.

use crate::config::BattleConfig;
use crate::env::{CombatantType, DamageEffect, RngOracle, SkillFlags};
use crate::state::BattleContext;
use crate::stats::StatKind;

use super::hit::{calculate_hit_chance, crit_chance, guard_reduction_percent, roll_check};
use super::result::{DamageBreakdown, DamageResult};

/// Effectiveness multiplier for an attacker/target pair, in percent.
///
/// Effective matchups (doubled by default):
/// - Gryphon/Wyvern Knight/Master against a Cavalry target
/// - a Cavalry attacker against an Infantry target
/// - an Archer-trait attacker against a Flying target
pub fn effectiveness_percent(
    attacker: &BattleContext,
    target: &BattleContext,
    config: &BattleConfig,
) -> u32 {
    let sky_knight_vs_cavalry =
        attacker.class().is_sky_knight() && target.has_type(CombatantType::Cavalry);
    let cavalry_vs_infantry =
        attacker.has_type(CombatantType::Cavalry) && target.has_type(CombatantType::Infantry);
    let archer_vs_flying =
        attacker.has_type(CombatantType::Archer) && target.has_type(CombatantType::Flying);

    if sky_knight_vs_cavalry || cavalry_vs_infantry || archer_vs_flying {
        config.effectiveness_percent
    } else {
        100
    }
}

/// One damage component.
///
/// ```text
/// component = max(1, round((ATK − DEF) × potency / 100 × crit × guard))
/// ```
fn component_damage(attack: i32, defense: i32, potency: u32, crit_percent: u32, guard_percent: u32) -> u32 {
    let raw = f64::from(attack - defense) * f64::from(potency) / 100.0
        * (f64::from(crit_percent) / 100.0)
        * (f64::from(guard_percent) / 100.0);
    (raw.round() as i64).max(1) as u32
}

/// Resolves one damage roll of `effect` from `attacker` against `target`.
///
/// # Formula
///
/// ```text
/// hit_chance = see calculate_hit_chance
/// hit        = roll < hit_chance
/// crit       = TrueCritical or roll < clamp(CRT, 0, 100)        → ×1.5
/// guard      = physical, guardable, and roll < target GRD       → ×(100 − reduction)/100
/// physical   = max(1, round((PATK − PDEF) × pot.physical/100 × crit × guard))
/// magical    = max(1, round((MATK − MDEF) × pot.magical/100 × crit))
/// damage     = max(1, round((physical + magical) × effectiveness))
/// ```
///
/// Stats are the contexts' effective stats (buffs and debuffs applied).
pub fn calculate_skill_damage(
    attacker: &BattleContext,
    target: &BattleContext,
    effect: &DamageEffect,
    flags: SkillFlags,
    config: &BattleConfig,
    rng: &mut (impl RngOracle + ?Sized),
) -> DamageResult {
    let hit_chance = calculate_hit_chance(
        attacker.effective_stat(StatKind::Acc),
        target.effective_stat(StatKind::Eva),
        effect.hit_rate,
        flags,
    );

    if !roll_check(hit_chance, rng) {
        return DamageResult::miss(hit_chance);
    }

    let was_critical = flags.contains(SkillFlags::TRUE_CRITICAL)
        || roll_check(crit_chance(attacker.effective_stat(StatKind::Crt)), rng);
    let crit_percent = if was_critical {
        config.crit_multiplier_percent
    } else {
        100
    };

    let potency = effect.potency;
    let guardable = potency.has_physical()
        && !flags.contains(SkillFlags::UNGUARDABLE)
        && target.can_guard();
    let was_guarded = guardable
        && roll_check(crit_chance(target.effective_stat(StatKind::Grd)), rng);
    let guard_reduction = if was_guarded {
        guard_reduction_percent(target.equipment_guard_eff(), config)
    } else {
        0
    };

    let physical = if potency.has_physical() {
        component_damage(
            attacker.effective_stat(StatKind::Patk),
            target.effective_stat(StatKind::Pdef),
            potency.physical_value(),
            crit_percent,
            100 - guard_reduction,
        )
    } else {
        0
    };
    let magical = if potency.has_magical() {
        component_damage(
            attacker.effective_stat(StatKind::Matk),
            target.effective_stat(StatKind::Mdef),
            potency.magical_value(),
            crit_percent,
            100,
        )
    } else {
        0
    };

    let effectiveness = effectiveness_percent(attacker, target, config);
    let damage =
        ((f64::from(physical + magical) * f64::from(effectiveness) / 100.0).round() as u32).max(1);

    DamageResult {
        hit: true,
        damage,
        was_critical,
        was_guarded,
        hit_chance,
        breakdown: Some(DamageBreakdown {
            physical,
            magical,
            crit_multiplier_percent: crit_percent,
            guard_reduction_percent: guard_reduction,
            effectiveness_percent: effectiveness,
        }),
    }
}

/// Repeats [`calculate_skill_damage`] `hit_count` times, each roll independent.
///
/// A `hit_count` of 0 is treated as a single hit.
pub fn calculate_multi_hit_damage(
    attacker: &BattleContext,
    target: &BattleContext,
    effect: &DamageEffect,
    flags: SkillFlags,
    config: &BattleConfig,
    rng: &mut (impl RngOracle + ?Sized),
) -> Vec<DamageResult> {
    (0..effect.hit_count.max(1))
        .map(|_| calculate_skill_damage(attacker, target, effect, flags, config, rng))
        .collect()
}
