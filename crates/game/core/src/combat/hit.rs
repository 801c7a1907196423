//! Hit, critical and guard checks.

use crate::config::BattleConfig;
use crate::env::{HitRate, RngOracle, SkillFlags};

/// Calculate hit chance from accuracy, evasion and the effect's hit rate.
///
/// # Formula
///
/// ```text
/// hit_chance = 100                                  if hit rate is True or TrueStrike
/// hit_chance = clamp((100 + ACC − EVA) × rate / 100, 0, 100)   otherwise
/// ```
///
/// Integer arithmetic; the division truncates toward zero before clamping.
pub fn calculate_hit_chance(accuracy: i32, evasion: i32, hit_rate: HitRate, flags: SkillFlags) -> u32 {
    if flags.contains(SkillFlags::TRUE_STRIKE) {
        return 100;
    }
    match hit_rate {
        HitRate::True => 100,
        HitRate::Percent(rate) => {
            let rate = i64::from(rate);
            let chance = (100 + i64::from(accuracy) - i64::from(evasion)) * rate / 100;
            chance.clamp(0, 100) as u32
        }
    }
}

/// Draws one percentage roll and compares `roll < chance`.
pub fn roll_check(chance: u32, rng: &mut (impl RngOracle + ?Sized)) -> bool {
    rng.roll_percent() < f64::from(chance)
}

/// Critical chance: CRT clamped to `[0, 100]`.
pub fn crit_chance(crt: i32) -> u32 {
    crt.clamp(0, 100) as u32
}

/// Guard damage reduction in percent.
///
/// ```text
/// reduction = min(base + GuardEff, max, 75)    (25 and 75 by default)
/// ```
pub fn guard_reduction_percent(guard_eff: i32, config: &BattleConfig) -> u32 {
    let cap = config
        .max_guard_reduction
        .min(BattleConfig::GUARD_REDUCTION_CEILING);
    config
        .base_guard_reduction
        .saturating_add(guard_eff.max(0) as u32)
        .min(cap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedRng;

    #[test]
    fn hit_chance_clamps_to_hundred() {
        // (100 + 80 - 20) * 100 / 100 = 160
        assert_eq!(calculate_hit_chance(80, 20, HitRate::Percent(100), SkillFlags::empty()), 100);
    }

    #[test]
    fn hit_chance_clamps_to_zero() {
        assert_eq!(calculate_hit_chance(0, 250, HitRate::Percent(100), SkillFlags::empty()), 0);
    }

    #[test]
    fn hit_chance_scales_with_rate() {
        // (100 + 30 - 50) * 75 / 100 = 60
        assert_eq!(calculate_hit_chance(30, 50, HitRate::Percent(75), SkillFlags::empty()), 60);
    }

    #[test]
    fn true_hits_are_certain() {
        assert_eq!(calculate_hit_chance(0, 500, HitRate::True, SkillFlags::empty()), 100);
        assert_eq!(
            calculate_hit_chance(0, 500, HitRate::Percent(10), SkillFlags::TRUE_STRIKE),
            100
        );
    }

    #[test]
    fn guard_reduction_is_capped() {
        let config = BattleConfig::default();
        assert_eq!(guard_reduction_percent(0, &config), 25);
        assert_eq!(guard_reduction_percent(20, &config), 45);
        assert_eq!(guard_reduction_percent(400, &config), 75);
        assert_eq!(guard_reduction_percent(-30, &config), 25);
    }

    #[test]
    fn oversized_guard_cap_still_stops_at_ceiling() {
        let config = BattleConfig {
            max_guard_reduction: 120,
            ..BattleConfig::default()
        };
        assert_eq!(guard_reduction_percent(90, &config), 75);
        assert_eq!(guard_reduction_percent(i32::MAX, &config), 75);
    }

    #[test]
    fn roll_check_is_strict() {
        let mut rng = ScriptedRng::new(&[0.5, 0.5]);
        assert!(!roll_check(50, &mut rng));
        assert!(roll_check(51, &mut rng));
    }
}
