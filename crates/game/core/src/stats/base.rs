//! Base stats from the level table and growth corrections.

use crate::env::{Class, ClassTier, GameEnv, GrowthDefinition, GrowthType};

use super::{CombatStats, StatKind};

/// Computes a unit's base stats.
///
/// # Formula
///
/// ```text
/// A = (growth1.multiplier + growth2.multiplier) / 2     (percent)
/// B = (growth1.addend + growth2.addend) / 2
/// stat = round(row × A / 100 + B), never below 0
/// AP = PP = 1 for base-tier classes, 2 for advanced-tier classes
/// ```
///
/// Missing table entries are logged and treated as neutral: an absent level
/// row yields zero stats, an absent growth uses 100% / +0, an absent class is
/// treated as base tier.
pub fn base_stats(level: u8, class: Class, growths: [GrowthType; 2], env: &GameEnv<'_>) -> CombatStats {
    let row = match env.level_row(level) {
        Ok(row) => *row,
        Err(err) => {
            tracing::warn!(%err, %class, "using zero stats");
            CombatStats::default()
        }
    };

    let corrections = growths.map(|growth| match env.growth_definition(growth) {
        Ok(definition) => definition.clone(),
        Err(err) => {
            tracing::warn!(%err, "applying neutral correction");
            GrowthDefinition::neutral(growth)
        }
    });

    let mut stats = CombatStats::default();
    for stat in StatKind::GROWTH_STATS {
        let multiplier =
            f64::from(corrections[0].multiplier.get(stat) + corrections[1].multiplier.get(stat)) / 2.0;
        let addend =
            f64::from(corrections[0].addend.get(stat) + corrections[1].addend.get(stat)) / 2.0;
        let value = (f64::from(row.get(stat)) * multiplier / 100.0 + addend).round() as i32;
        stats.set(stat, value.max(0));
    }

    let tier = match env.class_definition(class) {
        Ok(definition) => definition.tier,
        Err(err) => {
            tracing::warn!(%err, "treating class as base tier");
            ClassTier::Base
        }
    };
    stats.ap = tier.base_resource();
    stats.pp = tier.base_resource();

    stats
}
