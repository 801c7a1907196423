//! Final combat stats for a deployed unit.

use crate::config::BattleConfig;
use crate::env::GameEnv;
use crate::state::Unit;

use super::{CombatStats, StatKind, base_stats, equipment_bonus};

/// Resolves a unit's combat stats: base stats plus equipment bonus.
///
/// AP and PP are clamped to `[0, RESOURCE_CAP]`; every other stat is floored
/// at 0.
pub fn resolve_combat_stats(unit: &Unit, env: &GameEnv<'_>) -> CombatStats {
    let base = base_stats(unit.level, unit.class, unit.growths, env);
    let bonus = equipment_bonus(&unit.equipment, unit.class, &base, env);

    let mut stats = base.plus(&bonus);
    for stat in <StatKind as strum::IntoEnumIterator>::iter() {
        let value = stats.get(stat);
        let clamped = match stat {
            StatKind::Ap | StatKind::Pp => value.clamp(0, i32::from(BattleConfig::RESOURCE_CAP)),
            _ => value.max(0),
        };
        stats.set(stat, clamped);
    }

    tracing::debug!(unit = %unit.id, ?stats, "resolved combat stats");
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{
        Class, ClassDefinition, ClassTier, EquipmentDefinition, EquipmentId, EquipmentKind,
        GrowthDefinition, GrowthType, MovementType, TablesSnapshot,
    };

    #[test]
    fn resources_are_capped() {
        let tables = TablesSnapshot::new()
            .with_level(1, CombatStats { hp: 50, patk: 10, ..CombatStats::default() })
            .with_growth(GrowthDefinition::neutral(GrowthType::Balanced))
            .with_class(ClassDefinition::new(Class::Knight, ClassTier::Advanced, MovementType::Cavalry))
            .with_equipment(
                EquipmentDefinition::new("band", "AP Band", EquipmentKind::Accessory)
                    .with_stat("AP", 3)
                    .with_stat("PP", -5)
                    .with_stat("PATK", 7),
            );
        let config = BattleConfig::default();
        let env = GameEnv::from_tables(&tables, &config);

        let unit = Unit::new("k1", "Knight", Class::Knight, 1)
            .with_growths([GrowthType::Balanced, GrowthType::Balanced])
            .with_equipment([EquipmentId::new("band")]);

        let stats = resolve_combat_stats(&unit, &env);
        assert_eq!(stats.ap, 4);
        assert_eq!(stats.pp, 0);
        assert_eq!(stats.patk, 17);
        assert_eq!(stats.hp, 50);
    }
}
