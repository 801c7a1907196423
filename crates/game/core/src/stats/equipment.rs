//! Equipment bonus resolution.
//!
//! Equipment stat keys are authored freely in content tables, so every key is
//! classified before it contributes:
//!
//! - a stat name (`PATK`, `GuardEff`, ...) adds directly
//! - `Attack` adds to PATK and MATK, `Defense` to PDEF and MDEF, `AllStats` to
//!   every combat stat except HP, AP, PP and GuardEff
//! - `<STAT>%` adds that percentage of the unit's base value (floored)
//! - metadata keys (`Price`, `Rarity`, ...) are ignored
//! - anything else is logged and dropped
//!
//! Classes with the dual-equipment rule combine two pieces sharing a
//! [`DualWieldTag`]: the paired stats take the higher value in full plus half
//! of the lower, and for shields `GuardEff` takes only the higher value.

use core::str::FromStr;
use std::collections::BTreeMap;

use crate::env::{Class, DualWieldTag, EquipmentDefinition, EquipmentId, GameEnv};

use super::{CombatStats, StatKind};

/// Keys that describe an item without affecting stats.
const IGNORED_KEYS: &[&str] = &["Price", "Rarity", "Weight", "Slot", "Tier", "Description"];

/// Classification of one equipment stat key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatKey {
    Direct(StatKind),
    Attack,
    Defense,
    AllStats,
    PercentOfBase(StatKind),
    Ignored,
    Unknown,
}

pub fn parse_stat_key(key: &str) -> StatKey {
    match key {
        "Attack" => return StatKey::Attack,
        "Defense" => return StatKey::Defense,
        "AllStats" => return StatKey::AllStats,
        _ => {}
    }
    if IGNORED_KEYS.contains(&key) {
        return StatKey::Ignored;
    }
    if let Some(stat) = key.strip_suffix('%') {
        return match StatKind::from_str(stat) {
            Ok(stat) => StatKey::PercentOfBase(stat),
            Err(_) => StatKey::Unknown,
        };
    }
    match StatKind::from_str(key) {
        Ok(stat) => StatKey::Direct(stat),
        Err(_) => StatKey::Unknown,
    }
}

/// Bonus granted by a single piece, before any dual-equipment combination.
fn piece_bonus(item: &EquipmentDefinition, base: &CombatStats) -> CombatStats {
    let mut bonus = CombatStats::default();
    for (key, &value) in &item.stats {
        match parse_stat_key(key) {
            StatKey::Direct(stat) => bonus.add(stat, value),
            StatKey::Attack => {
                bonus.add(StatKind::Patk, value);
                bonus.add(StatKind::Matk, value);
            }
            StatKey::Defense => {
                bonus.add(StatKind::Pdef, value);
                bonus.add(StatKind::Mdef, value);
            }
            StatKey::AllStats => {
                // HP, the AP/PP resources and GuardEff stay out of `AllStats`.
                for stat in StatKind::ALL_STATS {
                    bonus.add(stat, value);
                }
            }
            StatKey::PercentOfBase(stat) => {
                bonus.add(stat, (base.get(stat) * value).div_euclid(100));
            }
            StatKey::Ignored => {}
            StatKey::Unknown => {
                tracing::warn!(item = %item.id, key = %key, "unknown equipment stat key; ignoring");
            }
        }
    }
    bonus
}

/// Combines two pieces sharing a dual-wield tag.
fn dual_pair_bonus(tag: DualWieldTag, first: &CombatStats, second: &CombatStats) -> CombatStats {
    let paired: [StatKind; 2] = match tag {
        DualWieldTag::Weapon => [StatKind::Patk, StatKind::Matk],
        DualWieldTag::Shield => [StatKind::Pdef, StatKind::Grd],
    };

    let mut bonus = first.plus(second);
    for stat in paired {
        let high = first.get(stat).max(second.get(stat));
        let low = first.get(stat).min(second.get(stat));
        bonus.set(stat, high + low.div_euclid(2));
    }
    if tag == DualWieldTag::Shield {
        bonus.guard_eff = first.guard_eff.max(second.guard_eff);
    }
    bonus
}

/// Computes the total equipment bonus for a unit.
///
/// Unknown equipment ids are logged and contribute nothing. `base` is needed
/// for percentage keys.
pub fn equipment_bonus(
    equipment: &[EquipmentId],
    class: Class,
    base: &CombatStats,
    env: &GameEnv<'_>,
) -> CombatStats {
    let items: Vec<&EquipmentDefinition> = equipment
        .iter()
        .filter_map(|id| match env.equipment_definition(id) {
            Ok(item) => Some(item),
            Err(err) => {
                tracing::warn!(%err, %class, "equipment ignored");
                None
            }
        })
        .collect();

    let dual_class = env
        .classes()
        .class(class)
        .is_some_and(|definition| definition.dual_equipment);

    let mut total = CombatStats::default();
    if !dual_class {
        for item in &items {
            total = total.plus(&piece_bonus(item, base));
        }
        return total;
    }

    let mut tagged: BTreeMap<u8, (DualWieldTag, Vec<CombatStats>)> = BTreeMap::new();
    for item in &items {
        let bonus = piece_bonus(item, base);
        match item.dual_tag {
            Some(tag) => tagged
                .entry(tag as u8)
                .or_insert_with(|| (tag, Vec::new()))
                .1
                .push(bonus),
            None => total = total.plus(&bonus),
        }
    }

    for (tag, pieces) in tagged.into_values() {
        match pieces.as_slice() {
            [first, second, rest @ ..] => {
                total = total.plus(&dual_pair_bonus(tag, first, second));
                for extra in rest {
                    total = total.plus(extra);
                }
            }
            single => {
                for piece in single {
                    total = total.plus(piece);
                }
            }
        }
    }

    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BattleConfig;
    use crate::env::{ClassDefinition, ClassTier, EquipmentKind, MovementType, TablesSnapshot};

    fn tables() -> TablesSnapshot {
        TablesSnapshot::new()
            .with_class(
                ClassDefinition::new(Class::Swordmaster, ClassTier::Advanced, MovementType::Infantry)
                    .with_dual_equipment(),
            )
            .with_class(
                ClassDefinition::new(Class::Crusader, ClassTier::Advanced, MovementType::Infantry)
                    .with_dual_equipment(),
            )
            .with_class(ClassDefinition::new(
                Class::Fighter,
                ClassTier::Base,
                MovementType::Infantry,
            ))
            .with_equipment(
                EquipmentDefinition::new("katana", "Katana", EquipmentKind::Sword)
                    .with_dual_tag(DualWieldTag::Weapon)
                    .with_stat("PATK", 40)
                    .with_stat("CRT", 10),
            )
            .with_equipment(
                EquipmentDefinition::new("short-sword", "Short Sword", EquipmentKind::Sword)
                    .with_dual_tag(DualWieldTag::Weapon)
                    .with_stat("PATK", 21)
                    .with_stat("ACC", 5),
            )
            .with_equipment(
                EquipmentDefinition::new("kite-shield", "Kite Shield", EquipmentKind::Shield)
                    .with_dual_tag(DualWieldTag::Shield)
                    .with_stat("PDEF", 30)
                    .with_stat("GRD", 20)
                    .with_stat("GuardEff", 15),
            )
            .with_equipment(
                EquipmentDefinition::new("tower-shield", "Tower Shield", EquipmentKind::Shield)
                    .with_dual_tag(DualWieldTag::Shield)
                    .with_stat("PDEF", 50)
                    .with_stat("GRD", 10)
                    .with_stat("GuardEff", 25),
            )
            .with_equipment(
                EquipmentDefinition::new("ring", "Sage Ring", EquipmentKind::Accessory)
                    .with_stat("Attack", 5)
                    .with_stat("PATK%", 10)
                    .with_stat("Price", 900)
                    .with_stat("Luck", 3),
            )
            .with_equipment(
                EquipmentDefinition::new("crown", "Crown", EquipmentKind::Accessory)
                    .with_stat("AllStats", 4),
            )
    }

    #[test]
    fn keys_are_classified() {
        assert_eq!(parse_stat_key("PATK"), StatKey::Direct(StatKind::Patk));
        assert_eq!(parse_stat_key("Defense"), StatKey::Defense);
        assert_eq!(parse_stat_key("MDEF%"), StatKey::PercentOfBase(StatKind::Mdef));
        assert_eq!(parse_stat_key("Rarity"), StatKey::Ignored);
        assert_eq!(parse_stat_key("Luck"), StatKey::Unknown);
        assert_eq!(parse_stat_key("Luck%"), StatKey::Unknown);
    }

    #[test]
    fn combinators_percentages_and_unknown_keys() {
        let tables = tables();
        let config = BattleConfig::default();
        let env = GameEnv::from_tables(&tables, &config);
        let base = CombatStats::default().with(StatKind::Patk, 55);

        let bonus = equipment_bonus(&[EquipmentId::new("ring")], Class::Fighter, &base, &env);

        // Attack +5 to PATK and MATK, PATK% 10 of 55 floored = 5
        assert_eq!(bonus.patk, 10);
        assert_eq!(bonus.matk, 5);
        assert_eq!(bonus.hp, 0);
    }

    #[test]
    fn all_stats_skips_hp_resources_and_guard_eff() {
        let tables = tables();
        let config = BattleConfig::default();
        let env = GameEnv::from_tables(&tables, &config);

        let bonus = equipment_bonus(
            &[EquipmentId::new("crown")],
            Class::Fighter,
            &CombatStats::default(),
            &env,
        );

        for stat in StatKind::ALL_STATS {
            assert_eq!(bonus.get(stat), 4, "{stat}");
        }
        assert_eq!(bonus.hp, 0);
        assert_eq!(bonus.ap, 0);
        assert_eq!(bonus.pp, 0);
        assert_eq!(bonus.guard_eff, 0);
    }

    #[test]
    fn dual_weapons_take_full_high_and_half_low() {
        let tables = tables();
        let config = BattleConfig::default();
        let env = GameEnv::from_tables(&tables, &config);
        let equipment = [EquipmentId::new("katana"), EquipmentId::new("short-sword")];

        let bonus = equipment_bonus(&equipment, Class::Swordmaster, &CombatStats::default(), &env);

        assert_eq!(bonus.patk, 40 + 10);
        assert_eq!(bonus.crt, 10);
        assert_eq!(bonus.acc, 5);
    }

    #[test]
    fn dual_shields_take_highest_guard_eff() {
        let tables = tables();
        let config = BattleConfig::default();
        let env = GameEnv::from_tables(&tables, &config);
        let equipment = [EquipmentId::new("kite-shield"), EquipmentId::new("tower-shield")];

        let bonus = equipment_bonus(&equipment, Class::Crusader, &CombatStats::default(), &env);

        assert_eq!(bonus.pdef, 50 + 15);
        assert_eq!(bonus.grd, 20 + 5);
        assert_eq!(bonus.guard_eff, 25);
    }

    #[test]
    fn non_dual_class_sums_everything() {
        let tables = tables();
        let config = BattleConfig::default();
        let env = GameEnv::from_tables(&tables, &config);
        let equipment = [EquipmentId::new("katana"), EquipmentId::new("short-sword")];

        let bonus = equipment_bonus(&equipment, Class::Fighter, &CombatStats::default(), &env);

        assert_eq!(bonus.patk, 61);
    }

    #[test]
    fn unknown_equipment_contributes_nothing() {
        let tables = tables();
        let config = BattleConfig::default();
        let env = GameEnv::from_tables(&tables, &config);

        let bonus = equipment_bonus(
            &[EquipmentId::new("missing")],
            Class::Fighter,
            &CombatStats::default(),
            &env,
        );
        assert_eq!(bonus, CombatStats::default());
    }
}
