//! Stat Resolver.
//!
//! A unit's combat stats are fixed once, when its battle context is created:
//!
//! ```text
//! [ universal level row ]
//!      ↓  × averaged growth multiplier (A), + averaged growth addend (B)
//! [ base stats ]          AP/PP = 1 (base tier) or 2 (advanced tier)
//!      ↓  + equipment bonus (direct, combinators, % of base, dual rule)
//! [ combat stats ]        AP/PP clamped to [0, 4], everything else ≥ 0
//! ```
//!
//! Buffs and debuffs never rewrite combat stats; they are layered on top by
//! [`crate::state::BattleContext::effective_stat`].

pub mod base;
pub mod equipment;
pub mod resolver;

pub use base::base_stats;
pub use equipment::{StatKey, equipment_bonus, parse_stat_key};
pub use resolver::resolve_combat_stats;

/// Stat identifiers, named as they appear in content tables.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::EnumCount,
)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum StatKind {
    Hp,
    Ap,
    Pp,
    Patk,
    Pdef,
    Matk,
    Mdef,
    Acc,
    Eva,
    Crt,
    Grd,
    Init,
    #[strum(serialize = "GuardEff")]
    #[cfg_attr(feature = "serde", serde(rename = "GuardEff"))]
    GuardEff,
}

impl StatKind {
    /// Stats scaled by the level table and growth corrections.
    pub const GROWTH_STATS: [StatKind; 10] = [
        Self::Hp,
        Self::Patk,
        Self::Pdef,
        Self::Matk,
        Self::Mdef,
        Self::Acc,
        Self::Eva,
        Self::Crt,
        Self::Grd,
        Self::Init,
    ];

    /// Stats raised by the `AllStats` equipment key.
    pub const ALL_STATS: [StatKind; 9] = [
        Self::Patk,
        Self::Pdef,
        Self::Matk,
        Self::Mdef,
        Self::Acc,
        Self::Eva,
        Self::Crt,
        Self::Grd,
        Self::Init,
    ];
}

/// Flat stat block. Used for level rows, growth corrections, equipment
/// bonuses and resolved combat stats alike.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatStats {
    pub hp: i32,
    pub ap: i32,
    pub pp: i32,
    pub patk: i32,
    pub pdef: i32,
    pub matk: i32,
    pub mdef: i32,
    pub acc: i32,
    pub eva: i32,
    pub crt: i32,
    pub grd: i32,
    pub init: i32,
    pub guard_eff: i32,
}

impl CombatStats {
    /// Every stat set to `value`.
    pub const fn splat(value: i32) -> Self {
        Self {
            hp: value,
            ap: value,
            pp: value,
            patk: value,
            pdef: value,
            matk: value,
            mdef: value,
            acc: value,
            eva: value,
            crt: value,
            grd: value,
            init: value,
            guard_eff: value,
        }
    }

    pub const fn get(&self, stat: StatKind) -> i32 {
        match stat {
            StatKind::Hp => self.hp,
            StatKind::Ap => self.ap,
            StatKind::Pp => self.pp,
            StatKind::Patk => self.patk,
            StatKind::Pdef => self.pdef,
            StatKind::Matk => self.matk,
            StatKind::Mdef => self.mdef,
            StatKind::Acc => self.acc,
            StatKind::Eva => self.eva,
            StatKind::Crt => self.crt,
            StatKind::Grd => self.grd,
            StatKind::Init => self.init,
            StatKind::GuardEff => self.guard_eff,
        }
    }

    pub fn get_mut(&mut self, stat: StatKind) -> &mut i32 {
        match stat {
            StatKind::Hp => &mut self.hp,
            StatKind::Ap => &mut self.ap,
            StatKind::Pp => &mut self.pp,
            StatKind::Patk => &mut self.patk,
            StatKind::Pdef => &mut self.pdef,
            StatKind::Matk => &mut self.matk,
            StatKind::Mdef => &mut self.mdef,
            StatKind::Acc => &mut self.acc,
            StatKind::Eva => &mut self.eva,
            StatKind::Crt => &mut self.crt,
            StatKind::Grd => &mut self.grd,
            StatKind::Init => &mut self.init,
            StatKind::GuardEff => &mut self.guard_eff,
        }
    }

    pub fn set(&mut self, stat: StatKind, value: i32) {
        *self.get_mut(stat) = value;
    }

    pub fn add(&mut self, stat: StatKind, value: i32) {
        *self.get_mut(stat) += value;
    }

    pub fn with(mut self, stat: StatKind, value: i32) -> Self {
        self.set(stat, value);
        self
    }

    /// Component-wise sum.
    pub fn plus(&self, other: &CombatStats) -> CombatStats {
        let mut sum = *self;
        for stat in <StatKind as strum::IntoEnumIterator>::iter() {
            sum.add(stat, other.get(stat));
        }
        sum
    }
}
