//! Status fields carried by a battle context.
//!
//! Buffs, debuffs and afflictions are bookkept by the status subsystem; the
//! combat rules only read what they contribute: percentage stat modifiers,
//! affliction tags, and the derived [`ContextFlags`].

use arrayvec::ArrayVec;
use bitflags::bitflags;

use crate::config::BattleConfig;
use crate::stats::StatKind;

/// Negative status condition.
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
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Affliction {
    Poison,
    Burn,
    /// Cannot evade or guard.
    Freeze,
    Blind,
    /// Cannot act.
    Stun,
    PassiveSeal,
    /// Cannot guard.
    GuardSeal,
}

impl Affliction {
    /// Flags implied by the affliction.
    pub const fn flags(self) -> ContextFlags {
        match self {
            Self::Freeze => ContextFlags::CANNOT_EVADE.union(ContextFlags::CANNOT_GUARD),
            Self::Stun => ContextFlags::CANNOT_ACT,
            Self::GuardSeal => ContextFlags::CANNOT_GUARD,
            Self::Poison | Self::Burn | Self::Blind | Self::PassiveSeal => ContextFlags::empty(),
        }
    }
}

bitflags! {
    /// Behaviour restrictions on a unit.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct ContextFlags: u8 {
        const CANNOT_ACT    = 1 << 0;
        const CANNOT_GUARD  = 1 << 1;
        const CANNOT_EVADE  = 1 << 2;
    }
}

/// Percentage modifier on one stat. Positive for buffs, negative for debuffs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatModifier {
    pub stat: StatKind,
    pub percent: i32,
}

impl StatModifier {
    pub const fn new(stat: StatKind, percent: i32) -> Self {
        Self { stat, percent }
    }
}

/// Active modifiers and afflictions of a unit.
///
/// A new modifier on a stat replaces the previous one of the same polarity.
/// When a list is full the oldest entry is dropped.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffects {
    pub buffs: ArrayVec<StatModifier, { BattleConfig::MAX_MODIFIERS }>,
    pub debuffs: ArrayVec<StatModifier, { BattleConfig::MAX_MODIFIERS }>,
    pub afflictions: ArrayVec<Affliction, { BattleConfig::MAX_AFFLICTIONS }>,
}

impl StatusEffects {
    pub fn add_buff(&mut self, modifier: StatModifier) {
        Self::upsert(&mut self.buffs, modifier);
    }

    pub fn add_debuff(&mut self, modifier: StatModifier) {
        Self::upsert(&mut self.debuffs, modifier);
    }

    fn upsert(
        list: &mut ArrayVec<StatModifier, { BattleConfig::MAX_MODIFIERS }>,
        modifier: StatModifier,
    ) {
        list.retain(|existing| existing.stat != modifier.stat);
        if list.is_full() {
            list.remove(0);
        }
        list.push(modifier);
    }

    /// Adds an affliction. Returns false if it was already present.
    pub fn afflict(&mut self, affliction: Affliction) -> bool {
        if self.afflictions.contains(&affliction) {
            return false;
        }
        if self.afflictions.is_full() {
            self.afflictions.remove(0);
        }
        self.afflictions.push(affliction);
        true
    }

    pub fn has_affliction(&self, affliction: Affliction) -> bool {
        self.afflictions.contains(&affliction)
    }

    pub fn is_afflicted(&self) -> bool {
        !self.afflictions.is_empty()
    }

    /// Removes every affliction and debuff.
    pub fn cleanse(&mut self) {
        self.afflictions.clear();
        self.debuffs.clear();
    }

    /// Net modifier percentage on a stat.
    pub fn modifier_percent(&self, stat: StatKind) -> i32 {
        self.buffs
            .iter()
            .chain(self.debuffs.iter())
            .filter(|modifier| modifier.stat == stat)
            .map(|modifier| modifier.percent)
            .sum()
    }

    pub fn affliction_flags(&self) -> ContextFlags {
        self.afflictions
            .iter()
            .fold(ContextFlags::empty(), |flags, affliction| flags | affliction.flags())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modifiers_replace_same_stat() {
        let mut status = StatusEffects::default();
        status.add_buff(StatModifier::new(StatKind::Patk, 20));
        status.add_buff(StatModifier::new(StatKind::Patk, 30));
        status.add_debuff(StatModifier::new(StatKind::Patk, -10));
        assert_eq!(status.buffs.len(), 1);
        assert_eq!(status.modifier_percent(StatKind::Patk), 20);
    }

    #[test]
    fn afflictions_are_unique_and_cleansable() {
        let mut status = StatusEffects::default();
        assert!(status.afflict(Affliction::Freeze));
        assert!(!status.afflict(Affliction::Freeze));
        assert!(status.affliction_flags().contains(ContextFlags::CANNOT_GUARD));
        status.cleanse();
        assert!(!status.is_afflicted());
    }
}
