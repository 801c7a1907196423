//! Damage roll results.

/// Intermediate values of one resolved hit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct DamageBreakdown {
    /// Physical sub-damage after crit and guard, 0 without physical potency.
    pub physical: u32,
    /// Magical sub-damage after crit, 0 without magical potency.
    pub magical: u32,
    pub crit_multiplier_percent: u32,
    /// Guard damage reduction applied to the physical component.
    pub guard_reduction_percent: u32,
    pub effectiveness_percent: u32,
}

/// Outcome of one damage roll against one target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct DamageResult {
    pub hit: bool,
    pub damage: u32,
    pub was_critical: bool,
    pub was_guarded: bool,
    pub hit_chance: u32,
    /// `None` on a miss.
    pub breakdown: Option<DamageBreakdown>,
}

impl DamageResult {
    pub const fn miss(hit_chance: u32) -> Self {
        Self {
            hit: false,
            damage: 0,
            was_critical: false,
            was_guarded: false,
            hit_chance,
            breakdown: None,
        }
    }
}

/// Sum of damage over several rolls.
pub fn total_damage(results: &[DamageResult]) -> u32 {
    results.iter().map(|result| result.damage).sum()
}
