/// Battle configuration constants and tunable parameters.
///
/// Compile-time capacities size the bounded collections used by the state
/// types; the fields are runtime-tunable rules loaded from `config.toml`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleConfig {
    /// Battle ends in a draw once this many rounds have started.
    pub max_rounds: u32,
    /// Battle ends in a draw once this many unit actions have resolved.
    pub max_actions: u32,
    /// Damage multiplier applied on a critical hit, in percent.
    pub crit_multiplier_percent: u32,
    /// Guard damage reduction before equipment `GuardEff`, in percent.
    pub base_guard_reduction: u32,
    /// Upper bound on guard damage reduction, in percent. Never above
    /// [`Self::GUARD_REDUCTION_CEILING`].
    pub max_guard_reduction: u32,
    /// Multiplier for effective matchups, in percent.
    pub effectiveness_percent: u32,
}

impl BattleConfig {
    // ===== compile-time constants used as type parameters =====
    /// Units per team.
    pub const TEAM_SIZE: usize = 6;
    /// Units on the battlefield (both teams).
    pub const MAX_UNITS: usize = 2 * Self::TEAM_SIZE;
    /// Formation rows per team (row 0 = back, row 1 = front).
    pub const ROWS: u8 = 2;
    /// Formation columns per team.
    pub const COLUMNS: u8 = 3;
    /// Upper bound for AP and PP.
    pub const RESOURCE_CAP: u8 = 4;
    /// Tactics attachable to one skill slot.
    pub const MAX_TACTICS: usize = 2;
    /// Buffs (or debuffs) active on one unit.
    pub const MAX_MODIFIERS: usize = 8;
    /// Distinct afflictions on one unit.
    pub const MAX_AFFLICTIONS: usize = 7;
    /// Hard ceiling for guard damage reduction, in percent.
    pub const GUARD_REDUCTION_CEILING: u32 = 75;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MAX_ROUNDS: u32 = 15;
    pub const DEFAULT_MAX_ACTIONS: u32 = 300;
    pub const DEFAULT_CRIT_MULTIPLIER_PERCENT: u32 = 150;
    pub const DEFAULT_BASE_GUARD_REDUCTION: u32 = 25;
    pub const DEFAULT_MAX_GUARD_REDUCTION: u32 = Self::GUARD_REDUCTION_CEILING;
    pub const DEFAULT_EFFECTIVENESS_PERCENT: u32 = 200;

    pub fn new() -> Self {
        Self {
            max_rounds: Self::DEFAULT_MAX_ROUNDS,
            max_actions: Self::DEFAULT_MAX_ACTIONS,
            crit_multiplier_percent: Self::DEFAULT_CRIT_MULTIPLIER_PERCENT,
            base_guard_reduction: Self::DEFAULT_BASE_GUARD_REDUCTION,
            max_guard_reduction: Self::DEFAULT_MAX_GUARD_REDUCTION,
            effectiveness_percent: Self::DEFAULT_EFFECTIVENESS_PERCENT,
        }
    }

    pub fn with_limits(max_rounds: u32, max_actions: u32) -> Self {
        Self {
            max_rounds,
            max_actions,
            ..Self::new()
        }
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}
