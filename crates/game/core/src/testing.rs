//! Shared fixtures for unit tests.

use std::sync::Arc;

use crate::env::{Class, CombatantType, PcgRng, RngOracle};
use crate::state::{
    BattleContext, BattlefieldState, Position, Team, Unit, create_initial_battlefield_state,
};
use crate::stats::CombatStats;

/// Combat stats builder with neutral defaults: no accuracy, evasion, crit or
/// guard, so damage tests only draw what they script.
#[derive(Clone, Copy, Debug)]
pub struct StatsBuilder(CombatStats);

pub fn stats() -> StatsBuilder {
    StatsBuilder(CombatStats {
        hp: 100,
        ap: 2,
        pp: 1,
        patk: 50,
        pdef: 30,
        matk: 40,
        mdef: 20,
        acc: 0,
        eva: 0,
        crt: 0,
        grd: 0,
        init: 10,
        guard_eff: 0,
    })
}

macro_rules! setters {
    ($($field:ident),* $(,)?) => {
        impl StatsBuilder {
            $(
                pub fn $field(mut self, value: i32) -> Self {
                    self.0.$field = value;
                    self
                }
            )*
        }
    };
}

setters!(hp, ap, pp, patk, pdef, matk, mdef, acc, eva, crt, grd, init, guard_eff);

impl From<StatsBuilder> for CombatStats {
    fn from(builder: StatsBuilder) -> Self {
        builder.0
    }
}

/// Infantry fighter context.
pub fn context(
    id: impl Into<String>,
    team: Team,
    position: Position,
    stats: impl Into<CombatStats>,
) -> BattleContext {
    context_with(id, team, position, stats, Class::Fighter, &[CombatantType::Infantry])
}

pub fn context_with(
    id: impl Into<String>,
    team: Team,
    position: Position,
    stats: impl Into<CombatStats>,
    class: Class,
    types: &[CombatantType],
) -> BattleContext {
    let id = id.into();
    let unit = Unit::new(id.clone(), id, class, 1);
    BattleContext::new(Arc::new(unit), team, position, stats.into(), types.to_vec())
}

/// Battlefield built from ready contexts with a fixed seed.
pub fn battlefield(contexts: Vec<BattleContext>) -> BattlefieldState {
    let mut rng = PcgRng::from_seed_str("test");
    match create_initial_battlefield_state(contexts, "test", false, &mut rng) {
        Ok(state) => state,
        Err(err) => panic!("invalid test battlefield: {err}"),
    }
}

/// RNG replaying scripted unit-interval values. Returns 0.0 once exhausted.
#[derive(Clone, Debug, Default)]
pub struct ScriptedRng {
    values: Vec<f64>,
    cursor: usize,
}

impl ScriptedRng {
    pub fn new(values: &[f64]) -> Self {
        Self {
            values: values.to_vec(),
            cursor: 0,
        }
    }

    /// Number of values drawn so far, including draws past the script.
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RngOracle for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        let value = self.values.get(self.cursor).copied().unwrap_or(0.0);
        self.cursor += 1;
        (value * 4_294_967_296.0) as u32
    }
}
