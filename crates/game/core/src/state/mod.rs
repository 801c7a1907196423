//! Authoritative battle state representation.
//!
//! [`BattlefieldState`] is a value: every transition (a unit action, a round
//! rollover) returns a new state. Unit contexts are held in `Arc`s, so a new
//! state shares every context the transition did not touch with its
//! predecessor and callers can detect changes with [`Arc::ptr_eq`].
pub mod error;
pub mod types;

use std::collections::BTreeMap;
use std::sync::Arc;

use arrayvec::ArrayVec;

use crate::config::BattleConfig;
use crate::engine::calculate_turn_order;
use crate::env::RngOracle;

pub use error::InitializationError;
pub use types::{
    Affliction, BattleContext, ContextFlags, Deployment, Formation, Formations, Position, Row,
    SkillSlot, StatModifier, StatusEffects, Team, Unit, UnitId, create_all_battle_contexts,
    create_battle_context,
};

/// Ordered list of unit ids, bounded by the battlefield capacity.
pub type UnitQueue = ArrayVec<UnitId, { BattleConfig::MAX_UNITS }>;

/// How a finished battle ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleOutcome {
    Victory(Team),
    /// Both teams fell, or a round/action limit was reached.
    Draw,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattlePhase {
    #[default]
    Combat,
    Ended(BattleOutcome),
}

/// Canonical snapshot of a battle.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattlefieldState {
    pub units: BTreeMap<UnitId, Arc<BattleContext>>,
    /// Mirrors the positions stored in `units`.
    pub formations: Formations,
    /// Turn order computed once at battle start.
    pub initial_order: UnitQueue,
    /// Units still to act this round, front first.
    pub turn_queue: UnitQueue,
    /// 1-based round counter.
    pub round: u32,
    /// Actions resolved in the whole battle.
    pub action_count: u32,
    /// Seed string the battle's RNG stream was derived from.
    pub seed: String,
    pub is_night: bool,
    pub phase: BattlePhase,
}

impl BattlefieldState {
    pub fn unit(&self, id: &UnitId) -> Option<&BattleContext> {
        self.units.get(id).map(Arc::as_ref)
    }

    pub fn context_arc(&self, id: &UnitId) -> Option<&Arc<BattleContext>> {
        self.units.get(id)
    }

    /// Living units of one team, in id order.
    pub fn living_units(&self, team: Team) -> impl Iterator<Item = &BattleContext> {
        self.units
            .values()
            .map(Arc::as_ref)
            .filter(move |ctx| ctx.team == team && ctx.is_alive())
    }

    pub fn living_count(&self, team: Team) -> usize {
        self.living_units(team).count()
    }

    /// True if any living unit of `team` stands in its front row.
    pub fn front_row_alive(&self, team: Team) -> bool {
        self.living_units(team).any(BattleContext::is_front_row)
    }

    /// New state with `context` replacing the stored context of the same id.
    pub fn with_context(&self, context: BattleContext) -> Self {
        self.with_contexts([context])
    }

    /// New state with several contexts replaced.
    pub fn with_contexts(&self, contexts: impl IntoIterator<Item = BattleContext>) -> Self {
        let mut next = self.clone();
        for context in contexts {
            next.units.insert(context.id().clone(), Arc::new(context));
        }
        next
    }

    /// Team left standing when the other side is wiped out.
    pub fn winner(&self) -> Option<Team> {
        let player = self.living_count(Team::Player) > 0;
        let enemy = self.living_count(Team::Enemy) > 0;
        match (player, enemy) {
            (true, false) => Some(Team::Player),
            (false, true) => Some(Team::Enemy),
            _ => None,
        }
    }

    /// Whether the orchestrator may advance the battle another tick.
    ///
    /// Requires a living unit on each side and neither the round nor the
    /// action limit exceeded.
    pub fn can_continue(&self, config: &BattleConfig) -> bool {
        matches!(self.phase, BattlePhase::Combat)
            && self.living_count(Team::Player) > 0
            && self.living_count(Team::Enemy) > 0
            && self.round <= config.max_rounds
            && self.action_count < config.max_actions
    }

    /// Outcome once the battle can no longer continue.
    pub fn outcome(&self, config: &BattleConfig) -> Option<BattleOutcome> {
        if let BattlePhase::Ended(outcome) = self.phase {
            return Some(outcome);
        }
        if self.can_continue(config) {
            return None;
        }
        Some(match self.winner() {
            Some(team) => BattleOutcome::Victory(team),
            None => BattleOutcome::Draw,
        })
    }

    /// New state marked as ended with `outcome`.
    pub fn finished(&self, outcome: BattleOutcome) -> Self {
        Self {
            phase: BattlePhase::Ended(outcome),
            ..self.clone()
        }
    }
}

/// Builds the battle's first state.
///
/// Validates the formations, computes the turn order once from `rng`, and
/// fills the first round's queue.
///
/// # Errors
///
/// Returns [`InitializationError`] for duplicate ids, positions outside the
/// grid, two units on one slot, oversize teams, or a team without units.
pub fn create_initial_battlefield_state(
    contexts: Vec<BattleContext>,
    seed: impl Into<String>,
    is_night: bool,
    rng: &mut (impl RngOracle + ?Sized),
) -> Result<BattlefieldState, InitializationError> {
    let mut units = BTreeMap::new();
    let mut formations = Formations::default();

    for context in contexts {
        let id = context.id().clone();
        if !context.position.is_valid() {
            return Err(InitializationError::InvalidPosition {
                team: context.team,
                position: context.position,
            });
        }
        if units.contains_key(&id) {
            return Err(InitializationError::DuplicateUnit(id));
        }
        formations
            .team_mut(context.team)
            .place(context.position, id.clone())
            .map_err(|occupant| InitializationError::PositionOccupied {
                team: context.team,
                position: context.position,
                occupant,
                unit: id.clone(),
            })?;
        units.insert(id, Arc::new(context));
    }

    for team in [Team::Player, Team::Enemy] {
        let count = formations.team(team).len();
        if count == 0 {
            return Err(InitializationError::EmptyTeam(team));
        }
        if count > BattleConfig::TEAM_SIZE {
            return Err(InitializationError::TeamTooLarge { team, count });
        }
    }

    let order = calculate_turn_order(units.values().map(Arc::as_ref), rng);
    let initial_order: UnitQueue = order.into_iter().collect();

    let seed = seed.into();
    tracing::debug!(%seed, units = units.len(), ?initial_order, "battlefield initialized");

    Ok(BattlefieldState {
        units,
        formations,
        turn_queue: initial_order.clone(),
        initial_order,
        round: 1,
        action_count: 0,
        seed,
        is_night,
        phase: BattlePhase::Combat,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::PcgRng;
    use crate::testing::{context, stats};

    #[test]
    fn initial_state_mirrors_positions() {
        let contexts = vec![
            context("p1", Team::Player, Position::front(0), stats().init(40)),
            context("p2", Team::Player, Position::back(2), stats().init(30)),
            context("e1", Team::Enemy, Position::front(1), stats().init(35)),
        ];
        let mut rng = PcgRng::from_seed_str("init");
        let state = create_initial_battlefield_state(contexts, "init", false, &mut rng)
            .expect("valid battlefield");

        assert_eq!(state.formations.player.get(Position::back(2)), Some(&UnitId::from("p2")));
        assert_eq!(state.formations.enemy.len(), 1);
        assert_eq!(state.round, 1);
        let order: Vec<&str> = state.turn_queue.iter().map(UnitId::as_str).collect();
        assert_eq!(order, ["p1", "e1", "p2"]);
    }

    #[test]
    fn overlapping_positions_are_rejected() {
        let contexts = vec![
            context("p1", Team::Player, Position::front(0), stats()),
            context("p2", Team::Player, Position::front(0), stats()),
            context("e1", Team::Enemy, Position::front(0), stats()),
        ];
        let mut rng = PcgRng::from_seed(1);
        let err = create_initial_battlefield_state(contexts, "s", false, &mut rng).unwrap_err();
        assert!(matches!(err, InitializationError::PositionOccupied { .. }));
    }

    #[test]
    fn duplicate_ids_and_empty_teams_are_rejected() {
        let mut rng = PcgRng::from_seed(1);
        let duplicate = vec![
            context("p1", Team::Player, Position::front(0), stats()),
            context("p1", Team::Enemy, Position::front(0), stats()),
        ];
        assert_eq!(
            create_initial_battlefield_state(duplicate, "s", false, &mut rng).unwrap_err(),
            InitializationError::DuplicateUnit(UnitId::from("p1"))
        );

        let one_sided = vec![context("p1", Team::Player, Position::front(0), stats())];
        assert_eq!(
            create_initial_battlefield_state(one_sided, "s", false, &mut rng).unwrap_err(),
            InitializationError::EmptyTeam(Team::Enemy)
        );
    }

    #[test]
    fn with_context_keeps_untouched_arcs() {
        let contexts = vec![
            context("p1", Team::Player, Position::front(0), stats()),
            context("e1", Team::Enemy, Position::front(0), stats()),
        ];
        let mut rng = PcgRng::from_seed(3);
        let state = create_initial_battlefield_state(contexts, "s", false, &mut rng).unwrap();

        let mut hurt = state.unit(&UnitId::from("e1")).unwrap().clone();
        hurt.take_damage(10);
        let next = state.with_context(hurt);

        let p1 = UnitId::from("p1");
        let e1 = UnitId::from("e1");
        assert!(Arc::ptr_eq(state.context_arc(&p1).unwrap(), next.context_arc(&p1).unwrap()));
        assert!(!Arc::ptr_eq(state.context_arc(&e1).unwrap(), next.context_arc(&e1).unwrap()));
        assert_eq!(next.unit(&e1).unwrap().current_hp, state.unit(&e1).unwrap().current_hp - 10);
    }

    #[test]
    fn battle_ends_when_a_side_falls() {
        let contexts = vec![
            context("p1", Team::Player, Position::front(0), stats()),
            context("e1", Team::Enemy, Position::front(0), stats()),
        ];
        let mut rng = PcgRng::from_seed(3);
        let state = create_initial_battlefield_state(contexts, "s", false, &mut rng).unwrap();
        let config = BattleConfig::default();
        assert!(state.can_continue(&config));

        let mut dead = state.unit(&UnitId::from("e1")).unwrap().clone();
        dead.current_hp = 0;
        let next = state.with_context(dead);
        assert!(!next.can_continue(&config));
        assert_eq!(next.outcome(&config), Some(BattleOutcome::Victory(Team::Player)));
    }
}
