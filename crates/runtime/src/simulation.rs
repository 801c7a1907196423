//! Battle loop.
//!
//! [`BattleSimulation`] sequences the core operations: pop the next actor,
//! select a skill from its slots, execute it, and roll the round over when the
//! queue runs dry. Termination follows
//! [`BattlefieldState::can_continue`](battle_core::BattlefieldState::can_continue).

use battle_content::BattleSetup;
use battle_core::{
    BattleConfig, BattleEvent, BattleOutcome, BattlePhase, BattlefieldState, Deployment, GameEnv,
    PcgRng, TablesSnapshot, create_all_battle_contexts, create_initial_battlefield_state,
    execute_skill, next_actor, select_active_skill, start_round,
};

use crate::error::{Result, RuntimeError};

/// Seed used when neither the caller nor the setup provides one.
pub const DEFAULT_SEED: &str = "battle";

/// What one [`BattleSimulation::step`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// One unit resolved an action (a skill or Standby).
    Acted,
    /// The queue was empty and a new round began.
    RoundStarted(u32),
    /// The battle is over.
    Finished(BattleOutcome),
}

/// A battle in progress.
pub struct BattleSimulation {
    tables: TablesSnapshot,
    config: BattleConfig,
    state: BattlefieldState,
    rng: PcgRng,
    events: Vec<BattleEvent>,
}

impl BattleSimulation {
    /// Builds contexts for both teams and the initial battlefield.
    ///
    /// The generator is seeded from `seed` and first consumed by the turn
    /// order computation.
    pub fn new(
        tables: TablesSnapshot,
        config: BattleConfig,
        player: &[Deployment],
        enemy: &[Deployment],
        seed: &str,
        is_night: bool,
    ) -> Result<Self> {
        let mut rng = PcgRng::from_seed_str(seed);
        let env = GameEnv::from_tables(&tables, &config);
        let contexts = create_all_battle_contexts(player, enemy, &env);
        let state = create_initial_battlefield_state(contexts, seed, is_night, &mut rng)
            .map_err(RuntimeError::InitialState)?;

        tracing::info!(
            %seed,
            is_night,
            player = player.len(),
            enemy = enemy.len(),
            "battle initialized"
        );

        Ok(Self {
            tables,
            config,
            events: vec![BattleEvent::round_start(state.round)],
            state,
            rng,
        })
    }

    /// Builds a battle from a loaded setup. `seed` overrides the setup's own.
    pub fn from_setup(
        tables: TablesSnapshot,
        config: BattleConfig,
        setup: &BattleSetup,
        seed: Option<&str>,
    ) -> Result<Self> {
        let seed = seed
            .or(setup.seed.as_deref())
            .unwrap_or(DEFAULT_SEED)
            .to_owned();
        Self::new(tables, config, &setup.player, &setup.enemy, &seed, setup.is_night)
    }

    pub fn state(&self) -> &BattlefieldState {
        &self.state
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    /// Events emitted so far, oldest first.
    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<BattleEvent> {
        self.events
    }

    pub fn outcome(&self) -> Option<BattleOutcome> {
        match self.state.phase {
            BattlePhase::Ended(outcome) => Some(outcome),
            BattlePhase::Combat => None,
        }
    }

    /// Advances the battle by one action or one round rollover.
    ///
    /// Once the battle has ended, every further call returns
    /// [`StepOutcome::Finished`] without emitting events.
    pub fn step(&mut self) -> Result<StepOutcome> {
        if let BattlePhase::Ended(outcome) = self.state.phase {
            return Ok(StepOutcome::Finished(outcome));
        }
        if let Some(outcome) = self.state.outcome(&self.config) {
            return Ok(self.finish(outcome));
        }

        let Some((actor, state)) = next_actor(&self.state) else {
            return Ok(self.roll_over());
        };

        let env = GameEnv::from_tables(&self.tables, &self.config);

        let choice = select_active_skill(&actor, &state, &env, &mut self.rng);
        let executed = execute_skill(&state, &actor, &choice, &env, &mut self.rng)?;
        tracing::debug!(
            unit = %actor,
            round = executed.state.round,
            action = executed.state.action_count,
            event = %executed.event.description,
            "action resolved"
        );

        self.state = executed.state;
        self.events.push(executed.event);
        Ok(StepOutcome::Acted)
    }

    /// Steps until the battle ends and returns its outcome.
    pub fn run_to_completion(&mut self) -> Result<BattleOutcome> {
        loop {
            if let StepOutcome::Finished(outcome) = self.step()? {
                return Ok(outcome);
            }
        }
    }

    fn roll_over(&mut self) -> StepOutcome {
        let next = start_round(&self.state);
        let anyone_can_act = next
            .turn_queue
            .iter()
            .any(|id| next.unit(id).is_some_and(|ctx| ctx.can_act()));
        self.state = next;

        if let Some(outcome) = self.state.outcome(&self.config) {
            return self.finish(outcome);
        }
        if !anyone_can_act {
            tracing::info!(round = self.state.round, "no unit can act; ending in a draw");
            return self.finish(BattleOutcome::Draw);
        }

        self.events.push(BattleEvent::round_start(self.state.round));
        StepOutcome::RoundStarted(self.state.round)
    }

    fn finish(&mut self, outcome: BattleOutcome) -> StepOutcome {
        self.state = self.state.finished(outcome);
        self.events.push(BattleEvent::battle_end(self.state.round, outcome));
        tracing::info!(
            ?outcome,
            round = self.state.round,
            actions = self.state.action_count,
            "battle finished"
        );
        StepOutcome::Finished(outcome)
    }
}
