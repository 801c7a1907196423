//! Reference driver for battles built from `battle-core` rules.
//!
//! The core exposes pure operations; this crate sequences them. A
//! [`BattleSimulation`] owns the content tables, the seeded generator and the
//! current [`battle_core::BattlefieldState`], and advances the battle one unit
//! action or one round rollover per [`BattleSimulation::step`], collecting the
//! [`battle_core::BattleEvent`] stream along the way.
//!
//! Modules are organized by responsibility:
//! - [`simulation`] hosts the battle loop
//! - [`error`] surfaces setup and execution failures
pub mod error;
pub mod simulation;

pub use error::{Result, RuntimeError};
pub use simulation::{BattleSimulation, StepOutcome};
