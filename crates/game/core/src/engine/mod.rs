//! Battle progression: turn order and round bookkeeping.
//!
//! These functions never resolve actions themselves; the orchestrator calls
//! [`next_actor`] to find who acts, hands the actor to
//! [`crate::action::select_active_skill`] and [`crate::action::execute_skill`],
//! and calls [`start_round`] once the queue is empty.

mod rounds;
mod turns;

pub use rounds::{next_actor, start_round};
pub use turns::calculate_turn_order;
