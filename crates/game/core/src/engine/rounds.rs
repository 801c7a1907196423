//! Round rollover and queue consumption.

use std::sync::Arc;

use crate::state::{BattlefieldState, UnitId, UnitQueue};

/// Starts the next round.
///
/// Increments the round counter, clears `has_acted_this_round`, and refills
/// the queue from the battle's initial order, dropping fallen units. Contexts
/// whose flag was already clear keep their `Arc`.
pub fn start_round(state: &BattlefieldState) -> BattlefieldState {
    let mut next = state.clone();
    next.round += 1;

    for ctx in next.units.values_mut() {
        if ctx.has_acted_this_round {
            Arc::make_mut(ctx).has_acted_this_round = false;
        }
    }

    next.turn_queue = state
        .initial_order
        .iter()
        .filter(|id| state.unit(id).is_some_and(|ctx| ctx.is_alive()))
        .cloned()
        .collect::<UnitQueue>();

    tracing::debug!(round = next.round, queue = next.turn_queue.len(), "round started");
    next
}

/// Pops the next unit able to act.
///
/// Queue entries that cannot act (fallen, out of AP, or restricted) are
/// consumed along the way. Returns `None` when the round is exhausted.
pub fn next_actor(state: &BattlefieldState) -> Option<(UnitId, BattlefieldState)> {
    let mut queue = state.turn_queue.clone();
    while !queue.is_empty() {
        let id = queue.remove(0);
        if state.unit(&id).is_some_and(|ctx| ctx.can_act()) {
            let next = BattlefieldState {
                turn_queue: queue,
                ..state.clone()
            };
            return Some((id, next));
        }
        tracing::trace!(unit = %id, "skipping unit that cannot act");
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Position, Team};
    use crate::testing::{battlefield, context, stats};

    #[test]
    fn next_actor_skips_units_without_ap() {
        let mut tired = context("tired", Team::Player, Position::front(0), stats().init(90));
        tired.current_ap = 0;
        let state = battlefield(vec![
            tired,
            context("ready", Team::Enemy, Position::front(0), stats().init(50)),
        ]);

        let (actor, next) = next_actor(&state).expect("one unit can act");
        assert_eq!(actor.as_str(), "ready");
        assert!(next.turn_queue.is_empty());
        assert!(next_actor(&next).is_none());
    }

    #[test]
    fn start_round_refills_queue_without_fallen_units() {
        let state = battlefield(vec![
            context("p1", Team::Player, Position::front(0), stats().init(60)),
            context("p2", Team::Player, Position::front(1), stats().init(40)),
            context("e1", Team::Enemy, Position::front(0), stats().init(50)),
        ]);
        let mut fallen = state.unit(&UnitId::from("p2")).unwrap().clone();
        fallen.current_hp = 0;
        let mut acted = state.unit(&UnitId::from("p1")).unwrap().clone();
        acted.has_acted_this_round = true;
        let mid = state.with_contexts([fallen, acted]);

        let next = start_round(&mid);

        assert_eq!(next.round, 2);
        let queue: Vec<&str> = next.turn_queue.iter().map(UnitId::as_str).collect();
        assert_eq!(queue, ["p1", "e1"]);
        assert!(!next.unit(&UnitId::from("p1")).unwrap().has_acted_this_round);
        let e1 = UnitId::from("e1");
        assert!(Arc::ptr_eq(mid.context_arc(&e1).unwrap(), next.context_arc(&e1).unwrap()));
    }
}
