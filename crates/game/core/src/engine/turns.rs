//! Turn order.
//!
//! Computed once per battle. Rotation within the battle is queue consumption
//! (see [`super::rounds`]), never a re-sort.

use core::cmp::Ordering;

use crate::env::RngOracle;
use crate::state::{BattleContext, Team, UnitId};
use crate::stats::StatKind;

fn initiative(ctx: &BattleContext) -> i32 {
    ctx.effective_stat(StatKind::Init)
}

/// Deterministic part of the ordering: INIT descending, then board-position
/// priority ascending.
fn initiative_order(a: &BattleContext, b: &BattleContext) -> Ordering {
    initiative(b)
        .cmp(&initiative(a))
        .then_with(|| a.position.priority().cmp(&b.position.priority()))
}

/// Orders living units for the battle.
///
/// # Ordering
///
/// 1. INIT, highest first
/// 2. position priority: front row columns 0, 1, 2 then back row 3, 4, 5
/// 3. units of different teams still tied: one coin flip per tied group;
///    heads puts the player's unit first
/// 4. lexicographic id (only reachable with malformed formations)
///
/// Coin flips are drawn in the order the tied groups appear, so the seed only
/// affects genuinely tied units.
pub fn calculate_turn_order<'a>(
    units: impl IntoIterator<Item = &'a BattleContext>,
    rng: &mut (impl RngOracle + ?Sized),
) -> Vec<UnitId> {
    let mut living: Vec<&BattleContext> = units.into_iter().filter(|ctx| ctx.is_alive()).collect();
    living.sort_by(|a, b| initiative_order(a, b).then_with(|| a.id().cmp(b.id())));

    let mut order = Vec::with_capacity(living.len());
    let mut start = 0;
    while start < living.len() {
        let mut end = start + 1;
        while end < living.len() && initiative_order(living[start], living[end]).is_eq() {
            end += 1;
        }

        let group = &mut living[start..end];
        let mixed_teams = group.iter().any(|ctx| ctx.team != group[0].team);
        if mixed_teams {
            let player_first = rng.coin_flip();
            // Stable: same-team ids keep their lexicographic order.
            group.sort_by_key(|ctx| (ctx.team == Team::Player) != player_first);
            tracing::debug!(
                units = ?group.iter().map(|ctx| ctx.id().as_str()).collect::<Vec<_>>(),
                player_first,
                "turn order tie resolved by coin flip"
            );
        }
        order.extend(group.iter().map(|ctx| ctx.id().clone()));
        start = end;
    }

    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::PcgRng;
    use crate::state::Position;
    use crate::testing::{ScriptedRng, context, stats};

    fn ids(order: &[UnitId]) -> Vec<&str> {
        order.iter().map(UnitId::as_str).collect()
    }

    #[test]
    fn same_team_ties_use_position_priority() {
        let a = context("a", Team::Player, Position::front(0), stats().init(50));
        let b = context("b", Team::Player, Position::front(1), stats().init(50));

        for seed in ["one", "two", "three"] {
            let mut rng = PcgRng::from_seed_str(seed);
            assert_eq!(ids(&calculate_turn_order([&b, &a], &mut rng)), ["a", "b"]);
        }
    }

    #[test]
    fn initiative_dominates_position() {
        let slow = context("slow", Team::Player, Position::front(0), stats().init(10));
        let fast = context("fast", Team::Enemy, Position::back(2), stats().init(90));
        let mut rng = ScriptedRng::new(&[]);
        assert_eq!(ids(&calculate_turn_order([&slow, &fast], &mut rng)), ["fast", "slow"]);
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn cross_team_ties_flip_a_coin() {
        let p = context("p", Team::Player, Position::front(1), stats().init(40));
        let e = context("e", Team::Enemy, Position::front(1), stats().init(40));

        let mut heads = ScriptedRng::new(&[0.1]);
        assert_eq!(ids(&calculate_turn_order([&e, &p], &mut heads)), ["p", "e"]);

        let mut tails = ScriptedRng::new(&[0.9]);
        assert_eq!(ids(&calculate_turn_order([&p, &e], &mut tails)), ["e", "p"]);
    }

    #[test]
    fn seed_only_reorders_tied_units() {
        let lead = context("lead", Team::Enemy, Position::back(0), stats().init(90));
        let p = context("p", Team::Player, Position::front(1), stats().init(50));
        let e = context("e", Team::Enemy, Position::front(1), stats().init(50));
        let tail = context("tail", Team::Player, Position::front(0), stats().init(10));

        let mut tie_orders = std::collections::BTreeSet::new();
        for seed in 0..64 {
            let mut rng = PcgRng::from_seed(seed);
            let order = calculate_turn_order([&tail, &e, &lead, &p], &mut rng);
            let order = ids(&order);
            assert_eq!(order[0], "lead");
            assert_eq!(order[3], "tail");
            tie_orders.insert((order[1].to_owned(), order[2].to_owned()));
        }

        let expected = [("e", "p"), ("p", "e")].map(|(a, b)| (a.to_owned(), b.to_owned()));
        assert_eq!(tie_orders.into_iter().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn dead_units_are_excluded() {
        let alive = context("alive", Team::Player, Position::front(0), stats());
        let mut dead = context("dead", Team::Enemy, Position::front(0), stats().init(99));
        dead.current_hp = 0;
        let mut rng = PcgRng::from_seed(5);
        assert_eq!(ids(&calculate_turn_order([&alive, &dead], &mut rng)), ["alive"]);
    }

    #[test]
    fn deterministic_for_fixed_seed() {
        let units: Vec<BattleContext> = (0..3u8)
            .flat_map(|col| {
                [
                    context(&format!("p{col}"), Team::Player, Position::front(col), stats().init(30)),
                    context(&format!("e{col}"), Team::Enemy, Position::front(col), stats().init(30)),
                ]
            })
            .collect();

        let first = calculate_turn_order(&units, &mut PcgRng::from_seed_str("replay"));
        let second = calculate_turn_order(&units, &mut PcgRng::from_seed_str("replay"));
        assert_eq!(first, second);
        assert_eq!(first.len(), 6);
        // Priority still separates columns regardless of the coin.
        let columns: Vec<char> = first.iter().map(|id| id.as_str().chars().nth(1).unwrap()).collect();
        assert_eq!(columns, ['0', '0', '1', '1', '2', '2']);
    }
}
