//! Target patterns.
//!
//! `Single` picks the primary target. Without a pinned order it prefers the
//! front row, then the smallest Manhattan distance from the actor, then a
//! uniform random choice among equidistant candidates (no draw when only one
//! remains). With a pinned order the first pool entry wins.

use crate::env::{RngOracle, TargetPattern};
use crate::state::{BattleContext, Position, UnitId};

/// Whether the candidate order has been decided by tactics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TargetOrder {
    /// No sort tactic: default front-row/distance/random picking.
    Default,
    /// Pool order is authoritative: picks take the first remaining entry.
    Pinned,
}

fn distance(actor: &BattleContext, target: &BattleContext) -> u32 {
    Position::distance(actor.team, actor.position, target.team, target.position)
}

/// Closest candidate to `actor`, optionally preferring the front row.
pub fn closest<'s>(
    actor: &BattleContext,
    candidates: &[&'s BattleContext],
    prefer_front: bool,
    rng: &mut (impl RngOracle + ?Sized),
) -> Option<&'s BattleContext> {
    let front: Vec<&BattleContext> = candidates
        .iter()
        .copied()
        .filter(|ctx| ctx.is_front_row())
        .collect();
    let tier: &[&BattleContext] = if prefer_front && !front.is_empty() {
        &front
    } else {
        candidates
    };

    let best = tier.iter().map(|ctx| distance(actor, ctx)).min()?;
    let nearest: Vec<&BattleContext> = tier
        .iter()
        .copied()
        .filter(|ctx| distance(actor, ctx) == best)
        .collect();
    let index = rng.pick_index(nearest.len());
    nearest.get(index).copied()
}

/// Primary target of a pool.
pub fn pick_primary<'s>(
    actor: &BattleContext,
    pool: &[&'s BattleContext],
    order: TargetOrder,
    rng: &mut (impl RngOracle + ?Sized),
) -> Option<&'s BattleContext> {
    match order {
        TargetOrder::Pinned => pool.first().copied(),
        TargetOrder::Default => closest(actor, pool, true, rng),
    }
}

/// Expands a pattern over `pool`.
///
/// `primary` is the already chosen primary target, if any; otherwise one is
/// picked. `Two` and `Three` repeat the primary pick over the remaining
/// candidates, never duplicating, and return fewer targets when the pool is
/// smaller.
pub fn apply_pattern<'s>(
    pattern: TargetPattern,
    actor: &BattleContext,
    pool: &[&'s BattleContext],
    primary: Option<&'s BattleContext>,
    order: TargetOrder,
    rng: &mut (impl RngOracle + ?Sized),
) -> Vec<UnitId> {
    let ids = |members: Vec<&BattleContext>| -> Vec<UnitId> {
        members.into_iter().map(|ctx| ctx.id().clone()).collect()
    };
    let same_team = |a: &BattleContext, b: &BattleContext| a.team == b.team;

    match pattern {
        TargetPattern::Caster => vec![actor.id().clone()],
        TargetPattern::All => ids(pool.to_vec()),
        TargetPattern::Single => ids(primary.or_else(|| pick_primary(actor, pool, order, rng)).into_iter().collect()),
        TargetPattern::Row => {
            let Some(primary) = primary.or_else(|| pick_primary(actor, pool, order, rng)) else {
                return Vec::new();
            };
            ids(pool
                .iter()
                .copied()
                .filter(|ctx| same_team(ctx, primary) && ctx.position.row == primary.position.row)
                .collect())
        }
        TargetPattern::Column => {
            let Some(primary) = primary.or_else(|| pick_primary(actor, pool, order, rng)) else {
                return Vec::new();
            };
            ids(pool
                .iter()
                .copied()
                .filter(|ctx| same_team(ctx, primary) && ctx.position.col == primary.position.col)
                .collect())
        }
        TargetPattern::Two | TargetPattern::Three => {
            let count = pattern.pick_count().unwrap_or(1);
            let mut picked: Vec<&BattleContext> = Vec::with_capacity(count);
            let mut remaining: Vec<&BattleContext> = pool.to_vec();
            if let Some(primary) = primary {
                remaining.retain(|ctx| ctx.id() != primary.id());
                picked.push(primary);
            }
            while picked.len() < count {
                let Some(next) = pick_primary(actor, &remaining, order, rng) else {
                    break;
                };
                remaining.retain(|ctx| ctx.id() != next.id());
                picked.push(next);
            }
            ids(picked)
        }
    }
}
