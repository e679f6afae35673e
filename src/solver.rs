//! Coin-aware shortest route search.
//!
//! The search runs over `(cell, collected mask)` states. Every move costs one
//! and entering an uncollected coin knocks [`COIN_DISCOUNT`] off the running
//! total, so costs can go negative. Masks only ever gain bits along a walk,
//! which rules out improving cycles: within one mask every edge costs `+1`, and
//! the discount is paid only on the edge that moves to a larger mask. The
//! search is therefore label-correcting: stale heap entries are skipped,
//! improved states are pushed again, and the queue is drained completely
//! before the cheapest exit state is chosen.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::grid::{Grid, Pos};
use crate::path::{reconstruct, PredecessorMap};
use crate::{MazeError, Result};

/// Signed route cost; discounts may push it below zero.
pub type Cost = i32;

/// Collected coins, bit `i` for the coin at index `i`.
pub type Mask = u8;

pub const COIN_DISCOUNT: Cost = 10;

/// Most coins a single search can track.
pub const MAX_TRACKED_BONUSES: usize = Mask::BITS as usize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct State {
    pub pos: Pos,
    pub mask: Mask,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Route {
    /// Cells from start to exit, both included.
    pub path: Vec<Pos>,
    pub cost: Cost,
    /// Coins picked up along `path`.
    pub collected: Mask,
}

impl Route {
    pub fn steps(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Solution {
    Unreachable,
    Found(Route),
}

impl Solution {
    pub fn cost(&self) -> Option<Cost> {
        match self {
            Solution::Unreachable => None,
            Solution::Found(route) => Some(route.cost),
        }
    }

    /// Route cells, empty when the exit cannot be reached.
    pub fn path(&self) -> &[Pos] {
        match self {
            Solution::Unreachable => &[],
            Solution::Found(route) => &route.path,
        }
    }

    pub fn is_reachable(&self) -> bool {
        matches!(self, Solution::Found(_))
    }
}

/// Cheapest walk from `start` to `end` given the coins in `bonuses`.
///
/// Reaching `end` finishes a walk, so exit states are never expanded. A wall
/// or out-of-bounds `start`/`end` is reported as unreachable. When a position
/// is listed more than once the first index owns it.
pub fn solve(grid: &Grid, start: Pos, end: Pos, bonuses: &[Pos]) -> Result<Solution> {
    if bonuses.len() > MAX_TRACKED_BONUSES {
        return Err(MazeError::TooManyBonuses {
            got: bonuses.len(),
            max: MAX_TRACKED_BONUSES,
        });
    }
    if !grid.is_open(start) || !grid.is_open(end) {
        return Ok(Solution::Unreachable);
    }

    let masks = 1usize << bonuses.len();
    let mut coin_bit: Vec<Option<Mask>> = vec![None; grid.cell_count()];
    for (i, &pos) in bonuses.iter().enumerate() {
        if !grid.in_bounds(pos) {
            continue;
        }
        let bit = &mut coin_bit[grid.index(pos)];
        if bit.is_none() {
            *bit = Some(1 << i);
        }
    }

    let mut preds = PredecessorMap::new(grid.width(), grid.height(), masks);
    let mut best: Vec<Option<Cost>> = vec![None; preds.len()];
    let mut heap = BinaryHeap::new();

    let origin = State {
        pos: start,
        mask: 0,
    };
    best[preds.slot(origin)] = Some(0);
    heap.push(Reverse((0, start, 0)));

    let mut expanded = 0usize;
    while let Some(Reverse((cost, pos, mask))) = heap.pop() {
        let state = State { pos, mask };
        if best[preds.slot(state)].is_some_and(|known| known < cost) {
            continue;
        }
        if pos == end {
            continue;
        }
        expanded += 1;

        for next in grid.open_neighbors(pos) {
            let mut next_mask = mask;
            let mut next_cost = cost + 1;
            if let Some(bit) = coin_bit[grid.index(next)] {
                if mask & bit == 0 {
                    next_mask |= bit;
                    next_cost -= COIN_DISCOUNT;
                }
            }

            let next_state = State {
                pos: next,
                mask: next_mask,
            };
            let slot = preds.slot(next_state);
            if best[slot].map_or(true, |known| next_cost < known) {
                best[slot] = Some(next_cost);
                preds.record(next_state, state);
                heap.push(Reverse((next_cost, next, next_mask)));
            }
        }
    }

    let goal = (0..masks)
        .filter_map(|mask| {
            let state = State {
                pos: end,
                mask: mask as Mask,
            };
            best[preds.slot(state)].map(|cost| (cost, state))
        })
        .min_by_key(|(cost, _)| *cost);

    let Some((cost, goal)) = goal else {
        log::debug!("exit {} unreachable after {} expansions", end, expanded);
        return Ok(Solution::Unreachable);
    };

    let path = reconstruct(&preds, goal);
    log::debug!(
        "route to {} costs {} over {} steps ({} expansions)",
        end,
        cost,
        path.len().saturating_sub(1),
        expanded
    );
    Ok(Solution::Found(Route {
        path,
        cost,
        collected: goal.mask,
    }))
}
