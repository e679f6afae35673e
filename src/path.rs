use std::iter;

use crate::grid::Pos;
use crate::solver::State;

/// Dense predecessor links over every `(cell, mask)` state of a grid.
#[derive(Clone, Debug)]
pub struct PredecessorMap {
    width: usize,
    masks: usize,
    links: Vec<Option<State>>,
}

impl PredecessorMap {
    pub fn new(width: usize, height: usize, masks: usize) -> Self {
        Self {
            width,
            masks,
            links: vec![None; width * height * masks],
        }
    }

    /// Number of states the map can hold.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Dense index of `state`; also used by the solver for its cost table.
    pub fn slot(&self, state: State) -> usize {
        (state.pos.y * self.width + state.pos.x) * self.masks + usize::from(state.mask)
    }

    pub fn record(&mut self, state: State, from: State) {
        let slot = self.slot(state);
        self.links[slot] = Some(from);
    }

    pub fn get(&self, state: State) -> Option<State> {
        self.links.get(self.slot(state)).copied().flatten()
    }
}

/// Follows predecessor links from `goal` back to the state without one and
/// returns the visited cells in start-to-goal order.
pub fn reconstruct(preds: &PredecessorMap, goal: State) -> Vec<Pos> {
    let mut path: Vec<Pos> = iter::successors(Some(goal), |state| preds.get(*state))
        .take(preds.len())
        .map(|state| state.pos)
        .collect();
    path.reverse();
    path
}
