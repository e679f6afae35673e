use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::grid::{Grid, Pos};
use crate::{MazeError, Result};

pub const MIN_BONUSES: usize = 2;
pub const MAX_BONUSES: usize = 4;

/// Coin positions in placement order. The order fixes which bit of the
/// collected mask each coin owns.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Bonuses(Vec<Pos>);

impl Bonuses {
    pub fn new(positions: Vec<Pos>) -> Self {
        Self(positions)
    }

    pub fn as_slice(&self) -> &[Pos] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, pos: Pos) -> bool {
        self.0.contains(&pos)
    }

    pub fn index_of(&self, pos: Pos) -> Option<usize> {
        self.0.iter().position(|p| *p == pos)
    }

    pub fn iter(&self) -> impl Iterator<Item = Pos> + '_ {
        self.0.iter().copied()
    }
}

/// Picks `count` distinct open cells other than `start` using `seed`.
pub fn place_bonuses(grid: &Grid, start: Pos, count: usize, seed: u64) -> Result<Bonuses> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    place_bonuses_with(&mut rng, grid, start, count)
}

/// Picks `count` distinct open cells other than `start`, uniformly without
/// replacement. The exit is a valid candidate.
pub fn place_bonuses_with(
    rng: &mut impl Rng,
    grid: &Grid,
    start: Pos,
    count: usize,
) -> Result<Bonuses> {
    if !(MIN_BONUSES..=MAX_BONUSES).contains(&count) {
        return Err(MazeError::BonusCount(count));
    }

    let mut candidates: Vec<Pos> = grid
        .open_cells()
        .into_iter()
        .filter(|pos| *pos != start)
        .collect();
    if candidates.len() < count {
        return Err(MazeError::InsufficientCells {
            needed: count,
            available: candidates.len(),
        });
    }

    candidates.shuffle(rng);
    candidates.truncate(count);
    log::debug!("placed {} coins: {:?}", count, candidates);
    Ok(Bonuses(candidates))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::generate_maze;

    const START: Pos = Pos::new(1, 1);

    #[test]
    fn places_distinct_open_cells_away_from_start() {
        let grid = generate_maze(21, 15, 9).unwrap();
        for seed in 0..20 {
            let bonuses = place_bonuses(&grid, START, 4, seed).unwrap();
            assert_eq!(bonuses.len(), 4);
            for (i, pos) in bonuses.iter().enumerate() {
                assert!(grid.is_open(pos));
                assert_ne!(pos, START);
                assert_eq!(bonuses.index_of(pos), Some(i));
            }
        }
    }

    #[test]
    fn rejects_counts_outside_range() {
        let grid = generate_maze(21, 15, 9).unwrap();
        assert_eq!(
            place_bonuses(&grid, START, 1, 0),
            Err(MazeError::BonusCount(1))
        );
        assert_eq!(
            place_bonuses(&grid, START, 5, 0),
            Err(MazeError::BonusCount(5))
        );
    }

    #[test]
    fn rejects_grids_without_enough_cells() {
        let grid = Grid::parse(&["#####", "#..##", "#####"]).unwrap();
        assert_eq!(
            place_bonuses(&grid, START, 2, 0),
            Err(MazeError::InsufficientCells {
                needed: 2,
                available: 1
            })
        );
    }

    #[test]
    fn uses_every_candidate_when_count_matches() {
        let grid = Grid::parse(&["#####", "#...#", "#####"]).unwrap();
        let bonuses = place_bonuses(&grid, START, 2, 4).unwrap();

        let mut placed: Vec<Pos> = bonuses.iter().collect();
        placed.sort();
        assert_eq!(placed, vec![Pos::new(2, 1), Pos::new(3, 1)]);
    }

    #[test]
    fn same_seed_places_same_coins() {
        let grid = generate_maze(21, 15, 1).unwrap();
        assert_eq!(
            place_bonuses(&grid, START, 3, 77).unwrap(),
            place_bonuses(&grid, START, 3, 77).unwrap()
        );
    }
}
