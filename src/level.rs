use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::bonus::{place_bonuses_with, Bonuses, MAX_BONUSES, MIN_BONUSES};
use crate::grid::{Grid, Pos};
use crate::maze::{generate_maze_with, resolve_exit};
use crate::solver::{solve, Solution};
use crate::{MazeError, Result};

pub const DEFAULT_WIDTH: usize = 21;
pub const DEFAULT_HEIGHT: usize = 15;

/// Validated maze parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Settings {
    width: usize,
    height: usize,
    coins: Option<usize>,
}

impl Settings {
    /// `coins` fixes the coin count; `None` draws 2..=4 per maze.
    pub fn new(width: usize, height: usize, coins: Option<usize>) -> Result<Self> {
        if width < 3 || height < 3 {
            return Err(MazeError::InvalidDimensions { width, height });
        }
        if let Some(count) = coins {
            if !(MIN_BONUSES..=MAX_BONUSES).contains(&count) {
                return Err(MazeError::BonusCount(count));
            }
        }
        Ok(Self {
            width,
            height,
            coins,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn coins(&self) -> Option<usize> {
        self.coins
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            coins: None,
        }
    }
}

/// One maze instance: grid, endpoints, coins and the optimal route, all fixed
/// at creation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Level {
    pub seed: u64,
    pub grid: Grid,
    pub start: Pos,
    pub exit: Pos,
    pub bonuses: Bonuses,
    pub solution: Solution,
}

impl Level {
    /// Builds a level from `seed`. Carving, the coin count and coin placement
    /// all draw from one generator in that order.
    pub fn generate(settings: &Settings, seed: u64) -> Result<Self> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let grid = generate_maze_with(&mut rng, settings.width, settings.height)?;

        let start = Pos::new(1, 1);
        let corner = Pos::new(grid.width() - 2, grid.height() - 2);
        let exit = resolve_exit(&grid, corner)?;

        let count = settings
            .coins
            .unwrap_or_else(|| rng.gen_range(MIN_BONUSES..=MAX_BONUSES));
        let bonuses = place_bonuses_with(&mut rng, &grid, start, count)?;
        Self::assemble(seed, grid, start, exit, bonuses)
    }

    /// Solves a level from already chosen parts.
    pub fn assemble(
        seed: u64,
        grid: Grid,
        start: Pos,
        exit: Pos,
        bonuses: Bonuses,
    ) -> Result<Self> {
        let solution = solve(&grid, start, exit, bonuses.as_slice())?;
        log::info!(
            "level seed {}: {}x{} maze, {} coins, optimal cost {:?}",
            seed,
            grid.width(),
            grid.height(),
            bonuses.len(),
            solution.cost()
        );
        Ok(Self {
            seed,
            grid,
            start,
            exit,
            bonuses,
            solution,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_reject_small_mazes_and_bad_coin_counts() {
        assert_eq!(
            Settings::new(2, 15, None),
            Err(MazeError::InvalidDimensions {
                width: 2,
                height: 15
            })
        );
        assert_eq!(Settings::new(21, 15, Some(5)), Err(MazeError::BonusCount(5)));
        assert!(Settings::new(21, 15, Some(2)).is_ok());
    }

    #[test]
    fn generated_level_is_consistent() {
        let level = Level::generate(&Settings::default(), 2024).unwrap();

        assert_eq!(level.start, Pos::new(1, 1));
        assert!(level.grid.is_open(level.exit));
        assert!((MIN_BONUSES..=MAX_BONUSES).contains(&level.bonuses.len()));
        assert!(!level.bonuses.contains(level.start));

        let path = level.solution.path();
        assert_eq!(path.first(), Some(&level.start));
        assert_eq!(path.last(), Some(&level.exit));
    }

    #[test]
    fn fixed_coin_count_is_honoured() {
        let settings = Settings::new(15, 11, Some(3)).unwrap();
        let level = Level::generate(&settings, 5).unwrap();
        assert_eq!(level.bonuses.len(), 3);
    }

    #[test]
    fn same_seed_builds_same_level() {
        let settings = Settings::default();
        assert_eq!(
            Level::generate(&settings, 99).unwrap(),
            Level::generate(&settings, 99).unwrap()
        );
    }

    #[test]
    fn single_cell_maze_has_no_room_for_coins() {
        let settings = Settings::new(3, 3, None).unwrap();
        assert!(matches!(
            Level::generate(&settings, 1),
            Err(MazeError::InsufficientCells { .. })
        ));
    }
}
