//! Perfect-maze generation with collectible coins and a coin-aware optimal
//! route solver.
//!
//! A maze is carved on an odd lattice, a handful of coins are scattered on its
//! open cells, and the solver searches `(cell, collected coins)` states to find
//! the cheapest walk from entrance to exit when every coin knocks
//! [`COIN_DISCOUNT`] off the running distance the first time it is picked up.

use thiserror::Error;

pub mod bonus;
pub mod game;
pub mod grid;
pub mod level;
pub mod maze;
pub mod path;
pub mod render;
pub mod solver;

pub use bonus::{place_bonuses, place_bonuses_with, Bonuses, MAX_BONUSES, MIN_BONUSES};
pub use game::{MoveOutcome, Playthrough};
pub use grid::{Dir, Grid, Pos, Tile};
pub use level::{Level, Settings};
pub use maze::{generate_maze, generate_maze_with, resolve_exit};
pub use solver::{solve, Cost, Mask, Route, Solution, State, COIN_DISCOUNT};

/// Errors raised while building or solving a maze.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MazeError {
    #[error("maze dimensions {width}x{height} are too small, need at least 3x3")]
    InvalidDimensions { width: usize, height: usize },
    #[error("grid rows must all be {expected} cells wide")]
    RaggedRows { expected: usize },
    #[error("bonus count {0} is outside 2..=4")]
    BonusCount(usize),
    #[error("need {needed} free open cells for bonuses, only {available} available")]
    InsufficientCells { needed: usize, available: usize },
    #[error("solver tracks at most {max} bonuses, got {got}")]
    TooManyBonuses { got: usize, max: usize },
    #[error("position {0} is outside the grid")]
    OutOfBounds(Pos),
    #[error("no open cell found scanning back from {0}")]
    NoOpenCell(Pos),
}

pub type Result<T> = std::result::Result<T, MazeError>;
