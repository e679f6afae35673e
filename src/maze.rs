use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::grid::{Grid, Pos};
use crate::{MazeError, Result};

const LATTICE_STEPS: [(isize, isize); 4] = [(2, 0), (-2, 0), (0, 2), (0, -2)];

/// One pending cell of the backtracker together with its shuffled step order.
struct Frame {
    cell: Pos,
    steps: [(isize, isize); 4],
    next: usize,
}

impl Frame {
    fn new(cell: Pos, rng: &mut impl Rng) -> Self {
        let mut steps = LATTICE_STEPS;
        steps.shuffle(rng);
        Self {
            cell,
            steps,
            next: 0,
        }
    }
}

/// Carves a perfect maze of at least `width x height` cells from `seed`.
pub fn generate_maze(width: usize, height: usize, seed: u64) -> Result<Grid> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    generate_maze_with(&mut rng, width, height)
}

/// Carves a perfect maze drawing randomness from `rng`.
///
/// Even dimensions are bumped to the next odd value so the carving lattice
/// keeps one wall cell between neighbouring lattice cells.
pub fn generate_maze_with(rng: &mut impl Rng, width: usize, height: usize) -> Result<Grid> {
    carve(rng, width, height).map(|(grid, _)| grid)
}

/// Randomized backtracking from `(1, 1)`. Returns the grid and the number of
/// carve operations performed.
fn carve(rng: &mut impl Rng, width: usize, height: usize) -> Result<(Grid, usize)> {
    if width < 3 || height < 3 {
        return Err(MazeError::InvalidDimensions { width, height });
    }
    let width = odd_at_least(width);
    let height = odd_at_least(height);

    let mut grid = Grid::walled(width, height);
    let start = Pos::new(1, 1);
    grid.open(start);

    let mut carves = 0;
    let mut stack = vec![Frame::new(start, rng)];
    while let Some(frame) = stack.last_mut() {
        if frame.next == frame.steps.len() {
            stack.pop();
            continue;
        }
        let (dx, dy) = frame.steps[frame.next];
        frame.next += 1;
        let cell = frame.cell;

        let Some(target) = lattice_target(&grid, cell, dx, dy) else {
            continue;
        };
        if grid.is_open(target) {
            continue;
        }

        grid.open(target);
        grid.open(Pos::new((cell.x + target.x) / 2, (cell.y + target.y) / 2));
        carves += 1;
        log::trace!("carved {} -> {}", cell, target);
        stack.push(Frame::new(target, rng));
    }

    log::debug!(
        "carved {}x{} maze with {} lattice steps",
        width,
        height,
        carves
    );
    Ok((grid, carves))
}

fn odd_at_least(n: usize) -> usize {
    if n % 2 == 0 {
        n + 1
    } else {
        n
    }
}

/// Target two cells away, if it lies strictly inside the outer wall ring.
fn lattice_target(grid: &Grid, cell: Pos, dx: isize, dy: isize) -> Option<Pos> {
    let x = cell.x.checked_add_signed(dx)?;
    let y = cell.y.checked_add_signed(dy)?;
    if x == 0 || y == 0 || x >= grid.width() - 1 || y >= grid.height() - 1 {
        return None;
    }
    Some(Pos::new(x, y))
}

/// Returns `requested` when it is open, otherwise the first open cell found
/// scanning backwards in reading order: leftwards along the requested row,
/// then each row above it from the right-hand interior column.
pub fn resolve_exit(grid: &Grid, requested: Pos) -> Result<Pos> {
    if !grid.in_bounds(requested) {
        return Err(MazeError::OutOfBounds(requested));
    }
    if grid.is_open(requested) {
        return Ok(requested);
    }

    for y in (1..=requested.y).rev() {
        let last_x = if y == requested.y {
            requested.x
        } else {
            grid.width().saturating_sub(2)
        };
        for x in (1..=last_x).rev() {
            let pos = Pos::new(x, y);
            if grid.is_open(pos) {
                log::debug!("exit {} is a wall, using {}", requested, pos);
                return Ok(pos);
            }
        }
    }
    Err(MazeError::NoOpenCell(requested))
}
