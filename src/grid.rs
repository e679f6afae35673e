use std::fmt;

use crate::{MazeError, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tile {
    Wall,
    Open,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pos {
    pub x: usize,
    pub y: usize,
}

impl Pos {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Dir {
    Up,
    Down,
    Left,
    Right,
}

impl Dir {
    pub const ALL: [Dir; 4] = [Dir::Up, Dir::Down, Dir::Left, Dir::Right];

    pub fn delta(self) -> (isize, isize) {
        match self {
            Dir::Up => (0, -1),
            Dir::Down => (0, 1),
            Dir::Left => (-1, 0),
            Dir::Right => (1, 0),
        }
    }
}

/// Rectangular cell grid stored row-major.
///
/// Only the maze generator can open cells; everything else sees a read-only
/// view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Tile>,
}

impl Grid {
    pub(crate) fn walled(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Tile::Wall; width * height],
        }
    }

    /// Builds a grid from text rows where `#` is a wall and any other
    /// character is open.
    pub fn parse(rows: &[&str]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.chars().count());
        if width == 0 || height == 0 {
            return Err(MazeError::InvalidDimensions { width, height });
        }

        let mut cells = Vec::with_capacity(width * height);
        for row in rows {
            if row.chars().count() != width {
                return Err(MazeError::RaggedRows { expected: width });
            }
            cells.extend(row.chars().map(|c| if c == '#' { Tile::Wall } else { Tile::Open }));
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    /// Tile at `pos`, or `None` outside the grid.
    pub fn tile(&self, pos: Pos) -> Option<Tile> {
        if !self.in_bounds(pos) {
            return None;
        }
        self.cells.get(self.index(pos)).copied()
    }

    pub fn is_open(&self, pos: Pos) -> bool {
        self.tile(pos) == Some(Tile::Open)
    }

    pub(crate) fn open(&mut self, pos: Pos) {
        let idx = self.index(pos);
        self.cells[idx] = Tile::Open;
    }

    /// Row-major index of an in-bounds position.
    pub fn index(&self, pos: Pos) -> usize {
        pos.y * self.width + pos.x
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Cell one step from `pos` in `dir`, if it lies inside the grid.
    pub fn step(&self, pos: Pos, dir: Dir) -> Option<Pos> {
        let (dx, dy) = dir.delta();
        let x = pos.x.checked_add_signed(dx)?;
        let y = pos.y.checked_add_signed(dy)?;
        let next = Pos { x, y };
        self.in_bounds(next).then_some(next)
    }

    /// In-bounds axis-aligned neighbours of `pos`, walls included.
    pub fn neighbors(&self, pos: Pos) -> impl Iterator<Item = Pos> + '_ {
        Dir::ALL.into_iter().filter_map(move |dir| self.step(pos, dir))
    }

    pub fn open_neighbors(&self, pos: Pos) -> impl Iterator<Item = Pos> + '_ {
        self.neighbors(pos).filter(|next| self.is_open(*next))
    }

    /// All open cells in row-major order.
    pub fn open_cells(&self) -> Vec<Pos> {
        let mut cells = Vec::new();
        for y in 0..self.height {
            for x in 0..self.width {
                let pos = Pos { x, y };
                if self.is_open(pos) {
                    cells.push(pos);
                }
            }
        }
        cells
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width) {
            for tile in row {
                let c = match tile {
                    Tile::Wall => '#',
                    Tile::Open => '.',
                };
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
