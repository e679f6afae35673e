use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::QueueableCommand;
use unicode_width::UnicodeWidthStr;

use crate::game::Playthrough;
use crate::grid::{Pos, Tile};
use crate::level::Level;

const CELL_W: usize = 2;
const HUD_ROWS: usize = 6;

#[derive(Clone, Copy, PartialEq)]
enum Glyph {
    Player,
    Wall,
    Empty,
    Coin,
    Exit,
    Route,
}

#[derive(Clone, Copy, PartialEq)]
struct Cell {
    glyph: Glyph,
    color: Color,
}

/// Terminal renderer that only redraws cells and status lines that changed
/// since the previous frame.
pub struct Renderer {
    last: Vec<Cell>,
    last_hud: Vec<String>,
    on_route: Vec<bool>,
    needs_full: bool,
    origin_x: u16,
    origin_y: u16,
}

impl Renderer {
    pub fn new(level: &Level) -> Self {
        let mut on_route = vec![false; level.grid.cell_count()];
        for pos in level.solution.path() {
            on_route[level.grid.index(*pos)] = true;
        }
        Self {
            last: vec![
                Cell {
                    glyph: Glyph::Empty,
                    color: Color::Reset,
                };
                level.grid.cell_count()
            ],
            last_hud: Vec::new(),
            on_route,
            needs_full: true,
            origin_x: 0,
            origin_y: 0,
        }
    }

    pub fn draw<W: Write>(&mut self, out: &mut W, play: &Playthrough) -> io::Result<()> {
        let grid = &play.level().grid;
        let needed_w = (grid.width() * CELL_W) as u16;
        let needed_h = (grid.height() + HUD_ROWS) as u16;

        let (term_w, term_h) = terminal::size()?;
        if term_w < needed_w || term_h < needed_h {
            out.queue(MoveTo(0, 0))?;
            out.queue(Clear(ClearType::All))?;
            let msg = format!(
                "Terminal too small. Need at least {}x{} (cols x rows). Current: {}x{}.",
                needed_w, needed_h, term_w, term_h
            );
            out.queue(Print(msg))?;
            out.flush()?;
            self.needs_full = true;
            return Ok(());
        }

        let origin_x = (term_w - needed_w) / 2;
        let origin_y = (term_h - needed_h) / 2;
        if origin_x != self.origin_x || origin_y != self.origin_y {
            self.origin_x = origin_x;
            self.origin_y = origin_y;
            self.needs_full = true;
        }
        if self.needs_full {
            out.queue(Clear(ClearType::All))?;
            self.last_hud.clear();
        }

        let show_route = play.show_help() || play.is_won();
        for y in 0..grid.height() {
            for x in 0..grid.width() {
                let pos = Pos { x, y };
                let cell = self.cell_for(play, pos, show_route);
                let idx = grid.index(pos);
                if self.needs_full || cell != self.last[idx] {
                    self.last[idx] = cell;
                    self.draw_cell(out, x, y, cell)?;
                }
            }
        }

        let hud = hud_lines(play);
        let hud_y = self.origin_y + grid.height() as u16;
        for (row, line) in hud.iter().enumerate() {
            if self.last_hud.get(row) == Some(line) {
                continue;
            }
            let color = if row == 1 { Color::Yellow } else { Color::White };
            out.queue(MoveTo(self.origin_x, hud_y + row as u16))?;
            out.queue(Clear(ClearType::CurrentLine))?;
            out.queue(SetForegroundColor(color))?;
            out.queue(Print(line))?;
            out.queue(ResetColor)?;
        }
        self.last_hud = hud;
        self.needs_full = false;

        out.flush()
    }

    fn cell_for(&self, play: &Playthrough, pos: Pos, show_route: bool) -> Cell {
        let level = play.level();
        if pos == play.player() {
            return Cell {
                glyph: Glyph::Player,
                color: Color::Red,
            };
        }
        if pos == level.exit {
            return Cell {
                glyph: Glyph::Exit,
                color: Color::Green,
            };
        }
        if play.coins_left().contains(&pos) {
            return Cell {
                glyph: Glyph::Coin,
                color: Color::Yellow,
            };
        }
        if show_route && self.on_route[level.grid.index(pos)] {
            return Cell {
                glyph: Glyph::Route,
                color: Color::Cyan,
            };
        }
        match level.grid.tile(pos) {
            Some(Tile::Open) => Cell {
                glyph: Glyph::Empty,
                color: Color::Reset,
            },
            _ => Cell {
                glyph: Glyph::Wall,
                color: Color::Grey,
            },
        }
    }

    fn draw_cell<W: Write>(&self, out: &mut W, x: usize, y: usize, cell: Cell) -> io::Result<()> {
        let text = match cell.glyph {
            Glyph::Player => "•",
            Glyph::Wall => "██",
            Glyph::Empty => "  ",
            Glyph::Coin => "©",
            Glyph::Exit => "★",
            Glyph::Route => "░░",
        };
        let x_pos = self.origin_x + (x * CELL_W) as u16;
        let y_pos = self.origin_y + y as u16;
        out.queue(MoveTo(x_pos, y_pos))?;
        out.queue(SetForegroundColor(cell.color))?;
        out.queue(Print(text))?;
        let w = UnicodeWidthStr::width(text);
        for _ in w..CELL_W {
            out.queue(Print(' '))?;
        }
        out.queue(ResetColor)?;
        Ok(())
    }
}

/// Status lines shown under the maze.
pub fn hud_lines(play: &Playthrough) -> Vec<String> {
    let mut lines = vec![
        format!(
            "Distance: {}   Coins left: {}   Seed: {}",
            play.distance(),
            play.coins_left().len(),
            play.level().seed
        ),
        "h: show/hide route  |  r: restart  |  q: quit".to_string(),
    ];
    if play.is_won() {
        lines.push("You win! Reached the exit.".to_string());
        lines.push(format!("Total distance: {}", play.distance()));
        lines.push(format!(
            "Optimal distance (with coins): {}",
            optimal_label(play.level())
        ));
        lines.push("Press r to restart or q to quit".to_string());
    }
    lines
}

fn optimal_label(level: &Level) -> String {
    match level.solution.cost() {
        Some(cost) => cost.to_string(),
        None => "unreachable".to_string(),
    }
}

/// Plain-text picture of a level: `#` walls, `S` start, `E` exit, `$` coins
/// and, when `show_route` is set, `*` along the optimal route.
pub fn plain(level: &Level, show_route: bool) -> String {
    let grid = &level.grid;
    let route = level.solution.path();
    let mut out = String::with_capacity((grid.width() + 1) * grid.height());
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let pos = Pos { x, y };
            let c = if pos == level.start {
                'S'
            } else if pos == level.exit {
                'E'
            } else if level.bonuses.contains(pos) {
                '$'
            } else if show_route && route.contains(&pos) {
                '*'
            } else if grid.is_open(pos) {
                ' '
            } else {
                '#'
            };
            out.push(c);
        }
        out.push('\n');
    }
    out
}

/// Summary printed after [`plain`] in non-interactive mode.
pub fn summary(level: &Level) -> String {
    let steps = level.solution.path().len().saturating_sub(1);
    format!(
        "Seed: {}\nCoins: {}\nOptimal distance (with coins): {}\nRoute steps: {}\n",
        level.seed,
        level.bonuses.len(),
        optimal_label(level),
        steps
    )
}
