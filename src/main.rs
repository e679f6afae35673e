use std::io::{self, Stdout};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use coin_maze::level::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use coin_maze::render::{self, Renderer};
use coin_maze::{Dir, Level, Playthrough, Settings};

const DEFAULT_RENDER_FPS: u64 = 60;

/// Terminal maze game where coins shorten the travelled distance.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Maze width in cells (bumped to the next odd number)
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    width: usize,

    /// Maze height in cells (bumped to the next odd number)
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    height: usize,

    /// Seed of the first maze; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Fixed number of coins (2-4); random per maze when omitted
    #[arg(long)]
    coins: Option<usize>,

    /// Print one maze with its optimal route and exit
    #[arg(long)]
    print: bool,
}

enum Flow {
    Quit,
    Restart,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let settings = Settings::new(args.width, args.height, args.coins)
        .context("could not generate a valid maze with these parameters")?;
    let seed = args.seed.unwrap_or_else(rand::random);

    if args.print {
        let level = Level::generate(&settings, seed)
            .context("could not generate a valid maze with these parameters")?;
        print!("{}", render::plain(&level, true));
        print!("{}", render::summary(&level));
        return Ok(());
    }

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(Hide)?;

    let result = run(&mut stdout, &settings, seed);

    stdout.execute(Show)?;
    stdout.execute(LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result
}

fn run(stdout: &mut Stdout, settings: &Settings, seed: u64) -> anyhow::Result<()> {
    let mut seeds = ChaCha8Rng::seed_from_u64(seed);
    let mut level_seed = seed;
    let frame_time = Duration::from_micros(1_000_000 / read_render_fps());

    loop {
        let level = Level::generate(settings, level_seed)
            .context("could not generate a valid maze with these parameters")?;
        match play_level(stdout, level, frame_time)? {
            Flow::Quit => return Ok(()),
            Flow::Restart => {
                level_seed = seeds.gen();
                log::info!("restarting with seed {}", level_seed);
            }
        }
    }
}

fn play_level(stdout: &mut Stdout, level: Level, frame_time: Duration) -> io::Result<Flow> {
    let mut renderer = Renderer::new(&level);
    let mut play = Playthrough::new(level);

    loop {
        let frame_start = Instant::now();
        while event::poll(Duration::from_millis(0))? {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if !matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
                continue;
            }
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(Flow::Quit),
                KeyCode::Char('r') => return Ok(Flow::Restart),
                KeyCode::Char('h') => play.toggle_help(),
                code => {
                    if let Some(dir) = key_to_dir(code) {
                        let outcome = play.try_move(dir);
                        log::trace!("{:?} -> {:?} at {}", dir, outcome, play.player());
                    }
                }
            }
        }

        renderer.draw(stdout, &play)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

fn key_to_dir(code: KeyCode) -> Option<Dir> {
    match code {
        KeyCode::Left | KeyCode::Char('a') => Some(Dir::Left),
        KeyCode::Right | KeyCode::Char('d') => Some(Dir::Right),
        KeyCode::Up | KeyCode::Char('w') => Some(Dir::Up),
        KeyCode::Down | KeyCode::Char('s') => Some(Dir::Down),
        _ => None,
    }
}

fn read_render_fps() -> u64 {
    match std::env::var("COIN_MAZE_FPS") {
        Ok(raw) => match raw.parse::<u64>() {
            Ok(fps) if fps > 0 => fps,
            _ => {
                log::warn!("ignoring COIN_MAZE_FPS={:?}, using {}", raw, DEFAULT_RENDER_FPS);
                DEFAULT_RENDER_FPS
            }
        },
        Err(_) => DEFAULT_RENDER_FPS,
    }
}
