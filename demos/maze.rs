//! Terminal maze demo using crossterm.
//!
//! Generates a maze sized to the terminal and animates the A* solver over it.
//!
//! Run: cargo run --bin maze -- --help
//!
//! Press q or Esc to stop the animation, any key to quit once it is done.

use std::error::Error;
use std::io::{self, Write};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;

use mazer_core::{Config, Maze};
use mazer_demos::{Canvas, Glyph};
use mazer_gen::MazeGen;
use mazer_paths::{Frame, Next, PathSplit, PathSplitter, Run, Solver, Speed};

// Rows kept free below the maze for the status line.
const STATUS_ROWS: u16 = 2;

/// Generate a maze sized to the terminal and animate the A* solver over it.
#[derive(Parser, Debug)]
#[command(name = "maze")]
struct Options {
    /// Animation speed; 100 solves instantly
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u8).range(0..=100))]
    speed: u8,

    /// Maze density; larger means more, smaller cells (defaults to the size ratio)
    #[arg(long)]
    size: Option<u32>,

    /// RNG seed; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Keep the maze a perfect spanning tree (no braiding)
    #[arg(long)]
    perfect: bool,
}

/// Restores the terminal when dropped, including on early returns.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(
            io::stdout(),
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All)
        )?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

fn glyph_color(g: Glyph) -> Color {
    match g {
        Glyph::Empty => Color::Reset,
        Glyph::Corner | Glyph::HWall | Glyph::VWall => Color::Grey,
        Glyph::Frontier => Color::DarkYellow,
        Glyph::Settled => Color::DarkBlue,
        Glyph::Path => Color::Cyan,
        Glyph::Exploring => Color::Magenta,
        Glyph::Start => Color::Green,
        Glyph::Goal => Color::Red,
    }
}

/// Maze shape that fits a terminal of `tw` x `th` characters.
///
/// One maze cell takes two characters each way, so the viewport handed to
/// [`mazer_core::MazeConfig::dimensions`] is measured in half-cells.
fn fit(cfg: &Config, size: Option<u32>, tw: u16, th: u16) -> (i32, i32) {
    let max_cols = (tw.saturating_sub(1) / 2).max(1) as i32;
    let max_rows = (th.saturating_sub(1 + STATUS_ROWS) / 2).max(1) as i32;
    let size = size.unwrap_or(cfg.maze.size_ratio as u32);
    let (cols, rows) = cfg.maze.dimensions(
        max_cols as f64 * cfg.maze.base_cell_size,
        max_rows as f64 * cfg.maze.base_cell_size,
        size,
    );
    (cols.min(max_cols), rows.min(max_rows))
}

fn draw(maze: &Maze, frame: &Frame, split: &PathSplit, status: &str) -> io::Result<()> {
    let mut canvas = Canvas::new(maze);
    canvas.paint(frame, split, maze.start(), maze.end());

    let mut stdout = io::stdout();
    queue!(stdout, cursor::MoveTo(0, 0))?;
    for (y, row) in canvas.rows().enumerate() {
        queue!(stdout, cursor::MoveTo(0, y as u16))?;
        let mut color = None;
        for g in row {
            let c = glyph_color(*g);
            if color != Some(c) {
                queue!(stdout, SetForegroundColor(c))?;
                color = Some(c);
            }
            queue!(stdout, Print(g.ch()))?;
        }
    }
    queue!(
        stdout,
        ResetColor,
        cursor::MoveTo(0, canvas.height() as u16 + 1),
        terminal::Clear(ClearType::CurrentLine),
        Print(status)
    )?;
    stdout.flush()
}

/// Wait up to `timeout` for a key press; returns the key if one came.
fn wait_key(timeout: Option<Duration>) -> io::Result<Option<KeyCode>> {
    loop {
        let ready = match timeout {
            Some(t) => event::poll(t)?,
            None => true,
        };
        if !ready {
            return Ok(None);
        }
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                return Ok(Some(key.code));
            }
        }
        if timeout.is_some() {
            return Ok(None);
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let opts = Options::parse();
    let speed = Speed::new(opts.speed);
    let cfg = Config::default();
    let seed = opts.seed.unwrap_or_else(rand::random);

    let (tw, th) = terminal::size()?;
    let (cols, rows) = fit(&cfg, opts.size, tw, th);
    let mut mg = MazeGen::new(cfg.maze, StdRng::seed_from_u64(seed));
    let maze = mg.generate(cols, rows, !opts.perfect)?;

    let _guard = TerminalGuard::enter()?;
    let mut solver = Solver::new(cfg.astar);
    let mut splitter = PathSplitter::new();
    let header = format!("{cols}x{rows} seed {seed} speed {}", speed.value());

    let (path, cancelled) = match solver.run(&maze, speed, &cfg.animation)? {
        Run::Finished(path) => (path, false),
        Run::Animating(mut animator) => {
            let cancel = animator.cancel_token();
            loop {
                let tick = animator.tick(&mut solver, &maze)?;
                let split = splitter.split(&tick.frame.path, maze.end());
                draw(&maze, &tick.frame, &split, &format!("{header} | q to stop"))?;
                match tick.next {
                    Next::After(delay) => {
                        if let Some(KeyCode::Char('q') | KeyCode::Esc) = wait_key(Some(delay))? {
                            cancel.cancel();
                        }
                    }
                    Next::Finished => break (tick.frame.path, false),
                    Next::Cancelled => break (Vec::new(), true),
                }
            }
        }
    };

    let stats = solver.stats();
    let outcome = if cancelled {
        "cancelled".to_owned()
    } else if path.is_empty() {
        "no path".to_owned()
    } else {
        format!("path of {} cells", path.len())
    };
    let split = PathSplit {
        confirmed: path.iter().rev().copied().collect(),
        exploration: Vec::new(),
    };
    let frame = Frame {
        open: solver.open_cells(),
        closed: solver.closed_cells(),
        path,
        finished: !cancelled,
    };
    draw(
        &maze,
        &frame,
        &split,
        &format!(
            "{header} | {outcome}, {} expansions | any key to quit",
            stats.expansions
        ),
    )?;
    wait_key(None)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_is_well_formed() {
        Options::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let opts = Options::try_parse_from(["maze"]).unwrap();
        assert_eq!(opts.speed, 60);
        assert_eq!(opts.size, None);
        assert_eq!(opts.seed, None);
        assert!(!opts.perfect);
    }

    #[test]
    fn flags_in_both_spellings() {
        let opts =
            Options::try_parse_from(["maze", "--speed=50", "--size", "12", "--seed", "7", "--perfect"])
                .unwrap();
        assert_eq!(opts.speed, 50);
        assert_eq!(opts.size, Some(12));
        assert_eq!(opts.seed, Some(7));
        assert!(opts.perfect);
    }

    #[test]
    fn speed_above_100_is_rejected() {
        assert!(Options::try_parse_from(["maze", "--speed", "101"]).is_err());
        assert!(Options::try_parse_from(["maze", "--speed", "100"]).is_ok());
    }

    #[test]
    fn help_is_available() {
        let err = Options::try_parse_from(["maze", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
        let help = Options::command().render_help().to_string();
        assert!(help.contains("--perfect"));
    }

    #[test]
    fn fit_respects_terminal_bounds() {
        let cfg = Config::default();
        let (cols, rows) = fit(&cfg, None, 81, 27);
        assert!(2 * cols + 1 <= 81);
        assert!(2 * rows + 1 + STATUS_ROWS as i32 <= 27);
        assert_eq!(fit(&cfg, Some(1), 81, 27), (5, 5));
    }
}
