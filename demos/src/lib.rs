//! Shared rendering for the mazer demos.
//!
//! A [`Canvas`] lays a maze out on a character grid twice as fine as the maze
//! itself: cells sit at odd coordinates, walls and passages between them at
//! the even coordinates in between, and wall corners at even/even.

use std::fmt;

use mazer_core::{Dir, Maze, Point};
use mazer_paths::{Frame, PathSplit};

/// What occupies one character of the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Empty,
    Corner,
    HWall,
    VWall,
    /// In the solver's open set.
    Frontier,
    /// In the solver's closed set.
    Settled,
    /// Confirmed part of the current path.
    Path,
    /// Exploratory tail of the current path.
    Exploring,
    Start,
    Goal,
}

impl Glyph {
    pub fn ch(self) -> char {
        match self {
            Glyph::Empty => ' ',
            Glyph::Corner => '+',
            Glyph::HWall => '-',
            Glyph::VWall => '|',
            Glyph::Frontier => 'o',
            Glyph::Settled => '.',
            Glyph::Path => '*',
            Glyph::Exploring => '~',
            Glyph::Start => 'S',
            Glyph::Goal => 'G',
        }
    }
}

/// Character grid for one maze.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: usize,
    height: usize,
    glyphs: Vec<Glyph>,
}

impl Canvas {
    /// Draw the walls of `maze`.
    pub fn new(maze: &Maze) -> Self {
        let width = 2 * maze.cols() as usize + 1;
        let height = 2 * maze.rows() as usize + 1;
        let mut canvas = Self {
            width,
            height,
            glyphs: vec![Glyph::Empty; width * height],
        };

        for y in (0..height).step_by(2) {
            for x in (0..width).step_by(2) {
                canvas.set(x, y, Glyph::Corner);
            }
        }
        for cell in maze.cells() {
            let (cx, cy) = Self::cell_xy(cell.pos);
            for d in Dir::ALL {
                if !cell.walls.has(d) {
                    continue;
                }
                match d {
                    Dir::Top => canvas.set(cx, cy - 1, Glyph::HWall),
                    Dir::Bottom => canvas.set(cx, cy + 1, Glyph::HWall),
                    Dir::Left => canvas.set(cx - 1, cy, Glyph::VWall),
                    Dir::Right => canvas.set(cx + 1, cy, Glyph::VWall),
                }
            }
        }
        canvas
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Glyph at canvas coordinates, `None` outside.
    pub fn at(&self, x: usize, y: usize) -> Option<Glyph> {
        if x < self.width && y < self.height {
            Some(self.glyphs[x + y * self.width])
        } else {
            None
        }
    }

    /// Mark the interior of maze cell `p`.
    pub fn mark(&mut self, p: Point, g: Glyph) {
        if p.x < 0 || p.y < 0 {
            return;
        }
        let (x, y) = Self::cell_xy(p);
        self.set(x, y, g);
    }

    /// Mark every cell of `path` and the passages joining consecutive cells.
    pub fn trace(&mut self, path: &[Point], g: Glyph) {
        for p in path {
            self.mark(*p, g);
        }
        for w in path.windows(2) {
            let (a, b) = (w[0], w[1]);
            if a.dir_to(b).is_none() || a.x < 0 || a.y < 0 || b.x < 0 || b.y < 0 {
                continue;
            }
            let x = (a.x + b.x + 1) as usize;
            let y = (a.y + b.y + 1) as usize;
            self.set(x, y, g);
        }
    }

    /// Paint a solver frame: settled cells, then the frontier, then both
    /// halves of the split path, then the endpoints on top.
    pub fn paint(&mut self, frame: &Frame, split: &PathSplit, start: Point, goal: Point) {
        for p in &frame.closed {
            self.mark(*p, Glyph::Settled);
        }
        for p in &frame.open {
            self.mark(*p, Glyph::Frontier);
        }
        self.trace(&split.exploration, Glyph::Exploring);
        self.trace(&split.confirmed, Glyph::Path);
        self.mark(start, Glyph::Start);
        self.mark(goal, Glyph::Goal);
    }

    /// Rows of glyphs, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Glyph]> + '_ {
        self.glyphs.chunks(self.width)
    }

    fn cell_xy(p: Point) -> (usize, usize) {
        (2 * p.x as usize + 1, 2 * p.y as usize + 1)
    }

    fn set(&mut self, x: usize, y: usize, g: Glyph) {
        if x < self.width && y < self.height {
            self.glyphs[x + y * self.width] = g;
        }
    }
}

impl fmt::Display for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            let line: String = row.iter().map(|g| g.ch()).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mazer_core::AstarConfig;
    use mazer_paths::{PathSplitter, Solver};

    fn corridor() -> Maze {
        let mut maze = Maze::new(3, 1).unwrap();
        maze.carve(Point::new(0, 0), Point::new(1, 0)).unwrap();
        maze.carve(Point::new(1, 0), Point::new(2, 0)).unwrap();
        maze
    }

    #[test]
    fn walls_of_a_single_cell() {
        let maze = Maze::new(1, 1).unwrap();
        let canvas = Canvas::new(&maze);
        assert_eq!((canvas.width(), canvas.height()), (3, 3));
        assert_eq!(canvas.to_string(), "+-+\n| |\n+-+\n");
    }

    #[test]
    fn carved_walls_leave_gaps() {
        let canvas = Canvas::new(&corridor());
        assert_eq!(canvas.to_string(), "+-+-+-+\n|     |\n+-+-+-+\n");
    }

    #[test]
    fn two_rows() {
        let mut maze = Maze::new(2, 2).unwrap();
        maze.carve(Point::new(0, 0), Point::new(1, 0)).unwrap();
        maze.carve(Point::new(1, 0), Point::new(1, 1)).unwrap();
        maze.carve(Point::new(1, 1), Point::new(0, 1)).unwrap();
        let canvas = Canvas::new(&maze);
        assert_eq!(canvas.to_string(), "+-+-+\n|   |\n+-+ +\n|   |\n+-+-+\n");
    }

    #[test]
    fn trace_fills_passages() {
        let mut canvas = Canvas::new(&corridor());
        canvas.trace(&[Point::new(2, 0), Point::new(1, 0), Point::new(0, 0)], Glyph::Path);
        assert_eq!(canvas.to_string(), "+-+-+-+\n|*****|\n+-+-+-+\n");
        assert_eq!(canvas.at(3, 1), Some(Glyph::Path));
        assert_eq!(canvas.at(7, 1), None);
    }

    #[test]
    fn paint_finished_solve() {
        let maze = corridor();
        let mut solver = Solver::new(AstarConfig::default());
        solver.start(&maze).unwrap();
        let path = solver.finish_instantly(&maze, 10).unwrap();
        let frame = Frame {
            open: solver.open_cells(),
            closed: solver.closed_cells(),
            path: path.clone(),
            finished: true,
        };
        let split = PathSplitter::new().split(&path, maze.end());
        let mut canvas = Canvas::new(&maze);
        canvas.paint(&frame, &split, maze.start(), maze.end());

        let line = canvas.to_string().lines().nth(1).map(str::to_owned);
        assert_eq!(line.as_deref(), Some("|S**~G|"));
    }

    #[test]
    fn out_of_range_marks_are_ignored() {
        let mut canvas = Canvas::new(&corridor());
        let before = canvas.to_string();
        canvas.mark(Point::new(-1, 0), Glyph::Path);
        canvas.mark(Point::new(9, 9), Glyph::Path);
        assert_eq!(canvas.to_string(), before);
    }
}
