//! Maze generation.
//!
//! [`MazeGen::generate`] runs three passes over a fully walled grid:
//! - **Carving**: an iterative recursive backtracker that produces a
//!   spanning tree (every cell reachable, no cycles).
//! - **Braiding** (optional): opens most dead ends into a neighbor, adding
//!   cycles.
//! - **Extra connections**: knocks down a few random walls.
//!
//! The later passes only ever remove walls, so the connectivity established
//! by carving is preserved.

use mazer_core::{Maze, MazeConfig, MazeError, Point};
use rand::Rng;

/// Maze generator driven by a random number generator `R`.
pub struct MazeGen<R: Rng> {
    pub rng: R,
    pub config: MazeConfig,
}

impl<R: Rng> MazeGen<R> {
    /// Create a new generator.
    pub fn new(config: MazeConfig, rng: R) -> Self {
        Self { rng, config }
    }

    /// Build a `cols` x `rows` maze, braiding dead ends if `braided`.
    ///
    /// Fails with [`MazeError::InvalidDimensions`] before allocating if
    /// either dimension is not positive.
    pub fn generate(&mut self, cols: i32, rows: i32, braided: bool) -> Result<Maze, MazeError> {
        let mut maze = self.perfect(cols, rows)?;
        let tree = maze.passage_count();

        let braided_count = if braided { self.braid(&mut maze) } else { 0 };
        let extra = self.add_random_connections(&mut maze);

        log::debug!(
            "generated {cols}x{rows} maze: {tree} tree passages, {braided_count} dead ends braided, {extra} extra connections"
        );
        Ok(maze)
    }

    /// Build a perfect maze (a spanning tree) with no post-processing.
    pub fn perfect(&mut self, cols: i32, rows: i32) -> Result<Maze, MazeError> {
        let mut maze = Maze::new(cols, rows)?;
        self.carve_passages(&mut maze);
        Ok(maze)
    }

    /// Carve a spanning tree into `maze` with a randomized depth-first
    /// search from the top-left cell.
    ///
    /// Returns the number of passages carved, always `maze.len() - 1` on a
    /// fully walled grid.
    pub fn carve_passages(&mut self, maze: &mut Maze) -> usize {
        maze.reset_visited();
        let mut carved = 0usize;
        let mut stack: Vec<Point> = Vec::with_capacity(maze.len());
        let mut candidates: Vec<Point> = Vec::with_capacity(4);

        let first = maze.start();
        if let Some(c) = maze.cell_mut(first) {
            c.visited = true;
        }
        stack.push(first);

        while let Some(&current) = stack.last() {
            candidates.clear();
            candidates.extend(
                maze.grid_neighbors(current)
                    .filter(|n| maze.cell(*n).is_some_and(|c| !c.visited)),
            );

            if candidates.is_empty() {
                stack.pop();
                continue;
            }

            let next = candidates[self.rng.random_range(0..candidates.len())];
            if let Some(c) = maze.cell_mut(next) {
                c.visited = true;
            }
            if let Ok(true) = maze.carve(current, next) {
                carved += 1;
            }
            stack.push(next);
        }

        carved
    }

    /// Open up dead ends.
    ///
    /// Every cell that is a dead end when the pass starts gets, with
    /// probability `braiding_chance`, one of its remaining walls toward an
    /// in-grid neighbor removed. Cells that stopped being dead ends earlier
    /// in the pass are skipped. Returns the number of walls removed.
    ///
    /// Unlike a plain "pick any adjacent neighbor" rule, an already-open side
    /// is never chosen, so every braid that fires removes exactly one wall.
    pub fn braid(&mut self, maze: &mut Maze) -> usize {
        let dead_ends: Vec<Point> = maze
            .cells()
            .iter()
            .filter(|c| c.is_dead_end())
            .map(|c| c.pos)
            .collect();

        let mut opened = 0usize;
        let mut candidates: Vec<Point> = Vec::with_capacity(4);

        for p in dead_ends {
            if !self.rng.random_bool(self.config.braiding_chance.clamp(0.0, 1.0)) {
                continue;
            }
            if !maze.cell(p).is_some_and(|c| c.is_dead_end()) {
                continue;
            }

            candidates.clear();
            candidates.extend(
                maze.grid_neighbors(p)
                    .filter(|n| maze.has_wall_between(p, *n) == Ok(true)),
            );
            if candidates.is_empty() {
                continue;
            }

            let target = candidates[self.rng.random_range(0..candidates.len())];
            if let Ok(true) = maze.carve(p, target) {
                opened += 1;
            }
        }

        opened
    }

    /// Knock down walls at random.
    ///
    /// Makes `floor(len * random_connections_ratio)` attempts. Each picks a
    /// random cell, keeps each in-grid neighbor with probability
    /// `random_connection_chance`, and removes the wall toward one random
    /// survivor. Attempts may hit walls that are already open, so the return
    /// value (walls actually removed) can be smaller than the attempt count.
    pub fn add_random_connections(&mut self, maze: &mut Maze) -> usize {
        let attempts = (maze.len() as f64 * self.config.random_connections_ratio).floor() as usize;
        let chance = self.config.random_connection_chance.clamp(0.0, 1.0);
        let mut opened = 0usize;
        let mut candidates: Vec<Point> = Vec::with_capacity(4);

        for _ in 0..attempts {
            let p = maze.point(self.rng.random_range(0..maze.len()));

            candidates.clear();
            for n in maze.grid_neighbors(p) {
                if self.rng.random_bool(chance) {
                    candidates.push(n);
                }
            }
            if candidates.is_empty() {
                continue;
            }

            let target = candidates[self.rng.random_range(0..candidates.len())];
            if let Ok(true) = maze.carve(p, target) {
                opened += 1;
            }
        }

        opened
    }
}
