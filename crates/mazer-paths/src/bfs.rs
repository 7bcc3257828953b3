use std::collections::VecDeque;

use mazer_core::{Maze, Point};

use crate::traits::Pather;

/// Sentinel distance for cells the last search did not reach.
pub const UNREACHABLE: i32 = i32::MAX;

/// Unweighted breadth-first distances from a single source.
///
/// This is the exact reference the A* solver is checked against, and the
/// connectivity test for generated mazes: a maze is fully connected iff
/// [`reached`](Self::reached) equals its cell count.
#[derive(Debug, Clone)]
pub struct DistanceMap {
    cols: i32,
    rows: i32,
    dist: Vec<i32>,
    queue: VecDeque<usize>,
    reached: usize,
}

impl DistanceMap {
    /// Create an empty map for a `cols` x `rows` grid.
    pub fn new(cols: i32, rows: i32) -> Self {
        let len = (cols.max(0) * rows.max(0)) as usize;
        Self {
            cols,
            rows,
            dist: vec![UNREACHABLE; len],
            queue: VecDeque::new(),
            reached: 0,
        }
    }

    fn idx(&self, p: Point) -> Option<usize> {
        if p.x < 0 || p.y < 0 || p.x >= self.cols || p.y >= self.rows {
            return None;
        }
        Some((p.x + p.y * self.cols) as usize)
    }

    fn point(&self, idx: usize) -> Point {
        let i = idx as i32;
        Point::new(i % self.cols, i / self.cols)
    }

    /// Fill the map with step counts from `source`.
    ///
    /// Returns the number of cells reached, including the source. A source
    /// outside the grid reaches nothing.
    pub fn compute<P: Pather>(&mut self, pather: &P, source: Point) -> usize {
        for v in self.dist.iter_mut() {
            *v = UNREACHABLE;
        }
        self.queue.clear();
        self.reached = 0;

        let Some(si) = self.idx(source) else {
            return 0;
        };
        self.dist[si] = 0;
        self.queue.push_back(si);
        self.reached = 1;

        let mut nbuf = Vec::with_capacity(4);

        while let Some(ci) = self.queue.pop_front() {
            let nd = self.dist[ci] + 1;
            nbuf.clear();
            pather.neighbors(self.point(ci), &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                if self.dist[ni] != UNREACHABLE {
                    continue;
                }
                self.dist[ni] = nd;
                self.queue.push_back(ni);
                self.reached += 1;
            }
        }

        self.reached
    }

    /// Distance at `p`, or [`UNREACHABLE`].
    pub fn at(&self, p: Point) -> i32 {
        match self.idx(p) {
            Some(i) => self.dist[i],
            None => UNREACHABLE,
        }
    }

    /// Cells reached by the last [`compute`](Self::compute).
    pub fn reached(&self) -> usize {
        self.reached
    }
}

/// Length in steps of the shortest passage route between two cells.
pub fn shortest_distance(maze: &Maze, from: Point, to: Point) -> Option<i32> {
    let mut map = DistanceMap::new(maze.cols(), maze.rows());
    map.compute(maze, from);
    match map.at(to) {
        UNREACHABLE => None,
        d => Some(d),
    }
}
