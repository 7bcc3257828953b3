use mazer_core::{Maze, Point};

/// Minimal pathfinding interface: neighbor enumeration.
pub trait Pather {
    /// Append neighbors of `p` into `buf`. The caller clears `buf` before calling.
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>);
}

/// A maze is traversed through its open walls only.
impl Pather for Maze {
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        buf.extend(self.open_neighbors(p));
    }
}
