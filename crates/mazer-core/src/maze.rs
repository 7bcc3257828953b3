//! The [`Maze`] grid: an arena of cells addressed by flat index.

use crate::cell::{Cell, Walls};
use crate::error::MazeError;
use crate::geom::{Dir, Point};

/// A rectangular grid of [`Cell`]s stored in row-major order.
///
/// The start cell is always the top-left corner (index 0) and the end cell
/// the bottom-right corner (index `cols * rows - 1`).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Maze {
    cols: i32,
    rows: i32,
    cells: Vec<Cell>,
}

impl Maze {
    /// Create a fully walled grid of `cols` x `rows` cells.
    ///
    /// Fails before allocating anything if either dimension is not positive.
    pub fn new(cols: i32, rows: i32) -> Result<Self, MazeError> {
        if cols <= 0 || rows <= 0 {
            return Err(MazeError::InvalidDimensions { cols, rows });
        }
        let len = cols
            .checked_mul(rows)
            .ok_or(MazeError::InvalidDimensions { cols, rows })? as usize;

        let mut cells = Vec::with_capacity(len);
        for y in 0..rows {
            for x in 0..cols {
                cells.push(Cell::new(Point::new(x, y)));
            }
        }
        Ok(Self { cols, rows, cells })
    }

    #[inline]
    pub fn cols(&self) -> i32 {
        self.cols
    }

    #[inline]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false`: a maze has at least one cell.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Top-left cell.
    #[inline]
    pub fn start(&self) -> Point {
        Point::ZERO
    }

    /// Bottom-right cell.
    #[inline]
    pub fn end(&self) -> Point {
        Point::new(self.cols - 1, self.rows - 1)
    }

    // -----------------------------------------------------------------------
    // Coordinate helpers
    // -----------------------------------------------------------------------

    /// Whether `p` lies inside the grid.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && p.x < self.cols && p.y < self.rows
    }

    /// Flat index `x + y * cols`, or `None` if `p` is outside the grid.
    #[inline]
    pub fn idx(&self, p: Point) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        Some((p.x + p.y * self.cols) as usize)
    }

    /// Convert a flat index back to a `Point`.
    #[inline]
    pub fn point(&self, idx: usize) -> Point {
        let i = idx as i32;
        Point::new(i % self.cols, i / self.cols)
    }

    #[inline]
    pub fn cell(&self, p: Point) -> Option<&Cell> {
        let i = self.idx(p)?;
        Some(&self.cells[i])
    }

    #[inline]
    pub fn cell_mut(&mut self, p: Point) -> Option<&mut Cell> {
        let i = self.idx(p)?;
        Some(&mut self.cells[i])
    }

    /// Wall mask of the cell at `p`.
    #[inline]
    pub fn walls(&self, p: Point) -> Option<Walls> {
        self.cell(p).map(|c| c.walls)
    }

    /// Grid-adjacent neighbors of `p` in wall-mask order, ignoring walls.
    pub fn grid_neighbors(&self, p: Point) -> impl Iterator<Item = Point> + '_ {
        Dir::ALL
            .into_iter()
            .map(move |d| p.step(d))
            .filter(move |n| self.contains(*n))
    }

    /// Neighbors of `p` reachable through an open wall, in wall-mask order.
    pub fn open_neighbors(&self, p: Point) -> impl Iterator<Item = Point> + '_ {
        let walls = self.walls(p).unwrap_or(Walls::ALL);
        Dir::ALL
            .into_iter()
            .filter(move |d| !walls.has(*d))
            .map(move |d| p.step(d))
            .filter(move |n| self.contains(*n))
    }

    // -----------------------------------------------------------------------
    // Walls
    // -----------------------------------------------------------------------

    /// Whether a wall separates two adjacent cells.
    pub fn has_wall_between(&self, a: Point, b: Point) -> Result<bool, MazeError> {
        let d = a.dir_to(b).ok_or(MazeError::NotAdjacent(a, b))?;
        let walls = self.walls(a).ok_or(MazeError::OutOfBounds(a))?;
        if !self.contains(b) {
            return Err(MazeError::OutOfBounds(b));
        }
        Ok(walls.has(d))
    }

    /// Remove the wall pair between two adjacent cells.
    ///
    /// Both sides are cleared together so the masks stay symmetric. Returns
    /// `true` if a wall was actually standing.
    pub fn carve(&mut self, a: Point, b: Point) -> Result<bool, MazeError> {
        let d = a.dir_to(b).ok_or(MazeError::NotAdjacent(a, b))?;
        let ai = self.idx(a).ok_or(MazeError::OutOfBounds(a))?;
        let bi = self.idx(b).ok_or(MazeError::OutOfBounds(b))?;
        let was_closed = self.cells[ai].walls.has(d);
        self.cells[ai].walls.remove(d);
        self.cells[bi].walls.remove(d.opposite());
        Ok(was_closed)
    }

    /// Number of open passages (wall pairs removed) in the whole grid.
    ///
    /// Each passage is counted once, from its top or left cell.
    pub fn passage_count(&self) -> usize {
        self.cells
            .iter()
            .map(|c| {
                let right = c.pos.x + 1 < self.cols && !c.walls.has(Dir::Right);
                let down = c.pos.y + 1 < self.rows && !c.walls.has(Dir::Bottom);
                right as usize + down as usize
            })
            .sum()
    }

    /// Clear the carving scratch flag on every cell.
    pub fn reset_visited(&mut self) {
        for c in self.cells.iter_mut() {
            c.visited = false;
        }
    }
}
