//! A maze [`Cell`] and its [`Walls`] mask.

use crate::geom::{Dir, Point};

/// Four-bit record of which sides of a cell are closed.
///
/// Bit `i` corresponds to [`Dir::ALL`]`[i]`; a set bit means the wall is
/// present.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Walls(u8);

impl Walls {
    /// Every side closed, the state of a freshly created cell.
    pub const ALL: Self = Self(0b1111);
    /// Every side open.
    pub const NONE: Self = Self(0);

    /// Whether the wall on side `d` is present.
    #[inline]
    pub const fn has(self, d: Dir) -> bool {
        self.0 & (1 << d.index()) != 0
    }

    /// Knock down the wall on side `d`.
    #[inline]
    pub fn remove(&mut self, d: Dir) {
        self.0 &= !(1 << d.index());
    }

    /// Number of walls still standing.
    #[inline]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// The mask as `[top, right, bottom, left]`.
    pub fn to_array(self) -> [bool; 4] {
        Dir::ALL.map(|d| self.has(d))
    }
}

impl Default for Walls {
    fn default() -> Self {
        Self::ALL
    }
}

/// A single grid cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub pos: Point,
    pub walls: Walls,
    /// Scratch flag for the carving pass.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub visited: bool,
}

impl Cell {
    /// A fully walled, unvisited cell at `pos`.
    pub const fn new(pos: Point) -> Self {
        Self {
            pos,
            walls: Walls::ALL,
            visited: false,
        }
    }

    pub fn wall_count(&self) -> u32 {
        self.walls.count()
    }

    /// A dead end has exactly one open side.
    pub fn is_dead_end(&self) -> bool {
        self.wall_count() == 3
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn cell_skips_visited_flag() {
        let mut c = Cell::new(Point::new(1, 1));
        c.visited = true;
        c.walls.remove(Dir::Left);
        let json = serde_json::to_string(&c).unwrap();
        let back: Cell = serde_json::from_str(&json).unwrap();
        assert_eq!(back.pos, c.pos);
        assert_eq!(back.walls, c.walls);
        assert!(!back.visited);
    }
}
