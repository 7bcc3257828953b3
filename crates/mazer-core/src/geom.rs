//! Geometry primitives: [`Point`] and the four cardinal [`Dir`]ections.

use std::fmt;
use std::ops::{Add, Sub};

// ---------------------------------------------------------------------------
// Point
// ---------------------------------------------------------------------------

/// A 2D integer cell coordinate. X grows right, Y grows down.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Origin (0, 0).
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// Create a new point.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The point one cell away in direction `d`.
    #[inline]
    pub const fn step(self, d: Dir) -> Self {
        let (dx, dy) = d.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// The direction leading from `self` to an orthogonally adjacent `other`,
    /// or `None` if the two points are not adjacent.
    pub fn dir_to(self, other: Point) -> Option<Dir> {
        match (other.x - self.x, other.y - self.y) {
            (0, -1) => Some(Dir::Top),
            (1, 0) => Some(Dir::Right),
            (0, 1) => Some(Dir::Bottom),
            (-1, 0) => Some(Dir::Left),
            _ => None,
        }
    }

    /// 2D cross product of the vectors `self` and `other`.
    #[inline]
    pub const fn cross(self, other: Point) -> i32 {
        self.x * other.y - other.x * self.y
    }
}

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Point {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.y.cmp(&other.y).then(self.x.cmp(&other.x))
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Add for Point {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

// ---------------------------------------------------------------------------
// Dir
// ---------------------------------------------------------------------------

/// One of the four sides of a cell, in wall-mask order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Dir {
    Top = 0,
    Right = 1,
    Bottom = 2,
    Left = 3,
}

impl Dir {
    /// All directions in mask order: top, right, bottom, left.
    pub const ALL: [Dir; 4] = [Dir::Top, Dir::Right, Dir::Bottom, Dir::Left];

    /// Position of this side in the wall mask.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Unit offset `(dx, dy)` toward the neighbor on this side.
    #[inline]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Dir::Top => (0, -1),
            Dir::Right => (1, 0),
            Dir::Bottom => (0, 1),
            Dir::Left => (-1, 0),
        }
    }

    /// The side facing back from the neighbor.
    #[inline]
    pub const fn opposite(self) -> Dir {
        match self {
            Dir::Top => Dir::Bottom,
            Dir::Right => Dir::Left,
            Dir::Bottom => Dir::Top,
            Dir::Left => Dir::Right,
        }
    }
}
