use std::fmt;

use crate::geom::Point;

/// Errors raised while building or editing a [`Maze`](crate::Maze).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MazeError {
    /// Columns or rows were not positive, or their product overflows.
    InvalidDimensions { cols: i32, rows: i32 },
    /// A coordinate fell outside the grid.
    OutOfBounds(Point),
    /// Walls can only be removed between orthogonal neighbors.
    NotAdjacent(Point, Point),
}

impl fmt::Display for MazeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions { cols, rows } => {
                write!(f, "maze: invalid dimensions {cols}x{rows}")
            }
            Self::OutOfBounds(p) => write!(f, "maze: point {p} is out of bounds"),
            Self::NotAdjacent(a, b) => write!(f, "maze: cells {a} and {b} are not adjacent"),
        }
    }
}

impl std::error::Error for MazeError {}
