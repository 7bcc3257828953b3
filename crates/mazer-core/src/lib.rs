//! **mazer-core**: grid model shared by the maze generator and solver.
//!
//! A [`Maze`] is an arena of [`Cell`] values in row-major order. Each cell
//! carries a [`Walls`] mask recording which of its four sides are closed.
//! Everything else in the workspace addresses cells either by [`Point`] or by
//! their flat index `x + y * cols`.

pub mod cell;
pub mod config;
pub mod error;
pub mod geom;
pub mod maze;

pub use cell::{Cell, Walls};
pub use config::{AnimationConfig, AstarConfig, Config, MazeConfig};
pub use error::MazeError;
pub use geom::{Dir, Point};
pub use maze::Maze;
