//! Maze generation for mazer: a randomized depth-first carver followed by
//! optional braiding and random extra connections.

pub mod generator;

pub use generator::MazeGen;
