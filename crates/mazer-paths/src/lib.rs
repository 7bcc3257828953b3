//! Maze solving for the mazer workspace.
//!
//! The centrepiece is [`Solver`], an A* search that advances one node
//! expansion per [`Solver::step`] so a host can animate it. It keeps its open
//! set in a [`ScoreHeap`], scores nodes with a Manhattan heuristic biased
//! toward the straight start-goal line, and optionally caps the open set to
//! the best `beam_width` nodes after every step.
//!
//! | Item | Purpose |
//! |---|---|
//! | [`ScoreHeap`] | min-heap ordered by a caller-supplied score function |
//! | [`Heuristic`] | biased Manhattan estimate used by the solver |
//! | [`DistanceMap`] | exact BFS distances, for verification and statistics |
//! | [`Animator`] | paced, cancellable driver built on `Solver::step` |
//! | [`PathSplitter`] | confirmed/exploratory split of an in-progress path |

mod animate;
mod astar;
mod bfs;
mod confidence;
mod distance;
mod error;
mod heap;
mod traits;

pub use animate::{Animator, CancelToken, Frame, Next, Pace, Run, Speed, Tick};
pub use astar::{SearchStats, Solver, SolverState, Step};
pub use bfs::{DistanceMap, UNREACHABLE, shortest_distance};
pub use confidence::{PathSplit, PathSplitter};
pub use distance::{Heuristic, chebyshev, euclidean, manhattan, octile};
pub use error::SolveError;
pub use heap::ScoreHeap;
pub use traits::Pather;
