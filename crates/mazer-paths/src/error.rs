use std::fmt;

use crate::astar::SolverState;

/// Errors returned by [`Solver`](crate::Solver) and its drivers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    /// A solve is already running; abort or reset it first.
    AlreadySolving,
    /// `step` was called while the solver was not solving.
    NotSolving(SolverState),
    /// The maze passed to `step` is not the one the solve started on.
    MazeMismatch {
        expected: (i32, i32),
        found: (i32, i32),
    },
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadySolving => f.write_str("solver: a solve is already in progress"),
            Self::NotSolving(state) => write!(f, "solver: cannot step while {state:?}"),
            Self::MazeMismatch { expected, found } => write!(
                f,
                "solver: maze is {}x{}, search was started on {}x{}",
                found.0, found.1, expected.0, expected.1
            ),
        }
    }
}

impl std::error::Error for SolveError {}
