//! Incremental A* over a [`Maze`].
//!
//! The search advances one node expansion per [`Solver::step`]. All search
//! state lives in flat tables indexed by cell index (`x + y * cols`), created
//! fresh by [`Solver::start`] and dropped by [`Solver::reset`].

use mazer_core::{AstarConfig, Maze, Point};

use crate::bfs::UNREACHABLE;
use crate::distance::Heuristic;
use crate::error::SolveError;
use crate::heap::ScoreHeap;
use crate::traits::Pather;

const NO_PARENT: usize = usize::MAX;

/// Lifecycle of a [`Solver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolverState {
    /// No search allocated.
    Idle,
    /// A search is in progress; [`Solver::step`] may be called.
    Solving,
    /// The search ended, either at the goal or by exhausting the open set.
    Solved,
    /// The search was cancelled before it finished.
    Aborted,
}

/// Outcome of a single [`Solver::step`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Step {
    /// The search has reached a terminal state.
    pub finished: bool,
    /// Best known path, ordered from the most recently expanded node (the
    /// goal, once found) back to the start. Empty when the goal is
    /// unreachable.
    pub path: Vec<Point>,
    /// The node expanded by this step.
    pub current: Option<Point>,
}

/// Work counters for the current solve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchStats {
    /// Nodes popped from the open set.
    pub expansions: usize,
    /// Neighbor relaxations attempted.
    pub computations: usize,
}

/// Steppable A* search with beam pruning.
///
/// Beam pruning (`AstarConfig::beam_width`) keeps only the best-scored
/// nodes after each step. It bounds the work per step but may discard the
/// frontier of the true shortest path, in which case the solver returns a
/// longer path or none at all. Use [`AstarConfig::exhaustive`] for
/// guaranteed shortest paths.
#[derive(Debug, Clone)]
pub struct Solver {
    config: AstarConfig,
    state: SolverState,
    cols: i32,
    rows: i32,
    start: usize,
    goal: usize,
    heuristic: Heuristic,
    open: ScoreHeap<usize>,
    in_open: Vec<bool>,
    closed: Vec<bool>,
    closed_order: Vec<usize>,
    came_from: Vec<usize>,
    g_score: Vec<i32>,
    f_score: Vec<f64>,
    solution: Vec<Point>,
    stats: SearchStats,
    nbuf: Vec<Point>,
}

impl Solver {
    /// Create an idle solver.
    pub fn new(config: AstarConfig) -> Self {
        Self {
            config,
            state: SolverState::Idle,
            cols: 0,
            rows: 0,
            start: 0,
            goal: 0,
            heuristic: Heuristic::new(Point::ZERO, Point::ZERO, &config),
            open: ScoreHeap::new(),
            in_open: Vec::new(),
            closed: Vec::new(),
            closed_order: Vec::new(),
            came_from: Vec::new(),
            g_score: Vec::new(),
            f_score: Vec::new(),
            solution: Vec::new(),
            stats: SearchStats::default(),
            nbuf: Vec::with_capacity(4),
        }
    }

    #[inline]
    pub fn config(&self) -> &AstarConfig {
        &self.config
    }

    #[inline]
    pub fn state(&self) -> SolverState {
        self.state
    }

    #[inline]
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Final path (goal to start) once the solver is [`SolverState::Solved`].
    /// Empty if the goal was unreachable or no solve has finished.
    #[inline]
    pub fn solution(&self) -> &[Point] {
        &self.solution
    }

    /// Begin a new search from `maze.start()` to `maze.end()`.
    ///
    /// Rejected with [`SolveError::AlreadySolving`] while a search is active;
    /// call [`abort`](Self::abort) or [`reset`](Self::reset) first. Any
    /// finished or aborted search state is replaced.
    pub fn start(&mut self, maze: &Maze) -> Result<(), SolveError> {
        if self.state == SolverState::Solving {
            return Err(SolveError::AlreadySolving);
        }

        let len = maze.len();
        self.cols = maze.cols();
        self.rows = maze.rows();
        self.start = maze.idx(maze.start()).unwrap_or(0);
        self.goal = maze.idx(maze.end()).unwrap_or(len - 1);
        self.heuristic = Heuristic::new(maze.start(), maze.end(), &self.config);

        self.open = ScoreHeap::new();
        self.in_open = vec![false; len];
        self.closed = vec![false; len];
        self.closed_order.clear();
        self.came_from = vec![NO_PARENT; len];
        self.g_score = vec![UNREACHABLE; len];
        self.f_score = vec![f64::INFINITY; len];
        self.solution.clear();
        self.stats = SearchStats::default();

        let s = self.start;
        self.g_score[s] = 0;
        self.f_score[s] = self.heuristic.estimate(maze.start());
        let f = &self.f_score;
        self.open.push(s, |&i| f[i]);
        self.in_open[s] = true;

        self.state = SolverState::Solving;
        log::debug!(
            "solve started on {}x{} maze, beam width {:?}",
            self.cols,
            self.rows,
            self.config.beam_width
        );
        Ok(())
    }

    /// Expand one node.
    ///
    /// `maze` must be the maze passed to [`start`](Self::start); it is only
    /// read. Once the returned step is `finished` the solver is
    /// [`SolverState::Solved`] and further calls fail with
    /// [`SolveError::NotSolving`].
    pub fn step(&mut self, maze: &Maze) -> Result<Step, SolveError> {
        if self.state != SolverState::Solving {
            return Err(SolveError::NotSolving(self.state));
        }
        if (maze.cols(), maze.rows()) != (self.cols, self.rows) {
            return Err(SolveError::MazeMismatch {
                expected: (self.cols, self.rows),
                found: (maze.cols(), maze.rows()),
            });
        }

        let popped = {
            let f = &self.f_score;
            self.open.pop(|&i| f[i])
        };
        let Some(ci) = popped else {
            // Open set exhausted: the goal cannot be reached.
            self.finish(Vec::new());
            return Ok(Step {
                finished: true,
                path: Vec::new(),
                current: None,
            });
        };
        self.in_open[ci] = false;
        self.stats.expansions += 1;

        let current = maze.point(ci);
        if ci == self.goal {
            let path = self.path_from(ci);
            self.finish(path.clone());
            return Ok(Step {
                finished: true,
                path,
                current: Some(current),
            });
        }

        self.closed[ci] = true;
        self.closed_order.push(ci);

        let mut nbuf = std::mem::take(&mut self.nbuf);
        nbuf.clear();
        maze.neighbors(current, &mut nbuf);
        let h = self.heuristic;
        nbuf.sort_by(|a, b| h.estimate(*a).total_cmp(&h.estimate(*b)));

        let tentative_g = self.g_score[ci] + 1;
        for &np in nbuf.iter() {
            self.stats.computations += 1;
            let Some(ni) = maze.idx(np) else {
                continue;
            };
            if self.closed[ni] || tentative_g >= self.g_score[ni] {
                continue;
            }

            self.came_from[ni] = ci;
            self.g_score[ni] = tentative_g;
            self.f_score[ni] = tentative_g as f64 + h.estimate(np);

            let f = &self.f_score;
            if self.in_open[ni] {
                self.open.rescore(&ni, |&i| f[i]);
            } else {
                self.open.push(ni, |&i| f[i]);
                self.in_open[ni] = true;
            }
        }
        self.nbuf = nbuf;

        if let Some(width) = self.config.beam_width {
            if self.open.size() > width {
                self.prune(width);
            }
        }

        Ok(Step {
            finished: false,
            path: self.path_from(ci),
            current: Some(current),
        })
    }

    /// Cancel an active search. Returns `false` if nothing was running.
    pub fn abort(&mut self) -> bool {
        if self.state != SolverState::Solving {
            return false;
        }
        self.state = SolverState::Aborted;
        log::debug!(
            "solve aborted after {} node expansions",
            self.stats.expansions
        );
        true
    }

    /// Drop all search state and return to [`SolverState::Idle`].
    pub fn reset(&mut self) {
        let config = self.config;
        *self = Self::new(config);
    }

    /// Cells currently in the open set (the frontier), in heap order.
    pub fn open_cells(&self) -> Vec<Point> {
        self.open
            .as_slice()
            .iter()
            .map(|&i| self.point(i))
            .collect()
    }

    /// Settled cells, in the order they were closed.
    pub fn closed_cells(&self) -> Vec<Point> {
        self.closed_order.iter().map(|&i| self.point(i)).collect()
    }

    /// Best known cost from the start to `p`, if `p` has been reached.
    pub fn g_at(&self, p: Point) -> Option<i32> {
        let i = self.idx(p)?;
        match self.g_score.get(i) {
            Some(&g) if g != UNREACHABLE => Some(g),
            _ => None,
        }
    }

    #[inline]
    fn idx(&self, p: Point) -> Option<usize> {
        if p.x < 0 || p.y < 0 || p.x >= self.cols || p.y >= self.rows {
            return None;
        }
        Some((p.x + p.y * self.cols) as usize)
    }

    #[inline]
    fn point(&self, idx: usize) -> Point {
        let i = idx as i32;
        Point::new(i % self.cols, i / self.cols)
    }

    /// Follow `came_from` links from `ci` back to the start.
    fn path_from(&self, mut ci: usize) -> Vec<Point> {
        let mut path = Vec::new();
        while ci != NO_PARENT {
            path.push(self.point(ci));
            ci = self.came_from[ci];
        }
        path
    }

    /// Keep only the `width` lowest-scored open nodes.
    fn prune(&mut self, width: usize) {
        let f = &self.f_score;
        let mut nodes = std::mem::take(&mut self.open).into_vec();
        nodes.sort_by(|a, b| f[*a].total_cmp(&f[*b]));

        for &i in &nodes[width..] {
            self.in_open[i] = false;
        }
        log::trace!("beam pruned {} open nodes", nodes.len() - width);
        nodes.truncate(width);

        for i in nodes {
            self.open.push(i, |&i| f[i]);
        }
    }

    fn finish(&mut self, path: Vec<Point>) {
        self.state = SolverState::Solved;
        if path.is_empty() {
            log::debug!(
                "A*: goal unreachable after {} node expansions, {} total computations",
                self.stats.expansions,
                self.stats.computations
            );
        } else {
            log::debug!(
                "A*: path of {} cells, {} node expansions, {} total computations",
                path.len(),
                self.stats.expansions,
                self.stats.computations
            );
        }
        self.solution = path;
    }
}
