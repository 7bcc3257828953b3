//! Drivers built on [`Solver::step`]: a synchronous batch loop and a paced,
//! cancellable [`Animator`].
//!
//! The animator never sleeps or spawns anything. Each [`Animator::tick`] runs
//! one batch of steps and returns a [`Frame`] to draw plus a [`Next`]
//! instruction; the host owns the timer and calls `tick` again after the
//! requested delay.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use mazer_core::{AnimationConfig, Maze, Point};

use crate::astar::{Solver, SolverState, Step};
use crate::error::SolveError;

// ---------------------------------------------------------------------------
// Speed / Pace
// ---------------------------------------------------------------------------

/// Animation speed on a 0–100 scale. Values above 100 are clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Speed(u8);

impl Speed {
    pub const MAX: Self = Self(100);

    pub fn new(value: u8) -> Self {
        Self(value.min(100))
    }

    #[inline]
    pub fn value(self) -> u8 {
        self.0
    }

    /// Whether this speed bypasses animation entirely.
    pub fn is_instant(self, cfg: &AnimationConfig) -> bool {
        self.0 >= cfg.threshold_speed
    }
}

/// How much work one animation tick does and how long to wait afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pace {
    /// Solver steps per tick.
    pub batch: usize,
    /// Delay before the next tick.
    pub delay: Duration,
}

impl Pace {
    pub fn for_speed(speed: Speed, cfg: &AnimationConfig) -> Self {
        Self {
            batch: Self::batch_size(speed),
            delay: Self::interval(speed, cfg),
        }
    }

    /// Steps per tick, from 1 at the slowest to 25 at the fastest.
    pub fn batch_size(speed: Speed) -> usize {
        match speed.value() {
            95..=u8::MAX => 25,
            80..=94 => 15,
            60..=79 => 8,
            40..=59 => 4,
            20..=39 => 2,
            _ => 1,
        }
    }

    /// Delay between ticks, interpolated linearly from `max_interval_ms` at
    /// speed 0 down to `min_interval_ms + 4` near full speed.
    pub fn interval(speed: Speed, cfg: &AnimationConfig) -> Duration {
        if speed.value() >= cfg.threshold_speed {
            return Duration::from_millis(cfg.min_interval_ms);
        }
        let normalized = speed.value() as f64 / 100.0;
        let interval = cfg.max_interval_ms as f64 * (1.0 - normalized);
        let floor = (cfg.min_interval_ms + 4) as f64;
        Duration::from_millis(interval.max(floor).round() as u64)
    }
}

// ---------------------------------------------------------------------------
// CancelToken
// ---------------------------------------------------------------------------

/// A cooperative-cancellation flag shared between the host and an
/// [`Animator`]. The animator checks it at the top of every tick.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    done: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether cancellation has been requested.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.done.load(Ordering::Relaxed)
    }

    /// Request cancellation.
    #[inline]
    pub fn cancel(&self) {
        self.done.store(true, Ordering::Relaxed);
    }
}

// ---------------------------------------------------------------------------
// Frame / Tick
// ---------------------------------------------------------------------------

/// Everything the renderer needs after a tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    /// Frontier (open set) cells.
    pub open: Vec<Point>,
    /// Settled (closed set) cells.
    pub closed: Vec<Point>,
    /// Best known path, goal (or current node) first, start last.
    pub path: Vec<Point>,
    pub finished: bool,
}

impl Frame {
    fn capture(solver: &Solver, step: Step) -> Self {
        Self {
            open: solver.open_cells(),
            closed: solver.closed_cells(),
            path: step.path,
            finished: step.finished,
        }
    }
}

/// What the host should do after drawing a tick's frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Next {
    /// Call [`Animator::tick`] again after this delay.
    After(Duration),
    /// The solve is over; the frame carries the final path.
    Finished,
    /// The solve was cancelled; no further steps will run.
    Cancelled,
}

/// Result of one [`Animator::tick`].
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub frame: Frame,
    pub next: Next,
}

// ---------------------------------------------------------------------------
// Animator
// ---------------------------------------------------------------------------

/// Drives a started [`Solver`] a batch at a time.
#[derive(Debug, Clone)]
pub struct Animator {
    pace: Pace,
    cancel: CancelToken,
}

impl Animator {
    pub fn new(speed: Speed, cfg: &AnimationConfig) -> Self {
        Self {
            pace: Pace::for_speed(speed, cfg),
            cancel: CancelToken::new(),
        }
    }

    #[inline]
    pub fn pace(&self) -> Pace {
        self.pace
    }

    /// A handle the host can use to stop the animation from elsewhere.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Run one batch of steps.
    ///
    /// If the token was cancelled, or the solver was aborted or reset
    /// behind the animator's back, the solver is left aborted and
    /// [`Next::Cancelled`] is returned without stepping.
    pub fn tick(&mut self, solver: &mut Solver, maze: &Maze) -> Result<Tick, SolveError> {
        if self.cancel.is_cancelled() {
            solver.abort();
        }
        match solver.state() {
            SolverState::Solving => {}
            SolverState::Solved => {
                let step = Step {
                    finished: true,
                    path: solver.solution().to_vec(),
                    current: None,
                };
                return Ok(Tick {
                    frame: Frame::capture(solver, step),
                    next: Next::Finished,
                });
            }
            SolverState::Idle | SolverState::Aborted => {
                return Ok(Tick {
                    frame: Frame::capture(solver, Step::default()),
                    next: Next::Cancelled,
                });
            }
        }

        let mut step = Step::default();
        for _ in 0..self.pace.batch {
            step = solver.step(maze)?;
            if step.finished {
                break;
            }
        }

        let next = if step.finished {
            Next::Finished
        } else {
            Next::After(self.pace.delay)
        };
        Ok(Tick {
            frame: Frame::capture(solver, step),
            next,
        })
    }
}

// ---------------------------------------------------------------------------
// Synchronous driver
// ---------------------------------------------------------------------------

/// How a solve started by [`Solver::run`] proceeds.
#[derive(Debug, Clone)]
pub enum Run {
    /// The speed was at or above the instant threshold; the solve already
    /// finished with this path (empty if the goal was unreachable).
    Finished(Vec<Point>),
    /// The host should drive this animator until it reports completion.
    Animating(Animator),
}

impl Solver {
    /// Start a solve and pick a driver for `speed`.
    pub fn run(
        &mut self,
        maze: &Maze,
        speed: Speed,
        cfg: &AnimationConfig,
    ) -> Result<Run, SolveError> {
        self.start(maze)?;
        if speed.is_instant(cfg) {
            let path = self.finish_instantly(maze, cfg.instant_batch)?;
            Ok(Run::Finished(path))
        } else {
            Ok(Run::Animating(Animator::new(speed, cfg)))
        }
    }

    /// Step a started solve to completion in batches of `batch` steps.
    pub fn finish_instantly(&mut self, maze: &Maze, batch: usize) -> Result<Vec<Point>, SolveError> {
        let batch = batch.max(1);
        loop {
            for _ in 0..batch {
                let step = self.step(maze)?;
                if step.finished {
                    return Ok(step.path);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mazer_core::{AstarConfig, MazeConfig};
    use mazer_gen::MazeGen;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn maze(seed: u64) -> Maze {
        let mut mg = MazeGen::new(MazeConfig::default(), StdRng::seed_from_u64(seed));
        mg.generate(10, 8, true).unwrap()
    }

    #[test]
    fn batch_sizes_grow_with_speed() {
        let sizes: Vec<usize> = [0, 19, 20, 40, 60, 80, 94, 95, 100]
            .into_iter()
            .map(|s| Pace::batch_size(Speed::new(s)))
            .collect();
        assert_eq!(sizes, vec![1, 1, 2, 4, 8, 15, 15, 25, 25]);
    }

    #[test]
    fn interval_is_bounded() {
        let cfg = AnimationConfig::default();
        assert_eq!(Pace::interval(Speed::new(0), &cfg), Duration::from_millis(200));
        assert_eq!(Pace::interval(Speed::new(50), &cfg), Duration::from_millis(100));
        assert_eq!(Pace::interval(Speed::new(99), &cfg), Duration::from_millis(5));
        assert_eq!(Pace::interval(Speed::MAX, &cfg), Duration::from_millis(1));
    }

    #[test]
    fn speed_is_clamped() {
        assert_eq!(Speed::new(250), Speed::MAX);
        assert!(Speed::new(100).is_instant(&AnimationConfig::default()));
        assert!(!Speed::new(99).is_instant(&AnimationConfig::default()));
    }

    #[test]
    fn instant_run_matches_stepping() {
        let m = maze(4);
        let cfg = AnimationConfig::default();

        let mut a = Solver::new(AstarConfig::default());
        let Run::Finished(path) = a.run(&m, Speed::MAX, &cfg).unwrap() else {
            panic!("speed 100 must solve instantly");
        };
        assert_eq!(a.state(), SolverState::Solved);

        let mut b = Solver::new(AstarConfig::default());
        b.start(&m).unwrap();
        let stepped = loop {
            let s = b.step(&m).unwrap();
            if s.finished {
                break s.path;
            }
        };
        assert_eq!(path, stepped);
        assert_eq!(a.stats(), b.stats());
    }

    #[test]
    fn animation_runs_to_completion() {
        let m = maze(9);
        let cfg = AnimationConfig::default();
        let mut solver = Solver::new(AstarConfig::default());
        let Run::Animating(mut anim) = solver.run(&m, Speed::new(30), &cfg).unwrap() else {
            panic!("speed 30 must animate");
        };
        assert_eq!(anim.pace().batch, 2);

        let mut ticks = 0;
        let final_frame = loop {
            let tick = anim.tick(&mut solver, &m).unwrap();
            ticks += 1;
            match tick.next {
                Next::After(delay) => {
                    assert_eq!(delay, Duration::from_millis(140));
                    assert!(!tick.frame.finished);
                    assert!(!tick.frame.closed.is_empty());
                }
                Next::Finished => break tick.frame,
                Next::Cancelled => panic!("not cancelled"),
            }
        };
        assert!(ticks > 1);
        assert!(final_frame.finished);
        assert_eq!(final_frame.path.as_slice(), solver.solution());

        // Ticking a finished solve just repeats the result.
        let again = anim.tick(&mut solver, &m).unwrap();
        assert_eq!(again.next, Next::Finished);
        assert_eq!(again.frame.path.as_slice(), solver.solution());
    }

    #[test]
    fn cancellation_stops_at_next_tick() {
        let m = maze(2);
        let cfg = AnimationConfig::default();
        let mut solver = Solver::new(AstarConfig::default());
        let Run::Animating(mut anim) = solver.run(&m, Speed::new(0), &cfg).unwrap() else {
            panic!("speed 0 must animate");
        };
        let first = anim.tick(&mut solver, &m).unwrap();
        assert!(matches!(first.next, Next::After(_)));
        let expanded = solver.stats().expansions;

        anim.cancel_token().cancel();
        let tick = anim.tick(&mut solver, &m).unwrap();
        assert_eq!(tick.next, Next::Cancelled);
        assert_eq!(solver.state(), SolverState::Aborted);
        assert_eq!(solver.stats().expansions, expanded);

        // The solver can be restarted after an abort.
        assert!(solver.start(&m).is_ok());
    }

    #[test]
    fn reset_behind_the_animator_cancels() {
        let m = maze(3);
        let cfg = AnimationConfig::default();
        let mut solver = Solver::new(AstarConfig::default());
        let Run::Animating(mut anim) = solver.run(&m, Speed::new(10), &cfg).unwrap() else {
            panic!("speed 10 must animate");
        };
        solver.reset();
        let tick = anim.tick(&mut solver, &m).unwrap();
        assert_eq!(tick.next, Next::Cancelled);
        assert!(tick.frame.open.is_empty());
    }

    #[test]
    fn run_rejects_reentrant_solve() {
        let m = maze(5);
        let cfg = AnimationConfig::default();
        let mut solver = Solver::new(AstarConfig::default());
        solver.run(&m, Speed::new(10), &cfg).unwrap();
        assert!(matches!(
            solver.run(&m, Speed::new(10), &cfg),
            Err(SolveError::AlreadySolving)
        ));
    }
}
