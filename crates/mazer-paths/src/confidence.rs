//! Splitting an in-progress path into a "confirmed" and an "exploratory"
//! part, for drawing the two in different colours.
//!
//! This has no influence on the search itself.

use mazer_core::Point;

use crate::distance::manhattan;

const BASE_SPLIT: f64 = 0.65;
const PROGRESS_BONUS: f64 = 0.2;
const MAX_SHIFT: f64 = 0.1;

/// The two halves of a split path. They share the split cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathSplit {
    /// From the start up to and including the split cell.
    pub confirmed: Vec<Point>,
    /// From the split cell to the most recently expanded cell.
    pub exploration: Vec<Point>,
}

/// Stateful splitter that keeps the split point from jumping between frames.
#[derive(Debug, Clone, Default)]
pub struct PathSplitter {
    last_split: Option<usize>,
}

impl PathSplitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the previous split, e.g. when a new solve starts.
    pub fn reset(&mut self) {
        self.last_split = None;
    }

    /// Split `path`, ordered current-node-first and start-last as returned
    /// by [`Solver::step`](crate::Solver::step).
    ///
    /// The split sits at 65% of the path, pushed up to 20% further the closer
    /// the current node is to `goal`, and moves by at most 10% of the path
    /// length per call.
    pub fn split(&mut self, path: &[Point], goal: Point) -> PathSplit {
        if path.is_empty() {
            return PathSplit::default();
        }
        let at = self.split_index(path, goal);

        PathSplit {
            confirmed: path[at..].iter().rev().copied().collect(),
            exploration: path[..=at].iter().rev().copied().collect(),
        }
    }

    fn split_index(&mut self, path: &[Point], goal: Point) -> usize {
        let len = path.len();
        if len <= 2 {
            return len / 2;
        }

        let base = (len as f64 * BASE_SPLIT).floor();
        let bonus = len as f64 * progress(path, goal) * PROGRESS_BONUS;
        let target = (base + bonus).floor() as usize;

        let smoothed = match self.last_split {
            Some(last) => {
                let max_change = ((len as f64 * MAX_SHIFT).floor() as usize).max(1);
                if target.abs_diff(last) <= max_change {
                    target
                } else if target > last {
                    last + max_change
                } else {
                    last - max_change
                }
            }
            None => target,
        };
        self.last_split = Some(smoothed);

        smoothed.clamp(1, len - 1)
    }
}

/// Fraction of the start-to-goal Manhattan distance already covered by the
/// head of `path`, in `[0, 1]`.
fn progress(path: &[Point], goal: Point) -> f64 {
    let (Some(&current), Some(&start)) = (path.first(), path.last()) else {
        return 0.0;
    };
    if path.len() < 2 {
        return 0.0;
    }
    let initial = manhattan(start, goal);
    if initial == 0 {
        return 1.0;
    }
    let remaining = manhattan(current, goal);
    ((initial - remaining) as f64 / initial as f64).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A straight path along row 0 from (0, 0) to (n - 1, 0), current first.
    fn straight(n: i32) -> Vec<Point> {
        (0..n).rev().map(|x| Point::new(x, 0)).collect()
    }

    #[test]
    fn empty_and_tiny_paths() {
        let mut s = PathSplitter::new();
        assert_eq!(s.split(&[], Point::ZERO), PathSplit::default());

        let one = [Point::ZERO];
        let split = s.split(&one, Point::new(3, 0));
        assert_eq!(split.confirmed, vec![Point::ZERO]);
        assert_eq!(split.exploration, vec![Point::ZERO]);

        let two = straight(2);
        let split = s.split(&two, Point::new(3, 0));
        assert_eq!(split.confirmed, vec![Point::new(0, 0)]);
        assert_eq!(split.exploration, vec![Point::new(0, 0), Point::new(1, 0)]);
    }

    #[test]
    fn halves_share_the_split_cell() {
        let path = straight(20);
        let goal = Point::new(39, 0);
        let split = PathSplitter::new().split(&path, goal);
        assert_eq!(split.confirmed.first(), Some(&Point::new(0, 0)));
        assert_eq!(split.exploration.last(), Some(&Point::new(19, 0)));
        assert_eq!(split.confirmed.last(), split.exploration.first());
        assert_eq!(split.confirmed.len() + split.exploration.len(), path.len() + 1);
    }

    #[test]
    fn split_index_follows_progress() {
        // No progress: the split sits at 65% of the path.
        let path = straight(20);
        let mut s = PathSplitter::new();
        // The head is no closer to the goal than the start was.
        assert_eq!(s.split_index(&path, Point::new(9, 30)), 13);

        // Half way to the goal: 13 + floor(20 * 0.5 * 0.2) = 15.
        let mut s = PathSplitter::new();
        assert_eq!(s.split_index(&path, Point::new(38, 0)), 15);

        // At the goal: 13 + 4 = 17.
        let mut s = PathSplitter::new();
        assert_eq!(s.split_index(&path, Point::new(19, 0)), 17);
    }

    #[test]
    fn split_moves_gradually() {
        let mut s = PathSplitter::new();
        let short = straight(10);
        let first = s.split_index(&short, Point::new(9, 30));
        assert_eq!(first, 6);

        // The path suddenly grows: the raw target jumps to 65 but the split
        // may only move 10% of the new length per call.
        let long = straight(100);
        assert_eq!(s.split_index(&long, Point::new(49, 300)), 16);
        assert_eq!(s.split_index(&long, Point::new(49, 300)), 26);

        s.reset();
        assert_eq!(s.split_index(&long, Point::new(49, 300)), 65);
    }
}
