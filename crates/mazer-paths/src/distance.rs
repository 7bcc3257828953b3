use mazer_core::{AstarConfig, Point};

/// Manhattan (L1) distance between two points.
#[inline]
pub fn manhattan(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Chebyshev (L∞) distance between two points.
#[inline]
pub fn chebyshev(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs().max((a.y - b.y).abs())
}

/// Euclidean (L2) distance between two points.
#[inline]
pub fn euclidean(a: Point, b: Point) -> f64 {
    let dx = (a.x - b.x) as f64;
    let dy = (a.y - b.y) as f64;
    (dx * dx + dy * dy).sqrt()
}

/// Octile distance: diagonal steps cost √2, straight steps cost 1.
#[inline]
pub fn octile(a: Point, b: Point) -> f64 {
    let dx = (a.x - b.x).abs();
    let dy = (a.y - b.y).abs();
    dx.max(dy) as f64 + (std::f64::consts::SQRT_2 - 1.0) * dx.min(dy) as f64
}

/// The solver's heuristic: Manhattan distance to the goal plus a small
/// penalty for straying from the straight start-goal line.
///
/// The penalty is `|cross(node - goal, start - goal)| * weight`. With the
/// default weight of 0.001 it only separates nodes whose Manhattan estimates
/// tie.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Heuristic {
    pub start: Point,
    pub goal: Point,
    /// Collinearity weight; `None` gives plain Manhattan distance.
    pub weight: Option<f64>,
}

impl Heuristic {
    pub fn new(start: Point, goal: Point, cfg: &AstarConfig) -> Self {
        Self {
            start,
            goal,
            weight: cfg.tie_breaking.then_some(cfg.tie_breaking_weight),
        }
    }

    /// Estimated remaining cost from `p` to the goal.
    pub fn estimate(&self, p: Point) -> f64 {
        let h = manhattan(p, self.goal) as f64;
        match self.weight {
            Some(w) => {
                let cross = (p - self.goal).cross(self.start - self.goal);
                h + cross.abs() as f64 * w
            }
            None => h,
        }
    }
}
