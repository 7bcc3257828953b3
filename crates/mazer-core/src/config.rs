//! The constants table handed to the generator and the solver.
//!
//! Nothing in the workspace reads configuration from globals; callers build a
//! [`Config`] (usually `Config::default()`) and pass the relevant section to
//! each constructor.

/// Complete configuration for generation, search and animation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    pub maze: MazeConfig,
    pub astar: AstarConfig,
    pub animation: AnimationConfig,
}

// ---------------------------------------------------------------------------
// MazeConfig
// ---------------------------------------------------------------------------

/// Grid sizing and post-processing parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MazeConfig {
    /// Nominal cell edge in viewport units at the reference size.
    pub base_cell_size: f64,
    /// Lower bound on both columns and rows.
    pub min_size: i32,
    /// Size slider value at which cells are `base_cell_size` wide.
    pub size_ratio: f64,
    /// Probability that a dead end gets opened up when braiding.
    pub braiding_chance: f64,
    /// Extra connections attempted, as a fraction of the cell count.
    /// Zero disables the pass.
    pub random_connections_ratio: f64,
    /// Probability that each neighbor survives the extra-connection filter.
    pub random_connection_chance: f64,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            base_cell_size: 20.0,
            min_size: 5,
            size_ratio: 30.0,
            braiding_chance: 0.7,
            random_connections_ratio: 0.05,
            random_connection_chance: 0.3,
        }
    }
}

impl MazeConfig {
    /// Grid shape for a viewport of `width` x `height` units and a size
    /// setting `size` (larger means more, smaller cells).
    ///
    /// Each dimension is clamped to at least `min_size`.
    pub fn dimensions(&self, width: f64, height: f64, size: u32) -> (i32, i32) {
        let scale = size as f64 / self.size_ratio;
        let cols = ((width / self.base_cell_size) * scale).floor() as i32;
        let rows = ((height / self.base_cell_size) * scale).floor() as i32;
        (cols.max(self.min_size), rows.max(self.min_size))
    }

    /// Largest square cell edge that fits `cols` x `rows` into the viewport.
    pub fn cell_size(&self, width: f64, height: f64, cols: i32, rows: i32) -> f64 {
        let w = width / cols.max(1) as f64;
        let h = height / rows.max(1) as f64;
        w.min(h)
    }
}

// ---------------------------------------------------------------------------
// AstarConfig
// ---------------------------------------------------------------------------

/// Heuristic and pruning parameters for the A* solver.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AstarConfig {
    /// Add the start-goal collinearity term to the heuristic.
    pub tie_breaking: bool,
    /// Weight of the collinearity term.
    pub tie_breaking_weight: f64,
    /// Maximum open-set size kept after each step. `None` disables pruning.
    pub beam_width: Option<usize>,
}

impl Default for AstarConfig {
    fn default() -> Self {
        Self {
            tie_breaking: true,
            tie_breaking_weight: 0.001,
            beam_width: Some(50),
        }
    }
}

impl AstarConfig {
    /// Plain A*: no beam pruning, so the path found is a shortest one.
    pub fn exhaustive() -> Self {
        Self {
            beam_width: None,
            ..Self::default()
        }
    }
}

// ---------------------------------------------------------------------------
// AnimationConfig
// ---------------------------------------------------------------------------

/// Pacing of the animated driver.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnimationConfig {
    /// Shortest delay between ticks, in milliseconds.
    pub min_interval_ms: u64,
    /// Longest delay between ticks, in milliseconds.
    pub max_interval_ms: u64,
    /// Speeds at or above this value solve synchronously.
    pub threshold_speed: u8,
    /// Steps per batch in the synchronous driver.
    pub instant_batch: usize,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            min_interval_ms: 1,
            max_interval_ms: 200,
            threshold_speed: 100,
            instant_batch: 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimensions_scale_with_size() {
        let cfg = MazeConfig::default();
        // 600 / 20 = 30 cells at the reference size.
        assert_eq!(cfg.dimensions(600.0, 400.0, 30), (30, 20));
        assert_eq!(cfg.dimensions(600.0, 400.0, 60), (60, 40));
        assert_eq!(cfg.dimensions(600.0, 400.0, 15), (15, 10));
    }

    #[test]
    fn dimensions_clamp_to_min_size() {
        let cfg = MazeConfig::default();
        assert_eq!(cfg.dimensions(600.0, 400.0, 1), (5, 5));
        assert_eq!(cfg.dimensions(0.0, 0.0, 30), (5, 5));
    }

    #[test]
    fn cell_size_fits_both_axes() {
        let cfg = MazeConfig::default();
        assert_eq!(cfg.cell_size(600.0, 400.0, 30, 20), 20.0);
        assert_eq!(cfg.cell_size(600.0, 400.0, 60, 10), 10.0);
    }

    #[test]
    fn exhaustive_disables_beam() {
        let cfg = AstarConfig::exhaustive();
        assert_eq!(cfg.beam_width, None);
        assert!(cfg.tie_breaking);
        assert_eq!(AstarConfig::default().beam_width, Some(50));
    }
}
