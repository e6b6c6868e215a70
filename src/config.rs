//! Configuration surface for the scan pipeline
//!
//! The many scanner variants this crate serves differ only in the
//! configuration they pass in: region partitioning, cadence and duplicate
//! handling are all policy, not hard-coded behavior.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Hard cap on the grid partition dimension (a 10×10 grid is already 100
/// decode attempts per pass)
pub const MAX_GRID_SIZE: u32 = 10;

/// A family of candidate regions to scan each frame
///
/// Strategies are combinable; the full frame is always scanned regardless of
/// what else is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RegionStrategy {
    /// The whole frame (always implied)
    Full,
    /// Top/bottom and left/right half splits
    Halves,
    /// Four equal quarter regions
    Quadrants,
    /// N×N grid of cells, N from [`ScanConfig::grid_size`]
    Grid,
    /// Full-frame resamples at the configured scale factors
    MultiScale,
}

/// How repeats of already-seen content are handled across frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DuplicatePolicy {
    /// Drop repeats: each text is reported at most once per session
    Skip,
    /// Report every occurrence; the caller tags duplicates itself
    Allow,
    /// Report repeats with the duplicate flag set for the display layer
    Warn,
}

/// Tunable policy for one scanning session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScanConfig {
    /// Region families to scan each frame
    pub strategies: Vec<RegionStrategy>,
    /// Grid dimension when [`RegionStrategy::Grid`] is enabled (capped at
    /// [`MAX_GRID_SIZE`] when the plan is built)
    pub grid_size: u32,
    /// Scale factors when [`RegionStrategy::MultiScale`] is enabled; 1.0 is
    /// skipped as redundant with the full-frame pass
    pub scale_factors: Vec<f32>,
    /// Minimum wall-clock interval between detection passes, in milliseconds
    pub cadence_ms: u64,
    /// Cross-frame duplicate handling
    pub duplicate_policy: DuplicatePolicy,
    /// Auto-stop after this many distinct results (`None` = unbounded)
    pub max_results: Option<usize>,
    /// Regions smaller than this on either side are skipped before decoding
    pub min_region_px: u32,
    /// Fan region decodes out across the rayon thread pool
    pub parallel: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            strategies: vec![
                RegionStrategy::Full,
                RegionStrategy::Halves,
                RegionStrategy::Quadrants,
            ],
            grid_size: 3,
            scale_factors: vec![0.5, 0.75, 1.25, 1.5],
            cadence_ms: 200,
            duplicate_policy: DuplicatePolicy::Skip,
            max_results: None,
            min_region_px: 50,
            parallel: false,
        }
    }
}

impl ScanConfig {
    /// The cadence interval as a [`Duration`]
    pub fn cadence(&self) -> Duration {
        Duration::from_millis(self.cadence_ms)
    }

    /// Check whether a region strategy is enabled
    pub fn has_strategy(&self, strategy: RegionStrategy) -> bool {
        self.strategies.contains(&strategy)
    }

    /// Derive a grid dimension from the number of codes expected in the scene
    ///
    /// Uses `ceil(sqrt(n))` so an N-code scene gets roughly one cell per code,
    /// capped at [`MAX_GRID_SIZE`].
    pub fn grid_for_expected_codes(expected: u32) -> u32 {
        let n = (expected.max(1) as f64).sqrt().ceil() as u32;
        n.clamp(1, MAX_GRID_SIZE)
    }
}
