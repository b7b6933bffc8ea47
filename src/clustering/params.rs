use crate::hough::HoughBinning;
use serde::{Deserialize, Serialize};

/// Knobs of one clustering run.
///
/// - `n_workers`: size of the worker pool; `0` or `1` scans sequentially.
/// - `binning`: Hough digitization per angle.
/// - `nbins_theta`: number of rotation angles spanning `[−π, +π]`.
/// - `min_hits`: minimum population of a bin, and of a group after
///   deduplication, to become a track.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterParams {
    pub n_workers: usize,
    pub binning: HoughBinning,
    pub nbins_theta: usize,
    pub min_hits: usize,
}

impl Default for ClusterParams {
    fn default() -> Self {
        Self {
            n_workers: 1,
            binning: HoughBinning::new(200, 500),
            nbins_theta: 500,
            min_hits: 9,
        }
    }
}

impl ClusterParams {
    pub fn is_parallel(&self) -> bool {
        self.n_workers > 1
    }

    pub fn with_workers(mut self, n_workers: usize) -> Self {
        self.n_workers = n_workers;
        self
    }
}
