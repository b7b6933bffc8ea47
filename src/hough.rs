//! Hough-transform voting over detector hits.
//!
//! Overview
//! - Every hit is described in cylindrical coordinates `(r, phi, z)`.
//! - For a trial rotation angle `theta` each hit votes into the plane
//!   `r0inv = 2·cos(phi − theta)/r`, `gamma = z/r`. For a helix through the
//!   origin whose circle centre lies along `theta`, `r0inv` is the inverse
//!   circle radius for every hit, and `gamma` is the track's slope in `z/r`, so
//!   hits of one particle collapse into one bin.
//! - Both coordinates are digitized over fixed tuned ranges, combined into a
//!   single key, and bins touching the range edges are discarded.
//!
//! Modules
//! - [`digitize`] – linear binning with leftmost-insertion semantics.
//! - `engine` – the per-hit-set [`HoughEngine`].

pub mod digitize;
mod engine;

pub use engine::HoughEngine;

use serde::{Deserialize, Serialize};

/// Hit indices that shared one bin at one angle, ascending.
pub type CandidateGroup = Vec<usize>;

/// Tuned `r0inv` range (inverse millimetres).
pub const R0INV_RANGE: (f64, f64) = (-0.02, 0.02);
/// Tuned `gamma = z/r` range.
pub const GAMMA_RANGE: (f64, f64) = (-50.0, 50.0);
pub const DEFAULT_R0INV_BINS: usize = 200;
pub const DEFAULT_GAMMA_BINS: usize = 100;
/// Multiplier of the gamma bin inside the combined key.
pub const COMBO_BASE: u64 = 100_000;

/// Number of boundaries used to digitize each Hough coordinate.
///
/// A zero count selects the corresponding default.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoughBinning {
    pub nbins_r0inv: usize,
    pub nbins_gamma: usize,
}

impl Default for HoughBinning {
    fn default() -> Self {
        Self {
            nbins_r0inv: DEFAULT_R0INV_BINS,
            nbins_gamma: DEFAULT_GAMMA_BINS,
        }
    }
}

impl HoughBinning {
    pub fn new(nbins_r0inv: usize, nbins_gamma: usize) -> Self {
        Self {
            nbins_r0inv,
            nbins_gamma,
        }
    }

    /// Replaces zero counts by the defaults.
    pub fn resolved(&self) -> Self {
        Self {
            nbins_r0inv: if self.nbins_r0inv == 0 {
                DEFAULT_R0INV_BINS
            } else {
                self.nbins_r0inv
            },
            nbins_gamma: if self.nbins_gamma == 0 {
                DEFAULT_GAMMA_BINS
            } else {
                self.nbins_gamma
            },
        }
    }

    /// Checks that no bin index can alias inside the combined key.
    pub fn validate(&self) -> Result<(), String> {
        let r = self.resolved();
        for (name, n) in [("nbins_r0inv", r.nbins_r0inv), ("nbins_gamma", r.nbins_gamma)] {
            if n as u64 >= COMBO_BASE {
                return Err(format!(
                    "{name}={n} must be below the combo key base {COMBO_BASE}"
                ));
            }
        }
        Ok(())
    }
}

/// `n` rotation angles evenly spaced over `[−π, +π]`, both ends included.
pub fn theta_scan(n: usize) -> Vec<f64> {
    digitize::linspace(n, -std::f64::consts::PI, std::f64::consts::PI)
}
