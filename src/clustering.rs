//! Angle scan orchestration and label resolution.
//!
//! A [`Clusterer`] evaluates the Hough engine at `nbins_theta` rotation angles
//! spanning `[−π, +π]`, either on the calling thread or on a fixed pool of
//! workers that pull angles from a shared queue. Candidate groups are
//! concatenated in ascending angle order (so both modes produce identical
//! output) and resolved greedily into one label per hit.
//!
//! Modules
//! - [`params`] – [`ClusterParams`].
//! - [`resolve`] – first-claim-wins deduplication.
//! - `sequential` / `parallel` – the two scan strategies.

pub mod params;
mod parallel;
pub mod resolve;
mod sequential;

pub use params::ClusterParams;
pub use resolve::{resolve_labels, Resolution};

use crate::diagnostics::{elapsed_ms, ClusteringReport, TimingBreakdown};
use crate::hough::CandidateGroup;
use crate::types::{Hit, TrackId};
use log::{debug, warn};
use std::time::Instant;

/// How the angle scan is executed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScanMode {
    Sequential,
    Parallel { n_workers: usize },
}

#[derive(Clone, Debug)]
pub struct Clusterer {
    params: ClusterParams,
}

impl Clusterer {
    pub fn new(params: ClusterParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &ClusterParams {
        &self.params
    }

    pub fn mode(&self) -> ScanMode {
        if self.params.is_parallel() {
            ScanMode::Parallel {
                n_workers: self.params.n_workers,
            }
        } else {
            ScanMode::Sequential
        }
    }

    /// Candidate groups of every angle, in ascending angle order.
    pub fn candidates(&self, hits: &[Hit]) -> Vec<CandidateGroup> {
        self.scan(hits).0
    }

    /// Labels aligned with `hits`; unclaimed hits carry
    /// [`UNASSIGNED`](crate::types::UNASSIGNED).
    pub fn predict(&self, hits: &[Hit]) -> Vec<TrackId> {
        self.predict_with_report(hits).0
    }

    pub fn predict_with_report(&self, hits: &[Hit]) -> (Vec<TrackId>, ClusteringReport) {
        let t0 = Instant::now();
        let mut timing = TimingBreakdown::default();

        let (groups, n_workers) = timing.measure("scan", || self.scan(hits));
        let resolution = timing.measure("resolve", || {
            resolve_labels(hits.len(), &groups, self.params.min_hits)
        });
        timing.total_ms = elapsed_ms(t0);

        debug!(
            "clustering: hits={} candidates={} tracks={} assigned={} ({:.1} ms)",
            hits.len(),
            groups.len(),
            resolution.n_tracks,
            resolution.n_assigned,
            timing.total_ms
        );

        let report = ClusteringReport {
            n_hits: hits.len(),
            n_angles: self.params.nbins_theta,
            n_workers,
            n_candidates: groups.len(),
            n_tracks: resolution.n_tracks,
            n_assigned: resolution.n_assigned,
            timing,
        };
        (resolution.labels, report)
    }

    /// Returns the groups and the number of workers that produced them.
    fn scan(&self, hits: &[Hit]) -> (Vec<CandidateGroup>, usize) {
        match self.mode() {
            ScanMode::Sequential => (sequential::scan_sequential(hits, &self.params), 1),
            ScanMode::Parallel { n_workers } => {
                match parallel::scan_parallel(hits, &self.params) {
                    Ok(groups) => (groups, n_workers),
                    Err(err) => {
                        warn!("clustering: worker pool unavailable ({err}), scanning sequentially");
                        (sequential::scan_sequential(hits, &self.params), 1)
                    }
                }
            }
        }
    }
}

/// Clusters `hits` with `params`; see [`Clusterer::predict`].
pub fn predict(hits: &[Hit], params: &ClusterParams) -> Vec<TrackId> {
    Clusterer::new(*params).predict(hits)
}
