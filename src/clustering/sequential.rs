use crate::hough::{theta_scan, CandidateGroup, HoughEngine};
use crate::types::Hit;

use super::ClusterParams;

/// Scans all angles in increasing order with a single engine.
pub(crate) fn scan_sequential(hits: &[Hit], params: &ClusterParams) -> Vec<CandidateGroup> {
    let mut engine = HoughEngine::new(hits);
    let mut groups = Vec::new();
    for theta in theta_scan(params.nbins_theta) {
        engine.evaluate(&mut groups, theta, &params.binning, params.min_hits);
    }
    groups
}
