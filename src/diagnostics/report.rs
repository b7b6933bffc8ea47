use super::TimingBreakdown;
use serde::Serialize;

/// Summary of one clustering run.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusteringReport {
    pub n_hits: usize,
    pub n_angles: usize,
    /// Workers that actually scanned the angles (1 in sequential mode).
    pub n_workers: usize,
    /// Candidate groups emitted over all angles, before deduplication.
    pub n_candidates: usize,
    pub n_tracks: usize,
    /// Hits carrying a track label after deduplication.
    pub n_assigned: usize,
    pub timing: TimingBreakdown,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventReport {
    pub event_id: u64,
    pub n_hits: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    pub clustering: ClusteringReport,
}

/// Per-event reports of a driver run.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    pub events: Vec<EventReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean_score: Option<f64>,
    pub total_ms: f64,
}

impl RunReport {
    pub fn push(&mut self, event: EventReport) {
        self.events.push(event);
        self.mean_score = self.compute_mean_score();
    }

    fn compute_mean_score(&self) -> Option<f64> {
        let scores: Vec<f64> = self.events.iter().filter_map(|e| e.score).collect();
        if scores.is_empty() {
            return None;
        }
        Some(scores.iter().sum::<f64>() / scores.len() as f64)
    }
}
