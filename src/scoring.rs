//! TrackML event score.
//!
//! Every distinct label forms a reconstructed track. Its hits are walked in
//! `(label, particle, hit)` order to find the majority particle, the one with
//! the most hits in the track. A track is good when the majority particle owns
//! more than half of the track's hits and the track holds more than half of
//! that particle's true hits. The score is the normalized truth weight of the
//! majority hits of all good tracks.
//!
//! Label [`UNASSIGNED`](crate::types::UNASSIGNED) is not special here: its hits
//! form one pseudo-track like any other label.

use crate::types::{Event, TrackId, Truth};
use log::debug;
use serde::Serialize;
use std::collections::HashMap;

/// Majority analysis of one reconstructed track.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconstructedTrack {
    pub track_id: TrackId,
    /// Hits carrying this label.
    pub hits: usize,
    pub majority_particle: u64,
    /// True hit count of the majority particle in the whole event.
    pub majority_particle_hits: usize,
    /// Hits of the majority particle inside this track.
    pub majority_hits: usize,
    /// Truth weight of those hits, normalized by the event's total weight.
    pub majority_weight: f64,
}

impl ReconstructedTrack {
    pub fn purity_reconstructed(&self) -> f64 {
        self.majority_hits as f64 / self.hits as f64
    }

    pub fn purity_majority(&self) -> f64 {
        self.majority_hits as f64 / self.majority_particle_hits as f64
    }

    /// Both purities strictly above one half.
    pub fn is_good(&self) -> bool {
        0.5 < self.purity_reconstructed() && 0.5 < self.purity_majority()
    }
}

/// Run of consecutive hits of one particle inside one track.
#[derive(Clone, Copy, Debug)]
struct Run {
    particle: u64,
    hits: usize,
    weight: f64,
}

impl Run {
    fn start(t: &Truth) -> Self {
        Self {
            particle: t.particle_id,
            hits: 1,
            weight: t.weight,
        }
    }
}

/// Majority analysis of every label present in `labels`.
///
/// `truth` and `labels` must be aligned; neither slice is reordered. Returns
/// no tracks when the inputs are empty or the total weight is not positive.
pub fn analyze_tracks(truth: &[Truth], labels: &[TrackId]) -> Vec<ReconstructedTrack> {
    assert_eq!(
        truth.len(),
        labels.len(),
        "scoring: truth and labels must be aligned"
    );
    if truth.is_empty() {
        return Vec::new();
    }

    let mut particle_hits: HashMap<u64, usize> = HashMap::with_capacity(truth.len());
    let mut total_weight = 0.0;
    for t in truth {
        *particle_hits.entry(t.particle_id).or_insert(0) += 1;
        total_weight += t.weight;
    }
    if total_weight <= 0.0 || !total_weight.is_finite() {
        debug!("scoring: total truth weight {total_weight} is not positive");
        return Vec::new();
    }
    let inv_total = 1.0 / total_weight;

    let mut order: Vec<usize> = (0..truth.len()).collect();
    order.sort_unstable_by_key(|&i| (labels[i], truth[i].particle_id, truth[i].hit_id));

    let finish = |track_id: TrackId, hits: usize, maj: Run| ReconstructedTrack {
        track_id,
        hits,
        majority_particle: maj.particle,
        majority_particle_hits: particle_hits[&maj.particle],
        majority_hits: maj.hits,
        majority_weight: maj.weight * inv_total,
    };

    let mut tracks = Vec::new();
    let first = order[0];
    let mut track_id = labels[first];
    let mut track_hits = 1usize;
    let mut cur = Run::start(&truth[first]);
    let mut maj: Option<Run> = None;

    for &i in &order[1..] {
        let t = &truth[i];
        if labels[i] != track_id {
            tracks.push(finish(track_id, track_hits, majority(maj, cur)));
            track_id = labels[i];
            track_hits = 1;
            cur = Run::start(t);
            maj = None;
            continue;
        }

        track_hits += 1;
        if t.particle_id != cur.particle {
            maj = Some(majority(maj, cur));
            cur = Run::start(t);
        } else {
            cur.hits += 1;
            cur.weight += t.weight;
        }
    }
    tracks.push(finish(track_id, track_hits, majority(maj, cur)));
    tracks
}

/// Keeps the earlier run unless the finished one has strictly more hits.
fn majority(best: Option<Run>, finished: Run) -> Run {
    match best {
        Some(b) if b.hits >= finished.hits => b,
        _ => finished,
    }
}

/// Score of `labels` against `truth`, in `[0, 1]`.
pub fn score(truth: &[Truth], labels: &[TrackId]) -> f64 {
    analyze_tracks(truth, labels)
        .iter()
        .filter(|t| t.is_good())
        .map(|t| t.majority_weight)
        .sum()
}

/// Score of `labels` against the Monte-Carlo truth of `event`.
pub fn score_event(event: &Event, labels: &[TrackId]) -> f64 {
    score(&event.truth, labels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::UNASSIGNED;

    fn truth(rows: &[(u64, u64, f64)]) -> Vec<Truth> {
        rows.iter()
            .map(|&(hit, pid, w)| Truth::new(hit, pid, w))
            .collect()
    }

    #[test]
    fn single_perfect_track() {
        let mcs = truth(&[(1, 5, 0.25), (2, 5, 0.25), (3, 5, 0.25), (4, 5, 0.25)]);
        let labels = [7; 4];
        let tracks = analyze_tracks(&mcs, &labels);
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].track_id, 7);
        assert_eq!(tracks[0].majority_particle, 5);
        assert_eq!(tracks[0].majority_hits, 4);
        assert!((score(&mcs, &labels) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn empty_and_weightless_events_score_zero() {
        assert_eq!(score(&[], &[]), 0.0);
        let mcs = truth(&[(1, 1, 0.0), (2, 1, 0.0)]);
        assert_eq!(score(&mcs, &[1, 1]), 0.0);
        assert!(analyze_tracks(&mcs, &[1, 1]).is_empty());
    }

    #[test]
    fn half_purity_is_not_good() {
        // track 1 holds two hits of particle 1 and two of particle 2
        let mcs = truth(&[(1, 1, 0.25), (2, 1, 0.25), (3, 2, 0.25), (4, 2, 0.25)]);
        let labels = [1, 1, 1, 1];
        let tracks = analyze_tracks(&mcs, &labels);
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].majority_particle, 1, "ties keep the first run");
        assert!(!tracks[0].is_good());
        assert_eq!(score(&mcs, &labels), 0.0);
    }

    #[test]
    fn split_particle_counts_only_majority_side() {
        // particle 1 has 5 hits: 3 in track 1, 2 in track 2 with particle 2
        let mcs = truth(&[
            (1, 1, 0.1),
            (2, 1, 0.1),
            (3, 1, 0.1),
            (4, 1, 0.1),
            (5, 1, 0.1),
            (6, 2, 0.2),
            (7, 2, 0.2),
            (8, 2, 0.1),
        ]);
        let labels = [1, 1, 1, 2, 2, 2, 2, 2];
        let tracks = analyze_tracks(&mcs, &labels);
        assert_eq!(tracks.len(), 2);
        assert!(tracks[0].is_good());
        assert_eq!(tracks[1].majority_particle, 2);
        assert_eq!(tracks[1].majority_hits, 3);
        assert!(tracks[1].is_good());
        let s = score(&mcs, &labels);
        assert!((s - (0.3 + 0.5) / 1.0).abs() < 1e-12, "score={s}");
    }

    #[test]
    fn unassigned_label_is_scored_as_a_track() {
        let mcs = truth(&[(1, 3, 0.5), (2, 3, 0.5)]);
        let labels = [UNASSIGNED, UNASSIGNED];
        assert!((score(&mcs, &labels) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn interleaved_input_order_is_irrelevant_and_untouched() {
        let mcs = truth(&[(4, 9, 0.25), (1, 8, 0.25), (3, 9, 0.25), (2, 8, 0.25)]);
        let labels = [2, 1, 2, 1];
        let before = mcs.clone();
        let s = score(&mcs, &labels);
        assert!((s - 1.0).abs() < 1e-12);
        assert_eq!(mcs, before);
        assert_eq!(labels, [2, 1, 2, 1]);
    }

    #[test]
    fn score_stays_in_unit_interval() {
        let mcs = truth(&[
            (1, 1, 0.3),
            (2, 1, 0.3),
            (3, 2, 0.2),
            (4, 2, 0.1),
            (5, 0, 0.1),
        ]);
        for labels in [[1, 1, 2, 2, 3], [1, 2, 1, 2, 1], [0, 0, 0, 0, 0], [5, 5, 5, 1, 1]] {
            let s = score(&mcs, &labels);
            assert!((0.0..=1.0 + 1e-12).contains(&s), "score={s}");
        }
    }

    #[test]
    #[should_panic(expected = "aligned")]
    fn misaligned_inputs_are_fatal() {
        score(&truth(&[(1, 1, 1.0)]), &[1, 2]);
    }
}
