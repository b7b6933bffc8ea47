use crate::hough::CandidateGroup;
use crate::types::{TrackId, UNASSIGNED};

/// Final one-hit-one-label assignment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub labels: Vec<TrackId>,
    pub n_tracks: usize,
    pub n_assigned: usize,
}

/// Greedy first-claim-wins deduplication of `groups`, in order.
///
/// Each group keeps only the hits no earlier surviving group claimed; if at
/// least `min_hits` remain, they receive the next label (starting at 1) and
/// become claimed. Other hits stay [`UNASSIGNED`].
pub fn resolve_labels(n_hits: usize, groups: &[CandidateGroup], min_hits: usize) -> Resolution {
    let mut labels = vec![UNASSIGNED; n_hits];
    let mut claimed = vec![false; n_hits];
    let mut next_label: TrackId = UNASSIGNED + 1;
    let mut n_assigned = 0usize;
    let mut fresh: Vec<usize> = Vec::new();

    for group in groups {
        fresh.clear();
        fresh.extend(group.iter().copied().filter(|&i| !claimed[i]));
        if fresh.len() < min_hits {
            continue;
        }
        for &i in &fresh {
            labels[i] = next_label;
            claimed[i] = true;
        }
        n_assigned += fresh.len();
        next_label += 1;
    }

    Resolution {
        labels,
        n_tracks: (next_label - 1) as usize,
        n_assigned,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_claim_wins() {
        let groups = vec![vec![0, 1, 2], vec![2, 3, 4, 5], vec![6, 7]];
        let res = resolve_labels(8, &groups, 2);
        assert_eq!(res.labels, vec![1, 1, 1, 2, 2, 2, 3, 3]);
        assert_eq!(res.n_tracks, 3);
        assert_eq!(res.n_assigned, 8);
    }

    #[test]
    fn groups_shrinking_below_threshold_are_discarded() {
        let groups = vec![vec![0, 1, 2], vec![1, 2, 3], vec![3, 4, 5]];
        let res = resolve_labels(6, &groups, 3);
        // second group keeps only hit 3 and is dropped, leaving 3 free
        assert_eq!(res.labels, vec![1, 1, 1, 2, 2, 2]);
        assert_eq!(res.n_tracks, 2);
    }

    #[test]
    fn unclaimed_hits_stay_unassigned() {
        let res = resolve_labels(4, &[vec![1, 2]], 3);
        assert_eq!(res.labels, vec![UNASSIGNED; 4]);
        assert_eq!(res.n_tracks, 0);
        assert_eq!(res.n_assigned, 0);
    }

    #[test]
    fn empty_input() {
        let res = resolve_labels(0, &[], 9);
        assert!(res.labels.is_empty());
    }
}
