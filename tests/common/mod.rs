#![allow(dead_code)]

use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;
use trackml_hough::hough::theta_scan;
use trackml_hough::synthetic::{HelixSpec, SyntheticEvent};
use trackml_hough::{ClusterParams, Event, TrackId, UNASSIGNED};

pub const N_ANGLES: usize = 96;
pub const MIN_HITS: usize = 6;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn params(n_workers: usize) -> ClusterParams {
    ClusterParams {
        n_workers,
        nbins_theta: N_ANGLES,
        min_hits: MIN_HITS,
        ..Default::default()
    }
}

/// Four well separated helices on scan angles plus scattered noise.
pub fn helix_event(id: u64, seed: u64) -> Event {
    let angles = theta_scan(N_ANGLES);
    SyntheticEvent::builder()
        .event_id(id)
        .track(HelixSpec::centered(angles[12], 0))
        .track(HelixSpec::centered(angles[47], 4))
        .track(HelixSpec::centered(angles[48], 8).with_hits(12))
        .track(HelixSpec::centered(angles[80], 12))
        .noise(40, seed)
        .build()
}

/// Every non-zero label must be used by at least `min_hits` hits.
pub fn assert_labels_well_formed(labels: &[TrackId], min_hits: usize) {
    let mut sizes: HashMap<TrackId, usize> = HashMap::new();
    for &l in labels.iter().filter(|&&l| l != UNASSIGNED) {
        *sizes.entry(l).or_insert(0) += 1;
    }
    for (label, size) in &sizes {
        assert!(
            *size >= min_hits,
            "track {label} has {size} hits, expected at least {min_hits}"
        );
    }
    // labels are dense, starting at 1
    let max = sizes.keys().copied().max().unwrap_or(UNASSIGNED);
    assert_eq!(max as usize, sizes.len());
}

fn write_table<T: Serialize>(path: &Path, rows: &[T]) {
    let mut writer = csv::Writer::from_path(path).expect("create csv");
    for row in rows {
        writer.serialize(row).expect("write row");
    }
    writer.flush().expect("flush csv");
}

/// Writes `event` as TrackML CSV tables named after `prefix`.
pub fn write_event_csv(dir: &Path, prefix: &str, event: &Event) {
    write_table(&dir.join(format!("{prefix}-hits.csv")), &event.hits);
    write_table(&dir.join(format!("{prefix}-cells.csv")), &event.cells);
    write_table(&dir.join(format!("{prefix}-particles.csv")), &event.particles);
    write_table(&dir.join(format!("{prefix}-truth.csv")), &event.truth);
}
