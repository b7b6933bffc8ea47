mod common;

use common::{helix_event, init_logging, params, write_event_csv};
use flate2::read::GzDecoder;
use std::io::Read;
use trackml_hough::clustering::Clusterer;
use trackml_hough::io::{read_event, Dataset, Submission};
use trackml_hough::score_event;

#[test]
fn dataset_events_are_predicted_scored_and_submitted() {
    init_logging();
    let dir = tempfile::tempdir().expect("tempdir");
    let data = dir.path().join("train");
    std::fs::create_dir_all(&data).expect("mkdir");
    for id in [1000u64, 1001, 1002] {
        write_event_csv(&data, &format!("event{id:09}"), &helix_event(id, id));
    }

    let clusterer = Clusterer::new(params(2));
    let sub_path = dir.path().join("out").join("submission.csv.gz");
    let mut submission = Submission::create(&sub_path).expect("submission");

    let dataset = Dataset::open(&data, 1, None).expect("dataset");
    assert_eq!(dataset.len(), 2);
    let mut n_hits = 0;
    for event in dataset {
        let event = event.expect("event");
        assert!(event.has_truth());
        let labels = clusterer.predict(&event.hits);
        let score = score_event(&event, &labels);
        assert!(score > 0.5, "event {} score={score:.3}", event.id);
        submission.append(&event, &labels).expect("append");
        n_hits += event.hits.len();
    }
    assert_eq!(submission.rows(), n_hits);
    let path = submission.finish().expect("finish");

    let mut text = String::new();
    GzDecoder::new(std::fs::File::open(path).expect("open"))
        .read_to_string(&mut text)
        .expect("gunzip");
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("event_id,hit_id,track_id"));
    let rows: Vec<&str> = lines.collect();
    assert_eq!(rows.len(), n_hits);
    assert!(rows[0].starts_with("1001,1,"));
    assert!(rows.last().is_some_and(|r| r.starts_with("1002,")));
}

#[test]
fn csv_round_trip_preserves_clustering() {
    let dir = tempfile::tempdir().expect("tempdir");
    let event = helix_event(7, 21);
    write_event_csv(dir.path(), "event000000007", &event);

    let loaded = read_event(dir.path(), "event000000007").expect("event");
    assert_eq!(loaded.id, 7);
    assert_eq!(loaded.hits, event.hits);
    assert!(loaded.truth.is_empty());

    let clusterer = Clusterer::new(params(1));
    assert_eq!(clusterer.predict(&loaded.hits), clusterer.predict(&event.hits));
}
