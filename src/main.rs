use trackml_hough::hough::theta_scan;
use trackml_hough::prelude::*;

fn main() {
    // Demo: a handful of helices plus noise, clustered on all cores.
    let params = ClusterParams {
        n_workers: std::thread::available_parallelism().map_or(1, |n| n.get()),
        nbins_theta: 180,
        min_hits: 6,
        ..Default::default()
    };
    let angles = theta_scan(params.nbins_theta);
    let event = SyntheticEvent::builder()
        .event_id(1)
        .track(HelixSpec::centered(angles[20], 0))
        .track(HelixSpec::centered(angles[75], 4))
        .track(HelixSpec::centered(angles[76], 8).with_hits(14))
        .track(HelixSpec::centered(angles[150], 12))
        .noise(200, 42)
        .build();

    let (labels, report) = Clusterer::new(params).predict_with_report(&event.hits);
    let score = score_event(&event, &labels);
    println!(
        "hits={} candidates={} tracks={} assigned={} score={:.3} latency_ms={:.3}",
        report.n_hits,
        report.n_candidates,
        report.n_tracks,
        report.n_assigned,
        score,
        report.timing.total_ms
    );
}
