//! Predicts and scores TrackML events with the Hough angle scan.
//!
//! Usage: `trkml_hough <config.json>` (see `config::run::RunConfig`).

use log::info;
use std::env;
use std::path::Path;
use std::time::Instant;
use trackml_hough::clustering::Clusterer;
use trackml_hough::config::run::{load_config, RunConfig};
use trackml_hough::diagnostics::{elapsed_ms, EventReport, RunReport};
use trackml_hough::io::{read_mc_event, write_json_file, Dataset, Submission};
use trackml_hough::scoring::score_event;
use trackml_hough::types::Event;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path))?;
    let t0 = Instant::now();

    let params = config.clustering.resolve();
    info!(
        "clustering: workers={} r0inv={} gamma={} theta={} min_hits={}",
        params.n_workers,
        params.binning.nbins_r0inv,
        params.binning.nbins_gamma,
        params.nbins_theta,
        params.min_hits
    );
    let clusterer = Clusterer::new(params);

    let mut submission = match &config.output.submission {
        Some(path) => Some(Submission::create(path).map_err(|e| e.to_string())?),
        None => None,
    };
    let mut report = RunReport::default();

    for event in events(&config)? {
        let event = event?;
        let (labels, clustering) = clusterer.predict_with_report(&event.hits);
        let score = event.has_truth().then(|| score_event(&event, &labels));
        match score {
            Some(s) => info!("score for event {}: {}", event.id, s),
            None => info!("event {}: {} tracks (no truth)", event.id, clustering.n_tracks),
        }
        if let Some(sub) = submission.as_mut() {
            sub.append(&event, &labels).map_err(|e| e.to_string())?;
        }
        report.push(EventReport {
            event_id: event.id,
            n_hits: event.hits.len(),
            score,
            clustering,
        });
    }

    if let Some(sub) = submission {
        sub.finish().map_err(|e| e.to_string())?;
    }
    report.total_ms = elapsed_ms(t0);
    if let Some(mean) = report.mean_score {
        info!("mean score: {} over {} events", mean, report.events.len());
    }
    if let Some(path) = &config.output.report_json {
        write_json_file(path, &report)?;
    }
    Ok(())
}

/// Either the single configured event or the configured dataset range.
fn events(config: &RunConfig) -> Result<Box<dyn Iterator<Item = Result<Event, String>>>, String> {
    if let Some(prefix) = &config.event {
        info!("loading [{}]...", prefix);
        let event = read_mc_event(&config.dataset, prefix).map_err(|e| e.to_string())?;
        return Ok(Box::new(std::iter::once(Ok(event))));
    }
    let dataset = Dataset::open(&config.dataset, config.events.begin, config.events.end)
        .map_err(|e| e.to_string())?;
    Ok(Box::new(dataset.map(|e| e.map_err(|e| e.to_string()))))
}

fn usage() -> String {
    "Usage: trkml_hough <config.json>".to_string()
}
