//! Evaluates the Hough engine at a single angle and dumps its state.
//!
//! Usage: `hough_dump <config.json>` (see `config::dump::DumpConfig`).

use log::info;
use std::env;
use std::path::Path;
use trackml_hough::config::dump;
use trackml_hough::hough::HoughEngine;
use trackml_hough::io::{read_event, write_lines};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = dump::load_config(Path::new(&config_path))?;

    let event = read_event(&config.dataset, &config.event).map_err(|e| e.to_string())?;
    info!("event {}: {} hits", event.id, event.hits.len());

    let mut engine = HoughEngine::new(&event.hits);
    let mut groups = Vec::new();
    engine.evaluate(&mut groups, config.theta, &config.binning, config.min_hits);
    info!("theta={} groups={}", config.theta, groups.len());

    write_lines(&config.output.groups_txt, groups.iter().map(|g| format!("{g:?}")))?;
    if let Some(path) = &config.output.engine_json {
        engine.dump(path)?;
    }
    Ok(())
}

fn usage() -> String {
    "Usage: hough_dump <config.json>".to_string()
}
