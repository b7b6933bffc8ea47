use crate::clustering::ClusterParams;
use crate::hough::HoughBinning;
use crate::io::json::read_json_file;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration of the `trkml_hough` driver.
///
/// With `event` set, only that event prefix is processed; otherwise every
/// event of `dataset` inside `events` is.
#[derive(Debug, Deserialize)]
pub struct RunConfig {
    pub dataset: PathBuf,
    #[serde(default)]
    pub event: Option<String>,
    #[serde(default)]
    pub events: EventRange,
    #[serde(default)]
    pub clustering: ClusteringConfig,
    #[serde(default)]
    pub output: RunOutputConfig,
}

/// Half-open range of sorted event prefixes.
#[derive(Debug, Deserialize, Default, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct EventRange {
    pub begin: usize,
    pub end: Option<usize>,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct ClusteringConfig {
    /// Worker threads; `0` picks the available parallelism plus one.
    pub workers: usize,
    pub nbins_r0inv: usize,
    pub nbins_gamma: usize,
    pub nbins_theta: usize,
    pub min_hits: usize,
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        let params = ClusterParams::default();
        Self {
            workers: params.n_workers,
            nbins_r0inv: params.binning.nbins_r0inv,
            nbins_gamma: params.binning.nbins_gamma,
            nbins_theta: params.nbins_theta,
            min_hits: params.min_hits,
        }
    }
}

impl ClusteringConfig {
    pub fn binning(&self) -> HoughBinning {
        HoughBinning::new(self.nbins_r0inv, self.nbins_gamma)
    }

    pub fn resolve(&self) -> ClusterParams {
        let n_workers = if self.workers == 0 {
            std::thread::available_parallelism().map_or(1, |n| n.get()) + 1
        } else {
            self.workers
        };
        ClusterParams {
            n_workers,
            binning: self.binning(),
            nbins_theta: self.nbins_theta,
            min_hits: self.min_hits,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct RunOutputConfig {
    /// Gzip CSV submission covering every processed event.
    pub submission: Option<PathBuf>,
    pub report_json: Option<PathBuf>,
}

pub fn load_config(path: &Path) -> Result<RunConfig, String> {
    let config: RunConfig = read_json_file(path)?;
    config
        .clustering
        .binning()
        .validate()
        .map_err(|e| format!("Invalid config {}: {e}", path.display()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn minimal_config_uses_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("run.json");
        fs::write(&path, r#"{ "dataset": "train_100_events" }"#).expect("write");
        let cfg = load_config(&path).expect("config");
        assert_eq!(cfg.dataset, PathBuf::from("train_100_events"));
        assert!(cfg.event.is_none());
        assert_eq!(cfg.events, EventRange::default());
        assert_eq!(cfg.clustering.resolve(), ClusterParams::default());
        assert!(cfg.output.submission.is_none());
    }

    #[test]
    fn full_config_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("run.json");
        fs::write(
            &path,
            r#"{
                "dataset": "data",
                "event": "event000001000",
                "events": { "begin": 2, "end": 7 },
                "clustering": { "workers": 4, "nbins_gamma": 300, "min_hits": 5 },
                "output": { "submission": "out/sub.csv.gz", "report_json": "out/report.json" }
            }"#,
        )
        .expect("write");
        let cfg = load_config(&path).expect("config");
        assert_eq!(cfg.event.as_deref(), Some("event000001000"));
        assert_eq!(cfg.events, EventRange { begin: 2, end: Some(7) });
        let params = cfg.clustering.resolve();
        assert_eq!(params.n_workers, 4);
        assert_eq!(params.binning, HoughBinning::new(200, 300));
        assert_eq!(params.nbins_theta, 500);
        assert_eq!(params.min_hits, 5);
        assert_eq!(cfg.output.report_json, Some(PathBuf::from("out/report.json")));
    }

    #[test]
    fn zero_workers_means_all_cores() {
        let cfg = ClusteringConfig {
            workers: 0,
            ..Default::default()
        };
        assert!(cfg.resolve().n_workers >= 2);
    }

    #[test]
    fn aliasing_bin_counts_are_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("run.json");
        fs::write(
            &path,
            r#"{ "dataset": "d", "clustering": { "nbins_r0inv": 100000 } }"#,
        )
        .expect("write");
        let err = load_config(&path).unwrap_err();
        assert!(err.contains("nbins_r0inv"), "{err}");
    }
}
