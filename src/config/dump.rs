use crate::hough::HoughBinning;
use crate::io::json::read_json_file;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration of the `hough_dump` tool: one event, one angle.
#[derive(Debug, Deserialize)]
pub struct DumpConfig {
    pub dataset: PathBuf,
    pub event: String,
    pub theta: f64,
    #[serde(default = "default_binning")]
    pub binning: HoughBinning,
    #[serde(default = "default_min_hits")]
    pub min_hits: usize,
    pub output: DumpOutputConfig,
}

#[derive(Debug, Deserialize)]
pub struct DumpOutputConfig {
    /// One candidate group per line.
    pub groups_txt: PathBuf,
    #[serde(default)]
    pub engine_json: Option<PathBuf>,
}

fn default_binning() -> HoughBinning {
    HoughBinning::new(200, 500)
}

fn default_min_hits() -> usize {
    9
}

pub fn load_config(path: &Path) -> Result<DumpConfig, String> {
    let config: DumpConfig = read_json_file(path)?;
    config
        .binning
        .validate()
        .map_err(|e| format!("Invalid config {}: {e}", path.display()))?;
    Ok(config)
}
