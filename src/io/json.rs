//! JSON and plain-text helpers shared by the binaries and engine dumps.
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Parse a JSON document from `path`.
pub fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    serde_json::from_str(&data).map_err(|e| format!("Failed to parse {}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

/// Write `lines` to `path`, one per line.
pub fn write_lines<I, S>(path: &Path, lines: I) -> Result<(), String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    ensure_parent_dir(path)?;
    let mut text = String::new();
    for line in lines {
        text.push_str(line.as_ref());
        text.push('\n');
    }
    fs::write(path, text).map_err(|e| format!("Failed to write {}: {e}", path.display()))
}

pub(crate) fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
        values: Vec<u32>,
    }

    #[test]
    fn json_round_trip_creates_parent_dirs() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested/out/sample.json");
        let sample = Sample {
            name: "theta".into(),
            values: vec![1, 2, 3],
        };
        write_json_file(&path, &sample).expect("write");
        let back: Sample = read_json_file(&path).expect("read");
        assert_eq!(back, sample);
    }

    #[test]
    fn read_reports_path_on_failure() {
        let err = read_json_file::<Sample>(Path::new("/nonexistent/cfg.json")).unwrap_err();
        assert!(err.contains("/nonexistent/cfg.json"), "{err}");
    }

    #[test]
    fn lines_are_newline_terminated() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("groups.txt");
        write_lines(&path, ["[0 1 2]", "[3 4]"]).expect("write");
        assert_eq!(fs::read_to_string(&path).expect("read"), "[0 1 2]\n[3 4]\n");
    }
}
