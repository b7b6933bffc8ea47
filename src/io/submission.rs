use crate::error::{DatasetError, Result};
use crate::io::json::ensure_parent_dir;
use crate::types::{Event, TrackId};
use flate2::write::GzEncoder;
use flate2::Compression;
use log::info;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Gzip-compressed CSV with one `event_id,hit_id,track_id` row per hit.
pub struct Submission {
    writer: csv::Writer<GzEncoder<File>>,
    path: PathBuf,
    rows: usize,
}

impl Submission {
    /// Creates `path` (and its parent directories) and writes the header.
    pub fn create(path: &Path) -> Result<Self> {
        ensure_parent_dir(path).map_err(|e| {
            DatasetError::io(path, std::io::Error::new(std::io::ErrorKind::Other, e))
        })?;
        let file = File::create(path).map_err(|e| DatasetError::io(path, e))?;
        let mut writer = csv::Writer::from_writer(GzEncoder::new(file, Compression::default()));
        writer
            .write_record(["event_id", "hit_id", "track_id"])
            .map_err(|e| DatasetError::csv(path, e))?;
        Ok(Self {
            writer,
            path: path.to_path_buf(),
            rows: 0,
        })
    }

    /// Appends one row per hit of `event`; `labels` must be aligned with the hits.
    pub fn append(&mut self, event: &Event, labels: &[TrackId]) -> Result<()> {
        if event.hits.len() != labels.len() {
            return Err(DatasetError::LengthMismatch {
                expected: event.hits.len(),
                actual: labels.len(),
            });
        }
        let event_id = event.id.to_string();
        for (hit, label) in event.hits.iter().zip(labels) {
            let hit_id = hit.hit_id.to_string();
            let track_id = label.to_string();
            self.writer
                .write_record([event_id.as_str(), hit_id.as_str(), track_id.as_str()])
                .map_err(|e| DatasetError::csv(&self.path, e))?;
        }
        self.writer
            .flush()
            .map_err(|e| DatasetError::io(&self.path, e))?;
        self.rows += labels.len();
        Ok(())
    }

    /// Rows written so far, header excluded.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Flushes the CSV and closes the gzip stream.
    pub fn finish(self) -> Result<PathBuf> {
        let Self { writer, path, rows } = self;
        let encoder = writer
            .into_inner()
            .map_err(|e| DatasetError::io(&path, e.into_error()))?;
        encoder.finish().map_err(|e| DatasetError::io(&path, e))?;
        info!("submission {}: {} rows", path.display(), rows);
        Ok(path)
    }
}
