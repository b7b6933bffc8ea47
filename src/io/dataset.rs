//! TrackML event tables stored as CSV files, either loose in a dataset
//! directory or packed in a `.zip` archive.
//!
//! An event with prefix `event000001000` consists of
//! `event000001000-hits.csv`, `-cells.csv`, `-particles.csv` and, for
//! training data, `-truth.csv`. Inside an archive the tables may sit in a
//! sub-directory; they are matched by file name.

use crate::error::{DatasetError, Result};
use crate::types::{Event, Hit};
use log::{debug, info};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};
use zip::ZipArchive;

const HITS_SUFFIX: &str = "-hits.csv";

/// Function loading one event from a dataset path and an event prefix.
pub type EventReader = fn(&Path, &str) -> Result<Event>;

/// Event id encoded in a prefix such as `event000001000`.
pub fn parse_event_id(prefix: &str) -> Result<u64> {
    let name = Path::new(prefix)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(prefix);
    let digits = name.strip_prefix("event").unwrap_or(name);
    digits
        .parse()
        .map_err(|_| DatasetError::InvalidEventId(prefix.to_string()))
}

fn table_name(prefix: &str, table: &str) -> String {
    format!("{prefix}-{table}.csv")
}

fn is_zip(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("zip"))
}

fn decode_rows<T: DeserializeOwned, R: Read>(reader: R, path: &Path) -> Result<Vec<T>> {
    let rows = csv::Reader::from_reader(reader)
        .deserialize()
        .collect::<std::result::Result<Vec<T>, _>>()
        .map_err(|e| DatasetError::csv(path, e))?;
    debug!("read {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Opened dataset storage: a directory or a zip archive with its entries
/// indexed by file name.
enum Tables {
    Dir(PathBuf),
    Zip {
        path: PathBuf,
        archive: ZipArchive<File>,
        entries: HashMap<String, String>,
    },
}

impl Tables {
    fn open(path: &Path) -> Result<Self> {
        let meta = fs::metadata(path).map_err(|e| DatasetError::io(path, e))?;
        if meta.is_dir() {
            return Ok(Self::Dir(path.to_path_buf()));
        }
        if !is_zip(path) {
            return Err(DatasetError::Unsupported(path.to_path_buf()));
        }

        let file = File::open(path).map_err(|e| DatasetError::io(path, e))?;
        let archive = ZipArchive::new(file).map_err(|e| DatasetError::zip(path, e))?;
        let entries = archive
            .file_names()
            .filter_map(|full| {
                let base = Path::new(full).file_name()?.to_str()?;
                Some((base.to_string(), full.to_string()))
            })
            .collect();
        Ok(Self::Zip {
            path: path.to_path_buf(),
            archive,
            entries,
        })
    }

    /// Event prefixes with a hits table, sorted.
    fn prefixes(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        match self {
            Self::Dir(dir) => {
                for entry in fs::read_dir(dir).map_err(|e| DatasetError::io(dir, e))? {
                    let entry = entry.map_err(|e| DatasetError::io(dir, e))?;
                    let file_name = entry.file_name();
                    if let Some(prefix) =
                        file_name.to_str().and_then(|n| n.strip_suffix(HITS_SUFFIX))
                    {
                        names.push(prefix.to_string());
                    }
                }
            }
            Self::Zip { entries, .. } => {
                names.extend(
                    entries
                        .keys()
                        .filter_map(|n| n.strip_suffix(HITS_SUFFIX))
                        .map(str::to_string),
                );
            }
        }
        names.sort();
        names.dedup();
        Ok(names)
    }

    fn read<T: DeserializeOwned>(&mut self, prefix: &str, table: &str) -> Result<Vec<T>> {
        let name = table_name(prefix, table);
        match self {
            Self::Dir(dir) => {
                let path = dir.join(&name);
                let file = File::open(&path).map_err(|e| DatasetError::csv(&path, e.into()))?;
                decode_rows(file, &path)
            }
            Self::Zip {
                path,
                archive,
                entries,
            } => {
                let full = entries
                    .get(&name)
                    .ok_or_else(|| DatasetError::MissingTable(path.join(&name)))?;
                let entry_path = path.join(full);
                let entry = archive
                    .by_name(full)
                    .map_err(|e| DatasetError::zip(&entry_path, e))?;
                decode_rows(entry, &entry_path)
            }
        }
    }

    fn read_event(&mut self, prefix: &str) -> Result<Event> {
        let id = parse_event_id(prefix)?;
        let hits: Vec<Hit> = self.read(prefix, "hits")?;
        let cells = self.read(prefix, "cells")?;
        let particles = self.read(prefix, "particles")?;
        Ok(Event {
            id,
            hits,
            cells,
            particles,
            truth: Vec::new(),
        })
    }
}

/// Reads hits, cells and particles of one event, without Monte-Carlo truth.
///
/// `path` is a dataset directory or a `.zip` archive.
pub fn read_event(path: &Path, prefix: &str) -> Result<Event> {
    Tables::open(path)?.read_event(prefix)
}

/// Reads a complete event including its Monte-Carlo truth.
pub fn read_mc_event(path: &Path, prefix: &str) -> Result<Event> {
    let mut tables = Tables::open(path)?;
    let mut event = tables.read_event(prefix)?;
    event.truth = tables.read(prefix, "truth")?;
    if event.truth.len() != event.hits.len() {
        return Err(DatasetError::LengthMismatch {
            expected: event.hits.len(),
            actual: event.truth.len(),
        });
    }
    Ok(event)
}

/// Ordered collection of the events found in a dataset directory or archive.
///
/// Iterating yields one freshly loaded event per prefix; the first read error
/// ends the iteration.
pub struct Dataset {
    path: PathBuf,
    names: Vec<String>,
    cursor: usize,
    reader: EventReader,
    failed: bool,
}

impl Dataset {
    /// Lists the events of `path`, sorted by prefix, keeping `[begin, end)`.
    ///
    /// `path` is a directory or a `.zip` archive. `end = None` (or an end past
    /// the last event) keeps everything from `begin` on. Events are read with
    /// [`read_mc_event`] unless another reader is installed with
    /// [`Dataset::with_reader`].
    pub fn open(path: &Path, begin: usize, end: Option<usize>) -> Result<Self> {
        let names = Tables::open(path)?.prefixes()?;

        let end = end.map_or(names.len(), |e| e.min(names.len()));
        let begin = begin.min(end);
        let names = names[begin..end].to_vec();
        info!("dataset {}: {} events", path.display(), names.len());

        Ok(Self {
            path: path.to_path_buf(),
            names,
            cursor: 0,
            reader: read_mc_event,
            failed: false,
        })
    }

    pub fn with_reader(mut self, reader: EventReader) -> Self {
        self.reader = reader;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Event prefixes in iteration order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Iterator for Dataset {
    type Item = Result<Event>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let prefix = self.names.get(self.cursor)?;
        self.cursor += 1;
        info!("loading [{}]...", prefix);
        let event = (self.reader)(&self.path, prefix);
        self.failed = event.is_err();
        Some(event)
    }
}
