//! Thin file-level collaborators around the core.
//!
//! - [`dataset`]: TrackML CSV event tables and dataset directories.
//! - [`submission`]: gzip CSV submission writer.
//! - [`json`]: JSON/text helpers used by the binaries and engine dumps.

pub mod dataset;
pub mod json;
pub mod submission;

pub use dataset::{parse_event_id, read_event, read_mc_event, Dataset, EventReader};
pub use json::{read_json_file, write_json_file, write_lines};
pub use submission::Submission;
