#![doc = include_str!("../README.md")]

// Core
pub mod clustering;
pub mod hough;
pub mod scoring;
pub mod types;

// Collaborators: files, configuration, reports, synthetic data.
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod io;
pub mod synthetic;

// --- High-level re-exports -------------------------------------------------

pub use crate::clustering::{predict, ClusterParams, Clusterer};
pub use crate::hough::{HoughBinning, HoughEngine};
pub use crate::scoring::{score, score_event};
pub use crate::types::{Event, Hit, TrackId, Truth, UNASSIGNED};

pub use crate::diagnostics::{ClusteringReport, EventReport, RunReport};
pub use crate::error::DatasetError;

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use trackml_hough::prelude::*;
///
/// let event = SyntheticEvent::builder()
///     .track(HelixSpec::centered(0.0, 0))
///     .noise(20, 1)
///     .build();
/// let labels = Clusterer::new(ClusterParams::default()).predict(&event.hits);
/// println!("score={:.3}", score_event(&event, &labels));
/// ```
pub mod prelude {
    pub use crate::synthetic::{HelixSpec, SyntheticEvent};
    pub use crate::{score_event, ClusterParams, Clusterer, Event, Hit};
}
