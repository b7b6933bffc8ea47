//! Timings and JSON reports produced by clustering and driver runs.
//!
//! `ClusteringReport` is returned alongside the labels by
//! [`Clusterer::predict_with_report`](crate::clustering::Clusterer::predict_with_report);
//! `RunReport` aggregates per-event results of the `trkml_hough` driver.

pub mod report;
pub mod timing;

pub use report::{ClusteringReport, EventReport, RunReport};
pub use timing::{elapsed_ms, StageTiming, TimingBreakdown};
