use crate::hough::{theta_scan, CandidateGroup, HoughEngine};
use crate::types::Hit;
use log::debug;
use rayon::{ThreadPoolBuildError, ThreadPoolBuilder};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::ClusterParams;

/// Shared queue of angle indices; each index is handed out exactly once, to
/// whichever worker asks first.
pub(crate) struct AngleQueue {
    next: AtomicUsize,
    len: usize,
}

impl AngleQueue {
    pub(crate) fn new(len: usize) -> Self {
        Self {
            next: AtomicUsize::new(0),
            len,
        }
    }

    pub(crate) fn pop(&self) -> Option<usize> {
        let i = self.next.fetch_add(1, Ordering::Relaxed);
        (i < self.len).then_some(i)
    }
}

/// Groups produced by one worker, keyed by angle index.
#[derive(Default)]
struct WorkerOutput {
    by_angle: BTreeMap<usize, Vec<CandidateGroup>>,
}

impl WorkerOutput {
    fn drain(&mut self, hits: &[Hit], params: &ClusterParams, angles: &[f64], queue: &AngleQueue) {
        let mut engine = HoughEngine::new(hits);
        while let Some(i) = queue.pop() {
            let groups = self.by_angle.entry(i).or_default();
            engine.evaluate(groups, angles[i], &params.binning, params.min_hits);
        }
    }
}

/// Scans all angles on a pool of `params.n_workers` threads, each owning a
/// private engine, and returns the groups in ascending angle order.
pub(crate) fn scan_parallel(
    hits: &[Hit],
    params: &ClusterParams,
) -> Result<Vec<CandidateGroup>, ThreadPoolBuildError> {
    let n_workers = params.n_workers.max(1);
    let pool = ThreadPoolBuilder::new()
        .num_threads(n_workers)
        .thread_name(|i| format!("hough-worker-{i}"))
        .build()?;

    let angles = theta_scan(params.nbins_theta);
    let queue = AngleQueue::new(angles.len());
    let mut outputs: Vec<WorkerOutput> = (0..n_workers).map(|_| WorkerOutput::default()).collect();

    pool.scope(|s| {
        for output in outputs.iter_mut() {
            let (angles, queue) = (&angles, &queue);
            s.spawn(move |_| output.drain(hits, params, angles, queue));
        }
    });

    for (w, output) in outputs.iter().enumerate() {
        debug!("hough-worker-{}: {} angles", w, output.by_angle.len());
    }
    Ok(merge_by_angle(outputs, angles.len()))
}

/// Concatenates worker outputs by ascending angle index; within an angle the
/// owning worker's order is kept.
fn merge_by_angle(mut outputs: Vec<WorkerOutput>, n_angles: usize) -> Vec<CandidateGroup> {
    let total: usize = outputs
        .iter()
        .flat_map(|o| o.by_angle.values())
        .map(Vec::len)
        .sum();
    let mut groups = Vec::with_capacity(total);
    for i in 0..n_angles {
        for output in outputs.iter_mut() {
            if let Some(g) = output.by_angle.remove(&i) {
                groups.extend(g);
            }
        }
    }
    groups
}
