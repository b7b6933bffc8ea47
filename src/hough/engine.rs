use crate::io::json::write_json_file;
use crate::types::Hit;
use log::debug;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use super::digitize::digitize_range;
use super::{CandidateGroup, HoughBinning, COMBO_BASE, GAMMA_RANGE, R0INV_RANGE};

/// Per-hit Hough state for one hit set.
///
/// `r`/`phi` are fixed at construction; everything else is overwritten by each
/// call to [`HoughEngine::evaluate`]. One instance serves one thread.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HoughEngine {
    hit_ids: Vec<u64>,
    z: Vec<f64>,
    r: Vec<f64>,
    phi: Vec<f64>,
    r0inv: Vec<f64>,
    gamma: Vec<f64>,
    r0inv_digi: Vec<usize>,
    gamma_digi: Vec<usize>,
    combo_digi: Vec<u64>,
    combo_counts: Vec<usize>,
}

impl HoughEngine {
    pub fn new(hits: &[Hit]) -> Self {
        let n = hits.len();
        let mut hit_ids = Vec::with_capacity(n);
        let mut z = Vec::with_capacity(n);
        let mut r = Vec::with_capacity(n);
        let mut phi = Vec::with_capacity(n);
        for hit in hits {
            let p = hit.position();
            hit_ids.push(hit.hit_id);
            z.push(p.z);
            r.push(p.xy().coords.norm());
            phi.push(p.y.atan2(p.x));
        }
        Self {
            hit_ids,
            z,
            r,
            phi,
            r0inv: vec![0.0; n],
            gamma: vec![0.0; n],
            r0inv_digi: vec![0; n],
            gamma_digi: vec![0; n],
            combo_digi: vec![0; n],
            combo_counts: vec![0; n],
        }
    }

    pub fn len(&self) -> usize {
        self.hit_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hit_ids.is_empty()
    }

    pub fn hit_ids(&self) -> &[u64] {
        &self.hit_ids
    }

    pub fn r0inv(&self) -> &[f64] {
        &self.r0inv
    }

    pub fn gamma(&self) -> &[f64] {
        &self.gamma
    }

    pub fn r0inv_bins(&self) -> &[usize] {
        &self.r0inv_digi
    }

    pub fn gamma_bins(&self) -> &[usize] {
        &self.gamma_digi
    }

    pub fn combo_keys(&self) -> &[u64] {
        &self.combo_digi
    }

    /// Per-hit population of the hit's combo bin after the fiducial cut.
    pub fn combo_counts(&self) -> &[usize] {
        &self.combo_counts
    }

    /// Votes every hit into the (r0inv, gamma) plane seen from `theta` and
    /// appends one group per populated bin to `groups`.
    ///
    /// Groups are appended in ascending combo-key order with ascending hit
    /// indices. Returns the number of appended groups.
    pub fn evaluate(
        &mut self,
        groups: &mut Vec<CandidateGroup>,
        theta: f64,
        binning: &HoughBinning,
        min_hits: usize,
    ) -> usize {
        let binning = binning.resolved();
        assert!(
            (binning.nbins_r0inv as u64) < COMBO_BASE && (binning.nbins_gamma as u64) < COMBO_BASE,
            "hough: bin counts must stay below the combo base {COMBO_BASE}, got {}x{}",
            binning.nbins_r0inv,
            binning.nbins_gamma
        );

        self.project(theta);
        digitize_range(
            &mut self.r0inv_digi,
            &self.r0inv,
            binning.nbins_r0inv,
            R0INV_RANGE.0,
            R0INV_RANGE.1,
        );
        digitize_range(
            &mut self.gamma_digi,
            &self.gamma,
            binning.nbins_gamma,
            GAMMA_RANGE.0,
            GAMMA_RANGE.1,
        );
        self.combine();
        self.count();
        fiducial_cut(&mut self.combo_counts, &self.r0inv_digi, binning.nbins_r0inv);
        fiducial_cut(&mut self.combo_counts, &self.gamma_digi, binning.nbins_gamma);

        let mut bins: BTreeMap<u64, CandidateGroup> = BTreeMap::new();
        for (i, (&key, &count)) in self.combo_digi.iter().zip(&self.combo_counts).enumerate() {
            if count < min_hits {
                continue;
            }
            bins.entry(key).or_default().push(i);
        }

        let appended = bins.len();
        groups.extend(bins.into_values());
        debug!(
            "hough: theta={:.5} hits={} groups={}",
            theta,
            self.len(),
            appended
        );
        appended
    }

    /// Writes the full engine state as pretty JSON.
    pub fn dump(&self, path: &Path) -> Result<(), String> {
        write_json_file(path, self)
    }

    fn project(&mut self, theta: f64) {
        for i in 0..self.hit_ids.len() {
            let rinv = 1.0 / self.r[i];
            self.r0inv[i] = 2.0 * (self.phi[i] - theta).cos() * rinv;
            self.gamma[i] = self.z[i] * rinv;
        }
    }

    fn combine(&mut self) {
        assert_eq!(
            self.r0inv_digi.len(),
            self.gamma_digi.len(),
            "hough: length mismatch between digitized columns"
        );
        for ((dst, &r), &g) in self
            .combo_digi
            .iter_mut()
            .zip(&self.r0inv_digi)
            .zip(&self.gamma_digi)
        {
            *dst = r as u64 + g as u64 * COMBO_BASE;
        }
    }

    fn count(&mut self) {
        assert_eq!(
            self.combo_counts.len(),
            self.hit_ids.len(),
            "hough: length mismatch between counts and hits"
        );
        let mut population: HashMap<u64, usize> = HashMap::with_capacity(self.len() / 2);
        for &key in &self.combo_digi {
            *population.entry(key).or_insert(0) += 1;
        }
        for (dst, key) in self.combo_counts.iter_mut().zip(&self.combo_digi) {
            *dst = population[key];
        }
    }
}

/// Zeroes the count of every hit whose bin sits on either edge of the range.
fn fiducial_cut(counts: &mut [usize], bins: &[usize], nbins: usize) {
    assert_eq!(
        counts.len(),
        bins.len(),
        "hough: length mismatch in fiducial cut"
    );
    for (count, &bin) in counts.iter_mut().zip(bins) {
        if bin == 0 || bin == nbins {
            *count = 0;
        }
    }
}
