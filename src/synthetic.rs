//! Deterministic synthetic events for demos and tests.
//!
//! Tracks are helices through the origin. Seen from above, a track is a circle
//! of radius `1/r0inv` whose centre sits along the azimuth `theta0`, so every
//! hit satisfies `r = 2·cos(phi − theta0)/r0inv`. Along `z` the hits follow
//! `z = gamma·r`. At `theta = theta0` all hits of a track therefore share one
//! (r0inv, gamma) point of the Hough plane.

use crate::hough::{GAMMA_RANGE, R0INV_RANGE};
use crate::hough::{DEFAULT_GAMMA_BINS, DEFAULT_R0INV_BINS};
use crate::types::{Event, Hit, Particle, Truth};
use nalgebra::{Rotation2, Vector2};

/// Default r0inv bin used by [`HelixSpec::centered`].
const CENTRED_R0INV_BIN: usize = 105;
/// Default gamma bin for slot 0 of [`HelixSpec::centered`].
const CENTRED_GAMMA_BIN: usize = 52;

#[derive(Clone, Debug, PartialEq)]
pub struct HelixSpec {
    /// Azimuth of the circle centre.
    pub theta0: f64,
    /// Inverse circle radius.
    pub r0inv: f64,
    /// `z/r` slope.
    pub gamma: f64,
    pub n_hits: usize,
    /// Range of `phi − theta0` covered by the hits, radians.
    pub psi_span: (f64, f64),
}

impl HelixSpec {
    /// Track whose Hough coordinates sit in the middle of a default bin.
    ///
    /// `gamma_slot` shifts the gamma bin so that tracks built with distinct
    /// slots never share a bin at any angle.
    pub fn centered(theta0: f64, gamma_slot: usize) -> Self {
        Self {
            theta0,
            r0inv: bin_centre(R0INV_RANGE, DEFAULT_R0INV_BINS, CENTRED_R0INV_BIN),
            gamma: bin_centre(GAMMA_RANGE, DEFAULT_GAMMA_BINS, CENTRED_GAMMA_BIN + gamma_slot),
            n_hits: 10,
            psi_span: (0.05, 0.5),
        }
    }

    pub fn with_hits(mut self, n_hits: usize) -> Self {
        self.n_hits = n_hits;
        self
    }

    /// Hit positions along the track, ordered by increasing `phi − theta0`.
    pub fn positions(&self) -> Vec<[f64; 3]> {
        let (lo, hi) = self.psi_span;
        let step = if self.n_hits > 1 {
            (hi - lo) / (self.n_hits - 1) as f64
        } else {
            0.0
        };
        let rot = Rotation2::new(self.theta0);
        (0..self.n_hits)
            .map(|i| {
                let psi = lo + step * i as f64;
                let r = 2.0 * psi.cos() / self.r0inv;
                let xy = rot * Vector2::new(r * psi.cos(), r * psi.sin());
                [xy.x, xy.y, self.gamma * r]
            })
            .collect()
    }
}

/// Value half-way between boundaries `bin − 1` and `bin` of the default
/// linear binning over `range`, i.e. a value that digitizes to `bin`.
fn bin_centre(range: (f64, f64), nbins: usize, bin: usize) -> f64 {
    let step = (range.1 - range.0) / (nbins - 1) as f64;
    range.0 + (bin as f64 - 0.5) * step
}

/// Small linear congruential generator; keeps noise reproducible.
struct Lcg(u64);

impl Lcg {
    fn next_f64(&mut self) -> f64 {
        self.0 = self
            .0
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }

    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }
}

pub struct SyntheticEvent;

impl SyntheticEvent {
    pub fn builder() -> SyntheticEventBuilder {
        SyntheticEventBuilder::default()
    }
}

#[derive(Clone, Debug, Default)]
pub struct SyntheticEventBuilder {
    event_id: u64,
    tracks: Vec<HelixSpec>,
    noise_hits: usize,
    seed: u64,
}

impl SyntheticEventBuilder {
    pub fn event_id(mut self, id: u64) -> Self {
        self.event_id = id;
        self
    }

    pub fn track(mut self, spec: HelixSpec) -> Self {
        self.tracks.push(spec);
        self
    }

    /// Scattered hits that belong to no particle (truth id 0, weight 0).
    pub fn noise(mut self, n_hits: usize, seed: u64) -> Self {
        self.noise_hits = n_hits;
        self.seed = seed;
        self
    }

    /// Track hits come first, track by track, followed by the noise hits.
    /// Hit ids are 1-based and follow that order; particle ids are 1-based by
    /// track. Track hit weights are uniform and sum to 1.
    pub fn build(self) -> Event {
        let n_track_hits: usize = self.tracks.iter().map(|t| t.n_hits).sum();
        let weight = if n_track_hits > 0 {
            1.0 / n_track_hits as f64
        } else {
            0.0
        };

        let mut event = Event {
            id: self.event_id,
            ..Default::default()
        };
        let mut next_id = 1u64;
        for (k, spec) in self.tracks.iter().enumerate() {
            let particle_id = k as u64 + 1;
            for [x, y, z] in spec.positions() {
                event.hits.push(Hit::new(next_id, x, y, z));
                event.truth.push(Truth {
                    tx: x,
                    ty: y,
                    tz: z,
                    ..Truth::new(next_id, particle_id, weight)
                });
                next_id += 1;
            }
            event.particles.push(Particle {
                particle_id,
                q: 1,
                nhits: spec.n_hits as u32,
                ..Default::default()
            });
        }

        let mut rng = Lcg(self.seed ^ 0x9e37_79b9_7f4a_7c15);
        for _ in 0..self.noise_hits {
            let phi = rng.uniform(-std::f64::consts::PI, std::f64::consts::PI);
            let r = rng.uniform(30.0, 1000.0);
            let z = rng.uniform(-1000.0, 1000.0);
            let (x, y) = (r * phi.cos(), r * phi.sin());
            event.hits.push(Hit::new(next_id, x, y, z));
            event.truth.push(Truth::new(next_id, 0, 0.0));
            next_id += 1;
        }
        event
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hough::digitize::{bin_index, linspace};

    #[test]
    fn centred_spec_digitizes_into_chosen_bins() {
        let spec = HelixSpec::centered(0.0, 3);
        let r0inv_bins = linspace(DEFAULT_R0INV_BINS, R0INV_RANGE.0, R0INV_RANGE.1);
        let gamma_bins = linspace(DEFAULT_GAMMA_BINS, GAMMA_RANGE.0, GAMMA_RANGE.1);
        assert_eq!(bin_index(&r0inv_bins, spec.r0inv), CENTRED_R0INV_BIN);
        assert_eq!(bin_index(&gamma_bins, spec.gamma), CENTRED_GAMMA_BIN + 3);
    }

    #[test]
    fn positions_lie_on_the_helix() {
        let spec = HelixSpec::centered(2.5, 0);
        for [x, y, z] in spec.positions() {
            let r = x.hypot(y);
            let phi = y.atan2(x);
            let r0inv = 2.0 * (phi - spec.theta0).cos() / r;
            assert!((r0inv - spec.r0inv).abs() < 1e-12);
            assert!((z / r - spec.gamma).abs() < 1e-9);
        }
    }

    #[test]
    fn builder_layout_and_weights() {
        let event = SyntheticEvent::builder()
            .event_id(9)
            .track(HelixSpec::centered(0.0, 0).with_hits(4))
            .track(HelixSpec::centered(1.0, 1).with_hits(6))
            .noise(5, 3)
            .build();
        assert_eq!(event.id, 9);
        assert_eq!(event.hits.len(), 15);
        assert!(event.has_truth());
        let total: f64 = event.truth.iter().map(|t| t.weight).sum();
        assert!((total - 1.0).abs() < 1e-12);
        assert_eq!(event.truth[3].particle_id, 1);
        assert_eq!(event.truth[4].particle_id, 2);
        assert!(event.truth[10..].iter().all(|t| t.particle_id == 0));
        assert_eq!(event.hits[14].hit_id, 15);
    }
}
