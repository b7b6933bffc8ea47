use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// Track label assigned to a hit by the clustering stage.
pub type TrackId = u32;

/// Label carried by hits that no surviving candidate group claimed.
pub const UNASSIGNED: TrackId = 0;

/// A single detector measurement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Hit {
    pub hit_id: u64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub volume_id: u32,
    pub layer_id: u32,
    pub module_id: u32,
}

impl Hit {
    pub fn new(hit_id: u64, x: f64, y: f64, z: f64) -> Self {
        Self {
            hit_id,
            x,
            y,
            z,
            ..Default::default()
        }
    }

    pub fn position(&self) -> Point3<f64> {
        Point3::new(self.x, self.y, self.z)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub hit_id: u64,
    pub ch0: i64,
    pub ch1: i64,
    pub value: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub particle_id: u64,
    pub vx: f64,
    pub vy: f64,
    pub vz: f64,
    pub px: f64,
    pub py: f64,
    pub pz: f64,
    pub q: i32,
    pub nhits: u32,
}

/// Monte-Carlo truth for one hit. `particle_id == 0` marks noise.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Truth {
    pub hit_id: u64,
    pub particle_id: u64,
    pub tx: f64,
    pub ty: f64,
    pub tz: f64,
    pub tpx: f64,
    pub tpy: f64,
    pub tpz: f64,
    pub weight: f64,
}

impl Truth {
    pub fn new(hit_id: u64, particle_id: u64, weight: f64) -> Self {
        Self {
            hit_id,
            particle_id,
            weight,
            ..Default::default()
        }
    }
}

/// Complete event: hits plus whatever auxiliary tables were loaded.
///
/// `truth` is empty when the event was read without Monte-Carlo information,
/// otherwise it is aligned index-for-index with `hits`.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Event {
    pub id: u64,
    pub hits: Vec<Hit>,
    pub cells: Vec<Cell>,
    pub particles: Vec<Particle>,
    pub truth: Vec<Truth>,
}

impl Event {
    pub fn has_truth(&self) -> bool {
        !self.truth.is_empty() && self.truth.len() == self.hits.len()
    }
}
