//! Session state and core simulation types
//!
//! Everything a frame needs lives in `SessionState`; the host owns it and
//! hands it to `tick` once per frame.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::camera::Camera;
use crate::tuning::Tuning;

/// Heading that points up the screen (y grows downward)
pub const HEADING_UP: f32 = -std::f32::consts::FRAC_PI_2;

/// Uniform draw from `[min, max)`, collapsing to `min` for empty ranges
fn random_between(rng: &mut impl Rng, min: f32, max: f32) -> f32 {
    if max > min {
        rng.random_range(min..max)
    } else {
        min
    }
}

/// Random point inside the inset spawn region
fn random_spawn_point(rng: &mut impl Rng, tuning: &Tuning) -> Vec2 {
    let (min_x, min_y) = tuning.spawn_min();
    let (max_x, max_y) = tuning.spawn_max();
    Vec2::new(
        random_between(rng, min_x, max_x),
        random_between(rng, min_y, max_y),
    )
}

/// A circular obstacle, fixed for the session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rock {
    pub pos: Vec2,
    pub radius: f32,
}

impl Rock {
    pub fn spawn(rng: &mut impl Rng, tuning: &Tuning) -> Self {
        let pos = random_spawn_point(rng, tuning);
        let radius = random_between(rng, tuning.rock_min_radius, tuning.rock_max_radius);
        Self { pos, radius }
    }
}

/// A collectible that respawns elsewhere as soon as it is picked up
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Beacon {
    pub pos: Vec2,
    pub radius: f32,
    /// Pulse angle for rendering only
    pub phase: f32,
}

impl Beacon {
    pub fn spawn(rng: &mut impl Rng, tuning: &Tuning) -> Self {
        let pos = random_spawn_point(rng, tuning);
        let phase = random_between(rng, 0.0, std::f32::consts::TAU);
        Self {
            pos,
            radius: tuning.beacon_radius,
            phase,
        }
    }

    /// Pulse amount in [0, 1] for the renderer
    pub fn pulse(&self) -> f32 {
        (self.phase.sin() + 1.0) * 0.5
    }
}

/// Level geometry: a bounded rectangle with rocks and beacons
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    pub width: f32,
    pub height: f32,
    pub rocks: Vec<Rock>,
    /// Constant length for the whole session
    pub beacons: Vec<Beacon>,
}

impl World {
    /// Lay out a fresh arena. Rocks may overlap each other and the spawn point.
    pub fn generate(rng: &mut impl Rng, tuning: &Tuning) -> Self {
        let rocks = (0..tuning.rock_count)
            .map(|_| Rock::spawn(rng, tuning))
            .collect();
        let beacons = (0..tuning.beacon_count)
            .map(|_| Beacon::spawn(rng, tuning))
            .collect();

        Self {
            width: tuning.world_width,
            height: tuning.world_height,
            rocks,
            beacons,
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// The player's car
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Radians, never normalized
    pub heading: f32,
    /// 0..=1
    pub health: f32,
    /// Nitro reserve, 0..=1
    pub boost: f32,
    /// Never decreases within a session
    pub drift_score: f32,
}

impl Vehicle {
    /// Parked at `pos`, pointing up, fully repaired and fuelled
    pub fn parked_at(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            heading: HEADING_UP,
            health: 1.0,
            boost: 1.0,
            drift_score: 0.0,
        }
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

/// Complete per-session state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    pub tuning: Tuning,
    pub world: World,
    pub vehicle: Vehicle,
    /// Points from beacon pickups
    pub score: u64,
    /// Sum of step deltas (seconds)
    pub elapsed_time: f32,
    /// Smoothed render offset; survives `reset` so the view glides back
    pub camera: Camera,
}

impl SessionState {
    /// Start a session with the default tuning
    pub fn new(rng: &mut impl Rng) -> Self {
        Self::with_tuning(Tuning::default(), rng)
    }

    pub fn with_tuning(tuning: Tuning, rng: &mut impl Rng) -> Self {
        let world = World::generate(rng, &tuning);
        let vehicle = Vehicle::parked_at(world.center());
        let camera = Camera::at(vehicle.pos);
        Self {
            tuning,
            world,
            vehicle,
            score: 0,
            elapsed_time: 0.0,
            camera,
        }
    }

    /// Re-initialize world, vehicle and aggregates for a new session
    pub fn reset(&mut self, rng: &mut impl Rng) {
        self.world = World::generate(rng, &self.tuning);
        self.vehicle = Vehicle::parked_at(self.world.center());
        self.score = 0;
        self.elapsed_time = 0.0;
        log::info!(
            "Session reset: {} rocks, {} beacons",
            self.world.rocks.len(),
            self.world.beacons.len()
        );
    }
}
