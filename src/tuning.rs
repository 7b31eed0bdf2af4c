//! Data-driven physics and scoring balance
//!
//! Every magic number the simulation uses lives here so balance passes can
//! happen in JSON without touching code. `Default` is the shipped feel.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Physics and scoring constants consumed by `sim::tick` and friends
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Arena ===
    pub world_width: f32,
    pub world_height: f32,
    pub spawn_inset: f32,
    pub rock_count: usize,
    pub rock_min_radius: f32,
    pub rock_max_radius: f32,
    pub beacon_count: usize,
    pub beacon_radius: f32,

    // === Engine ===
    /// Forward acceleration while the throttle is held (units/s²)
    pub accel: f32,
    /// Deceleration while the brake is held (units/s²)
    pub brake: f32,
    /// Extra acceleration while boosting (units/s²)
    pub boost_accel: f32,
    /// Boost reserve spent per second of boosting
    pub boost_drain: f32,
    /// Boost reserve regained per second when not boosting
    pub boost_regen: f32,
    /// Reserve must exceed this for boost to engage
    pub boost_threshold: f32,

    // === Handling ===
    /// Speed divided by this gives the turn rate (rad/s) before clamping
    pub turn_speed_divisor: f32,
    pub turn_rate_min: f32,
    pub turn_rate_max: f32,
    /// Fraction of lateral velocity removed per step
    pub grip: f32,
    pub handbrake_grip: f32,
    /// Velocity multiplier per step
    pub drag: f32,
    pub handbrake_drag: f32,

    // === Collisions ===
    pub vehicle_radius: f32,
    /// Velocity multiplier on the axis that hit an arena edge
    pub wall_restitution: f32,
    /// Separation vector multiplier added to velocity on rock contact
    pub rock_impulse: f32,
    /// Health lost per second of contact
    pub damage_rate: f32,
    /// Health regained per second without contact
    pub repair_rate: f32,

    // === Scoring ===
    pub beacon_score: u64,
    pub pickup_slack: f32,
    /// Speed above which a pickup also awards drift points
    pub pickup_bonus_speed: f32,
    pub pickup_bonus_factor: f32,
    /// Handbrake speed above which drift points accrue
    pub drift_min_speed: f32,
    pub drift_rate: f32,
    /// Beacon pulse phase advance (rad/s, cosmetic)
    pub beacon_pulse_rate: f32,

    // === Presentation ===
    pub camera_smoothing: f32,
    pub max_frame_dt: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            spawn_inset: SPAWN_INSET,
            rock_count: ROCK_COUNT,
            rock_min_radius: ROCK_MIN_RADIUS,
            rock_max_radius: ROCK_MAX_RADIUS,
            beacon_count: BEACON_COUNT,
            beacon_radius: BEACON_RADIUS,

            accel: ACCEL,
            brake: BRAKE,
            boost_accel: BOOST_ACCEL,
            boost_drain: BOOST_DRAIN,
            boost_regen: BOOST_REGEN,
            boost_threshold: BOOST_THRESHOLD,

            turn_speed_divisor: TURN_SPEED_DIVISOR,
            turn_rate_min: TURN_RATE_MIN,
            turn_rate_max: TURN_RATE_MAX,
            grip: GRIP,
            handbrake_grip: HANDBRAKE_GRIP,
            drag: DRAG,
            handbrake_drag: HANDBRAKE_DRAG,

            vehicle_radius: VEHICLE_RADIUS,
            wall_restitution: WALL_RESTITUTION,
            rock_impulse: ROCK_IMPULSE,
            damage_rate: DAMAGE_RATE,
            repair_rate: REPAIR_RATE,

            beacon_score: BEACON_SCORE,
            pickup_slack: PICKUP_SLACK,
            pickup_bonus_speed: PICKUP_BONUS_SPEED,
            pickup_bonus_factor: PICKUP_BONUS_FACTOR,
            drift_min_speed: DRIFT_MIN_SPEED,
            drift_rate: DRIFT_RATE,
            beacon_pulse_rate: BEACON_PULSE_RATE,

            camera_smoothing: CAMERA_SMOOTHING,
            max_frame_dt: MAX_FRAME_DT,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parse tuning, falling back to defaults on malformed input
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::warn!("Invalid tuning JSON ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// Turn rate for the given speed (rad/s)
    pub fn turn_rate(&self, speed: f32) -> f32 {
        (speed / self.turn_speed_divisor).clamp(self.turn_rate_min, self.turn_rate_max)
    }

    /// Lowest coordinate a spawned rock or beacon may take on each axis
    pub fn spawn_min(&self) -> (f32, f32) {
        (self.spawn_inset, self.spawn_inset)
    }

    /// Highest coordinate a spawned rock or beacon may take on each axis
    pub fn spawn_max(&self) -> (f32, f32) {
        (
            self.world_width - self.spawn_inset,
            self.world_height - self.spawn_inset,
        )
    }
}
