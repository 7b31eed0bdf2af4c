//! Dust Drift - A top-down arcade drifting toy
//!
//! Core modules:
//! - `sim`: Deterministic simulation (vehicle physics, collisions, scoring, camera)
//! - `tuning`: Data-driven physics and scoring balance
//! - `input`: Held-key set to per-frame drive intents
//! - `hud`: Plain read-outs for the UI layer
//! - `settings`: User preferences
//! - `clicker`: Click-counter run and its top-10 leaderboard

pub mod clicker;
pub mod hud;
pub mod input;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use clicker::{ClickRun, Leaderboard, Placement};
pub use hud::HudReadout;
pub use input::KeySet;
pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

/// Game configuration constants
pub mod consts {
    /// Largest frame delta the host may feed into a step (seconds)
    pub const MAX_FRAME_DT: f32 = 0.033;

    /// Arena dimensions
    pub const WORLD_WIDTH: f32 = 2600.0;
    pub const WORLD_HEIGHT: f32 = 2000.0;
    /// Distance from the arena edge inside which rocks and beacons spawn
    pub const SPAWN_INSET: f32 = 200.0;

    /// Obstacles
    pub const ROCK_COUNT: usize = 28;
    pub const ROCK_MIN_RADIUS: f32 = 18.0;
    pub const ROCK_MAX_RADIUS: f32 = 38.0;

    /// Beacons
    pub const BEACON_COUNT: usize = 6;
    pub const BEACON_RADIUS: f32 = 16.0;
    /// Extra reach added to beacon + vehicle radii when testing pickup
    pub const PICKUP_SLACK: f32 = 6.0;

    /// Vehicle collision circle
    pub const VEHICLE_RADIUS: f32 = 14.0;

    /// Engine (units/s^2)
    pub const ACCEL: f32 = 480.0;
    pub const BRAKE: f32 = 360.0;
    pub const BOOST_ACCEL: f32 = 520.0;
    /// Nitro reserve per second
    pub const BOOST_DRAIN: f32 = 0.5;
    pub const BOOST_REGEN: f32 = 0.15;
    /// Reserve needed before nitro fires
    pub const BOOST_THRESHOLD: f32 = 0.02;

    /// Steering: turn rate is speed / divisor, clamped (rad/s)
    pub const TURN_SPEED_DIVISOR: f32 = 120.0;
    pub const TURN_RATE_MIN: f32 = 0.6;
    pub const TURN_RATE_MAX: f32 = 2.6;

    /// Fraction of lateral velocity removed per step
    pub const GRIP: f32 = 0.18;
    pub const HANDBRAKE_GRIP: f32 = 0.06;
    /// Velocity multiplier per step
    pub const DRAG: f32 = 0.992;
    pub const HANDBRAKE_DRAG: f32 = 0.985;

    /// Velocity factor on the bounced axis at an arena edge
    pub const WALL_RESTITUTION: f32 = -0.4;
    /// Multiplier on the rock separation vector added to velocity
    pub const ROCK_IMPULSE: f32 = 2.0;
    /// Health per second lost in contact, regained otherwise
    pub const DAMAGE_RATE: f32 = 0.4;
    pub const REPAIR_RATE: f32 = 0.05;

    /// Scoring
    pub const BEACON_SCORE: u64 = 100;
    pub const PICKUP_BONUS_SPEED: f32 = 60.0;
    pub const PICKUP_BONUS_FACTOR: f32 = 0.1;
    pub const DRIFT_MIN_SPEED: f32 = 100.0;
    pub const DRIFT_RATE: f32 = 0.08;
    /// Beacon pulse phase advance (rad/s)
    pub const BEACON_PULSE_RATE: f32 = 3.0;

    /// Fraction of the gap the camera closes per frame
    pub const CAMERA_SMOOTHING: f32 = 0.08;
}

/// Forward unit vector for a heading in radians
#[inline]
pub fn heading_vector(heading: f32) -> Vec2 {
    Vec2::new(heading.cos(), heading.sin())
}

/// Sanitize a raw frame delta (seconds) before handing it to the simulation
///
/// Negative or non-finite deltas become zero; large ones are capped so a
/// frame hitch cannot blow up the integration.
#[inline]
pub fn clamp_frame_dt(raw: f32, max_dt: f32) -> f32 {
    if raw.is_finite() && raw > 0.0 {
        raw.min(max_dt)
    } else {
        0.0
    }
}

/// Create the seedable RNG used for world generation and beacon respawns
pub fn seeded_rng(seed: u64) -> Pcg32 {
    Pcg32::seed_from_u64(seed)
}
