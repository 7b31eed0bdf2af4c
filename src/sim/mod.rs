//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure:
//! - Randomness only through the caller's RNG
//! - Time only through the caller's `dt`
//! - No rendering or platform dependencies

pub mod camera;
pub mod collision;
pub mod state;
pub mod tick;

pub use camera::Camera;
pub use collision::{CollisionResult, arena_bounds_collision, circle_collision, circles_within};
pub use state::{Beacon, HEADING_UP, Rock, SessionState, Vehicle, World};
pub use tick::{DriveInput, TickReport, frame, tick};
