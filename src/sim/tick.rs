//! Per-frame simulation step
//!
//! Advances the session by one variable timestep. The host clamps `dt`
//! (see `frame`) and supplies the RNG; nothing here touches I/O.

use rand::Rng;

use super::collision::{arena_bounds_collision, circle_collision, circles_within};
use super::state::{Beacon, SessionState};
use crate::{clamp_frame_dt, heading_vector};

/// Held controls for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DriveInput {
    pub accelerate: bool,
    pub brake: bool,
    pub steer_left: bool,
    pub steer_right: bool,
    /// Cuts grip so the rear can slide out
    pub handbrake: bool,
    /// Nitro, only while accelerating
    pub boost: bool,
}

/// What happened during a step, for effects and logging
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Touched an arena edge or a rock
    pub collided: bool,
    pub beacons_collected: u32,
}

/// Advance the session by `dt` seconds
pub fn tick(
    state: &mut SessionState,
    input: &DriveInput,
    dt: f32,
    rng: &mut impl Rng,
) -> TickReport {
    let SessionState {
        tuning,
        world,
        vehicle,
        score,
        elapsed_time,
        ..
    } = state;

    let mut report = TickReport::default();
    *elapsed_time += dt;

    // Forward axis and speed are sampled once, before any of this step's forces
    let forward = heading_vector(vehicle.heading);
    let speed = vehicle.speed();

    // --- ENGINE ---
    let mut accel = 0.0;
    if input.accelerate {
        accel += tuning.accel;
    }
    if input.brake {
        accel -= tuning.brake;
    }

    if input.boost && vehicle.boost > tuning.boost_threshold && accel > 0.0 {
        accel += tuning.boost_accel;
        vehicle.boost = (vehicle.boost - dt * tuning.boost_drain).clamp(0.0, 1.0);
    } else {
        vehicle.boost = (vehicle.boost + dt * tuning.boost_regen).clamp(0.0, 1.0);
    }

    vehicle.vel += forward * accel * dt;

    // --- STEERING ---
    let turn_rate = tuning.turn_rate(speed);
    if input.steer_left {
        vehicle.heading -= turn_rate * dt;
    }
    if input.steer_right {
        vehicle.heading += turn_rate * dt;
    }

    // --- GRIP & DRAG ---
    let (grip, drag) = if input.handbrake {
        (tuning.handbrake_grip, tuning.handbrake_drag)
    } else {
        (tuning.grip, tuning.drag)
    };
    let forward_speed = vehicle.vel.dot(forward);
    let lateral = vehicle.vel - forward * forward_speed;
    vehicle.vel -= lateral * grip;
    vehicle.vel *= drag;

    vehicle.pos += vehicle.vel * dt;

    // --- COLLISIONS ---
    let radius = tuning.vehicle_radius;
    let mut hit = arena_bounds_collision(
        &mut vehicle.pos,
        &mut vehicle.vel,
        radius,
        world.width,
        world.height,
        tuning.wall_restitution,
    );

    // Each overlapping rock resolves independently, in order
    for rock in &world.rocks {
        let result = circle_collision(vehicle.pos, radius, rock.pos, rock.radius);
        if result.hit {
            vehicle.pos += result.push_out();
            vehicle.vel += result.separation * tuning.rock_impulse;
            hit = true;
        }
    }

    if hit {
        vehicle.health = (vehicle.health - dt * tuning.damage_rate).clamp(0.0, 1.0);
    } else {
        vehicle.health = (vehicle.health + dt * tuning.repair_rate).clamp(0.0, 1.0);
    }
    report.collided = hit;

    // --- BEACONS ---
    for beacon in world.beacons.iter_mut() {
        beacon.phase += dt * tuning.beacon_pulse_rate;
        if circles_within(
            vehicle.pos,
            radius,
            beacon.pos,
            beacon.radius,
            tuning.pickup_slack,
        ) {
            *score += tuning.beacon_score;
            let bonus = ((speed - tuning.pickup_bonus_speed).max(0.0) * tuning.pickup_bonus_factor)
                .round();
            vehicle.drift_score += bonus;
            log::debug!(
                "Beacon collected at ({:.0}, {:.0}), score {}, bonus {}",
                beacon.pos.x,
                beacon.pos.y,
                score,
                bonus
            );
            *beacon = Beacon::spawn(rng, tuning);
            report.beacons_collected += 1;
        }
    }

    // --- DRIFT ---
    if input.handbrake && speed > tuning.drift_min_speed {
        vehicle.drift_score += dt * speed * tuning.drift_rate;
    }

    report
}

/// One host frame: sanitize the raw delta, step, then ease the camera
pub fn frame(
    state: &mut SessionState,
    input: &DriveInput,
    raw_dt: f32,
    rng: &mut impl Rng,
) -> TickReport {
    let dt = clamp_frame_dt(raw_dt, state.tuning.max_frame_dt);
    let report = tick(state, input, dt, rng);
    state
        .camera
        .follow(state.vehicle.pos, state.tuning.camera_smoothing);
    report
}
