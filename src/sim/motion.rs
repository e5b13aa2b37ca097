//! Arcade drift model
//!
//! Per-frame constants were tuned at 60 Hz; every step scales them by
//! `factor = dt * 60` so the feel is the same at any refresh rate.

use super::state::{EngineAudioState, InputIntent, KinematicState};
use crate::consts::*;
use crate::{heading, right_of};

/// Clamp a raw frame delta to something the integrator can digest.
///
/// Non-finite or negative readings fall back to the baseline tick.
#[inline]
pub fn sanitize_dt(dt: f32) -> f32 {
    if !dt.is_finite() || dt < 0.0 {
        BASELINE_DT
    } else {
        dt.min(MAX_DT)
    }
}

/// Advance the vehicle by one tick.
///
/// Returns the normalized throttle/speed pair the engine sound follows.
pub fn integrate(state: &mut KinematicState, intent: &InputIntent, dt: f32) -> EngineAudioState {
    let factor = sanitize_dt(dt) * BASELINE_HZ;

    // Rotation is driven directly by input, no angular momentum
    if intent.turn_left {
        state.rotation -= TURN_RATE * factor;
    }
    if intent.turn_right {
        state.rotation += TURN_RATE * factor;
    }

    // Brake overrides throttle when both are held
    let mut accel = 0.0;
    if intent.forward {
        accel = FORWARD_ACCEL * factor;
    }
    if intent.backward {
        accel = BRAKE_ACCEL * factor;
    }

    let fwd = heading(state.rotation);
    let right = right_of(fwd);
    let vel = state.vel + fwd * accel;

    // Forward damping eases off while carving a turn at speed
    let forward_coef = if intent.turning() && vel.length() > CARVE_MIN_SPEED {
        FORWARD_FRICTION_CARVING
    } else {
        FORWARD_FRICTION
    };
    let v_forward = vel.dot(fwd) * forward_coef.powf(factor);
    let v_lateral = vel.dot(right) * LATERAL_FRICTION.powf(factor);
    let mut vel = fwd * v_forward + right * v_lateral;

    let speed = vel.length();
    if speed > MAX_SPEED {
        vel = vel / speed * MAX_SPEED;
    }

    state.vel = vel;
    state.pos = (state.pos + vel).clamp(
        glam::Vec2::splat(WORLD_MIN),
        glam::Vec2::splat(WORLD_MAX),
    );

    EngineAudioState {
        throttle01: if intent.forward { 1.0 } else { 0.0 },
        speed01: (speed / MAX_SPEED).min(1.0),
    }
}
