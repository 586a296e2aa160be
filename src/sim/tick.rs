//! Fixed step simulation tick
//!
//! One call advances every body by one frame. Collisions are resolved on the
//! previous positions first, then each body integrates.

use glam::Vec2;

use super::collision::resolve_all;
use super::state::{Body, BodyState, Lottery, Viewport};
use crate::consts::*;
use crate::tuning::Tuning;

/// Advance the lottery by one step
pub fn tick(state: &mut Lottery) {
    state.time_ticks += 1;

    let contacts = resolve_all(&mut state.bodies, state.tuning.restitution);
    if contacts > 0 {
        log::trace!("tick {}: {} contacts", state.time_ticks, contacts);
    }

    let viewport = state.viewport;
    let pointer = state.pointer;
    for body in &mut state.bodies {
        integrate(body, viewport, pointer, &state.tuning);
    }
}

/// Advance one body: pointer tracking while pending, physics otherwise
pub fn integrate(body: &mut Body, viewport: Viewport, pointer: Vec2, tuning: &Tuning) {
    body.flash = body.flash.wrapping_add(1);

    if body.is_pending() && !body.drawn {
        body.pos = pointer;
        body.radius =
            body.base_radius * (1.0 + (body.flash as f32 * PULSE_RATE).sin() * PULSE_AMPLITUDE);
        return;
    }

    body.radius = body.base_radius;

    if body.state == BodyState::Winner {
        body.hue = (body.hue + WINNER_HUE_STEP) % 360.0;
    }

    body.vel.y += tuning.scaled_gravity(body.gravity_scale(tuning));
    body.pos += body.vel;

    bounce_floor(body, viewport.height, tuning.friction);
    bounce_walls(body, viewport.width, tuning.friction);
}

/// Floor contact with a rest threshold
fn bounce_floor(body: &mut Body, height: f32, friction: f32) {
    if body.pos.y + body.radius > height {
        body.pos.y = height - body.radius;
        body.vel.y = if body.vel.y.abs() < REST_SPEED {
            0.0
        } else {
            -body.vel.y * friction
        };
    }
}

/// Side walls reflect without a rest threshold
fn bounce_walls(body: &mut Body, width: f32, friction: f32) {
    if body.pos.x + body.radius > width {
        body.pos.x = width - body.radius;
        body.vel.x = -body.vel.x * friction;
    }
    if body.pos.x - body.radius < 0.0 {
        body.pos.x = body.radius;
        body.vel.x = -body.vel.x * friction;
    }
}
