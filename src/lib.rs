//! Lottery Balls - a canvas ball-lottery mini-game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bodies, collisions, lottery state)
//! - `settings`: Persisted player preferences (LocalStorage)
//! - `tuning`: Data-driven physics and lottery balance

pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::LotterySettings;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Smallest separation used when two centers coincide
    pub const MIN_DISTANCE: f32 = 0.001;

    /// Ball radius range (uniform)
    pub const BALL_MIN_RADIUS: f32 = 14.0;
    pub const BALL_MAX_RADIUS: f32 = 34.0;
    /// Spawn height above the top edge (uniform, negated)
    pub const SPAWN_MIN_HEIGHT: f32 = 50.0;
    pub const SPAWN_MAX_HEIGHT: f32 = 150.0;
    /// Initial horizontal speed range
    pub const SPAWN_MAX_VX: f32 = 6.0;
    /// Initial vertical speed range (always upward)
    pub const SPAWN_MIN_VY: f32 = -10.0;
    pub const SPAWN_MAX_VY: f32 = 0.0;

    /// Decorative (avatar) ball: fixed size, drops from top center
    pub const DECORATIVE_RADIUS: f32 = 60.0;

    /// Floor speed below which a bounce comes to rest
    pub const REST_SPEED: f32 = 1.0;

    /// Pending pulse: radius swings by this fraction of the base radius
    pub const PULSE_AMPLITUDE: f32 = 0.15;
    pub const PULSE_RATE: f32 = 0.3;
    /// Hue advance per step for winners (degrees)
    pub const WINNER_HUE_STEP: f32 = 4.0;
    /// Flicker periods in steps (half on, half off)
    pub const PENDING_FLICKER_PERIOD: u32 = 30;
    pub const LOSER_FLICKER_PERIOD: u32 = 20;

    /// Winner kick: lateral spread in [MIN, MIN + SPREAD), upward in [MIN, MIN + SPREAD)
    pub const WIN_KICK_LATERAL_MIN: f32 = 30.0;
    pub const WIN_KICK_LATERAL_SPREAD: f32 = 20.0;
    pub const WIN_KICK_UP_MIN: f32 = 20.0;
    pub const WIN_KICK_UP_SPREAD: f32 = 20.0;
    /// Loser: keep this fraction of horizontal speed, then slam down
    pub const LOSER_VX_DAMPING: f32 = 0.1;
    pub const LOSER_DROP_SPEED: f32 = 30.0;

    /// Host bindings: "+6" button and the `x` key
    pub const SPAWN_BATCH: usize = 6;
    pub const REMOVE_BATCH: usize = 5;
}

/// Unit contact normal from `a` to `b` and the distance between them.
///
/// Coincident points get `MIN_DISTANCE` instead of zero so callers can divide.
#[inline]
pub fn contact_normal(a: Vec2, b: Vec2) -> (Vec2, f32) {
    let delta = b - a;
    let mut dist = delta.length();
    if dist == 0.0 {
        dist = consts::MIN_DISTANCE;
    }
    (delta / dist, dist)
}

/// Whether `point` lies inside (or on) the circle at `center`
#[inline]
pub fn circle_contains(center: Vec2, radius: f32, point: Vec2) -> bool {
    center.distance(point) <= radius
}
