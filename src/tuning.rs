//! Data-driven physics and lottery balance
//!
//! Defaults reproduce the shipped feel. A JSON object with any subset of the
//! fields can override them, e.g. `{"gravity": 0.5, "win_chance": 1.0}`.

use serde::{Deserialize, Serialize};

/// Physics constants and outcome probabilities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Downward acceleration per step
    pub gravity: f32,
    /// Velocity kept on a floor/wall bounce
    pub friction: f32,
    /// Restitution `e` in the pairwise impulse `-(1 + e) * vn`
    pub restitution: f32,
    /// Gravity multiplier for losers
    pub loser_gravity_scale: f32,
    /// Gravity multiplier for the decorative ball
    pub decorative_gravity_scale: f32,
    /// Mass multiplier applied to a loser
    pub loser_mass_factor: f32,
    /// Probability that a draw is a win
    pub win_chance: f64,
    /// Probability that a spawned ball is the decorative one
    pub decorative_chance: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 0.35,
            friction: 0.985,
            restitution: 0.1,
            loser_gravity_scale: 2.2,
            decorative_gravity_scale: 0.6,
            loser_mass_factor: 3.0,
            win_chance: 0.3,
            decorative_chance: 0.05,
        }
    }
}

impl Tuning {
    /// Parse overrides; absent fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Gravity for a body given its multiplier
    #[inline]
    pub fn scaled_gravity(&self, scale: f32) -> f32 {
        self.gravity * scale
    }
}
