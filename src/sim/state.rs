//! Lottery state and core simulation types

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::tuning::Tuning;
use crate::circle_contains;

/// Stable body identifier (allocation order)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BodyId(pub u32);

/// Result of a lottery draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Lose,
}

impl Outcome {
    /// The resting state a body holds after this outcome
    pub fn state(self) -> BodyState {
        match self {
            Outcome::Win => BodyState::Winner,
            Outcome::Lose => BodyState::Loser,
        }
    }
}

/// Lottery state of a body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyState {
    /// Ordinary ball under physics
    Falling,
    /// Hovered: follows the pointer and waits for a click.
    /// `prior` is the outcome held before hovering (only set after an unlock).
    Pending { prior: Option<Outcome> },
    Winner,
    Loser,
    /// Avatar ball, never takes part in the lottery
    Decorative,
}

/// A flat color the host can paint
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Color {
    Hsl {
        hue: f32,
        saturation: f32,
        lightness: f32,
    },
    Rgb(u8, u8, u8),
}

impl Color {
    pub const BLACK: Color = Color::Rgb(0x00, 0x00, 0x00);
    pub const CHARCOAL: Color = Color::Rgb(0x22, 0x22, 0x22);
    pub const LIGHT_GRAY: Color = Color::Rgb(0xaa, 0xaa, 0xaa);
    pub const GRAY: Color = Color::Rgb(0x77, 0x77, 0x77);

    /// CSS color string for canvas fill styles
    pub fn css(&self) -> String {
        match *self {
            Color::Hsl {
                hue,
                saturation,
                lightness,
            } => format!("hsl({:.1},{}%,{}%)", hue, saturation, lightness),
            Color::Rgb(r, g, b) => format!("#{:02x}{:02x}{:02x}", r, g, b),
        }
    }
}

/// Visible drawing area; bodies bounce off its floor and side walls
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// A ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub id: BodyId,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Displayed radius (pulses while pending)
    pub radius: f32,
    /// Physical radius for collisions and mass
    pub base_radius: f32,
    /// Extra mass multiplier (1.0 unless the body lost a draw)
    pub mass_factor: f32,
    pub state: BodyState,
    /// Already resolved by a draw
    pub drawn: bool,
    /// Steps since spawn, drives pulses and flicker
    pub flash: u32,
    /// Winner color cycle (degrees)
    pub hue: f32,
    pub base_color: Color,
}

impl Body {
    pub fn new(id: BodyId, pos: Vec2, vel: Vec2, radius: f32, base_color: Color, hue: f32) -> Self {
        Self {
            id,
            pos,
            vel,
            radius,
            base_radius: radius,
            mass_factor: 1.0,
            state: BodyState::Falling,
            drawn: false,
            flash: 0,
            hue,
            base_color,
        }
    }

    /// The avatar ball dropped from the top center of the viewport
    pub fn decorative(id: BodyId, viewport: Viewport) -> Self {
        let mut body = Self::new(
            id,
            Vec2::new(viewport.width / 2.0, -DECORATIVE_RADIUS),
            Vec2::ZERO,
            DECORATIVE_RADIUS,
            Color::Rgb(0xff, 0xff, 0xff),
            0.0,
        );
        body.state = BodyState::Decorative;
        body
    }

    /// Area-proportional mass
    #[inline]
    pub fn mass(&self) -> f32 {
        self.base_radius * self.base_radius * self.mass_factor
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        matches!(self.state, BodyState::Pending { .. })
    }

    #[inline]
    pub fn is_decorative(&self) -> bool {
        self.state == BodyState::Decorative
    }

    /// Outcome of the last draw, if any (also while hovered again)
    pub fn outcome(&self) -> Option<Outcome> {
        match self.state {
            BodyState::Winner => Some(Outcome::Win),
            BodyState::Loser => Some(Outcome::Lose),
            BodyState::Pending { prior } => prior,
            BodyState::Falling | BodyState::Decorative => None,
        }
    }

    /// Whether `point` lies within the displayed radius
    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        circle_contains(self.pos, self.radius, point)
    }

    /// Start following the pointer
    pub fn hover(&mut self) {
        if !self.is_pending() && !self.is_decorative() {
            self.state = BodyState::Pending {
                prior: self.outcome(),
            };
        }
    }

    /// Stop following the pointer, restoring the prior state
    pub fn unhover(&mut self) {
        if let BodyState::Pending { prior } = self.state {
            self.state = prior.map_or(BodyState::Falling, Outcome::state);
        }
    }

    /// Gravity multiplier for this body
    pub fn gravity_scale(&self, tuning: &Tuning) -> f32 {
        match self.state {
            BodyState::Loser => tuning.loser_gravity_scale,
            BodyState::Decorative => tuning.decorative_gravity_scale,
            _ => 1.0,
        }
    }

    /// Current fill color derived from state and flash counter
    pub fn color(&self) -> Color {
        match self.state {
            BodyState::Pending { .. } => {
                if self.flash % PENDING_FLICKER_PERIOD < PENDING_FLICKER_PERIOD / 2 {
                    Color::LIGHT_GRAY
                } else {
                    Color::GRAY
                }
            }
            BodyState::Winner => Color::Hsl {
                hue: self.hue,
                saturation: 100.0,
                lightness: 60.0,
            },
            BodyState::Loser => {
                if self.flash % LOSER_FLICKER_PERIOD < LOSER_FLICKER_PERIOD / 2 {
                    Color::BLACK
                } else {
                    Color::CHARCOAL
                }
            }
            BodyState::Falling | BodyState::Decorative => self.base_color,
        }
    }
}

/// Complete lottery state
#[derive(Debug, Clone)]
pub struct Lottery {
    pub tuning: Tuning,
    pub viewport: Viewport,
    /// Last known pointer position
    pub pointer: Vec2,
    /// Bodies in spawn order
    pub bodies: Vec<Body>,
    /// Body holding the resolution lock
    pub lock: Option<BodyId>,
    /// Repeated draws allowed; the lock is never taken
    pub unlocked: bool,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub(crate) rng: Pcg32,
    next_id: u32,
}

impl Lottery {
    /// Create an empty lottery with the given seed
    pub fn new(seed: u64, viewport: Viewport) -> Self {
        Self::with_tuning(seed, viewport, Tuning::default())
    }

    pub fn with_tuning(seed: u64, viewport: Viewport, tuning: Tuning) -> Self {
        Self {
            tuning,
            viewport,
            pointer: Vec2::ZERO,
            bodies: Vec::new(),
            lock: None,
            unlocked: false,
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Allocate a new body ID
    pub fn next_body_id(&mut self) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Update bounds; takes effect on the next tick
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Viewport::new(width, height);
    }

    /// Whether a new draw may start
    #[inline]
    pub fn draws_open(&self) -> bool {
        self.unlocked || self.lock.is_none()
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}
