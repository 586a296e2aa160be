//! Deterministic simulation module
//!
//! All lottery logic lives here. This module must be pure and deterministic:
//! - One fixed step per tick
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod interaction;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use collision::{resolve_all, resolve_pair};
pub use interaction::LotteryEvent;
pub use snapshot::{Paint, RenderBody, Snapshot};
pub use state::{Body, BodyId, BodyState, Color, Lottery, Outcome, Viewport};
pub use tick::{integrate, tick};

impl Lottery {
    /// Advance one frame
    pub fn tick(&mut self) {
        tick::tick(self);
    }
}
