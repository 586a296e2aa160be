//! Host-driven mutations: spawning, removal, hover and draws
//!
//! All of these run between ticks.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{Body, BodyId, BodyState, Color, Lottery, Outcome};
use crate::consts::*;

/// Something the host should react to after a click
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LotteryEvent {
    Won { id: BodyId },
    Lost { id: BodyId },
    /// The decorative ball was clicked
    OpenLink { id: BodyId },
}

impl Lottery {
    /// Append `n` balls above the top edge
    pub fn spawn(&mut self, n: usize) {
        for _ in 0..n {
            let body = if self.rng.random_bool(self.tuning.decorative_chance.clamp(0.0, 1.0)) {
                Body::decorative(self.next_body_id(), self.viewport)
            } else {
                self.random_ball()
            };
            self.bodies.push(body);
        }
        log::debug!("Spawned {} balls ({} total)", n, self.bodies.len());
    }

    fn random_ball(&mut self) -> Body {
        let id = self.next_body_id();
        let rng = &mut self.rng;
        let r = rng.random_range(BALL_MIN_RADIUS..BALL_MAX_RADIUS);
        // Narrow viewports still need a valid range
        let x = if self.viewport.width > 2.0 * r {
            rng.random_range(r..self.viewport.width - r)
        } else {
            self.viewport.width / 2.0
        };
        let y = -rng.random_range(SPAWN_MIN_HEIGHT..SPAWN_MAX_HEIGHT);
        let vx = rng.random_range(-SPAWN_MAX_VX..SPAWN_MAX_VX);
        let vy = rng.random_range(SPAWN_MIN_VY..SPAWN_MAX_VY);
        let color = Color::Hsl {
            hue: rng.random_range(0.0..360.0),
            saturation: 70.0,
            lightness: 60.0,
        };
        let hue = rng.random_range(0.0..360.0);
        Body::new(id, Vec2::new(x, y), Vec2::new(vx, vy), r, color, hue)
    }

    /// Remove up to `n` balls from the front
    pub fn remove_batch(&mut self, n: usize) {
        let n = n.min(self.bodies.len());
        // The lock outlives its ball: a removed winner still counts as the draw
        self.bodies.drain(..n);
        log::debug!("Removed {} balls ({} left)", n, self.bodies.len());
    }

    /// Track the pointer and update which ball is hovered
    pub fn set_pointer(&mut self, x: f32, y: f32) {
        self.pointer = Vec2::new(x, y);
        let pointer = self.pointer;
        let open = self.draws_open();
        let single = !self.unlocked;
        let mut taken = false;

        for body in &mut self.bodies {
            if body.is_decorative() {
                continue;
            }
            let eligible = open && !body.drawn && !(single && taken) && body.contains(pointer);
            if eligible {
                body.hover();
                taken = true;
            } else {
                body.unhover();
            }
        }
    }

    /// Handle a click at `(x, y)`
    ///
    /// A decorative ball under the click wins over any draw. Otherwise the
    /// first hovered ball is resolved. Returns `None` if nothing happened.
    pub fn resolve_at(&mut self, x: f32, y: f32) -> Option<LotteryEvent> {
        let point = Vec2::new(x, y);
        if let Some(deco) = self
            .bodies
            .iter()
            .find(|b| b.is_decorative() && b.contains(point))
        {
            log::info!("Decorative ball {:?} clicked", deco.id);
            return Some(LotteryEvent::OpenLink { id: deco.id });
        }

        if !self.draws_open() {
            return None;
        }

        let index = self.bodies.iter().position(|b| b.is_pending() && !b.drawn)?;
        let outcome = if self.rng.random_bool(self.tuning.win_chance.clamp(0.0, 1.0)) {
            Outcome::Win
        } else {
            Outcome::Lose
        };

        let kick = Vec2::new(
            (self.rng.random::<f32>() - 0.5)
                * (WIN_KICK_LATERAL_MIN + self.rng.random::<f32>() * WIN_KICK_LATERAL_SPREAD),
            -(WIN_KICK_UP_MIN + self.rng.random::<f32>() * WIN_KICK_UP_SPREAD),
        );
        let loser_mass = self.tuning.loser_mass_factor;

        let body = &mut self.bodies[index];
        body.drawn = true;
        body.state = outcome.state();
        body.radius = body.base_radius;
        match outcome {
            Outcome::Win => {
                body.mass_factor = 1.0;
                body.vel += kick;
            }
            Outcome::Lose => {
                body.mass_factor = loser_mass;
                body.vel.x *= LOSER_VX_DAMPING;
                body.vel.y = LOSER_DROP_SPEED;
            }
        }
        let id = body.id;

        if !self.unlocked {
            self.lock = Some(id);
        }

        log::info!("Ball {:?} drawn: {:?}", id, outcome);
        Some(match outcome {
            Outcome::Win => LotteryEvent::Won { id },
            Outcome::Lose => LotteryEvent::Lost { id },
        })
    }

    /// Allow repeated draws; every ball becomes drawable again
    pub fn unlock(&mut self) {
        self.unlocked = true;
        self.lock = None;
        for body in &mut self.bodies {
            body.drawn = false;
        }
        log::info!("Lottery unlocked");
    }

    /// Switch unlocked mode on startup without touching balls
    pub fn set_unlocked(&mut self, unlocked: bool) {
        self.unlocked = unlocked;
        if unlocked {
            self.lock = None;
        }
    }

    /// Drop every ball and the lock; unlocked mode is kept
    pub fn reset(&mut self) {
        self.bodies.clear();
        self.lock = None;
        self.pointer = Vec2::ZERO;
        log::info!("Lottery reset");
    }

    /// Number of balls currently following the pointer
    pub fn pending_count(&self) -> usize {
        self.bodies
            .iter()
            .filter(|b| matches!(b.state, BodyState::Pending { .. }))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Viewport;
    use crate::tuning::Tuning;

    fn lottery() -> Lottery {
        let tuning = Tuning {
            decorative_chance: 0.0,
            ..Tuning::default()
        };
        Lottery::with_tuning(42, Viewport::new(800.0, 600.0), tuning)
    }

    /// Place a plain ball at a known spot
    fn place(lottery: &mut Lottery, x: f32, y: f32) -> BodyId {
        let id = lottery.next_body_id();
        lottery.bodies.push(Body::new(
            id,
            Vec2::new(x, y),
            Vec2::new(2.0, 0.0),
            20.0,
            Color::BLACK,
            0.0,
        ));
        id
    }

    fn state_of(lottery: &Lottery, id: BodyId) -> BodyState {
        lottery.body(id).unwrap().state
    }

    #[test]
    fn test_spawn_above_viewport() {
        let mut lottery = lottery();
        lottery.spawn(3);
        lottery.spawn(6);
        assert_eq!(lottery.len(), 9);
        for b in &lottery.bodies {
            assert!(b.pos.y < 0.0);
            assert!(b.vel.y <= 0.0);
            assert!(b.pos.x - b.radius >= 0.0 && b.pos.x + b.radius <= 800.0);
            assert!((BALL_MIN_RADIUS..=BALL_MAX_RADIUS).contains(&b.base_radius));
            assert_eq!(b.state, BodyState::Falling);
        }
    }

    #[test]
    fn test_spawn_decorative() {
        let tuning = Tuning {
            decorative_chance: 1.0,
            ..Tuning::default()
        };
        let mut lottery = Lottery::with_tuning(1, Viewport::new(800.0, 600.0), tuning);
        lottery.spawn(2);
        assert!(lottery.bodies.iter().all(|b| b.is_decorative()));
        assert!(lottery.bodies.iter().all(|b| b.base_radius == DECORATIVE_RADIUS && b.pos.y < 0.0));
    }

    #[test]
    fn test_remove_batch() {
        let mut lottery = lottery();
        lottery.spawn(8);
        let sixth = lottery.bodies[5].id;
        lottery.remove_batch(5);
        assert_eq!(lottery.len(), 3);
        assert_eq!(lottery.bodies[0].id, sixth);

        lottery.remove_batch(5);
        assert!(lottery.is_empty());
        lottery.remove_batch(5);
        assert!(lottery.is_empty());
    }

    #[test]
    fn test_hover_and_draw() {
        let mut lottery = lottery();
        let a = place(&mut lottery, 100.0, 100.0);
        place(&mut lottery, 400.0, 100.0);

        lottery.set_pointer(105.0, 100.0);
        assert!(matches!(state_of(&lottery, a), BodyState::Pending { .. }));
        assert_eq!(lottery.pending_count(), 1);

        let event = lottery.resolve_at(105.0, 100.0).unwrap();
        let body = lottery.body(a).unwrap();
        assert!(matches!(body.state, BodyState::Winner | BodyState::Loser));
        assert!(body.drawn);
        assert_eq!(lottery.lock, Some(a));
        match event {
            LotteryEvent::Won { id } => assert_eq!(id, a),
            LotteryEvent::Lost { id } => {
                assert_eq!(id, a);
                assert_eq!(body.mass(), 400.0 * 3.0);
                assert_eq!(body.vel.y, LOSER_DROP_SPEED);
                assert!((body.vel.x - 0.2).abs() < 1e-6);
            }
            LotteryEvent::OpenLink { .. } => panic!("no decorative ball"),
        }
    }

    #[test]
    fn test_lock_blocks_second_draw() {
        let mut lottery = lottery();
        let a = place(&mut lottery, 100.0, 100.0);
        let b = place(&mut lottery, 400.0, 100.0);

        lottery.set_pointer(100.0, 100.0);
        assert!(lottery.resolve_at(100.0, 100.0).is_some());

        lottery.set_pointer(400.0, 100.0);
        assert_eq!(state_of(&lottery, b), BodyState::Falling);
        assert_eq!(lottery.pending_count(), 0);
        assert_eq!(lottery.resolve_at(400.0, 100.0), None);
        assert!(!lottery.body(b).unwrap().drawn);
        assert_ne!(state_of(&lottery, a), BodyState::Falling);
    }

    #[test]
    fn test_resolve_without_hover_is_noop() {
        let mut lottery = lottery();
        let a = place(&mut lottery, 100.0, 100.0);
        assert_eq!(lottery.resolve_at(100.0, 100.0), None);
        assert_eq!(state_of(&lottery, a), BodyState::Falling);
        assert_eq!(lottery.lock, None);
    }

    #[test]
    fn test_pointer_leaves() {
        let mut lottery = lottery();
        let a = place(&mut lottery, 100.0, 100.0);
        lottery.set_pointer(100.0, 100.0);
        lottery.set_pointer(700.0, 500.0);
        assert_eq!(state_of(&lottery, a), BodyState::Falling);
    }

    #[test]
    fn test_single_pending_when_overlapping() {
        let mut lottery = lottery();
        let a = place(&mut lottery, 100.0, 100.0);
        let b = place(&mut lottery, 110.0, 100.0);
        lottery.set_pointer(105.0, 100.0);
        assert!(lottery.body(a).unwrap().is_pending());
        assert_eq!(state_of(&lottery, b), BodyState::Falling);

        // Unlocked mode lets every ball under the pointer follow it
        lottery.unlock();
        lottery.set_pointer(105.0, 100.0);
        assert_eq!(lottery.pending_count(), 2);
        assert!(lottery.resolve_at(105.0, 100.0).is_some());
        assert!(lottery.body(a).unwrap().drawn);
        assert!(lottery.body(b).unwrap().is_pending());
        assert_eq!(lottery.lock, None);
    }

    #[test]
    fn test_unlock_allows_redraw() {
        let mut lottery = lottery();
        let a = place(&mut lottery, 100.0, 100.0);
        lottery.set_pointer(100.0, 100.0);
        lottery.resolve_at(100.0, 100.0);
        let first = state_of(&lottery, a);
        let first_outcome = lottery.body(a).unwrap().outcome();
        assert!(first_outcome.is_some());

        lottery.unlock();
        assert!(!lottery.body(a).unwrap().drawn);
        assert_eq!(lottery.lock, None);

        // The drawn ball may have moved; hover where it is now
        let pos = lottery.body(a).unwrap().pos;
        lottery.set_pointer(pos.x, pos.y);
        assert!(lottery.body(a).unwrap().is_pending());
        assert_eq!(lottery.body(a).unwrap().outcome(), first_outcome);

        lottery.set_pointer(-500.0, -500.0);
        assert_eq!(state_of(&lottery, a), first);

        lottery.set_pointer(pos.x, pos.y);
        assert!(lottery.resolve_at(pos.x, pos.y).is_some());
        assert!(lottery.body(a).unwrap().drawn);
        // Unlocked draws never take the lock
        assert_eq!(lottery.lock, None);
    }

    #[test]
    fn test_decorative_click_opens_link() {
        let mut lottery = lottery();
        let a = place(&mut lottery, 400.0, 300.0);
        let deco_id = lottery.next_body_id();
        let mut deco = Body::decorative(deco_id, lottery.viewport);
        deco.pos = Vec2::new(400.0, 300.0);
        lottery.bodies.push(deco);

        lottery.set_pointer(400.0, 300.0);
        assert!(lottery.body(a).unwrap().is_pending());
        assert_eq!(state_of(&lottery, deco_id), BodyState::Decorative);

        assert_eq!(
            lottery.resolve_at(400.0, 300.0),
            Some(LotteryEvent::OpenLink { id: deco_id })
        );
        assert!(!lottery.body(a).unwrap().drawn);
        assert_eq!(lottery.lock, None);
    }

    #[test]
    fn test_win_chance_extremes() {
        for (chance, won) in [(1.0, true), (0.0, false)] {
            let mut lottery = lottery();
            lottery.tuning.win_chance = chance;
            place(&mut lottery, 100.0, 100.0);
            lottery.set_pointer(100.0, 100.0);
            let event = lottery.resolve_at(100.0, 100.0).unwrap();
            assert_eq!(matches!(event, LotteryEvent::Won { .. }), won);
            if won {
                assert!(lottery.bodies[0].vel.y <= -WIN_KICK_UP_MIN);
                assert_eq!(lottery.bodies[0].mass(), 400.0);
            }
        }
    }

    #[test]
    fn test_reset() {
        let mut lottery = lottery();
        lottery.spawn(4);
        lottery.lock = Some(BodyId(1));
        lottery.unlocked = true;
        lottery.reset();
        assert!(lottery.is_empty());
        assert_eq!(lottery.lock, None);
        assert!(lottery.unlocked);
    }
}
