//! Pairwise ball-ball collision response
//!
//! Overlapping balls are pushed apart along the contact normal, the lighter
//! one moving further, then an impulse is applied if they are approaching.

use super::state::Body;
use crate::contact_normal;

/// Resolve overlap and approach velocity between two bodies
///
/// Returns `true` if the bodies overlapped.
pub fn resolve_pair(b1: &mut Body, b2: &mut Body, restitution: f32) -> bool {
    let (normal, dist) = contact_normal(b1.pos, b2.pos);
    let min_dist = b1.radius + b2.radius;
    if dist >= min_dist {
        return false;
    }

    let m1 = b1.mass();
    let m2 = b2.mass();
    let total = m1 + m2;
    let overlap = min_dist - dist;

    // Heavier body moves less
    b1.pos -= normal * overlap * (m2 / total);
    b2.pos += normal * overlap * (m1 / total);

    let normal_vel = (b2.vel - b1.vel).dot(normal);
    if normal_vel > 0.0 {
        // Already separating
        return true;
    }

    let j = -(1.0 + restitution) * normal_vel / (1.0 / m1 + 1.0 / m2);
    b1.vel -= normal * (j / m1);
    b2.vel += normal * (j / m2);
    true
}

/// Resolve every unordered pair once, in collection order
///
/// Returns the number of overlapping pairs.
pub fn resolve_all(bodies: &mut [Body], restitution: f32) -> usize {
    let mut contacts = 0;
    for i in 0..bodies.len() {
        let (head, tail) = bodies.split_at_mut(i + 1);
        let b1 = &mut head[i];
        for b2 in tail.iter_mut() {
            if resolve_pair(b1, b2, restitution) {
                contacts += 1;
            }
        }
    }
    contacts
}
