//! Read-only per-frame view for the renderer

use serde::Serialize;

use super::state::{Body, BodyId, Color, Lottery};

/// How to paint a body
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Paint {
    Fill(Color),
    /// The avatar image (decorative ball)
    Avatar,
}

/// Everything the renderer needs for one body
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RenderBody {
    pub id: BodyId,
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub paint: Paint,
}

impl From<&Body> for RenderBody {
    fn from(body: &Body) -> Self {
        let paint = if body.is_decorative() {
            Paint::Avatar
        } else {
            Paint::Fill(body.color())
        };
        Self {
            id: body.id,
            x: body.pos.x,
            y: body.pos.y,
            radius: body.radius,
            paint,
        }
    }
}

/// Borrowed view of the bodies; iterate it as many times as needed
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    bodies: &'a [Body],
}

impl<'a> Snapshot<'a> {
    pub fn iter(self) -> impl Iterator<Item = RenderBody> + Clone + 'a {
        self.bodies.iter().map(RenderBody::from)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// JSON array for the JS side
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.iter().collect::<Vec<_>>())
    }
}

impl<'a> IntoIterator for Snapshot<'a> {
    type Item = RenderBody;
    type IntoIter = std::iter::Map<std::slice::Iter<'a, Body>, fn(&'a Body) -> RenderBody>;

    fn into_iter(self) -> Self::IntoIter {
        self.bodies.iter().map(RenderBody::from as fn(&'a Body) -> RenderBody)
    }
}

impl Lottery {
    /// Render descriptors in collection order
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            bodies: &self.bodies,
        }
    }
}
