use std::sync::Arc;

use glam::Vec2;
use parking_lot::RwLock;

use crate::constants::host::{FALLBACK_VIEWPORT_HEIGHT, FALLBACK_VIEWPORT_WIDTH};

/// Viewport dimensions in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Whether `point` lies inside the viewport padded by `margin` on every side
    pub fn contains_with_margin(&self, point: Vec2, margin: f32) -> bool {
        point.x >= -margin
            && point.x <= self.width + margin
            && point.y >= -margin
            && point.y <= self.height + margin
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(FALLBACK_VIEWPORT_WIDTH, FALLBACK_VIEWPORT_HEIGHT)
    }
}

/// Copy of the ambient inputs taken at the start of a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientSnapshot {
    /// Spawn point supplied by the parent (logo centre)
    pub origin: Vec2,
    /// Last known pointer position; `None` until the first pointer event
    pub pointer: Option<Vec2>,
    pub viewport: Viewport,
}

impl Default for AmbientSnapshot {
    fn default() -> Self {
        let viewport = Viewport::default();
        Self {
            origin: viewport.center(),
            pointer: None,
            viewport,
        }
    }
}

/// Shared handle to the last-known origin, pointer and viewport.
///
/// Event handlers and the parent write through it; the engine only ever reads a
/// snapshot. Clones share the same state.
#[derive(Debug, Clone, Default)]
pub struct AmbientInput {
    state: Arc<RwLock<AmbientSnapshot>>,
}

impl AmbientInput {
    pub fn new(snapshot: AmbientSnapshot) -> Self {
        Self {
            state: Arc::new(RwLock::new(snapshot)),
        }
    }

    pub fn set_origin(&self, origin: Vec2) {
        self.state.write().origin = origin;
    }

    pub fn set_pointer(&self, pointer: Vec2) {
        self.state.write().pointer = Some(pointer);
    }

    /// Forget the pointer, e.g. when it leaves the window
    pub fn clear_pointer(&self) {
        self.state.write().pointer = None;
    }

    pub fn set_viewport(&self, viewport: Viewport) {
        self.state.write().viewport = viewport;
    }

    pub fn viewport(&self) -> Viewport {
        self.state.read().viewport
    }

    pub fn snapshot(&self) -> AmbientSnapshot {
        *self.state.read()
    }
}
