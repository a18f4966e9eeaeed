use glam::Vec2;

use crate::constants::bounds::CULL_MARGIN;
use crate::input::Viewport;

/// Individual particle in the field
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Unique, monotonically increasing id. Never reused.
    pub id: u64,
    /// Position in viewport pixels
    pub position: Vec2,
    /// Velocity in pixels per tick
    pub velocity: Vec2,
    /// Diameter in pixels
    pub size: f32,
    /// Derived from remaining lifetime on every update
    pub opacity: f32,
    /// Ticks since creation
    pub life: u32,
    /// Ticks until natural expiry
    pub max_life: f32,
}

/// Why a particle left the pool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleFate {
    /// `life` reached `max_life`
    Expired,
    /// Left the viewport padded by the cull margin
    OutOfBounds,
}

impl Particle {
    /// Create a freshly spawned particle
    pub fn new(id: u64, position: Vec2, velocity: Vec2, size: f32, max_life: f32) -> Self {
        Self {
            id,
            position,
            velocity,
            size,
            opacity: 1.0,
            life: 0,
            max_life,
        }
    }

    /// Euler step: one tick is one frame
    pub fn advance(&mut self) {
        self.position += self.velocity;
    }

    /// Count one tick of life and refresh the opacity
    pub fn age(&mut self) {
        self.life += 1;
        self.opacity = (1.0 - self.life as f32 / self.max_life).max(0.0);
    }

    pub fn is_expired(&self) -> bool {
        self.life as f32 >= self.max_life
    }

    /// Drawn radius of the solid core
    pub fn radius(&self) -> f32 {
        self.size * 0.5
    }

    /// Fraction of lifetime remaining (1 at spawn, 0 at expiry)
    pub fn lifetime_normalized(&self) -> f32 {
        (1.0 - self.life as f32 / self.max_life).clamp(0.0, 1.0)
    }

    /// `Some` when the particle must be culled this tick
    pub fn fate(&self, viewport: &Viewport) -> Option<ParticleFate> {
        if self.is_expired() {
            Some(ParticleFate::Expired)
        } else if !viewport.contains_with_margin(self.position, CULL_MARGIN) {
            Some(ParticleFate::OutOfBounds)
        } else {
            None
        }
    }
}
