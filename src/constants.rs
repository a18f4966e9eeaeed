// Particle Field Constants - SINGLE SOURCE OF TRUTH
//
// This file contains the tuning constants used throughout the particle field.
// Configuration defaults, spawn ranges, culling margins and render stops all live here.
//
// CRITICAL: Do NOT define tuning constants anywhere else in the codebase!

/// Default values for `ParticleFieldConfig`
pub mod defaults {
    /// Hard cap on simultaneous live particles
    pub const MAX_PARTICLES: usize = 75;
    /// Nominal spawn rate (see `spawn::SPAWN_RATE_SCALE`)
    pub const SPAWN_RATE: f32 = 0.8;
    /// Base particle speed in pixels per tick
    pub const PARTICLE_SPEED: f32 = 0.25;
    /// Pointer influence radius in pixels
    pub const REPULSION_RADIUS: f32 = 100.0;
    /// Force applied at zero pointer distance
    pub const REPULSION_FORCE: f32 = 0.3;
    /// Warm gold that matches the logo
    pub const COLOR: [u8; 3] = [255, 215, 140];
}

/// Spawn parameters
pub mod spawn {
    /// Scales the nominal spawn rate into a perceptually tuned cadence:
    /// interval_ms = 1000 / (spawn_rate * SPAWN_RATE_SCALE)
    pub const SPAWN_RATE_SCALE: f32 = 8.0;
    pub const MS_PER_SECOND: f64 = 1000.0;

    /// Particle diameter range in pixels [min, max)
    pub const SIZE_MIN: f32 = 2.0;
    pub const SIZE_MAX: f32 = 8.0;

    /// Lifetime range in ticks [min, max)
    pub const MAX_LIFE_MIN: f32 = 200.0;
    pub const MAX_LIFE_MAX: f32 = 300.0;

    /// Speed is drawn from [particle_speed, particle_speed * SPEED_SPREAD)
    pub const SPEED_SPREAD: f32 = 2.0;
}

/// Pool storage
pub mod pool {
    /// Most particle slots reserved up front; larger caps grow on demand
    pub const MAX_PREALLOCATED: usize = 1024;
}

/// Culling parameters
pub mod bounds {
    /// Padding added to every side of the viewport before a particle is culled
    pub const CULL_MARGIN: f32 = 50.0;
}

/// Render parameters
pub mod render {
    /// Glow radius relative to the particle radius
    pub const GLOW_SCALE: f32 = 2.0;
    /// Middle gradient stop offset and its opacity factor
    pub const GLOW_MID_OFFSET: f32 = 0.5;
    pub const GLOW_MID_ALPHA: f32 = 0.5;
}

/// Host parameters
pub mod host {
    /// Frame interval used by the manual host (60 fps)
    pub const FRAME_INTERVAL_MS: f64 = 1000.0 / 60.0;
    /// Viewport assumed when the host cannot report one
    pub const FALLBACK_VIEWPORT_WIDTH: f32 = 1280.0;
    pub const FALLBACK_VIEWPORT_HEIGHT: f32 = 720.0;
    /// Media query for the reduced-motion accessibility preference
    pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";
}
