use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::config::ParticleFieldConfig;
use crate::constants::pool::MAX_PREALLOCATED;
use crate::error::FieldResult;
use crate::input::{AmbientSnapshot, Viewport};
use crate::particles::{Particle, ParticleEmitter, ParticleFate, ParticlePhysics};
use crate::renderer::{render_particles, DrawSurface};

/// What happened during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TickReport {
    pub spawned: bool,
    pub expired: usize,
    pub out_of_bounds: usize,
    pub live: usize,
}

/// Statistics about the particle field
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct FieldStats {
    pub live_particles: usize,
    pub capacity_used: f32,
    pub total_spawned: u64,
    pub total_expired: u64,
    pub total_out_of_bounds: u64,
    pub ticks: u64,
}

/// Capped pool of particles emanating from a moving origin.
///
/// Each tick runs spawn, update, cull and render in that order. The pool is
/// owned here and never exposed mutably.
pub struct ParticleField {
    config: ParticleFieldConfig,
    /// All live particles
    particles: Vec<Particle>,
    emitter: ParticleEmitter,
    physics: ParticlePhysics,
    rng: StdRng,
    stats: FieldStats,
    /// Whether the surface still shows particles from an earlier frame
    drew_last_frame: bool,
}

impl ParticleField {
    /// Create a field seeded from OS entropy
    pub fn new(config: ParticleFieldConfig) -> FieldResult<Self> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create a field with a deterministic random sequence
    pub fn with_seed(config: ParticleFieldConfig, seed: u64) -> FieldResult<Self> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: ParticleFieldConfig, rng: StdRng) -> FieldResult<Self> {
        config.validate()?;

        Ok(Self {
            particles: Vec::with_capacity(config.max_particles.min(MAX_PREALLOCATED)),
            emitter: ParticleEmitter::new(&config),
            physics: ParticlePhysics::new(&config),
            rng,
            stats: FieldStats::default(),
            drew_last_frame: false,
            config,
        })
    }

    /// Run one full tick at host time `now_ms`
    pub fn tick(
        &mut self,
        now_ms: f64,
        input: &AmbientSnapshot,
        surface: Option<&mut dyn DrawSurface>,
    ) -> TickReport {
        let spawned = self.spawn(now_ms, input.origin);
        self.update(input.pointer);
        let (expired, out_of_bounds) = self.cull(&input.viewport);
        self.render(&input.viewport, surface);

        self.stats.ticks += 1;

        TickReport {
            spawned,
            expired,
            out_of_bounds,
            live: self.particles.len(),
        }
    }

    /// Spawn at most one particle at `origin`
    pub fn spawn(&mut self, now_ms: f64, origin: Vec2) -> bool {
        let particle = self.emitter.try_spawn(
            now_ms,
            origin,
            self.particles.len(),
            self.config.max_particles,
            &mut self.rng,
        );

        match particle {
            Some(particle) => {
                self.particles.push(particle);
                self.stats.total_spawned += 1;
                true
            }
            None => false,
        }
    }

    /// Add a particle with explicit parameters, respecting the cap.
    /// Returns the assigned id.
    pub fn insert(&mut self, position: Vec2, velocity: Vec2, size: f32, max_life: f32) -> Option<u64> {
        if self.particles.len() >= self.config.max_particles {
            return None;
        }

        let id = self.emitter.allocate_id();
        self.particles
            .push(Particle::new(id, position, velocity, size, max_life));
        self.stats.total_spawned += 1;
        Some(id)
    }

    /// Push, move and age every particle
    pub fn update(&mut self, pointer: Option<Vec2>) {
        for particle in &mut self.particles {
            self.physics.update_particle(particle, pointer);
        }
    }

    /// Remove expired and out-of-bounds particles. Order is not preserved.
    /// Returns (expired, out_of_bounds).
    pub fn cull(&mut self, viewport: &Viewport) -> (usize, usize) {
        let mut expired = 0;
        let mut out_of_bounds = 0;

        // Walk backwards so swap_remove only moves already-checked particles
        let mut index = self.particles.len();
        while index > 0 {
            index -= 1;
            match self.particles[index].fate(viewport) {
                Some(ParticleFate::Expired) => expired += 1,
                Some(ParticleFate::OutOfBounds) => out_of_bounds += 1,
                None => continue,
            }
            self.particles.swap_remove(index);
        }

        self.stats.total_expired += expired as u64;
        self.stats.total_out_of_bounds += out_of_bounds as u64;
        (expired, out_of_bounds)
    }

    /// Draw the pool. A missing surface skips drawing for this tick.
    ///
    /// When the pool has just emptied the surface is cleared once so the last
    /// frame does not linger, then left alone.
    pub fn render(&mut self, viewport: &Viewport, surface: Option<&mut dyn DrawSurface>) {
        let Some(surface) = surface else {
            return;
        };

        if surface.size() != *viewport {
            surface.resize(*viewport);
        }

        if self.particles.is_empty() {
            if self.drew_last_frame {
                surface.clear();
                self.drew_last_frame = false;
            }
            return;
        }

        render_particles(&self.particles, self.config.color, surface);
        self.drew_last_frame = true;
    }

    /// Discard every particle
    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    pub fn config(&self) -> &ParticleFieldConfig {
        &self.config
    }

    pub fn emitter(&self) -> &ParticleEmitter {
        &self.emitter
    }

    pub fn stats(&self) -> FieldStats {
        FieldStats {
            live_particles: self.particles.len(),
            capacity_used: if self.config.max_particles == 0 {
                0.0
            } else {
                self.particles.len() as f32 / self.config.max_particles as f32
            },
            ..self.stats.clone()
        }
    }
}
