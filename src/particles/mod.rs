pub mod particle;
pub mod emitter;
pub mod particle_system;
pub mod physics;

pub use particle::{Particle, ParticleFate};
pub use emitter::ParticleEmitter;
pub use particle_system::{FieldStats, ParticleField, TickReport};
pub use physics::{repulsion_magnitude, ParticlePhysics};
