use glam::Vec2;

use crate::config::ParticleFieldConfig;
use crate::particles::Particle;

/// Magnitude of the pointer push at `distance`.
///
/// Linear falloff: `force` at distance 0, zero at and beyond `radius`.
pub fn repulsion_magnitude(distance: f32, radius: f32, force: f32) -> f32 {
    if distance >= radius {
        0.0
    } else {
        force * (1.0 - distance / radius)
    }
}

/// Pointer repulsion and integration for the particle field
#[derive(Debug, Clone)]
pub struct ParticlePhysics {
    pub repulsion_radius: f32,
    pub repulsion_force: f32,
    /// Velocity cap. `None` keeps repulsion purely additive.
    pub max_speed: Option<f32>,
}

impl ParticlePhysics {
    pub fn new(config: &ParticleFieldConfig) -> Self {
        Self {
            repulsion_radius: config.repulsion_radius,
            repulsion_force: config.repulsion_force,
            max_speed: config.max_speed,
        }
    }

    /// Velocity change the pointer applies to a particle at `position`
    pub fn repulsion_impulse(&self, position: Vec2, pointer: Vec2) -> Vec2 {
        let diff = position - pointer;
        let dist = diff.length();

        // Direction is undefined on top of the pointer
        if dist <= 0.0 || dist >= self.repulsion_radius {
            return Vec2::ZERO;
        }

        diff / dist * repulsion_magnitude(dist, self.repulsion_radius, self.repulsion_force)
    }

    /// Apply the pointer push to a particle's velocity
    pub fn apply_repulsion(&self, particle: &mut Particle, pointer: Vec2) {
        particle.velocity += self.repulsion_impulse(particle.position, pointer);

        if let Some(max_speed) = self.max_speed {
            particle.velocity = particle.velocity.clamp_length_max(max_speed);
        }
    }

    /// Full per-tick update: push, move, age
    pub fn update_particle(&self, particle: &mut Particle, pointer: Option<Vec2>) {
        if let Some(pointer) = pointer {
            self.apply_repulsion(particle, pointer);
        }
        particle.advance();
        particle.age();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn physics() -> ParticlePhysics {
        ParticlePhysics {
            repulsion_radius: 100.0,
            repulsion_force: 0.3,
            max_speed: None,
        }
    }

    #[test]
    fn test_magnitude_falloff() {
        assert_eq!(repulsion_magnitude(0.0, 100.0, 0.3), 0.3);
        assert!((repulsion_magnitude(50.0, 100.0, 0.3) - 0.15).abs() < 1e-6);
        assert_eq!(repulsion_magnitude(100.0, 100.0, 0.3), 0.0);
        assert_eq!(repulsion_magnitude(250.0, 100.0, 0.3), 0.0);
        assert_eq!(repulsion_magnitude(0.0, 0.0, 0.3), 0.0);
    }

    #[test]
    fn test_force_field() {
        let mut particle = Particle::new(0, Vec2::new(150.0, 100.0), Vec2::ZERO, 4.0, 100.0);

        physics().apply_repulsion(&mut particle, Vec2::new(100.0, 100.0));

        // Pushed away from the pointer along +x
        assert!((particle.velocity.x - 0.15).abs() < 1e-6);
        assert_eq!(particle.velocity.y, 0.0);
    }

    #[test]
    fn test_no_push_on_pointer_or_outside_radius() {
        let physics = physics();

        assert_eq!(physics.repulsion_impulse(Vec2::new(5.0, 5.0), Vec2::new(5.0, 5.0)), Vec2::ZERO);
        assert_eq!(physics.repulsion_impulse(Vec2::new(0.0, 0.0), Vec2::new(0.0, 100.0)), Vec2::ZERO);
    }

    #[test]
    fn test_repulsion_compounds_without_cap() {
        let physics = physics();
        let mut particle = Particle::new(0, Vec2::new(110.0, 100.0), Vec2::ZERO, 4.0, 100.0);

        physics.apply_repulsion(&mut particle, Vec2::new(100.0, 100.0));
        let first = particle.velocity.x;
        physics.apply_repulsion(&mut particle, Vec2::new(100.0, 100.0));

        assert!((particle.velocity.x - 2.0 * first).abs() < 1e-6);
    }

    #[test]
    fn test_velocity_cap() {
        let physics = ParticlePhysics {
            max_speed: Some(0.5),
            ..physics()
        };
        let mut particle = Particle::new(0, Vec2::new(101.0, 100.0), Vec2::new(0.4, 0.0), 4.0, 100.0);

        physics.apply_repulsion(&mut particle, Vec2::new(100.0, 100.0));

        assert!((particle.velocity.length() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_update_particle_order() {
        let mut particle = Particle::new(0, Vec2::new(150.0, 100.0), Vec2::ZERO, 4.0, 10.0);

        physics().update_particle(&mut particle, Some(Vec2::new(100.0, 100.0)));

        // Velocity changes before the position step
        assert!((particle.position.x - 150.15).abs() < 1e-4);
        assert_eq!(particle.life, 1);
        assert!((particle.opacity - 0.9).abs() < 1e-6);
    }
}
