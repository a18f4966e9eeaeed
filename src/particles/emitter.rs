use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use crate::config::ParticleFieldConfig;
use crate::constants::spawn::{MAX_LIFE_MAX, MAX_LIFE_MIN, SIZE_MAX, SIZE_MIN, SPEED_SPREAD};
use crate::particles::Particle;

/// Spawns particles at the origin on a fixed cadence.
///
/// At most one particle per call to `try_spawn`: a tick that arrives late does
/// not trigger catch-up bursts.
#[derive(Debug, Clone)]
pub struct ParticleEmitter {
    /// Milliseconds between spawns
    interval_ms: f64,
    /// Speed range [min, max)
    speed_range: (f32, f32),
    /// Timestamp of the last successful spawn
    last_spawn_ms: Option<f64>,
    /// Next particle id
    next_id: u64,
}

impl ParticleEmitter {
    /// Create an emitter from the field configuration
    pub fn new(config: &ParticleFieldConfig) -> Self {
        Self {
            interval_ms: config.spawn_interval_ms(),
            speed_range: (config.particle_speed, config.particle_speed * SPEED_SPREAD),
            last_spawn_ms: None,
            next_id: 0,
        }
    }

    /// Whether enough time has passed since the last spawn
    pub fn is_due(&self, now_ms: f64) -> bool {
        match self.last_spawn_ms {
            None => true,
            Some(last) => now_ms - last > self.interval_ms,
        }
    }

    /// Spawn one particle at `origin` when due and below capacity
    pub fn try_spawn(
        &mut self,
        now_ms: f64,
        origin: Vec2,
        live: usize,
        capacity: usize,
        rng: &mut impl Rng,
    ) -> Option<Particle> {
        if live >= capacity || !self.is_due(now_ms) {
            return None;
        }

        let angle = rng.gen_range(0.0..TAU);
        let speed = sample(rng, self.speed_range);
        let size = rng.gen_range(SIZE_MIN..SIZE_MAX);
        let max_life = rng.gen_range(MAX_LIFE_MIN..MAX_LIFE_MAX);

        let particle = Particle::new(
            self.allocate_id(),
            origin,
            Vec2::from_angle(angle) * speed,
            size,
            max_life,
        );
        self.last_spawn_ms = Some(now_ms);

        log::trace!(
            "Spawned particle {} at ({:.1}, {:.1}), speed {:.3}, max_life {:.0}",
            particle.id,
            origin.x,
            origin.y,
            speed,
            max_life
        );

        Some(particle)
    }

    /// Hand out the next id
    pub fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    pub fn last_spawn_ms(&self) -> Option<f64> {
        self.last_spawn_ms
    }

    /// Number of ids handed out so far
    pub fn issued(&self) -> u64 {
        self.next_id
    }
}

/// Uniform sample from [min, max), or `min` when the range is empty
fn sample(rng: &mut impl Rng, (min, max): (f32, f32)) -> f32 {
    if min < max {
        rng.gen_range(min..max)
    } else {
        min
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn config(spawn_rate: f32) -> ParticleFieldConfig {
        ParticleFieldConfig {
            spawn_rate,
            ..ParticleFieldConfig::default()
        }
    }

    #[test]
    fn test_emitter_spawn() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut emitter = ParticleEmitter::new(&config(1.0));
        let origin = Vec2::new(200.0, 100.0);

        let particle = emitter.try_spawn(0.0, origin, 0, 10, &mut rng).unwrap();
        assert_eq!(particle.id, 0);
        assert_eq!(particle.position, origin);
        assert_eq!(particle.life, 0);
        assert_eq!(particle.opacity, 1.0);
        assert!((SIZE_MIN..SIZE_MAX).contains(&particle.size));
        assert!((MAX_LIFE_MIN..MAX_LIFE_MAX).contains(&particle.max_life));

        let speed = particle.velocity.length();
        assert!(speed >= 0.25 - 1e-5 && speed < 0.5 + 1e-5);

        // Interval is 125ms and must be strictly exceeded
        assert!(emitter.try_spawn(125.0, origin, 1, 10, &mut rng).is_none());
        let next = emitter.try_spawn(125.5, origin, 1, 10, &mut rng).unwrap();
        assert_eq!(next.id, 1);
    }

    #[test]
    fn test_refuses_at_capacity() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut emitter = ParticleEmitter::new(&config(1.0));

        assert!(emitter.try_spawn(0.0, Vec2::ZERO, 3, 3, &mut rng).is_none());
        // A refused spawn does not reset the schedule
        assert_eq!(emitter.last_spawn_ms(), None);
        assert!(emitter.try_spawn(0.0, Vec2::ZERO, 2, 3, &mut rng).is_some());
    }

    #[test]
    fn test_no_catch_up_burst() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut emitter = ParticleEmitter::new(&config(1.0));

        assert!(emitter.try_spawn(0.0, Vec2::ZERO, 0, 100, &mut rng).is_some());
        // Ten intervals late: still exactly one particle, then wait again
        assert!(emitter.try_spawn(1250.0, Vec2::ZERO, 1, 100, &mut rng).is_some());
        assert!(emitter.try_spawn(1260.0, Vec2::ZERO, 2, 100, &mut rng).is_none());
    }

    #[test]
    fn test_zero_speed() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut emitter = ParticleEmitter::new(&ParticleFieldConfig {
            particle_speed: 0.0,
            ..ParticleFieldConfig::default()
        });

        let particle = emitter.try_spawn(0.0, Vec2::ZERO, 0, 1, &mut rng).unwrap();
        assert_eq!(particle.velocity, Vec2::ZERO);
    }
}
