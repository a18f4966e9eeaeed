use crate::constants::render::{GLOW_MID_ALPHA, GLOW_MID_OFFSET, GLOW_SCALE};
use crate::particles::Particle;
use crate::renderer::{Disk, DrawSurface, Glow, GradientStop, Rgba};

/// Gradient stops for a glow at `opacity`: full at the centre, half at the
/// midpoint, transparent at the edge
pub fn glow_stops(color: [u8; 3], opacity: f32) -> [GradientStop; 3] {
    [
        GradientStop {
            offset: 0.0,
            color: Rgba::new(color, opacity),
        },
        GradientStop {
            offset: GLOW_MID_OFFSET,
            color: Rgba::new(color, opacity * GLOW_MID_ALPHA),
        },
        GradientStop {
            offset: 1.0,
            color: Rgba::new(color, 0.0),
        },
    ]
}

pub fn glow_for(particle: &Particle, color: [u8; 3]) -> Glow {
    Glow {
        center: particle.position,
        radius: particle.radius() * GLOW_SCALE,
        stops: glow_stops(color, particle.opacity),
    }
}

pub fn disk_for(particle: &Particle, color: [u8; 3]) -> Disk {
    Disk {
        center: particle.position,
        radius: particle.radius(),
        color: Rgba::new(color, particle.opacity),
    }
}

/// Clear the surface and draw every particle in pool order (glow, then core)
pub fn render_particles(particles: &[Particle], color: [u8; 3], surface: &mut dyn DrawSurface) {
    surface.clear();

    for particle in particles {
        surface.fill_glow(&glow_for(particle, color));
        surface.fill_disk(&disk_for(particle, color));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Viewport;
    use crate::renderer::{DrawCommand, RecordingSurface};
    use glam::Vec2;

    #[test]
    fn test_draw_order() {
        let mut first = Particle::new(0, Vec2::new(10.0, 10.0), Vec2::ZERO, 4.0, 10.0);
        first.opacity = 0.8;
        let second = Particle::new(1, Vec2::new(20.0, 20.0), Vec2::ZERO, 6.0, 10.0);

        let mut surface = RecordingSurface::new(Viewport::new(100.0, 100.0));
        render_particles(&[first.clone(), second.clone()], [255, 0, 0], &mut surface);

        let commands = surface.take_commands();
        assert_eq!(commands.len(), 5);
        assert_eq!(commands[0], DrawCommand::Clear);

        match &commands[1] {
            DrawCommand::Glow(glow) => {
                assert_eq!(glow.center, first.position);
                assert_eq!(glow.radius, 4.0);
                assert_eq!(glow.stops[0].color.a, 0.8);
                assert!((glow.stops[1].color.a - 0.4).abs() < 1e-6);
                assert_eq!(glow.stops[2].color.a, 0.0);
            }
            other => panic!("expected glow, got {other:?}"),
        }

        match &commands[2] {
            DrawCommand::Disk(disk) => {
                assert_eq!(disk.radius, 2.0);
                assert_eq!(disk.color.a, 0.8);
            }
            other => panic!("expected disk, got {other:?}"),
        }

        assert!(matches!(&commands[3], DrawCommand::Glow(g) if g.center == second.position));
        assert!(matches!(&commands[4], DrawCommand::Disk(d) if d.radius == 3.0));
    }
}
