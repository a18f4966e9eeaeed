/// Headless particle field simulation
///
/// Usage: field_simulation [config.toml|config.json] [ticks]
///
/// Runs the field at 60 fps against a recording surface with an orbiting origin
/// and a sweeping pointer, logs stats once per simulated second and prints a
/// JSON summary.

use std::path::PathBuf;

use anyhow::{Context, Result};
use glam::Vec2;
use serde::Serialize;

use particle_field::{
    AmbientInput, AmbientSnapshot, FieldStats, ManualHost, ParticleEffect, ParticleFieldConfig,
    RecordingSurface, Viewport,
};

const DEFAULT_TICKS: u64 = 600;
const ORBIT_RADIUS: f32 = 120.0;

#[derive(Serialize)]
struct SimulationSummary {
    ticks: u64,
    peak_particles: usize,
    particles_drawn: usize,
    surface_clears: usize,
    frames_requested: usize,
    frames_cancelled: usize,
    stats: FieldStats,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => ParticleFieldConfig::load(&PathBuf::from(&path))
            .with_context(|| format!("Failed to load config {}", path))?,
        None => ParticleFieldConfig::default(),
    };
    let ticks: u64 = match args.next() {
        Some(ticks) => ticks
            .parse()
            .with_context(|| format!("Tick count must be a whole number, got '{}'", ticks))?,
        None => DEFAULT_TICKS,
    };

    println!("=== Particle Field Simulation ===");
    println!("  Max particles: {}", config.max_particles);
    println!("  Spawn interval: {:.1}ms", config.spawn_interval_ms());
    println!("  Ticks: {}\n", ticks);

    let viewport = Viewport::new(1280.0, 720.0);
    let mut host = ManualHost::new(viewport);
    let input = AmbientInput::new(AmbientSnapshot {
        origin: viewport.center(),
        pointer: None,
        viewport,
    });

    let mut effect = ParticleEffect::mount(
        config,
        &mut host,
        Some(RecordingSurface::new(viewport)),
        input,
    )?;

    let mut peak_particles = 0;
    for tick in 0..ticks {
        let t = tick as f32 / 60.0;
        effect.set_origin(viewport.center() + Vec2::new(t.cos(), t.sin()) * ORBIT_RADIUS);
        host.pointer_move(Vec2::new(
            ((t * 0.5).sin() * 0.5 + 0.5) * viewport.width,
            viewport.height * 0.5,
        ));

        host.advance_frame(&mut effect);
        peak_particles = peak_particles.max(effect.field().particle_count());

        // Only the counters matter here
        if let Some(surface) = effect.surface_mut() {
            surface.take_commands();
        }

        if tick % 60 == 59 {
            let stats = effect.field().stats();
            log::info!(
                "t={:.0}s live={} ({:.0}% of cap) spawned={} expired={} out_of_bounds={}",
                t.ceil(),
                stats.live_particles,
                stats.capacity_used * 100.0,
                stats.total_spawned,
                stats.total_expired,
                stats.total_out_of_bounds
            );
        }
    }

    let stats = effect.field().stats();
    let (particles_drawn, surface_clears) = effect
        .surface()
        .map(|s| (s.particles_drawn(), s.clear_count()))
        .unwrap_or_default();

    effect.unmount(&mut host);

    let summary = SimulationSummary {
        ticks,
        peak_particles,
        particles_drawn,
        surface_clears,
        frames_requested: host.frames_requested(),
        frames_cancelled: host.frames_cancelled(),
        stats,
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
