// Mount/unmount behaviour of a particle field driven by the manual host:
// teardown cleanliness, reduced-motion compliance and surface handling

use glam::Vec2;
use particle_field::{
    AmbientInput, DrawCommand, ListenerKind, ManualHost, ParticleEffect, ParticleField,
    ParticleFieldConfig, RecordingSurface, Viewport,
};

fn viewport() -> Viewport {
    Viewport::new(1024.0, 768.0)
}

fn mount(host: &mut ManualHost) -> ParticleEffect<RecordingSurface> {
    let field = ParticleField::with_seed(ParticleFieldConfig::default(), 99).unwrap();
    ParticleEffect::mount_field(
        field,
        host,
        Some(RecordingSurface::new(viewport())),
        AmbientInput::default(),
    )
    .unwrap()
}

#[test]
fn test_frames_drive_ticks() {
    let mut host = ManualHost::new(viewport());
    let mut effect = mount(&mut host);

    let fired = host.run_for(&mut effect, 2_000.0);

    assert!(fired > 100);
    assert_eq!(effect.field().stats().ticks, fired as u64);
    assert!(effect.field().particle_count() > 0);
    // Exactly one request outstanding at any time
    assert_eq!(host.pending_frame_count(), 1);
    assert_eq!(host.frames_requested(), fired + 1);
}

#[test]
fn test_unmount_stops_everything() {
    let mut host = ManualHost::new(viewport());
    let mut effect = mount(&mut host);
    host.run_for(&mut effect, 1_000.0);
    assert!(effect.field().particle_count() > 0);

    let ticks_before = effect.field().stats().ticks;
    let requested_before = host.frames_requested();

    effect.unmount(&mut host);

    assert_eq!(host.frames_cancelled(), 1);
    assert_eq!(host.pending_frame_count(), 0);
    assert!(effect.pending_frame().is_none());
    assert_eq!(host.listener_count(ListenerKind::PointerMove), 0);
    assert_eq!(host.listener_count(ListenerKind::Resize), 0);
    assert_eq!(effect.field().particle_count(), 0);
    assert!(!effect.is_animating());

    // Nothing fires afterwards
    assert_eq!(host.run_for(&mut effect, 1_000.0), 0);
    assert_eq!(effect.field().stats().ticks, ticks_before);
    assert_eq!(host.frames_requested(), requested_before);
}

#[test]
fn test_reduced_motion_skips_loop_and_pointer() {
    let mut host = ManualHost::new(viewport()).with_reduced_motion(true);
    let mut effect = mount(&mut host);

    assert!(effect.reduced_motion());
    assert!(!effect.is_animating());

    assert_eq!(host.run_for(&mut effect, 5_000.0), 0);
    assert_eq!(host.frames_requested(), 0);
    assert_eq!(host.listeners_added(ListenerKind::PointerMove), 0);
    assert_eq!(effect.field().stats().ticks, 0);

    // Resize is still tracked
    assert_eq!(host.listeners_added(ListenerKind::Resize), 1);
    host.resize(Viewport::new(500.0, 400.0));
    assert_eq!(effect.input().viewport(), Viewport::new(500.0, 400.0));

    effect.unmount(&mut host);
    assert_eq!(host.listener_count(ListenerKind::Resize), 0);
}

#[test]
fn test_pointer_events_reach_the_engine() {
    let mut host = ManualHost::new(viewport());
    let mut effect = mount(&mut host);

    host.pointer_move(Vec2::new(10.0, 20.0));
    assert_eq!(effect.input().snapshot().pointer, Some(Vec2::new(10.0, 20.0)));

    host.advance_frame(&mut effect);
    assert_eq!(effect.field().stats().ticks, 1);
}

#[test]
fn test_origin_moves_spawn_point() {
    let mut host = ManualHost::new(viewport());
    let mut effect = mount(&mut host);

    effect.set_origin(Vec2::new(100.0, 50.0));
    host.advance_frame(&mut effect);

    let particle = &effect.field().particles()[0];
    // Spawned at the origin, then moved one step (speed < 0.5px)
    assert!(particle.position.distance(Vec2::new(100.0, 50.0)) < 0.5 + 1e-4);
}

#[test]
fn test_resize_reaches_surface() {
    let mut host = ManualHost::new(viewport());
    let mut effect = mount(&mut host);

    host.resize(Viewport::new(640.0, 480.0));
    host.advance_frame(&mut effect);

    let surface = effect.surface().unwrap();
    assert_eq!(surface.commands()[0], DrawCommand::Resize(Viewport::new(640.0, 480.0)));
}

#[test]
fn test_runs_without_surface() {
    let mut host = ManualHost::new(viewport());
    let mut effect = mount(&mut host);
    host.run_for(&mut effect, 500.0);

    // Canvas gone mid-run: simulation continues, drawing is skipped
    let surface = effect.detach_surface().unwrap();
    let drawn = surface.particles_drawn();
    assert!(drawn > 0);

    let fired = host.run_for(&mut effect, 500.0);
    assert!(fired > 0);
    assert!(effect.field().particle_count() > 0);
    assert!(effect.is_animating());
}

#[test]
fn test_mount_without_surface() {
    let mut host = ManualHost::new(viewport());
    let mut effect = ParticleEffect::<RecordingSurface>::mount(
        ParticleFieldConfig::default(),
        &mut host,
        None,
        AmbientInput::default(),
    )
    .unwrap();

    assert!(host.run_for(&mut effect, 500.0) > 0);
    effect.unmount(&mut host);
    assert_eq!(host.pending_frame_count(), 0);
}
