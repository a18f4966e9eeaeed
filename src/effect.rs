//! Mounted particle field
//!
//! Ties the engine to a host, a drawing surface and the ambient inputs for the
//! lifetime of one mount. Teardown cancels the pending frame, removes every
//! listener and discards the pool in one step.

use glam::Vec2;

use crate::config::ParticleFieldConfig;
use crate::error::FieldResult;
use crate::host::{AnimationLoop, FrameHandle, Host, ListenerHandle, ListenerKind};
use crate::input::AmbientInput;
use crate::particles::{ParticleField, TickReport};
use crate::renderer::DrawSurface;

pub struct ParticleEffect<S: DrawSurface> {
    field: ParticleField,
    input: AmbientInput,
    surface: Option<S>,
    animation: AnimationLoop,
    listeners: Vec<ListenerHandle>,
    reduced_motion: bool,
    mounted: bool,
}

impl<S: DrawSurface> ParticleEffect<S> {
    /// Mount a particle field on `host`.
    ///
    /// The resize listener is always attached. Unless the host prefers reduced
    /// motion, the pointer listener is attached and the frame loop started.
    pub fn mount<H: Host + ?Sized>(
        config: ParticleFieldConfig,
        host: &mut H,
        surface: Option<S>,
        input: AmbientInput,
    ) -> FieldResult<Self> {
        let field = ParticleField::new(config)?;
        Self::mount_field(field, host, surface, input)
    }

    /// Mount an already constructed field (e.g. one with a fixed seed)
    pub fn mount_field<H: Host + ?Sized>(
        field: ParticleField,
        host: &mut H,
        surface: Option<S>,
        input: AmbientInput,
    ) -> FieldResult<Self> {
        let viewport = host.viewport();
        input.set_viewport(viewport);

        let mut effect = Self {
            field,
            input,
            surface,
            animation: AnimationLoop::new(),
            listeners: Vec::new(),
            reduced_motion: host.prefers_reduced_motion(),
            mounted: true,
        };

        if let Some(surface) = effect.surface.as_mut() {
            if surface.size() != viewport {
                surface.resize(viewport);
            }
        }

        // Roll back whatever was attached before a failure
        if let Err(e) = effect.attach(host) {
            effect.unmount(host);
            return Err(e);
        }

        log::info!(
            "Particle field mounted: {}x{} viewport, max {} particles{}",
            viewport.width,
            viewport.height,
            effect.field.config().max_particles,
            if effect.reduced_motion {
                " (reduced motion, animation disabled)"
            } else {
                ""
            }
        );

        Ok(effect)
    }

    fn attach<H: Host + ?Sized>(&mut self, host: &mut H) -> FieldResult<()> {
        let resize = host.add_listener(ListenerKind::Resize, self.input.clone())?;
        self.listeners.push(resize);

        if self.reduced_motion {
            log::debug!("Reduced motion preferred; not starting the particle animation");
            return Ok(());
        }

        let pointer = host.add_listener(ListenerKind::PointerMove, self.input.clone())?;
        self.listeners.push(pointer);

        self.animation.start(host)
    }

    /// Host callback for a fired frame: run one tick and request the next.
    ///
    /// Frames that are stale (after unmount) or unknown are ignored.
    pub fn on_frame<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        handle: FrameHandle,
        now_ms: f64,
    ) -> Option<TickReport> {
        if !self.mounted || !self.animation.accept_frame(handle) {
            return None;
        }

        let snapshot = self.input.snapshot();
        let surface = self.surface.as_mut().map(|s| s as &mut dyn DrawSurface);
        let report = self.field.tick(now_ms, &snapshot, surface);

        if let Err(e) = self.animation.reschedule(host) {
            log::warn!("Failed to schedule the next particle frame: {}", e);
            self.animation.stop(host);
        }

        Some(report)
    }

    /// Move the spawn origin; applies from the next spawn on
    pub fn set_origin(&self, origin: Vec2) {
        self.input.set_origin(origin);
    }

    /// Tear down: cancel the pending frame, remove listeners, discard the pool.
    /// Calling it again is a no-op.
    pub fn unmount<H: Host + ?Sized>(&mut self, host: &mut H) {
        if !self.mounted {
            return;
        }
        self.mounted = false;

        self.animation.stop(host);
        for listener in self.listeners.drain(..) {
            host.remove_listener(listener);
        }

        let stats = self.field.stats();
        self.field.clear();

        if let Some(mut surface) = self.surface.take() {
            surface.clear();
        }

        log::info!(
            "Particle field unmounted after {} ticks ({} spawned)",
            stats.ticks,
            stats.total_spawned
        );
    }

    /// Give up the drawing surface, e.g. when the canvas is detached mid-frame.
    /// Ticks keep running and skip drawing.
    pub fn detach_surface(&mut self) -> Option<S> {
        self.surface.take()
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn input(&self) -> &AmbientInput {
        &self.input
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn is_animating(&self) -> bool {
        self.mounted && self.animation.is_running()
    }

    pub fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.animation.pending()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}
