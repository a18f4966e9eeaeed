use glam::Vec2;

use crate::constants::host::FRAME_INTERVAL_MS;
use crate::effect::ParticleEffect;
use crate::error::FieldResult;
use crate::host::{FrameHandle, Host, ListenerHandle, ListenerKind};
use crate::input::{AmbientInput, Viewport};
use crate::renderer::DrawSurface;

/// Deterministic host driven by explicit calls.
///
/// Frames fire only when `advance` is called, at a simulated clock. Every
/// request, cancellation and listener registration is counted so tests can
/// assert on scheduling behaviour without real time.
#[derive(Debug)]
pub struct ManualHost {
    now_ms: f64,
    viewport: Viewport,
    reduced_motion: bool,
    next_id: u64,
    pending_frames: Vec<FrameHandle>,
    listeners: Vec<(ListenerHandle, ListenerKind, AmbientInput)>,
    frames_requested: usize,
    frames_cancelled: usize,
    frames_fired: usize,
    pointer_listeners_added: usize,
    resize_listeners_added: usize,
}

impl ManualHost {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            now_ms: 0.0,
            viewport,
            reduced_motion: false,
            next_id: 1,
            pending_frames: Vec::new(),
            listeners: Vec::new(),
            frames_requested: 0,
            frames_cancelled: 0,
            frames_fired: 0,
            pointer_listeners_added: 0,
            resize_listeners_added: 0,
        }
    }

    /// Report the reduced-motion preference to anything mounted afterwards
    pub fn with_reduced_motion(mut self, reduced_motion: bool) -> Self {
        self.reduced_motion = reduced_motion;
        self
    }

    /// Move the clock forward and fire every frame requested before the call.
    /// Frames requested while firing wait for the next call. Returns frames fired.
    pub fn advance<S: DrawSurface>(&mut self, effect: &mut ParticleEffect<S>, dt_ms: f64) -> usize {
        self.now_ms += dt_ms;

        let due = std::mem::take(&mut self.pending_frames);
        let now_ms = self.now_ms;
        for &handle in &due {
            self.frames_fired += 1;
            effect.on_frame(self, handle, now_ms);
        }

        due.len()
    }

    /// Advance one 60 fps frame
    pub fn advance_frame<S: DrawSurface>(&mut self, effect: &mut ParticleEffect<S>) -> usize {
        self.advance(effect, FRAME_INTERVAL_MS)
    }

    /// Advance at 60 fps until `duration_ms` has elapsed. Returns frames fired.
    pub fn run_for<S: DrawSurface>(&mut self, effect: &mut ParticleEffect<S>, duration_ms: f64) -> usize {
        let end = self.now_ms + duration_ms;
        let mut fired = 0;
        while self.now_ms + FRAME_INTERVAL_MS <= end {
            fired += self.advance_frame(effect);
        }
        fired
    }

    /// Deliver a pointer-move event to every pointer listener
    pub fn pointer_move(&self, position: Vec2) {
        for (_, kind, input) in &self.listeners {
            if *kind == ListenerKind::PointerMove {
                input.set_pointer(position);
            }
        }
    }

    /// Change the viewport and deliver a resize event
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        for (_, kind, input) in &self.listeners {
            if *kind == ListenerKind::Resize {
                input.set_viewport(viewport);
            }
        }
    }

    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    pub fn frames_requested(&self) -> usize {
        self.frames_requested
    }

    pub fn frames_cancelled(&self) -> usize {
        self.frames_cancelled
    }

    pub fn frames_fired(&self) -> usize {
        self.frames_fired
    }

    pub fn pending_frame_count(&self) -> usize {
        self.pending_frames.len()
    }

    /// Listeners of `kind` currently attached
    pub fn listener_count(&self, kind: ListenerKind) -> usize {
        self.listeners.iter().filter(|(_, k, _)| *k == kind).count()
    }

    /// Listeners of `kind` ever attached
    pub fn listeners_added(&self, kind: ListenerKind) -> usize {
        match kind {
            ListenerKind::PointerMove => self.pointer_listeners_added,
            ListenerKind::Resize => self.resize_listeners_added,
        }
    }

    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

impl Host for ManualHost {
    fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn request_frame(&mut self) -> FieldResult<FrameHandle> {
        let handle = FrameHandle::new(self.allocate_id());
        self.pending_frames.push(handle);
        self.frames_requested += 1;
        Ok(handle)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        let before = self.pending_frames.len();
        self.pending_frames.retain(|pending| *pending != handle);
        if self.pending_frames.len() < before {
            self.frames_cancelled += 1;
        }
    }

    fn add_listener(&mut self, kind: ListenerKind, input: AmbientInput) -> FieldResult<ListenerHandle> {
        let handle = ListenerHandle::new(self.allocate_id());
        match kind {
            ListenerKind::PointerMove => self.pointer_listeners_added += 1,
            ListenerKind::Resize => self.resize_listeners_added += 1,
        }
        self.listeners.push((handle, kind, input));
        Ok(handle)
    }

    fn remove_listener(&mut self, handle: ListenerHandle) {
        self.listeners.retain(|(registered, _, _)| *registered != handle);
    }
}
