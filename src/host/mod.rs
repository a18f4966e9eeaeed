//! Host environment abstraction
//!
//! The host is whatever schedules animation frames and delivers pointer and
//! resize events: the browser window on the web, `ManualHost` natively and in
//! tests. Frame and listener registrations are owned handles so teardown can
//! cancel them deterministically.

mod animation_loop;
mod manual;

pub use animation_loop::{AnimationLoop, LoopState};
pub use manual::ManualHost;

use crate::error::FieldResult;
use crate::input::{AmbientInput, Viewport};

/// Pending frame request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

impl FrameHandle {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Registered event listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerHandle(u64);

impl ListenerHandle {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Events the particle field listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    /// Writes the pointer position into the ambient input
    PointerMove,
    /// Writes the viewport size into the ambient input
    Resize,
}

/// Environment that drives a mounted particle field
pub trait Host {
    /// Accessibility preference for reduced motion
    fn prefers_reduced_motion(&self) -> bool;

    /// Current viewport size
    fn viewport(&self) -> Viewport;

    /// Ask for one animation frame callback
    fn request_frame(&mut self) -> FieldResult<FrameHandle>;

    /// Cancel a frame request that has not fired yet
    fn cancel_frame(&mut self, handle: FrameHandle);

    /// Attach a listener that writes its events into `input`
    fn add_listener(&mut self, kind: ListenerKind, input: AmbientInput) -> FieldResult<ListenerHandle>;

    fn remove_listener(&mut self, handle: ListenerHandle);
}
