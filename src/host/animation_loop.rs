use crate::error::FieldResult;
use crate::host::{FrameHandle, Host};

/// Animation loop state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Never started
    Idle,
    /// Requesting a frame after each tick
    Running,
    /// Stopped for good; never reschedules
    Stopped,
}

/// Self-rescheduling frame loop.
///
/// Holds at most one pending frame request. A frame is only accepted when it
/// matches that request, so a callback that fires after `stop` is ignored.
#[derive(Debug)]
pub struct AnimationLoop {
    state: LoopState,
    pending: Option<FrameHandle>,
    frames: u64,
}

impl AnimationLoop {
    pub fn new() -> Self {
        Self {
            state: LoopState::Idle,
            pending: None,
            frames: 0,
        }
    }

    /// Start the loop by requesting the first frame
    pub fn start<H: Host + ?Sized>(&mut self, host: &mut H) -> FieldResult<()> {
        if self.state != LoopState::Idle {
            return Ok(());
        }

        self.state = LoopState::Running;
        self.schedule(host)
    }

    /// Claim a fired frame. Returns false for stale or foreign handles.
    pub fn accept_frame(&mut self, handle: FrameHandle) -> bool {
        if self.state != LoopState::Running || self.pending != Some(handle) {
            return false;
        }

        self.pending = None;
        self.frames += 1;
        true
    }

    /// Request the next frame after a tick has finished
    pub fn reschedule<H: Host + ?Sized>(&mut self, host: &mut H) -> FieldResult<()> {
        if self.state != LoopState::Running || self.pending.is_some() {
            return Ok(());
        }

        self.schedule(host)
    }

    /// Cancel the pending request and stop rescheduling
    pub fn stop<H: Host + ?Sized>(&mut self, host: &mut H) {
        if let Some(handle) = self.pending.take() {
            host.cancel_frame(handle);
        }
        self.state = LoopState::Stopped;
    }

    fn schedule<H: Host + ?Sized>(&mut self, host: &mut H) -> FieldResult<()> {
        let handle = host.request_frame()?;
        self.pending = Some(handle);
        Ok(())
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }

    /// Frames accepted so far
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Default for AnimationLoop {
    fn default() -> Self {
        Self::new()
    }
}
