use crate::input::Viewport;
use crate::renderer::{Disk, DrawSurface, Glow};

/// Draw call captured by `RecordingSurface`
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Resize(Viewport),
    Clear,
    Glow(Glow),
    Disk(Disk),
}

/// Headless surface that records every draw call.
///
/// Used by the native simulation and by tests to observe what a canvas
/// would have been asked to draw.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    size: Viewport,
    commands: Vec<DrawCommand>,
    clears: usize,
    particles_drawn: usize,
}

impl RecordingSurface {
    pub fn new(size: Viewport) -> Self {
        Self {
            size,
            commands: Vec::new(),
            clears: 0,
            particles_drawn: 0,
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drain the recorded commands, keeping the counters
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Total clears since creation
    pub fn clear_count(&self) -> usize {
        self.clears
    }

    /// Total particle cores drawn since creation
    pub fn particles_drawn(&self) -> usize {
        self.particles_drawn
    }
}

impl DrawSurface for RecordingSurface {
    fn size(&self) -> Viewport {
        self.size
    }

    fn resize(&mut self, viewport: Viewport) {
        self.size = viewport;
        self.commands.push(DrawCommand::Resize(viewport));
    }

    fn clear(&mut self) {
        self.clears += 1;
        self.commands.push(DrawCommand::Clear);
    }

    fn fill_glow(&mut self, glow: &Glow) {
        self.commands.push(DrawCommand::Glow(*glow));
    }

    fn fill_disk(&mut self, disk: &Disk) {
        self.particles_drawn += 1;
        self.commands.push(DrawCommand::Disk(*disk));
    }
}
