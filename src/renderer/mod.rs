mod particle_renderer;
mod recording;
mod surface;

pub use particle_renderer::{disk_for, glow_for, glow_stops, render_particles};
pub use recording::{DrawCommand, RecordingSurface};
pub use surface::{Disk, DrawSurface, Glow, GradientStop, Rgba};
