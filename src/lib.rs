pub mod config;
pub mod constants;
pub mod effect;
pub mod error;
pub mod host;
pub mod input;
pub mod particles;
pub mod renderer;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub mod web;

pub use config::{ConfigFormat, ParticleFieldConfig};
pub use effect::ParticleEffect;
pub use error::{FieldError, FieldResult};
pub use host::{AnimationLoop, FrameHandle, Host, ListenerHandle, ListenerKind, LoopState, ManualHost};
pub use input::{AmbientInput, AmbientSnapshot, Viewport};
pub use particles::{FieldStats, Particle, ParticleField, TickReport};
pub use renderer::{DrawCommand, DrawSurface, RecordingSurface};
