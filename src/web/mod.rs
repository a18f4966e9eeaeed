//! Browser backend
//!
//! Canvas 2D rendering, `requestAnimationFrame` scheduling and DOM listeners,
//! plus the `WebParticleField` export the site mounts behind its logo.

mod canvas_surface;
mod web_host;

pub use canvas_surface::CanvasSurface;
pub use web_host::{window_viewport, WebHost};

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use glam::Vec2;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlCanvasElement;

use crate::config::ParticleFieldConfig;
use crate::effect::ParticleEffect;
use crate::error::{FieldError, FieldResult};
use crate::host::Host;
use crate::input::{AmbientInput, AmbientSnapshot};

/// Convert a thrown JavaScript value into a field error
pub(crate) fn js_error(value: JsValue) -> FieldError {
    FieldError::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
}

/// Host and effect share one cell so the frame callback can reach both
struct Slot {
    host: WebHost,
    effect: Option<ParticleEffect<CanvasSurface>>,
}

/// Particle field mounted on a page canvas
#[wasm_bindgen]
pub struct WebParticleField {
    slot: Rc<RefCell<Slot>>,
    input: AmbientInput,
}

#[wasm_bindgen]
impl WebParticleField {
    /// Mount on the canvas with id `canvas_id`. `config_json` takes the same
    /// keys as the TOML config (camelCase accepted).
    #[wasm_bindgen(constructor)]
    pub fn mount(canvas_id: &str, config_json: Option<String>) -> Result<WebParticleField, JsValue> {
        console_error_panic_hook::set_once();
        // Already initialised when a second field is mounted
        let _ = console_log::init_with_level(log::Level::Info);

        Self::try_mount(canvas_id, config_json.as_deref())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Move the spawn origin (the logo centre in viewport pixels)
    #[wasm_bindgen(js_name = setOrigin)]
    pub fn set_origin(&self, x: f32, y: f32) {
        self.input.set_origin(Vec2::new(x, y));
    }

    #[wasm_bindgen(js_name = particleCount)]
    pub fn particle_count(&self) -> usize {
        self.slot
            .borrow()
            .effect
            .as_ref()
            .map(|effect| effect.field().particle_count())
            .unwrap_or(0)
    }

    /// Stop the animation, detach listeners and discard every particle
    pub fn unmount(&self) {
        let mut slot = self.slot.borrow_mut();
        let Slot { host, effect } = &mut *slot;

        if let Some(mut effect) = effect.take() {
            effect.unmount(host);
        }
        host.clear_frame_callback();
    }
}

impl WebParticleField {
    fn try_mount(canvas_id: &str, config_json: Option<&str>) -> FieldResult<Self> {
        let config = match config_json {
            Some(json) => ParticleFieldConfig::from_json_str(json)?,
            None => ParticleFieldConfig::default(),
        };

        let host = WebHost::new()?;
        let canvas = host
            .window()
            .document()
            .ok_or_else(|| FieldError::Js("No document".into()))?
            .get_element_by_id(canvas_id)
            .ok_or_else(|| FieldError::Js(format!("Canvas '{}' not found", canvas_id)))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| FieldError::Js(format!("'{}' is not a canvas element", canvas_id)))?;

        let surface = CanvasSurface::new(canvas)?;
        surface.apply_layer_style()?;

        let viewport = host.viewport();
        let input = AmbientInput::new(AmbientSnapshot {
            origin: viewport.center(),
            pointer: None,
            viewport,
        });

        let slot = Rc::new(RefCell::new(Slot { host, effect: None }));
        let callback = frame_callback(Rc::downgrade(&slot));
        slot.borrow_mut().host.set_frame_callback(callback);

        {
            let mut guard = slot.borrow_mut();
            let Slot { host, effect } = &mut *guard;
            match ParticleEffect::mount(config, host, Some(surface), input.clone()) {
                Ok(mounted) => *effect = Some(mounted),
                Err(e) => {
                    host.clear_frame_callback();
                    return Err(e);
                }
            }
        }

        Ok(Self { slot, input })
    }
}

impl Drop for WebParticleField {
    fn drop(&mut self) {
        self.unmount();
    }
}

/// `requestAnimationFrame` callback. Holds a weak reference so the closure
/// stored in the host does not keep the slot alive.
fn frame_callback(slot: Weak<RefCell<Slot>>) -> Closure<dyn FnMut(f64)> {
    Closure::wrap(Box::new(move |timestamp: f64| {
        let Some(slot) = slot.upgrade() else {
            return;
        };
        let mut guard = slot.borrow_mut();
        let Slot { host, effect } = &mut *guard;

        let (Some(effect), Some(handle)) = (effect.as_mut(), host.take_fired_frame()) else {
            return;
        };
        effect.on_frame(host, handle, timestamp);
    }) as Box<dyn FnMut(f64)>)
}
