use glam::Vec2;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Event, MouseEvent, Window};

use crate::constants::host::REDUCED_MOTION_QUERY;
use crate::error::{FieldError, FieldResult};
use crate::host::{FrameHandle, Host, ListenerHandle, ListenerKind};
use crate::input::{AmbientInput, Viewport};
use crate::web::js_error;

type FrameCallback = Closure<dyn FnMut(f64)>;
type EventCallback = Closure<dyn FnMut(Event)>;

/// Browser window as a particle field host
pub struct WebHost {
    window: Window,
    /// Invoked by `requestAnimationFrame`; installed by the owner before mounting
    frame_callback: Option<FrameCallback>,
    /// The single outstanding animation frame request
    pending_frame: Option<FrameHandle>,
    listeners: Vec<(ListenerHandle, &'static str, EventCallback)>,
    next_listener: u64,
}

impl WebHost {
    pub fn new() -> FieldResult<Self> {
        let window = web_sys::window().ok_or_else(|| FieldError::Js("No window".into()))?;

        Ok(Self {
            window,
            frame_callback: None,
            pending_frame: None,
            listeners: Vec::new(),
            next_listener: 0,
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn set_frame_callback(&mut self, callback: FrameCallback) {
        self.frame_callback = Some(callback);
    }

    /// Drop the frame callback. Only call outside of a frame.
    pub fn clear_frame_callback(&mut self) {
        self.frame_callback = None;
    }

    /// Handle of the frame that just fired
    pub fn take_fired_frame(&mut self) -> Option<FrameHandle> {
        self.pending_frame.take()
    }
}

/// Window inner size, if the browser reports one
pub fn window_viewport(window: &Window) -> Option<Viewport> {
    let width = window.inner_width().ok()?.as_f64()?;
    let height = window.inner_height().ok()?.as_f64()?;
    Some(Viewport::new(width as f32, height as f32))
}

impl Host for WebHost {
    fn prefers_reduced_motion(&self) -> bool {
        self.window
            .match_media(REDUCED_MOTION_QUERY)
            .ok()
            .flatten()
            .map(|query| query.matches())
            .unwrap_or(false)
    }

    fn viewport(&self) -> Viewport {
        window_viewport(&self.window).unwrap_or_default()
    }

    fn request_frame(&mut self) -> FieldResult<FrameHandle> {
        let callback = self
            .frame_callback
            .as_ref()
            .ok_or_else(|| FieldError::Js("Frame callback not installed".into()))?;

        let id = self
            .window
            .request_animation_frame(callback.as_ref().unchecked_ref())
            .map_err(js_error)?;

        let handle = FrameHandle::new(id as u32 as u64);
        self.pending_frame = Some(handle);
        Ok(handle)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending_frame == Some(handle) {
            self.pending_frame = None;
        }
        let _ = self.window.cancel_animation_frame(handle.id() as u32 as i32);
    }

    fn add_listener(&mut self, kind: ListenerKind, input: AmbientInput) -> FieldResult<ListenerHandle> {
        let (event, callback): (&'static str, EventCallback) = match kind {
            ListenerKind::PointerMove => (
                "mousemove",
                Closure::wrap(Box::new(move |event: Event| {
                    if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
                        input.set_pointer(Vec2::new(mouse.client_x() as f32, mouse.client_y() as f32));
                    }
                }) as Box<dyn FnMut(Event)>),
            ),
            ListenerKind::Resize => {
                let window = self.window.clone();
                (
                    "resize",
                    Closure::wrap(Box::new(move |_event: Event| {
                        if let Some(viewport) = window_viewport(&window) {
                            input.set_viewport(viewport);
                        }
                    }) as Box<dyn FnMut(Event)>),
                )
            }
        };

        self.window
            .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
            .map_err(js_error)?;

        let handle = ListenerHandle::new(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((handle, event, callback));
        Ok(handle)
    }

    fn remove_listener(&mut self, handle: ListenerHandle) {
        let Some(index) = self.listeners.iter().position(|(h, _, _)| *h == handle) else {
            return;
        };

        let (_, event, callback) = self.listeners.swap_remove(index);
        let _ = self
            .window
            .remove_event_listener_with_callback(event, callback.as_ref().unchecked_ref());
    }
}
