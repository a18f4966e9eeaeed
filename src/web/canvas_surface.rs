use std::f64::consts::TAU;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::error::{surface_unavailable, FieldResult};
use crate::input::Viewport;
use crate::renderer::{Disk, DrawSurface, Glow};
use crate::web::js_error;

/// CSS that turns the canvas into a full-viewport layer behind page content
/// that never intercepts pointer input
const LAYER_STYLE: [(&str, &str); 7] = [
    ("position", "fixed"),
    ("top", "0"),
    ("left", "0"),
    ("width", "100%"),
    ("height", "100%"),
    ("pointer-events", "none"),
    ("z-index", "0"),
];

/// Canvas 2D drawing surface
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    size: Viewport,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> FieldResult<Self> {
        let context = canvas
            .get_context("2d")
            .map_err(js_error)?
            .ok_or_else(|| surface_unavailable("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| surface_unavailable("2d context has an unexpected type"))?;

        let size = Viewport::new(canvas.width() as f32, canvas.height() as f32);

        Ok(Self {
            canvas,
            context,
            size,
        })
    }

    /// Style the canvas as a fixed, input-transparent background layer
    pub fn apply_layer_style(&self) -> FieldResult<()> {
        let style = self.canvas.style();
        for (property, value) in LAYER_STYLE {
            style.set_property(property, value).map_err(js_error)?;
        }
        Ok(())
    }

    fn fill_circle(&self, x: f64, y: f64, radius: f64) {
        self.context.begin_path();
        if self.context.arc(x, y, radius, 0.0, TAU).is_ok() {
            self.context.fill();
        }
    }
}

impl DrawSurface for CanvasSurface {
    fn size(&self) -> Viewport {
        self.size
    }

    fn resize(&mut self, viewport: Viewport) {
        self.canvas.set_width(viewport.width.max(0.0) as u32);
        self.canvas.set_height(viewport.height.max(0.0) as u32);
        self.size = viewport;
    }

    fn clear(&mut self) {
        self.context
            .clear_rect(0.0, 0.0, self.size.width as f64, self.size.height as f64);
    }

    fn fill_glow(&mut self, glow: &Glow) {
        let x = glow.center.x as f64;
        let y = glow.center.y as f64;
        let radius = glow.radius as f64;

        let Ok(gradient) = self.context.create_radial_gradient(x, y, 0.0, x, y, radius) else {
            return;
        };
        for stop in &glow.stops {
            if gradient.add_color_stop(stop.offset, &stop.color.to_css()).is_err() {
                return;
            }
        }

        #[allow(deprecated)]
        self.context.set_fill_style(&gradient);
        self.fill_circle(x, y, radius);
    }

    fn fill_disk(&mut self, disk: &Disk) {
        #[allow(deprecated)]
        self.context
            .set_fill_style(&JsValue::from_str(&disk.color.to_css()));
        self.fill_circle(disk.center.x as f64, disk.center.y as f64, disk.radius as f64);
    }
}
