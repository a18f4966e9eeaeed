use glam::Vec2;

use crate::input::Viewport;

/// 8-bit colour with a floating point alpha, as canvas styles expect
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub fn new(rgb: [u8; 3], a: f32) -> Self {
        Self {
            r: rgb[0],
            g: rgb[1],
            b: rgb[2],
            a: a.clamp(0.0, 1.0),
        }
    }

    /// CSS colour string, e.g. `rgba(255, 215, 140, 0.5)`
    pub fn to_css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// One colour stop of a radial gradient; `offset` runs from 0 (centre) to 1 (edge)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub offset: f32,
    pub color: Rgba,
}

/// Soft radial halo around a particle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glow {
    pub center: Vec2,
    pub radius: f32,
    pub stops: [GradientStop; 3],
}

/// Solid particle core
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Disk {
    pub center: Vec2,
    pub radius: f32,
    pub color: Rgba,
}

/// Drawing target owned by a mounted particle field.
///
/// Draw calls are infallible: backends swallow their own failures so a
/// half-torn-down surface degrades to drawing nothing.
pub trait DrawSurface {
    /// Current backing size
    fn size(&self) -> Viewport;

    /// Match the backing store to the viewport
    fn resize(&mut self, viewport: Viewport);

    /// Erase everything
    fn clear(&mut self);

    fn fill_glow(&mut self, glow: &Glow);

    fn fill_disk(&mut self, disk: &Disk);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_string() {
        assert_eq!(Rgba::new([255, 215, 140], 0.5).to_css(), "rgba(255, 215, 140, 0.5)");
        assert_eq!(Rgba::new([0, 0, 0], 3.0).a, 1.0);
    }
}
