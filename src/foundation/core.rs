use crate::foundation::error::{CaptionError, CaptionResult};

pub use kurbo::Vec2;

/// Straight (non-premultiplied) RGBA8 color as written in style configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel; doubles as the paint opacity.
    pub a: u8,
}

impl Rgba8 {
    /// Opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Color with an opacity in `[0, 1]`; out-of-range values are clamped.
    pub fn with_opacity(self, opacity: f32) -> Self {
        let a = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self { a, ..self }
    }
}

/// Pixel-space rectangle of a frame inside the logical canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameBounds {
    /// Left edge in canvas pixels.
    pub left: u32,
    /// Top edge in canvas pixels.
    pub top: u32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl FrameBounds {
    /// Number of pixels covered by the bounds.
    pub fn area(self) -> usize {
        (self.width as usize).saturating_mul(self.height as usize)
    }

    /// Return an error when the bounds extend past a `canvas_w x canvas_h` canvas.
    pub fn ensure_within(self, canvas_w: u32, canvas_h: u32) -> CaptionResult<()> {
        let right = u64::from(self.left) + u64::from(self.width);
        let bottom = u64::from(self.top) + u64::from(self.height);
        if right > u64::from(canvas_w) || bottom > u64::from(canvas_h) {
            return Err(CaptionError::dimension_mismatch(format!(
                "frame {}x{} at ({}, {}) exceeds canvas {canvas_w}x{canvas_h}",
                self.width, self.height, self.left, self.top
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
