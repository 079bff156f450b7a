use crate::foundation::core::FrameBounds;
use crate::foundation::error::{CaptionError, CaptionResult};
use crate::foundation::math::premul_over_px;

/// A frame's pixels as premultiplied RGBA8, row-major and tightly packed.
///
/// This is the compositor's working format. It keeps the frame's origin so a rendered raster can be
/// matched back to the frame it came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    bounds: FrameBounds,
    data: Vec<u8>,
}

impl Raster {
    /// Wrap premultiplied bytes; the length must be `width * height * 4`.
    pub fn new(bounds: FrameBounds, data: Vec<u8>) -> CaptionResult<Self> {
        if data.len() != bounds.area().saturating_mul(4) {
            return Err(CaptionError::dimension_mismatch(format!(
                "raster of {}x{} needs {} bytes, got {}",
                bounds.width,
                bounds.height,
                bounds.area() * 4,
                data.len()
            )));
        }
        Ok(Self { bounds, data })
    }

    /// Raster filled with one premultiplied color, at origin `(0, 0)`.
    pub fn solid(width: u32, height: u32, premul: [u8; 4]) -> Self {
        let bounds = FrameBounds {
            left: 0,
            top: 0,
            width,
            height,
        };
        Self {
            data: premul.repeat(bounds.area()),
            bounds,
        }
    }

    /// Frame rectangle this raster covers.
    pub fn bounds(&self) -> FrameBounds {
        self.bounds
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.bounds.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.bounds.height
    }

    /// Premultiplied RGBA8 bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Premultiplied pixel at `(x, y)`, or `None` outside the raster.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.bounds.width || y >= self.bounds.height {
            return None;
        }
        let i = ((y as usize) * (self.bounds.width as usize) + (x as usize)) * 4;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    /// Straight-alpha RGBA8 copy, for image encoders that expect unpremultiplied input.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        for px in out.chunks_exact_mut(4) {
            let a = u32::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u32::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        out
    }

    /// Source-over a premultiplied layer of the same size onto a copy of this raster.
    pub(crate) fn over(&self, layer: &[u8]) -> CaptionResult<Self> {
        if layer.len() != self.data.len() {
            return Err(CaptionError::dimension_mismatch(format!(
                "overlay of {} bytes does not match raster of {} bytes",
                layer.len(),
                self.data.len()
            )));
        }
        let mut data = self.data.clone();
        for (d, s) in data.chunks_exact_mut(4).zip(layer.chunks_exact(4)) {
            let out = premul_over_px([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
            d.copy_from_slice(&out);
        }
        Ok(Self {
            bounds: self.bounds,
            data,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
