use crate::foundation::core::FrameBounds;
use crate::foundation::error::{CaptionError, CaptionResult};
use crate::render::raster::Raster;
use crate::sequence::palette::expand;

/// What a viewer does with a frame's area before drawing the next frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Disposal {
    /// Unspecified; viewers usually keep the frame.
    #[default]
    Any,
    /// Leave the frame in place.
    Keep,
    /// Clear the frame's area to the background.
    Background,
    /// Restore the area to what was there before the frame.
    Previous,
}

/// Per-frame timing and disposal, carried through processing untouched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct FrameMeta {
    /// Display time in hundredths of a second.
    pub delay_cs: u16,
    /// Disposal method applied after the frame is shown.
    pub disposal: Disposal,
}

/// How often the animation repeats.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoopCount {
    /// Loop forever.
    #[default]
    Infinite,
    /// Play a fixed number of extra times (`0` plays once).
    Finite(u16),
}

/// An indexed color table of at most 256 RGB entries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<[u8; 3]>,
}

impl Palette {
    /// Build from RGB triples.
    pub fn new(colors: Vec<[u8; 3]>) -> CaptionResult<Self> {
        if colors.is_empty() || colors.len() > 256 {
            return Err(CaptionError::validation(format!(
                "palette must have 1..=256 entries, got {}",
                colors.len()
            )));
        }
        Ok(Self { colors })
    }

    /// Build from packed `RGBRGB...` bytes.
    pub fn from_rgb_bytes(bytes: &[u8]) -> CaptionResult<Self> {
        if !bytes.len().is_multiple_of(3) {
            return Err(CaptionError::validation(format!(
                "palette byte length {} is not a multiple of 3",
                bytes.len()
            )));
        }
        Self::new(bytes.chunks_exact(3).map(|c| [c[0], c[1], c[2]]).collect())
    }

    /// Packed `RGBRGB...` bytes.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        self.colors.iter().flatten().copied().collect()
    }

    /// Color at `index`.
    pub fn get(&self, index: u8) -> Option<[u8; 3]> {
        self.colors.get(usize::from(index)).copied()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always `false` for a constructed palette.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

/// One frame of an animation: palette indices over a sub-rectangle of the canvas.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    bounds: FrameBounds,
    indices: Vec<u8>,
    palette: Option<Palette>,
    transparent: Option<u8>,
}

impl Frame {
    /// Create a frame; `indices` must hold exactly `width * height` entries.
    pub fn new(
        bounds: FrameBounds,
        indices: Vec<u8>,
        palette: Option<Palette>,
        transparent: Option<u8>,
    ) -> CaptionResult<Self> {
        if indices.len() != bounds.area() {
            return Err(CaptionError::dimension_mismatch(format!(
                "frame {}x{} needs {} indices, got {}",
                bounds.width,
                bounds.height,
                bounds.area(),
                indices.len()
            )));
        }
        Ok(Self {
            bounds,
            indices,
            palette,
            transparent,
        })
    }

    /// Full-canvas frame filled with a single palette index.
    pub fn filled(width: u32, height: u32, index: u8, palette: Option<Palette>) -> Self {
        let bounds = FrameBounds {
            left: 0,
            top: 0,
            width,
            height,
        };
        Self {
            indices: vec![index; bounds.area()],
            bounds,
            palette,
            transparent: None,
        }
    }

    /// Set the transparent palette index.
    pub fn with_transparent(mut self, transparent: Option<u8>) -> Self {
        self.transparent = transparent;
        self
    }

    /// Canvas rectangle covered by the frame.
    pub fn bounds(&self) -> FrameBounds {
        self.bounds
    }

    /// Row-major palette indices.
    pub fn indices(&self) -> &[u8] {
        &self.indices
    }

    /// Local color table, if the frame has one.
    pub fn palette(&self) -> Option<&Palette> {
        self.palette.as_ref()
    }

    /// Index rendered as fully transparent.
    pub fn transparent(&self) -> Option<u8> {
        self.transparent
    }

    /// Same frame with new pixel indices; everything else is kept.
    pub(crate) fn with_indices(&self, indices: Vec<u8>) -> CaptionResult<Self> {
        Self::new(
            self.bounds,
            indices,
            self.palette.clone(),
            self.transparent,
        )
    }

    fn check_consistent(&self) -> CaptionResult<()> {
        if self.indices.len() != self.bounds.area() {
            return Err(CaptionError::dimension_mismatch(format!(
                "frame {}x{} holds {} indices",
                self.bounds.width,
                self.bounds.height,
                self.indices.len()
            )));
        }
        Ok(())
    }
}

/// An animation: frames in display order plus their metadata and the logical canvas.
///
/// Frames and metadata are kept index-aligned. Every frame lies inside the canvas.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sequence {
    width: u32,
    height: u32,
    global_palette: Option<Palette>,
    loop_count: LoopCount,
    frames: Vec<Frame>,
    meta: Vec<FrameMeta>,
}

impl Sequence {
    /// Empty sequence over a `width x height` canvas.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            global_palette: None,
            loop_count: LoopCount::default(),
            frames: Vec::new(),
            meta: Vec::new(),
        }
    }

    /// Set the global color table.
    pub fn with_global_palette(mut self, palette: Option<Palette>) -> Self {
        self.global_palette = palette;
        self
    }

    /// Set the repeat behavior.
    pub fn with_loop_count(mut self, loop_count: LoopCount) -> Self {
        self.loop_count = loop_count;
        self
    }

    /// Append a frame; it must fit inside the canvas.
    pub fn push_frame(&mut self, frame: Frame, meta: FrameMeta) -> CaptionResult<()> {
        frame.bounds.ensure_within(self.width, self.height)?;
        self.frames.push(frame);
        self.meta.push(meta);
        Ok(())
    }

    /// Canvas width.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Canvas height.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Global color table.
    pub fn global_palette(&self) -> Option<&Palette> {
        self.global_palette.as_ref()
    }

    /// Repeat behavior.
    pub fn loop_count(&self) -> LoopCount {
        self.loop_count
    }

    /// Number of frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Return `true` when there are no frames.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frames in display order.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Metadata aligned with [`Sequence::frames`].
    pub fn meta(&self) -> &[FrameMeta] {
        &self.meta
    }

    /// Frames paired with their metadata.
    pub fn iter(&self) -> impl Iterator<Item = (&Frame, &FrameMeta)> {
        self.frames.iter().zip(&self.meta)
    }

    /// Palette used to display frame `i`: its local table, else the global one.
    pub fn effective_palette(&self, i: usize) -> Option<&Palette> {
        self.frames
            .get(i)
            .and_then(|f| f.palette.as_ref())
            .or(self.global_palette.as_ref())
    }

    /// Frame `i` expanded through its effective palette into a premultiplied raster.
    pub fn raster(&self, i: usize) -> CaptionResult<Raster> {
        let frame = self.frames.get(i).ok_or_else(|| {
            CaptionError::validation(format!("frame index {i} out of range"))
        })?;
        let palette = self
            .effective_palette(i)
            .ok_or_else(|| CaptionError::validation(format!("frame {i} has no palette")))?;
        expand(frame, palette)
    }

    /// Swap in new content for frame `i`; bounds must match the frame being replaced.
    pub(crate) fn replace_frame(&mut self, i: usize, frame: Frame) -> CaptionResult<()> {
        let slot = self.frames.get_mut(i).ok_or_else(|| {
            CaptionError::validation(format!("frame index {i} out of range"))
        })?;
        if slot.bounds != frame.bounds {
            return Err(CaptionError::dimension_mismatch(format!(
                "replacement for frame {i} is {:?}, expected {:?}",
                frame.bounds, slot.bounds
            )));
        }
        frame.check_consistent()?;
        *slot = frame;
        Ok(())
    }

    /// Check every frame against its bounds and the canvas.
    pub fn validate(&self) -> CaptionResult<()> {
        if self.frames.len() != self.meta.len() {
            return Err(CaptionError::validation(
                "frame and metadata counts differ",
            ));
        }
        for (i, frame) in self.frames.iter().enumerate() {
            frame
                .check_consistent()
                .and_then(|_| frame.bounds.ensure_within(self.width, self.height))
                .map_err(|e| match e {
                    CaptionError::DimensionMismatch(m) => {
                        CaptionError::dimension_mismatch(format!("frame {i}: {m}"))
                    }
                    other => other,
                })?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/model.rs"]
mod tests;
