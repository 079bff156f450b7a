use std::borrow::Cow;

use crate::foundation::error::{CaptionError, CaptionResult};
use crate::text::wrap::TextMeasure;

/// Brush carried through Parley layouts. Paint is chosen per pass at draw time, so it is empty.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct NoBrush;

/// A font registered with the layout engine, ready for shaping and rasterization.
#[derive(Clone)]
pub struct LoadedFont {
    family: String,
    data: vello_cpu::peniko::FontData,
}

impl LoadedFont {
    /// Family name reported by the font's name table.
    pub fn family(&self) -> &str {
        &self.family
    }

    pub(crate) fn data(&self) -> &vello_cpu::peniko::FontData {
        &self.data
    }
}

impl std::fmt::Debug for LoadedFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedFont")
            .field("family", &self.family)
            .finish_non_exhaustive()
    }
}

/// Stateful helper for shaping text with Parley from raw font bytes.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<NoBrush>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    /// Construct a new layout engine with fresh Parley contexts.
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
        }
    }

    /// Register font bytes and return a handle usable for layout and drawing.
    pub fn load_font(&mut self, font_bytes: Vec<u8>) -> CaptionResult<LoadedFont> {
        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.clone()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| CaptionError::font_load("no font families registered from font bytes"))?;

        let family = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| CaptionError::font_load("registered font family has no name"))?
            .to_string();

        let data = vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(font_bytes), 0);
        Ok(LoadedFont { family, data })
    }

    /// Shape a single unwrapped line of text.
    pub(crate) fn layout_line(
        &mut self,
        text: &str,
        font: &LoadedFont,
        size_px: f32,
    ) -> parley::Layout<NoBrush> {
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(font.family.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));

        let mut layout: parley::Layout<NoBrush> = builder.build(text);
        layout.break_all_lines(None);
        layout.align(
            None,
            parley::Alignment::Start,
            parley::AlignmentOptions::default(),
        );
        layout
    }

    /// Advance width in pixels of `text` shaped as one line.
    pub fn measure(&mut self, text: &str, font: &LoadedFont, size_px: f32) -> f32 {
        if text.is_empty() {
            return 0.0;
        }
        self.layout_line(text, font, size_px).width()
    }
}

/// [`TextMeasure`] implementation backed by real glyph shaping.
pub struct ShapedMetrics<'a> {
    engine: &'a mut TextLayoutEngine,
    font: &'a LoadedFont,
    size_px: f32,
}

impl<'a> ShapedMetrics<'a> {
    /// Bind an engine, font and size into a measuring function.
    pub fn new(engine: &'a mut TextLayoutEngine, font: &'a LoadedFont, size_px: f32) -> Self {
        Self {
            engine,
            font,
            size_px,
        }
    }
}

impl TextMeasure for ShapedMetrics<'_> {
    fn measure(&mut self, text: &str) -> f32 {
        self.engine.measure(text, self.font, self.size_px)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/engine.rs"]
mod tests;
