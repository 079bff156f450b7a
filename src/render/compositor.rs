use crate::foundation::core::Vec2;
use crate::foundation::error::{CaptionError, CaptionResult};
use crate::render::raster::Raster;
use crate::render::style::RenderStyle;
use crate::text::engine::{LoadedFont, ShapedMetrics, TextLayoutEngine};
use crate::text::wrap::wrap;

/// Result of rendering a caption onto one frame.
#[derive(Debug)]
pub struct RenderOutcome {
    /// Rendered raster, or the untouched input when `diagnostic` is set.
    pub raster: Raster,
    /// Recoverable problem that prevented drawing.
    pub diagnostic: Option<CaptionError>,
}

/// Draws wrapped caption text with a drop shadow onto frame rasters.
///
/// The font is loaded lazily and kept for the compositor's lifetime. A failed load is not cached,
/// so every frame rendered while the font is unavailable reports its own diagnostic.
pub struct FrameCompositor {
    style: RenderStyle,
    engine: TextLayoutEngine,
    font: Option<LoadedFont>,
}

impl FrameCompositor {
    /// Create a compositor after validating `style`.
    pub fn new(style: RenderStyle) -> CaptionResult<Self> {
        style.validate()?;
        Ok(Self {
            style,
            engine: TextLayoutEngine::new(),
            font: None,
        })
    }

    /// Style this compositor draws with.
    pub fn style(&self) -> &RenderStyle {
        &self.style
    }

    fn ensure_font(&mut self) -> CaptionResult<LoadedFont> {
        if let Some(font) = &self.font {
            return Ok(font.clone());
        }
        let path = &self.style.font_path;
        let bytes = std::fs::read(path).map_err(|e| {
            CaptionError::font_load(format!("failed to read font '{}': {e}", path.display()))
        })?;
        let font = self.engine.load_font(bytes).map_err(|e| {
            CaptionError::font_load(format!("font '{}': {e}", path.display()))
        })?;
        tracing::debug!(family = font.family(), "caption font loaded");
        self.font = Some(font.clone());
        Ok(font)
    }

    /// Render `text` onto a copy of `raster`.
    ///
    /// The output always has the same bounds as the input. Pixels outside the drawn glyphs are
    /// copied unchanged. If the font cannot be loaded the input is returned as-is together with a
    /// [`CaptionError::FontLoad`] diagnostic.
    pub fn render(&mut self, raster: &Raster, text: &str) -> RenderOutcome {
        match self.try_render(raster, text) {
            Ok(raster) => RenderOutcome {
                raster,
                diagnostic: None,
            },
            Err(e) => {
                tracing::warn!(error = %e, "caption not drawn");
                RenderOutcome {
                    raster: raster.clone(),
                    diagnostic: Some(e),
                }
            }
        }
    }

    fn try_render(&mut self, raster: &Raster, text: &str) -> CaptionResult<Raster> {
        let font = self.ensure_font()?;
        match self.text_layer(&font, raster.width(), raster.height(), text)? {
            Some(layer) => raster.over(layer.data_as_u8_slice()),
            None => Ok(raster.clone()),
        }
    }

    /// Rasterize shadow then fill passes into a transparent layer the size of the frame.
    fn text_layer(
        &mut self,
        font: &LoadedFont,
        width: u32,
        height: u32,
        text: &str,
    ) -> CaptionResult<Option<vello_cpu::Pixmap>> {
        let w: u16 = width
            .try_into()
            .map_err(|_| CaptionError::dimension_mismatch("frame width exceeds u16"))?;
        let h: u16 = height
            .try_into()
            .map_err(|_| CaptionError::dimension_mismatch("frame height exceeds u16"))?;
        if w == 0 || h == 0 {
            return Ok(None);
        }

        let style = &self.style;
        let engine = &mut self.engine;

        let mut metrics = ShapedMetrics::new(engine, font, style.size_px);
        let lines = wrap(text, style.max_width(width), &mut metrics);
        if lines.is_empty() {
            return Ok(None);
        }

        let layouts: Vec<_> = lines
            .lines()
            .iter()
            .map(|line| engine.layout_line(line, font, style.size_px))
            .collect();
        let widths: Vec<f32> = layouts.iter().map(|l| l.width()).collect();
        let line_height = layouts.first().map_or(style.size_px, |l| l.height());
        let origins = style.place_lines(&widths, line_height, width, height);

        let mut ctx = vello_cpu::RenderContext::new(w, h);
        for (color, offset) in [
            (style.shadow, style.shadow_offset),
            (style.fill, Vec2::ZERO),
        ] {
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                color.r, color.g, color.b, color.a,
            ));
            for (layout, origin) in layouts.iter().zip(&origins) {
                let at = *origin + offset;
                ctx.set_transform(vello_cpu::kurbo::Affine::translate((at.x, at.y)));
                for line in layout.lines() {
                    for item in line.items() {
                        let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                            continue;
                        };
                        // Positioned glyphs carry the run offset and the line baseline.
                        let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                            id: g.id,
                            x: g.x,
                            y: g.y,
                        });
                        ctx.glyph_run(font.data())
                            .font_size(run.run().font_size())
                            .fill_glyphs(glyphs);
                    }
                }
            }
        }
        ctx.flush();

        let mut layer = vello_cpu::Pixmap::new(w, h);
        ctx.render_to_pixmap(&mut layer);
        Ok(Some(layer))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
