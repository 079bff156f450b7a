use std::path::{Path, PathBuf};

use crate::foundation::core::{Rgba8, Vec2};
use crate::foundation::error::{CaptionError, CaptionResult};

/// Horizontal alignment of each wrapped line inside the text box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    /// Flush with the left edge of the box.
    Left,
    /// Centered in the box.
    #[default]
    Center,
    /// Flush with the right edge of the box.
    Right,
}

impl TextAlign {
    fn fraction(self) -> f64 {
        match self {
            Self::Left => 0.0,
            Self::Center => 0.5,
            Self::Right => 1.0,
        }
    }
}

/// Immutable caption styling shared by every frame of a run.
///
/// Defaults reproduce the classic caption look: bold white 70px text with a half-transparent
/// black shadow offset by 2px, centered 80px above the bottom edge.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderStyle {
    /// TrueType/OpenType font file.
    pub font_path: PathBuf,
    /// Font size in pixels.
    pub size_px: f32,
    /// Main text color; alpha is the fill opacity.
    pub fill: Rgba8,
    /// Shadow color; alpha is the shadow opacity.
    pub shadow: Rgba8,
    /// Shadow displacement relative to the main text, in pixels.
    pub shadow_offset: Vec2,
    /// Fractions of the text box anchored at the anchor point (`0.5, 0.5` = box center).
    pub anchor: Vec2,
    /// Baseline-to-baseline distance as a multiple of `size_px`.
    pub line_spacing: f32,
    /// Per-line horizontal alignment.
    pub align: TextAlign,
    /// Horizontal margin kept free on both sides of the frame.
    pub margin_px: u32,
    /// Distance of the anchor point from the bottom edge. Absolute, not height-relative.
    pub bottom_offset_px: u32,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            font_path: PathBuf::from("assets/fonts/DejaVuSans-Bold.ttf"),
            size_px: 70.0,
            fill: Rgba8::rgb(255, 255, 255),
            shadow: Rgba8::rgb(0, 0, 0).with_opacity(0.5),
            shadow_offset: Vec2::new(2.0, 2.0),
            anchor: Vec2::new(0.5, 0.5),
            line_spacing: 1.5,
            align: TextAlign::Center,
            margin_px: 20,
            bottom_offset_px: 80,
        }
    }
}

impl RenderStyle {
    /// Parse a style from JSON; omitted fields take their defaults.
    pub fn from_json_str(s: &str) -> CaptionResult<Self> {
        let style: Self = serde_json::from_str(s)
            .map_err(|e| CaptionError::validation(format!("invalid style JSON: {e}")))?;
        style.validate()?;
        Ok(style)
    }

    /// Read and parse a JSON style file.
    pub fn from_json_file(path: &Path) -> CaptionResult<Self> {
        let s = std::fs::read_to_string(path).map_err(|e| {
            CaptionError::validation(format!("failed to read style '{}': {e}", path.display()))
        })?;
        Self::from_json_str(&s)
    }

    /// Reject values that cannot produce a meaningful layout.
    pub fn validate(&self) -> CaptionResult<()> {
        if !self.size_px.is_finite() || self.size_px <= 0.0 {
            return Err(CaptionError::validation("size_px must be finite and > 0"));
        }
        if !self.line_spacing.is_finite() || self.line_spacing <= 0.0 {
            return Err(CaptionError::validation(
                "line_spacing must be finite and > 0",
            ));
        }
        let in_unit = |v: f64| v.is_finite() && (0.0..=1.0).contains(&v);
        if !in_unit(self.anchor.x) || !in_unit(self.anchor.y) {
            return Err(CaptionError::validation("anchor fractions must be in [0, 1]"));
        }
        if !self.shadow_offset.is_finite() {
            return Err(CaptionError::validation("shadow_offset must be finite"));
        }
        Ok(())
    }

    /// Text box width for a frame `frame_width` pixels wide.
    pub fn max_width(&self, frame_width: u32) -> f32 {
        frame_width as f32 - 2.0 * self.margin_px as f32
    }

    /// Top-left position of each line box given the measured line widths.
    ///
    /// `line_height` is the shaped height of one line (ascent plus descent); boxes are stacked
    /// `line_height * line_spacing` apart.
    pub(crate) fn place_lines(
        &self,
        line_widths: &[f32],
        line_height: f32,
        frame_width: u32,
        frame_height: u32,
    ) -> Vec<Vec2> {
        let n = line_widths.len() as f64;
        let lh = f64::from(line_height);
        let step = lh * f64::from(self.line_spacing);
        let block_h = n * step - (f64::from(self.line_spacing) - 1.0) * lh;
        let box_w = f64::from(self.max_width(frame_width));

        let anchor_x = f64::from(frame_width / 2);
        let anchor_y = f64::from(frame_height) - f64::from(self.bottom_offset_px);
        let box_left = anchor_x - self.anchor.x * box_w;
        let box_top = anchor_y - self.anchor.y * block_h;
        let align = self.align.fraction();

        line_widths
            .iter()
            .enumerate()
            .map(|(i, &w)| {
                Vec2::new(
                    box_left + align * (box_w - f64::from(w)),
                    box_top + (i as f64) * step,
                )
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/style.rs"]
mod tests;
