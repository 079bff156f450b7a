//! gifcaption draws word-wrapped caption text with a drop shadow onto every frame of an animated
//! GIF and re-encodes it.
//!
//! # Pipeline overview
//!
//! 1. **Decode**: GIF bytes -> [`Sequence`] (indexed frames, palettes, delays, disposal)
//! 2. **Process**: [`SequenceProcessor`] expands each frame to a [`Raster`], asks the
//!    [`FrameCompositor`] to draw the caption, and maps the result back onto the frame's palette
//! 3. **Encode**: [`encode_gif`] writes the sequence back out with its metadata untouched
//!
//! [`CaptionPipeline`] chains the three stages and tags failures with the stage they came from.
//!
//! Text is shaped with Parley and rasterized with `vello_cpu`. Line breaking is a greedy word
//! wrap ([`wrap`]) against a pixel width measured through the [`TextMeasure`] trait.
//!
//! A font that fails to load does not fail the run: frames are left untouched and each one is
//! reported in the [`ProcessReport`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;
mod render;
mod sequence;
mod text;

/// GIF encoding and file output.
pub mod encode;
/// End-to-end decode/caption/encode driver.
pub mod pipeline;
/// Seeded caption phrase templating.
pub mod variant;

pub use crate::foundation::core::{FrameBounds, Rgba8, Vec2};
pub use crate::foundation::error::{CaptionError, CaptionResult};

pub use crate::encode::output::{ensure_parent_dir, write_atomic};
pub use crate::encode::writer::encode_gif;
pub use crate::pipeline::{CaptionPipeline, PipelineError, PipelineOutput, Stage};
pub use crate::render::compositor::{FrameCompositor, RenderOutcome};
pub use crate::render::raster::Raster;
pub use crate::render::style::{RenderStyle, TextAlign};
pub use crate::sequence::decode::decode_gif;
pub use crate::sequence::model::{Disposal, Frame, FrameMeta, LoopCount, Palette, Sequence};
pub use crate::sequence::processor::{FrameDiagnostic, ProcessReport, SequenceProcessor};
pub use crate::text::engine::{LoadedFont, ShapedMetrics, TextLayoutEngine};
pub use crate::text::wrap::{LineLayout, TextMeasure, wrap};
pub use crate::variant::CaptionVariants;
