use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::foundation::error::{CaptionError, CaptionResult};
use crate::render::compositor::FrameCompositor;
use crate::sequence::model::Sequence;
use crate::sequence::palette::{expand, write_back};

/// A recoverable per-frame problem; the frame was left unmodified.
#[derive(Debug)]
pub struct FrameDiagnostic {
    /// Index of the affected frame.
    pub index: usize,
    /// What went wrong.
    pub error: CaptionError,
}

/// Summary of a [`SequenceProcessor::process_all`] run.
#[derive(Debug, Default)]
pub struct ProcessReport {
    /// Frames that received the caption.
    pub frames_rendered: usize,
    /// Frames that kept their original content, in frame order.
    pub diagnostics: Vec<FrameDiagnostic>,
}

impl ProcessReport {
    /// Return `true` when every frame was captioned.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Captions every frame of a [`Sequence`] in display order.
pub struct SequenceProcessor {
    compositor: FrameCompositor,
    cancel: Option<Arc<AtomicBool>>,
}

impl SequenceProcessor {
    /// Process with the given compositor.
    pub fn new(compositor: FrameCompositor) -> Self {
        Self {
            compositor,
            cancel: None,
        }
    }

    /// Stop between frames once `flag` becomes `true`.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Borrow the compositor.
    pub fn compositor(&self) -> &FrameCompositor {
        &self.compositor
    }

    /// Draw `text` onto every frame, replacing each frame's pixels in place.
    ///
    /// Length, order, delays, disposal, origins and palettes are preserved. A frame whose render
    /// reports a recoverable diagnostic keeps its original pixels and processing continues. Any
    /// other failure aborts the run. Replacements are committed only after every frame succeeded,
    /// so on error `sequence` is left exactly as it was passed in.
    #[tracing::instrument(skip(self, sequence), fields(frames = sequence.len()))]
    pub fn process_all(
        &mut self,
        sequence: &mut Sequence,
        text: &str,
    ) -> CaptionResult<ProcessReport> {
        let mut report = ProcessReport::default();
        let mut staged = Vec::with_capacity(sequence.len());

        for i in 0..sequence.len() {
            if self
                .cancel
                .as_ref()
                .is_some_and(|c| c.load(Ordering::Relaxed))
            {
                return Err(CaptionError::Cancelled);
            }

            let palette = sequence
                .effective_palette(i)
                .cloned()
                .ok_or_else(|| CaptionError::validation(format!("frame {i} has no palette")))?;
            let frame = &sequence.frames()[i];
            let source = expand(frame, &palette)?;

            let outcome = self.compositor.render(&source, text);
            if let Some(error) = outcome.diagnostic {
                if !error.is_recoverable() {
                    return Err(error);
                }
                report.diagnostics.push(FrameDiagnostic { index: i, error });
                continue;
            }
            if outcome.raster.bounds() != source.bounds() {
                return Err(CaptionError::dimension_mismatch(format!(
                    "frame {i} rendered as {:?}, expected {:?}",
                    outcome.raster.bounds(),
                    source.bounds()
                )));
            }

            staged.push((i, write_back(frame, &palette, &source, &outcome.raster)?));
        }

        for (i, frame) in staged {
            sequence.replace_frame(i, frame)?;
            report.frames_rendered += 1;
        }

        tracing::debug!(
            rendered = report.frames_rendered,
            skipped = report.diagnostics.len(),
            "sequence processed"
        );
        Ok(report)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/processor.rs"]
mod tests;
