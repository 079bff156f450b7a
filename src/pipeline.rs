use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use crate::encode::output::write_atomic;
use crate::encode::writer::encode_gif;
use crate::foundation::error::{CaptionError, CaptionResult};
use crate::render::compositor::FrameCompositor;
use crate::render::style::RenderStyle;
use crate::sequence::decode::decode_gif;
use crate::sequence::model::Sequence;
use crate::sequence::processor::{ProcessReport, SequenceProcessor};

/// Pipeline stage a failure originated from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    /// Reading the supplied animation bytes.
    Fetch,
    /// Drawing captions onto frames.
    Process,
    /// Serializing and writing the output.
    Encode,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Fetch => "fetch",
            Self::Process => "process",
            Self::Encode => "encode",
        })
    }
}

/// A failed pipeline run, tagged with the stage that failed.
#[derive(thiserror::Error, Debug)]
#[error("{stage} stage failed: {source}")]
pub struct PipelineError {
    /// Stage the error came from.
    pub stage: Stage,
    /// Underlying error.
    #[source]
    pub source: CaptionError,
}

trait StageExt<T> {
    fn at(self, stage: Stage) -> Result<T, PipelineError>;
}

impl<T> StageExt<T> for CaptionResult<T> {
    fn at(self, stage: Stage) -> Result<T, PipelineError> {
        self.map_err(|source| {
            tracing::debug!(%stage, "pipeline failed");
            PipelineError { stage, source }
        })
    }
}

/// Successful pipeline output.
#[derive(Debug)]
pub struct PipelineOutput {
    /// Encoded animation.
    pub bytes: Vec<u8>,
    /// Per-frame processing summary.
    pub report: ProcessReport,
}

/// Decode, caption and re-encode an animation in one call.
pub struct CaptionPipeline {
    style: RenderStyle,
    cancel: Option<Arc<AtomicBool>>,
}

impl CaptionPipeline {
    /// Pipeline drawing with `style`.
    pub fn new(style: RenderStyle) -> Self {
        Self {
            style,
            cancel: None,
        }
    }

    /// Abort processing between frames once `flag` becomes `true`.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    fn processor(&self) -> CaptionResult<SequenceProcessor> {
        let processor = SequenceProcessor::new(FrameCompositor::new(self.style.clone())?);
        Ok(match &self.cancel {
            Some(flag) => processor.with_cancel_flag(flag.clone()),
            None => processor,
        })
    }

    /// Caption an already decoded sequence and encode it.
    #[tracing::instrument(skip(self, sequence, text), fields(frames = sequence.len()))]
    pub fn run_sequence(
        &self,
        mut sequence: Sequence,
        text: &str,
    ) -> Result<PipelineOutput, PipelineError> {
        tracing::debug!("processing");
        let report = self
            .processor()
            .and_then(|mut p| p.process_all(&mut sequence, text))
            .at(Stage::Process)?;

        let bytes = encode_gif(&sequence).at(Stage::Encode)?;
        tracing::debug!(bytes = bytes.len(), "encoded");
        Ok(PipelineOutput { bytes, report })
    }

    /// Decode GIF bytes, caption every frame and encode the result.
    pub fn run(&self, input: &[u8], text: &str) -> Result<PipelineOutput, PipelineError> {
        let sequence = decode_gif(input).at(Stage::Fetch)?;
        tracing::debug!(frames = sequence.len(), "fetched");
        self.run_sequence(sequence, text)
    }

    /// Like [`CaptionPipeline::run`], then write the output file atomically.
    pub fn run_to_file(
        &self,
        input: &[u8],
        text: &str,
        out_path: &Path,
    ) -> Result<ProcessReport, PipelineError> {
        let out = self.run(input, text)?;
        write_atomic(out_path, &out.bytes).at(Stage::Encode)?;
        Ok(out.report)
    }
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;
