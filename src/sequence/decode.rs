use std::io::Cursor;

use crate::foundation::core::FrameBounds;
use crate::foundation::error::{CaptionError, CaptionResult};
use crate::sequence::model::{Disposal, Frame, FrameMeta, LoopCount, Palette, Sequence};

impl From<gif::DisposalMethod> for Disposal {
    fn from(d: gif::DisposalMethod) -> Self {
        match d {
            gif::DisposalMethod::Any => Self::Any,
            gif::DisposalMethod::Keep => Self::Keep,
            gif::DisposalMethod::Background => Self::Background,
            gif::DisposalMethod::Previous => Self::Previous,
        }
    }
}

impl From<Disposal> for gif::DisposalMethod {
    fn from(d: Disposal) -> Self {
        match d {
            Disposal::Any => Self::Any,
            Disposal::Keep => Self::Keep,
            Disposal::Background => Self::Background,
            Disposal::Previous => Self::Previous,
        }
    }
}

impl From<gif::Repeat> for LoopCount {
    fn from(r: gif::Repeat) -> Self {
        match r {
            gif::Repeat::Infinite => Self::Infinite,
            gif::Repeat::Finite(n) => Self::Finite(n),
        }
    }
}

impl From<LoopCount> for gif::Repeat {
    fn from(l: LoopCount) -> Self {
        match l {
            LoopCount::Infinite => Self::Infinite,
            LoopCount::Finite(n) => Self::Finite(n),
        }
    }
}

/// Decode GIF bytes into an indexed [`Sequence`], keeping palettes, offsets and frame metadata.
#[tracing::instrument(skip(bytes), fields(len = bytes.len()))]
pub fn decode_gif(bytes: &[u8]) -> CaptionResult<Sequence> {
    let mut opts = gif::DecodeOptions::new();
    opts.set_color_output(gif::ColorOutput::Indexed);
    let mut decoder = opts
        .read_info(Cursor::new(bytes))
        .map_err(|e| CaptionError::decode(format!("failed to read GIF header: {e}")))?;

    let global = decoder
        .global_palette()
        .filter(|p| !p.is_empty())
        .map(Palette::from_rgb_bytes)
        .transpose()?;
    let mut seq = Sequence::new(u32::from(decoder.width()), u32::from(decoder.height()))
        .with_global_palette(global);

    let mut index = 0usize;
    while let Some(f) = decoder
        .read_next_frame()
        .map_err(|e| CaptionError::decode(format!("failed to read frame {index}: {e}")))?
    {
        let bounds = FrameBounds {
            left: u32::from(f.left),
            top: u32::from(f.top),
            width: u32::from(f.width),
            height: u32::from(f.height),
        };
        let palette = f
            .palette
            .as_deref()
            .map(Palette::from_rgb_bytes)
            .transpose()?;
        let frame = Frame::new(bounds, f.buffer.to_vec(), palette, f.transparent)?;
        let meta = FrameMeta {
            delay_cs: f.delay,
            disposal: f.dispose.into(),
        };
        seq.push_frame(frame, meta)?;
        index += 1;
    }

    let seq = seq.with_loop_count(decoder.repeat().into());
    tracing::debug!(frames = seq.len(), "decoded GIF");
    Ok(seq)
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/decode.rs"]
mod tests;
