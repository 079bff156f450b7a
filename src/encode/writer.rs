use std::borrow::Cow;

use crate::foundation::error::{CaptionError, CaptionResult};
use crate::sequence::model::{Palette, Sequence};

fn to_u16(v: u32, what: &str) -> CaptionResult<u16> {
    v.try_into()
        .map_err(|_| CaptionError::dimension_mismatch(format!("{what} {v} exceeds GIF limit")))
}

/// Serialize a sequence as an animated GIF.
///
/// Frames are written in order with their delay, disposal, offset, local palette and transparent
/// index exactly as stored. Nothing is returned unless the whole stream was written.
#[tracing::instrument(skip(seq), fields(frames = seq.len()))]
pub fn encode_gif(seq: &Sequence) -> CaptionResult<Vec<u8>> {
    seq.validate()?;
    let width = to_u16(seq.width(), "canvas width")?;
    let height = to_u16(seq.height(), "canvas height")?;
    let global = seq
        .global_palette()
        .map(Palette::to_rgb_bytes)
        .unwrap_or_default();

    let encode_err = |e: gif::EncodingError| CaptionError::encode(e.to_string());

    let mut out = Vec::new();
    let mut encoder = gif::Encoder::new(&mut out, width, height, &global).map_err(encode_err)?;
    encoder
        .set_repeat(seq.loop_count().into())
        .map_err(encode_err)?;

    for (i, (frame, meta)) in seq.iter().enumerate() {
        if frame.palette().is_none() && seq.global_palette().is_none() {
            return Err(CaptionError::encode(format!(
                "frame {i} has neither a local nor a global palette"
            )));
        }
        let b = frame.bounds();
        let gf = gif::Frame {
            delay: meta.delay_cs,
            dispose: meta.disposal.into(),
            transparent: frame.transparent(),
            left: to_u16(b.left, "frame left")?,
            top: to_u16(b.top, "frame top")?,
            width: to_u16(b.width, "frame width")?,
            height: to_u16(b.height, "frame height")?,
            palette: frame.palette().map(Palette::to_rgb_bytes),
            buffer: Cow::Borrowed(frame.indices()),
            ..gif::Frame::default()
        };
        encoder
            .write_frame(&gf)
            .map_err(|e| CaptionError::encode(format!("frame {i}: {e}")))?;
    }

    encoder
        .into_inner()
        .map_err(|e| CaptionError::encode(format!("failed to finish GIF stream: {e}")))?;
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/writer.rs"]
mod tests;
