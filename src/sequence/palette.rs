use std::collections::HashMap;

use crate::foundation::error::{CaptionError, CaptionResult};
use crate::render::raster::Raster;
use crate::sequence::model::{Frame, Palette};

const TRANSPARENT: [u8; 4] = [0, 0, 0, 0];

fn entry_color(palette: &Palette, transparent: Option<u8>, index: u8) -> [u8; 4] {
    if transparent == Some(index) {
        return TRANSPARENT;
    }
    match palette.get(index) {
        Some([r, g, b]) => [r, g, b, 255],
        None => TRANSPARENT,
    }
}

/// Expand a frame's indices into a premultiplied raster using `palette`.
///
/// The transparent index and indices past the end of the palette become transparent black.
pub(crate) fn expand(frame: &Frame, palette: &Palette) -> CaptionResult<Raster> {
    let mut data = Vec::with_capacity(frame.indices().len() * 4);
    for &i in frame.indices() {
        data.extend_from_slice(&entry_color(palette, frame.transparent(), i));
    }
    Raster::new(frame.bounds(), data)
}

fn distance_sq(a: [u8; 4], b: [u8; 4]) -> u32 {
    a.iter()
        .zip(b)
        .map(|(&x, y)| {
            let d = i32::from(x) - i32::from(y);
            (d * d) as u32
        })
        .sum()
}

/// Nearest palette index to a premultiplied color.
///
/// Ties resolve to the lowest index. The transparent index competes as transparent black.
fn nearest_index(palette: &Palette, transparent: Option<u8>, px: [u8; 4]) -> u8 {
    let mut best = 0u8;
    let mut best_d = u32::MAX;
    for i in 0..palette.len() {
        let i = i as u8;
        let d = distance_sq(entry_color(palette, transparent, i), px);
        if d < best_d {
            best = i;
            best_d = d;
            if d == 0 {
                break;
            }
        }
    }
    best
}

/// Map a rendered raster back onto `frame`'s palette.
///
/// `source` must be the expansion the raster was rendered from. Pixels the render left unchanged
/// keep their original index, so untouched regions stay byte-identical even when the palette holds
/// duplicate colors.
pub(crate) fn write_back(
    frame: &Frame,
    palette: &Palette,
    source: &Raster,
    rendered: &Raster,
) -> CaptionResult<Frame> {
    if rendered.bounds() != frame.bounds() || source.bounds() != frame.bounds() {
        return Err(CaptionError::dimension_mismatch(format!(
            "rendered raster {:?} does not match frame {:?}",
            rendered.bounds(),
            frame.bounds()
        )));
    }

    let mut indices = frame.indices().to_vec();
    let mut memo: HashMap<[u8; 4], u8> = HashMap::new();
    let pixels = source
        .data()
        .chunks_exact(4)
        .zip(rendered.data().chunks_exact(4));
    for (idx, (before, after)) in indices.iter_mut().zip(pixels) {
        if before == after {
            continue;
        }
        let px = [after[0], after[1], after[2], after[3]];
        *idx = *memo
            .entry(px)
            .or_insert_with(|| nearest_index(palette, frame.transparent(), px));
    }
    frame.with_indices(indices)
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/palette.rs"]
mod tests;
