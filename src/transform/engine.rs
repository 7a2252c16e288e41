use image::RgbaImage;

use crate::{
    foundation::error::KritiResult,
    parse::options::DestinationDescriptor,
    raster::pixels,
    transform::chain::{Filter, chain_bounds},
};

/// Run `chain` over `source` and return the final raster.
///
/// The result is drawn source-over onto a canvas pre-filled with the destination background
/// when one is set and not fully transparent.
#[tracing::instrument(skip_all, fields(filters = chain.len()))]
pub fn run_pipeline(
    source: &RgbaImage,
    chain: &[Filter],
    dest: &DestinationDescriptor,
) -> KritiResult<RgbaImage> {
    let (src_w, src_h) = source.dimensions();
    let (out_w, out_h) = chain_bounds(chain, src_w, src_h);
    tracing::debug!(src_w, src_h, out_w, out_h, "pipeline bounds");

    let mut current = source.clone();
    for filter in chain {
        current = filter.apply(&current)?;
    }
    debug_assert_eq!(current.dimensions(), (out_w, out_h));

    match dest.background {
        Some(bg) if !bg.is_transparent() => {
            let mut canvas = pixels::filled(out_w, out_h, bg);
            pixels::draw_over(&mut canvas, &current, 0, 0);
            Ok(canvas)
        }
        _ => Ok(current),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/engine.rs"]
mod tests;
