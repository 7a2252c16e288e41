use std::io::Cursor;

use image::{ExtendedColorType, ImageEncoder, RgbaImage};

use crate::foundation::{
    core::ImageFormat,
    error::{KritiError, KritiResult},
};

/// A decoded raster plus the format the decoder detected.
#[derive(Clone, Debug)]
pub struct Decoded {
    pub raster: RgbaImage,
    /// `None` when the source format is readable but not one we can write.
    pub format: Option<ImageFormat>,
}

/// Decode encoded image bytes to straight RGBA8.
pub fn decode(bytes: &[u8]) -> KritiResult<Decoded> {
    let detected = image::guess_format(bytes)
        .map_err(|e| KritiError::source_not_found(format!("unrecognized image data: {e}")))?;
    let img = image::load_from_memory_with_format(bytes, detected)
        .map_err(|e| KritiError::source_not_found(format!("decode image: {e}")))?;
    Ok(Decoded {
        raster: img.to_rgba8(),
        format: ImageFormat::from_detected(detected),
    })
}

/// Encode a straight RGBA8 raster.
///
/// `quality` applies to JPEG only: the WebP encoder is lossless and PNG has no quality knob.
/// JPEG output drops the alpha channel.
pub fn encode(img: &RgbaImage, format: ImageFormat, quality: u8) -> KritiResult<Vec<u8>> {
    let (w, h) = img.dimensions();
    let mut out = Vec::new();
    let res = match format {
        ImageFormat::Jpeg => {
            let rgb = image::DynamicImage::ImageRgba8(img.clone()).to_rgb8();
            image::codecs::jpeg::JpegEncoder::new_with_quality(
                &mut Cursor::new(&mut out),
                quality.clamp(1, 100),
            )
            .write_image(rgb.as_raw(), w, h, ExtendedColorType::Rgb8)
        }
        ImageFormat::Png => image::codecs::png::PngEncoder::new(&mut Cursor::new(&mut out))
            .write_image(img.as_raw(), w, h, ExtendedColorType::Rgba8),
        ImageFormat::Webp => {
            image::codecs::webp::WebPEncoder::new_lossless(&mut Cursor::new(&mut out))
                .write_image(img.as_raw(), w, h, ExtendedColorType::Rgba8)
        }
    };
    res.map_err(|e| KritiError::encode(format!("{format}: {e}")))?;
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/raster/codec.rs"]
mod tests;
