use super::*;

fn sample() -> RgbaImage {
    RgbaImage::from_fn(5, 4, |x, y| image::Rgba([x as u8 * 40, y as u8 * 60, 90, 255]))
}

#[test]
fn png_preserves_pixels_and_detects_format() {
    let img = sample();
    let bytes = encode(&img, ImageFormat::Png, 100).unwrap();
    let decoded = decode(&bytes).unwrap();
    assert_eq!(decoded.format, Some(ImageFormat::Png));
    assert_eq!(decoded.raster, img);
}

#[test]
fn webp_is_lossless() {
    let img = sample();
    let bytes = encode(&img, ImageFormat::Webp, 10).unwrap();
    let decoded = decode(&bytes).unwrap();
    assert_eq!(decoded.format, Some(ImageFormat::Webp));
    assert_eq!(decoded.raster, img);
}

#[test]
fn jpeg_quality_changes_size() {
    let img = RgbaImage::from_fn(64, 64, |x, y| {
        image::Rgba([(x * 4) as u8, (y * 4) as u8, ((x ^ y) * 4) as u8, 255])
    });
    let hi = encode(&img, ImageFormat::Jpeg, 100).unwrap();
    let lo = encode(&img, ImageFormat::Jpeg, 5).unwrap();
    assert!(lo.len() < hi.len());
    let decoded = decode(&hi).unwrap();
    assert_eq!(decoded.format, Some(ImageFormat::Jpeg));
    assert_eq!(decoded.raster.dimensions(), (64, 64));
}

#[test]
fn garbage_is_source_error() {
    assert!(matches!(
        decode(b"definitely not an image"),
        Err(KritiError::SourceNotFound(_))
    ));
}

#[test]
fn encoding_is_deterministic() {
    let img = sample();
    assert_eq!(
        encode(&img, ImageFormat::Png, 100).unwrap(),
        encode(&img, ImageFormat::Png, 100).unwrap()
    );
}
