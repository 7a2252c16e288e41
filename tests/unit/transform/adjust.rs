use super::*;

fn solid(rgba: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(3, 3, image::Rgba(rgba))
}

#[test]
fn zero_strengths_are_identity() {
    let img = RgbaImage::from_fn(4, 4, |x, y| image::Rgba([x as u8 * 60, y as u8 * 60, 128, 200]));
    assert_eq!(brightness(&img, 0.0), img);
    assert_eq!(contrast(&img, 0.0), img);
    assert_eq!(gamma(&img, 1.0), img);
    assert_eq!(saturation(&img, 0.0), img);
}

#[test]
fn brightness_shifts_and_clamps() {
    assert_eq!(brightness(&solid([100, 250, 0, 77]), 20.0).get_pixel(0, 0).0, [151, 255, 51, 77]);
    assert_eq!(brightness(&solid([100, 100, 100, 255]), -100.0).get_pixel(0, 0).0, [0, 0, 0, 255]);
}

#[test]
fn contrast_minus_100_is_mid_gray() {
    let out = contrast(&solid([0, 255, 30, 255]), -100.0);
    assert_eq!(out.get_pixel(1, 1).0, [128, 128, 128, 255]);
}

#[test]
fn gamma_above_one_brightens_midtones() {
    let out = gamma(&solid([128, 0, 255, 255]), 2.0);
    let p = out.get_pixel(0, 0).0;
    assert!(p[0] > 128);
    assert_eq!(p[1], 0);
    assert_eq!(p[2], 255);
}

#[test]
fn saturation_minus_100_is_grayscale() {
    let out = saturation(&solid([200, 50, 50, 255]), -100.0);
    let p = out.get_pixel(0, 0).0;
    assert_eq!(p[0], p[1]);
    assert_eq!(p[1], p[2]);
}

#[test]
fn saturation_boost_moves_away_from_gray() {
    let out = saturation(&solid([150, 100, 100, 255]), 100.0);
    let p = out.get_pixel(0, 0).0;
    assert!(p[0] > 150 && p[1] < 100);
}

#[test]
fn sharpen_leaves_flat_areas_and_boosts_edges() {
    let flat = solid([90, 90, 90, 255]);
    assert_eq!(sharpen(&flat, 1.0).unwrap(), flat);

    let edge = RgbaImage::from_fn(8, 1, |x, _| {
        let v = if x < 4 { 50 } else { 200 };
        image::Rgba([v, v, v, 255])
    });
    let out = sharpen(&edge, 1.5).unwrap();
    assert!(out.get_pixel(3, 0).0[0] < 50);
    assert!(out.get_pixel(4, 0).0[0] > 200);
}
