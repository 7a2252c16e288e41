use super::*;

fn pct(v: f32) -> BorderRadiusValue {
    BorderRadiusValue {
        magnitude: v,
        is_percent: true,
    }
}

fn px(v: f32) -> BorderRadiusValue {
    BorderRadiusValue {
        magnitude: v,
        is_percent: false,
    }
}

#[test]
fn percent_resolves_against_shorter_side_then_clamps() {
    assert_eq!(pct(50.0).resolve(100, 100), 50.0);
    assert_eq!(pct(15.0).resolve(200, 100), 15.0);
    assert_eq!(px(300.0).resolve(100, 40), 20.0);
    assert_eq!(px(7.0).resolve(100, 40), 7.0);
}

#[test]
fn resolving_does_not_mutate_the_parsed_value() {
    let radii = CornerRadii::uniform(pct(25.0));
    let a = radii.resolve(100, 100);
    let b = radii.resolve(40, 400);
    assert_eq!(a.top_left, 25.0);
    assert_eq!(b.top_left, 10.0);
    assert_eq!(radii.top_left, pct(25.0));
    assert_eq!(radii.resolve(100, 100), a);
}

#[test]
fn mask_outside_corner_boxes_is_opaque() {
    let r = CornerRadii::uniform(px(10.0)).resolve(100, 100);
    assert_eq!(r.mask_alpha(50, 0, 100, 100), 255);
    assert_eq!(r.mask_alpha(0, 50, 100, 100), 255);
    assert_eq!(r.mask_alpha(50, 50, 100, 100), 255);
}

#[test]
fn mask_corner_pixels_are_transparent_on_all_four_corners() {
    let r = CornerRadii::uniform(pct(50.0)).resolve(100, 100);
    for (x, y) in [(0, 0), (99, 0), (0, 99), (99, 99)] {
        assert_eq!(r.mask_alpha(x, y, 100, 100), 0, "({x},{y})");
    }
}

#[test]
fn mask_edge_band_is_partial_and_interior_is_opaque() {
    let r = CornerRadii::uniform(pct(50.0)).resolve(100, 100);
    // Center (0.5, 45.5) lies ~49.7px from the circle center (50, 50).
    let edge = r.mask_alpha(0, 45, 100, 100);
    assert!(edge > 0 && edge < 255, "edge alpha {edge}");
    // Pixel touching the circle center.
    assert_eq!(r.mask_alpha(49, 49, 100, 100), 255);
    assert_eq!(r.mask_alpha(30, 30, 100, 100), 255);
}

#[test]
fn mask_is_symmetric_across_corners() {
    let r = CornerRadii::uniform(px(12.0)).resolve(60, 40);
    for y in 0..12 {
        for x in 0..12 {
            let tl = r.mask_alpha(x, y, 60, 40);
            assert_eq!(tl, r.mask_alpha(59 - x, y, 60, 40));
            assert_eq!(tl, r.mask_alpha(x, 39 - y, 60, 40));
            assert_eq!(tl, r.mask_alpha(59 - x, 39 - y, 60, 40));
        }
    }
}

#[test]
fn zero_radius_is_identity() {
    let img = RgbaImage::from_pixel(5, 5, image::Rgba([1, 2, 3, 255]));
    assert_eq!(apply_border_radius(&img, &CornerRadii::uniform(px(0.0))), img);
}

#[test]
fn apply_clears_masked_pixels_and_scales_alpha() {
    let img = RgbaImage::from_pixel(100, 100, image::Rgba([255, 0, 0, 200]));
    let radii = CornerRadii::uniform(pct(50.0));
    let out = apply_border_radius(&img, &radii);

    assert_eq!(out.get_pixel(0, 0).0, [0, 0, 0, 0]);
    assert_eq!(out.get_pixel(50, 50).0, [255, 0, 0, 200]);

    let m = radii.resolve(100, 100).mask_alpha(0, 45, 100, 100);
    let expected = ((u32::from(m) * 200 + 127) / 255) as u8;
    assert_eq!(out.get_pixel(0, 45).0, [255, 0, 0, expected]);
}
