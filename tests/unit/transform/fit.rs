use super::*;

fn fit(mode: FitMode, w: Option<u32>, h: Option<u32>) -> Fit {
    Fit::new(mode, w, h, None).unwrap()
}

const SOURCES: [(u32, u32); 6] = [(800, 400), (400, 800), (100, 100), (30, 20), (1, 500), (640, 480)];
const BOXES: [(u32, u32); 5] = [(400, 300), (50, 50), (1000, 200), (10, 700), (640, 480)];

#[test]
fn mode_names_parse() {
    assert_eq!(FitMode::parse("contain").unwrap(), FitMode::Contain);
    assert_eq!(FitMode::parse("scaledown").unwrap(), FitMode::ScaleDown);
    assert_eq!(FitMode::parse("pad").unwrap(), FitMode::Pad);
    assert!(matches!(
        FitMode::parse("stretch"),
        Err(KritiError::InvalidFitMode(_))
    ));
}

#[test]
fn no_dimensions_is_an_error() {
    assert!(matches!(
        Fit::new(FitMode::Contain, None, None, None),
        Err(KritiError::FitRequiresDimensions)
    ));
}

#[test]
fn box_filling_modes_hit_the_exact_box() {
    for mode in [FitMode::Cover, FitMode::Squeeze, FitMode::Pad, FitMode::Crop] {
        for src in SOURCES {
            for (bw, bh) in BOXES {
                let f = fit(mode, Some(bw), Some(bh));
                assert_eq!(f.bounds(src.0, src.1), (bw, bh), "{mode:?} {src:?}");
            }
        }
    }
}

#[test]
fn scaledown_never_enlarges() {
    for src in SOURCES {
        for (bw, bh) in BOXES {
            for (w, h) in [(Some(bw), Some(bh)), (Some(bw), None), (None, Some(bh))] {
                let (ow, oh) = fit(FitMode::ScaleDown, w, h).bounds(src.0, src.1);
                assert!(ow <= src.0 && oh <= src.1, "{src:?} -> {ow}x{oh}");
                if let Some(w) = w {
                    assert!(ow <= w.max(1) || ow == 1);
                }
            }
        }
    }
}

#[test]
fn contain_preserves_aspect_within_a_pixel() {
    for src in SOURCES {
        for (bw, bh) in BOXES {
            let (ow, oh) = fit(FitMode::Contain, Some(bw), Some(bh)).bounds(src.0, src.1);
            assert!(ow <= bw && oh <= bh);
            assert!(ow == bw || oh == bh);
            let expected_h = f64::from(ow) * f64::from(src.1) / f64::from(src.0);
            let expected_w = f64::from(oh) * f64::from(src.0) / f64::from(src.1);
            assert!(
                (expected_h - f64::from(oh)).abs() <= 1.0
                    || (expected_w - f64::from(ow)).abs() <= 1.0,
                "{src:?} in {bw}x{bh} -> {ow}x{oh}"
            );
        }
    }
}

#[test]
fn contain_with_single_dimension_scales_proportionally() {
    assert_eq!(fit(FitMode::Contain, Some(400), None).bounds(800, 400), (400, 200));
    assert_eq!(fit(FitMode::Contain, None, Some(100)).bounds(800, 400), (200, 100));
    assert_eq!(fit(FitMode::Contain, Some(1600), None).bounds(800, 400), (1600, 800));
}

#[test]
fn cover_needs_both_and_backfills_from_source() {
    assert_eq!(fit(FitMode::Cover, Some(100), None).bounds(800, 400), (100, 400));
}

#[test]
fn crop_small_source_keeps_pixels_at_origin() {
    let img = RgbaImage::from_pixel(4, 3, image::Rgba([9, 9, 9, 255]));
    let out = fit(FitMode::Crop, Some(10), Some(10)).apply(&img);
    assert_eq!(out.dimensions(), (10, 10));
    assert_eq!(out.get_pixel(0, 0).0, [9, 9, 9, 255]);
    assert_eq!(out.get_pixel(3, 2).0, [9, 9, 9, 255]);
    assert_eq!(out.get_pixel(4, 2).0, [0, 0, 0, 0]);
}

#[test]
fn cover_crops_the_center() {
    // Left third red, middle blue, right third red; cover into a square keeps the middle.
    let img = RgbaImage::from_fn(90, 30, |x, _| {
        if (30..60).contains(&x) {
            image::Rgba([0, 0, 255, 255])
        } else {
            image::Rgba([255, 0, 0, 255])
        }
    });
    let out = fit(FitMode::Cover, Some(30), Some(30)).apply(&img);
    assert_eq!(out.dimensions(), (30, 30));
    let center = out.get_pixel(15, 15).0;
    assert!(center[2] > 200 && center[0] < 50, "{center:?}");
}

#[test]
fn pad_centers_on_background() {
    let img = RgbaImage::from_pixel(800, 400, image::Rgba([255, 0, 0, 255]));
    let blue = Rgba8::new(0, 0, 255, 255);
    let out = Fit::new(FitMode::Pad, Some(400), Some(300), Some(blue))
        .unwrap()
        .apply(&img);
    assert_eq!(out.dimensions(), (400, 300));
    // Scaled source is 400x200 at y = 50.
    assert_eq!(out.get_pixel(200, 10).0, [0, 0, 255, 255]);
    assert_eq!(out.get_pixel(200, 290).0, [0, 0, 255, 255]);
    assert_eq!(out.get_pixel(200, 150).0, [255, 0, 0, 255]);
}

#[test]
fn pad_defaults_to_white() {
    let img = RgbaImage::from_pixel(10, 20, image::Rgba([0, 0, 0, 255]));
    let out = fit(FitMode::Pad, Some(20), Some(20)).apply(&img);
    assert_eq!(out.get_pixel(0, 10).0, [255, 255, 255, 255]);
    assert_eq!(out.get_pixel(10, 10).0, [0, 0, 0, 255]);
}

#[test]
fn squeeze_ignores_aspect() {
    let img = RgbaImage::from_pixel(10, 10, image::Rgba([1, 2, 3, 255]));
    assert_eq!(
        fit(FitMode::Squeeze, Some(30), Some(7)).apply(&img).dimensions(),
        (30, 7)
    );
}

#[test]
fn apply_matches_bounds() {
    let img = RgbaImage::from_pixel(37, 23, image::Rgba([5, 6, 7, 255]));
    for mode in [
        FitMode::Contain,
        FitMode::Cover,
        FitMode::Squeeze,
        FitMode::ScaleDown,
        FitMode::Crop,
        FitMode::Pad,
    ] {
        let f = fit(mode, Some(20), Some(30));
        assert_eq!(f.apply(&img).dimensions(), f.bounds(37, 23), "{mode:?}");
    }
}

#[test]
fn cover_and_crop_never_scale_past_the_box() {
    for mode in [FitMode::Cover, FitMode::Crop] {
        let layout = fit(mode, Some(1000), Some(1000)).layout(8192, 1);
        assert_eq!(layout.region, (4095, 0, 1, 1), "{mode:?}");
        assert_eq!(layout.scaled, (1000, 1000), "{mode:?}");

        let tall = fit(mode, Some(10000), Some(10000)).layout(1, 8192);
        assert_eq!(tall.region, (0, 4095, 1, 1), "{mode:?}");
        assert_eq!(tall.scaled, (10000, 10000), "{mode:?}");
    }
}

#[test]
fn extreme_aspect_source_keeps_its_center() {
    let img = RgbaImage::from_fn(8192, 1, |x, _| {
        if x == 4095 {
            image::Rgba([0, 255, 0, 255])
        } else {
            image::Rgba([255, 0, 0, 255])
        }
    });
    for mode in [FitMode::Cover, FitMode::Crop] {
        let out = fit(mode, Some(1000), Some(1000)).apply(&img);
        assert_eq!(out.dimensions(), (1000, 1000), "{mode:?}");
        assert_eq!(out.get_pixel(500, 500).0, [0, 255, 0, 255], "{mode:?}");
    }
}
