use super::*;

fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "kriti_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn checker(w: u32, h: u32) -> RgbaImage {
    RgbaImage::from_fn(w, h, |x, y| {
        if (x + y) % 2 == 0 {
            image::Rgba([255, 0, 0, 255])
        } else {
            image::Rgba([0, 0, 255, 128])
        }
    })
}

#[test]
fn store_then_fetch_png_keeps_pixels_and_format() {
    let root = temp_dir("local_png");
    let src = LocalImageSource::new(&root, SourceLimits::default());
    let img = checker(6, 4);

    src.store("nested/dir/a.png", &img).unwrap();
    assert!(root.join("nested/dir/a.png").is_file());

    let got = src.fetch("nested/dir/a.png", &CancelToken::new()).unwrap();
    assert_eq!(got.format, Some(ImageFormat::Png));
    assert_eq!(got.raster, img);

    std::fs::remove_dir_all(&root).ok();
}

#[test]
fn store_jpeg_by_extension() {
    let root = temp_dir("local_jpg");
    let src = LocalImageSource::new(&root, SourceLimits::default());
    src.store("photo.JPG", &checker(8, 8)).unwrap();
    let got = src.fetch("photo.JPG", &CancelToken::new()).unwrap();
    assert_eq!(got.format, Some(ImageFormat::Jpeg));
    assert_eq!(got.raster.dimensions(), (8, 8));
    std::fs::remove_dir_all(&root).ok();
}

#[test]
fn store_rejects_unknown_extension_and_escapes() {
    let root = temp_dir("local_bad_store");
    let src = LocalImageSource::new(&root, SourceLimits::default());
    assert!(matches!(
        src.store("a.gif", &checker(2, 2)),
        Err(KritiError::InvalidFormat(_))
    ));
    assert!(matches!(
        src.store("../a.png", &checker(2, 2)),
        Err(KritiError::InvalidPath(_))
    ));
    std::fs::remove_dir_all(&root).ok();
}

#[test]
fn oversize_upload_is_removed() {
    let root = temp_dir("local_oversize_store");
    let limits = SourceLimits {
        max_dimension: 8192,
        max_file_size_bytes: 10,
    };
    let src = LocalImageSource::new(&root, limits);
    assert!(matches!(
        src.store("big.png", &checker(16, 16)),
        Err(KritiError::OversizeSource(_))
    ));
    assert!(!root.join("big.png").exists());
    std::fs::remove_dir_all(&root).ok();
}

#[test]
fn fetch_enforces_limits() {
    let root = temp_dir("local_limits");
    LocalImageSource::new(&root, SourceLimits::default())
        .store("wide.png", &checker(40, 10))
        .unwrap();

    let small_dims = LocalImageSource::new(
        &root,
        SourceLimits {
            max_dimension: 20,
            max_file_size_bytes: 1 << 20,
        },
    );
    assert!(matches!(
        small_dims.fetch("wide.png", &CancelToken::new()),
        Err(KritiError::OversizeSource(_))
    ));

    let small_bytes = LocalImageSource::new(
        &root,
        SourceLimits {
            max_dimension: 8192,
            max_file_size_bytes: 8,
        },
    );
    assert!(matches!(
        small_bytes.fetch("wide.png", &CancelToken::new()),
        Err(KritiError::OversizeSource(_))
    ));
    std::fs::remove_dir_all(&root).ok();
}

#[test]
fn missing_or_garbage_is_source_not_found() {
    let root = temp_dir("local_missing");
    std::fs::write(root.join("junk.png"), b"not an image").unwrap();
    let src = LocalImageSource::new(&root, SourceLimits::default());
    for p in ["nope.png", "junk.png"] {
        let err = src.fetch(p, &CancelToken::new()).unwrap_err();
        assert!(matches!(err, KritiError::SourceNotFound(_)), "{p}: {err}");
    }
    std::fs::remove_dir_all(&root).ok();
}

#[test]
fn cancelled_token_short_circuits_fetch() {
    let src = LocalImageSource::new(std::env::temp_dir(), SourceLimits::default());
    let cancel = CancelToken::new();
    cancel.cancel();
    assert!(matches!(
        src.fetch("anything.png", &cancel),
        Err(KritiError::Cancelled)
    ));
}
