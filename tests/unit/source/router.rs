use std::sync::Mutex;

use super::*;

/// Records which paths it saw and serves a 1x1 image.
#[derive(Default)]
struct Recording {
    seen: Mutex<Vec<String>>,
}

impl ImageSource for Recording {
    fn fetch(&self, path: &str, _cancel: &CancelToken) -> KritiResult<SourceImage> {
        self.seen.lock().unwrap().push(path.to_string());
        Ok(SourceImage {
            raster: RgbaImage::new(1, 1),
            format: None,
        })
    }

    fn store(&self, path: &str, _raster: &RgbaImage) -> KritiResult<()> {
        self.seen.lock().unwrap().push(format!("store:{path}"));
        Ok(())
    }
}

#[test]
fn routes_by_scheme() {
    let local = Arc::new(Recording::default());
    let remote = Arc::new(Recording::default());
    let router = SourceRouter::new(local.clone()).with_remote(remote.clone());

    router.fetch("a/b.png", &CancelToken::new()).unwrap();
    router
        .fetch("https://example.com/c.png", &CancelToken::new())
        .unwrap();
    router.store("up.png", &RgbaImage::new(1, 1)).unwrap();

    assert_eq!(*local.seen.lock().unwrap(), ["a/b.png", "store:up.png"]);
    assert_eq!(*remote.seen.lock().unwrap(), ["https://example.com/c.png"]);
}

#[test]
fn remote_without_backend_is_rejected() {
    let router = SourceRouter::new(Arc::new(Recording::default()));
    assert!(matches!(
        router.fetch("http://example.com/x.png", &CancelToken::new()),
        Err(KritiError::InvalidPath(_))
    ));
}
