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

#[test]
fn reads_raw_text_under_root() {
    let root = temp_dir("tpl_read");
    std::fs::create_dir_all(root.join("cards")).unwrap();
    std::fs::write(root.join("cards/hello.json"), r#"{"text":"{{name}}"}"#).unwrap();

    let src = LocalTemplateSource::new(&root);
    assert_eq!(
        src.fetch("cards/hello.json", &CancelToken::new()).unwrap(),
        r#"{"text":"{{name}}"}"#
    );
    std::fs::remove_dir_all(&root).ok();
}

#[test]
fn missing_escaping_and_binary_templates_fail() {
    let root = temp_dir("tpl_bad");
    std::fs::write(root.join("bin.json"), [0xff, 0xfe, 0x00]).unwrap();
    let src = LocalTemplateSource::new(&root);
    let cancel = CancelToken::new();

    assert!(matches!(
        src.fetch("nope.json", &cancel),
        Err(KritiError::SourceNotFound(_))
    ));
    assert!(matches!(
        src.fetch("../etc/passwd", &cancel),
        Err(KritiError::InvalidPath(_))
    ));
    assert!(matches!(
        src.fetch("bin.json", &cancel),
        Err(KritiError::InvalidTemplate(_))
    ));
    std::fs::remove_dir_all(&root).ok();
}
