use callmap::report::{FontConfig, FontSource};
use std::io::Write;

#[test]
fn unset_slots_resolve_to_builtins() {
    let resolved = FontConfig::default().resolve();
    assert_eq!(resolved.regular, FontSource::BuiltIn("sans"));
    assert_eq!(resolved.bold, FontSource::BuiltIn("sans-bold"));
    assert_eq!(resolved.italic, FontSource::BuiltIn("sans-italic"));
    assert_eq!(resolved.bold_italic, FontSource::BuiltIn("sans-bold-italic"));
}

#[test]
fn missing_font_file_falls_back_silently() {
    let config = FontConfig {
        regular: Some("/definitely/not/here.ttf".into()),
        ..FontConfig::default()
    };
    let resolved = config.resolve();
    assert_eq!(resolved.regular, FontSource::BuiltIn("sans"));
}

#[test]
fn existing_font_file_is_used() {
    let mut file = tempfile::Builder::new().suffix(".ttf").tempfile().unwrap();
    file.write_all(b"not really a font").unwrap();

    let config = FontConfig {
        bold: Some(file.path().to_path_buf()),
        ..FontConfig::default()
    };
    let resolved = config.resolve();
    assert_eq!(resolved.bold, FontSource::File(file.path().to_path_buf()));
    // Other slots are unaffected.
    assert_eq!(resolved.regular, FontSource::BuiltIn("sans"));
}

#[test]
fn regular_name_reports_file_stem() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("NotoSans-Regular.ttf");
    std::fs::write(&path, b"stub").unwrap();

    let config = FontConfig {
        regular: Some(path),
        ..FontConfig::default()
    };
    assert_eq!(config.resolve().regular_name(), "NotoSans-Regular");

    assert_eq!(FontConfig::default().resolve().regular_name(), "sans");
}
