use super::*;

#[test]
fn prettify_indents_and_keeps_key_order() {
    let pretty = prettify(r#"{"b":1,"a":{"c":[1,2]}}"#).expect("prettify");
    assert_eq!(
        pretty,
        "{\n  \"b\": 1,\n  \"a\": {\n    \"c\": [\n      1,\n      2\n    ]\n  }\n}"
    );
}

#[test]
fn prettify_rejects_malformed_json() {
    let err = prettify("{\"a\":").expect_err("malformed");
    assert_eq!(err.code(), shared::ErrorCode::Parse);
}

#[test]
fn missing_sprite_is_file_not_found() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = read_sprite(&dir.path().join("absent.spr")).expect_err("missing");
    assert!(matches!(err, SpriteError::FileNotFound { .. }));
}

#[test]
fn write_then_read_appends_newline() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("walker.spr");
    write_sprite(&path, "{}").expect("write");
    assert_eq!(read_sprite(&path).expect("read"), "{}\n");
}

#[test]
fn prettify_file_rewrites_in_place() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("walker.spr");
    fs::write(&path, r#"{"SPRITE_META_DATA":{"version":"1"}}"#).expect("seed");

    prettify_file(&path).expect("prettify");

    let text = fs::read_to_string(&path).expect("read");
    assert!(text.starts_with("{\n  \"SPRITE_META_DATA\": {\n"));
}

#[test]
fn safe_file_name_handles_both_separators() {
    assert_eq!(safe_file_name("C:\\sprites\\walker.spr"), "walker.spr");
    assert_eq!(safe_file_name("/tmp/runner.spi"), "runner.spi");
    assert_eq!(safe_file_name("plain.spr"), "plain.spr");
}

#[test]
fn copies_only_files_missing_from_target() {
    let source_dir = tempfile::tempdir().expect("source");
    let target_dir = tempfile::tempdir().expect("target");
    let present = source_dir.path().join("present.png");
    let missing = source_dir.path().join("missing.png");
    fs::write(&present, b"new").expect("present");
    fs::write(&missing, b"img").expect("missing");
    fs::write(target_dir.path().join("present.png"), b"old").expect("existing");

    let copied = copy_missing_files(&[present, missing], target_dir.path()).expect("copy");

    assert_eq!(copied, [target_dir.path().join("missing.png")]);
    assert_eq!(
        fs::read(target_dir.path().join("present.png")).expect("read"),
        b"old"
    );
}
