use super::*;

#[test]
fn missing_file_yields_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let settings = load_settings(&dir.path().join("settings.toml"));
    assert_eq!(settings.test_file_name, "test.spr");
    assert_eq!(settings.max_recent, DEFAULT_MAX_RECENT);
    assert!(settings.recent().is_empty());
}

#[test]
fn malformed_file_yields_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("settings.toml");
    fs::write(&path, "max_recent = [").expect("seed");
    assert_eq!(load_settings(&path).recent_files, "");
}

#[test]
fn save_and_reload_keeps_recent_list() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("nested").join("settings.toml");

    let mut settings = EditorSettings::default();
    let mut recent = settings.recent();
    recent.insert("/sprites/walker.spr");
    recent.insert("/sprites/runner.spr");
    settings.set_recent(&recent);
    settings.save(&path).expect("save");

    let reloaded = load_settings(&path);
    assert_eq!(
        reloaded.recent_files,
        "/sprites/walker.spr?/sprites/runner.spr"
    );
    assert_eq!(
        reloaded.recent().entries(),
        ["/sprites/walker.spr", "/sprites/runner.spr"]
    );
}

#[test]
fn partial_file_fills_remaining_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("settings.toml");
    fs::write(&path, "test_file_name = \"preview.spr\"\n").expect("seed");

    let settings = load_settings(&path);
    assert_eq!(settings.test_file_name, "preview.spr");
    assert_eq!(settings.max_recent, DEFAULT_MAX_RECENT);
}
