use stream_overlay::settings::Settings;

#[test]
fn missing_file_yields_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("settings.json");
    let settings = Settings::load(path.to_str().unwrap()).expect("load");
    assert_eq!(settings, Settings::default());
    assert!((settings.opacity - 0.9).abs() < f32::EPSILON);
    assert!(!settings.pause_when_hidden);
}

#[test]
fn partial_files_fall_back_per_field() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("settings.json");
    std::fs::write(&path, r#"{ "opacity": 0.5, "pause_when_hidden": true }"#).expect("write");

    let settings = Settings::load(path.to_str().unwrap()).expect("load");
    assert!((settings.opacity - 0.5).abs() < f32::EPSILON);
    assert!(settings.pause_when_hidden);
    assert_eq!(settings.cpu_columns, Settings::default().cpu_columns);
    assert_eq!(settings.active_color, Settings::default().active_color);
}

#[test]
fn save_and_load_round_trip() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("settings.json");

    let mut settings = Settings::default();
    settings.opacity = 0.75;
    settings.cpu_columns = 50;
    settings.active_color = [0x00, 0xFF, 0x00];
    settings.save(path.to_str().unwrap()).expect("save");

    let loaded = Settings::load(path.to_str().unwrap()).expect("load");
    assert_eq!(loaded, settings);
}

#[test]
fn malformed_files_are_an_error_not_a_silent_reset() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("settings.json");
    std::fs::write(&path, "{ not json").expect("write");

    assert!(Settings::load(path.to_str().unwrap()).is_err());
}
