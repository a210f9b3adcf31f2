use pagraph_core::{Preferences, PreferencesError};
use std::io::Write;

#[test]
fn load_reads_camel_case_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{ "hidePulseaudioApps": false, "volumeStep": 0.1, "maxVolume": 1.0 }}"#
    )
    .unwrap();

    let preferences = Preferences::load(file.path()).unwrap();
    assert!(!preferences.hide_pulseaudio_apps);
    assert_eq!(preferences.volume_step, 0.1);
    assert_eq!(preferences.max_volume, 1.0);
    assert!(preferences.hide_disconnected_modules);
}

#[test]
fn load_reports_missing_file_with_its_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.json");

    let err = Preferences::load(&path).unwrap_err();
    match &err {
        PreferencesError::Io { path: reported, .. } => assert_eq!(reported, &path),
        other => panic!("expected io error, got {other:?}"),
    }
    assert!(err.to_string().contains("missing.json"));
}

#[test]
fn load_rejects_malformed_json() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{{ hideMonitors: yes }}").unwrap();

    let err = Preferences::load(file.path()).unwrap_err();
    assert!(matches!(err, PreferencesError::Parse(_)));
}

#[test]
fn defaults_survive_a_serialize_cycle() {
    let json = serde_json::to_string(&Preferences::default()).unwrap();
    assert!(json.contains("\"lockChannelsTogether\":true"));
    assert_eq!(
        Preferences::from_json_str(&json).unwrap(),
        Preferences::default()
    );
}
