use saintluc_cli::commands::{
    form_from_values, resolve_output, score, show_config, update_config,
};
use saintluc_cli::config::{
    OutputFormat, SaintlucConfig, config_path_in, delete_config_in, has_config_in,
    load_config_in, load_or_default_in, save_config_in,
};
use saintluc_core::Field;
use saintluc_scoring::variant::Variant;

#[test]
fn defaults_when_nothing_saved() {
    let dir = tempfile::tempdir().unwrap();
    assert!(!has_config_in(dir.path()));
    let config = load_or_default_in(dir.path()).unwrap();
    assert_eq!(config.variant, Variant::En);
    assert_eq!(config.format, OutputFormat::Text);
    assert!(!has_config_in(dir.path()));
}

#[test]
fn save_and_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let config = SaintlucConfig {
        variant: Variant::Fr,
        format: OutputFormat::Json,
        ..SaintlucConfig::default()
    };
    save_config_in(dir.path(), &config).unwrap();

    let loaded = load_config_in(dir.path()).unwrap();
    assert_eq!(loaded, config);
    assert!(!dir.path().join("config.json.tmp").exists());
}

#[cfg(unix)]
#[test]
fn saved_config_is_private() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    save_config_in(dir.path(), &SaintlucConfig::default()).unwrap();
    let mode = std::fs::metadata(config_path_in(dir.path()))
        .unwrap()
        .permissions()
        .mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[test]
fn loads_unversioned_file_with_defaults() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        config_path_in(dir.path()),
        r#"{ "created_at": "2024-03-01T10:00:00Z" }"#,
    )
    .unwrap();

    let config = load_config_in(dir.path()).unwrap();
    assert_eq!(config.config_version, 1);
    assert_eq!(config.variant, Variant::En);
    assert_eq!(config.format, OutputFormat::Text);
}

#[test]
fn corrupt_file_does_not_block_reset_or_scoring() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(config_path_in(dir.path()), "{ not json").unwrap();
    assert!(load_config_in(dir.path()).is_err());

    let output = resolve_output(dir.path(), Some(Variant::En), Some(OutputFormat::Json));
    let form = form_from_values([
        (Field::Age, Some("60")),
        (Field::Gender, Some("1")),
        (Field::SurgicalIndication, Some("1")),
        (Field::AsaScore, Some("2")),
        (Field::TreatedHta, Some("0")),
        (Field::PreopEmoglobin, Some("13")),
    ]);
    let mut buf = Vec::new();
    let result = score(&form, false, output, &mut buf).unwrap();
    assert_eq!(result.score, -5.525);
    let json: serde_json::Value = serde_json::from_slice(&buf).unwrap();
    assert_eq!(json["recommend_blood_test"], false);

    delete_config_in(dir.path()).unwrap();
    assert!(!has_config_in(dir.path()));
}

#[test]
fn unreadable_config_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        config_path_in(dir.path()),
        r#"{ "config_version": 7, "variant": "fr", "created_at": "2024-03-01T10:00:00Z" }"#,
    )
    .unwrap();

    let output = resolve_output(dir.path(), None, Some(OutputFormat::Json));
    assert_eq!(output.variant, Variant::En);
    assert_eq!(output.format, OutputFormat::Json);
}

#[test]
fn saved_preferences_fill_missing_flags() {
    let dir = tempfile::tempdir().unwrap();
    update_config(dir.path(), |c| c.variant = Variant::Fr).unwrap();

    let output = resolve_output(dir.path(), None, None);
    assert_eq!(output.variant, Variant::Fr);
    assert_eq!(output.format, OutputFormat::Text);

    let output = resolve_output(dir.path(), Some(Variant::En), None);
    assert_eq!(output.variant, Variant::En);
}

#[test]
fn update_then_delete() {
    let dir = tempfile::tempdir().unwrap();
    let updated = update_config(dir.path(), |c| c.variant = Variant::Fr).unwrap();
    assert_eq!(updated.variant, Variant::Fr);
    assert_eq!(load_config_in(dir.path()).unwrap().variant, Variant::Fr);

    let updated = update_config(dir.path(), |c| c.format = OutputFormat::Json).unwrap();
    assert_eq!(updated.variant, Variant::Fr);

    delete_config_in(dir.path()).unwrap();
    assert!(!has_config_in(dir.path()));
    delete_config_in(dir.path()).unwrap();
}

#[test]
fn show_config_reports_path_and_values() {
    let dir = tempfile::tempdir().unwrap();
    update_config(dir.path(), |c| c.variant = Variant::Fr).unwrap();

    let mut buf = Vec::new();
    show_config(dir.path(), OutputFormat::Json, &mut buf).unwrap();
    let json: serde_json::Value = serde_json::from_slice(&buf).unwrap();
    assert_eq!(json["saved"], true);
    assert_eq!(json["config"]["variant"], "fr");
}
