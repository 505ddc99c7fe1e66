use pharmadesk_core::config::{ConfigError, ConfigProperties, ConfigValue, DeskConfig};
use pharmadesk_core::{DefaultSecretResolver, LogFormat, LogSettings};
use serial_test::serial;

#[test]
fn empty_config_has_no_keys() {
    let config = DeskConfig::empty();
    assert!(matches!(
        config.get::<String>("pharmadesk.api.url"),
        Err(ConfigError::NotFound(_))
    ));
}

#[test]
fn yaml_is_flattened() {
    let yaml = r#"
pharmadesk:
  api:
    url: "http://localhost:8000"
    timeout: 15
  log:
    format: json
"#;
    let config = DeskConfig::from_yaml_str(yaml, "test").unwrap();
    assert_eq!(
        config.get::<String>("pharmadesk.api.url").unwrap(),
        "http://localhost:8000"
    );
    assert_eq!(config.get::<u64>("pharmadesk.api.timeout").unwrap(), 15);
    assert_eq!(config.get::<String>("pharmadesk.api.timeout").unwrap(), "15");
}

#[test]
fn lists_and_options() {
    let yaml = r#"
tags:
  - a
  - b
nothing: ~
"#;
    let config = DeskConfig::from_yaml_str(yaml, "test").unwrap();
    let tags: Vec<String> = config.get("tags").unwrap();
    assert_eq!(tags, vec!["a", "b"]);
    assert!(config.get::<Option<String>>("nothing").unwrap().is_none());
}

#[test]
fn type_mismatch_is_reported() {
    let mut config = DeskConfig::empty();
    config.set("flag", ConfigValue::String("maybe".into()));
    assert!(matches!(
        config.get::<bool>("flag"),
        Err(ConfigError::TypeMismatch { .. })
    ));
    assert_eq!(config.get_or("absent", 7i64), 7);
}

#[test]
fn log_settings_defaults_and_overrides() {
    let defaults = DeskConfig::empty().with_typed::<LogSettings>().unwrap();
    assert_eq!(defaults.format, LogFormat::Pretty);
    assert_eq!(defaults.filter, "info");

    let yaml = "pharmadesk:\n  log:\n    format: json\n    filter: debug\n";
    let config = DeskConfig::from_yaml_str(yaml, "test")
        .unwrap()
        .with_typed::<LogSettings>()
        .unwrap();
    assert_eq!(config.format, LogFormat::Json);
    assert_eq!(config.filter, "debug");
}

#[test]
fn unknown_log_format_is_rejected() {
    let yaml = "pharmadesk:\n  log:\n    format: xml\n";
    let err = DeskConfig::from_yaml_str(yaml, "test")
        .unwrap()
        .with_typed::<LogSettings>()
        .unwrap_err();
    assert!(matches!(err, ConfigError::TypeMismatch { .. }));
}

#[test]
fn missing_keys_lists_required_properties_only() {
    assert!(LogSettings::missing_keys(&DeskConfig::empty()).is_empty());
}

#[test]
#[serial]
fn files_profile_and_env_overlay() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("application.yaml"),
        "pharmadesk:\n  api:\n    url: http://base\n    timeout: 10\n",
    )
    .unwrap();
    std::fs::write(
        dir.path().join("application-staging.yaml"),
        "pharmadesk:\n  api:\n    url: http://staging\n",
    )
    .unwrap();
    unsafe { std::env::set_var("PHARMADESK_LOG_FILTER", "warn") };

    let config = DeskConfig::load_from(dir.path(), "staging", &DefaultSecretResolver).unwrap();
    assert_eq!(config.profile(), "staging");
    assert_eq!(config.get::<String>("pharmadesk.api.url").unwrap(), "http://staging");
    assert_eq!(config.get::<u64>("pharmadesk.api.timeout").unwrap(), 10);
    assert_eq!(config.get::<String>("pharmadesk.log.filter").unwrap(), "warn");

    unsafe { std::env::remove_var("PHARMADESK_LOG_FILTER") };
}

#[test]
#[serial]
fn placeholders_resolve_from_environment() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("application.yaml"),
        "pharmadesk:\n  api:\n    token: \"${env:PD_TEST_TOKEN}\"\n",
    )
    .unwrap();
    unsafe { std::env::set_var("PD_TEST_TOKEN", "abc123") };

    let config = DeskConfig::load_from(dir.path(), "dev", &DefaultSecretResolver).unwrap();
    assert_eq!(config.get::<String>("pharmadesk.api.token").unwrap(), "abc123");

    unsafe { std::env::remove_var("PD_TEST_TOKEN") };
}

#[test]
#[serial]
fn profile_env_var_wins_over_argument() {
    let dir = tempfile::tempdir().unwrap();
    unsafe { std::env::set_var("PHARMADESK_PROFILE", "prod") };
    let config = DeskConfig::load_from(dir.path(), "dev", &DefaultSecretResolver).unwrap();
    assert_eq!(config.profile(), "prod");
    unsafe { std::env::remove_var("PHARMADESK_PROFILE") };
}
