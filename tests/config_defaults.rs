use cite_report::config::Config;
use cite_report::{OutputFormat, ParserKind, SerializerKind};

#[test]
fn test_default_config_values() {
    let config = Config::default();

    assert_eq!(config.general.output_format, OutputFormat::Markdown);
    assert!(!config.general.treat_skipped_as_failure);
    assert!(!config.general.exit_with_error_on_failure);
    assert_eq!(config.dispatch.default_parser, ParserKind::Flat);
    assert_eq!(config.dispatch.default_serializer, SerializerKind::Summary);
    assert!(config.dispatch.suites.is_empty());
}

#[test]
fn test_empty_file_yields_defaults() {
    let config = Config::parse("").expect("Failed to parse empty config");
    assert_eq!(config, Config::default());
}

#[test]
fn test_load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".citereportrc.toml");
    std::fs::write(&path, "[general]\nexit_with_error_on_failure = true\n").unwrap();

    let config = Config::load_from_file(&path).expect("Failed to load config");

    assert!(config.general.exit_with_error_on_failure);
    assert_eq!(config.general.output_format, OutputFormat::Markdown);
}

#[test]
fn test_invalid_file_is_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".citereportrc");
    std::fs::write(&path, "[general\noutput_format = ").unwrap();

    assert!(Config::load_from_file(&path).is_none());
}
