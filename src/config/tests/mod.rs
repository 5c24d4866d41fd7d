#![allow(clippy::unwrap_used, clippy::panic)]

use std::{fs, path::Path};

use tempfile::TempDir;

use super::*;

#[test]
fn empty_file_yields_defaults() {
    let config = Config::from_toml("", Path::new("config.toml")).unwrap();

    assert_eq!(config, Config::default());
    assert_eq!(config.general.log_level, LogLevel::Info);
    assert_eq!(config.general.log_format, LogFormat::Pretty);
    assert_eq!(config.gpio.consumer, DEFAULT_CLIENT_NAME);
    assert_eq!(config.gpio.sysfs_root, Path::new("/sys/class/gpio"));
    assert_eq!(config.pulse.client_name, DEFAULT_CLIENT_NAME);
    assert_eq!(config.pulse.server, None);
}

#[test]
fn partial_sections_keep_other_defaults() {
    let config = Config::from_toml(
        r#"
        [general]
        log_level = "debug"

        [pulse]
        server = "unix:/run/pulse/native"
        "#,
        Path::new("config.toml"),
    )
    .unwrap();

    assert_eq!(config.general.log_level, LogLevel::Debug);
    assert_eq!(config.general.log_format, LogFormat::Pretty);
    assert_eq!(
        config.pulse.server.as_deref(),
        Some("unix:/run/pulse/native")
    );
    assert_eq!(config.pulse.client_name, DEFAULT_CLIENT_NAME);
    assert_eq!(config.gpio, GpioConfig::default());
}

#[test]
fn unknown_log_level_is_rejected() {
    let text = "[general]\nlog_level = \"loud\"\n";

    let result = Config::from_toml(text, Path::new("broken.toml"));

    match result {
        Err(ConfigError::TomlParse { path, .. }) => assert_eq!(path, Path::new("broken.toml")),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn load_reads_file_from_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        r#"
[gpio]
consumer = "amp-relay"
sysfs_root = "/tmp/gpio"

[general]
log_format = "json"
"#,
    )
    .unwrap();

    let config = Config::load(&path).unwrap();

    assert_eq!(config.gpio.consumer, "amp-relay");
    assert_eq!(config.gpio.sysfs_root, Path::new("/tmp/gpio"));
    assert_eq!(config.general.log_format, LogFormat::Json);
}

#[test]
fn missing_explicit_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.toml");

    let result = Config::load_or_default(Some(&path));

    assert!(matches!(result, Err(ConfigError::Io { .. })));
}

#[test]
fn log_format_names_are_case_insensitive() {
    assert_eq!(LogFormat::from_name("JSON"), Some(LogFormat::Json));
    assert_eq!(LogFormat::from_name("compact"), Some(LogFormat::Compact));
    assert_eq!(LogFormat::from_name("Pretty"), Some(LogFormat::Pretty));
    assert_eq!(LogFormat::from_name("xml"), None);
}

#[test]
fn log_level_displays_as_filter_directive() {
    assert_eq!(LogLevel::Warn.to_string(), "warn");
    assert_eq!(LogLevel::Trace.to_string(), "trace");
}
