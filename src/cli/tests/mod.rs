#![allow(clippy::unwrap_used, clippy::panic)]

use std::path::Path;

use super::*;

#[test]
fn sysfs_arguments() {
    let cli = Cli::parse_args(["pasuspend-gpio", "sysfs", "17", "analog-out"]).unwrap();

    assert_eq!(
        cli.backend,
        Backend::Sysfs {
            gpio: 17,
            sink: "analog-out".to_string(),
            server: None,
        }
    );
    assert!(!cli.quiet);
    assert!(cli.config.is_none());
}

#[test]
fn chardev_arguments_with_server() {
    let cli = Cli::parse_args([
        "pasuspend-gpio",
        "cdev-v2",
        "/dev/gpiochip0",
        "4",
        "analog-out",
        "tcp:amp.local",
    ])
    .unwrap();

    match &cli.backend {
        Backend::CdevV2 { chip, gpio, .. } => {
            assert_eq!(chip, Path::new("/dev/gpiochip0"));
            assert_eq!(*gpio, 4);
        }
        other => panic!("unexpected backend: {other:?}"),
    }
    assert_eq!(cli.backend.sink(), "analog-out");
    assert_eq!(cli.backend.server(), Some("tcp:amp.local"));
}

#[test]
fn global_options_precede_backend() {
    let cli = Cli::parse_args([
        "pasuspend-gpio",
        "--config",
        "/etc/pasuspend.toml",
        "-q",
        "cdev-v1",
        "/dev/gpiochip1",
        "2",
        "hdmi",
    ])
    .unwrap();

    assert!(cli.quiet);
    assert_eq!(
        cli.config.as_deref(),
        Some(Path::new("/etc/pasuspend.toml"))
    );
    assert!(matches!(cli.backend, Backend::CdevV1 { gpio: 2, .. }));
}

#[test]
fn help_exits_successfully() {
    let exit = Cli::parse_args(["pasuspend-gpio", "--help"]).unwrap_err();

    assert!(exit.success);
    assert!(exit.message.contains("Usage"));
}

#[test]
fn no_arguments_prints_usage() {
    let exit = Cli::parse_args(["pasuspend-gpio"]).unwrap_err();

    assert!(exit.success);
    assert!(exit.message.contains("Usage"));
}

#[test]
fn missing_sink_prints_usage() {
    let exit = Cli::parse_args(["pasuspend-gpio", "sysfs", "17"]).unwrap_err();

    assert!(exit.success);
}

#[test]
fn non_numeric_gpio_fails() {
    let exit = Cli::parse_args(["pasuspend-gpio", "sysfs", "seventeen", "analog-out"]).unwrap_err();

    assert!(!exit.success);
}
