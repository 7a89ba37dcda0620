// tests/config_validation.rs

use std::io::Write;

use tempfile::NamedTempFile;

use file_monitor::channel::ChannelKind;
use file_monitor::config::{default_config_path, load_and_validate, load_and_validate_for, validate_config};
use file_monitor::errors::MonitorError;
use file_monitor::types::{Operation, TargetOs, WebhookProvider};
use file_monitor_test_utils::builders::ConfigBuilder;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{contents}").unwrap();
    file
}

#[test]
fn full_config_with_original_key_spelling_loads() {
    let file = write_config(
        r#"
logging:
  file: logs/monitor.log
  maxSize: 10
  maxBackups: 5
  maxAge: 30
  compress: true
monitor:
  directories:
    - /data/in
    - /data/out
  ignore:
    files: ["*.log", "~$*"]
    extensions: [".tmp", ".swp"]
    directories: ["*/node_modules/*"]
  events: [create, write, remove]
  targetOs: posix
webhook:
  enabled: true
  provider: serverchan
  sendkey: SCT123
  template: ""
email:
  enabled: false
  smtpHost: smtp.example.com
  smtpPort: 465
  username: bot
  password: secret
  from: bot@example.com
  to: [ops@example.com]
"#,
    );

    let cfg = load_and_validate(file.path()).unwrap();

    assert_eq!(cfg.directories(), ["/data/in", "/data/out"]);
    assert_eq!(cfg.ignore().extensions, [".tmp", ".swp"]);
    assert_eq!(
        cfg.events(),
        [Operation::Create, Operation::Write, Operation::Remove]
    );
    assert_eq!(cfg.target_os(), TargetOs::Posix);
    assert_eq!(cfg.email().smtp_host, "smtp.example.com");
    assert_eq!(cfg.email().smtp_port, 465);
    assert_eq!(cfg.webhook().timeout_secs, 10);
    assert_eq!(cfg.logging().file.as_deref(), Some("logs/monitor.log"));
    assert_eq!(cfg.logging().max_size, 10);
    assert_eq!(cfg.logging().max_backups, 5);
    assert_eq!(cfg.logging().max_age, 30);
    assert!(cfg.logging().compress);
    assert_eq!(
        ChannelKind::from_config(&cfg),
        ChannelKind::Webhook(WebhookProvider::ServerChan)
    );
}

#[test]
fn both_channels_enabled_is_a_startup_error() {
    let file = write_config(
        r#"
monitor:
  directories: [/data]
webhook:
  enabled: true
  provider: serverchan
  sendkey: SCT123
email:
  enabled: true
  smtpHost: smtp.example.com
  smtpPort: 587
  to: [ops@example.com]
"#,
    );

    match load_and_validate(file.path()) {
        Err(MonitorError::ChannelConflict) => {}
        other => panic!("Expected ChannelConflict, got: {:?}", other),
    }
}

#[test]
fn empty_directory_list_names_the_missing_directories() {
    let file = write_config(
        r#"
monitor:
  directories: []
"#,
    );

    let err = load_and_validate(file.path()).unwrap_err();
    assert!(matches!(err, MonitorError::NoDirectories));
    assert!(err.to_string().contains("no directories to monitor"));
}

#[test]
fn missing_monitor_section_is_rejected_too() {
    let file = write_config("webhook:\n  enabled: false\n");
    assert!(matches!(
        load_and_validate(file.path()),
        Err(MonitorError::NoDirectories)
    ));
}

#[test]
fn unknown_provider_is_rejected_when_webhook_enabled() {
    let raw = ConfigBuilder::new()
        .watch("/data")
        .webhook("bark", "key")
        .raw();

    match validate_config(raw, None) {
        Err(MonitorError::UnsupportedProvider(p)) => assert_eq!(p, "bark"),
        other => panic!("Expected UnsupportedProvider, got: {:?}", other),
    }
}

#[test]
fn unknown_provider_is_fine_while_webhook_disabled() {
    let mut raw = ConfigBuilder::new().watch("/data").raw();
    raw.webhook.provider = "bark".to_string();

    let cfg = validate_config(raw, None).unwrap();
    assert_eq!(ChannelKind::from_config(&cfg), ChannelKind::None);
}

#[test]
fn webhook_without_sendkey_is_a_config_error() {
    let raw = ConfigBuilder::new()
        .watch("/data")
        .webhook("serverchan", "  ")
        .raw();

    match validate_config(raw, None) {
        Err(MonitorError::ConfigError(msg)) => assert!(msg.contains("sendkey")),
        other => panic!("Expected ConfigError, got: {:?}", other),
    }
}

#[test]
fn email_needs_at_least_one_recipient() {
    let raw = ConfigBuilder::new()
        .watch("/data")
        .email("smtp.example.com", 587, "bot@example.com", &[])
        .raw();

    match validate_config(raw, None) {
        Err(MonitorError::ConfigError(msg)) => assert!(msg.contains("email.to")),
        other => panic!("Expected ConfigError, got: {:?}", other),
    }
}

#[test]
fn unknown_event_kind_is_a_config_error() {
    let raw = ConfigBuilder::new().watch("/data").event("modify").raw();

    match validate_config(raw, None) {
        Err(MonitorError::ConfigError(msg)) => {
            assert!(msg.contains("monitor.events"));
            assert!(msg.contains("modify"));
        }
        other => panic!("Expected ConfigError, got: {:?}", other),
    }
}

#[test]
fn directories_are_normalized_for_the_target() {
    let file = write_config(
        r#"
monitor:
  directories: ["/data/in", "C:\\data\\out"]
  targetOs: posix
"#,
    );

    let cfg = load_and_validate(file.path()).unwrap();
    assert_eq!(cfg.directories(), ["/data/in", "/data/out"]);

    let cfg = load_and_validate_for(file.path(), Some(TargetOs::Windows)).unwrap();
    assert_eq!(cfg.target_os(), TargetOs::Windows);
    assert_eq!(cfg.directories(), ["C:\\data\\in", "C:\\data\\out"]);
}

#[test]
fn invalid_target_os_is_a_config_error() {
    let file = write_config(
        r#"
monitor:
  directories: [/data]
  targetOs: beos
"#,
    );
    assert!(matches!(
        load_and_validate(file.path()),
        Err(MonitorError::ConfigError(_))
    ));
}

#[test]
fn malformed_yaml_returns_yaml_error() {
    let file = write_config("monitor: [this is: not a map");
    assert!(matches!(
        load_and_validate(file.path()),
        Err(MonitorError::YamlError(_))
    ));
}

#[test]
fn missing_file_returns_io_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        load_and_validate(dir.path().join("config.yaml")),
        Err(MonitorError::IoError(_))
    ));
}

#[test]
fn default_path_prefers_config_yaml_then_yml() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(default_config_path(dir.path()), dir.path().join("config.yaml"));

    std::fs::write(dir.path().join("config.yml"), "monitor: {}\n").unwrap();
    assert_eq!(default_config_path(dir.path()), dir.path().join("config.yml"));

    std::fs::write(dir.path().join("config.yaml"), "monitor: {}\n").unwrap();
    assert_eq!(default_config_path(dir.path()), dir.path().join("config.yaml"));
}

#[test]
fn missing_target_os_defaults_to_the_host_convention() {
    let cfg = ConfigBuilder::new().watch("/data").raw();
    let cfg = validate_config(cfg, None).unwrap();
    assert_eq!(cfg.target_os(), TargetOs::host());
}
