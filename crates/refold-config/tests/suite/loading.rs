use pretty_assertions::assert_eq;
use refold_config::{ConfigError, FormattingConfig, LoggingConfig, RefoldConfig};
use tempfile::tempdir;

#[test]
fn empty_text_yields_defaults() {
    let config = RefoldConfig::load_from_str("").expect("empty config parses");
    assert_eq!(config, RefoldConfig::default());
    assert_eq!(config.accessors.get_prefixes, vec!["Get"]);
    assert_eq!(config.accessors.set_prefixes, vec!["Set"]);
    assert_eq!(config.formatting.indent_width, 4);
    assert!(!config.formatting.use_tabs);
    assert_eq!(config.logging.level, "info");
    assert!(!config.logging.json);
}

#[test]
fn partial_tables_keep_remaining_defaults() {
    let config = RefoldConfig::load_from_str(
        r#"
[accessors]
get_prefixes = ["Get", "Fetch"]

[formatting]
use_tabs = true
"#,
    )
    .expect("config parses");

    assert_eq!(config.accessors.get_prefixes, vec!["Get", "Fetch"]);
    assert_eq!(config.accessors.set_prefixes, vec!["Set"]);
    assert_eq!(config.formatting.indent_width, 4);
    assert_eq!(config.formatting.indent_unit(), "\t");
}

#[test]
fn indent_unit_uses_configured_width() {
    let formatting = FormattingConfig {
        indent_width: 2,
        use_tabs: false,
    };
    assert_eq!(formatting.indent_unit(), "  ");
}

#[test]
fn get_prefix_must_leave_a_name() {
    let accessors = RefoldConfig::default().accessors;
    assert_eq!(accessors.strip_get_prefix("GetFoo"), Some(("Get", "Foo")));
    assert_eq!(accessors.strip_get_prefix("Get"), None);
    assert_eq!(accessors.strip_get_prefix("Foo"), None);
    assert_eq!(accessors.setter_names("Foo"), vec!["SetFoo"]);
}

#[test]
fn malformed_toml_is_an_error() {
    let err = RefoldConfig::load_from_str("[formatting\nindent_width = 4").unwrap_err();
    assert!(matches!(err, ConfigError::Toml(_)), "{err:?}");
}

#[test]
fn wrong_value_type_is_an_error() {
    let err = RefoldConfig::load_from_str("[formatting]\nindent_width = \"wide\"\n").unwrap_err();
    assert!(matches!(err, ConfigError::Toml(_)), "{err:?}");
}

#[test]
fn load_from_path_reads_file() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("refold.toml");
    std::fs::write(&path, "[logging]\nlevel = \"debug\"\njson = true\n").expect("write config");

    let config = RefoldConfig::load_from_path(&path).expect("config loads");
    assert_eq!(
        config.logging,
        LoggingConfig {
            level: "debug".to_string(),
            json: true,
        }
    );
}

#[test]
fn load_from_missing_path_is_io_error() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("missing.toml");

    let err = RefoldConfig::load_from_path(&path).unwrap_err();
    match err {
        ConfigError::Io { path: reported, .. } => {
            assert_eq!(reported, path.display().to_string());
        }
        other => panic!("expected io error, got {other:?}"),
    }
}

#[test]
fn init_tracing_from_loaded_config_is_idempotent() {
    let config = RefoldConfig::load_from_str("[logging]\nlevel = \"debug\"\njson = true\n")
        .expect("valid config");
    refold_config::init_tracing(&config.logging);
    refold_config::init_tracing(&LoggingConfig::default());
    tracing::debug!(target: "refold.config", "tracing installed");
}
