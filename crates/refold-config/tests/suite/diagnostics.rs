use pretty_assertions::assert_eq;
use refold_config::{ConfigValidationError, ConfigWarning, RefoldConfig};
use tempfile::NamedTempFile;

#[test]
fn reports_unknown_keys_with_full_paths() {
    let text = r#"
typo = 1

[accessors]
get_prefixs = ["Get"]

[formatting]
indent_widht = 2
"#;

    let (config, diagnostics) =
        RefoldConfig::load_from_str_with_diagnostics(text).expect("config should parse");

    assert_eq!(
        diagnostics.unknown_keys,
        vec!["accessors.get_prefixs", "formatting.indent_widht", "typo"]
    );
    assert_eq!(config, RefoldConfig::default());
    assert!(diagnostics.is_ok());
}

#[test]
fn clean_config_has_no_diagnostics() {
    let (_config, diagnostics) =
        RefoldConfig::load_from_str_with_diagnostics("[formatting]\nindent_width = 2\n")
            .expect("config should parse");
    assert!(diagnostics.is_empty(), "{diagnostics:?}");
}

#[test]
fn validation_rejects_empty_prefix_lists_and_zero_indent() {
    let text = r#"
[accessors]
get_prefixes = []
set_prefixes = ["Set", ""]

[formatting]
indent_width = 0
"#;

    let (config, diagnostics) =
        RefoldConfig::load_from_str_with_diagnostics(text).expect("config should parse");

    let expected = vec![
        ConfigValidationError::EmptyPrefixList {
            key: "get_prefixes",
        },
        ConfigValidationError::EmptyPrefix {
            key: "set_prefixes",
            index: 1,
        },
        ConfigValidationError::ZeroIndentWidth,
    ];
    assert_eq!(diagnostics.errors, expected);
    assert!(!diagnostics.is_ok());
    assert_eq!(config.validate(), expected);
}

#[test]
fn zero_indent_width_is_fine_with_tabs() {
    let mut config = RefoldConfig::default();
    config.formatting.indent_width = 0;
    config.formatting.use_tabs = true;
    assert_eq!(config.validate(), Vec::new());
}

#[test]
fn invalid_logging_level_is_a_warning() {
    let (_config, diagnostics) =
        RefoldConfig::load_from_str_with_diagnostics("[logging]\nlevel = \"foo=loud\"\n")
            .expect("config should parse");

    assert_eq!(
        diagnostics.warnings,
        vec![ConfigWarning::LoggingLevelInvalid {
            value: "foo=loud".to_string()
        }]
    );
    assert!(diagnostics.is_ok());
}

#[test]
fn diagnostics_from_path() {
    let file = NamedTempFile::new().expect("temp file");
    std::fs::write(file.path(), "[logging]\nlvl = \"debug\"\n").expect("write config");

    let (_config, diagnostics) =
        RefoldConfig::load_from_path_with_diagnostics(file.path()).expect("config loads");
    assert_eq!(diagnostics.unknown_keys, vec!["logging.lvl"]);
}
