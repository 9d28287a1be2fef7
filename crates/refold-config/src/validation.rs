use crate::diagnostics::{ConfigValidationError, ConfigWarning};
use crate::{LoggingConfig, RefoldConfig};

#[derive(Debug, Default)]
pub(crate) struct ValidationDiagnostics {
    pub(crate) warnings: Vec<ConfigWarning>,
    pub(crate) errors: Vec<ConfigValidationError>,
}

impl RefoldConfig {
    /// Check the settings the refactorings rely on.
    ///
    /// Every problem is reported, not just the first one.
    #[must_use]
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        self.validate_all().errors
    }

    pub(crate) fn validate_all(&self) -> ValidationDiagnostics {
        let mut out = ValidationDiagnostics::default();
        validate_prefixes("get_prefixes", &self.accessors.get_prefixes, &mut out);
        validate_prefixes("set_prefixes", &self.accessors.set_prefixes, &mut out);
        if !self.formatting.use_tabs && self.formatting.indent_width == 0 {
            out.errors.push(ConfigValidationError::ZeroIndentWidth);
        }
        validate_logging(&self.logging, &mut out);
        out
    }
}

fn validate_prefixes(key: &'static str, prefixes: &[String], out: &mut ValidationDiagnostics) {
    if prefixes.is_empty() {
        out.errors
            .push(ConfigValidationError::EmptyPrefixList { key });
        return;
    }
    for (index, prefix) in prefixes.iter().enumerate() {
        if prefix.trim().is_empty() {
            out.errors
                .push(ConfigValidationError::EmptyPrefix { key, index });
        }
    }
}

fn validate_logging(logging: &LoggingConfig, out: &mut ValidationDiagnostics) {
    let normalized = LoggingConfig::normalize_level_directives(&logging.level);
    if !logging.level.trim().is_empty()
        && tracing_subscriber::EnvFilter::try_new(normalized).is_err()
    {
        out.warnings.push(ConfigWarning::LoggingLevelInvalid {
            value: logging.level.clone(),
        });
    }
}
