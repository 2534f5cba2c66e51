//! Configuration error types.

use owo_colors::OwoColorize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Why the configuration could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("invalid TOML in config file")]
    Toml(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Validation(String),

    // Displayed in full; a `source()` would repeat every line.
    #[error("{0}")]
    Diagnostics(ConfigDiagnostics),
}

/// One problem, located by its dotted key path.
#[derive(Debug, Clone)]
pub struct ConfigDiagnostic {
    /// e.g. `paths.styles.src`
    pub field: String,
    pub message: String,
    pub hint: Option<String>,
}

impl fmt::Display for ConfigDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  {} {}", self.field.cyan().bold(), self.message)?;
        if let Some(hint) = &self.hint {
            write!(f, "\n    {} {}", "hint:".yellow(), hint)?;
        }
        Ok(())
    }
}

/// Validation problems, gathered across all sections before failing.
#[derive(Debug, Default)]
pub struct ConfigDiagnostics {
    errors: Vec<ConfigDiagnostic>,
}

impl ConfigDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.push(field.into(), message.into(), None);
    }

    pub fn error_with_hint(
        &mut self,
        field: impl Into<String>,
        message: impl Into<String>,
        hint: impl Into<String>,
    ) {
        self.push(field.into(), message.into(), Some(hint.into()));
    }

    fn push(&mut self, field: String, message: String, hint: Option<String>) {
        self.errors.push(ConfigDiagnostic {
            field,
            message,
            hint,
        });
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// `Ok` when nothing was reported.
    pub fn into_result(self) -> Result<(), ConfigError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Diagnostics(self))
        }
    }
}

impl fmt::Display for ConfigDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let heading = format!(
            "{} in configuration:",
            crate::utils::plural_count(self.errors.len(), "problem")
        );
        write!(f, "{}", heading.red().bold())?;
        for error in &self.errors {
            write!(f, "\n{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ConfigDiagnostics {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_config_error_display() {
        let io_err = ConfigError::Io(
            PathBuf::from("sitepipe.toml"),
            Error::new(ErrorKind::NotFound, "file not found"),
        );
        let display = format!("{io_err}");
        assert!(display.contains("failed to read"));
        assert!(display.contains("sitepipe.toml"));

        let validation_err = ConfigError::Validation("root is not a directory".to_string());
        assert!(format!("{validation_err}").contains("root is not a directory"));
    }

    #[test]
    fn test_diagnostics_collect_all() {
        let mut diag = ConfigDiagnostics::new();
        diag.error("paths.styles.src", "glob list is empty");
        diag.error_with_hint("images.jpeg_quality", "out of range", "use 1..=100");

        assert_eq!(diag.len(), 2);
        let display = diag.to_string();
        assert!(display.contains("2 problems"));
        assert!(display.contains("paths.styles.src"));
        assert!(display.contains("use 1..=100"));
        assert!(matches!(diag.into_result(), Err(ConfigError::Diagnostics(_))));
    }

    #[test]
    fn test_empty_diagnostics_ok() {
        assert!(ConfigDiagnostics::new().into_result().is_ok());
    }
}
