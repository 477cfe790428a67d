//! Error types for the attitude viewer.

use thiserror::Error;

/// Reasons a received line is not a usable reading.
///
/// These are recovered locally: the line is dropped and the previous
/// orientation is kept.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReadingError {
    /// The line did not contain exactly three comma-separated fields.
    #[error("expected 3 comma-separated fields, found {found}")]
    FieldCount {
        /// Number of fields present.
        found: usize,
    },

    /// A field is not a decimal number.
    #[error("field {field} is not numeric: {value:?}")]
    NotNumeric {
        /// Zero-based field position.
        field: usize,
        /// Offending text.
        value: String,
    },

    /// A field parsed to NaN or infinity.
    #[error("field {field} is not finite")]
    NonFinite {
        /// Zero-based field position.
        field: usize,
    },
}

/// Errors raised by an angle source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The device could not be opened at startup.
    #[error("angle source {port} unavailable: {reason}")]
    Unavailable {
        /// Port or device name.
        port: String,
        /// Underlying failure description.
        reason: String,
    },

    /// A read from an already open source failed.
    #[error("angle source I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SourceError {
    /// Creates an unavailable-source error.
    #[must_use]
    pub fn unavailable(port: impl Into<String>, reason: impl ToString) -> Self {
        Self::Unavailable {
            port: port.into(),
            reason: reason.to_string(),
        }
    }
}

/// Configuration loading and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A field holds a value the viewer cannot run with.
    #[error("invalid config value for {field}: {reason}")]
    Invalid {
        /// Field name.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// The config file could not be read.
    #[error("failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    /// The config file is not valid TOML for the expected schema.
    #[error("failed to parse config file: {0}")]
    Parse(String),
}

impl ConfigError {
    /// Creates an invalid-value error.
    #[must_use]
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Failures presenting a finished frame.
#[derive(Debug, Error)]
pub enum SurfaceError {
    /// Writing the frame to its output failed.
    #[error("surface I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_field_count_display() {
        let err = ReadingError::FieldCount { found: 4 };
        let msg = format!("{err}");
        assert!(msg.contains("3"));
        assert!(msg.contains("4"));
    }

    #[test]
    fn error_not_numeric_display() {
        let err = ReadingError::NotNumeric {
            field: 1,
            value: "data".to_string(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("field 1"));
        assert!(msg.contains("data"));
    }

    #[test]
    fn error_unavailable() {
        let err = SourceError::unavailable("/dev/ttyUSB0", "No such file or directory");
        let msg = format!("{err}");
        assert!(msg.contains("/dev/ttyUSB0"));
        assert!(msg.contains("No such file"));
    }

    #[test]
    fn error_config_invalid() {
        let err = ConfigError::invalid("target_fps", "must be positive");
        let msg = format!("{err}");
        assert!(msg.contains("target_fps"));
        assert!(msg.contains("must be positive"));
    }
}
