//! Unified error handling for hexpad
//!
//! The conversion core is total and never produces errors. Everything around
//! it (configuration, terminal, clipboard, line editor) reports through
//! `HexpadError`.

use thiserror::Error;

// ============================================================================
// HexpadError - Main error type
// ============================================================================

/// Main error type for the hexpad tool and its support libraries
#[derive(Debug, Error)]
pub enum HexpadError {
    // ======================================
    // Configuration Errors
    // ======================================
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid configuration: {field}: {reason}")]
    InvalidConfig { field: String, reason: String },

    #[error("Configuration file not found: {0}")]
    ConfigNotFound(String),

    // ======================================
    // Terminal & I/O Errors
    // ======================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Terminal error: {0}")]
    Terminal(String),

    #[error("Readline error: {0}")]
    Readline(String),

    // ======================================
    // Clipboard Errors
    // ======================================
    #[error("Clipboard unavailable: {0}")]
    ClipboardUnavailable(String),

    #[error("Clipboard write failed: {0}")]
    ClipboardWrite(String),

    // ======================================
    // Logging Errors
    // ======================================
    #[error("Logging setup failed: {0}")]
    Logging(String),

    // ======================================
    // Generic Errors
    // ======================================
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using HexpadError
pub type Result<T> = std::result::Result<T, HexpadError>;

/// Error category - used for classification and log level selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Terminal,
    Clipboard,
    Internal,
}

impl HexpadError {
    /// Create an invalid-field configuration error
    pub fn invalid_config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create a clipboard write error
    pub fn clipboard(msg: impl Into<String>) -> Self {
        Self::ClipboardWrite(msg.into())
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Configuration(_) | Self::InvalidConfig { .. } | Self::ConfigNotFound(_) => {
                ErrorCategory::Configuration
            },
            Self::Io(_) | Self::Terminal(_) | Self::Readline(_) => ErrorCategory::Terminal,
            Self::ClipboardUnavailable(_) | Self::ClipboardWrite(_) => ErrorCategory::Clipboard,
            Self::Logging(_) | Self::Internal(_) => ErrorCategory::Internal,
        }
    }

    /// Stable error code (for logs and `--json` style output)
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "CONFIG_ERROR",
            Self::InvalidConfig { .. } => "CONFIG_INVALID",
            Self::ConfigNotFound(_) => "CONFIG_NOT_FOUND",
            Self::Io(_) => "IO_ERROR",
            Self::Terminal(_) => "TERMINAL_ERROR",
            Self::Readline(_) => "READLINE_ERROR",
            Self::ClipboardUnavailable(_) => "CLIPBOARD_UNAVAILABLE",
            Self::ClipboardWrite(_) => "CLIPBOARD_WRITE_FAILED",
            Self::Logging(_) => "LOGGING_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Clipboard problems are expected on some terminals and stay at WARN
    pub fn log_level(&self) -> tracing::Level {
        match self.category() {
            ErrorCategory::Clipboard => tracing::Level::WARN,
            ErrorCategory::Configuration | ErrorCategory::Terminal | ErrorCategory::Internal => {
                tracing::Level::ERROR
            },
        }
    }
}

impl From<figment::Error> for HexpadError {
    fn from(err: figment::Error) -> Self {
        if err.path.is_empty() {
            Self::Configuration(err.to_string())
        } else {
            Self::InvalidConfig {
                field: err.path.join("."),
                reason: err.kind.to_string(),
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = HexpadError::invalid_config("tick_rate_ms", "must be greater than 0");
        assert_eq!(
            err.to_string(),
            "Invalid configuration: tick_rate_ms: must be greater than 0"
        );

        let err = HexpadError::Readline("terminal closed".to_string());
        assert_eq!(err.to_string(), "Readline error: terminal closed");
    }

    #[test]
    fn test_categories_and_codes() {
        let err = HexpadError::clipboard("terminal refused");
        assert_eq!(err.category(), ErrorCategory::Clipboard);
        assert_eq!(err.error_code(), "CLIPBOARD_WRITE_FAILED");
        assert_eq!(err.log_level(), tracing::Level::WARN);

        let err = HexpadError::ClipboardUnavailable("disabled".to_string());
        assert_eq!(err.log_level(), tracing::Level::WARN);

        let err = HexpadError::from(std::io::Error::other("broken pipe"));
        assert_eq!(err.category(), ErrorCategory::Terminal);
        assert_eq!(err.log_level(), tracing::Level::ERROR);

        let err = HexpadError::Terminal("Failed to show cursor".to_string());
        assert_eq!(err.error_code(), "TERMINAL_ERROR");
        assert_eq!(err.log_level(), tracing::Level::ERROR);
    }
}
