//! Error handling for domain-finder

use thiserror::Error;

/// Main error type for domain-finder
///
/// Individual lookups never surface these; a failed lookup is always folded
/// into an `UNKNOWN` result. Errors here are for contract violations
/// (bad configuration, unreadable input files) and CLI plumbing.
#[derive(Error, Debug, Clone)]
pub enum DomainFinderError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resolver error: {message}")]
    Resolver { message: String },

    #[error("Parse error: {message}")]
    Parse {
        message: String,
        content: Option<String>,
    },

    #[error("IO error: {message}")]
    Io {
        message: String,
        path: Option<String>,
    },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainFinderError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a resolver error
    pub fn resolver(message: impl Into<String>) -> Self {
        Self::Resolver {
            message: message.into(),
        }
    }

    /// Create a parse error
    pub fn parse(message: impl Into<String>, content: Option<String>) -> Self {
        Self::Parse {
            message: message.into(),
            content,
        }
    }

    /// Create an IO error
    pub fn io(message: impl Into<String>, path: Option<String>) -> Self {
        Self::Io {
            message: message.into(),
            path,
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Get user-friendly error message with suggestions
    pub fn user_message(&self) -> String {
        match self {
            Self::Config { message } => {
                format!("❌ Configuration problem: {}\n💡 Check your config file, .env or flags", message)
            }
            Self::Validation { message } => {
                format!("❌ Invalid domain: {}\n💡 Use letters, digits and hyphens, e.g. bako.com", message)
            }
            Self::Resolver { message } => {
                format!("❌ Resolver error: {}\n💡 Check your network and DNS settings", message)
            }
            Self::Parse { message, .. } => {
                format!("❌ Parse error: {}\n💡 Check the file contents", message)
            }
            Self::Io { message, path } => {
                let path_info = path.as_deref().map(|p| format!(" {}", p)).unwrap_or_default();
                format!("❌ Could not read{}: {}\n💡 Check that the config or domain list exists", path_info, message)
            }
            Self::Internal { message } => {
                format!("❌ Internal error: {}\n💡 Re-run with --verbose and report the output", message)
            }
        }
    }
}

impl From<serde_json::Error> for DomainFinderError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse(err.to_string(), None)
    }
}

impl From<std::io::Error> for DomainFinderError {
    fn from(err: std::io::Error) -> Self {
        Self::io(err.to_string(), None)
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, DomainFinderError>;

/// Helper macros for common error patterns
#[macro_export]
macro_rules! config_error {
    ($msg:expr) => {
        $crate::error::DomainFinderError::config($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::error::DomainFinderError::config(format!($fmt, $($arg)*))
    };
}

#[macro_export]
macro_rules! validation_error {
    ($msg:expr) => {
        $crate::error::DomainFinderError::validation($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::error::DomainFinderError::validation(format!($fmt, $($arg)*))
    };
}
