//! Crate-level error types.

use std::fmt;

/// Errors produced while loading or validating camera options.
#[derive(Debug)]
pub enum OrbitError {
    /// Reading an options file failed.
    Io(std::io::Error),
    /// TOML options parsing failure.
    OptionsParse(String),
    /// Projection parameters that would make `perspective` degenerate.
    InvalidProjection(String),
}

impl fmt::Display for OrbitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => write!(f, "options parse error: {msg}"),
            Self::InvalidProjection(msg) => {
                write!(f, "invalid projection: {msg}")
            }
        }
    }
}

impl std::error::Error for OrbitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for OrbitError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for OrbitError {
    fn from(e: toml::de::Error) -> Self {
        Self::OptionsParse(e.to_string())
    }
}
