//! Configuration errors
//!
//! Gameplay itself never fails; only loading settings can.

use std::fmt;

/// Failure while loading or validating [`crate::Settings`]
#[derive(Debug)]
pub enum SettingsError {
    /// Settings file could not be read
    Io(String),
    /// Settings JSON was malformed
    Parse(String),
    /// A value was out of range
    Invalid { field: &'static str, reason: String },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(msg) => write!(f, "I/O error: {}", msg),
            SettingsError::Parse(msg) => write!(f, "parse error: {}", msg),
            SettingsError::Invalid { field, reason } => {
                write!(f, "invalid setting `{}`: {}", field, reason)
            }
        }
    }
}

impl std::error::Error for SettingsError {}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Parse(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = SettingsError::Invalid {
            field: "tick_period_ms",
            reason: "must be positive".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid setting `tick_period_ms`: must be positive"
        );
    }

    #[test]
    fn test_from_serde_error() {
        let parse = serde_json::from_str::<u32>("nope").unwrap_err();
        assert!(matches!(SettingsError::from(parse), SettingsError::Parse(_)));
    }
}
