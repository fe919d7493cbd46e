//! Errors surfaced by the runner's outer API.

use std::fmt;
use std::io;

#[derive(Debug, Clone, PartialEq)]
pub enum RunnerError {
    /// A runner is already live in this session.
    AlreadyLaunched,
    /// `NAME=VALUE` override without the `=`.
    MalformedSetting(String),
    UnknownSetting(String),
    InvalidSettingValue { setting: String, value: String },
}

impl fmt::Display for RunnerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyLaunched => write!(f, "a runner instance is already launched"),
            Self::MalformedSetting(raw) => {
                write!(f, "malformed setting '{raw}', expected NAME=VALUE")
            }
            Self::UnknownSetting(name) => write!(f, "unknown setting '{name}'"),
            Self::InvalidSettingValue { setting, value } => {
                write!(f, "invalid value '{value}' for setting {setting}")
            }
        }
    }
}

impl std::error::Error for RunnerError {}

impl From<RunnerError> for io::Error {
    fn from(err: RunnerError) -> Self {
        io::Error::new(io::ErrorKind::InvalidInput, err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_the_setting() {
        let err = RunnerError::InvalidSettingValue {
            setting: "GRAVITY".to_string(),
            value: "heavy".to_string(),
        };
        assert_eq!(err.to_string(), "invalid value 'heavy' for setting GRAVITY");
    }

    #[test]
    fn test_converts_to_invalid_input_io_error() {
        let err: io::Error = RunnerError::AlreadyLaunched.into();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }
}
