//! Error types for focusdeck-core.
//!
//! Widget commands never fail: an action that is not allowed in the current
//! state is a no-op and returns `None`. Errors only come from the
//! configuration layer.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid settings: {0}")]
    Validation(#[from] ValidationError),

    /// Round-tripping the config through `serde_json` for dot-path access failed.
    #[error("config encoding: {0}")]
    Json(#[from] serde_json::Error),
}

/// Problems reading, writing or editing the config file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config directory could not be created.
    #[error("cannot use config directory {0}")]
    DirUnavailable(String),

    #[error("cannot read {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    #[error("cannot write {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// A `set` value that does not parse as the key's type.
    #[error("bad value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("unknown config key: {0}")]
    UnknownKey(String),
}

/// Settings that parse but that the widgets cannot run with.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("'{field}' must be greater than zero")]
    ZeroDuration { field: String },

    #[error("'{field}': {message}")]
    InvalidValue { field: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_wraps_into_core_error() {
        let err: CoreError = ValidationError::ZeroDuration {
            field: "pomodoro.work_secs".into(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "invalid settings: 'pomodoro.work_secs' must be greater than zero"
        );
    }

    #[test]
    fn unknown_key_names_the_key() {
        let err: CoreError = ConfigError::UnknownKey("ui.theme".into()).into();
        assert_eq!(err.to_string(), "config: unknown config key: ui.theme");
    }
}
