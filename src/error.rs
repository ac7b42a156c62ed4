//! Error kinds for the settings, hotkey and submission paths
//!
//! None of these are fatal: every caller recovers locally and logs.

use std::path::PathBuf;
use thiserror::Error;

/// Failures reading or writing the settings file
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to read settings from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings from {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize settings: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to write settings to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failures binding the global toggle key
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HotkeyError {
    /// The string does not name a key combination we know how to bind
    #[error("unknown key combination '{0}'")]
    UnknownKey(String),

    /// The OS refused the registration (already claimed, unsupported, ...)
    #[error("failed to register '{key}': {reason}")]
    Register { key: String, reason: String },

    #[error("failed to unregister '{key}': {reason}")]
    Unregister { key: String, reason: String },
}

/// Reasons a settings panel submission is rejected
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("missing field '{0}'")]
    MissingField(&'static str),

    #[error("color must not be empty")]
    EmptyColor,

    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: u32,
        max: u32,
    },

    #[error("unknown crosshair style '{0}'")]
    UnknownStyle(String),
}
