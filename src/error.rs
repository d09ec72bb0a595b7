//! Errors for the fallible edges of the crate: settings files, hotkey text
//! and global hook installation. Ticking never fails.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ZoomError {
    #[error("failed to access settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid hotkey `{0}`")]
    InvalidHotkey(String),

    #[error("unknown mouse button `{0}`")]
    UnknownMouseButton(String),

    #[error("global input hook failed: {0}")]
    Hook(String),

    #[error("failed to wait for shutdown signal: {0}")]
    Signal(#[source] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ZoomError>;
