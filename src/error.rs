use thiserror::Error;

/// Errors produced by the rendering and encoding core.
#[derive(Debug, Error)]
pub enum IconError {
    #[error("invalid image dimensions {width}x{height}: both sides must be between 1 and 2^31-1")]
    InvalidDimensions { width: u32, height: u32 },

    #[error(
        "unknown design: {0}. Available designs: {available}",
        available = crate::design::PRESET_NAMES.join(", ")
    )]
    UnknownDesign(String),

    #[error("invalid color {value:?}: {reason}")]
    InvalidColor { value: String, reason: String },

    #[error("invalid compression level {0}: must be between 0 and {max}", max = crate::png::MAX_LEVEL)]
    InvalidLevel(u8),

    #[error("output path {0:?} must be relative and stay below the output directory")]
    UnsafePath(std::path::PathBuf),

    #[error("invalid manifest: {0}")]
    Manifest(#[from] serde_json::Error),

    #[error("malformed PNG: {0}")]
    MalformedPng(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = IconError> = std::result::Result<T, E>;
