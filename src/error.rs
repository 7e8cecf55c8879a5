//! Error types for the editor.

use thiserror::Error;

/// Everything that can go wrong outside the (infallible) filters.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("pixel buffer does not match image shape: {0}")]
    Shape(#[from] ndarray::ShapeError),

    #[error("unsupported channel count {0}, expected 3 (RGB) or 4 (RGBA)")]
    UnsupportedChannels(usize),

    #[error("invalid threshold {0:?}: expected a number")]
    InvalidThreshold(String),

    #[error("no such command: {0:?}")]
    UnknownCommand(String),

    #[error("file open cancelled")]
    LoadCancelled,

    #[error("unknown edge detector {0:?}, expected one of: classic, better, classic-legacy, better-legacy")]
    InvalidEdgeDetector(String),

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, EditorError>;
