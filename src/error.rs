//! Custom error types for the window framework
//!
//! [`FrameError`] is the fatal channel: construction and one-time setup.
//! Steady-state OS failures use [`OsError`](crate::platform::OsError) and
//! are logged rather than propagated.

use thiserror::Error;

use crate::platform::OsError;

/// Main error type for window construction and setup
#[derive(Error, Debug)]
pub enum FrameError {
    #[error("{function} failed (error {code:#010x})")]
    Win32 { function: &'static str, code: u32 },

    #[error("Invalid window settings: {0}")]
    InvalidSettings(String),

    #[error("Graphics error: {0}")]
    Graphics(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

impl From<OsError> for FrameError {
    fn from(e: OsError) -> Self {
        FrameError::Win32 {
            function: e.function,
            code: e.code,
        }
    }
}

/// Result type alias for framework operations
pub type FrameResult<T> = Result<T, FrameError>;
