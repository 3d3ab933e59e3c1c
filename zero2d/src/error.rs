//! Error types for zero2d

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Zero2dError {
    #[error("Initialization error: {0}")]
    Init(String),

    #[error("Audio device error: {0}")]
    AudioDevice(String),

    #[error("Audio format error: {0}")]
    AudioFormat(String),

    #[error("Audio loading error: {0}")]
    AudioLoading(String),

    #[error("Image loading error: {0}")]
    ImageLoading(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Zero2dError>;
