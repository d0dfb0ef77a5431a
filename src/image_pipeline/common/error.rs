use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("Root directory not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Invalid output suffix: {0:?}")]
    InvalidSuffix(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Image has {0} channel(s), not an RGB normal map")]
    MissingChannel(usize),

    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("Failed to decode image: {0}")]
    DecodeError(String),

    #[error("Failed to encode image: {0}")]
    EncodeError(String),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ConversionError {
    /// Errors that mean "nothing to do for this file" rather than a broken file.
    pub fn is_skip(&self) -> bool {
        matches!(
            self,
            ConversionError::UnsupportedFormat(_) | ConversionError::MissingChannel(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ConversionError>;
