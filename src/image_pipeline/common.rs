//! Common utilities module
//!
//! Shared error type used across the image pipeline.

pub mod error;

pub use error::{ConversionError, Result};
