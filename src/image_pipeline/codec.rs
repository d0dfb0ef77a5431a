//! Texture decoding and encoding module
//!
//! This module turns file bytes into an [`ImageBuffer`] and back, keeping the
//! source container, bit depth and channel layout.

mod exr_codec;
mod format;
mod image_codec;
mod reader;
mod standard_codec;
mod tiff_writer;
mod writer;
pub mod types;

pub use exr_codec::ExrCodec;
pub use format::TextureFormat;
pub use image_codec::ImageCodec;
pub use reader::TextureReader;
pub use standard_codec::StandardCodec;
pub use tiff_writer::StandardTiffWriter;
pub use types::{EncodeOptions, ImageBuffer, PixelData, SampleKind, TiffCompression};
pub use writer::TextureWriter;
