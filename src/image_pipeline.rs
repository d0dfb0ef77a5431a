//! Image processing pipeline module
//!
//! This module converts normal maps between the OpenGL and DirectX
//! conventions, with separate modules for discovery, decoding/encoding,
//! channel inversion, output naming and orchestration.

pub mod codec;
pub mod common;
pub mod conversions;
pub mod flip;
pub mod output;
pub mod scan;

pub use common::{
    ConversionError,
    Result,
};

pub use scan::{
    CandidateFilter,
    PathScanner,
};

pub use codec::{
    EncodeOptions,
    ExrCodec,
    ImageBuffer,
    ImageCodec,
    PixelData,
    SampleKind,
    StandardCodec,
    TextureFormat,
    TextureReader,
    TextureWriter,
    TiffCompression,
};

pub use flip::ChannelFlipper;

pub use output::OutputNamer;

pub use conversions::{
    ConversionMode,
    ConversionRequest,
    ConversionResult,
    ConversionSummary,
    FailureStage,
    NormalMapPipeline,
    SkipReason,
};
