//! Conversion request types

use std::fmt;
use std::path::{Path, PathBuf};

use crate::image_pipeline::codec::{EncodeOptions, TiffCompression};

/// Direction being recorded for a run.
///
/// Both directions apply the same green-channel inversion; the mode only picks
/// the default suffix and labels the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ConversionMode {
    /// OpenGL (Y+) to DirectX (Y-)
    #[default]
    #[value(name = "ogl2dx")]
    OpenGlToDirectX,
    /// DirectX (Y-) to OpenGL (Y+)
    #[value(name = "dx2ogl")]
    DirectXToOpenGl,
}

impl ConversionMode {
    pub fn default_suffix(self) -> &'static str {
        match self {
            ConversionMode::OpenGlToDirectX => "_DX",
            ConversionMode::DirectXToOpenGl => "_GL",
        }
    }
}

impl fmt::Display for ConversionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionMode::OpenGlToDirectX => write!(f, "OpenGL -> DirectX"),
            ConversionMode::DirectXToOpenGl => write!(f, "DirectX -> OpenGL"),
        }
    }
}

/// Everything a run needs to know, fixed for its whole duration
#[derive(Debug, Clone)]
pub struct ConversionRequest {
    /// Directory searched recursively for normal maps
    pub root: PathBuf,
    /// Direction label
    pub mode: ConversionMode,
    /// Text inserted between the stem and the extension of every output
    pub suffix: String,
    /// Quality used when writing JPEG outputs (1..=100)
    pub jpeg_quality: u8,
    /// Compression used when writing TIFF outputs
    pub tiff_compression: TiffCompression,
    /// Horizontal differencing predictor for integer TIFF outputs
    pub tiff_predictor: bool,
}

impl ConversionRequest {
    pub fn builder<P: AsRef<Path>>(root: P) -> ConversionRequestBuilder {
        ConversionRequestBuilder {
            root: root.as_ref().to_path_buf(),
            ..ConversionRequestBuilder::default()
        }
    }

    pub fn encode_options(&self) -> EncodeOptions {
        EncodeOptions {
            jpeg_quality: self.jpeg_quality,
            tiff_compression: self.tiff_compression,
            tiff_predictor: self.tiff_predictor,
        }
    }
}

/// Builder for ConversionRequest
#[derive(Default)]
pub struct ConversionRequestBuilder {
    root: PathBuf,
    mode: Option<ConversionMode>,
    suffix: Option<String>,
    jpeg_quality: Option<u8>,
    tiff_compression: Option<TiffCompression>,
    tiff_predictor: Option<bool>,
}

impl ConversionRequestBuilder {
    pub fn mode(mut self, mode: ConversionMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Overrides the mode's default suffix.
    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }

    pub fn jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = Some(quality);
        self
    }

    pub fn tiff_compression(mut self, compression: TiffCompression) -> Self {
        self.tiff_compression = Some(compression);
        self
    }

    pub fn tiff_predictor(mut self, enable: bool) -> Self {
        self.tiff_predictor = Some(enable);
        self
    }

    pub fn build(self) -> ConversionRequest {
        let defaults = EncodeOptions::default();
        let mode = self.mode.unwrap_or_default();
        ConversionRequest {
            root: self.root,
            mode,
            suffix: self
                .suffix
                .unwrap_or_else(|| mode.default_suffix().to_string()),
            jpeg_quality: self
                .jpeg_quality
                .unwrap_or(defaults.jpeg_quality)
                .clamp(1, 100),
            tiff_compression: self.tiff_compression.unwrap_or(defaults.tiff_compression),
            tiff_predictor: self.tiff_predictor.unwrap_or(defaults.tiff_predictor),
        }
    }
}
