//! Decoded texture data types

/// Numeric representation of every channel in an [`ImageBuffer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleKind {
    U8,
    U16,
    F32,
}

/// Interleaved, row-major channel samples.
#[derive(Debug, Clone, PartialEq)]
pub enum PixelData {
    U8(Vec<u8>),
    U16(Vec<u16>),
    F32(Vec<f32>),
}

impl PixelData {
    pub fn kind(&self) -> SampleKind {
        match self {
            PixelData::U8(_) => SampleKind::U8,
            PixelData::U16(_) => SampleKind::U16,
            PixelData::F32(_) => SampleKind::F32,
        }
    }
}

/// Represents one decoded texture, owned by a single file's conversion
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
    /// Samples per pixel (3 for RGB, 4 for RGBA)
    pub channels: usize,
    /// Pixel samples interleaved [R, G, B, (A), R, G, B, (A), ...]
    pub data: PixelData,
}

impl ImageBuffer {
    pub fn kind(&self) -> SampleKind {
        self.data.kind()
    }

    pub fn has_alpha(&self) -> bool {
        self.channels == 4
    }

    /// Number of samples the buffer should hold for its dimensions.
    pub fn expected_len(&self) -> usize {
        self.width * self.height * self.channels
    }
}

/// TIFF compression methods
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum TiffCompression {
    /// No compression (fastest, largest file)
    None,
    /// LZW compression (default)
    Lzw,
    /// Deflate compression - fast level
    DeflateFast,
    /// Deflate compression - balanced
    DeflateBalanced,
    /// Deflate compression - best compression (slower)
    DeflateBest,
}

/// Per-format knobs applied when writing converted textures
#[derive(Debug, Clone, Copy)]
pub struct EncodeOptions {
    /// JPEG quality, 1..=100
    pub jpeg_quality: u8,
    pub tiff_compression: TiffCompression,
    /// Horizontal differencing for integer TIFF output
    pub tiff_predictor: bool,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            jpeg_quality: 95,
            tiff_compression: TiffCompression::Lzw,
            tiff_predictor: false,
        }
    }
}
