use crate::image_pipeline::codec::exr_codec::ExrCodec;
use crate::image_pipeline::codec::format::TextureFormat;
use crate::image_pipeline::codec::reader::TextureReader;
use crate::image_pipeline::codec::standard_codec::StandardCodec;
use crate::image_pipeline::codec::types::{EncodeOptions, ImageBuffer};
use crate::image_pipeline::codec::writer::TextureWriter;
use crate::image_pipeline::common::error::Result;

/// Routes each format to the codec that can represent it: HDR formats to
/// [`ExrCodec`], everything else to [`StandardCodec`].
#[derive(Debug, Clone, Default)]
pub struct ImageCodec {
    standard: StandardCodec,
    hdr: ExrCodec,
}

impl ImageCodec {
    pub fn new(options: EncodeOptions) -> Self {
        Self {
            standard: StandardCodec::new(options),
            hdr: ExrCodec,
        }
    }
}

impl TextureReader for ImageCodec {
    fn read_texture(&self, data: &[u8], format: TextureFormat) -> Result<ImageBuffer> {
        if format.is_hdr() {
            self.hdr.read_texture(data, format)
        } else {
            self.standard.read_texture(data, format)
        }
    }
}

impl TextureWriter for ImageCodec {
    fn write_texture(&self, image: ImageBuffer, format: TextureFormat) -> Result<Vec<u8>> {
        if format.is_hdr() {
            self.hdr.write_texture(image, format)
        } else {
            self.standard.write_texture(image, format)
        }
    }
}
