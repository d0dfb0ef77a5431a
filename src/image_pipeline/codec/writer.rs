use crate::image_pipeline::codec::format::TextureFormat;
use crate::image_pipeline::codec::types::ImageBuffer;
use crate::image_pipeline::common::error::Result;

pub trait TextureWriter {
    /// Encodes `image` into the bytes of a `format` file. The buffer is consumed.
    fn write_texture(&self, image: ImageBuffer, format: TextureFormat) -> Result<Vec<u8>>;
}
