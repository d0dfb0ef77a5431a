use crate::image_pipeline::codec::format::TextureFormat;
use crate::image_pipeline::codec::types::ImageBuffer;
use crate::image_pipeline::common::error::Result;

pub trait TextureReader {
    fn read_texture(&self, data: &[u8], format: TextureFormat) -> Result<ImageBuffer>;
}
