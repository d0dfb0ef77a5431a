use std::io::Write;

use tiff::encoder::colortype;
use tiff::encoder::compression::DeflateLevel;
use tiff::encoder::{Compression, TiffEncoder};
use tiff::tags::Predictor;
use tracing::debug;

use crate::image_pipeline::codec::types::{EncodeOptions, ImageBuffer, PixelData, TiffCompression};
use crate::image_pipeline::common::error::{ConversionError, Result};

/// Writes RGB/RGBA TIFFs at the source bit depth (8, 16 or 32-bit float).
pub struct StandardTiffWriter;

impl StandardTiffWriter {
    pub fn write_tiff(
        &self,
        image: &ImageBuffer,
        output: &mut dyn Write,
        options: &EncodeOptions,
    ) -> Result<()> {
        debug!(
            "Encoding TIFF image: {}x{}x{} {:?}",
            image.width,
            image.height,
            image.channels,
            image.kind()
        );

        let mut buffer = Vec::new();

        let compression = match options.tiff_compression {
            TiffCompression::None => Compression::Uncompressed,
            TiffCompression::Lzw => Compression::Lzw,
            TiffCompression::DeflateFast => Compression::Deflate(DeflateLevel::Fast),
            TiffCompression::DeflateBalanced => Compression::Deflate(DeflateLevel::Balanced),
            TiffCompression::DeflateBest => Compression::Deflate(DeflateLevel::Best),
        };

        {
            let mut encoder = TiffEncoder::new(std::io::Cursor::new(&mut buffer))
                .map_err(|e| ConversionError::EncodeError(e.to_string()))?
                .with_compression(compression);

            // Horizontal differencing is only defined for integer samples.
            if options.tiff_predictor && !matches!(image.data, PixelData::F32(_)) {
                encoder = encoder.with_predictor(Predictor::Horizontal);
            }

            let width = image.width as u32;
            let height = image.height as u32;

            let written = match (&image.data, image.channels) {
                (PixelData::U8(data), 3) => encoder.write_image::<colortype::RGB8>(width, height, data),
                (PixelData::U8(data), 4) => encoder.write_image::<colortype::RGBA8>(width, height, data),
                (PixelData::U16(data), 3) => encoder.write_image::<colortype::RGB16>(width, height, data),
                (PixelData::U16(data), 4) => encoder.write_image::<colortype::RGBA16>(width, height, data),
                (PixelData::F32(data), 3) => {
                    encoder.write_image::<colortype::RGB32Float>(width, height, data)
                }
                (PixelData::F32(data), 4) => {
                    encoder.write_image::<colortype::RGBA32Float>(width, height, data)
                }
                (_, channels) => {
                    return Err(ConversionError::EncodeError(format!(
                        "TIFF output needs 3 or 4 channels, got {channels}"
                    )));
                }
            };
            written.map_err(|e| ConversionError::EncodeError(e.to_string()))?;
        }

        output.write_all(&buffer)?;

        debug!("TIFF encoding complete, {} bytes", buffer.len());
        Ok(())
    }
}
