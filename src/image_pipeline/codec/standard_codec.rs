//! Raster codec backed by the `image` crate.
//!
//! Covers the integer-quantized containers (PNG, JPEG, TGA, TIFF, BMP, WEBP).
//! Decoding keeps the source bit depth and channel count; encoding picks the
//! container from the output format. TIFF output goes through
//! [`StandardTiffWriter`] so compression can be chosen.

use std::io::Cursor;

use image::codecs::bmp::BmpEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::codecs::tga::TgaEncoder;
use image::codecs::webp::WebPEncoder;
use image::{DynamicImage, Rgb, Rgba};
use tracing::{debug, warn};

use crate::image_pipeline::codec::format::TextureFormat;
use crate::image_pipeline::codec::reader::TextureReader;
use crate::image_pipeline::codec::tiff_writer::StandardTiffWriter;
use crate::image_pipeline::codec::types::{EncodeOptions, ImageBuffer, PixelData};
use crate::image_pipeline::codec::writer::TextureWriter;
use crate::image_pipeline::common::error::{ConversionError, Result};

type Rgb16Image = image::ImageBuffer<Rgb<u16>, Vec<u16>>;
type Rgba16Image = image::ImageBuffer<Rgba<u16>, Vec<u16>>;

#[derive(Debug, Clone, Default)]
pub struct StandardCodec {
    options: EncodeOptions,
}

impl StandardCodec {
    pub fn new(options: EncodeOptions) -> Self {
        Self { options }
    }
}

impl TextureReader for StandardCodec {
    fn read_texture(&self, data: &[u8], format: TextureFormat) -> Result<ImageBuffer> {
        let raster_format = format
            .raster_format()
            .ok_or_else(|| ConversionError::UnsupportedFormat(format!("{format:?}")))?;

        debug!("Decoding {:?} image, {} bytes", format, data.len());

        let decoded = image::load_from_memory_with_format(data, raster_format)
            .map_err(|e| ConversionError::DecodeError(e.to_string()))?;

        from_dynamic(decoded)
    }
}

impl TextureWriter for StandardCodec {
    fn write_texture(&self, image: ImageBuffer, format: TextureFormat) -> Result<Vec<u8>> {
        debug!(
            "Encoding {:?} image: {}x{}x{} {:?}",
            format,
            image.width,
            image.height,
            image.channels,
            image.kind()
        );

        if image.has_alpha() && !format.supports_alpha() {
            warn!("Dropping alpha channel for {:?} output", format);
        }

        let mut output = Cursor::new(Vec::new());

        if format == TextureFormat::Tiff {
            StandardTiffWriter.write_tiff(&image, &mut output, &self.options)?;
            return Ok(output.into_inner());
        }

        let dynamic = to_dynamic(image)?;

        let encoded = match format {
            TextureFormat::Png => dynamic.write_with_encoder(PngEncoder::new(&mut output)),
            TextureFormat::Jpeg => {
                // JPEG has neither alpha nor more than 8 bits per sample.
                let rgb = DynamicImage::ImageRgb8(dynamic.to_rgb8());
                let quality = self.options.jpeg_quality.clamp(1, 100);
                rgb.write_with_encoder(JpegEncoder::new_with_quality(&mut output, quality))
            }
            TextureFormat::Tga => dynamic.write_with_encoder(TgaEncoder::new(&mut output)),
            TextureFormat::Bmp => dynamic.write_with_encoder(BmpEncoder::new(&mut output)),
            TextureFormat::WebP => dynamic.write_with_encoder(WebPEncoder::new_lossless(&mut output)),
            TextureFormat::Tiff | TextureFormat::Exr => {
                return Err(ConversionError::UnsupportedFormat(format!(
                    "{format:?} is not a raster output format"
                )));
            }
        };
        encoded.map_err(|e| ConversionError::EncodeError(e.to_string()))?;

        Ok(output.into_inner())
    }
}

/// Splits a decoded image into our buffer, rejecting layouts without a green channel.
fn from_dynamic(decoded: DynamicImage) -> Result<ImageBuffer> {
    let width = decoded.width() as usize;
    let height = decoded.height() as usize;
    let color = decoded.color();

    let (channels, data) = match decoded {
        DynamicImage::ImageRgb8(buf) => (3, PixelData::U8(buf.into_raw())),
        DynamicImage::ImageRgba8(buf) => (4, PixelData::U8(buf.into_raw())),
        DynamicImage::ImageRgb16(buf) => (3, PixelData::U16(buf.into_raw())),
        DynamicImage::ImageRgba16(buf) => (4, PixelData::U16(buf.into_raw())),
        DynamicImage::ImageRgb32F(buf) => (3, PixelData::F32(buf.into_raw())),
        DynamicImage::ImageRgba32F(buf) => (4, PixelData::F32(buf.into_raw())),
        _ if color.channel_count() < 3 || !color.has_color() => {
            return Err(ConversionError::MissingChannel(color.channel_count() as usize));
        }
        _ => {
            return Err(ConversionError::UnsupportedFormat(format!(
                "color type {color:?}"
            )));
        }
    };

    debug!("Decoded image: {}x{}x{} {:?}", width, height, channels, data.kind());

    Ok(ImageBuffer {
        width,
        height,
        channels,
        data,
    })
}

fn to_dynamic(image: ImageBuffer) -> Result<DynamicImage> {
    let width = image.width as u32;
    let height = image.height as u32;
    let channels = image.channels;

    let dynamic = match (image.data, channels) {
        (PixelData::U8(data), 3) => image::RgbImage::from_raw(width, height, data).map(DynamicImage::ImageRgb8),
        (PixelData::U8(data), 4) => image::RgbaImage::from_raw(width, height, data).map(DynamicImage::ImageRgba8),
        (PixelData::U16(data), 3) => Rgb16Image::from_raw(width, height, data).map(DynamicImage::ImageRgb16),
        (PixelData::U16(data), 4) => Rgba16Image::from_raw(width, height, data).map(DynamicImage::ImageRgba16),
        (PixelData::F32(data), 3) => image::Rgb32FImage::from_raw(width, height, data).map(DynamicImage::ImageRgb32F),
        (PixelData::F32(data), 4) => image::Rgba32FImage::from_raw(width, height, data).map(DynamicImage::ImageRgba32F),
        _ => None,
    };

    dynamic.ok_or_else(|| {
        ConversionError::EncodeError(format!(
            "buffer does not match {width}x{height}x{channels} layout"
        ))
    })
}
