//! OpenEXR codec.
//!
//! The raster decoder clamps everything to a fixed bit depth, so EXR takes a
//! separate path through the `exr` crate. Samples stay `f32` end to end and
//! values outside [0, 1] pass through untouched.

use std::io::Cursor;

use exr::prelude::*;
use tracing::{debug, warn};

use crate::image_pipeline::codec::format::TextureFormat;
use crate::image_pipeline::codec::reader::TextureReader;
use crate::image_pipeline::codec::types::{ImageBuffer, PixelData};
use crate::image_pipeline::codec::writer::TextureWriter;
use crate::image_pipeline::common::error::{ConversionError, Result};

const LAYER_NAME: &str = "normal";
const COLOR_CHANNELS: [&str; 3] = ["R", "G", "B"];

#[derive(Debug, Clone, Copy, Default)]
pub struct ExrCodec;

/// Pixel storage filled in by the exr reader callbacks.
struct ExrPixels {
    width: usize,
    channels: usize,
    samples: Vec<f32>,
}

impl TextureReader for ExrCodec {
    fn read_texture(&self, data: &[u8], format: TextureFormat) -> Result<ImageBuffer> {
        if format != TextureFormat::Exr {
            return Err(ConversionError::UnsupportedFormat(format!("{format:?}")));
        }

        debug!("Decoding EXR image, {} bytes", data.len());

        check_layers(data)?;

        let image = exr::prelude::read()
            .no_deep_data()
            .largest_resolution_level()
            .rgba_channels(
                |resolution: Vec2<usize>, channels| {
                    let count = if channels.3.is_some() { 4 } else { 3 };
                    ExrPixels {
                        width: resolution.width(),
                        channels: count,
                        samples: vec![0.0; resolution.area() * count],
                    }
                },
                |pixels: &mut ExrPixels, position: Vec2<usize>, (r, g, b, a): (f32, f32, f32, f32)| {
                    let start = (position.y() * pixels.width + position.x()) * pixels.channels;
                    let pixel = &mut pixels.samples[start..start + pixels.channels];
                    pixel[0] = r;
                    pixel[1] = g;
                    pixel[2] = b;
                    if let Some(alpha) = pixel.get_mut(3) {
                        *alpha = a;
                    }
                },
            )
            .first_valid_layer()
            .all_attributes()
            .from_buffered(Cursor::new(data))
            .map_err(|e| ConversionError::DecodeError(e.to_string()))?;

        let size = image.layer_data.size;
        let pixels = image.layer_data.channel_data.pixels;

        debug!("Decoded EXR image: {}x{}x{}", size.width(), size.height(), pixels.channels);

        Ok(ImageBuffer {
            width: size.width(),
            height: size.height(),
            channels: pixels.channels,
            data: PixelData::F32(pixels.samples),
        })
    }
}

/// Makes sure some layer has R, G and B, and warns about whatever the
/// single-layer RGBA read leaves behind.
fn check_layers(data: &[u8]) -> Result<()> {
    let meta = exr::meta::MetaData::read_from_buffered(Cursor::new(data), false)
        .map_err(|e| ConversionError::DecodeError(e.to_string()))?;

    let names = |header: &exr::meta::header::Header| -> Vec<String> {
        header.channels.list.iter().map(|c| c.name.to_string()).collect()
    };

    let Some(header) = meta.headers.iter().find(|header| {
        let present = names(header);
        COLOR_CHANNELS.iter().all(|wanted| present.iter().any(|name| name == wanted))
    }) else {
        let channels = meta.headers.first().map_or(0, |h| h.channels.list.len());
        return Err(ConversionError::MissingChannel(channels));
    };

    if meta.headers.len() > 1 {
        warn!(
            "EXR has {} layers, only {} is converted",
            meta.headers.len(),
            header
                .own_attributes
                .layer_name
                .as_ref()
                .map_or_else(|| "the unnamed layer".to_string(), |name| format!("layer '{name}'"))
        );
    }

    let dropped: Vec<String> = names(header)
        .into_iter()
        .filter(|name| !COLOR_CHANNELS.contains(&name.as_str()) && name != "A")
        .collect();
    if !dropped.is_empty() {
        warn!("Dropping EXR channels: {}", dropped.join(", "));
    }

    let attributes = header.own_attributes.other.len() + header.shared_attributes.other.len();
    if attributes > 0 {
        warn!("Dropping {} custom EXR attribute(s)", attributes);
    }

    Ok(())
}

impl TextureWriter for ExrCodec {
    fn write_texture(&self, image: ImageBuffer, format: TextureFormat) -> Result<Vec<u8>> {
        if format != TextureFormat::Exr {
            return Err(ConversionError::UnsupportedFormat(format!("{format:?}")));
        }

        let PixelData::F32(samples) = &image.data else {
            return Err(ConversionError::EncodeError(format!(
                "EXR output needs float samples, got {:?}",
                image.kind()
            )));
        };
        if samples.len() != image.expected_len() {
            return Err(ConversionError::EncodeError(format!(
                "buffer does not match {}x{}x{} layout",
                image.width, image.height, image.channels
            )));
        }

        debug!(
            "Encoding EXR image: {}x{}x{}",
            image.width, image.height, image.channels
        );

        let width = image.width;
        let channels = image.channels;
        let size = (image.width, image.height);
        let sample = |position: Vec2<usize>, channel: usize| {
            samples[(position.y() * width + position.x()) * channels + channel]
        };

        let mut output = Cursor::new(Vec::new());
        let written = match channels {
            3 => Image::from_layer(Layer::new(
                size,
                LayerAttributes::named(LAYER_NAME),
                Encoding::FAST_LOSSLESS,
                SpecificChannels::rgb(|position: Vec2<usize>| {
                    (sample(position, 0), sample(position, 1), sample(position, 2))
                }),
            ))
            .write()
            .to_buffered(&mut output),
            4 => Image::from_layer(Layer::new(
                size,
                LayerAttributes::named(LAYER_NAME),
                Encoding::FAST_LOSSLESS,
                SpecificChannels::rgba(|position: Vec2<usize>| {
                    (
                        sample(position, 0),
                        sample(position, 1),
                        sample(position, 2),
                        sample(position, 3),
                    )
                }),
            ))
            .write()
            .to_buffered(&mut output),
            other => {
                return Err(ConversionError::EncodeError(format!(
                    "EXR output needs 3 or 4 channels, got {other}"
                )));
            }
        };
        written.map_err(|e| ConversionError::EncodeError(e.to_string()))?;

        Ok(output.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hdr_image(channels: usize) -> ImageBuffer {
        let samples = (0..4 * 2 * channels)
            .map(|i| i as f32 * 0.25 - 0.5)
            .collect();
        ImageBuffer {
            width: 4,
            height: 2,
            channels,
            data: PixelData::F32(samples),
        }
    }

    #[test]
    fn test_rgba_keeps_out_of_range_values() {
        let image = hdr_image(4);
        let bytes = ExrCodec.write_texture(image.clone(), TextureFormat::Exr).unwrap();
        let decoded = ExrCodec.read_texture(&bytes, TextureFormat::Exr).unwrap();

        assert_eq!(decoded, image);
    }

    #[test]
    fn test_rgb_stays_three_channels() {
        let image = hdr_image(3);
        let bytes = ExrCodec.write_texture(image.clone(), TextureFormat::Exr).unwrap();
        let decoded = ExrCodec.read_texture(&bytes, TextureFormat::Exr).unwrap();

        assert_eq!(decoded.channels, 3);
        assert_eq!(decoded, image);
    }

    #[test]
    fn test_integer_buffer_is_rejected() {
        let image = ImageBuffer {
            width: 1,
            height: 1,
            channels: 3,
            data: PixelData::U8(vec![1, 2, 3]),
        };
        let result = ExrCodec.write_texture(image, TextureFormat::Exr);
        assert!(matches!(result, Err(ConversionError::EncodeError(_))));
    }

    #[test]
    fn test_garbage_is_decode_error() {
        let result = ExrCodec.read_texture(b"definitely not an exr file", TextureFormat::Exr);
        assert!(matches!(result, Err(ConversionError::DecodeError(_))));
    }

    fn write_any_channels(names: &[&str]) -> Vec<u8> {
        let channels = names
            .iter()
            .enumerate()
            .map(|(i, name)| AnyChannel::new(*name, FlatSamples::F32(vec![i as f32 * 0.25; 4])))
            .collect::<Vec<_>>();
        let layer = Layer::new(
            (2, 2),
            LayerAttributes::named(LAYER_NAME),
            Encoding::FAST_LOSSLESS,
            AnyChannels::sort(channels.into()),
        );

        let mut output = Cursor::new(Vec::new());
        Image::from_layer(layer).write().to_buffered(&mut output).unwrap();
        output.into_inner()
    }

    #[test]
    fn test_red_green_only_is_missing_channel() {
        let bytes = write_any_channels(&["R", "G"]);
        let result = ExrCodec.read_texture(&bytes, TextureFormat::Exr);
        assert!(matches!(result, Err(ConversionError::MissingChannel(2))));
    }

    #[test]
    fn test_extra_channels_are_dropped() {
        let bytes = write_any_channels(&["R", "G", "B", "Z"]);
        let decoded = ExrCodec.read_texture(&bytes, TextureFormat::Exr).unwrap();

        assert_eq!((decoded.width, decoded.height, decoded.channels), (2, 2, 3));
        let PixelData::F32(samples) = decoded.data else {
            panic!("EXR decoded to {:?}", decoded.data.kind());
        };
        assert_eq!(&samples[..3], &[0.0, 0.25, 0.5]);
    }
}
