//! Green channel inversion
//!
//! OpenGL and DirectX normal maps differ only in the sign of Y, which lives in
//! the green channel. Inverting it converts in either direction, and applying
//! it twice restores the input.

use tracing::debug;

use crate::image_pipeline::codec::{ImageBuffer, PixelData};
use crate::image_pipeline::common::error::{ConversionError, Result};

/// Index of the green (Y) sample within a pixel.
pub const GREEN_CHANNEL: usize = 1;

pub struct ChannelFlipper;

impl ChannelFlipper {
    /// Inverts the green sample of every pixel in place.
    ///
    /// Integer samples are mirrored within their range (`MAX - v`). Float
    /// samples become `1.0 - v` with no clamping, so HDR values outside
    /// [0, 1] keep their headroom. Every other channel is left as is.
    pub fn flip_green(image: &mut ImageBuffer) -> Result<()> {
        // Anything under three channels is grey or grey+alpha.
        if image.channels < 3 {
            return Err(ConversionError::MissingChannel(image.channels));
        }

        let stride = image.channels;
        debug!(
            "Flipping green channel: {}x{}x{} {:?}",
            image.width,
            image.height,
            stride,
            image.kind()
        );

        match &mut image.data {
            PixelData::U8(samples) => greens(samples, stride).for_each(|v| *v = u8::MAX - *v),
            PixelData::U16(samples) => greens(samples, stride).for_each(|v| *v = u16::MAX - *v),
            PixelData::F32(samples) => greens(samples, stride).for_each(|v| *v = 1.0 - *v),
        }

        Ok(())
    }
}

fn greens<T>(samples: &mut [T], stride: usize) -> impl Iterator<Item = &mut T> {
    samples.iter_mut().skip(GREEN_CHANNEL).step_by(stride)
}
