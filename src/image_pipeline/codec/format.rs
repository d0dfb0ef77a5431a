use std::path::Path;

use crate::image_pipeline::common::error::{ConversionError, Result};

/// Container formats a normal map may be stored in.
///
/// The output of a conversion is always written in the same container as its
/// source, so this is resolved once from the source extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureFormat {
    Png,
    Jpeg,
    Tga,
    Tiff,
    Bmp,
    WebP,
    Exr,
}

impl TextureFormat {
    pub const SUPPORTED_EXTENSIONS: &'static [&'static str] = &[
        "png", "jpg", "jpeg", "tga", "tif", "tiff", "bmp", "webp", "exr",
    ];

    /// Case-insensitive extension lookup, without the leading dot.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(TextureFormat::Png),
            "jpg" | "jpeg" => Some(TextureFormat::Jpeg),
            "tga" => Some(TextureFormat::Tga),
            "tif" | "tiff" => Some(TextureFormat::Tiff),
            "bmp" => Some(TextureFormat::Bmp),
            "webp" => Some(TextureFormat::WebP),
            "exr" => Some(TextureFormat::Exr),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
            .ok_or_else(|| ConversionError::UnsupportedFormat(path.display().to_string()))
    }

    /// Floating-point formats handled outside the general raster decoder.
    pub fn is_hdr(self) -> bool {
        matches!(self, TextureFormat::Exr)
    }

    pub fn supports_alpha(self) -> bool {
        !matches!(self, TextureFormat::Jpeg)
    }

    pub(crate) fn raster_format(self) -> Option<image::ImageFormat> {
        match self {
            TextureFormat::Png => Some(image::ImageFormat::Png),
            TextureFormat::Jpeg => Some(image::ImageFormat::Jpeg),
            TextureFormat::Tga => Some(image::ImageFormat::Tga),
            TextureFormat::Tiff => Some(image::ImageFormat::Tiff),
            TextureFormat::Bmp => Some(image::ImageFormat::Bmp),
            TextureFormat::WebP => Some(image::ImageFormat::WebP),
            TextureFormat::Exr => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_lookup_is_case_insensitive() {
        assert_eq!(TextureFormat::from_extension("PNG"), Some(TextureFormat::Png));
        assert_eq!(TextureFormat::from_extension("Jpeg"), Some(TextureFormat::Jpeg));
        assert_eq!(TextureFormat::from_extension("TIF"), Some(TextureFormat::Tiff));
        assert_eq!(TextureFormat::from_extension("exr"), Some(TextureFormat::Exr));
        assert_eq!(TextureFormat::from_extension("dds"), None);
    }

    #[test]
    fn test_every_supported_extension_resolves() {
        for ext in TextureFormat::SUPPORTED_EXTENSIONS {
            assert!(TextureFormat::from_extension(ext).is_some(), "{ext}");
        }
    }

    #[test]
    fn test_from_path_rejects_unknown_and_missing_extension() {
        assert!(matches!(
            TextureFormat::from_path(Path::new("rock_normal_map.dds")),
            Err(ConversionError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            TextureFormat::from_path(Path::new("rock_normal_map")),
            Err(ConversionError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_only_exr_is_hdr() {
        assert!(TextureFormat::Exr.is_hdr());
        assert!(TextureFormat::Exr.raster_format().is_none());
        assert!(!TextureFormat::Tiff.is_hdr());
        assert!(!TextureFormat::Jpeg.supports_alpha());
    }
}
