use crate::utils::error::{RecompressError, Result};
use image::codecs::avif::AvifEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::codecs::webp::WebPEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

pub const SUPPORTED_EXTENSIONS: &[&str] = &["avif", "jpeg", "jpg", "png", "webp"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Avif,
    Jpeg,
    Png,
    /// The available WebP encoder is lossless only.
    WebP,
}

impl OutputFormat {
    pub fn from_extension(extension: &str) -> Result<Self> {
        match extension.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "avif" => Ok(OutputFormat::Avif),
            "jpeg" | "jpg" => Ok(OutputFormat::Jpeg),
            "png" => Ok(OutputFormat::Png),
            "webp" => Ok(OutputFormat::WebP),
            _ => Err(RecompressError::InvalidConfigValueError {
                field: "output_extension".to_string(),
                value: extension.to_string(),
                reason: format!(
                    "Unsupported output format. Supported: {}",
                    SUPPORTED_EXTENSIONS.join(", ")
                ),
            }),
        }
    }

    /// Whether `quality` has any effect on the encoded output.
    pub fn is_lossy(self) -> bool {
        matches!(self, OutputFormat::Avif | OutputFormat::Jpeg)
    }
}

impl FromStr for OutputFormat {
    type Err = RecompressError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_extension(s)
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Avif => "avif",
            OutputFormat::Jpeg => "jpeg",
            OutputFormat::Png => "png",
            OutputFormat::WebP => "webp",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeSettings {
    pub format: OutputFormat,
    pub target_height: u32,
    /// 0-100. Lossy encoders treat 0 as 1.
    pub quality: u8,
    /// AVIF only: 1 (slowest, smallest) to 10 (fastest).
    pub speed: u8,
}

#[derive(Debug, Clone)]
pub struct EncodedImage {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Width that keeps the source aspect ratio at `target_height`, never below 1.
pub fn cover_width(src_width: u32, src_height: u32, target_height: u32) -> u32 {
    let src_height = u64::from(src_height.max(1));
    let scaled = (u64::from(src_width) * u64::from(target_height) + src_height / 2) / src_height;
    scaled.clamp(1, u64::from(u32::MAX)) as u32
}

/// Scales `image` to cover `cover_width x target_height` and centre-crops to
/// exactly those dimensions.
pub fn cover_fit(image: &DynamicImage, target_height: u32) -> DynamicImage {
    let width = cover_width(image.width(), image.height(), target_height);
    image.resize_to_fill(width, target_height, FilterType::Lanczos3)
}

pub fn encode(
    image: &DynamicImage,
    settings: &EncodeSettings,
) -> std::result::Result<Vec<u8>, ImageError> {
    let mut buffer = Vec::new();
    let quality = settings.quality.clamp(1, 100);

    match settings.format {
        OutputFormat::Avif => {
            let speed = settings.speed.clamp(1, 10);
            let encoder = AvifEncoder::new_with_speed_quality(&mut buffer, speed, quality);
            to_rgb_or_rgba(image).write_with_encoder(encoder)?;
        }
        OutputFormat::Jpeg => {
            // JPEG has no alpha channel.
            let encoder = JpegEncoder::new_with_quality(&mut buffer, quality);
            DynamicImage::ImageRgb8(image.to_rgb8()).write_with_encoder(encoder)?;
        }
        OutputFormat::Png => {
            image.write_with_encoder(PngEncoder::new(&mut buffer))?;
        }
        OutputFormat::WebP => {
            to_rgb_or_rgba(image).write_with_encoder(WebPEncoder::new_lossless(&mut buffer))?;
        }
    }

    Ok(buffer)
}

fn to_rgb_or_rgba(image: &DynamicImage) -> DynamicImage {
    match image {
        DynamicImage::ImageRgb8(_) | DynamicImage::ImageRgba8(_) => image.clone(),
        _ if image.color().has_alpha() => DynamicImage::ImageRgba8(image.to_rgba8()),
        _ => DynamicImage::ImageRgb8(image.to_rgb8()),
    }
}

/// Decode, cover-fit and re-encode one image. `path` only labels errors.
pub fn recompress(path: &Path, bytes: &[u8], settings: &EncodeSettings) -> Result<EncodedImage> {
    let decoded = image::load_from_memory(bytes).map_err(|source| RecompressError::DecodeError {
        path: path.to_path_buf(),
        source,
    })?;

    let resized = cover_fit(&decoded, settings.target_height);
    let data = encode(&resized, settings).map_err(|source| RecompressError::EncodeError {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(EncodedImage {
        data,
        width: resized.width(),
        height: resized.height(),
    })
}
