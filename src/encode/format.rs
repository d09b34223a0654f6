use image::{ExtendedColorType, ImageEncoder as _};

use crate::{
    foundation::error::{PhotoframeError, PhotoframeResult},
    render::surface::Surface,
};

/// Output container format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Lossless, alpha-capable.
    #[default]
    Png,
    /// Lossy, no alpha channel.
    Jpeg,
}

impl ExportFormat {
    /// MIME type, e.g. `image/png`.
    pub fn mime(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
        }
    }

    /// Conventional file extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
        }
    }

    /// Whether the encoder applies a quality factor.
    pub fn is_lossy(self) -> bool {
        matches!(self, Self::Jpeg)
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Png => "png",
            Self::Jpeg => "jpeg",
        })
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = PhotoframeError;

    /// Accepts `png`, `jpeg`, `jpg` and the matching MIME types, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" | "image/png" => Ok(Self::Png),
            "jpeg" | "jpg" | "image/jpeg" | "image/jpg" => Ok(Self::Jpeg),
            other => Err(PhotoframeError::validation(format!(
                "unsupported export format '{other}'"
            ))),
        }
    }
}

/// An encoded composite, owned by the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompositeResult {
    /// Encoded container bytes.
    pub bytes: Vec<u8>,
    /// Container format of `bytes`.
    pub format: ExportFormat,
    /// Quality (1..=100) used for lossy formats; `None` for lossless ones.
    pub quality: Option<u8>,
    /// Side length of the square image in pixels.
    pub size: u32,
}

impl CompositeResult {
    /// MIME type of `bytes`.
    pub fn mime(&self) -> &'static str {
        self.format.mime()
    }

    /// `<stem>.<ext>` for the result's format.
    pub fn file_name(&self, stem: &str) -> String {
        format!("{stem}.{}", self.format.extension())
    }
}

/// Encode a surface.
///
/// PNG keeps the RGBA channels; JPEG drops alpha and uses `jpeg_quality` (1..=100). Encoder
/// failures are reported as [`PhotoframeError::EncodeUnavailable`].
pub fn encode_surface(
    surface: &Surface,
    format: ExportFormat,
    jpeg_quality: u8,
) -> PhotoframeResult<CompositeResult> {
    let rgba = surface.to_rgba_image();
    let (width, height) = rgba.dimensions();
    let mut bytes = Vec::new();

    let quality = match format {
        ExportFormat::Png => {
            image::codecs::png::PngEncoder::new(&mut bytes)
                .write_image(rgba.as_raw(), width, height, ExtendedColorType::Rgba8)
                .map_err(|err| {
                    PhotoframeError::encode_unavailable(format!("encode png: {err}"))
                })?;
            None
        }
        ExportFormat::Jpeg => {
            if !(1..=100).contains(&jpeg_quality) {
                return Err(PhotoframeError::validation(
                    "jpeg quality must be in 1..=100",
                ));
            }
            let rgb = image::DynamicImage::ImageRgba8(rgba).to_rgb8();
            image::codecs::jpeg::JpegEncoder::new_with_quality(&mut bytes, jpeg_quality)
                .write_image(rgb.as_raw(), width, height, ExtendedColorType::Rgb8)
                .map_err(|err| {
                    PhotoframeError::encode_unavailable(format!("encode jpeg: {err}"))
                })?;
            Some(jpeg_quality)
        }
    };

    Ok(CompositeResult {
        bytes,
        format,
        quality,
        size: width,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/encode/format.rs"]
mod tests;
