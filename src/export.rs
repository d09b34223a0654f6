//! Export orchestration: load, rescale, composite, encode.
//!
//! The interactive editor captures [`Transform`] against a preview container whose on-screen size
//! differs from the export resolution. Translations are in preview pixels and get rescaled by
//! `output_size / preview.width`; `scale` is already a ratio and is copied unchanged.

use crate::{
    assets::{
        loader::{load, load_optional},
        source::ImageSource,
    },
    encode::format::{CompositeResult, ExportFormat, encode_surface},
    foundation::{
        core::{PreviewFrame, Transform},
        error::{PhotoframeError, PhotoframeResult},
    },
    render::{compositor::draw, surface::Surface},
};

/// Default JPEG quality (the 0.9 quality factor on a 1..=100 scale).
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Environment variable overriding [`ExportSettings::jpeg_quality`].
pub const JPEG_QUALITY_ENV: &str = "PHOTOFRAME_JPEG_QUALITY";

/// Encoder settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExportSettings {
    /// Quality (1..=100) for lossy formats.
    pub jpeg_quality: u8,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl ExportSettings {
    /// Defaults, with `PHOTOFRAME_JPEG_QUALITY` applied when it holds a value in `1..=100`.
    pub fn from_env() -> Self {
        Self::with_quality_override(std::env::var(JPEG_QUALITY_ENV).ok().as_deref())
    }

    pub(crate) fn with_quality_override(value: Option<&str>) -> Self {
        let jpeg_quality = value
            .and_then(|v| v.trim().parse::<u8>().ok())
            .filter(|q| (1..=100).contains(q))
            .unwrap_or(DEFAULT_JPEG_QUALITY);
        Self { jpeg_quality }
    }
}

/// Output resolutions offered by the application.
///
/// The exporter accepts any positive size; these are the presets a UI or CLI lists.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ExportSize {
    /// 1024 × 1024.
    #[default]
    Px1024,
    /// 2048 × 2048.
    Px2048,
    /// 4096 × 4096.
    Px4096,
}

impl ExportSize {
    /// Every preset, smallest first.
    pub const ALL: [Self; 3] = [Self::Px1024, Self::Px2048, Self::Px4096];

    /// Side length in pixels.
    pub fn px(self) -> u32 {
        match self {
            Self::Px1024 => 1024,
            Self::Px2048 => 2048,
            Self::Px4096 => 4096,
        }
    }

    /// Preset with side length `px`, if any.
    pub fn from_px(px: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.px() == px)
    }
}

/// Everything needed for one export.
#[derive(Clone, Copy, Debug)]
pub struct ExportRequest<'a> {
    /// User photo. `None` or an empty source means "no image loaded".
    pub base: Option<&'a ImageSource>,
    /// Decorative frame drawn over the photo.
    pub overlay: Option<&'a ImageSource>,
    /// Transform captured against the preview (or against the output when `preview_frame` is
    /// `None`).
    pub transform: Transform,
    /// Side length of the exported square image.
    pub output_size: u32,
    /// Output container.
    pub format: ExportFormat,
    /// Preview container the transform was captured against.
    pub preview_frame: Option<PreviewFrame>,
}

/// Convert a preview transform into the equivalent transform at `output_size`.
///
/// Only the translation is rescaled. Without a preview frame (or with a zero-width one) the
/// transform is returned verbatim.
pub fn rescale_transform(
    transform: &Transform,
    output_size: u32,
    preview_frame: Option<PreviewFrame>,
) -> Transform {
    match preview_frame.and_then(|f| f.ratio_to(output_size)) {
        Some(ratio) => Transform {
            scale: transform.scale,
            x: transform.x * ratio,
            y: transform.y * ratio,
        },
        None => *transform,
    }
}

/// Export with [`ExportSettings::default`].
pub fn export(req: &ExportRequest<'_>) -> PhotoframeResult<Option<CompositeResult>> {
    export_with_settings(req, &ExportSettings::default())
}

/// Export, reporting "no base image" and "no surface/encoder" as `Ok(None)`.
///
/// Decode and validation failures are returned as errors. No partial output is produced.
pub fn export_with_settings(
    req: &ExportRequest<'_>,
    settings: &ExportSettings,
) -> PhotoframeResult<Option<CompositeResult>> {
    match try_export(req, settings) {
        Ok(result) => Ok(Some(result)),
        Err(PhotoframeError::NoBaseImage) => {
            tracing::debug!("export requested without a base image");
            Ok(None)
        }
        Err(PhotoframeError::EncodeUnavailable(reason)) => {
            tracing::warn!(%reason, "export produced no output");
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

/// Export, surfacing every failure (including [`PhotoframeError::NoBaseImage`] and
/// [`PhotoframeError::EncodeUnavailable`]) as an error.
#[tracing::instrument(
    skip(req, settings),
    fields(size = req.output_size, format = %req.format)
)]
pub fn try_export(
    req: &ExportRequest<'_>,
    settings: &ExportSettings,
) -> PhotoframeResult<CompositeResult> {
    let Some(base_src) = req.base.filter(|b| !b.is_empty()) else {
        return Err(PhotoframeError::NoBaseImage);
    };
    req.transform.validate()?;
    if let Some(frame) = req.preview_frame {
        frame.validate()?;
    }

    let (base, overlay) = rayon::join(|| load(base_src), || load_optional(req.overlay));
    let base = base?;
    let overlay = overlay?;

    let mut surface = Surface::new(req.output_size)?;
    let transform = rescale_transform(&req.transform, req.output_size, req.preview_frame);
    tracing::debug!(?transform, "export transform");

    draw(&mut surface, Some(&base), overlay.as_ref(), &transform);
    encode_surface(&surface, req.format, settings.jpeg_quality)
}

#[cfg(test)]
#[path = "../tests/unit/export.rs"]
mod tests;
