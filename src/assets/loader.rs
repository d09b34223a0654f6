use std::sync::Arc;

use crate::{
    assets::source::ImageSource,
    foundation::{
        error::{PhotoframeError, PhotoframeResult},
        math::premultiply_rgba8_in_place,
    },
};

/// A fully decoded raster image.
///
/// Dimensions are always non-zero and fit the rasterizer's `u16` limit. Pixels are stored
/// premultiplied, ready to be used as an image paint.
pub struct RasterHandle {
    width: u32,
    height: u32,
    pixmap: Arc<vello_cpu::Pixmap>,
}

impl RasterHandle {
    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Build a handle from straight (non-premultiplied) RGBA8 pixels.
    pub fn from_rgba8(width: u32, height: u32, rgba8: Vec<u8>) -> PhotoframeResult<Self> {
        if width == 0 || height == 0 {
            return Err(PhotoframeError::decode("image has zero width or height"));
        }
        let mut premul = rgba8;
        premultiply_rgba8_in_place(&mut premul);
        let pixmap = premul_bytes_to_pixmap(&premul, width, height)?;
        Ok(Self {
            width,
            height,
            pixmap: Arc::new(pixmap),
        })
    }

    pub(crate) fn image_paint(&self) -> vello_cpu::Image {
        vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::clone(&self.pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        }
    }
}

impl std::fmt::Debug for RasterHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterHandle")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

/// Decode `source` into a [`RasterHandle`].
///
/// Fails with [`PhotoframeError::Decode`] when the source cannot be read, is not a recognized
/// raster format, or is corrupt. Nothing is cached between calls.
#[tracing::instrument(skip(source), fields(kind = source.kind()))]
pub fn load(source: &ImageSource) -> PhotoframeResult<RasterHandle> {
    let bytes = source.encoded_bytes()?;
    let dyn_img = image::load_from_memory(&bytes)
        .map_err(|err| PhotoframeError::decode(format!("decode image from memory: {err}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    tracing::debug!(width, height, "decoded image");

    RasterHandle::from_rgba8(width, height, rgba.into_raw())
}

/// Like [`load`], but a missing or empty source yields `Ok(None)`.
pub fn load_optional(source: Option<&ImageSource>) -> PhotoframeResult<Option<RasterHandle>> {
    match source {
        Some(src) if !src.is_empty() => load(src).map(Some),
        _ => Ok(None),
    }
}

fn premul_bytes_to_pixmap(
    rgba8_premul: &[u8],
    width: u32,
    height: u32,
) -> PhotoframeResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| PhotoframeError::decode("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| PhotoframeError::decode("image height exceeds u16"))?;
    if rgba8_premul.len() != width as usize * height as usize * 4 {
        return Err(PhotoframeError::decode("image byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for px in rgba8_premul.chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/loader.rs"]
mod tests;
