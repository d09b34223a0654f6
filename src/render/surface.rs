use crate::foundation::{
    error::{PhotoframeError, PhotoframeResult},
    math::unpremultiply_rgba8_in_place,
};

/// A square premultiplied RGBA8 drawing target.
///
/// One surface belongs to exactly one render call; nothing else reads or writes it while it is
/// being drawn.
pub struct Surface {
    size: u16,
    pixmap: vello_cpu::Pixmap,
}

impl Surface {
    /// Allocate a transparent `size × size` surface.
    ///
    /// Fails with [`PhotoframeError::EncodeUnavailable`] when `size` is zero or larger than the
    /// rasterizer supports (`u16::MAX`).
    pub fn new(size: u32) -> PhotoframeResult<Self> {
        if size == 0 {
            return Err(PhotoframeError::encode_unavailable(
                "surface size must be > 0",
            ));
        }
        let size_u16: u16 = size
            .try_into()
            .map_err(|_| PhotoframeError::encode_unavailable("surface size exceeds u16"))?;
        Ok(Self {
            size: size_u16,
            pixmap: vello_cpu::Pixmap::new(size_u16, size_u16),
        })
    }

    /// Side length in pixels.
    pub fn size(&self) -> u32 {
        u32::from(self.size)
    }

    /// Premultiplied RGBA8 bytes, row-major.
    pub fn data(&self) -> &[u8] {
        self.pixmap.data_as_u8_slice()
    }

    /// Premultiplied RGBA8 value at `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let size = self.size();
        if x >= size || y >= size {
            return None;
        }
        let idx = (y as usize * size as usize + x as usize) * 4;
        let d = self.data();
        Some([d[idx], d[idx + 1], d[idx + 2], d[idx + 3]])
    }

    /// Overwrite every pixel with a premultiplied RGBA8 value.
    pub(crate) fn fill(&mut self, premul: [u8; 4]) {
        for px in self.pixmap.data_as_u8_slice_mut().chunks_exact_mut(4) {
            px.copy_from_slice(&premul);
        }
    }

    /// Reset every pixel to transparent.
    pub fn clear(&mut self) {
        self.fill([0, 0, 0, 0]);
    }

    /// Straight-alpha copy of the pixels, suitable for encoders.
    pub fn to_rgba_image(&self) -> image::RgbaImage {
        let mut rgba = self.data().to_vec();
        unpremultiply_rgba8_in_place(&mut rgba);
        let size = self.size();
        image::RgbaImage::from_raw(size, size, rgba)
            .unwrap_or_else(|| image::RgbaImage::new(size, size))
    }

    pub(crate) fn render_context(&self) -> vello_cpu::RenderContext {
        vello_cpu::RenderContext::new(self.size, self.size)
    }

    pub(crate) fn pixmap_mut(&mut self) -> &mut vello_cpu::Pixmap {
        &mut self.pixmap
    }
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
