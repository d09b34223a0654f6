use crate::{
    assets::loader::RasterHandle,
    foundation::{
        core::{Affine, Rect, Transform},
        error::PhotoframeResult,
    },
    render::surface::Surface,
};

/// Opaque white, premultiplied.
const BACKGROUND: [u8; 4] = [255, 255, 255, 255];

/// Centered aspect-fit placement of an image inside an untransformed square frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    /// `min(size / width, size / height)`.
    pub base_scale: f64,
    /// Left edge in frame pixels.
    pub x: f64,
    /// Top edge in frame pixels.
    pub y: f64,
    /// Drawn width in frame pixels.
    pub width: f64,
    /// Drawn height in frame pixels.
    pub height: f64,
}

impl Placement {
    /// Destination rectangle in frame pixels.
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }
}

/// Fit a `width × height` image into a `size × size` frame, preserving aspect ratio, centered.
pub fn fit_placement(size: u32, width: u32, height: u32) -> Placement {
    let size = f64::from(size);
    let (w, h) = (f64::from(width), f64::from(height));
    let base_scale = (size / w).min(size / h);
    let draw_w = w * base_scale;
    let draw_h = h * base_scale;
    Placement {
        base_scale,
        x: (size - draw_w) / 2.0,
        y: (size - draw_h) / 2.0,
        width: draw_w,
        height: draw_h,
    }
}

/// Map from base-image pixel space to surface pixels.
///
/// The user transform is applied outside the fit placement, so it acts as a delta from the
/// centered, fitted state.
pub fn base_image_affine(size: u32, width: u32, height: u32, transform: &Transform) -> Affine {
    let p = fit_placement(size, width, height);
    transform.to_affine() * Affine::translate((p.x, p.y)) * Affine::scale(p.base_scale)
}

/// Map from overlay pixel space to surface pixels: stretched to cover the frame exactly.
pub fn overlay_affine(size: u32, width: u32, height: u32) -> Affine {
    let size = f64::from(size);
    Affine::scale_non_uniform(size / f64::from(width), size / f64::from(height))
}

/// Render `base` and `overlay` into `surface`.
///
/// The surface is fully overwritten: cleared, filled with opaque white, then the base image is
/// drawn under `transform` and the overlay is stretched over the whole frame, untransformed.
/// Absent layers are skipped. A transform with a non-finite or non-positive scale skips the base
/// layer.
pub fn draw(
    surface: &mut Surface,
    base: Option<&RasterHandle>,
    overlay: Option<&RasterHandle>,
    transform: &Transform,
) {
    let size = surface.size();
    surface.clear();
    surface.fill(BACKGROUND);

    if base.is_none() && overlay.is_none() {
        return;
    }

    let mut ctx = surface.render_context();
    // Re-establish the background inside the context so the flush composites over opaque white.
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
        BACKGROUND[0],
        BACKGROUND[1],
        BACKGROUND[2],
        BACKGROUND[3],
    ));
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
        0.0,
        0.0,
        f64::from(size),
        f64::from(size),
    ));

    if let Some(img) = base {
        if transform.is_valid() {
            let affine = base_image_affine(size, img.width(), img.height(), transform);
            fill_image(&mut ctx, img, affine);
        } else {
            tracing::warn!(?transform, "skipping base layer for degenerate transform");
        }
    }

    if let Some(img) = overlay {
        fill_image(&mut ctx, img, overlay_affine(size, img.width(), img.height()));
    }

    ctx.flush();
    ctx.render_to_pixmap(surface.pixmap_mut());
}

/// Allocate a `size × size` surface and draw into it.
pub fn render_preview(
    size: u32,
    base: Option<&RasterHandle>,
    overlay: Option<&RasterHandle>,
    transform: &Transform,
) -> PhotoframeResult<Surface> {
    let mut surface = Surface::new(size)?;
    draw(&mut surface, base, overlay, transform);
    Ok(surface)
}

fn fill_image(ctx: &mut vello_cpu::RenderContext, img: &RasterHandle, affine: Affine) {
    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_transform(affine_to_cpu(affine));
    ctx.set_paint(img.image_paint());
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
        0.0,
        0.0,
        f64::from(img.width()),
        f64::from(img.height()),
    ));
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
