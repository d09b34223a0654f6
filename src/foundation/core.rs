use crate::foundation::error::{PhotoframeError, PhotoframeResult};

pub use kurbo::{Affine, Point, Rect, Vec2};

/// User adjustment applied to the base image.
///
/// `x`/`y` are a translation in pixels of the surface the transform was captured against and
/// `scale` is a resolution-independent uniform factor. The transform is a delta on top of the
/// centered aspect-fit placement, so [`Transform::IDENTITY`] shows the image fitted to the frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Transform {
    /// Uniform scale factor, must be finite and `> 0`.
    pub scale: f64,
    /// Horizontal translation in surface pixels.
    pub x: f64,
    /// Vertical translation in surface pixels.
    pub y: f64,
}

impl Transform {
    /// Scale 1, no translation.
    pub const IDENTITY: Self = Self {
        scale: 1.0,
        x: 0.0,
        y: 0.0,
    };

    /// Create a validated transform.
    pub fn new(scale: f64, x: f64, y: f64) -> PhotoframeResult<Self> {
        let t = Self { scale, x, y };
        t.validate()?;
        Ok(t)
    }

    /// Check `scale > 0` and that every component is finite.
    pub fn validate(&self) -> PhotoframeResult<()> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(PhotoframeError::validation(
                "transform scale must be finite and > 0",
            ));
        }
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(PhotoframeError::validation(
                "transform translation must be finite",
            ));
        }
        Ok(())
    }

    /// Return `true` when [`Transform::validate`] would succeed.
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Keep the translation, replace the scale.
    pub fn with_scale(self, scale: f64) -> Self {
        Self { scale, ..self }
    }

    /// Affine equivalent: translate by `(x, y)`, then scale uniformly.
    pub fn to_affine(self) -> Affine {
        Affine::translate((self.x, self.y)) * Affine::scale(self.scale)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Pixel dimensions of the interactive preview container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PreviewFrame {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl PreviewFrame {
    /// Create a validated preview frame (both sides `> 0`).
    pub fn new(width: u32, height: u32) -> PhotoframeResult<Self> {
        let f = Self { width, height };
        f.validate()?;
        Ok(f)
    }

    /// Square preview frame of side `size`.
    pub fn square(size: u32) -> PhotoframeResult<Self> {
        Self::new(size, size)
    }

    /// Check both sides are non-zero.
    pub fn validate(&self) -> PhotoframeResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(PhotoframeError::validation(
                "preview frame width and height must be > 0",
            ));
        }
        Ok(())
    }

    /// Return `true` when width and height match.
    pub fn is_square(&self) -> bool {
        self.width == self.height
    }

    /// `output_size / width`, or `None` for a zero-width frame.
    ///
    /// Only the width participates; the preview container is assumed square.
    pub fn ratio_to(&self, output_size: u32) -> Option<f64> {
        if self.width == 0 {
            return None;
        }
        Some(f64::from(output_size) / f64::from(self.width))
    }
}

/// Application-level zoom range offered by an interactive editor.
///
/// The compositing core never applies these limits on its own.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScaleLimits {
    /// Smallest allowed scale.
    pub min: f64,
    /// Largest allowed scale.
    pub max: f64,
}

impl ScaleLimits {
    /// Create validated limits with `0 < min <= max`.
    pub fn new(min: f64, max: f64) -> PhotoframeResult<Self> {
        if !min.is_finite() || !max.is_finite() || min <= 0.0 || min > max {
            return Err(PhotoframeError::validation(
                "scale limits must satisfy 0 < min <= max",
            ));
        }
        Ok(Self { min, max })
    }

    /// Clamp a raw scale into `[min, max]`.
    pub fn clamp_scale(&self, scale: f64) -> f64 {
        if scale.is_nan() {
            return self.min;
        }
        scale.clamp(self.min, self.max)
    }

    /// Clamp the scale of `t`, leaving its translation untouched.
    pub fn clamp(&self, t: Transform) -> Transform {
        t.with_scale(self.clamp_scale(t.scale))
    }
}

impl Default for ScaleLimits {
    fn default() -> Self {
        Self { min: 0.1, max: 5.0 }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
