//! Photoframe composes a user photo behind a fixed decorative overlay and exports the result as a
//! square PNG or JPEG at any resolution.
//!
//! The pipeline has three parts:
//!
//! - [`assets::loader::load`] decodes an [`ImageSource`] into a [`RasterHandle`]
//! - [`render::compositor::draw`] renders base + overlay into a [`Surface`] under a [`Transform`]
//! - [`export::export`] loads both images concurrently, rescales a preview transform to the output
//!   resolution, composites and encodes into a [`CompositeResult`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub mod assets;
pub mod encode;
pub mod export;
pub mod render;

pub use crate::foundation::core::{
    Affine, Point, PreviewFrame, Rect, ScaleLimits, Transform, Vec2,
};
pub use crate::foundation::error::{PhotoframeError, PhotoframeResult};

pub use crate::assets::loader::{RasterHandle, load, load_optional};
pub use crate::assets::source::ImageSource;
pub use crate::encode::format::{CompositeResult, ExportFormat, encode_surface};
pub use crate::export::{
    ExportRequest, ExportSettings, ExportSize, export, export_with_settings, rescale_transform,
    try_export,
};
pub use crate::render::compositor::{Placement, draw, fit_placement, render_preview};
pub use crate::render::surface::Surface;
