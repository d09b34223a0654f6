//! CPU compositing of the base image and overlay.

/// Layer drawing and placement math.
pub mod compositor;
/// Square RGBA8 drawing targets.
pub mod surface;
