//! Image sources and decoding.

/// Decoding image sources into raster handles.
pub mod loader;
/// Raw image inputs (bytes, data URLs, local files).
pub mod source;
