//! Encoding rendered surfaces into image containers.

/// PNG/JPEG encoders and the encoded result type.
pub mod format;
