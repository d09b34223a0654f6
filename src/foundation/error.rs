/// Convenience result type used across the crate.
pub type PhotoframeResult<T> = Result<T, PhotoframeError>;

/// Error taxonomy for loading, compositing and exporting.
#[derive(thiserror::Error, Debug)]
pub enum PhotoframeError {
    /// The image source is unreadable, corrupt, or not a supported raster format.
    #[error("decode error: {0}")]
    Decode(String),

    /// A surface or encoder could not be obtained.
    #[error("encoder unavailable: {0}")]
    EncodeUnavailable(String),

    /// An export was requested without a base image.
    #[error("no base image loaded")]
    NoBaseImage,

    /// Caller-supplied values are out of range.
    #[error("validation error: {0}")]
    Validation(String),

    /// Any other failure, with its context chain preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PhotoframeError {
    /// Build a [`PhotoframeError::Decode`].
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`PhotoframeError::EncodeUnavailable`].
    pub fn encode_unavailable(msg: impl Into<String>) -> Self {
        Self::EncodeUnavailable(msg.into())
    }

    /// Build a [`PhotoframeError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Return `true` for conditions the exporter reports as an absent result.
    pub fn is_absent_result(&self) -> bool {
        matches!(self, Self::NoBaseImage | Self::EncodeUnavailable(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
