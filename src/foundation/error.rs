/// Result alias used throughout the crate.
pub type OverlayResult<T> = Result<T, OverlayError>;

/// Typed failure for every stage of an overlay job.
///
/// The variants mirror the job stages so logs and tests can tell a failed decode apart from a
/// failed encode, while the external request contract only ever reports a generic failure.
#[derive(thiserror::Error, Debug)]
pub enum OverlayError {
    /// The external decode step failed or produced no usable frame sequence.
    #[error("decode error: {0}")]
    Decode(String),

    /// The external encode step failed.
    #[error("encode error: {0}")]
    Encode(String),

    /// The external audio remux step failed.
    #[error("remux error: {0}")]
    Remux(String),

    /// A required static image or job input image could not be loaded.
    #[error("asset load error: {0}")]
    AssetLoad(String),

    /// Request or configuration constraints were violated.
    #[error("validation error: {0}")]
    Validation(String),

    /// The finished video was requested before it exists.
    #[error("output not found: {0}")]
    OutputNotFound(String),

    /// Anything else (mostly filesystem I/O with attached context).
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Discriminant of [`OverlayError`], convenient for assertions and structured logs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// See [`OverlayError::Decode`].
    Decode,
    /// See [`OverlayError::Encode`].
    Encode,
    /// See [`OverlayError::Remux`].
    Remux,
    /// See [`OverlayError::AssetLoad`].
    AssetLoad,
    /// See [`OverlayError::Validation`].
    Validation,
    /// See [`OverlayError::OutputNotFound`].
    OutputNotFound,
    /// See [`OverlayError::Other`].
    Other,
}

impl OverlayError {
    /// Build a [`OverlayError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`OverlayError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`OverlayError::Remux`] value.
    pub fn remux(msg: impl Into<String>) -> Self {
        Self::Remux(msg.into())
    }

    /// Build a [`OverlayError::AssetLoad`] value.
    pub fn asset_load(msg: impl Into<String>) -> Self {
        Self::AssetLoad(msg.into())
    }

    /// Build a [`OverlayError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`OverlayError::OutputNotFound`] value.
    pub fn output_not_found(msg: impl Into<String>) -> Self {
        Self::OutputNotFound(msg.into())
    }

    /// Return the variant tag without the payload.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Decode(_) => ErrorKind::Decode,
            Self::Encode(_) => ErrorKind::Encode,
            Self::Remux(_) => ErrorKind::Remux,
            Self::AssetLoad(_) => ErrorKind::AssetLoad,
            Self::Validation(_) => ErrorKind::Validation,
            Self::OutputNotFound(_) => ErrorKind::OutputNotFound,
            Self::Other(_) => ErrorKind::Other,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
