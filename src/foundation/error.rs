/// Convenience result type used across gifcaption.
pub type CaptionResult<T> = Result<T, CaptionError>;

/// Top-level error taxonomy used by the captioning pipeline.
#[derive(thiserror::Error, Debug)]
pub enum CaptionError {
    /// Invalid user-provided style or sequence data.
    #[error("validation error: {0}")]
    Validation(String),

    /// The font resource could not be read or registered.
    ///
    /// The frame compositor recovers from this locally and reports it as a per-frame diagnostic.
    #[error("font load error: {0}")]
    FontLoad(String),

    /// A frame's pixel data does not match its declared bounds.
    #[error("dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// The input byte stream is not a readable animated image.
    #[error("decode error: {0}")]
    Decode(String),

    /// The container encoder rejected the sequence.
    #[error("encode error: {0}")]
    Encode(String),

    /// Processing was cancelled between frames.
    #[error("processing cancelled")]
    Cancelled,

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CaptionError {
    /// Build a [`CaptionError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CaptionError::FontLoad`] value.
    pub fn font_load(msg: impl Into<String>) -> Self {
        Self::FontLoad(msg.into())
    }

    /// Build a [`CaptionError::DimensionMismatch`] value.
    pub fn dimension_mismatch(msg: impl Into<String>) -> Self {
        Self::DimensionMismatch(msg.into())
    }

    /// Build a [`CaptionError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`CaptionError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Return `true` for errors that only degrade a single frame instead of the whole run.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::FontLoad(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
