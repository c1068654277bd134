/// Crate-wide result alias.
pub type FramepaceResult<T> = Result<T, FramepaceError>;

/// Crate-wide error type.
#[derive(thiserror::Error, Debug)]
pub enum FramepaceError {
    /// Invalid caller-supplied value (stream index, pixel buffer length, config field).
    #[error("validation error: {0}")]
    Validation(String),

    /// Fatal startup condition (renderer selection, destination surface lookup).
    #[error("configuration error: {0}")]
    Config(String),

    /// Unrecoverable per-stream demux/decode failure.
    #[error("decode error: {0}")]
    Decode(String),

    /// Non-fatal render failure for a single tick.
    #[error("render error: {0}")]
    Render(String),

    /// Anything else, with its source chain preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FramepaceError {
    /// Build a [`FramepaceError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`FramepaceError::Config`].
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`FramepaceError::Decode`].
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`FramepaceError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
