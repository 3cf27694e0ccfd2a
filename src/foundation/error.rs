/// Convenience result type used across the crate.
pub type DiaryResult<T> = Result<T, DiaryError>;

/// Top-level error taxonomy used by the drawing, stylization and export APIs.
#[derive(thiserror::Error, Debug)]
pub enum DiaryError {
    /// Caller-provided data that cannot be used (zero-size or undecodable image, bad color).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Configuration values out of their accepted range.
    #[error("validation error: {0}")]
    Validation(String),

    /// Broken internal invariants, such as mismatched pixel buffer lengths.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// Errors when serializing or deserializing configuration.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DiaryError {
    /// Build a [`DiaryError::InvalidInput`] value.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Build a [`DiaryError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`DiaryError::Evaluation`] value.
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Build a [`DiaryError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
