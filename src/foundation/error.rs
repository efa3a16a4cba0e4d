use crate::metadata::path::PathError;

/// Convenience result type used across bindkit.
pub type BindkitResult<T> = Result<T, BindkitError>;

/// Top-level error taxonomy used by derivation APIs.
#[derive(thiserror::Error, Debug)]
pub enum BindkitError {
    /// Invalid caller-provided metadata or configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// A metadata path could not be statically resolved and no fallback applied.
    #[error(transparent)]
    Path(#[from] PathError),

    /// The compiler reached a state the algebra layer guarantees cannot occur.
    #[error("construction error: {0}")]
    Construction(String),

    /// Errors when serializing or deserializing boundary data.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BindkitError {
    /// Build a [`BindkitError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`BindkitError::Construction`] value.
    pub fn construction(msg: impl Into<String>) -> Self {
        Self::Construction(msg.into())
    }

    /// Build a [`BindkitError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}
