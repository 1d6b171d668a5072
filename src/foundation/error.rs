/// Convenience result type used across the crate.
pub type NexVideoResult<T> = Result<T, NexVideoError>;

/// Error taxonomy for composition definition and frame evaluation.
#[derive(thiserror::Error, Debug)]
pub enum NexVideoError {
    /// Invalid composition or timeline configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Invalid interpolation or spring configuration.
    #[error("animation error: {0}")]
    Animation(String),

    /// Errors while evaluating a frame (out-of-range frame, pipeline failures).
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// Errors when serializing or deserializing compositions and frames.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl NexVideoError {
    /// Build a [`NexVideoError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`NexVideoError::Animation`] value.
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`NexVideoError::Evaluation`] value.
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Build a [`NexVideoError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
