/// Convenience result type used across pagefx.
pub type PagefxResult<T> = Result<T, PagefxError>;

/// Top-level error taxonomy used by the orchestration APIs.
///
/// Sampling, generation and scheduling are total; errors only surface at the
/// configuration and content edges.
#[derive(thiserror::Error, Debug)]
pub enum PagefxError {
    /// Invalid user-provided configuration or lookup key.
    #[error("validation error: {0}")]
    Validation(String),

    /// Malformed keyframe tracks, tweens or transition profiles.
    #[error("animation error: {0}")]
    Animation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PagefxError {
    /// Build a [`PagefxError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PagefxError::Animation`] value.
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`PagefxError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for PagefxError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
