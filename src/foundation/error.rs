/// Convenience result type used across choreo.
pub type ChoreoResult<T> = Result<T, ChoreoError>;

/// Error taxonomy for construction-time APIs.
///
/// Runtime paths (advancing timelines, rasterizing, sampling particles) never produce these; they
/// degrade to resting state or empty output instead.
#[derive(thiserror::Error, Debug)]
pub enum ChoreoError {
    /// Invalid caller-provided data (geometry, config values, ids).
    #[error("validation error: {0}")]
    Validation(String),

    /// Invalid keyframe segments or timeline structure.
    #[error("animation error: {0}")]
    Animation(String),

    /// Invalid page or section definitions.
    #[error("scene error: {0}")]
    Scene(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ChoreoError {
    /// Build a [`ChoreoError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ChoreoError::Animation`] value.
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`ChoreoError::Scene`] value.
    pub fn scene(msg: impl Into<String>) -> Self {
        Self::Scene(msg.into())
    }

    /// Build a [`ChoreoError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
