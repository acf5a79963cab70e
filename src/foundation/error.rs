/// Convenience result type used across the crate.
pub type SceneResult<T> = Result<T, SceneError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Structural/programmer errors ([`SceneError::InvalidTarget`],
/// [`SceneError::UnimplementedDraw`], [`SceneError::Validation`]) are fatal
/// to the operation and propagate to the caller. Policy errors
/// ([`SceneError::Placement`]) are recoverable: the call site logs them and
/// the caller decides whether to retry.
#[derive(thiserror::Error, Debug)]
pub enum SceneError {
    /// Render invoked against an unusable target buffer.
    #[error("invalid render target: {0}")]
    InvalidTarget(String),

    /// A node was rendered without any draw capability supplied.
    #[error("node `{0}` has no draw capability")]
    UnimplementedDraw(String),

    /// A grid placement was rejected (out of bounds, grid full).
    #[error("placement error: {0}")]
    Placement(String),

    /// Structural misuse of the tree (cycles, invalid grid dimensions).
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies or leaf drawables.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SceneError {
    /// Build a [`SceneError::InvalidTarget`] value.
    pub fn invalid_target(msg: impl Into<String>) -> Self {
        Self::InvalidTarget(msg.into())
    }

    /// Build a [`SceneError::UnimplementedDraw`] value.
    pub fn unimplemented_draw(name: impl Into<String>) -> Self {
        Self::UnimplementedDraw(name.into())
    }

    /// Build a [`SceneError::Placement`] value.
    pub fn placement(msg: impl Into<String>) -> Self {
        Self::Placement(msg.into())
    }

    /// Build a [`SceneError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
