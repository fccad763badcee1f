//! Demo engine error types.
//!
//! Playback control operations are infallible by design (invalid calls are
//! no-ops), so [`DemoError`] only covers script construction and loading.

/// Unified error type for the demo crate.
#[derive(Debug, thiserror::Error)]
pub enum DemoError {
    /// A script was defined with no steps.
    #[error("script `{key}` has no steps")]
    EmptyScript { key: String },

    /// Two steps in the same script share an id.
    #[error("script `{key}` has duplicate step id `{step_id}`")]
    DuplicateStepId { key: String, step_id: String },

    /// A script key is empty or otherwise unusable.
    #[error("invalid script key: {reason}")]
    InvalidKey { reason: String },

    /// JSON serialization or deserialization failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias used throughout the demo crate.
pub type Result<T> = std::result::Result<T, DemoError>;
