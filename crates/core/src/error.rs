#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// No device of the given kind matched the lookup.
    #[error("{device_type} not found")]
    NotFound { device_type: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
