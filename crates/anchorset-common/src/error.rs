//! Error types for Anchorset
//!
//! `AnchorsetError` carries the caller-facing message; the HTTP layer maps
//! each variant to a status code.

/// Application-specific error types
#[derive(thiserror::Error, Debug)]
pub enum AnchorsetError {
    /// Malformed input; the message names the violated constraint
    #[error("{0}")]
    IllegalArgument(String),

    /// Referenced row does not exist
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    AuthError(String),

    /// No store handle is configured for this process
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("database error: {0}")]
    DatabaseError(String),

    #[error("internal error: {0}")]
    InternalError(String),
}

impl AnchorsetError {
    pub fn illegal_argument(message: impl Into<String>) -> Self {
        AnchorsetError::IllegalArgument(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        AnchorsetError::NotFound(message.into())
    }

    /// The caller sent something wrong, as opposed to a server-side failure
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AnchorsetError::IllegalArgument(_)
                | AnchorsetError::NotFound(_)
                | AnchorsetError::AuthError(_)
        )
    }
}
