//! Session error types
//!
//! Every backend-call failure is caught at the session boundary and folded
//! into one of these variants; callers see a short human-readable message,
//! never a transport-level fault.

use argus_http::ClientError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    /// Too many failed logins; attempts are rejected before any network call
    #[error("Account temporarily locked. Try again later.")]
    AccountLocked,

    /// Backend rejected the credentials
    #[error("{0}")]
    InvalidCredentials(String),

    /// Refresh was requested but no refresh token is stored
    #[error("No refresh token available")]
    NoRefreshToken,

    /// Token renewal failed; the session has been torn down
    #[error("Session refresh failed: {0}")]
    RefreshFailed(String),

    /// Transport-level failure
    #[error("Network error. Please try again.")]
    Network(String),

    /// Any other backend-reported failure
    #[error("{0}")]
    Backend(String),
}

impl SessionError {
    /// Map a login-call failure. Transport errors stay distinct because they
    /// must not count against the lockout counter.
    pub(crate) fn from_login_failure(err: &ClientError) -> Self {
        match err {
            ClientError::Request(e) => Self::Network(e.to_string()),
            other => Self::InvalidCredentials(other.user_message()),
        }
    }

    /// Map a generic authenticated-call failure.
    pub(crate) fn from_backend(err: &ClientError) -> Self {
        match err {
            ClientError::Request(e) => Self::Network(e.to_string()),
            other => Self::Backend(other.user_message()),
        }
    }
}
