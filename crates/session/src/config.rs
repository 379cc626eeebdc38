//! Session configuration

use serde::{Deserialize, Serialize};

/// Storage keys for the credential bundle and lockout state.
///
/// These names are shared with legacy consumers that read the same host
/// storage directly; do not rename them.
pub mod keys {
    /// Access token
    pub const TOKEN: &str = "authToken";
    /// Serialized user record
    pub const USER: &str = "user";
    /// Refresh token
    pub const REFRESH_TOKEN: &str = "authRefreshToken";
    /// Absolute access-token expiry, RFC 3339
    pub const TOKEN_EXPIRY: &str = "authTokenExpiry";
    /// Failed-login counter (persistent scope only)
    pub const LOGIN_ATTEMPTS: &str = "loginAttempts";
    /// Lockout deadline, epoch milliseconds (persistent scope only)
    pub const LOCKED_UNTIL: &str = "accountLockedUntil";
}

/// Tunables for the session lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Failed logins before the account locks
    pub max_login_attempts: u32,
    /// How long a lockout lasts, in seconds
    pub lock_duration_secs: i64,
    /// Refresh proactively when the token expires within this margin
    pub refresh_margin_secs: i64,
    /// Token cookie lifetime when the backend reports no expiry
    pub token_cookie_ttl_secs: i64,
    /// Refresh-token cookie lifetime (fixed, regardless of token lifetime)
    pub refresh_cookie_ttl_secs: i64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_login_attempts: 5,
            lock_duration_secs: 15 * 60,
            refresh_margin_secs: 5 * 60,
            token_cookie_ttl_secs: 8 * 60 * 60,
            refresh_cookie_ttl_secs: 7 * 24 * 60 * 60,
        }
    }
}
