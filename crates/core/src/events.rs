//! Session lifecycle events.
//!
//! Dispatched synchronously, fire-and-forget, to whatever UI collaborators
//! registered a listener (the navigation header re-renders on these). No
//! queuing, no replay.

use crate::types::UserRecord;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Successful login; carries the authenticated user.
    Login(UserRecord),
    /// Session was torn down (explicit logout, expiry, or failed refresh).
    Logout,
    /// The cached user record changed after a profile update.
    ProfileUpdated(UserRecord),
}
