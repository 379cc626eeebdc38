//! Navigation collaborator.
//!
//! Logout ends by sending the user to the login surface. Routing is a host
//! concern, so it comes in behind a trait; hosts with no routing (tests,
//! headless tools) use [`NoopNavigator`].

/// Redirects the user agent after session teardown.
pub trait Navigator: Send + Sync {
    /// Take the user to the login surface.
    fn to_login(&self);
}

/// Navigator that goes nowhere.
#[derive(Debug, Default)]
pub struct NoopNavigator;

impl Navigator for NoopNavigator {
    fn to_login(&self) {}
}
