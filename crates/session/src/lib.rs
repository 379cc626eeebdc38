//! Argus session manager
//!
//! Owns the client-side token lifecycle: which storage scope holds the
//! credential bundle, when the access token is renewed, how repeated login
//! failures lock the account, and which lifecycle events UI collaborators
//! see. The remote auth API is reached through [`argus_http::AuthClient`];
//! host storage comes in through the traits in [`argus_core::storage`].
//!
//! Construct one [`SessionManager`] per application and hand it to consumers
//! explicitly; there is no ambient global instance.

pub mod config;
pub mod error;
pub mod lockout;
pub mod manager;
pub mod navigator;

pub use config::{SessionConfig, keys};
pub use error::SessionError;
pub use manager::SessionManager;
pub use navigator::{Navigator, NoopNavigator};
