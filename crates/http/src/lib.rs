//! Argus HTTP module: typed client for the remote auth API.
//!
//! The session manager never talks to the network directly; everything goes
//! through [`client::AuthClient`], which owns the base endpoint and maps
//! HTTP failures into [`client::error::ClientError`].

pub mod client;
pub mod types;

pub use client::{AuthClient, error::ClientError};
