//! Argus core types and abstractions
//!
//! Shared foundation for the Argus session layer: the user/role model, the
//! fixed role→permission table, the host storage abstraction (persistent and
//! session scopes plus the legacy cookie mirror), and session lifecycle
//! events.

pub mod access;
pub mod events;
pub mod storage;
pub mod types;

pub use access::{Permission, role_permissions};
pub use events::SessionEvent;
pub use storage::{CookieStore, KeyValueStore, MemoryCookieStore, MemoryStore};
pub use types::{Role, UserRecord};
