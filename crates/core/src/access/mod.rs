//! Role-based access control primitives.

mod permissions;

pub use permissions::{Permission, role_permissions};
