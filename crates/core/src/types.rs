use serde::{Deserialize, Serialize};

/// Account role assigned by the auth backend.
///
/// Roles arrive as plain strings on the wire; anything outside the known set
/// deserializes to [`Role::Unknown`] rather than failing, and maps to an
/// empty permission set.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Analyst,
    User,
    Student,
    Assistant,
    #[serde(other)]
    Unknown,
}

/// User record as returned by the auth backend and cached by the session
/// layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserRecord {
    pub id: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub role: Role,
}
