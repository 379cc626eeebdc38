use serde::{Deserialize, Serialize};

use crate::types::Role;

/// Dashboard capabilities gated by role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    ViewDashboard,
    ViewThreats,
    SubmitIocs,
    EditIocs,
    DeleteIocs,
    ViewAnalytics,
    ExportData,
    ManageUsers,
    ViewBlockchain,
    AiAnalysis,
}

impl Permission {
    /// Wire/display name, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::ViewDashboard => "view_dashboard",
            Permission::ViewThreats => "view_threats",
            Permission::SubmitIocs => "submit_iocs",
            Permission::EditIocs => "edit_iocs",
            Permission::DeleteIocs => "delete_iocs",
            Permission::ViewAnalytics => "view_analytics",
            Permission::ExportData => "export_data",
            Permission::ManageUsers => "manage_users",
            Permission::ViewBlockchain => "view_blockchain",
            Permission::AiAnalysis => "ai_analysis",
        }
    }
}

/// Fixed role→permission mapping. Not persisted, not configurable.
pub fn role_permissions(role: Role) -> &'static [Permission] {
    use Permission::*;
    match role {
        Role::Admin => &[
            ViewDashboard,
            ViewThreats,
            SubmitIocs,
            EditIocs,
            DeleteIocs,
            ViewAnalytics,
            ExportData,
            ManageUsers,
            ViewBlockchain,
            AiAnalysis,
        ],
        Role::Analyst => &[
            ViewDashboard,
            ViewThreats,
            SubmitIocs,
            EditIocs,
            ViewAnalytics,
            ExportData,
            ViewBlockchain,
            AiAnalysis,
        ],
        Role::User => &[ViewDashboard, ViewThreats, SubmitIocs, ViewBlockchain],
        Role::Student => &[ViewDashboard, ViewThreats, ViewBlockchain],
        Role::Assistant => &[ViewDashboard, ViewThreats, SubmitIocs, AiAnalysis],
        Role::Unknown => &[],
    }
}

impl Role {
    /// Permissions granted to this role.
    pub fn permissions(self) -> &'static [Permission] {
        role_permissions(self)
    }
}
