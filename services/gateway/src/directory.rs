//! Operator directory and role-permission table
//!
//! Admin access is deliberately decoupled from the identity provider: the
//! operator map is injected through configuration and checked locally, so
//! the admin surface stays available when the hosted backend is
//! misconfigured. Roles map to permission sets through a static table.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminRole {
    SuperAdmin,
    Moderator,
    Support,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    ManageUsers,
    ViewTransactions,
    ViewAntiCheat,
    AdjustCredits,
    ProcessRefunds,
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Permission::ManageUsers => "manage_users",
            Permission::ViewTransactions => "view_transactions",
            Permission::ViewAntiCheat => "view_anti_cheat",
            Permission::AdjustCredits => "adjust_credits",
            Permission::ProcessRefunds => "process_refunds",
        };
        write!(f, "{}", label)
    }
}

impl AdminRole {
    /// Static role-to-permission table
    pub fn permissions(&self) -> &'static [Permission] {
        match self {
            AdminRole::SuperAdmin => &[
                Permission::ManageUsers,
                Permission::ViewTransactions,
                Permission::ViewAntiCheat,
                Permission::AdjustCredits,
                Permission::ProcessRefunds,
            ],
            AdminRole::Moderator => &[
                Permission::ManageUsers,
                Permission::ViewTransactions,
                Permission::ViewAntiCheat,
            ],
            AdminRole::Support => &[Permission::ViewTransactions, Permission::ProcessRefunds],
        }
    }

    pub fn allows(&self, permission: Permission) -> bool {
        self.permissions().contains(&permission)
    }
}

/// One configured operator: access key plus role
#[derive(Debug, Clone, Deserialize)]
pub struct AdminOperator {
    pub key: String,
    pub role: AdminRole,
}

/// An authenticated operator attached to an admin request
#[derive(Debug, Clone, Serialize)]
pub struct AdminIdentity {
    pub username: String,
    pub role: AdminRole,
}

/// The injected operator allowlist
#[derive(Debug, Clone, Default)]
pub struct AdminDirectory {
    operators: HashMap<String, AdminOperator>,
}

impl AdminDirectory {
    pub fn new(operators: HashMap<String, AdminOperator>) -> Self {
        Self { operators }
    }

    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }

    /// Validate operator credentials against the injected map
    pub fn authenticate(&self, username: &str, key: &str) -> Option<AdminIdentity> {
        self.operators
            .get(username)
            .filter(|operator| operator.key == key)
            .map(|operator| AdminIdentity {
                username: username.to_string(),
                role: operator.role,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory() -> AdminDirectory {
        let mut operators = HashMap::new();
        operators.insert(
            "root".to_string(),
            AdminOperator {
                key: "rootkey".to_string(),
                role: AdminRole::SuperAdmin,
            },
        );
        operators.insert(
            "helpdesk".to_string(),
            AdminOperator {
                key: "deskkey".to_string(),
                role: AdminRole::Support,
            },
        );
        AdminDirectory::new(operators)
    }

    #[test]
    fn test_authenticate_known_operator() {
        let identity = directory().authenticate("root", "rootkey").unwrap();
        assert_eq!(identity.role, AdminRole::SuperAdmin);
        assert_eq!(identity.username, "root");
    }

    #[test]
    fn test_authenticate_rejects_bad_key() {
        assert!(directory().authenticate("root", "wrong").is_none());
        assert!(directory().authenticate("nobody", "rootkey").is_none());
    }

    #[test]
    fn test_role_permission_table() {
        assert!(AdminRole::SuperAdmin.allows(Permission::AdjustCredits));
        assert!(AdminRole::Moderator.allows(Permission::ViewAntiCheat));
        assert!(!AdminRole::Moderator.allows(Permission::ProcessRefunds));
        assert!(AdminRole::Support.allows(Permission::ProcessRefunds));
        assert!(!AdminRole::Support.allows(Permission::ManageUsers));
    }

    #[test]
    fn test_empty_directory_rejects_everyone() {
        let directory = AdminDirectory::default();
        assert!(directory.is_empty());
        assert!(directory.authenticate("root", "rootkey").is_none());
    }
}
