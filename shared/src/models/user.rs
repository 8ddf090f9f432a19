//! Session user model

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::client::UserInfo;
use crate::rbac::{Permission, Role, UnknownRole};

/// Authenticated portal user
///
/// The permission set is never stored; it is always derived from `role`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub department: String,
    pub role: Role,
}

impl User {
    pub fn permissions(&self) -> BTreeSet<Permission> {
        self.role.permissions().iter().copied().collect()
    }

    pub fn has_permission(&self, permission: Permission) -> bool {
        self.role.has_permission(permission)
    }
}

impl TryFrom<UserInfo> for User {
    type Error = UnknownRole;

    fn try_from(info: UserInfo) -> Result<Self, Self::Error> {
        let role = info.role.parse::<Role>()?;
        Ok(Self {
            id: info.id,
            name: info.name,
            email: info.email,
            department: info.department,
            role,
        })
    }
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            role: user.role.as_str().to_string(),
            name: user.name.clone(),
            email: user.email.clone(),
            department: user.department.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(role: &str) -> UserInfo {
        UserInfo {
            id: "u-42".to_string(),
            role: role.to_string(),
            name: "Robin Ortega".to_string(),
            email: "robin@corp.example".to_string(),
            department: "Finance".to_string(),
        }
    }

    #[test]
    fn test_user_from_known_role() {
        let user = User::try_from(info("auditor")).unwrap();
        assert_eq!(user.role, Role::Auditor);
        assert!(user.has_permission(Permission::ViewAuditLogs));
        assert_eq!(user.permissions().len(), Role::Auditor.permissions().len());
        assert_eq!(UserInfo::from(&user), info("auditor"));
    }

    #[test]
    fn test_user_from_unknown_role_is_rejected() {
        let err = User::try_from(info("root")).unwrap_err();
        assert_eq!(err, UnknownRole("root".to_string()));
    }
}
