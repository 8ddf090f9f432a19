//! Permission Resolver
//!
//! String-keyed entry points for callers that only hold a role id (for
//! example a role read back from storage or a server payload). Unknown role
//! ids resolve to "no access"; nothing here returns an error or panics.

use std::collections::{BTreeMap, BTreeSet};

use super::permission::{Permission, PermissionArea};
use super::role::Role;

/// Check whether the role named `role` holds `permission`
///
/// Returns `false` for role ids outside the catalog.
pub fn has_permission(role: &str, permission: Permission) -> bool {
    Role::from_id(role).is_some_and(|r| r.has_permission(permission))
}

/// Permission set of the role named `role` (empty for unknown roles)
pub fn get_permissions(role: &str) -> BTreeSet<Permission> {
    Role::from_id(role)
        .map(|r| r.permissions().iter().copied().collect())
        .unwrap_or_default()
}

/// Check a permission given by wire id
///
/// Unknown permission ids resolve to `false` like unknown roles do.
pub fn has_permission_id(role: &str, permission: &str) -> bool {
    Permission::from_id(permission).is_some_and(|p| has_permission(role, p))
}

/// Group a role's permissions by functional area
///
/// Areas without any held permission are omitted.
pub fn permissions_by_area(role: Role) -> BTreeMap<PermissionArea, Vec<Permission>> {
    let mut grouped: BTreeMap<PermissionArea, Vec<Permission>> = BTreeMap::new();
    for permission in role.permissions() {
        grouped.entry(permission.area()).or_default().push(*permission);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manager_scenario() {
        assert!(has_permission("manager", Permission::ApproveAccessRequest));
        assert!(!has_permission("manager", Permission::ManageSystemConfig));
    }

    #[test]
    fn test_absent_permissions_are_denied() {
        for role in Role::ALL {
            for permission in Permission::ALL {
                if !role.permissions().contains(permission) {
                    assert!(!has_permission(role.as_str(), *permission));
                }
            }
        }
    }

    #[test]
    fn test_unknown_role_has_no_access() {
        for permission in Permission::ALL {
            assert!(!has_permission("ghost", *permission));
            assert!(!has_permission("", *permission));
        }
        assert!(get_permissions("ghost").is_empty());
    }

    #[test]
    fn test_get_permissions_subset_of_catalog() {
        let catalog: BTreeSet<Permission> = Permission::ALL.iter().copied().collect();
        for role in Role::ALL {
            let permissions = get_permissions(role.as_str());
            assert!(permissions.is_subset(&catalog));
            assert_eq!(permissions.len(), role.permissions().len());
        }
    }

    #[test]
    fn test_string_keyed_permission() {
        assert!(has_permission_id("auditor", "view_audit_logs"));
        assert!(!has_permission_id("auditor", "delete_role"));
        assert!(!has_permission_id("auditor", "view_everything"));
    }

    #[test]
    fn test_permissions_by_area() {
        let grouped = permissions_by_area(Role::Auditor);
        assert_eq!(
            grouped.get(&PermissionArea::Audit),
            Some(&vec![Permission::ViewAuditLogs, Permission::ExportAuditLogs])
        );
        assert!(!grouped.contains_key(&PermissionArea::Settings));
        let total: usize = grouped.values().map(Vec::len).sum();
        assert_eq!(total, Role::Auditor.permissions().len());
    }
}
