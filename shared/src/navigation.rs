//! Navigation tree and permission-based visibility
//!
//! An item is visible when it requires nothing or when the role holds at
//! least one of its required permissions. Children are filtered with the same
//! rule, but a visible parent stays visible even if none of its children do.

use serde::{Deserialize, Serialize};

use crate::rbac::{Permission, Role};

/// One entry of the navigation tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationItem {
    pub name: String,
    pub path: String,
    /// OR semantics; empty means always visible
    #[serde(default)]
    pub required_permissions: Vec<Permission>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<NavigationItem>>,
}

impl NavigationItem {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            required_permissions: Vec::new(),
            children: None,
        }
    }

    pub fn requires(mut self, permissions: &[Permission]) -> Self {
        self.required_permissions = permissions.to_vec();
        self
    }

    pub fn with_children(mut self, children: Vec<NavigationItem>) -> Self {
        self.children = Some(children);
        self
    }

    /// Whether `role` passes this item's own gate (children are not consulted)
    pub fn is_visible_to(&self, role: Role) -> bool {
        self.required_permissions.is_empty() || role.has_any_permission(&self.required_permissions)
    }
}

/// Filter `tree` down to what `role` may see
///
/// Order is preserved and the input is left untouched.
pub fn visible_navigation(tree: &[NavigationItem], role: Role) -> Vec<NavigationItem> {
    tree.iter()
        .filter(|item| item.is_visible_to(role))
        .map(|item| NavigationItem {
            name: item.name.clone(),
            path: item.path.clone(),
            required_permissions: item.required_permissions.clone(),
            children: item
                .children
                .as_ref()
                .map(|children| visible_navigation(children, role)),
        })
        .collect()
}

/// Filter `tree` for a role given by wire id
///
/// Unknown roles hold no permissions, so only ungated items survive.
pub fn visible_navigation_for(tree: &[NavigationItem], role: &str) -> Vec<NavigationItem> {
    match Role::from_id(role) {
        Some(role) => visible_navigation(tree, role),
        None => ungated_only(tree),
    }
}

fn ungated_only(tree: &[NavigationItem]) -> Vec<NavigationItem> {
    tree.iter()
        .filter(|item| item.required_permissions.is_empty())
        .map(|item| NavigationItem {
            children: item.children.as_ref().map(|c| ungated_only(c)),
            ..item.clone()
        })
        .collect()
}

/// Depth-first lookup by path
pub fn find_by_path<'a>(tree: &'a [NavigationItem], path: &str) -> Option<&'a NavigationItem> {
    for item in tree {
        if item.path == path {
            return Some(item);
        }
        if let Some(found) = item.children.as_deref().and_then(|c| find_by_path(c, path)) {
            return Some(found);
        }
    }
    None
}

/// Navigation tree shipped with the portal
pub fn default_navigation() -> Vec<NavigationItem> {
    use Permission::*;

    vec![
        NavigationItem::new("Dashboard", "/dashboard").requires(&[ViewDashboard]),
        NavigationItem::new("Access Requests", "/access-requests")
            .requires(&[ViewAccessRequests, ViewAllAccessRequests])
            .with_children(vec![
                NavigationItem::new("My Requests", "/access-requests/mine")
                    .requires(&[ViewAccessRequests]),
                NavigationItem::new("New Request", "/access-requests/new")
                    .requires(&[CreateAccessRequest]),
                NavigationItem::new("All Requests", "/access-requests/all")
                    .requires(&[ViewAllAccessRequests]),
                NavigationItem::new("Bulk Access", "/access-requests/bulk")
                    .requires(&[SubmitBulkAccess, ApproveBulkAccess]),
            ]),
        NavigationItem::new("Approvals", "/approvals")
            .requires(&[ApproveAccessRequest, RejectAccessRequest, ApproveBulkAccess]),
        NavigationItem::new("Firefighter", "/firefighter")
            .requires(&[
                RequestFirefighterAccess,
                ApproveFirefighterAccess,
                ViewFirefighterLogs,
                ManageFirefighterIds,
            ])
            .with_children(vec![
                NavigationItem::new("Request Emergency Access", "/firefighter/request")
                    .requires(&[RequestFirefighterAccess]),
                NavigationItem::new("Firefighter Approvals", "/firefighter/approvals")
                    .requires(&[ApproveFirefighterAccess]),
                NavigationItem::new("Session Logs", "/firefighter/logs")
                    .requires(&[ViewFirefighterLogs]),
                NavigationItem::new("Firefighter IDs", "/firefighter/ids")
                    .requires(&[ManageFirefighterIds]),
            ]),
        NavigationItem::new("Roles", "/roles").requires(&[ViewRoles]),
        NavigationItem::new("Risk Analysis", "/risk").requires(&[ViewRiskAnalysis]),
        NavigationItem::new("SoD Rules", "/sod-rules").requires(&[ViewSodRules]),
        NavigationItem::new("Certifications", "/certifications").requires(&[
            ViewCertifications,
            ManageCertifications,
            CompleteCertification,
        ]),
        NavigationItem::new("Entitlement Intelligence", "/entitlements")
            .requires(&[ViewEntitlementIntelligence]),
        NavigationItem::new("Security Controls", "/security-controls")
            .requires(&[ViewSecurityControls]),
        NavigationItem::new("Compliance", "/compliance").requires(&[ViewCompliance]),
        NavigationItem::new("Contextual Risk", "/contextual-risk")
            .requires(&[ViewContextualRisk]),
        NavigationItem::new("Policies", "/policies").requires(&[ViewPolicies]),
        NavigationItem::new("Live Sessions", "/live-sessions").requires(&[ViewLiveSessions]),
        NavigationItem::new("Reports", "/reports").requires(&[ViewReports]),
        NavigationItem::new("Audit Logs", "/audit").requires(&[ViewAuditLogs]),
        NavigationItem::new("Administration", "/admin").with_children(vec![
            NavigationItem::new("Users", "/admin/users").requires(&[ManageUsers]),
            NavigationItem::new("Workflows", "/admin/workflows")
                .requires(&[ViewWorkflows, ManageWorkflows]),
            NavigationItem::new("Request Forms", "/admin/forms").requires(&[ManageFormConfig]),
            NavigationItem::new("System Configuration", "/admin/system")
                .requires(&[ManageSystemConfig]),
        ]),
        NavigationItem::new("Settings", "/settings").requires(&[ViewSettings]),
        NavigationItem::new("Help", "/help"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(items: &[NavigationItem]) -> Vec<&str> {
        items.iter().map(|i| i.name.as_str()).collect()
    }

    #[test]
    fn test_full_access_role_sees_full_tree() {
        let tree = default_navigation();
        assert_eq!(visible_navigation(&tree, Role::SystemAdmin), tree);
    }

    #[test]
    fn test_end_user_does_not_see_roles() {
        let visible = visible_navigation(&default_navigation(), Role::EndUser);
        assert!(find_by_path(&visible, "/roles").is_none());
        assert!(!names(&visible).contains(&"Roles"));
    }

    #[test]
    fn test_ungated_parent_kept_with_empty_children() {
        let visible = visible_navigation(&default_navigation(), Role::EndUser);
        let admin = find_by_path(&visible, "/admin").unwrap();
        assert_eq!(admin.children.as_deref(), Some(&[][..]));
    }

    #[test]
    fn test_gated_parent_drops_its_subtree() {
        let tree = vec![
            NavigationItem::new("Roles", "/roles")
                .requires(&[Permission::ViewRoles])
                .with_children(vec![NavigationItem::new("Overview", "/roles/overview")]),
        ];
        assert!(visible_navigation(&tree, Role::EndUser).is_empty());
    }

    #[test]
    fn test_or_semantics_on_required_permissions() {
        let tree = vec![
            NavigationItem::new("Approvals", "/approvals")
                .requires(&[Permission::ManageSystemConfig, Permission::ApproveAccessRequest]),
        ];
        assert_eq!(visible_navigation(&tree, Role::Manager).len(), 1);
    }

    #[test]
    fn test_order_preserved_and_input_untouched() {
        let tree = default_navigation();
        let before = tree.clone();
        let visible = visible_navigation(&tree, Role::Auditor);
        assert_eq!(tree, before);

        let positions: Vec<usize> = visible
            .iter()
            .map(|v| tree.iter().position(|t| t.path == v.path).unwrap())
            .collect();
        let mut sorted = positions.clone();
        sorted.sort();
        assert_eq!(positions, sorted);
    }

    #[test]
    fn test_manager_children_filtered() {
        let visible = visible_navigation(&default_navigation(), Role::Manager);
        let requests = find_by_path(&visible, "/access-requests").unwrap();
        assert_eq!(
            names(requests.children.as_deref().unwrap()),
            vec!["My Requests", "New Request", "All Requests", "Bulk Access"]
        );
        let firefighter = find_by_path(&visible, "/firefighter").unwrap();
        assert_eq!(
            names(firefighter.children.as_deref().unwrap()),
            vec!["Request Emergency Access"]
        );
    }

    #[test]
    fn test_unknown_role_keeps_only_ungated_items() {
        let visible = visible_navigation_for(&default_navigation(), "intern");
        assert_eq!(names(&visible), vec!["Administration", "Help"]);
        let admin = find_by_path(&visible, "/admin").unwrap();
        assert_eq!(admin.children.as_deref(), Some(&[][..]));
    }

    #[test]
    fn test_leaf_without_children_stays_leaf() {
        let visible = visible_navigation(&default_navigation(), Role::EndUser);
        let help = find_by_path(&visible, "/help").unwrap();
        assert!(help.children.is_none());
    }
}
