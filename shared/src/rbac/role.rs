//! Role Catalog
//!
//! Each role lists its permissions explicitly. There is no inheritance
//! between roles; widening one role never widens another.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::permission::Permission;
use super::permission::Permission::*;

/// Portal role (exactly one per user)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    EndUser,
    Manager,
    RoleOwner,
    SecurityAdmin,
    ComplianceOfficer,
    Auditor,
    FirefighterController,
    SystemAdmin,
}

const END_USER_PERMISSIONS: &[Permission] = &[
    ViewDashboard,
    ViewAccessRequests,
    CreateAccessRequest,
    CancelAccessRequest,
    RequestFirefighterAccess,
    ViewCertifications,
];

const MANAGER_PERMISSIONS: &[Permission] = &[
    ViewDashboard,
    ViewAccessRequests,
    ViewAllAccessRequests,
    CreateAccessRequest,
    CancelAccessRequest,
    ApproveAccessRequest,
    RejectAccessRequest,
    RequestFirefighterAccess,
    ViewRiskAnalysis,
    ViewCertifications,
    CompleteCertification,
    ViewReports,
    SubmitBulkAccess,
];

const ROLE_OWNER_PERMISSIONS: &[Permission] = &[
    ViewDashboard,
    ViewAccessRequests,
    CreateAccessRequest,
    ApproveAccessRequest,
    RejectAccessRequest,
    ViewRoles,
    CreateRole,
    EditRole,
    ViewRiskAnalysis,
    RunRiskAnalysis,
    ViewSodRules,
    ViewCertifications,
    CompleteCertification,
    ViewEntitlementIntelligence,
    ViewReports,
];

const SECURITY_ADMIN_PERMISSIONS: &[Permission] = &[
    ViewDashboard,
    ViewAccessRequests,
    ViewAllAccessRequests,
    ApproveAccessRequest,
    RejectAccessRequest,
    ViewRoles,
    CreateRole,
    EditRole,
    DeleteRole,
    ViewRiskAnalysis,
    RunRiskAnalysis,
    ManageMitigations,
    ViewSodRules,
    ManageSodRules,
    ApproveFirefighterAccess,
    ViewFirefighterLogs,
    ManageFirefighterIds,
    SubmitBulkAccess,
    ApproveBulkAccess,
    ViewEntitlementIntelligence,
    ManageEntitlementIntelligence,
    ViewSecurityControls,
    EvaluateSecurityControls,
    ViewContextualRisk,
    ManageContextualRisk,
    ViewPolicies,
    CreatePolicy,
    EditPolicy,
    DeployPolicy,
    ViewLiveSessions,
    TerminateLiveSession,
    ViewAuditLogs,
    ViewReports,
    ExportReports,
];

const COMPLIANCE_OFFICER_PERMISSIONS: &[Permission] = &[
    ViewDashboard,
    ViewAccessRequests,
    ViewAllAccessRequests,
    ViewRiskAnalysis,
    RunRiskAnalysis,
    ViewSodRules,
    ManageSodRules,
    ViewCertifications,
    ManageCertifications,
    CompleteCertification,
    ViewCompliance,
    ManageComplianceFrameworks,
    ViewSecurityControls,
    EvaluateSecurityControls,
    ViewContextualRisk,
    ViewPolicies,
    ViewReports,
    ExportReports,
    ViewAuditLogs,
    ExportAuditLogs,
];

const AUDITOR_PERMISSIONS: &[Permission] = &[
    ViewDashboard,
    ViewAccessRequests,
    ViewAllAccessRequests,
    ViewRoles,
    ViewRiskAnalysis,
    ViewSodRules,
    ViewCertifications,
    ViewFirefighterLogs,
    ViewCompliance,
    ViewSecurityControls,
    ViewContextualRisk,
    ViewPolicies,
    ViewLiveSessions,
    ViewReports,
    ExportReports,
    ViewAuditLogs,
    ExportAuditLogs,
];

const FIREFIGHTER_CONTROLLER_PERMISSIONS: &[Permission] = &[
    ViewDashboard,
    ViewAccessRequests,
    RequestFirefighterAccess,
    ApproveFirefighterAccess,
    ViewFirefighterLogs,
    ManageFirefighterIds,
    ViewLiveSessions,
    TerminateLiveSession,
    ViewAuditLogs,
    ViewReports,
];

impl Role {
    /// All roles, in display order
    pub const ALL: &'static [Role] = &[
        Role::EndUser,
        Role::Manager,
        Role::RoleOwner,
        Role::SecurityAdmin,
        Role::ComplianceOfficer,
        Role::Auditor,
        Role::FirefighterController,
        Role::SystemAdmin,
    ];

    /// Wire id, identical to the serde representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::EndUser => "end_user",
            Self::Manager => "manager",
            Self::RoleOwner => "role_owner",
            Self::SecurityAdmin => "security_admin",
            Self::ComplianceOfficer => "compliance_officer",
            Self::Auditor => "auditor",
            Self::FirefighterController => "firefighter_controller",
            Self::SystemAdmin => "system_admin",
        }
    }

    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::EndUser => "End User",
            Self::Manager => "Manager",
            Self::RoleOwner => "Role Owner",
            Self::SecurityAdmin => "Security Administrator",
            Self::ComplianceOfficer => "Compliance Officer",
            Self::Auditor => "Auditor",
            Self::FirefighterController => "Firefighter Controller",
            Self::SystemAdmin => "System Administrator",
        }
    }

    pub const fn description(&self) -> &'static str {
        match self {
            Self::EndUser => "Requests access for themselves and tracks their own requests",
            Self::Manager => "Approves access for direct reports and reviews team certifications",
            Self::RoleOwner => "Maintains business roles and approves assignments to owned roles",
            Self::SecurityAdmin => {
                "Administers roles, SoD rules, policies and emergency access"
            }
            Self::ComplianceOfficer => {
                "Runs certification campaigns and control evaluations against frameworks"
            }
            Self::Auditor => "Read-only access to requests, logs, controls and reports",
            Self::FirefighterController => {
                "Grants and monitors emergency privileged access sessions"
            }
            Self::SystemAdmin => "Full access including system and form configuration",
        }
    }

    /// Explicit permission list of this role
    pub const fn permissions(&self) -> &'static [Permission] {
        match self {
            Self::EndUser => END_USER_PERMISSIONS,
            Self::Manager => MANAGER_PERMISSIONS,
            Self::RoleOwner => ROLE_OWNER_PERMISSIONS,
            Self::SecurityAdmin => SECURITY_ADMIN_PERMISSIONS,
            Self::ComplianceOfficer => COMPLIANCE_OFFICER_PERMISSIONS,
            Self::Auditor => AUDITOR_PERMISSIONS,
            Self::FirefighterController => FIREFIGHTER_CONTROLLER_PERMISSIONS,
            Self::SystemAdmin => Permission::ALL,
        }
    }

    pub fn has_permission(&self, permission: Permission) -> bool {
        self.permissions().contains(&permission)
    }

    /// True if the role holds at least one of `permissions`
    pub fn has_any_permission(&self, permissions: &[Permission]) -> bool {
        permissions.iter().any(|p| self.has_permission(*p))
    }

    /// True if the role holds every one of `permissions`
    pub fn has_all_permissions(&self, permissions: &[Permission]) -> bool {
        permissions.iter().all(|p| self.has_permission(*p))
    }

    /// Look up a role by wire id
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|r| r.as_str() == id)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name a catalog role
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_id(s).ok_or_else(|| UnknownRole(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rbac::Permission::*;
    use std::collections::HashSet;

    #[test]
    fn test_role_ids_match_serde_representation() {
        for role in Role::ALL {
            let json = serde_json::to_string(role).unwrap();
            assert_eq!(json, format!("\"{}\"", role.as_str()));
            assert_eq!(role.as_str().parse::<Role>(), Ok(*role));
        }
    }

    #[test]
    fn test_role_catalog_lists_every_variant() {
        let err = serde_json::from_str::<Role>("\"__no_such_role__\"")
            .unwrap_err()
            .to_string();
        let (_, expected) = err.split_once("expected one of ").unwrap();
        let declared: HashSet<&str> = expected.split('`').skip(1).step_by(2).collect();
        let listed: HashSet<&str> = Role::ALL.iter().map(|r| r.as_str()).collect();
        assert_eq!(listed, declared);
    }

    #[test]
    fn test_role_permission_lists_have_no_duplicates() {
        for role in Role::ALL {
            let unique: HashSet<_> = role.permissions().iter().collect();
            assert_eq!(unique.len(), role.permissions().len(), "{}", role);
        }
    }

    #[test]
    fn test_role_permissions_are_in_catalog() {
        for role in Role::ALL {
            for permission in role.permissions() {
                assert!(Permission::ALL.contains(permission), "{} -> {}", role, permission);
            }
        }
    }

    #[test]
    fn test_system_admin_holds_full_catalog() {
        for permission in Permission::ALL {
            assert!(Role::SystemAdmin.has_permission(*permission));
        }
    }

    #[test]
    fn test_any_and_all() {
        let manager = Role::Manager;
        assert!(manager.has_any_permission(&[ManageSystemConfig, ApproveAccessRequest]));
        assert!(!manager.has_all_permissions(&[ManageSystemConfig, ApproveAccessRequest]));
        assert!(manager.has_all_permissions(&[ViewDashboard, ApproveAccessRequest]));
        assert!(!manager.has_any_permission(&[]));
        assert!(manager.has_all_permissions(&[]));
    }

    #[test]
    fn test_unknown_role_parse() {
        assert_eq!(
            "superuser".parse::<Role>(),
            Err(UnknownRole("superuser".to_string()))
        );
    }
}
