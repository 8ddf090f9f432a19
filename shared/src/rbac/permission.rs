//! Permission Catalog
//!
//! Closed set of permissions known to the portal, grouped by functional area.
//! String ids only exist at the wire/storage edge; everything inside the
//! workspace works with [`Permission`] values.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Functional area a permission belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionArea {
    Dashboard,
    AccessRequests,
    Risk,
    Roles,
    Certification,
    Firefighter,
    Reports,
    Audit,
    Settings,
    WorkflowAdmin,
    BulkAccess,
    SodRules,
    EntitlementIntelligence,
    Compliance,
    ContextualRisk,
    Policies,
    LiveSessions,
}

impl PermissionArea {
    /// All areas, in display order
    pub const ALL: &'static [PermissionArea] = &[
        PermissionArea::Dashboard,
        PermissionArea::AccessRequests,
        PermissionArea::Risk,
        PermissionArea::Roles,
        PermissionArea::Certification,
        PermissionArea::Firefighter,
        PermissionArea::Reports,
        PermissionArea::Audit,
        PermissionArea::Settings,
        PermissionArea::WorkflowAdmin,
        PermissionArea::BulkAccess,
        PermissionArea::SodRules,
        PermissionArea::EntitlementIntelligence,
        PermissionArea::Compliance,
        PermissionArea::ContextualRisk,
        PermissionArea::Policies,
        PermissionArea::LiveSessions,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::AccessRequests => "Access Requests",
            Self::Risk => "Risk Analysis",
            Self::Roles => "Roles",
            Self::Certification => "Access Certification",
            Self::Firefighter => "Firefighter Access",
            Self::Reports => "Reports",
            Self::Audit => "Audit",
            Self::Settings => "Settings",
            Self::WorkflowAdmin => "Workflow Administration",
            Self::BulkAccess => "Bulk Access",
            Self::SodRules => "SoD Rules",
            Self::EntitlementIntelligence => "Entitlement Intelligence",
            Self::Compliance => "Compliance",
            Self::ContextualRisk => "Contextual Risk",
            Self::Policies => "Policies",
            Self::LiveSessions => "Live Sessions",
        }
    }
}

/// A single named capability
///
/// Serialized as its snake_case id, e.g. `"approve_access_request"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    // === Dashboard ===
    ViewDashboard,

    // === Access requests ===
    ViewAccessRequests,
    ViewAllAccessRequests,
    CreateAccessRequest,
    CancelAccessRequest,
    ApproveAccessRequest,
    RejectAccessRequest,

    // === Risk ===
    ViewRiskAnalysis,
    RunRiskAnalysis,
    ManageMitigations,

    // === Roles ===
    ViewRoles,
    CreateRole,
    EditRole,
    DeleteRole,

    // === Certification ===
    ViewCertifications,
    ManageCertifications,
    CompleteCertification,

    // === Firefighter ===
    RequestFirefighterAccess,
    ApproveFirefighterAccess,
    ViewFirefighterLogs,
    ManageFirefighterIds,

    // === Reports ===
    ViewReports,
    ExportReports,

    // === Audit ===
    ViewAuditLogs,
    ExportAuditLogs,

    // === Settings ===
    ViewSettings,
    ManageUsers,
    ManageFormConfig,
    ManageSystemConfig,

    // === Workflow admin ===
    ViewWorkflows,
    ManageWorkflows,

    // === Bulk access ===
    SubmitBulkAccess,
    ApproveBulkAccess,

    // === SoD rules ===
    ViewSodRules,
    ManageSodRules,

    // === Entitlement intelligence ===
    ViewEntitlementIntelligence,
    ManageEntitlementIntelligence,

    // === Compliance ===
    ViewCompliance,
    ManageComplianceFrameworks,
    ViewSecurityControls,
    EvaluateSecurityControls,

    // === Contextual risk ===
    ViewContextualRisk,
    ManageContextualRisk,

    // === Policies ===
    ViewPolicies,
    CreatePolicy,
    EditPolicy,
    DeletePolicy,
    DeployPolicy,

    // === Live sessions ===
    ViewLiveSessions,
    TerminateLiveSession,
}

impl Permission {
    /// Every permission in the catalog, in declaration order
    pub const ALL: &'static [Permission] = &[
        Permission::ViewDashboard,
        Permission::ViewAccessRequests,
        Permission::ViewAllAccessRequests,
        Permission::CreateAccessRequest,
        Permission::CancelAccessRequest,
        Permission::ApproveAccessRequest,
        Permission::RejectAccessRequest,
        Permission::ViewRiskAnalysis,
        Permission::RunRiskAnalysis,
        Permission::ManageMitigations,
        Permission::ViewRoles,
        Permission::CreateRole,
        Permission::EditRole,
        Permission::DeleteRole,
        Permission::ViewCertifications,
        Permission::ManageCertifications,
        Permission::CompleteCertification,
        Permission::RequestFirefighterAccess,
        Permission::ApproveFirefighterAccess,
        Permission::ViewFirefighterLogs,
        Permission::ManageFirefighterIds,
        Permission::ViewReports,
        Permission::ExportReports,
        Permission::ViewAuditLogs,
        Permission::ExportAuditLogs,
        Permission::ViewSettings,
        Permission::ManageUsers,
        Permission::ManageFormConfig,
        Permission::ManageSystemConfig,
        Permission::ViewWorkflows,
        Permission::ManageWorkflows,
        Permission::SubmitBulkAccess,
        Permission::ApproveBulkAccess,
        Permission::ViewSodRules,
        Permission::ManageSodRules,
        Permission::ViewEntitlementIntelligence,
        Permission::ManageEntitlementIntelligence,
        Permission::ViewCompliance,
        Permission::ManageComplianceFrameworks,
        Permission::ViewSecurityControls,
        Permission::EvaluateSecurityControls,
        Permission::ViewContextualRisk,
        Permission::ManageContextualRisk,
        Permission::ViewPolicies,
        Permission::CreatePolicy,
        Permission::EditPolicy,
        Permission::DeletePolicy,
        Permission::DeployPolicy,
        Permission::ViewLiveSessions,
        Permission::TerminateLiveSession,
    ];

    /// Wire id, identical to the serde representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ViewDashboard => "view_dashboard",
            Self::ViewAccessRequests => "view_access_requests",
            Self::ViewAllAccessRequests => "view_all_access_requests",
            Self::CreateAccessRequest => "create_access_request",
            Self::CancelAccessRequest => "cancel_access_request",
            Self::ApproveAccessRequest => "approve_access_request",
            Self::RejectAccessRequest => "reject_access_request",
            Self::ViewRiskAnalysis => "view_risk_analysis",
            Self::RunRiskAnalysis => "run_risk_analysis",
            Self::ManageMitigations => "manage_mitigations",
            Self::ViewRoles => "view_roles",
            Self::CreateRole => "create_role",
            Self::EditRole => "edit_role",
            Self::DeleteRole => "delete_role",
            Self::ViewCertifications => "view_certifications",
            Self::ManageCertifications => "manage_certifications",
            Self::CompleteCertification => "complete_certification",
            Self::RequestFirefighterAccess => "request_firefighter_access",
            Self::ApproveFirefighterAccess => "approve_firefighter_access",
            Self::ViewFirefighterLogs => "view_firefighter_logs",
            Self::ManageFirefighterIds => "manage_firefighter_ids",
            Self::ViewReports => "view_reports",
            Self::ExportReports => "export_reports",
            Self::ViewAuditLogs => "view_audit_logs",
            Self::ExportAuditLogs => "export_audit_logs",
            Self::ViewSettings => "view_settings",
            Self::ManageUsers => "manage_users",
            Self::ManageFormConfig => "manage_form_config",
            Self::ManageSystemConfig => "manage_system_config",
            Self::ViewWorkflows => "view_workflows",
            Self::ManageWorkflows => "manage_workflows",
            Self::SubmitBulkAccess => "submit_bulk_access",
            Self::ApproveBulkAccess => "approve_bulk_access",
            Self::ViewSodRules => "view_sod_rules",
            Self::ManageSodRules => "manage_sod_rules",
            Self::ViewEntitlementIntelligence => "view_entitlement_intelligence",
            Self::ManageEntitlementIntelligence => "manage_entitlement_intelligence",
            Self::ViewCompliance => "view_compliance",
            Self::ManageComplianceFrameworks => "manage_compliance_frameworks",
            Self::ViewSecurityControls => "view_security_controls",
            Self::EvaluateSecurityControls => "evaluate_security_controls",
            Self::ViewContextualRisk => "view_contextual_risk",
            Self::ManageContextualRisk => "manage_contextual_risk",
            Self::ViewPolicies => "view_policies",
            Self::CreatePolicy => "create_policy",
            Self::EditPolicy => "edit_policy",
            Self::DeletePolicy => "delete_policy",
            Self::DeployPolicy => "deploy_policy",
            Self::ViewLiveSessions => "view_live_sessions",
            Self::TerminateLiveSession => "terminate_live_session",
        }
    }

    pub const fn area(&self) -> PermissionArea {
        match self {
            Self::ViewDashboard => PermissionArea::Dashboard,
            Self::ViewAccessRequests
            | Self::ViewAllAccessRequests
            | Self::CreateAccessRequest
            | Self::CancelAccessRequest
            | Self::ApproveAccessRequest
            | Self::RejectAccessRequest => PermissionArea::AccessRequests,
            Self::ViewRiskAnalysis | Self::RunRiskAnalysis | Self::ManageMitigations => {
                PermissionArea::Risk
            }
            Self::ViewRoles | Self::CreateRole | Self::EditRole | Self::DeleteRole => {
                PermissionArea::Roles
            }
            Self::ViewCertifications | Self::ManageCertifications | Self::CompleteCertification => {
                PermissionArea::Certification
            }
            Self::RequestFirefighterAccess
            | Self::ApproveFirefighterAccess
            | Self::ViewFirefighterLogs
            | Self::ManageFirefighterIds => PermissionArea::Firefighter,
            Self::ViewReports | Self::ExportReports => PermissionArea::Reports,
            Self::ViewAuditLogs | Self::ExportAuditLogs => PermissionArea::Audit,
            Self::ViewSettings
            | Self::ManageUsers
            | Self::ManageFormConfig
            | Self::ManageSystemConfig => PermissionArea::Settings,
            Self::ViewWorkflows | Self::ManageWorkflows => PermissionArea::WorkflowAdmin,
            Self::SubmitBulkAccess | Self::ApproveBulkAccess => PermissionArea::BulkAccess,
            Self::ViewSodRules | Self::ManageSodRules => PermissionArea::SodRules,
            Self::ViewEntitlementIntelligence | Self::ManageEntitlementIntelligence => {
                PermissionArea::EntitlementIntelligence
            }
            Self::ViewCompliance
            | Self::ManageComplianceFrameworks
            | Self::ViewSecurityControls
            | Self::EvaluateSecurityControls => PermissionArea::Compliance,
            Self::ViewContextualRisk | Self::ManageContextualRisk => PermissionArea::ContextualRisk,
            Self::ViewPolicies
            | Self::CreatePolicy
            | Self::EditPolicy
            | Self::DeletePolicy
            | Self::DeployPolicy => PermissionArea::Policies,
            Self::ViewLiveSessions | Self::TerminateLiveSession => PermissionArea::LiveSessions,
        }
    }

    /// Look up a permission by wire id
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|p| p.as_str() == id)
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name a catalog permission
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown permission: {0}")]
pub struct UnknownPermission(pub String);

impl FromStr for Permission {
    type Err = UnknownPermission;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_id(s).ok_or_else(|| UnknownPermission(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_match_serde_representation() {
        for permission in Permission::ALL {
            let json = serde_json::to_string(permission).unwrap();
            assert_eq!(json, format!("\"{}\"", permission.as_str()));
        }
    }

    #[test]
    fn test_catalog_has_no_duplicates() {
        let ids: HashSet<&str> = Permission::ALL.iter().map(|p| p.as_str()).collect();
        assert_eq!(ids.len(), Permission::ALL.len());
    }

    #[test]
    fn test_every_area_is_populated() {
        for area in PermissionArea::ALL {
            assert!(
                Permission::ALL.iter().any(|p| p.area() == *area),
                "area {:?} has no permissions",
                area
            );
        }
    }

    /// Variant ids as the serde derive sees them, independent of `ALL`
    fn declared_ids() -> HashSet<String> {
        let err = serde_json::from_str::<Permission>("\"__no_such_permission__\"")
            .unwrap_err()
            .to_string();
        let (_, expected) = err.split_once("expected one of ").unwrap();
        expected.split('`').skip(1).step_by(2).map(str::to_string).collect()
    }

    #[test]
    fn test_catalog_lists_every_variant() {
        let listed: HashSet<String> = Permission::ALL
            .iter()
            .map(|p| p.as_str().to_string())
            .collect();
        assert_eq!(listed, declared_ids());
    }

    #[test]
    fn test_ids_round_trip_per_area() {
        for area in PermissionArea::ALL {
            for permission in Permission::ALL.iter().filter(|p| p.area() == *area) {
                assert_eq!(Permission::from_id(permission.as_str()), Some(*permission));
            }
        }
    }

    #[test]
    fn test_parse_round_trip() {
        assert_eq!(
            "approve_access_request".parse::<Permission>(),
            Ok(Permission::ApproveAccessRequest)
        );
        assert_eq!(
            "approve_everything".parse::<Permission>(),
            Err(UnknownPermission("approve_everything".to_string()))
        );
    }
}
