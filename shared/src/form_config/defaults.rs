//! Default form configurations and the catalog of optional fields

use super::{FieldType, FormConfigurations, FormFieldConfig, RequestType, RequestTypeFormConfig};

const SYSTEMS: &[(&str, &str)] = &[
    ("sap_erp", "SAP ERP"),
    ("active_directory", "Active Directory"),
    ("salesforce", "Salesforce"),
    ("workday", "Workday"),
    ("oracle_db", "Oracle Database"),
];

const DEPARTMENTS: &[(&str, &str)] = &[
    ("finance", "Finance"),
    ("hr", "Human Resources"),
    ("it", "Information Technology"),
    ("operations", "Operations"),
    ("sales", "Sales"),
];

fn user_id(order: i32) -> FormFieldConfig {
    FormFieldConfig::new("user_id", "User ID", FieldType::Text, order, "user")
        .required()
        .placeholder("e.g. jdoe")
}

fn target_system(order: i32) -> FormFieldConfig {
    FormFieldConfig::new("system", "Target System", FieldType::Select, order, "access")
        .required()
        .options(SYSTEMS)
}

fn justification(order: i32) -> FormFieldConfig {
    FormFieldConfig::new(
        "justification",
        "Business Justification",
        FieldType::Textarea,
        order,
        "justification",
    )
    .required()
    .description("Explain why this access is needed")
}

fn request_type_config(
    request_type: RequestType,
    name: &str,
    description: &str,
    icon: &str,
    fields: Vec<FormFieldConfig>,
) -> RequestTypeFormConfig {
    RequestTypeFormConfig {
        request_type,
        name: name.to_string(),
        description: description.to_string(),
        icon: icon.to_string(),
        enabled: true,
        fields,
    }
}

fn new_account() -> RequestTypeFormConfig {
    request_type_config(
        RequestType::NewAccount,
        "New Account",
        "Provision a new account in a target system",
        "user-plus",
        vec![
            FormFieldConfig::new("first_name", "First Name", FieldType::Text, 1, "personal")
                .required(),
            FormFieldConfig::new("last_name", "Last Name", FieldType::Text, 2, "personal")
                .required(),
            FormFieldConfig::new("email", "Email", FieldType::Email, 3, "personal")
                .required()
                .placeholder("name@company.com"),
            FormFieldConfig::new("department", "Department", FieldType::Select, 4, "employment")
                .required()
                .options(DEPARTMENTS),
            FormFieldConfig::new("manager", "Manager", FieldType::Text, 5, "employment"),
            FormFieldConfig::new("job_title", "Job Title", FieldType::Text, 6, "employment"),
            FormFieldConfig::new("start_date", "Start Date", FieldType::Date, 7, "employment")
                .required(),
            target_system(8),
            FormFieldConfig::new("roles", "Requested Roles", FieldType::Select, 9, "access")
                .required(),
            justification(10),
            FormFieldConfig::new(
                "temporary_access",
                "Temporary Access",
                FieldType::Checkbox,
                11,
                "access",
            )
            .disabled(),
            FormFieldConfig::new("end_date", "Access End Date", FieldType::Date, 12, "access")
                .disabled(),
        ],
    )
}

fn change_account() -> RequestTypeFormConfig {
    request_type_config(
        RequestType::ChangeAccount,
        "Change Account",
        "Add or remove roles on an existing account",
        "user-cog",
        vec![
            user_id(1),
            target_system(2),
            FormFieldConfig::new("add_roles", "Roles to Add", FieldType::Select, 3, "access"),
            FormFieldConfig::new("remove_roles", "Roles to Remove", FieldType::Select, 4, "access"),
            FormFieldConfig::new("effective_date", "Effective Date", FieldType::Date, 5, "access"),
            justification(6),
        ],
    )
}

fn copy_user() -> RequestTypeFormConfig {
    request_type_config(
        RequestType::CopyUser,
        "Copy User",
        "Mirror the access of an existing user",
        "copy",
        vec![
            FormFieldConfig::new("source_user", "Copy From", FieldType::Text, 1, "user")
                .required(),
            FormFieldConfig::new("target_user", "Copy To", FieldType::Text, 2, "user").required(),
            FormFieldConfig::new("system", "Target System", FieldType::Select, 3, "access")
                .options(SYSTEMS),
            FormFieldConfig::new("copy_scope", "Copy Scope", FieldType::Radio, 4, "access")
                .options(&[("all", "All access"), ("roles_only", "Roles only")]),
            justification(5),
        ],
    )
}

fn remove_account() -> RequestTypeFormConfig {
    request_type_config(
        RequestType::RemoveAccount,
        "Remove Account",
        "Deprovision an account from a target system",
        "user-minus",
        vec![
            user_id(1),
            target_system(2),
            FormFieldConfig::new("removal_date", "Removal Date", FieldType::Date, 3, "access")
                .required(),
            FormFieldConfig::new("reason", "Reason", FieldType::Select, 4, "justification")
                .required()
                .options(&[
                    ("resignation", "Resignation"),
                    ("termination", "Termination"),
                    ("transfer", "Transfer"),
                    ("other", "Other"),
                ]),
            FormFieldConfig::new("transfer_data_to", "Transfer Data To", FieldType::Text, 5, "user")
                .disabled(),
            FormFieldConfig::new("comments", "Comments", FieldType::Textarea, 6, "justification"),
        ],
    )
}

fn lock_account() -> RequestTypeFormConfig {
    request_type_config(
        RequestType::LockAccount,
        "Lock Account",
        "Temporarily block sign-in to an account",
        "lock",
        vec![
            user_id(1),
            target_system(2),
            FormFieldConfig::new("lock_reason", "Lock Reason", FieldType::Select, 3, "justification")
                .required()
                .options(&[
                    ("security_incident", "Security incident"),
                    ("leave_of_absence", "Leave of absence"),
                    ("investigation", "Investigation"),
                ]),
            FormFieldConfig::new("lock_duration", "Duration", FieldType::Radio, 4, "access")
                .options(&[("temporary", "Temporary"), ("indefinite", "Indefinite")]),
            FormFieldConfig::new("comments", "Comments", FieldType::Textarea, 5, "justification"),
        ],
    )
}

fn unlock_account() -> RequestTypeFormConfig {
    request_type_config(
        RequestType::UnlockAccount,
        "Unlock Account",
        "Restore sign-in to a locked account",
        "unlock",
        vec![
            user_id(1),
            target_system(2),
            FormFieldConfig::new(
                "unlock_reason",
                "Unlock Reason",
                FieldType::Textarea,
                3,
                "justification",
            )
            .required(),
            FormFieldConfig::new(
                "identity_verified",
                "Identity Verified",
                FieldType::Checkbox,
                4,
                "verification",
            )
            .required()
            .description("Confirm the requester's identity was verified out of band"),
        ],
    )
}

/// Shipped configuration for every request type
pub fn default_configurations() -> FormConfigurations {
    [
        new_account(),
        change_account(),
        copy_user(),
        remove_account(),
        lock_account(),
        unlock_account(),
    ]
    .into_iter()
    .map(|config| (config.request_type, config))
    .collect()
}

/// Optional fields that can be added to any request type
///
/// `order` is a placeholder; it is reassigned when the field is added.
pub fn field_catalog() -> Vec<FormFieldConfig> {
    vec![
        FormFieldConfig::new("cost_center", "Cost Center", FieldType::Text, 0, "employment")
            .placeholder("e.g. CC-1042"),
        FormFieldConfig::new("ticket_reference", "Ticket Reference", FieldType::Text, 0, "general")
            .placeholder("e.g. INC0012345"),
        FormFieldConfig::new("employee_type", "Employee Type", FieldType::Select, 0, "employment")
            .options(&[
                ("employee", "Employee"),
                ("contractor", "Contractor"),
                ("vendor", "Vendor"),
            ]),
        FormFieldConfig::new("location", "Location", FieldType::Text, 0, "employment"),
        FormFieldConfig::new("priority", "Priority", FieldType::Radio, 0, "general").options(&[
            ("low", "Low"),
            ("medium", "Medium"),
            ("high", "High"),
        ]),
        FormFieldConfig::new("access_end_date", "Access End Date", FieldType::Date, 0, "access")
            .description("Access is revoked automatically after this date"),
        FormFieldConfig::new("contact_email", "Contact Email", FieldType::Email, 0, "general"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_request_type_has_a_default() {
        let defaults = default_configurations();
        for request_type in RequestType::ALL {
            let config = defaults.get(request_type).unwrap();
            assert_eq!(config.request_type, *request_type);
            assert!(config.enabled);
            assert!(!config.enabled_fields().is_empty());
        }
    }

    #[test]
    fn test_field_ids_unique_per_request_type() {
        for config in default_configurations().values() {
            let ids: HashSet<&str> = config.fields.iter().map(|f| f.id.as_str()).collect();
            assert_eq!(ids.len(), config.fields.len(), "{}", config.request_type);
        }
    }

    #[test]
    fn test_catalog_ids_unique() {
        let catalog = field_catalog();
        let ids: HashSet<&str> = catalog.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids.len(), catalog.len());
    }
}
