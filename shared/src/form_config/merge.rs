//! Merge of saved customizations over the shipped defaults
//!
//! Saved fields replace default fields with the same id. Default fields that
//! the snapshot does not mention are kept, so fields added to the defaults
//! after a customization was saved still show up. Fields present only in the
//! snapshot (added from the field catalog) follow the defaults in saved order.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{FormConfigurations, FormFieldConfig, RequestType, RequestTypeFormConfig};

/// Saved request type; every value is optional so old snapshots still load
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedRequestTypeConfig {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub fields: Option<Vec<FormFieldConfig>>,
}

/// Stored snapshot keyed by request type id
pub type SavedConfigurations = BTreeMap<String, SavedRequestTypeConfig>;

/// Parse a stored snapshot
pub fn parse_snapshot(json: &str) -> Result<SavedConfigurations, serde_json::Error> {
    serde_json::from_str(json)
}

/// Fold `saved` over `defaults`
///
/// Request types absent from the defaults are dropped.
pub fn merge_with_defaults(
    defaults: &FormConfigurations,
    saved: &SavedConfigurations,
) -> FormConfigurations {
    for key in saved.keys() {
        if RequestType::from_id(key).is_none() {
            tracing::debug!(request_type = %key, "Ignoring saved form config for unknown request type");
        }
    }

    defaults
        .iter()
        .map(|(request_type, default)| {
            let merged = match saved.get(request_type.as_str()) {
                Some(saved) => merge_request_type(default, saved),
                None => default.clone(),
            };
            (*request_type, merged)
        })
        .collect()
}

fn merge_request_type(
    default: &RequestTypeFormConfig,
    saved: &SavedRequestTypeConfig,
) -> RequestTypeFormConfig {
    RequestTypeFormConfig {
        request_type: default.request_type,
        name: saved.name.clone().unwrap_or_else(|| default.name.clone()),
        description: saved
            .description
            .clone()
            .unwrap_or_else(|| default.description.clone()),
        icon: saved.icon.clone().unwrap_or_else(|| default.icon.clone()),
        enabled: saved.enabled.unwrap_or(default.enabled),
        fields: match &saved.fields {
            Some(fields) => merge_fields(&default.fields, fields),
            None => default.fields.clone(),
        },
    }
}

fn merge_fields(defaults: &[FormFieldConfig], saved: &[FormFieldConfig]) -> Vec<FormFieldConfig> {
    let mut merged: Vec<FormFieldConfig> = defaults
        .iter()
        .map(|default| {
            saved
                .iter()
                .find(|s| s.id == default.id)
                .cloned()
                .unwrap_or_else(|| default.clone())
        })
        .collect();

    merged.extend(
        saved
            .iter()
            .filter(|s| !defaults.iter().any(|d| d.id == s.id))
            .cloned(),
    );
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form_config::{FieldType, default_configurations};

    fn snapshot_of(configs: &FormConfigurations) -> SavedConfigurations {
        let json = serde_json::to_string(configs).unwrap();
        parse_snapshot(&json).unwrap()
    }

    #[test]
    fn test_merge_of_identical_snapshot_is_identity() {
        let defaults = default_configurations();
        let merged = merge_with_defaults(&defaults, &snapshot_of(&defaults));
        assert_eq!(merged, defaults);
    }

    #[test]
    fn test_empty_snapshot_yields_defaults() {
        let defaults = default_configurations();
        assert_eq!(merge_with_defaults(&defaults, &SavedConfigurations::new()), defaults);
    }

    #[test]
    fn test_missing_saved_field_comes_from_defaults() {
        let defaults = default_configurations();
        let mut customized = defaults.clone();
        let new_account = customized.get_mut(&RequestType::NewAccount).unwrap();
        new_account.fields.retain(|f| f.id != "job_title");
        new_account.field_mut("manager").unwrap().required = true;

        let merged = merge_with_defaults(&defaults, &snapshot_of(&customized));
        let merged_new = &merged[&RequestType::NewAccount];
        let default_new = &defaults[&RequestType::NewAccount];

        assert_eq!(merged_new.field("job_title"), default_new.field("job_title"));
        assert!(merged_new.field("manager").unwrap().required);
        assert_eq!(merged_new.fields.len(), default_new.fields.len());
    }

    #[test]
    fn test_saved_request_level_values_override() {
        let defaults = default_configurations();
        let mut saved = SavedConfigurations::new();
        saved.insert(
            "lock-account".to_string(),
            SavedRequestTypeConfig {
                enabled: Some(false),
                ..Default::default()
            },
        );

        let merged = merge_with_defaults(&defaults, &saved);
        let lock = &merged[&RequestType::LockAccount];
        assert!(!lock.enabled);
        assert_eq!(lock.fields, defaults[&RequestType::LockAccount].fields);
        assert_eq!(lock.name, defaults[&RequestType::LockAccount].name);
    }

    #[test]
    fn test_catalog_fields_kept_after_defaults() {
        let defaults = default_configurations();
        let mut customized = defaults.clone();
        let copy = customized.get_mut(&RequestType::CopyUser).unwrap();
        copy.fields
            .insert(0, FormFieldConfig::new("cost_center", "Cost Center", FieldType::Text, 99, "employment"));

        let merged = merge_with_defaults(&defaults, &snapshot_of(&customized));
        let fields = &merged[&RequestType::CopyUser].fields;
        assert_eq!(fields.last().unwrap().id, "cost_center");
        assert_eq!(fields.len(), defaults[&RequestType::CopyUser].fields.len() + 1);
    }

    #[test]
    fn test_unknown_request_type_ignored() {
        let defaults = default_configurations();
        let snapshot = parse_snapshot(r#"{"reset-password": {"enabled": false}}"#).unwrap();
        assert_eq!(merge_with_defaults(&defaults, &snapshot), defaults);
    }
}
