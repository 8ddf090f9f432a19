//! Request form configuration
//!
//! Each request type owns an ordered list of form fields with
//! enabled/required/order flags. Defaults live in [`defaults`], saved
//! customizations are folded back in by [`merge`].

pub mod defaults;
pub mod merge;

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use defaults::{default_configurations, field_catalog};
pub use merge::{SavedConfigurations, SavedRequestTypeConfig, merge_with_defaults, parse_snapshot};

/// Access request type with a configurable form
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RequestType {
    NewAccount,
    ChangeAccount,
    CopyUser,
    RemoveAccount,
    LockAccount,
    UnlockAccount,
}

impl RequestType {
    pub const ALL: &'static [RequestType] = &[
        RequestType::NewAccount,
        RequestType::ChangeAccount,
        RequestType::CopyUser,
        RequestType::RemoveAccount,
        RequestType::LockAccount,
        RequestType::UnlockAccount,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NewAccount => "new-account",
            Self::ChangeAccount => "change-account",
            Self::CopyUser => "copy-user",
            Self::RemoveAccount => "remove-account",
            Self::LockAccount => "lock-account",
            Self::UnlockAccount => "unlock-account",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.as_str() == id)
    }
}

impl fmt::Display for RequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown request type: {0}")]
pub struct UnknownRequestType(pub String);

impl FromStr for RequestType {
    type Err = UnknownRequestType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_id(s).ok_or_else(|| UnknownRequestType(s.to_string()))
    }
}

/// Input widget of a form field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Select,
    Checkbox,
    Radio,
    Textarea,
    Date,
    Email,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOption {
    pub value: String,
    pub label: String,
}

/// One configurable form field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormFieldConfig {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub enabled: bool,
    pub required: bool,
    /// Sort key; not necessarily contiguous
    pub order: i32,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<FieldOption>>,
}

impl FormFieldConfig {
    /// Enabled, optional field
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        field_type: FieldType,
        order: i32,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            field_type,
            enabled: true,
            required: false,
            order,
            category: category.into(),
            placeholder: None,
            description: None,
            options: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = Some(text.into());
        self
    }

    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    pub fn options(mut self, options: &[(&str, &str)]) -> Self {
        self.options = Some(
            options
                .iter()
                .map(|(value, label)| FieldOption {
                    value: value.to_string(),
                    label: label.to_string(),
                })
                .collect(),
        );
        self
    }
}

/// Form configuration of one request type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestTypeFormConfig {
    pub request_type: RequestType,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub enabled: bool,
    pub fields: Vec<FormFieldConfig>,
}

impl RequestTypeFormConfig {
    pub fn field(&self, field_id: &str) -> Option<&FormFieldConfig> {
        self.fields.iter().find(|f| f.id == field_id)
    }

    pub fn field_mut(&mut self, field_id: &str) -> Option<&mut FormFieldConfig> {
        self.fields.iter_mut().find(|f| f.id == field_id)
    }

    /// Enabled fields, ascending by `order`
    ///
    /// The sort is stable, so fields sharing an `order` keep list order.
    pub fn enabled_fields(&self) -> Vec<&FormFieldConfig> {
        let mut fields: Vec<&FormFieldConfig> = self.fields.iter().filter(|f| f.enabled).collect();
        fields.sort_by_key(|f| f.order);
        fields
    }

    /// Enabled and required fields, ascending by `order`
    pub fn required_fields(&self) -> Vec<&FormFieldConfig> {
        self.enabled_fields().into_iter().filter(|f| f.required).collect()
    }

    /// Next free `order` value (one past the current maximum)
    ///
    /// `None` when the maximum is already `i32::MAX`.
    pub fn next_order(&self) -> Option<i32> {
        match self.fields.iter().map(|f| f.order).max() {
            Some(max) => max.checked_add(1),
            None => Some(1),
        }
    }

    /// Swap `order` with the neighbouring field in display order
    ///
    /// Returns `false` when the field is unknown, already at that end, or
    /// shares its `order` with the neighbour (swapping would change nothing).
    pub fn move_field(&mut self, field_id: &str, direction: MoveDirection) -> bool {
        let mut display: Vec<usize> = (0..self.fields.len()).collect();
        display.sort_by_key(|&i| self.fields[i].order);

        let Some(pos) = display.iter().position(|&i| self.fields[i].id == field_id) else {
            return false;
        };
        let neighbour = match direction {
            MoveDirection::Up if pos > 0 => pos - 1,
            MoveDirection::Down if pos + 1 < display.len() => pos + 1,
            _ => return false,
        };

        let (a, b) = (display[pos], display[neighbour]);
        let (order_a, order_b) = (self.fields[a].order, self.fields[b].order);
        if order_a == order_b {
            return false;
        }
        self.fields[a].order = order_b;
        self.fields[b].order = order_a;
        true
    }
}

/// All request types, keyed by type
pub type FormConfigurations = BTreeMap<RequestType, RequestTypeFormConfig>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveDirection {
    Up,
    Down,
}

/// Partial update of one field; `None` leaves the value unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldPatch {
    pub label: Option<String>,
    pub enabled: Option<bool>,
    pub required: Option<bool>,
    pub order: Option<i32>,
    pub category: Option<String>,
    pub placeholder: Option<String>,
    pub description: Option<String>,
    pub options: Option<Vec<FieldOption>>,
}

impl FieldPatch {
    pub fn apply(&self, field: &mut FormFieldConfig) {
        if let Some(label) = &self.label {
            field.label = label.clone();
        }
        if let Some(enabled) = self.enabled {
            field.enabled = enabled;
        }
        if let Some(required) = self.required {
            field.required = required;
        }
        if let Some(order) = self.order {
            field.order = order;
        }
        if let Some(category) = &self.category {
            field.category = category.clone();
        }
        if let Some(placeholder) = &self.placeholder {
            field.placeholder = Some(placeholder.clone());
        }
        if let Some(description) = &self.description {
            field.description = Some(description.clone());
        }
        if let Some(options) = &self.options {
            field.options = Some(options.clone());
        }
    }
}

/// Partial update of a request type; `fields` replaces the whole list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub enabled: Option<bool>,
    pub fields: Option<Vec<FormFieldConfig>>,
}

impl ConfigPatch {
    pub fn apply(&self, config: &mut RequestTypeFormConfig) {
        if let Some(name) = &self.name {
            config.name = name.clone();
        }
        if let Some(description) = &self.description {
            config.description = description.clone();
        }
        if let Some(icon) = &self.icon {
            config.icon = icon.clone();
        }
        if let Some(enabled) = self.enabled {
            config.enabled = enabled;
        }
        if let Some(fields) = &self.fields {
            config.fields = fields.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RequestTypeFormConfig {
        RequestTypeFormConfig {
            request_type: RequestType::LockAccount,
            name: "Lock Account".to_string(),
            description: String::new(),
            icon: "lock".to_string(),
            enabled: true,
            fields: vec![
                FormFieldConfig::new("c", "C", FieldType::Text, 30, "general").required(),
                FormFieldConfig::new("a", "A", FieldType::Text, 10, "general"),
                FormFieldConfig::new("x", "X", FieldType::Text, 5, "general").disabled(),
                FormFieldConfig::new("b", "B", FieldType::Text, 10, "general").required(),
            ],
        }
    }

    fn ids(fields: &[&FormFieldConfig]) -> Vec<String> {
        fields.iter().map(|f| f.id.clone()).collect()
    }

    #[test]
    fn test_enabled_fields_sorted_with_stable_ties() {
        let config = sample();
        assert_eq!(ids(&config.enabled_fields()), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_required_subset_of_enabled() {
        let config = sample();
        let enabled = config.enabled_fields();
        let required = config.required_fields();
        assert_eq!(ids(&required), vec!["b", "c"]);
        assert!(required.iter().all(|r| enabled.contains(r)));
    }

    #[test]
    fn test_move_field_swaps_order_values() {
        let mut config = sample();
        assert!(config.move_field("c", MoveDirection::Up));
        assert_eq!(config.field("c").unwrap().order, 10);
        assert_eq!(config.field("b").unwrap().order, 30);
        // untouched fields keep their values
        assert_eq!(config.field("a").unwrap().order, 10);
        assert_eq!(config.field("x").unwrap().order, 5);
    }

    #[test]
    fn test_move_field_past_the_ends() {
        let mut config = sample();
        assert!(!config.move_field("x", MoveDirection::Up));
        assert!(!config.move_field("c", MoveDirection::Down));
        assert!(!config.move_field("missing", MoveDirection::Down));
    }

    #[test]
    fn test_move_field_with_tied_neighbour_is_noop() {
        let mut config = sample();
        // "a" and "b" share order 10
        assert!(!config.move_field("b", MoveDirection::Up));
        assert!(!config.move_field("a", MoveDirection::Down));
        assert_eq!(config, sample());
    }

    #[test]
    fn test_next_order() {
        assert_eq!(sample().next_order(), Some(31));
        let mut empty = sample();
        empty.fields.clear();
        assert_eq!(empty.next_order(), Some(1));
    }

    #[test]
    fn test_next_order_at_i32_max() {
        let mut config = sample();
        config.fields[0].order = i32::MAX;
        assert_eq!(config.next_order(), None);
    }

    #[test]
    fn test_field_patch_only_touches_given_values() {
        let mut field = FormFieldConfig::new("a", "A", FieldType::Text, 1, "general");
        FieldPatch {
            required: Some(true),
            label: Some("Alpha".to_string()),
            ..Default::default()
        }
        .apply(&mut field);
        assert!(field.required);
        assert!(field.enabled);
        assert_eq!(field.label, "Alpha");
        assert_eq!(field.order, 1);
    }

    #[test]
    fn test_field_wire_format() {
        let field = FormFieldConfig::new("email", "Email", FieldType::Email, 3, "personal");
        let json = serde_json::to_value(&field).unwrap();
        assert_eq!(json["type"], "email");
        assert!(json.get("placeholder").is_none());
        assert_eq!(
            serde_json::to_string(&RequestType::NewAccount).unwrap(),
            "\"new-account\""
        );
    }
}
