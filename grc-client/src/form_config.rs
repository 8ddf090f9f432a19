//! Request form configuration store
//!
//! Holds the working copy of every request type's form, merged from the
//! shipped defaults and the customization saved under
//! [`keys::FORM_CONFIGURATIONS`]. Edits stay in memory until [`save`].
//!
//! [`save`]: FormConfigStore::save

use std::sync::Arc;

use shared::ErrorCode;
use shared::form_config::{
    ConfigPatch, FieldPatch, MoveDirection, default_configurations, field_catalog,
    merge_with_defaults, parse_snapshot,
};
use shared::{FormConfigurations, FormFieldConfig, RequestType, RequestTypeFormConfig};
use thiserror::Error;

use crate::storage::{KeyValueStore, StorageError, keys};

#[derive(Debug, Error)]
pub enum FormConfigError {
    #[error("Failed to persist form configuration: {0}")]
    Persistence(#[from] StorageError),

    #[error("Failed to serialize form configuration: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Saved form configuration is corrupt: {0}")]
    Corrupt(#[source] serde_json::Error),

    #[error("Request type '{0}' is not configured")]
    RequestTypeNotConfigured(RequestType),

    #[error("Field '{field_id}' not found on {request_type}")]
    FieldNotFound {
        request_type: RequestType,
        field_id: String,
    },

    #[error("Field '{field_id}' is already on {request_type}")]
    FieldExists {
        request_type: RequestType,
        field_id: String,
    },

    #[error("Field '{0}' is not in the field catalog")]
    NotInCatalog(String),

    #[error("Field '{0}' is a default field; disable it instead")]
    DefaultField(String),

    #[error("No display order left on {0}")]
    OrderExhausted(RequestType),
}

impl FormConfigError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Persistence(e) => e.code(),
            Self::Serialization(_) => ErrorCode::InternalError,
            Self::Corrupt(_) => ErrorCode::StorageCorrupted,
            Self::RequestTypeNotConfigured(_) => ErrorCode::NotFound,
            Self::FieldNotFound { .. } => ErrorCode::FormFieldNotFound,
            Self::FieldExists { .. } => ErrorCode::FormFieldExists,
            Self::NotInCatalog(_) => ErrorCode::FormFieldNotInCatalog,
            Self::DefaultField(_) => ErrorCode::FormFieldIsDefault,
            Self::OrderExhausted(_) => ErrorCode::ValidationFailed,
        }
    }
}

pub type FormConfigResult<T> = Result<T, FormConfigError>;

/// Working copy of all request forms
pub struct FormConfigStore {
    store: Arc<dyn KeyValueStore>,
    defaults: FormConfigurations,
    catalog: Vec<FormFieldConfig>,
    configs: FormConfigurations,
    has_unsaved_changes: bool,
}

impl FormConfigStore {
    /// Load the shipped defaults merged with whatever `store` holds
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_defaults(store, default_configurations(), field_catalog())
    }

    /// Load with custom defaults and field catalog
    ///
    /// A missing, unreadable or corrupt snapshot yields the defaults.
    pub fn with_defaults(
        store: Arc<dyn KeyValueStore>,
        defaults: FormConfigurations,
        catalog: Vec<FormFieldConfig>,
    ) -> Self {
        let configs = match load_configurations(store.as_ref(), &defaults) {
            Ok(configs) => configs,
            Err(e) => {
                tracing::warn!(error = %e, code = %e.code(), "Using default form configuration");
                defaults.clone()
            }
        };
        Self::from_parts(store, defaults, catalog, configs)
    }

    /// Like [`load`](Self::load) but an unreadable or corrupt snapshot is an error
    pub fn try_load(store: Arc<dyn KeyValueStore>) -> FormConfigResult<Self> {
        let defaults = default_configurations();
        let configs = load_configurations(store.as_ref(), &defaults)?;
        Ok(Self::from_parts(store, defaults, field_catalog(), configs))
    }

    fn from_parts(
        store: Arc<dyn KeyValueStore>,
        defaults: FormConfigurations,
        catalog: Vec<FormFieldConfig>,
        configs: FormConfigurations,
    ) -> Self {
        Self {
            store,
            defaults,
            catalog,
            configs,
            has_unsaved_changes: false,
        }
    }

    pub fn configurations(&self) -> &FormConfigurations {
        &self.configs
    }

    pub fn config(&self, request_type: RequestType) -> Option<&RequestTypeFormConfig> {
        self.configs.get(&request_type)
    }

    pub fn catalog(&self) -> &[FormFieldConfig] {
        &self.catalog
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.has_unsaved_changes
    }

    /// Enabled fields in display order; empty for an unconfigured type
    pub fn enabled_fields(&self, request_type: RequestType) -> Vec<&FormFieldConfig> {
        self.config(request_type)
            .map(RequestTypeFormConfig::enabled_fields)
            .unwrap_or_default()
    }

    /// Enabled and required fields in display order
    pub fn required_fields(&self, request_type: RequestType) -> Vec<&FormFieldConfig> {
        self.config(request_type)
            .map(RequestTypeFormConfig::required_fields)
            .unwrap_or_default()
    }

    /// Catalog fields not yet on `request_type`
    pub fn available_catalog_fields(&self, request_type: RequestType) -> Vec<&FormFieldConfig> {
        let Some(config) = self.config(request_type) else {
            return Vec::new();
        };
        self.catalog
            .iter()
            .filter(|f| config.field(&f.id).is_none())
            .collect()
    }

    // ========== Edits ==========

    pub fn update_field(
        &mut self,
        request_type: RequestType,
        field_id: &str,
        patch: &FieldPatch,
    ) -> FormConfigResult<()> {
        let config = self.config_mut(request_type)?;
        let field = config
            .field_mut(field_id)
            .ok_or_else(|| FormConfigError::FieldNotFound {
                request_type,
                field_id: field_id.to_string(),
            })?;
        patch.apply(field);
        self.has_unsaved_changes = true;
        Ok(())
    }

    pub fn update_config(
        &mut self,
        request_type: RequestType,
        patch: &ConfigPatch,
    ) -> FormConfigResult<()> {
        patch.apply(self.config_mut(request_type)?);
        self.has_unsaved_changes = true;
        Ok(())
    }

    /// Swap a field with its display-order neighbour
    ///
    /// Returns `Ok(false)` when the field is already at that end.
    pub fn move_field(
        &mut self,
        request_type: RequestType,
        field_id: &str,
        direction: MoveDirection,
    ) -> FormConfigResult<bool> {
        let config = self.config_mut(request_type)?;
        if config.field(field_id).is_none() {
            return Err(FormConfigError::FieldNotFound {
                request_type,
                field_id: field_id.to_string(),
            });
        }
        let moved = config.move_field(field_id, direction);
        if moved {
            self.has_unsaved_changes = true;
        }
        Ok(moved)
    }

    /// Append a catalog field, enabled and optional, after the last field
    ///
    /// Fails with `OrderExhausted` when the last field already sits at
    /// `i32::MAX`.
    pub fn add_field_from_catalog(
        &mut self,
        request_type: RequestType,
        field_id: &str,
    ) -> FormConfigResult<()> {
        let template = self
            .catalog
            .iter()
            .find(|f| f.id == field_id)
            .cloned()
            .ok_or_else(|| FormConfigError::NotInCatalog(field_id.to_string()))?;

        let config = self.config_mut(request_type)?;
        if config.field(field_id).is_some() {
            return Err(FormConfigError::FieldExists {
                request_type,
                field_id: field_id.to_string(),
            });
        }

        let mut field = template;
        field.order = config
            .next_order()
            .ok_or(FormConfigError::OrderExhausted(request_type))?;
        field.enabled = true;
        field.required = false;

        let mut fields = config.fields.clone();
        fields.push(field);
        self.update_config(
            request_type,
            &ConfigPatch {
                fields: Some(fields),
                ..Default::default()
            },
        )
    }

    /// Remove a field that was added from the catalog
    pub fn remove_field(&mut self, request_type: RequestType, field_id: &str) -> FormConfigResult<()> {
        let is_default = self
            .defaults
            .get(&request_type)
            .is_some_and(|d| d.field(field_id).is_some());
        if is_default {
            return Err(FormConfigError::DefaultField(field_id.to_string()));
        }

        let config = self.config_mut(request_type)?;
        if config.field(field_id).is_none() {
            return Err(FormConfigError::FieldNotFound {
                request_type,
                field_id: field_id.to_string(),
            });
        }

        let fields = config
            .fields
            .iter()
            .filter(|f| f.id != field_id)
            .cloned()
            .collect();
        self.update_config(
            request_type,
            &ConfigPatch {
                fields: Some(fields),
                ..Default::default()
            },
        )
    }

    // ========== Persistence ==========

    /// Write the whole working copy
    ///
    /// On failure the working copy and the unsaved flag are left as they
    /// were, so the call can simply be retried.
    pub fn save(&mut self) -> FormConfigResult<()> {
        let json = serde_json::to_string(&self.configs)?;
        self.store.set(keys::FORM_CONFIGURATIONS, &json).map_err(|e| {
            tracing::error!(error = %e, "Failed to save form configuration");
            FormConfigError::from(e)
        })?;
        self.has_unsaved_changes = false;
        tracing::info!(bytes = json.len(), "Form configuration saved");
        Ok(())
    }

    /// Discard every customization, stored and in memory
    ///
    /// If the stored copy cannot be removed nothing changes.
    pub fn reset_to_default(&mut self) -> FormConfigResult<()> {
        self.store.remove(keys::FORM_CONFIGURATIONS)?;
        self.configs = self.defaults.clone();
        self.has_unsaved_changes = false;
        tracing::info!("Form configuration reset to defaults");
        Ok(())
    }

    fn config_mut(&mut self, request_type: RequestType) -> FormConfigResult<&mut RequestTypeFormConfig> {
        self.configs
            .get_mut(&request_type)
            .ok_or(FormConfigError::RequestTypeNotConfigured(request_type))
    }
}

impl std::fmt::Debug for FormConfigStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormConfigStore")
            .field("request_types", &self.configs.len())
            .field("has_unsaved_changes", &self.has_unsaved_changes)
            .finish()
    }
}

fn load_configurations(
    store: &dyn KeyValueStore,
    defaults: &FormConfigurations,
) -> FormConfigResult<FormConfigurations> {
    let Some(json) = store.get(keys::FORM_CONFIGURATIONS)? else {
        return Ok(defaults.clone());
    };
    let saved = parse_snapshot(&json).map_err(FormConfigError::Corrupt)?;
    Ok(merge_with_defaults(defaults, &saved))
}
