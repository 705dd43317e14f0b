//! Per-entity validation configuration
//!
//! An [`EntityValidationConfig`] holds the filters and validators registered
//! for one operation (`create` or `update`) of one entity type.

use crate::core::error::FieldValidationError;
use serde_json::Value;
use std::sync::Arc;

type ValidatorFn = Arc<dyn Fn(&str, &Value) -> Result<(), String> + Send + Sync>;
type FilterFn = Arc<dyn Fn(&str, Value) -> anyhow::Result<Value> + Send + Sync>;

/// Validation and filtering rules for one entity operation
#[derive(Clone)]
pub struct EntityValidationConfig {
    pub entity_type: String,
    validators: Vec<(String, ValidatorFn)>,
    filters: Vec<(String, FilterFn)>,
}

impl EntityValidationConfig {
    pub fn new(entity_type: &str) -> Self {
        Self {
            entity_type: entity_type.to_string(),
            validators: Vec::new(),
            filters: Vec::new(),
        }
    }

    /// Register a validator for a field. Validators run in registration order.
    pub fn add_validator<F>(&mut self, field: &str, validator: F)
    where
        F: Fn(&str, &Value) -> Result<(), String> + Send + Sync + 'static,
    {
        self.validators
            .push((field.to_string(), Arc::new(validator)));
    }

    /// Register a filter for a field. Filters run before any validator.
    pub fn add_filter<F>(&mut self, field: &str, filter: F)
    where
        F: Fn(&str, Value) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        self.filters.push((field.to_string(), Arc::new(filter)));
    }

    /// Apply the filters, then run every validator.
    ///
    /// Filters only touch fields present in the payload. Validators see a
    /// missing field as `null`. All failures are collected, not just the
    /// first one.
    pub fn validate_and_filter(
        &self,
        mut payload: Value,
    ) -> Result<Value, Vec<FieldValidationError>> {
        let Some(obj) = payload.as_object_mut() else {
            return Err(vec![FieldValidationError {
                field: "body".to_string(),
                message: "Expected a JSON object".to_string(),
            }]);
        };

        let mut errors = Vec::new();

        for (field, filter) in &self.filters {
            if let Some(value) = obj.remove(field) {
                match filter(field, value.clone()) {
                    Ok(filtered) => {
                        obj.insert(field.clone(), filtered);
                    }
                    Err(e) => {
                        obj.insert(field.clone(), value);
                        errors.push(FieldValidationError {
                            field: field.clone(),
                            message: e.to_string(),
                        });
                    }
                }
            }
        }

        for (field, validator) in &self.validators {
            let value = obj.get(field).unwrap_or(&Value::Null);
            if let Err(message) = validator(field, value) {
                errors.push(FieldValidationError {
                    field: field.clone(),
                    message,
                });
            }
        }

        if errors.is_empty() {
            Ok(payload)
        } else {
            Err(errors)
        }
    }
}
