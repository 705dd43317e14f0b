//! Axum extractor for validated payloads
//!
//! This module provides the `Validated<T>` extractor that validates and
//! filters request payloads before they reach handlers.

use super::config::EntityValidationConfig;
use crate::core::error::{OrderDeskError, ValidationError};
use axum::{
    Json,
    extract::{FromRequest, Request},
    http::Method,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Trait for entities that support validation
///
/// This is implemented by the `impl_data_entity_validated!` macro
pub trait ValidatableEntity {
    /// Get the validation configuration for a specific operation
    fn validation_config(operation: &str) -> EntityValidationConfig;
}

/// Axum extractor that validates and filters entity payloads
///
/// `POST` requests use the `create` rules; `PUT` and `PATCH` use the
/// `update` rules.
///
/// # Usage
///
/// ```rust,ignore
/// pub async fn create_customer(
///     State(state): State<CustomerAppState>,
///     payload: Validated<Customer>,
/// ) -> OrderDeskResult<(StatusCode, Json<Customer>)> {
///     let input: CustomerInput = payload.parse()?;
///     // ...
/// }
/// ```
pub struct Validated<T>(pub Value, std::marker::PhantomData<T>);

impl<T> Validated<T> {
    /// Create a new validated payload
    pub fn new(payload: Value) -> Self {
        Self(payload, std::marker::PhantomData)
    }

    /// Get the inner payload
    pub fn into_inner(self) -> Value {
        self.0
    }

    /// Deserialize the validated payload into a typed input struct
    pub fn parse<I: DeserializeOwned>(self) -> Result<I, OrderDeskError> {
        serde_json::from_value(self.0).map_err(OrderDeskError::from)
    }
}

impl<T> std::ops::Deref for Validated<T> {
    type Target = Value;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Map an HTTP method to the validation operation it triggers
pub fn operation_for(method: &Method) -> &'static str {
    match *method {
        Method::PUT | Method::PATCH => "update",
        _ => "create",
    }
}

impl<S, T> FromRequest<S> for Validated<T>
where
    S: Send + Sync,
    T: ValidatableEntity + Send + Sync,
{
    type Rejection = OrderDeskError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let operation = operation_for(req.method());

        let Json(payload): Json<Value> = Json::from_request(req, state).await.map_err(|e| {
            OrderDeskError::Validation(ValidationError::InvalidJson {
                message: e.body_text(),
            })
        })?;

        let config = T::validation_config(operation);

        config
            .validate_and_filter(payload)
            .map(Validated::new)
            .map_err(|errors| OrderDeskError::Validation(ValidationError::FieldErrors(errors)))
    }
}
