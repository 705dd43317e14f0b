//! Typed error handling for orderdesk
//!
//! Every failure a handler can produce is an [`OrderDeskError`]. Each variant
//! wraps a category-specific error that knows its HTTP status code and a
//! stable error code, so clients can match on `code` instead of parsing
//! messages.
//!
//! # Error Categories
//!
//! - [`EntityError`]: missing records and failed CRUD operations
//! - [`ValidationError`]: malformed input (dates, ids, required fields, duplicates)
//! - [`RequestError`]: authorization and request-shape problems
//! - [`StorageError`]: storage backend failures
//! - [`ConfigError`]: configuration loading and validation
//!
//! # Example
//!
//! ```rust,ignore
//! use orderdesk::prelude::*;
//!
//! async fn load_order(store: &EntityStore, id: Uuid) -> OrderDeskResult<Order> {
//!     store.orders.get(&id).await?.ok_or_else(|| EntityError::not_found("order", id).into())
//! }
//! ```

use crate::export::ExportError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

/// The main error type for orderdesk
#[derive(Debug)]
pub enum OrderDeskError {
    /// Entity-related errors (CRUD operations)
    Entity(EntityError),

    /// Validation errors
    Validation(ValidationError),

    /// Authorization and request errors
    Request(RequestError),

    /// Storage backend errors
    Storage(StorageError),

    /// Document export errors
    Export(ExportError),

    /// Configuration errors
    Config(ConfigError),

    /// Internal errors (should not happen in normal operation)
    Internal(String),
}

impl fmt::Display for OrderDeskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderDeskError::Entity(e) => write!(f, "{}", e),
            OrderDeskError::Validation(e) => write!(f, "{}", e),
            OrderDeskError::Request(e) => write!(f, "{}", e),
            OrderDeskError::Storage(e) => write!(f, "{}", e),
            OrderDeskError::Export(e) => write!(f, "{}", e),
            OrderDeskError::Config(e) => write!(f, "{}", e),
            OrderDeskError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for OrderDeskError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OrderDeskError::Entity(e) => Some(e),
            OrderDeskError::Validation(e) => Some(e),
            OrderDeskError::Request(e) => Some(e),
            OrderDeskError::Storage(e) => Some(e),
            OrderDeskError::Export(e) => Some(e),
            OrderDeskError::Config(e) => Some(e),
            OrderDeskError::Internal(_) => None,
        }
    }
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl OrderDeskError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            OrderDeskError::Entity(e) => e.status_code(),
            OrderDeskError::Validation(_) => StatusCode::BAD_REQUEST,
            OrderDeskError::Request(e) => e.status_code(),
            OrderDeskError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            OrderDeskError::Export(_) => StatusCode::INTERNAL_SERVER_ERROR,
            OrderDeskError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            OrderDeskError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            OrderDeskError::Entity(e) => e.error_code(),
            OrderDeskError::Validation(e) => e.error_code(),
            OrderDeskError::Request(e) => e.error_code(),
            OrderDeskError::Storage(_) => "STORAGE_ERROR",
            OrderDeskError::Export(_) => "EXPORT_ERROR",
            OrderDeskError::Config(_) => "CONFIG_ERROR",
            OrderDeskError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            OrderDeskError::Entity(EntityError::NotFound { entity_type, id }) => {
                Some(serde_json::json!({
                    "entity_type": entity_type,
                    "id": id.to_string()
                }))
            }
            OrderDeskError::Validation(ValidationError::FieldErrors(errors)) => {
                Some(serde_json::json!({ "fields": errors }))
            }
            OrderDeskError::Validation(ValidationError::Duplicate { field, .. }) => {
                Some(serde_json::json!({ "field": field }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for OrderDeskError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), "{}", self);
        } else {
            tracing::debug!(code = self.error_code(), "{}", self);
        }
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Entity Errors
// =============================================================================

/// Errors related to entity operations
#[derive(Debug)]
pub enum EntityError {
    /// Entity was not found
    NotFound { entity_type: String, id: Uuid },
}

impl EntityError {
    /// Shorthand for the common not-found case
    pub fn not_found(entity_type: &str, id: Uuid) -> Self {
        EntityError::NotFound {
            entity_type: entity_type.to_string(),
            id,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            EntityError::NotFound { .. } => StatusCode::NOT_FOUND,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            EntityError::NotFound { .. } => "ENTITY_NOT_FOUND",
        }
    }
}

impl fmt::Display for EntityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityError::NotFound { entity_type, id } => {
                write!(f, "{} with id '{}' not found", entity_type, id)
            }
        }
    }
}

impl std::error::Error for EntityError {}

impl From<EntityError> for OrderDeskError {
    fn from(err: EntityError) -> Self {
        OrderDeskError::Entity(err)
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors related to input validation
#[derive(Debug)]
pub enum ValidationError {
    /// Single field validation error
    FieldError { field: String, message: String },

    /// Multiple field validation errors
    FieldErrors(Vec<FieldValidationError>),

    /// Invalid JSON format
    InvalidJson { message: String },

    /// Missing required argument (query parameter or body field)
    MissingArgument { argument: String },

    /// Invalid UUID format
    InvalidUuid { value: String },

    /// Date or month that does not match the expected format
    InvalidDate { value: String, expected: String },

    /// A unique field already holds this value
    Duplicate { field: String, value: String },
}

/// A single field validation error
#[derive(Debug, Clone, Serialize)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::Duplicate { .. } => "DUPLICATE_VALUE",
            ValidationError::InvalidDate { .. } => "INVALID_DATE",
            ValidationError::InvalidUuid { .. } => "INVALID_ID",
            ValidationError::InvalidJson { .. } => "INVALID_JSON",
            _ => "VALIDATION_ERROR",
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::FieldError { field, message } => {
                write!(f, "Validation error for field '{}': {}", field, message)
            }
            ValidationError::FieldErrors(errors) => {
                let msgs: Vec<String> = errors
                    .iter()
                    .map(|e| format!("{}: {}", e.field, e.message))
                    .collect();
                write!(f, "Validation errors: {}", msgs.join(", "))
            }
            ValidationError::InvalidJson { message } => write!(f, "Invalid JSON: {}", message),
            ValidationError::MissingArgument { argument } => {
                write!(f, "Missing required argument: {}", argument)
            }
            ValidationError::InvalidUuid { value } => write!(f, "Invalid id format: '{}'", value),
            ValidationError::InvalidDate { value, expected } => {
                write!(f, "Invalid date '{}': expected {}", value, expected)
            }
            ValidationError::Duplicate { field, value } => {
                write!(f, "A record with {} '{}' already exists", field, value)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for OrderDeskError {
    fn from(err: ValidationError) -> Self {
        OrderDeskError::Validation(err)
    }
}

// =============================================================================
// Request Errors
// =============================================================================

/// Errors related to HTTP requests and authorization
#[derive(Debug)]
pub enum RequestError {
    /// Missing or unknown credentials, wrong password
    Unauthorized { message: String },

    /// Export format not supported by the endpoint
    UnsupportedFormat { format: String },
}

impl RequestError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RequestError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            RequestError::UnsupportedFormat { .. } => StatusCode::BAD_REQUEST,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            RequestError::Unauthorized { .. } => "UNAUTHORIZED",
            RequestError::UnsupportedFormat { .. } => "UNSUPPORTED_FORMAT",
        }
    }
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::Unauthorized { message } => write!(f, "Unauthorized: {}", message),
            RequestError::UnsupportedFormat { format } => {
                write!(f, "Unsupported export format '{}' (use xlsx or pdf)", format)
            }
        }
    }
}

impl std::error::Error for RequestError {}

impl From<RequestError> for OrderDeskError {
    fn from(err: RequestError) -> Self {
        OrderDeskError::Request(err)
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors related to storage backends
#[derive(Debug)]
pub enum StorageError {
    /// Connection error
    ConnectionError { backend: String, message: String },

    /// Query execution error
    QueryError { backend: String, message: String },

    /// Data integrity error
    IntegrityError { message: String },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::ConnectionError { backend, message } => {
                write!(f, "Failed to connect to {}: {}", backend, message)
            }
            StorageError::QueryError { backend, message } => {
                write!(f, "{} query error: {}", backend, message)
            }
            StorageError::IntegrityError { message } => {
                write!(f, "Data integrity error: {}", message)
            }
        }
    }
}

impl std::error::Error for StorageError {}

impl From<StorageError> for OrderDeskError {
    fn from(err: StorageError) -> Self {
        OrderDeskError::Storage(err)
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to parse configuration file
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// Invalid value in configuration
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },

    /// Configuration file not found
    FileNotFound { path: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError { file, message } => {
                if let Some(file) = file {
                    write!(f, "Failed to parse config file '{}': {}", file, message)
                } else {
                    write!(f, "Failed to parse config: {}", message)
                }
            }
            ConfigError::InvalidValue {
                field,
                value,
                message,
            } => write!(
                f,
                "Invalid value '{}' for field '{}': {}",
                value, field, message
            ),
            ConfigError::FileNotFound { path } => {
                write!(f, "Configuration file not found: {}", path)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for OrderDeskError {
    fn from(err: ConfigError) -> Self {
        OrderDeskError::Config(err)
    }
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<ExportError> for OrderDeskError {
    fn from(err: ExportError) -> Self {
        OrderDeskError::Export(err)
    }
}

impl From<serde_json::Error> for OrderDeskError {
    fn from(err: serde_json::Error) -> Self {
        OrderDeskError::Validation(ValidationError::InvalidJson {
            message: err.to_string(),
        })
    }
}

impl From<serde_yaml::Error> for OrderDeskError {
    fn from(err: serde_yaml::Error) -> Self {
        OrderDeskError::Config(ConfigError::ParseError {
            file: None,
            message: err.to_string(),
        })
    }
}

/// Storage and service traits return `anyhow::Result`; typed errors that were
/// boxed into an `anyhow::Error` are recovered here.
impl From<anyhow::Error> for OrderDeskError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<OrderDeskError>() {
            Ok(typed) => typed,
            Err(err) => match err.downcast::<StorageError>() {
                Ok(storage) => OrderDeskError::Storage(storage),
                Err(err) => OrderDeskError::Internal(err.to_string()),
            },
        }
    }
}

// =============================================================================
// Result type alias
// =============================================================================

/// A specialized Result type for orderdesk operations
pub type OrderDeskResult<T> = Result<T, OrderDeskError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_error_display() {
        let err = EntityError::not_found("order", Uuid::nil());
        assert!(err.to_string().contains("order"));
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_entity_error_status_code() {
        let err = EntityError::not_found("customer", Uuid::nil());
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_validation_error_multiple_fields() {
        let err = ValidationError::FieldErrors(vec![
            FieldValidationError {
                field: "username".to_string(),
                message: "required".to_string(),
            },
            FieldValidationError {
                field: "email".to_string(),
                message: "invalid format".to_string(),
            },
        ]);
        let display = err.to_string();
        assert!(display.contains("username"));
        assert!(display.contains("email"));
    }

    #[test]
    fn test_duplicate_maps_to_bad_request() {
        let err: OrderDeskError = ValidationError::Duplicate {
            field: "email".to_string(),
            value: "a@b.gr".to_string(),
        }
        .into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), "DUPLICATE_VALUE");
        assert!(err.to_response().details.is_some());
    }

    #[test]
    fn test_unauthorized_maps_to_401() {
        let err: OrderDeskError = RequestError::Unauthorized {
            message: "wrong password".to_string(),
        }
        .into();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.error_code(), "UNAUTHORIZED");
    }

    #[test]
    fn test_anyhow_roundtrip_keeps_typed_error() {
        let original: OrderDeskError = EntityError::not_found("item", Uuid::nil()).into();
        let boxed = anyhow::Error::new(original);
        let recovered: OrderDeskError = boxed.into();
        assert_eq!(recovered.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_anyhow_wrapped_storage_error_is_recovered() {
        let boxed: anyhow::Error = StorageError::ConnectionError {
            backend: "postgres".to_string(),
            message: "connection refused".to_string(),
        }
        .into();
        let recovered: OrderDeskError = boxed.into();
        assert!(matches!(
            recovered,
            OrderDeskError::Storage(StorageError::ConnectionError { .. })
        ));
        assert_eq!(recovered.error_code(), "STORAGE_ERROR");
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let err: OrderDeskError = json_err.into();
        assert!(matches!(
            err,
            OrderDeskError::Validation(ValidationError::InvalidJson { .. })
        ));
    }
}
