//! Entity traits defining the core abstraction for all record types

use crate::core::field::FieldValue;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

/// Base trait for all entities in the system.
///
/// Every stored record has:
/// - id: Unique identifier
/// - type: Entity type name (e.g., "customer", "order_item")
/// - created_at: Creation timestamp
/// - updated_at: Last modification timestamp
///
/// Entities are serde-serializable so that any storage backend can persist
/// them as documents.
pub trait Entity: Clone + Send + Sync + Serialize + DeserializeOwned + 'static {
    /// The plural resource name used in URLs (e.g., "customers", "order-items")
    fn resource_name() -> &'static str;

    /// The singular resource name (e.g., "customer", "order_item")
    fn resource_name_singular() -> &'static str;

    /// Get the unique identifier for this entity instance
    fn id(&self) -> Uuid;

    /// Get the entity type name
    fn entity_type(&self) -> &str {
        Self::resource_name_singular()
    }

    /// Get the creation timestamp
    fn created_at(&self) -> DateTime<Utc>;

    /// Get the last update timestamp
    fn updated_at(&self) -> DateTime<Utc>;
}

/// Trait for data entities that expose their fields for querying.
///
/// Data entities extend the base Entity with:
/// - indexed_fields: Fields covered by free-text `search`
/// - field_value: Dynamic field access used by list filters
pub trait Data: Entity {
    /// List of fields that should be indexed for searching
    fn indexed_fields() -> &'static [&'static str];

    /// Get the value of a specific field by name
    fn field_value(&self, field: &str) -> Option<FieldValue>;

    /// Case-insensitive substring match over the indexed fields
    fn matches_search(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }
        Self::indexed_fields().iter().any(|field| {
            self.field_value(field)
                .map(|value| value.to_string().to_lowercase().contains(&term))
                .unwrap_or(false)
        })
    }
}
