//! Business entities and their HTTP surface
//!
//! Each entity lives in its own module with the same layout: `model`
//! (struct, validation rules, input payloads), `handlers` (axum handlers)
//! and `descriptor` (routes registered with the [`EntityRegistry`]).
//!
//! [`EntityRegistry`]: crate::server::EntityRegistry

#[macro_use]
pub mod macros;

pub mod customer;
pub mod item;
pub mod order;
pub mod order_item;
pub mod payment;
pub mod user;

pub use customer::Customer;
pub use item::Item;
pub use order::Order;
pub use order_item::OrderItem;
pub use payment::Payment;
pub use user::{AuthToken, User};

use crate::core::error::{OrderDeskError, OrderDeskResult, ValidationError};
use crate::core::query::{FieldFilters, QueryParams, apply_search, apply_sort};
use crate::core::Data;
use chrono::Utc;
use serde_json::Value;
use uuid::Uuid;

/// Parse a path id
pub fn parse_id(raw: &str) -> OrderDeskResult<Uuid> {
    Uuid::parse_str(raw.trim()).map_err(|_| {
        ValidationError::InvalidUuid {
            value: raw.to_string(),
        }
        .into()
    })
}

/// Parse an optional boolean query value (`true`/`false`/`1`/`0`)
pub fn parse_flag(field: &str, raw: &str) -> OrderDeskResult<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ValidationError::FieldError {
            field: field.to_string(),
            message: format!("expected true or false (got: {})", raw),
        }
        .into()),
    }
}

/// Merge the editable keys of a validated JSON patch into an entity and
/// bump `updated_at`. Keys outside `editable` are ignored.
pub fn apply_patch<T: Data>(entity: &T, patch: Value, editable: &[&str]) -> OrderDeskResult<T> {
    let mut current = serde_json::to_value(entity)
        .map_err(|e| OrderDeskError::Internal(format!("failed to serialize entity: {}", e)))?;

    if let (Value::Object(target), Value::Object(changes)) = (&mut current, patch) {
        for (key, value) in changes {
            if editable.contains(&key.as_str()) {
                target.insert(key, value);
            }
        }
        target.insert("updated_at".to_string(), Value::String(Utc::now().to_rfc3339()));
    }

    Ok(serde_json::from_value(current)?)
}

/// Field filters, free-text search and sort applied to a loaded list
pub fn filter_records<T: Data>(
    records: Vec<T>,
    params: &QueryParams,
    filters: &FieldFilters,
    allowed: &[&str],
    search: Option<&str>,
) -> Vec<T> {
    let records = filters.apply(records, allowed);
    let records = apply_search(records, search);
    apply_sort(records, params.sort.as_deref())
}
