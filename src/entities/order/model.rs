//! Order entity model with validation and filtering

use crate::entities::order_item::model::MAX_QUANTITY;
use crate::prelude::*;

impl_data_entity_validated!(
    Order,
    "order",
    "orders",
    [],
    {
        /// Owning customer
        customer: Uuid,
        date: NaiveDate,
    },
    validate: {
        create: {
            customer: [required uuid],
            date: [optional date_format("%Y-%m-%d")],
            items: [optional],
        },
        update: {
            customer: [optional uuid],
            date: [optional date_format("%Y-%m-%d")],
        },
    },
    filters: {
        create: {
            customer: [trim],
            date: [trim],
        },
        update: {
            customer: [trim],
            date: [trim],
        },
    }
);

pub const FILTER_FIELDS: &[&str] = &["customer", "date"];

pub const EDITABLE_FIELDS: &[&str] = &["customer", "date"];

/// Payload for creating an order together with its line items
#[derive(Debug, Deserialize)]
pub struct OrderInput {
    pub customer: Uuid,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub items: Vec<OrderLineInput>,
}

/// One line of an [`OrderInput`]
#[derive(Debug, Deserialize)]
pub struct OrderLineInput {
    pub item: Uuid,
    pub quantity: i64,
}

impl OrderLineInput {
    /// Quantity as a count in `1..=MAX_QUANTITY`, or a validation error naming the line
    pub fn checked_quantity(&self, index: usize) -> OrderDeskResult<u32> {
        u32::try_from(self.quantity)
            .ok()
            .filter(|q| (1..=MAX_QUANTITY).contains(q))
            .ok_or_else(|| {
                ValidationError::FieldError {
                    field: format!("items[{}].quantity", index),
                    message: format!(
                        "must be an integer between 1 and {} (got: {})",
                        MAX_QUANTITY, self.quantity
                    ),
                }
                .into()
            })
    }
}
