//! OrderItem entity model: one line of an order

use crate::prelude::*;

/// Highest accepted quantity on a single line
pub const MAX_QUANTITY: u32 = 1_000_000;

impl_data_entity_validated!(
    OrderItem,
    "order_item",
    "order-items",
    [],
    {
        order: Uuid,
        item: Uuid,
        quantity: u32,
    },
    validate: {
        create: {
            order: [required uuid],
            item: [required uuid],
            quantity: [required positive max_value(MAX_QUANTITY as f64)],
        },
        update: {
            order: [optional uuid],
            item: [optional uuid],
            quantity: [optional positive max_value(MAX_QUANTITY as f64)],
        },
    },
    filters: {
        create: {
            order: [trim],
            item: [trim],
        },
        update: {
            order: [trim],
            item: [trim],
        },
    }
);

pub const FILTER_FIELDS: &[&str] = &["order", "item", "quantity"];

pub const EDITABLE_FIELDS: &[&str] = &["order", "item", "quantity"];

/// Payload for creating an order line
#[derive(Debug, Deserialize)]
pub struct OrderItemInput {
    pub order: Uuid,
    pub item: Uuid,
    pub quantity: u32,
}

impl From<OrderItemInput> for OrderItem {
    fn from(input: OrderItemInput) -> Self {
        OrderItem::new(input.order, input.item, input.quantity)
    }
}
