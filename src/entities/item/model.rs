//! Item entity model with validation and filtering

use crate::prelude::*;

/// Highest accepted unit price
pub const MAX_PRICE: f64 = 1_000_000_000.0;

impl_data_entity_validated!(
    Item,
    "item",
    "items",
    ["name", "description"],
    {
        name: String,
        #[serde(default)]
        description: String,
        #[serde(default)]
        category: Option<String>,
        /// Unit price
        price: Decimal,
    },
    validate: {
        create: {
            name: [required string_length(1, 200)],
            description: [optional string_length(0, 2000)],
            category: [optional string_length(0, 100)],
            price: [required decimal non_negative max_value(MAX_PRICE)],
        },
        update: {
            name: [optional string_length(1, 200)],
            description: [optional string_length(0, 2000)],
            category: [optional string_length(0, 100)],
            price: [optional decimal non_negative max_value(MAX_PRICE)],
        },
    },
    filters: {
        create: {
            name: [trim],
            category: [trim],
            price: [round_decimals(2)],
        },
        update: {
            name: [trim],
            category: [trim],
            price: [round_decimals(2)],
        },
    }
);

pub const FILTER_FIELDS: &[&str] = &["name", "category"];

pub const EDITABLE_FIELDS: &[&str] = &["name", "description", "category", "price"];

/// Payload for creating an item
#[derive(Debug, Deserialize)]
pub struct ItemInput {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: Option<String>,
    pub price: Decimal,
}

impl From<ItemInput> for Item {
    fn from(input: ItemInput) -> Self {
        Item::new(
            input.name,
            input.description,
            input.category.filter(|c| !c.is_empty()),
            input.price,
        )
    }
}
