//! Payment entity model with validation and filtering

use crate::prelude::*;

pub const MAX_AMOUNT: f64 = 1_000_000_000_000.0;

impl_data_entity_validated!(
    Payment,
    "payment",
    "payments",
    [],
    {
        /// Order this payment is booked against
        order: Uuid,
        amount: Decimal,
        date: NaiveDate,
    },
    validate: {
        create: {
            order: [required uuid],
            amount: [required decimal positive max_value(MAX_AMOUNT)],
            date: [optional date_format("%Y-%m-%d")],
        },
        update: {
            order: [optional uuid],
            amount: [optional decimal positive max_value(MAX_AMOUNT)],
            date: [optional date_format("%Y-%m-%d")],
        },
    },
    filters: {
        create: {
            order: [trim],
            amount: [round_decimals(2)],
            date: [trim],
        },
        update: {
            order: [trim],
            amount: [round_decimals(2)],
            date: [trim],
        },
    }
);

pub const FILTER_FIELDS: &[&str] = &["order", "date", "amount"];

pub const EDITABLE_FIELDS: &[&str] = &["order", "amount", "date"];

/// Payload for recording a payment
#[derive(Debug, Deserialize)]
pub struct PaymentInput {
    pub order: Uuid,
    pub amount: Decimal,
    #[serde(default)]
    pub date: Option<NaiveDate>,
}
