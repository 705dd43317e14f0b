//! Customer entity model with validation and filtering

use crate::prelude::*;

impl_data_entity_validated!(
    Customer,
    "customer",
    "customers",
    ["first_name", "last_name", "phone", "tax_id"],
    {
        first_name: String,
        last_name: String,
        phone: String,
        /// Tax identification number
        tax_id: String,
        email: Option<String>,
    },
    validate: {
        create: {
            first_name: [required string_length(1, 100)],
            last_name: [required string_length(1, 100)],
            phone: [required string_length(5, 20)],
            tax_id: [required string_length(1, 20)],
            email: [optional email],
        },
        update: {
            first_name: [optional string_length(1, 100)],
            last_name: [optional string_length(1, 100)],
            phone: [optional string_length(5, 20)],
            tax_id: [optional string_length(1, 20)],
            email: [optional email],
        },
    },
    filters: {
        create: {
            first_name: [trim],
            last_name: [trim],
            phone: [trim],
            tax_id: [trim uppercase],
            email: [trim lowercase],
        },
        update: {
            first_name: [trim],
            last_name: [trim],
            phone: [trim],
            tax_id: [trim uppercase],
            email: [trim lowercase],
        },
    }
);

/// Fields accepted as exact-match list filters
pub const FILTER_FIELDS: &[&str] = &["first_name", "last_name", "phone", "tax_id"];

/// Fields a PUT/PATCH may change
pub const EDITABLE_FIELDS: &[&str] = &["first_name", "last_name", "phone", "tax_id", "email"];

impl Customer {
    /// "First Last"
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Payload for creating a customer
#[derive(Debug, Deserialize)]
pub struct CustomerInput {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub tax_id: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl From<CustomerInput> for Customer {
    fn from(input: CustomerInput) -> Self {
        Customer::new(
            input.first_name,
            input.last_name,
            input.phone,
            input.tax_id,
            input.email.filter(|e| !e.is_empty()),
        )
    }
}
