//! Entity descriptor for Customer

use super::handlers::{
    create_customer, customer_debt, delete_customer, get_customer, list_customers,
    update_customer,
};
use crate::server::{AppState, EntityDescriptor};
use axum::{Router, routing::get};

/// Descriptor for the Customer entity
pub struct CustomerDescriptor {
    pub state: AppState,
}

impl CustomerDescriptor {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl EntityDescriptor for CustomerDescriptor {
    fn entity_type(&self) -> &str {
        "customer"
    }

    fn plural(&self) -> &str {
        "customers"
    }

    fn build_routes(&self) -> Router {
        Router::new()
            .route("/customers", get(list_customers).post(create_customer))
            .route(
                "/customers/{id}",
                get(get_customer)
                    .put(update_customer)
                    .patch(update_customer)
                    .delete(delete_customer),
            )
            .route("/customers/{id}/debt", get(customer_debt))
            .with_state(self.state.clone())
    }
}
