//! Entity descriptor for Payment

use super::handlers::{
    create_payment, delete_payment, get_payment, list_payments, today_payments, update_payment,
};
use crate::server::{AppState, EntityDescriptor};
use axum::{Router, routing::get};

/// Descriptor for the Payment entity
pub struct PaymentDescriptor {
    pub state: AppState,
}

impl PaymentDescriptor {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl EntityDescriptor for PaymentDescriptor {
    fn entity_type(&self) -> &str {
        "payment"
    }

    fn plural(&self) -> &str {
        "payments"
    }

    fn build_routes(&self) -> Router {
        Router::new()
            .route("/payments", get(list_payments).post(create_payment))
            .route("/payments/today", get(today_payments))
            .route(
                "/payments/{id}",
                get(get_payment)
                    .put(update_payment)
                    .patch(update_payment)
                    .delete(delete_payment),
            )
            .with_state(self.state.clone())
    }
}
