//! Entity descriptor for Order

use super::handlers::{
    create_order, delete_order, export_order, get_order, list_orders, order_summary,
    today_orders, update_order,
};
use crate::server::{AppState, EntityDescriptor};
use axum::{Router, routing::get};

/// Descriptor for the Order entity
pub struct OrderDescriptor {
    pub state: AppState,
}

impl OrderDescriptor {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl EntityDescriptor for OrderDescriptor {
    fn entity_type(&self) -> &str {
        "order"
    }

    fn plural(&self) -> &str {
        "orders"
    }

    fn build_routes(&self) -> Router {
        Router::new()
            .route("/orders", get(list_orders).post(create_order))
            .route("/orders/today", get(today_orders))
            .route(
                "/orders/{id}",
                get(get_order)
                    .put(update_order)
                    .patch(update_order)
                    .delete(delete_order),
            )
            .route("/orders/{id}/summary", get(order_summary))
            .route("/orders/{id}/export", get(export_order))
            .with_state(self.state.clone())
    }
}
