//! Entity descriptor for OrderItem

use super::handlers::{
    create_order_item, delete_order_item, get_order_item, list_order_items, update_order_item,
};
use crate::server::{AppState, EntityDescriptor};
use axum::{Router, routing::get};

/// Descriptor for the OrderItem entity
pub struct OrderItemDescriptor {
    pub state: AppState,
}

impl OrderItemDescriptor {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl EntityDescriptor for OrderItemDescriptor {
    fn entity_type(&self) -> &str {
        "order_item"
    }

    fn plural(&self) -> &str {
        "order-items"
    }

    fn build_routes(&self) -> Router {
        Router::new()
            .route("/order-items", get(list_order_items).post(create_order_item))
            .route(
                "/order-items/{id}",
                get(get_order_item)
                    .put(update_order_item)
                    .patch(update_order_item)
                    .delete(delete_order_item),
            )
            .with_state(self.state.clone())
    }
}
