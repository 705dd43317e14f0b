//! Entity descriptor for Item

use super::handlers::{
    create_item, delete_item, get_item, list_items, sold_by_date, sold_by_month, top_selling,
    update_item,
};
use crate::server::{AppState, EntityDescriptor};
use axum::{Router, routing::get};

/// Descriptor for the Item entity
pub struct ItemDescriptor {
    pub state: AppState,
}

impl ItemDescriptor {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl EntityDescriptor for ItemDescriptor {
    fn entity_type(&self) -> &str {
        "item"
    }

    fn plural(&self) -> &str {
        "items"
    }

    fn build_routes(&self) -> Router {
        Router::new()
            .route("/items", get(list_items).post(create_item))
            .route("/items/top_selling", get(top_selling))
            .route("/items/sold_by_date", get(sold_by_date))
            .route("/items/sold_by_month", get(sold_by_month))
            .route(
                "/items/{id}",
                get(get_item)
                    .put(update_item)
                    .patch(update_item)
                    .delete(delete_item),
            )
            .with_state(self.state.clone())
    }
}
