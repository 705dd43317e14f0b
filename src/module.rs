//! The order desk module: every entity and report of the application

use crate::config::AppConfig;
use crate::core::auth::{AuthPolicy, AuthState};
use crate::core::module::Module;
use crate::entities::customer::CustomerDescriptor;
use crate::entities::item::ItemDescriptor;
use crate::entities::order::OrderDescriptor;
use crate::entities::order_item::OrderItemDescriptor;
use crate::entities::payment::PaymentDescriptor;
use crate::entities::user::{self, TokenAuthProvider, UserDescriptor};
use crate::reports::ReportsDescriptor;
use crate::server::{AppState, EntityRegistry, ServerBuilder};
use crate::store::EntityStore;
use axum::Router;
use std::sync::Arc;

pub struct OrderDeskModule {
    state: AppState,
}

impl OrderDeskModule {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl Module for OrderDeskModule {
    fn name(&self) -> &str {
        "orderdesk"
    }

    fn version(&self) -> &str {
        env!("CARGO_PKG_VERSION")
    }

    fn entity_types(&self) -> Vec<&str> {
        vec![
            "customer",
            "item",
            "order",
            "order_item",
            "payment",
            "user",
            "report",
        ]
    }

    fn register_entities(&self, registry: &mut EntityRegistry) {
        let state = &self.state;
        registry.register(Box::new(CustomerDescriptor::new(state.clone())));
        registry.register(Box::new(ItemDescriptor::new(state.clone())));
        registry.register(Box::new(OrderDescriptor::new(state.clone())));
        registry.register(Box::new(OrderItemDescriptor::new(state.clone())));
        registry.register(Box::new(PaymentDescriptor::new(state.clone())));
        registry.register(Box::new(UserDescriptor::new(state.clone())));
        registry.register(Box::new(ReportsDescriptor::new(state.clone())));
    }

    fn public_routes(&self) -> Option<Router> {
        Some(user::public_routes(self.state.clone()))
    }
}

/// Server builder for the whole application as configured
pub fn server(store: EntityStore, config: &AppConfig) -> ServerBuilder {
    let state = AppState::new(store.clone(), config.reports.clone());
    let builder = ServerBuilder::new()
        .with_cors(config.server.cors)
        .register_module(OrderDeskModule::new(state));

    if !config.auth.enabled {
        tracing::warn!("authentication disabled, every route is public");
        return builder;
    }
    builder.with_auth(AuthState::new(
        Arc::new(TokenAuthProvider::new(store)),
        AuthPolicy::parse_policy(&config.auth.default_policy),
    ))
}
