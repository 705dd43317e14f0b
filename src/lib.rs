//! # orderdesk
//!
//! Backend for a small trading business: customers, items, orders with
//! their line items, and payments, plus the reports built on top of them.
//!
//! ## Features
//!
//! - **Entities**: macro-declared records with declarative validation and
//!   filtering of JSON payloads
//! - **Derived amounts**: order totals, paid and remaining amounts computed
//!   from line items and payments, never stored
//! - **Reports**: customer debt, top and overdue debtors, top selling items,
//!   daily sales and payments, sales report with filters
//! - **Exports**: sales report, top debtors and order summaries as XLSX or PDF
//! - **Token auth**: registration, login and `Authorization: Token <key>`
//! - **Storage**: in-memory or PostgreSQL behind the same `DataService` trait
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use orderdesk::prelude::*;
//! use orderdesk::module::OrderDeskModule;
//!
//! let store = EntityStore::in_memory();
//! let state = AppState::new(store, ReportsConfig::default());
//!
//! ServerBuilder::new()
//!     .register_module(OrderDeskModule::new(state))
//!     .serve("127.0.0.1:8000")
//!     .await?;
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod export;
pub mod module;
pub mod reports;
pub mod seed;
pub mod server;
pub mod storage;
pub mod store;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Traits ===
    pub use crate::core::{
        auth::{AuthContext, AuthPolicy, AuthProvider, AuthState, CurrentUser, NoAuthProvider},
        entity::{Data, Entity},
        error::{EntityError, OrderDeskError, OrderDeskResult, ValidationError},
        field::{FieldFormat, FieldValue, ToFieldValue},
        module::Module,
        service::DataService,
    };

    // === Macros ===
    pub use crate::{
        add_filters_for_field, add_validators_for_field, impl_data_entity,
        impl_data_entity_validated,
    };

    // === Entities ===
    pub use crate::entities::{AuthToken, Customer, Item, Order, OrderItem, Payment, User};

    // === Storage ===
    pub use crate::storage::InMemoryDataService;
    pub use crate::store::EntityStore;

    // === Config ===
    pub use crate::config::{AppConfig, ReportsConfig};

    // === Server ===
    pub use crate::server::{AppState, EntityDescriptor, EntityRegistry, ServerBuilder};

    // === External dependencies ===
    pub use chrono::{DateTime, NaiveDate, Utc};
    pub use rust_decimal::Decimal;
    pub use serde::{Deserialize, Serialize};
    pub use uuid::Uuid;
}
