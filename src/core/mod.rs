//! Core module containing the fundamental traits and types of the service

pub mod auth;
pub mod entity;
pub mod error;
pub mod field;
pub mod module;
pub mod query;
pub mod service;
pub mod validation;

pub use auth::{AuthContext, AuthPolicy, AuthProvider, CurrentUser, NoAuthProvider};
pub use entity::{Data, Entity};
pub use error::{OrderDeskError, OrderDeskResult};
pub use field::{FieldFormat, FieldValue, ToFieldValue};
pub use module::Module;
pub use query::{FieldFilters, PaginatedResponse, PaginationMeta, QueryParams};
pub use service::DataService;
