//! OrderItem entity module

pub mod descriptor;
pub mod handlers;
pub mod model;

pub use descriptor::OrderItemDescriptor;
pub use model::{OrderItem, OrderItemInput};
