//! Payment entity module

pub mod descriptor;
pub mod handlers;
pub mod model;

pub use descriptor::PaymentDescriptor;
pub use model::{Payment, PaymentInput};
