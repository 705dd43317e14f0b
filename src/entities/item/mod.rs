//! Item entity module

pub mod descriptor;
pub mod handlers;
pub mod model;

pub use descriptor::ItemDescriptor;
pub use model::{Item, ItemInput};
