//! Business reports
//!
//! Every report is a pure grouping or summation over a [`Ledger`], a
//! snapshot of all business records loaded once per request. The HTTP
//! layer lives in `handlers` and `descriptor`; entity-specific reports
//! (customer debt, top selling items, order summaries) are routed by
//! their entity modules.

pub mod debt;
pub mod descriptor;
pub mod handlers;
pub mod ledger;
pub mod period;
pub mod sales;
pub mod tables;
pub mod views;

pub use descriptor::ReportsDescriptor;
pub use ledger::{Ledger, OrderTotals};
