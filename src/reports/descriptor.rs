//! Routes of the dashboard and the sales report

use super::handlers::{
    daily_payments, daily_sales, dashboard_index, overdue_debtors, sales_export, sales_report,
    top_debtors, top_debtors_export,
};
use crate::server::{AppState, EntityDescriptor};
use axum::{Router, routing::get};

pub struct ReportsDescriptor {
    pub state: AppState,
}

impl ReportsDescriptor {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl EntityDescriptor for ReportsDescriptor {
    fn entity_type(&self) -> &str {
        "report"
    }

    fn plural(&self) -> &str {
        "reports"
    }

    fn build_routes(&self) -> Router {
        Router::new()
            .route("/dashboard", get(dashboard_index))
            .route("/dashboard/daily_sales", get(daily_sales))
            .route("/dashboard/daily_payments", get(daily_payments))
            .route("/dashboard/top_debtors", get(top_debtors))
            .route("/dashboard/top_debtors/export", get(top_debtors_export))
            .route("/dashboard/overdue_debtors", get(overdue_debtors))
            .route("/reports/sales", get(sales_report))
            .route("/reports/sales/export", get(sales_export))
            .with_state(self.state.clone())
    }
}
