//! Dashboard and report HTTP handlers

use super::debt::{self, Debtor};
use super::period::{self, DateRange, Month};
use super::sales::{self, DailyPayments, DailySales, SalesFilter, SalesReport};
use super::tables;
use crate::core::error::OrderDeskResult;
use crate::entities::parse_id;
use crate::export::{self, ExportFormat, ExportedFile};
use crate::server::AppState;
use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use serde_json::{Value, json};

#[derive(Debug, Default, Deserialize)]
pub struct DateQuery {
    pub date: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct OverdueQuery {
    pub days: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FormatQuery {
    pub format: Option<String>,
}

/// Parameters of the sales report and its export
#[derive(Debug, Default, Deserialize)]
pub struct SalesQuery {
    pub date: Option<String>,
    pub month: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub customer: Option<String>,
    pub format: Option<String>,
}

impl SalesQuery {
    /// Parse the criteria; a `customer` must refer to an existing record
    async fn filter(&self, state: &AppState) -> OrderDeskResult<SalesFilter> {
        let date = non_empty(&self.date).map(period::parse_date).transpose()?;
        let month = non_empty(&self.month).map(Month::parse).transpose()?;
        let range = DateRange::parse(self.date_from.as_deref(), self.date_to.as_deref())?;
        let customer = match non_empty(&self.customer) {
            Some(raw) => {
                let id = parse_id(raw)?;
                state.store.require_customer(&id).await?;
                Some(id)
            }
            None => None,
        };

        Ok(SalesFilter {
            date,
            month,
            range,
            customer,
        })
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

/// Links to every dashboard report
pub async fn dashboard_index() -> Json<Value> {
    Json(json!({
        "daily_sales": "/dashboard/daily_sales",
        "daily_payments": "/dashboard/daily_payments",
        "top_debtors": "/dashboard/top_debtors",
        "top_debtors_export": "/dashboard/top_debtors/export",
        "overdue_debtors": "/dashboard/overdue_debtors",
        "top_selling": "/items/top_selling",
        "sales_report": "/reports/sales",
        "sales_export": "/reports/sales/export",
    }))
}

pub async fn daily_sales(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> OrderDeskResult<Json<DailySales>> {
    let date = period::date_or_today(query.date.as_deref())?;
    let ledger = state.store.ledger().await?;
    Ok(Json(sales::daily_sales(&ledger, date)))
}

pub async fn daily_payments(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> OrderDeskResult<Json<DailyPayments>> {
    let date = period::date_or_today(query.date.as_deref())?;
    let ledger = state.store.ledger().await?;
    Ok(Json(sales::daily_payments(&ledger, date)))
}

pub async fn top_debtors(State(state): State<AppState>) -> OrderDeskResult<Json<Vec<Debtor>>> {
    let ledger = state.store.ledger().await?;
    Ok(Json(debt::top_debtors(&ledger, state.reports.top_limit)))
}

/// Debts of orders older than `days` (default from the report settings)
pub async fn overdue_debtors(
    State(state): State<AppState>,
    Query(query): Query<OverdueQuery>,
) -> OrderDeskResult<Json<Vec<Debtor>>> {
    let days = period::parse_days(query.days.as_deref(), state.reports.overdue_days)?;
    let cutoff = period::overdue_cutoff(period::today(), days);
    let ledger = state.store.ledger().await?;
    Ok(Json(debt::overdue_debtors(&ledger, cutoff)))
}

pub async fn top_debtors_export(
    State(state): State<AppState>,
    Query(query): Query<FormatQuery>,
) -> OrderDeskResult<ExportedFile> {
    let format = ExportFormat::parse(query.format.as_deref())?;
    let ledger = state.store.ledger().await?;
    let debtors = debt::top_debtors(&ledger, state.reports.top_limit);

    let subtitle = format!("As of {}", period::today());
    let table = tables::debtors_table(&debtors, &subtitle, &state.reports.currency);
    Ok(export::render(&table, format, "top-debtors")?)
}

pub async fn sales_report(
    State(state): State<AppState>,
    Query(query): Query<SalesQuery>,
) -> OrderDeskResult<Json<SalesReport>> {
    let filter = query.filter(&state).await?;
    let ledger = state.store.ledger().await?;
    Ok(Json(sales::sales_report(&ledger, &filter)))
}

pub async fn sales_export(
    State(state): State<AppState>,
    Query(query): Query<SalesQuery>,
) -> OrderDeskResult<ExportedFile> {
    let format = ExportFormat::parse(query.format.as_deref())?;
    let filter = query.filter(&state).await?;
    let ledger = state.store.ledger().await?;

    let report = sales::sales_report(&ledger, &filter);
    let table = tables::sales_table(&report, &filter.describe(&ledger), &state.reports.currency);
    Ok(export::render(&table, format, "sales-report")?)
}
