//! Order HTTP handlers

use super::model::{EDITABLE_FIELDS, FILTER_FIELDS, Order, OrderInput};
use crate::core::error::OrderDeskResult;
use crate::core::query::{PaginatedResponse, QueryParams};
use crate::core::validation::Validated;
use crate::entities::{apply_patch, filter_records, parse_flag, parse_id};
use crate::export::{self, ExportFormat, ExportedFile};
use crate::reports::period;
use crate::reports::tables;
use crate::reports::views::{OrderSummary, OrderView};
use crate::server::AppState;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Default, Deserialize)]
pub struct ExportQuery {
    pub format: Option<String>,
}

/// List orders. Besides the plain field filters this accepts `is_paid`
/// and a `search` over the customer's name.
pub async fn list_orders(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
    Query(raw): Query<HashMap<String, String>>,
) -> OrderDeskResult<Json<PaginatedResponse<OrderView>>> {
    let mut filters = params.field_filters(&raw);
    let is_paid = filters
        .take("is_paid")
        .map(|raw| parse_flag("is_paid", &raw))
        .transpose()?;
    let search = params
        .search
        .as_deref()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty());

    let ledger = state.store.ledger().await?;
    let orders = filter_records(ledger.orders().to_vec(), &params, &filters, FILTER_FIELDS, None);

    let views: Vec<OrderView> = orders
        .iter()
        .filter(|order| {
            search.as_ref().is_none_or(|term| {
                ledger
                    .customer(&order.customer)
                    .is_some_and(|c| {
                        c.first_name.to_lowercase().contains(term)
                            || c.last_name.to_lowercase().contains(term)
                    })
            })
        })
        .map(|order| OrderView::build(&ledger, order))
        .filter(|view| is_paid.is_none_or(|flag| view.totals.is_paid == flag))
        .collect();

    Ok(Json(PaginatedResponse::paginate(views, &params)))
}

pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> OrderDeskResult<Json<OrderView>> {
    let id = parse_id(&id)?;
    let order = state.store.require_order(&id).await?;
    let ledger = state.store.ledger().await?;
    Ok(Json(OrderView::build(&ledger, &order)))
}

/// Create an order and its line items in one request.
///
/// Every reference is checked before anything is written, and a failed line
/// insert removes the partial order.
pub async fn create_order(
    State(state): State<AppState>,
    payload: Validated<Order>,
) -> OrderDeskResult<(StatusCode, Json<OrderView>)> {
    let input: OrderInput = payload.parse()?;
    state.store.require_customer(&input.customer).await?;

    let mut lines = Vec::with_capacity(input.items.len());
    for (index, line) in input.items.iter().enumerate() {
        let quantity = line.checked_quantity(index)?;
        state.store.require_item(&line.item).await?;
        lines.push((line.item, quantity));
    }

    let date = input.date.unwrap_or_else(period::today);
    let order = state
        .store
        .create_order(Order::new(input.customer, date), &lines)
        .await?;
    tracing::info!(order_id = %order.id, customer_id = %order.customer, lines = input.items.len(), "order created");

    let ledger = state.store.ledger().await?;
    Ok((StatusCode::CREATED, Json(OrderView::build(&ledger, &order))))
}

pub async fn update_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Validated<Order>,
) -> OrderDeskResult<Json<OrderView>> {
    let id = parse_id(&id)?;
    let current = state.store.require_order(&id).await?;
    let updated = apply_patch(&current, payload.into_inner(), EDITABLE_FIELDS)?;
    if updated.customer != current.customer {
        state.store.require_customer(&updated.customer).await?;
    }
    let order = state.store.orders.update(&id, updated).await?;
    let ledger = state.store.ledger().await?;
    Ok(Json(OrderView::build(&ledger, &order)))
}

pub async fn delete_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> OrderDeskResult<StatusCode> {
    let id = parse_id(&id)?;
    state.store.delete_order(&id).await?;
    tracing::info!(order_id = %id, "order deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Orders dated today
pub async fn today_orders(State(state): State<AppState>) -> OrderDeskResult<Json<Vec<OrderView>>> {
    let today = period::today();
    let ledger = state.store.ledger().await?;
    let views = ledger
        .orders()
        .iter()
        .filter(|order| order.date == today)
        .map(|order| OrderView::build(&ledger, order))
        .collect();
    Ok(Json(views))
}

pub async fn order_summary(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> OrderDeskResult<Json<OrderSummary>> {
    let id = parse_id(&id)?;
    let order = state.store.require_order(&id).await?;
    let ledger = state.store.ledger().await?;
    Ok(Json(OrderSummary::build(&ledger, &order)))
}

/// The order summary as an xlsx or pdf attachment
pub async fn export_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<ExportQuery>,
) -> OrderDeskResult<ExportedFile> {
    let format = ExportFormat::parse(query.format.as_deref())?;
    let id = parse_id(&id)?;
    let order = state.store.require_order(&id).await?;
    let ledger = state.store.ledger().await?;

    let summary = OrderSummary::build(&ledger, &order);
    let table = tables::order_table(&summary, &state.reports.currency);
    Ok(export::render(&table, format, &format!("order-{}", order.id))?)
}
