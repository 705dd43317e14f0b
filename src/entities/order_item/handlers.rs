//! OrderItem HTTP handlers

use super::model::{EDITABLE_FIELDS, FILTER_FIELDS, OrderItem, OrderItemInput};
use crate::core::error::OrderDeskResult;
use crate::core::query::{PaginatedResponse, QueryParams};
use crate::core::validation::Validated;
use crate::entities::{apply_patch, filter_records, parse_id};
use crate::reports::period;
use crate::reports::views::OrderItemView;
use crate::server::AppState;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use std::collections::HashMap;

/// List order lines; `order__date` filters on the owning order's date
pub async fn list_order_items(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
    Query(raw): Query<HashMap<String, String>>,
) -> OrderDeskResult<Json<PaginatedResponse<OrderItemView>>> {
    let mut filters = params.field_filters(&raw);
    let order_date = filters
        .take("order__date")
        .map(|raw| period::parse_date(&raw))
        .transpose()?;

    let ledger = state.store.ledger().await?;
    let lines = state.store.order_items.list().await?;
    let views: Vec<OrderItemView> = filter_records(lines, &params, &filters, FILTER_FIELDS, None)
        .iter()
        .filter(|line| {
            order_date.is_none_or(|date| ledger.order(&line.order).is_some_and(|o| o.date == date))
        })
        .map(|line| OrderItemView::build(&ledger, line))
        .collect();

    Ok(Json(PaginatedResponse::paginate(views, &params)))
}

pub async fn get_order_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> OrderDeskResult<Json<OrderItemView>> {
    let id = parse_id(&id)?;
    let line = state.store.require_order_item(&id).await?;
    let ledger = state.store.ledger().await?;
    Ok(Json(OrderItemView::build(&ledger, &line)))
}

pub async fn create_order_item(
    State(state): State<AppState>,
    payload: Validated<OrderItem>,
) -> OrderDeskResult<(StatusCode, Json<OrderItemView>)> {
    let input: OrderItemInput = payload.parse()?;
    state.store.require_order(&input.order).await?;
    state.store.require_item(&input.item).await?;

    let line = state.store.order_items.create(input.into()).await?;
    tracing::debug!(order_item_id = %line.id, order_id = %line.order, "order line created");

    let ledger = state.store.ledger().await?;
    Ok((StatusCode::CREATED, Json(OrderItemView::build(&ledger, &line))))
}

pub async fn update_order_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Validated<OrderItem>,
) -> OrderDeskResult<Json<OrderItemView>> {
    let id = parse_id(&id)?;
    let current = state.store.require_order_item(&id).await?;
    let updated = apply_patch(&current, payload.into_inner(), EDITABLE_FIELDS)?;
    if updated.order != current.order {
        state.store.require_order(&updated.order).await?;
    }
    if updated.item != current.item {
        state.store.require_item(&updated.item).await?;
    }

    let line = state.store.order_items.update(&id, updated).await?;
    let ledger = state.store.ledger().await?;
    Ok(Json(OrderItemView::build(&ledger, &line)))
}

pub async fn delete_order_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> OrderDeskResult<StatusCode> {
    let id = parse_id(&id)?;
    state.store.require_order_item(&id).await?;
    state.store.order_items.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
