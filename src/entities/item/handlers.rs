//! Item HTTP handlers

use super::model::{EDITABLE_FIELDS, FILTER_FIELDS, Item, ItemInput};
use crate::core::error::{OrderDeskResult, ValidationError};
use crate::core::query::{PaginatedResponse, QueryParams};
use crate::core::validation::Validated;
use crate::entities::{apply_patch, filter_records, parse_id};
use crate::reports::period::{self, Month};
use crate::reports::sales::{self, QuantityByItem};
use crate::server::AppState;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Default, Deserialize)]
pub struct SoldQuery {
    pub date: Option<String>,
    pub month: Option<String>,
}

pub async fn list_items(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
    Query(raw): Query<HashMap<String, String>>,
) -> OrderDeskResult<Json<PaginatedResponse<Item>>> {
    let filters = params.field_filters(&raw);
    let items = state.store.items.list().await?;
    let items = filter_records(
        items,
        &params,
        &filters,
        FILTER_FIELDS,
        params.search.as_deref(),
    );
    Ok(Json(PaginatedResponse::paginate(items, &params)))
}

pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> OrderDeskResult<Json<Item>> {
    let id = parse_id(&id)?;
    Ok(Json(state.store.require_item(&id).await?))
}

pub async fn create_item(
    State(state): State<AppState>,
    payload: Validated<Item>,
) -> OrderDeskResult<(StatusCode, Json<Item>)> {
    let input: ItemInput = payload.parse()?;
    let item = state.store.items.create(input.into()).await?;
    tracing::info!(item_id = %item.id, name = %item.name, "item created");
    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Validated<Item>,
) -> OrderDeskResult<Json<Item>> {
    let id = parse_id(&id)?;
    let current = state.store.require_item(&id).await?;
    let updated = apply_patch(&current, payload.into_inner(), EDITABLE_FIELDS)?;
    Ok(Json(state.store.items.update(&id, updated).await?))
}

pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> OrderDeskResult<StatusCode> {
    let id = parse_id(&id)?;
    state.store.delete_item(&id).await?;
    tracing::info!(item_id = %id, "item deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Best sellers by quantity, as `{name: quantity}` in rank order
pub async fn top_selling(State(state): State<AppState>) -> OrderDeskResult<Json<QuantityByItem>> {
    let ledger = state.store.ledger().await?;
    Ok(Json(sales::top_selling(&ledger, state.reports.top_limit)))
}

/// Quantities sold per item on `?date=YYYY-MM-DD`
pub async fn sold_by_date(
    State(state): State<AppState>,
    Query(query): Query<SoldQuery>,
) -> OrderDeskResult<Json<QuantityByItem>> {
    let raw = query
        .date
        .filter(|d| !d.trim().is_empty())
        .ok_or_else(|| ValidationError::MissingArgument {
            argument: "date (YYYY-MM-DD)".to_string(),
        })?;
    let date = period::parse_date(&raw)?;
    let ledger = state.store.ledger().await?;
    Ok(Json(sales::sold_by_date(&ledger, date)))
}

/// Quantities sold per item during `?month=YYYY-MM`
pub async fn sold_by_month(
    State(state): State<AppState>,
    Query(query): Query<SoldQuery>,
) -> OrderDeskResult<Json<QuantityByItem>> {
    let raw = query
        .month
        .filter(|m| !m.trim().is_empty())
        .ok_or_else(|| ValidationError::MissingArgument {
            argument: "month (YYYY-MM)".to_string(),
        })?;
    let month = Month::parse(&raw)?;
    let ledger = state.store.ledger().await?;
    Ok(Json(sales::sold_by_month(&ledger, month)))
}
