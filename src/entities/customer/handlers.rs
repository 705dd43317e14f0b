//! Customer HTTP handlers

use super::model::{Customer, CustomerInput, EDITABLE_FIELDS, FILTER_FIELDS};
use crate::core::error::OrderDeskResult;
use crate::core::query::{PaginatedResponse, QueryParams};
use crate::core::validation::Validated;
use crate::entities::{apply_patch, filter_records, parse_id};
use crate::reports::debt::{self, CustomerDebt};
use crate::server::AppState;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use std::collections::HashMap;

pub async fn list_customers(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
    Query(raw): Query<HashMap<String, String>>,
) -> OrderDeskResult<Json<PaginatedResponse<Customer>>> {
    let filters = params.field_filters(&raw);
    let customers = state.store.customers.list().await?;
    let customers = filter_records(
        customers,
        &params,
        &filters,
        FILTER_FIELDS,
        params.search.as_deref(),
    );
    Ok(Json(PaginatedResponse::paginate(customers, &params)))
}

pub async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> OrderDeskResult<Json<Customer>> {
    let id = parse_id(&id)?;
    Ok(Json(state.store.require_customer(&id).await?))
}

pub async fn create_customer(
    State(state): State<AppState>,
    payload: Validated<Customer>,
) -> OrderDeskResult<(StatusCode, Json<Customer>)> {
    let input: CustomerInput = payload.parse()?;
    let customer = state.store.customers.create(input.into()).await?;
    tracing::info!(customer_id = %customer.id, "customer created");
    Ok((StatusCode::CREATED, Json(customer)))
}

pub async fn update_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Validated<Customer>,
) -> OrderDeskResult<Json<Customer>> {
    let id = parse_id(&id)?;
    let current = state.store.require_customer(&id).await?;
    let mut updated = apply_patch(&current, payload.into_inner(), EDITABLE_FIELDS)?;
    if updated.email.as_deref().is_some_and(str::is_empty) {
        updated.email = None;
    }
    Ok(Json(state.store.customers.update(&id, updated).await?))
}

pub async fn delete_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> OrderDeskResult<StatusCode> {
    let id = parse_id(&id)?;
    state.store.delete_customer(&id).await?;
    tracing::info!(customer_id = %id, "customer deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Orders value, payments and outstanding debt of one customer
pub async fn customer_debt(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> OrderDeskResult<Json<CustomerDebt>> {
    let id = parse_id(&id)?;
    state.store.require_customer(&id).await?;
    let ledger = state.store.ledger().await?;
    Ok(Json(debt::customer_debt(&ledger, &id)))
}
