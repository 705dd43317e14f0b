//! Payment HTTP handlers

use super::model::{EDITABLE_FIELDS, FILTER_FIELDS, Payment, PaymentInput};
use crate::core::error::OrderDeskResult;
use crate::core::query::{PaginatedResponse, QueryParams};
use crate::core::validation::Validated;
use crate::entities::{apply_patch, filter_records, parse_id};
use crate::reports::period;
use crate::reports::views::PaymentView;
use crate::server::AppState;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use std::collections::HashMap;

/// List payments; `customer` filters on the owning order's customer
pub async fn list_payments(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
    Query(raw): Query<HashMap<String, String>>,
) -> OrderDeskResult<Json<PaginatedResponse<PaymentView>>> {
    let mut filters = params.field_filters(&raw);
    let customer = filters
        .take("customer")
        .map(|raw| parse_id(&raw))
        .transpose()?;

    let ledger = state.store.ledger().await?;
    let payments = state.store.payments.list().await?;
    let views: Vec<PaymentView> = filter_records(payments, &params, &filters, FILTER_FIELDS, None)
        .iter()
        .filter(|payment| {
            customer.is_none_or(|customer| {
                ledger
                    .order(&payment.order)
                    .is_some_and(|order| order.customer == customer)
            })
        })
        .map(|payment| PaymentView::build(&ledger, payment))
        .collect();

    Ok(Json(PaginatedResponse::paginate(views, &params)))
}

pub async fn get_payment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> OrderDeskResult<Json<PaymentView>> {
    let id = parse_id(&id)?;
    let payment = state.store.require_payment(&id).await?;
    let ledger = state.store.ledger().await?;
    Ok(Json(PaymentView::build(&ledger, &payment)))
}

pub async fn create_payment(
    State(state): State<AppState>,
    payload: Validated<Payment>,
) -> OrderDeskResult<(StatusCode, Json<PaymentView>)> {
    let input: PaymentInput = payload.parse()?;
    state.store.require_order(&input.order).await?;

    let date = input.date.unwrap_or_else(period::today);
    let payment = state
        .store
        .payments
        .create(Payment::new(input.order, input.amount, date))
        .await?;
    tracing::info!(payment_id = %payment.id, order_id = %payment.order, amount = %payment.amount, "payment recorded");

    let ledger = state.store.ledger().await?;
    Ok((StatusCode::CREATED, Json(PaymentView::build(&ledger, &payment))))
}

pub async fn update_payment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Validated<Payment>,
) -> OrderDeskResult<Json<PaymentView>> {
    let id = parse_id(&id)?;
    let current = state.store.require_payment(&id).await?;
    let updated = apply_patch(&current, payload.into_inner(), EDITABLE_FIELDS)?;
    if updated.order != current.order {
        state.store.require_order(&updated.order).await?;
    }

    let payment = state.store.payments.update(&id, updated).await?;
    let ledger = state.store.ledger().await?;
    Ok(Json(PaymentView::build(&ledger, &payment)))
}

pub async fn delete_payment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> OrderDeskResult<StatusCode> {
    let id = parse_id(&id)?;
    state.store.require_payment(&id).await?;
    state.store.payments.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Payments dated today
pub async fn today_payments(
    State(state): State<AppState>,
) -> OrderDeskResult<Json<Vec<PaymentView>>> {
    let today = period::today();
    let ledger = state.store.ledger().await?;
    let views = state
        .store
        .payments
        .list()
        .await?
        .iter()
        .filter(|payment| payment.date == today)
        .map(|payment| PaymentView::build(&ledger, payment))
        .collect();
    Ok(Json(views))
}
