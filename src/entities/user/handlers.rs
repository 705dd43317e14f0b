//! Registration, login and session handlers

use super::model::{AuthToken, LoginInput, RegisterInput, User, UserProfile};
use crate::core::auth::{
    AuthError, CurrentUser, generate_token_key, hash_password, verify_password,
};
use crate::core::error::{OrderDeskError, OrderDeskResult, ValidationError};
use crate::core::validation::Validated;
use crate::server::AppState;
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use serde_json::{Value, json};

/// Register a new user and issue their API token
pub async fn register(
    State(state): State<AppState>,
    payload: Validated<User>,
) -> OrderDeskResult<(StatusCode, Json<Value>)> {
    let input: RegisterInput = payload.parse()?;
    ensure_unique(&state, "username", &input.username).await?;
    ensure_unique(&state, "email", &input.email).await?;

    let password_hash = hash_password(&input.password)?;
    let user = state
        .store
        .users
        .create(User::new(
            input.username,
            input.email,
            input.first_name,
            input.last_name,
            password_hash,
        ))
        .await?;
    let token = state
        .store
        .tokens
        .create(AuthToken::new(generate_token_key(), user.id))
        .await?;
    tracing::info!(user_id = %user.id, username = %user.username, "user registered");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "token": token.key,
            "user": UserProfile::from(&user),
        })),
    ))
}

/// Exchange credentials for the user's API token
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginInput>, JsonRejection>,
) -> OrderDeskResult<Json<Value>> {
    let Json(input) = payload.map_err(|e| ValidationError::InvalidJson {
        message: e.body_text(),
    })?;

    let user = state
        .store
        .users
        .search("username", &input.username)
        .await?
        .into_iter()
        .next();
    let Some(user) = user else {
        tracing::warn!(username = %input.username, "login for unknown user");
        return Err(AuthError::InvalidCredentials.into());
    };
    if let Err(err) = verify_password(&input.password, &user.password_hash) {
        tracing::warn!(username = %user.username, "login with wrong password");
        return Err(err.into());
    }

    let existing = state
        .store
        .tokens
        .search("user", &user.id.to_string())
        .await?
        .into_iter()
        .next();
    let token = match existing {
        Some(token) => token,
        None => {
            state
                .store
                .tokens
                .create(AuthToken::new(generate_token_key(), user.id))
                .await?
        }
    };
    tracing::info!(user_id = %user.id, "user logged in");

    Ok(Json(json!({
        "token": token.key,
        "user_id": user.id,
        "username": user.username,
    })))
}

/// Revoke the token used for this request
pub async fn logout(
    State(state): State<AppState>,
    current: CurrentUser,
) -> OrderDeskResult<StatusCode> {
    state.store.tokens.delete(&current.token_id).await?;
    tracing::info!(user_id = %current.user_id, "user logged out");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn me(
    State(state): State<AppState>,
    current: CurrentUser,
) -> OrderDeskResult<Json<UserProfile>> {
    let user = state.store.require_user(&current.user_id).await?;
    Ok(Json(UserProfile::from(&user)))
}

async fn ensure_unique(state: &AppState, field: &str, value: &str) -> OrderDeskResult<()> {
    if state.store.users.search(field, value).await?.is_empty() {
        return Ok(());
    }
    Err(OrderDeskError::Validation(ValidationError::Duplicate {
        field: field.to_string(),
        value: value.to_string(),
    }))
}
