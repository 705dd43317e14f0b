//! Registration, login and token enforcement

mod common;

use axum::http::{HeaderValue, StatusCode, header};
use axum_test::TestServer;
use common::*;
use serde_json::{Value, json};

fn token_header(token: &str) -> HeaderValue {
    HeaderValue::from_str(&format!("Token {token}")).unwrap()
}

async fn register(server: &TestServer, username: &str, email: &str) -> Value {
    let response = server
        .post("/auth/register")
        .json(&json!({
            "username": username,
            "email": email,
            "password": "correct horse",
            "first_name": "Maria"
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json()
}

#[tokio::test]
async fn test_register_returns_token_and_profile() {
    let (server, _store) = secured_server();
    let body = register(&server, "maria", "Maria@Example.gr").await;

    assert_eq!(body["token"].as_str().unwrap().len(), 40);
    assert_eq!(body["user"]["username"], "maria");
    assert_eq!(body["user"]["email"], "maria@example.gr");
    assert!(body["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_rejects_duplicates_and_missing_fields() {
    let (server, _store) = secured_server();
    register(&server, "maria", "maria@example.gr").await;

    let response = server
        .post("/auth/register")
        .json(&json!({
            "username": "maria",
            "email": "other@example.gr",
            "password": "correct horse"
        }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["code"], "DUPLICATE_VALUE");
    assert_eq!(body["details"]["field"], "username");

    let response = server
        .post("/auth/register")
        .json(&json!({
            "username": "nikos",
            "email": "maria@example.gr",
            "password": "correct horse"
        }))
        .await;
    assert_eq!(response.json::<Value>()["details"]["field"], "email");

    server
        .post("/auth/register")
        .json(&json!({ "username": "eleni" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_reuses_the_token() {
    let (server, _store) = secured_server();
    let registered = register(&server, "maria", "maria@example.gr").await;

    let response = server
        .post("/auth/login")
        .json(&json!({ "username": "maria", "password": "correct horse" }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["token"], registered["token"]);
    assert_eq!(body["username"], "maria");
    assert_eq!(body["user_id"], registered["user"]["id"]);
}

#[tokio::test]
async fn test_login_with_wrong_password_is_unauthorized() {
    let (server, _store) = secured_server();
    register(&server, "maria", "maria@example.gr").await;

    let response = server
        .post("/auth/login")
        .json(&json!({ "username": "maria", "password": "wrong password" }))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(response.json::<Value>()["code"], "UNAUTHORIZED");

    server
        .post("/auth/login")
        .json(&json!({ "username": "nobody", "password": "whatever" }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    server
        .post("/auth/login")
        .json(&json!({ "username": "maria" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_protected_routes_need_a_valid_token() {
    let (server, _store) = secured_server();

    server.get("/health").await.assert_status_ok();
    server
        .get("/customers")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    server
        .get("/customers")
        .add_header(header::AUTHORIZATION, token_header("not-a-real-token"))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    let token = register(&server, "maria", "maria@example.gr").await["token"]
        .as_str()
        .unwrap()
        .to_string();
    server
        .get("/customers")
        .add_header(header::AUTHORIZATION, token_header(&token))
        .await
        .assert_status_ok();
    server
        .get("/dashboard/top_debtors")
        .add_header(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
        )
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_me_and_logout() {
    let (server, _store) = secured_server();
    let token = register(&server, "maria", "maria@example.gr").await["token"]
        .as_str()
        .unwrap()
        .to_string();

    let me: Value = server
        .get("/auth/me")
        .add_header(header::AUTHORIZATION, token_header(&token))
        .await
        .json();
    assert_eq!(me["username"], "maria");
    assert_eq!(me["first_name"], "Maria");

    server
        .post("/auth/logout")
        .add_header(header::AUTHORIZATION, token_header(&token))
        .await
        .assert_status(StatusCode::NO_CONTENT);
    server
        .get("/auth/me")
        .add_header(header::AUTHORIZATION, token_header(&token))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_session_routes_need_a_token_even_when_auth_is_off() {
    let (server, _store) = open_server();

    server.get("/customers").await.assert_status_ok();
    server
        .get("/auth/me")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}
