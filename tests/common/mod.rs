//! Shared helpers for the HTTP integration tests

#![allow(dead_code)]

use axum_test::TestServer;
use orderdesk::config::AppConfig;
use orderdesk::module::server;
use orderdesk::store::EntityStore;
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;

/// Server with authentication disabled
pub fn open_server() -> (TestServer, EntityStore) {
    let mut config = AppConfig::default();
    config.auth.enabled = false;
    build(config)
}

/// Server with token authentication enforced
pub fn secured_server() -> (TestServer, EntityStore) {
    build(AppConfig::default())
}

pub fn build(config: AppConfig) -> (TestServer, EntityStore) {
    let store = EntityStore::in_memory();
    let app = server(store.clone(), &config).build();
    let server = TestServer::new(app).expect("test server");
    (server, store)
}

/// Parse a money field serialized as a decimal string
pub fn money(value: &Value) -> Decimal {
    match value {
        Value::String(s) => Decimal::from_str(s).expect("decimal string"),
        Value::Number(n) => Decimal::from_str(&n.to_string()).expect("decimal number"),
        other => panic!("not a money value: {other}"),
    }
}

pub fn dec(raw: &str) -> Decimal {
    Decimal::from_str(raw).expect("decimal literal")
}

pub async fn create_customer(server: &TestServer, first: &str, last: &str) -> String {
    let response = server
        .post("/customers")
        .json(&json!({
            "first_name": first,
            "last_name": last,
            "phone": "2101234567",
            "tax_id": format!("EL{}", last.len()),
        }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    id_of(&response.json::<Value>())
}

pub async fn create_item(server: &TestServer, name: &str, price: &str) -> String {
    let response = server
        .post("/items")
        .json(&json!({ "name": name, "price": price }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    id_of(&response.json::<Value>())
}

/// Create an order with `(item_id, quantity)` lines and return its JSON
pub async fn create_order(
    server: &TestServer,
    customer: &str,
    date: &str,
    lines: &[(&str, i64)],
) -> Value {
    let items: Vec<Value> = lines
        .iter()
        .map(|(item, quantity)| json!({ "item": item, "quantity": quantity }))
        .collect();
    let response = server
        .post("/orders")
        .json(&json!({ "customer": customer, "date": date, "items": items }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()
}

pub async fn pay(server: &TestServer, order: &str, amount: &str, date: &str) -> Value {
    let response = server
        .post("/payments")
        .json(&json!({ "order": order, "amount": amount, "date": date }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()
}

pub fn id_of(value: &Value) -> String {
    value["id"].as_str().expect("id field").to_string()
}
