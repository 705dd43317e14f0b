//! Report endpoints: debts, rankings, daily figures and the sales report

mod common;

use axum::http::StatusCode;
use chrono::{Duration, Local};
use common::*;
use indexmap::IndexMap;
use serde_json::Value;

fn days_ago(days: i64) -> String {
    (Local::now().date_naive() - Duration::days(days))
        .format("%Y-%m-%d")
        .to_string()
}

#[tokio::test]
async fn test_customer_debt() {
    let (server, _store) = open_server();
    let customer = create_customer(&server, "Maria", "Papadopoulou").await;
    let cheese = create_item(&server, "Cheese", "5").await;
    let wine = create_item(&server, "Wine", "10").await;

    let first = id_of(&create_order(&server, &customer, "2024-03-01", &[(&cheese, 2), (&wine, 1)]).await);
    create_order(&server, &customer, "2024-03-05", &[(&wine, 3)]).await;
    pay(&server, &first, "15", "2024-03-02").await;

    let debt: Value = server.get(&format!("/customers/{customer}/debt")).await.json();
    assert_eq!(debt["customer"], "Maria Papadopoulou");
    assert_eq!(money(&debt["total_orders"]), dec("50"));
    assert_eq!(money(&debt["total_paid"]), dec("15"));
    assert_eq!(money(&debt["debt"]), dec("35"));

    server
        .get(&format!("/customers/{}/debt", uuid::Uuid::new_v4()))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_top_debtors_keeps_five_positive_debts() {
    let (server, _store) = open_server();
    let bread = create_item(&server, "Bread", "1").await;

    // Debts of 1..=6 plus one customer who paid in full
    for (n, last) in ["Alpha", "Beta", "Gamma", "Delta", "Epsilon", "Zeta"].iter().enumerate() {
        let customer = create_customer(&server, "Customer", last).await;
        create_order(&server, &customer, "2024-01-01", &[(&bread, n as i64 + 1)]).await;
    }
    let settled = create_customer(&server, "Settled", "Account").await;
    let order = id_of(&create_order(&server, &settled, "2024-01-01", &[(&bread, 9)]).await);
    pay(&server, &order, "9", "2024-01-01").await;

    let debtors: Value = server.get("/dashboard/top_debtors").await.json();
    let debtors = debtors.as_array().unwrap();
    assert_eq!(debtors.len(), 5);
    assert_eq!(debtors[0]["customer"], "Customer Zeta");
    assert_eq!(money(&debtors[0]["debt"]), dec("6"));
    assert_eq!(money(&debtors[4]["debt"]), dec("2"));
    assert!(debtors.iter().all(|d| d["customer_id"].is_string()));
}

#[tokio::test]
async fn test_overdue_debtors_use_the_cutoff() {
    let (server, _store) = open_server();
    let bread = create_item(&server, "Bread", "1").await;
    let old = create_customer(&server, "Old", "Debt").await;
    let fresh = create_customer(&server, "Fresh", "Debt").await;
    create_order(&server, &old, &days_ago(45), &[(&bread, 3)]).await;
    create_order(&server, &fresh, &days_ago(2), &[(&bread, 4)]).await;

    let default_cutoff: Value = server.get("/dashboard/overdue_debtors").await.json();
    assert_eq!(default_cutoff.as_array().unwrap().len(), 1);
    assert_eq!(default_cutoff[0]["customer"], "Old Debt");

    let everything: Value = server
        .get("/dashboard/overdue_debtors")
        .add_query_param("days", "0")
        .await
        .json();
    assert_eq!(everything.as_array().unwrap().len(), 2);
    assert_eq!(everything[0]["customer"], "Fresh Debt");

    server
        .get("/dashboard/overdue_debtors")
        .add_query_param("days", "-3")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_overdue_debtors_with_an_enormous_age() {
    let mut config = orderdesk::config::AppConfig::default();
    config.auth.enabled = false;
    config.reports.overdue_days = i64::MAX;
    let (server, _store) = build(config);
    let bread = create_item(&server, "Bread", "1").await;
    let customer = create_customer(&server, "Old", "Debt").await;
    create_order(&server, &customer, &days_ago(400), &[(&bread, 3)]).await;

    let from_query: Value = server
        .get("/dashboard/overdue_debtors")
        .add_query_param("days", "100000000")
        .await
        .json();
    assert_eq!(from_query.as_array().unwrap().len(), 0);

    let from_config = server.get("/dashboard/overdue_debtors").await;
    from_config.assert_status_ok();
    assert_eq!(from_config.json::<Value>().as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_item_quantity_reports() {
    let (server, _store) = open_server();
    let customer = create_customer(&server, "Maria", "Papadopoulou").await;
    let bread = create_item(&server, "Bread", "1").await;
    let milk = create_item(&server, "Milk", "2").await;
    let eggs = create_item(&server, "Eggs", "3").await;

    create_order(&server, &customer, "2024-03-01", &[(&bread, 2), (&milk, 5)]).await;
    create_order(&server, &customer, "2024-03-15", &[(&bread, 4), (&eggs, 1)]).await;
    create_order(&server, &customer, "2024-04-02", &[(&eggs, 6)]).await;

    let top: IndexMap<String, u64> = server.get("/items/top_selling").await.json();
    let ranked: Vec<(&str, u64)> = top.iter().map(|(name, qty)| (name.as_str(), *qty)).collect();
    assert_eq!(ranked, vec![("Eggs", 7), ("Bread", 6), ("Milk", 5)]);

    let on_date: Value = server
        .get("/items/sold_by_date")
        .add_query_param("date", "2024-03-01")
        .await
        .json();
    assert_eq!(on_date["Milk"], 5);
    assert_eq!(on_date["Bread"], 2);
    assert!(on_date.get("Eggs").is_none());

    let in_march: Value = server
        .get("/items/sold_by_month")
        .add_query_param("month", "2024-03")
        .await
        .json();
    assert_eq!(in_march["Bread"], 6);
    assert_eq!(in_march["Eggs"], 1);

    server
        .get("/items/sold_by_date")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    let response = server
        .get("/items/sold_by_date")
        .add_query_param("date", "01/03/2024")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["code"], "INVALID_DATE");
    server
        .get("/items/sold_by_month")
        .add_query_param("month", "2024-13")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_daily_sales_and_payments() {
    let (server, _store) = open_server();
    let customer = create_customer(&server, "Maria", "Papadopoulou").await;
    let bread = create_item(&server, "Bread", "2.50").await;

    let first = id_of(&create_order(&server, &customer, "2024-05-10", &[(&bread, 2)]).await);
    create_order(&server, &customer, "2024-05-10", &[(&bread, 4)]).await;
    create_order(&server, &customer, "2024-05-11", &[(&bread, 1)]).await;
    pay(&server, &first, "3", "2024-05-10").await;
    pay(&server, &first, "2", "2024-05-10").await;

    let sales: Value = server
        .get("/dashboard/daily_sales")
        .add_query_param("date", "2024-05-10")
        .await
        .json();
    assert_eq!(sales["date"], "2024-05-10");
    assert_eq!(money(&sales["total_sales"]), dec("15"));
    assert_eq!(sales["total_orders"], 2);

    let payments: Value = server
        .get("/dashboard/daily_payments")
        .add_query_param("date", "2024-05-10")
        .await
        .json();
    assert_eq!(money(&payments["total_payments"]), dec("5"));
    assert_eq!(payments["count"], 2);

    let today: Value = server.get("/dashboard/daily_sales").await.json();
    assert_eq!(today["total_orders"], 0);
}

#[tokio::test]
async fn test_sales_report_filters() {
    let (server, _store) = open_server();
    let maria = create_customer(&server, "Maria", "Papadopoulou").await;
    let nikos = create_customer(&server, "Nikos", "Georgiou").await;
    let bread = create_item(&server, "Bread", "2").await;
    let wine = create_item(&server, "Wine", "10").await;

    let january = id_of(&create_order(&server, &maria, "2024-01-15", &[(&bread, 5), (&wine, 1)]).await);
    create_order(&server, &nikos, "2024-02-03", &[(&wine, 2)]).await;
    create_order(&server, &maria, "2024-02-20", &[(&bread, 1)]).await;
    pay(&server, &january, "12", "2024-01-20").await;

    let all: Value = server.get("/reports/sales").await.json();
    assert_eq!(all["order_count"], 3);
    assert_eq!(money(&all["total_sales"]), dec("42"));
    assert_eq!(money(&all["total_paid"]), dec("12"));
    assert_eq!(all["lines"][0]["item"], "Wine");
    assert_eq!(all["lines"][0]["quantity"], 3);
    assert_eq!(money(&all["lines"][0]["revenue"]), dec("30"));

    let february: Value = server
        .get("/reports/sales")
        .add_query_param("month", "2024-02")
        .await
        .json();
    assert_eq!(february["order_count"], 2);

    let range: Value = server
        .get("/reports/sales")
        .add_query_param("date_from", "2024-01-01")
        .add_query_param("date_to", "2024-02-05")
        .add_query_param("customer", &maria)
        .await
        .json();
    assert_eq!(range["order_count"], 1);
    assert_eq!(money(&range["total_sales"]), dec("20"));

    let single_day: Value = server
        .get("/reports/sales")
        .add_query_param("date", "2024-02-03")
        .await
        .json();
    assert_eq!(single_day["order_count"], 1);

    server
        .get("/reports/sales")
        .add_query_param("customer", &uuid::Uuid::new_v4().to_string())
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_order_summary() {
    let (server, _store) = open_server();
    let customer = create_customer(&server, "Maria", "Papadopoulou").await;
    let cheese = create_item(&server, "Cheese", "5").await;
    let order = id_of(&create_order(&server, &customer, "2024-03-01", &[(&cheese, 3)]).await);
    pay(&server, &order, "5", "2024-03-03").await;

    let summary: Value = server.get(&format!("/orders/{order}/summary")).await.json();
    assert_eq!(summary["customer"], "Maria Papadopoulou");
    assert_eq!(summary["items"][0]["item"], "Cheese");
    assert_eq!(summary["items"][0]["quantity"], 3);
    assert_eq!(money(&summary["items"][0]["price"]), dec("15"));
    assert_eq!(money(&summary["remaining_amount"]), dec("10"));
    assert_eq!(summary["payments"][0]["date"], "2024-03-03");
}

#[tokio::test]
async fn test_dashboard_index_lists_reports() {
    let (server, _store) = open_server();
    let index: Value = server.get("/dashboard").await.json();
    assert_eq!(index["daily_sales"], "/dashboard/daily_sales");
    assert_eq!(index["sales_report"], "/reports/sales");
}
