//! Error status codes, stable codes and their HTTP rendering

mod common;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use common::*;
use orderdesk::core::error::{ConfigError, RequestError, StorageError};
use orderdesk::prelude::*;
use serde_json::{Value, json};

mod status_codes {
    use super::*;

    #[test]
    fn test_not_found_is_404() {
        let err: OrderDeskError = EntityError::not_found("customer", Uuid::new_v4()).into();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.error_code(), "ENTITY_NOT_FOUND");
    }

    #[test]
    fn test_validation_errors_are_400() {
        let cases = [
            (
                ValidationError::InvalidUuid { value: "abc".into() },
                "INVALID_ID",
            ),
            (
                ValidationError::InvalidDate {
                    value: "2024-13-01".into(),
                    expected: "YYYY-MM-DD".into(),
                },
                "INVALID_DATE",
            ),
            (
                ValidationError::Duplicate {
                    field: "email".into(),
                    value: "maria@example.gr".into(),
                },
                "DUPLICATE_VALUE",
            ),
            (
                ValidationError::MissingArgument {
                    argument: "date".into(),
                },
                "VALIDATION_ERROR",
            ),
        ];
        for (error, code) in cases {
            let err = OrderDeskError::from(error);
            assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
            assert_eq!(err.error_code(), code);
        }
    }

    #[test]
    fn test_request_errors() {
        let unauthorized: OrderDeskError = RequestError::Unauthorized {
            message: "missing token".into(),
        }
        .into();
        assert_eq!(unauthorized.status_code(), StatusCode::UNAUTHORIZED);

        let format: OrderDeskError = RequestError::UnsupportedFormat {
            format: "docx".into(),
        }
        .into();
        assert_eq!(format.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(format.error_code(), "UNSUPPORTED_FORMAT");
    }

    #[test]
    fn test_backend_failures_are_500() {
        let storage: OrderDeskError = StorageError::QueryError {
            backend: "postgres".into(),
            message: "relation does not exist".into(),
        }
        .into();
        assert_eq!(storage.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(storage.error_code(), "STORAGE_ERROR");

        let config: OrderDeskError = ConfigError::FileNotFound {
            path: "missing.yaml".into(),
        }
        .into();
        assert_eq!(config.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

mod responses {
    use super::*;

    #[test]
    fn test_not_found_details() {
        let id = Uuid::new_v4();
        let response = OrderDeskError::from(EntityError::not_found("order", id)).to_response();
        let details = response.details.unwrap();
        assert_eq!(details["entity_type"], "order");
        assert_eq!(details["id"], id.to_string());
    }

    #[test]
    fn test_into_response_status() {
        let response = OrderDeskError::Internal("boom".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

mod http {
    use super::*;

    #[tokio::test]
    async fn test_malformed_id_is_rejected() {
        let (server, _store) = open_server();
        let response = server.get("/customers/not-a-uuid").await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["code"], "INVALID_ID");
    }

    #[tokio::test]
    async fn test_missing_entity_is_404() {
        let (server, _store) = open_server();
        let id = Uuid::new_v4();
        let response = server.get(&format!("/orders/{id}")).await;
        response.assert_status(StatusCode::NOT_FOUND);
        let body: Value = response.json();
        assert_eq!(body["code"], "ENTITY_NOT_FOUND");
        assert_eq!(body["details"]["id"], id.to_string());
    }

    #[tokio::test]
    async fn test_invalid_json_body() {
        let (server, _store) = open_server();
        let response = server
            .post("/auth/login")
            .text("{not json")
            .content_type("application/json")
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["code"], "INVALID_JSON");
    }

    #[tokio::test]
    async fn test_field_errors_are_listed() {
        let (server, _store) = open_server();
        let response = server
            .post("/items")
            .json(&json!({ "price": "-1" }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert!(body["details"]["fields"].as_array().is_some_and(|f| !f.is_empty()));
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let (server, _store) = secured_server();
        server
            .get("/nothing-here")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}
