//! HTTP-level tests for the SWIFT directory API.
//!
//! Each test builds the router over a fresh in-memory SQLite store.

#![cfg(feature = "server")]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use swift_directory::api::{router, AppState};
use swift_directory::{DirectoryService, SqliteStore};
use tower::ServiceExt;

// ── Helpers ─────────────────────────────────────────────────────

fn build_app() -> Router {
    let store = SqliteStore::open_in_memory().expect("in-memory store");
    router(AppState::new(DirectoryService::new(store)))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let resp = app.clone().oneshot(request).await.unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

fn bank_body(code: &str, iso2: &str, country: &str) -> Value {
    json!({
        "address": "valid address",
        "bankName": "valid bank name",
        "countryISO2": iso2,
        "countryName": country,
        "isHeadquarter": code.ends_with("XXX"),
        "swiftCode": code,
    })
}

async fn create(app: &Router, code: &str) -> StatusCode {
    send(app, "POST", "/v1/swift-codes", Some(bank_body(code, "PL", "POLAND")))
        .await
        .0
}

// ── Tests ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_health() {
    let app = build_app();

    let (status, body) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "OK");
    assert!(body["startedAt"].is_string());
}

#[tokio::test]
async fn test_create_and_read_hierarchy() {
    let app = build_app();

    let (status, body) = send(
        &app,
        "POST",
        "/v1/swift-codes",
        Some(bank_body("A1234567XXX", "PL", "POLAND")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "SWIFT CODE = A1234567XXX successfully created.");

    assert_eq!(create(&app, "A1234567890").await, StatusCode::OK);

    let (status, hq) = send(&app, "GET", "/v1/swift-codes/A1234567XXX", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(hq["countryName"], "POLAND");
    assert_eq!(hq["isHeadquarter"], true);
    assert_eq!(
        hq["branches"],
        json!([{
            "address": "valid address",
            "bankName": "valid bank name",
            "countryISO2": "PL",
            "isHeadquarter": false,
            "swiftCode": "A1234567890",
        }])
    );

    let (status, branch) = send(&app, "GET", "/v1/swift-codes/A1234567890", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(branch.get("branches").is_none());
    assert_eq!(branch["countryName"], "POLAND");

    let (status, country) = send(&app, "GET", "/v1/swift-codes/country/PL", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(country["countryISO2"], "PL");
    assert_eq!(country["countryName"], "POLAND");
    assert_eq!(country["swiftCodes"].as_array().unwrap().len(), 2);
    assert!(country["swiftCodes"][0].get("countryName").is_none());
}

#[tokio::test]
async fn test_create_validation_errors() {
    let app = build_app();

    let cases = [
        (
            bank_body("SWIFTCODEEE", "P#", "POLAND"),
            "All characters in ISO2 code should be letters.",
        ),
        (
            bank_body("SWIFTCODEEE", "pl", "POLAND"),
            "All characters in ISO2 code should be uppercase.",
        ),
        (
            bank_body("SWIFT#ODEEE", "PL", "POLAND"),
            "All characters in SWIFT code should be alphanumeric.",
        ),
        (
            bank_body("SWIFTCODEEe", "PL", "POLAND"),
            "All characters in SWIFT code should be uppercase.",
        ),
        (
            bank_body("SWIFTCODEEE", "PL", "Poland"),
            "All characters in country name should be uppercase.",
        ),
        (
            json!({
                "address": "valid address",
                "bankName": "valid bank name",
                "countryISO2": "PL",
                "countryName": "POLAND",
                "isHeadquarter": true,
                "swiftCode": "AAAAAAAA123",
            }),
            "Headquarter's SWIFT codes must end with XXX and branches' cannot end with XXX.",
        ),
        (
            json!({
                "address": "valid address",
                "bankName": "valid bank name",
                "countryISO2": "PL",
                "countryName": "POLAND",
                "isHeadquarter": false,
                "swiftCode": "AAAAAAAAXXX",
            }),
            "Headquarter's SWIFT codes must end with XXX and branches' cannot end with XXX.",
        ),
    ];

    for (body, message) in cases {
        let (status, response) = send(&app, "POST", "/v1/swift-codes", Some(body)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{}", message);
        assert_eq!(response["detail"], message);
    }

    // Nothing got through
    let (status, _) = send(&app, "GET", "/v1/swift-codes/country/PL", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_with_incomplete_body() {
    let app = build_app();

    let (status, body) = send(
        &app,
        "POST",
        "/v1/swift-codes",
        Some(json!({ "swiftCode": "AAAAAAAAXXX" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let detail = body["detail"].as_str().expect("json error body");
    assert!(detail.contains("bankName"), "{}", detail);

    let (status, body) = send(
        &app,
        "POST",
        "/v1/swift-codes",
        Some(json!({
            "address": "valid address",
            "bankName": "valid bank name",
            "countryISO2": "PL",
            "countryName": "POLAND",
            "isHeadquarter": "yes",
            "swiftCode": "AAAAAAAAXXX",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].is_string());

    let (status, _) = send(&app, "GET", "/v1/swift-codes/AAAAAAAAXXX", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_with_empty_country_name() {
    let app = build_app();

    let (status, body) = send(
        &app,
        "POST",
        "/v1/swift-codes",
        Some(bank_body("A1234567890", "PL", "")),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"], "All characters in country name should be uppercase.");

    assert_eq!(create(&app, "A1234567890").await, StatusCode::OK);
}

#[tokio::test]
async fn test_country_name_conflict() {
    let app = build_app();
    assert_eq!(create(&app, "SWIFTCODEE1").await, StatusCode::OK);

    let (status, body) = send(
        &app,
        "POST",
        "/v1/swift-codes",
        Some(bank_body("SWIFTCODEE2", "PL", "POLANDD")),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(
        body["detail"],
        "In the database the correct countryName for countryISO2 = PL is POLAND."
    );
    let (status, _) = send(&app, "GET", "/v1/swift-codes/SWIFTCODEE2", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_duplicate_swift_code() {
    let app = build_app();
    assert_eq!(create(&app, "SWIFTCODEEE").await, StatusCode::OK);

    let (status, body) = send(
        &app,
        "POST",
        "/v1/swift-codes",
        Some(bank_body("SWIFTCODEEE", "PL", "POLAND")),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["detail"], "SWIFT code SWIFTCODEEE already exists.");

    let (_, country) = send(&app, "GET", "/v1/swift-codes/country/PL", None).await;
    assert_eq!(country["swiftCodes"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_read_errors() {
    let app = build_app();

    let (status, body) = send(&app, "GET", "/v1/swift-codes/SHORT", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"], "SWIFT code should consist of 11 characters.");

    let (status, body) = send(&app, "GET", "/v1/swift-codes/A1234567XXX", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "SWIFT code A1234567XXX does not exist.");

    let (status, body) = send(&app, "GET", "/v1/swift-codes/country/pl", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"], "All characters in ISO2 code should be uppercase.");

    let (status, _) = send(&app, "GET", "/v1/swift-codes/country/DE", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_headquarter_keeps_branches() {
    let app = build_app();
    for code in ["A1234567XXX", "A1234567890", "A1234567891"] {
        assert_eq!(create(&app, code).await, StatusCode::OK);
    }

    let (status, body) = send(&app, "DELETE", "/v1/swift-codes/A1234567XXX", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "SWIFT CODE = A1234567XXX successfully deleted.");

    let (status, _) = send(&app, "GET", "/v1/swift-codes/A1234567XXX", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    for code in ["A1234567890", "A1234567891"] {
        let (status, _) = send(&app, "GET", &format!("/v1/swift-codes/{}", code), None).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, country) = send(&app, "GET", "/v1/swift-codes/country/PL", None).await;
    let codes: Vec<&str> = country["swiftCodes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["swiftCode"].as_str().unwrap())
        .collect();
    assert_eq!(codes, vec!["A1234567890", "A1234567891"]);
}

#[tokio::test]
async fn test_delete_branch_and_errors() {
    let app = build_app();
    for code in ["D1234567XXX", "D1234567890"] {
        assert_eq!(create(&app, code).await, StatusCode::OK);
    }

    let (status, _) = send(&app, "DELETE", "/v1/swift-codes/D1234567890", None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, hq) = send(&app, "GET", "/v1/swift-codes/D1234567XXX", None).await;
    assert_eq!(hq["branches"], json!([]));

    let (status, _) = send(&app, "DELETE", "/v1/swift-codes/D1234567890", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, "DELETE", "/v1/swift-codes/d1234567890", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"], "All characters in SWIFT code should be uppercase.");
}
