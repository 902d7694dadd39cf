// 🌐 REST API - thin transport over the directory service
//
// POST   /v1/swift-codes                  → create bank
// GET    /v1/swift-codes/:swift_code      → bank (HQs with branches)
// DELETE /v1/swift-codes/:swift_code      → delete bank
// GET    /v1/swift-codes/country/:iso2    → country with its banks
// GET    /health

use crate::db::SqliteStore;
use crate::directory::{DirectoryError, DirectoryService, ErrorKind};
use crate::validation::{validate_iso2_code, validate_swift_code};
use crate::views::{BankDetails, Confirmation, CountryDetails, NewBank};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared application state
///
/// One service behind one lock: writes never interleave.
#[derive(Clone)]
pub struct AppState {
    directory: Arc<Mutex<DirectoryService<SqliteStore>>>,
    started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(directory: DirectoryService<SqliteStore>) -> Self {
        Self {
            directory: Arc::new(Mutex::new(directory)),
            started_at: Utc::now(),
        }
    }

    fn directory(&self) -> MutexGuard<'_, DirectoryService<SqliteStore>> {
        self.directory.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Error body
#[derive(Serialize)]
struct ErrorResponse {
    detail: String,
}

impl IntoResponse for DirectoryError {
    fn into_response(self) -> Response {
        let status = match self.kind() {
            ErrorKind::Validation => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (
            status,
            Json(ErrorResponse {
                detail: self.to_string(),
            }),
        )
            .into_response()
    }
}

/// Unreadable request body: same `{"detail"}` shape as every other error
fn malformed_body(rejection: JsonRejection) -> Response {
    tracing::debug!(error = %rejection, "rejected request body");
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ErrorResponse {
            detail: rejection.body_text(),
        }),
    )
        .into_response()
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    status: &'static str,
    started_at: DateTime<Utc>,
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /health - Health check
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "OK",
        started_at: state.started_at,
    })
}

/// POST /v1/swift-codes - Create a bank
async fn create_bank(
    State(state): State<AppState>,
    payload: Result<Json<NewBank>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return malformed_body(rejection),
    };

    match state.directory().create_bank(&request) {
        Ok(confirmation) => Json(confirmation).into_response(),
        Err(err) => err.into_response(),
    }
}

/// GET /v1/swift-codes/:swift_code - Bank details
async fn read_bank(
    State(state): State<AppState>,
    Path(swift_code): Path<String>,
) -> Result<Json<BankDetails>, DirectoryError> {
    validate_swift_code(&swift_code)?;

    let details = state.directory().read_bank(&swift_code)?;
    Ok(Json(details))
}

/// GET /v1/swift-codes/country/:iso2 - Country with all its banks
async fn read_country(
    State(state): State<AppState>,
    Path(iso2): Path<String>,
) -> Result<Json<CountryDetails>, DirectoryError> {
    validate_iso2_code(&iso2)?;

    let details = state.directory().read_country(&iso2)?;
    Ok(Json(details))
}

/// DELETE /v1/swift-codes/:swift_code - Delete a bank
async fn delete_bank(
    State(state): State<AppState>,
    Path(swift_code): Path<String>,
) -> Result<Json<Confirmation>, DirectoryError> {
    let confirmation = state.directory().delete_bank(&swift_code)?;
    Ok(Json(confirmation))
}

// ============================================================================
// Router
// ============================================================================

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/v1/swift-codes", post(create_bank))
        .route(
            "/v1/swift-codes/:swift_code",
            get(read_bank).delete(delete_bank),
        )
        .route("/v1/swift-codes/country/:iso2", get(read_country))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
