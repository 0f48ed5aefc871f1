//! Axum route handlers for the UAP hotel service.
//!
//! # Routes
//!
//! - `GET  /`                               - Service pointer to the discovery document
//! - `GET  /health`                         - Returns `{"status": "ok", ...}`
//! - `GET  /.well-known/uap`                - Root discovery document
//! - `GET  /.well-known/:module.json`       - Module document (404 when unknown)
//! - `GET  /openapi.json`                   - OpenAPI 3.0 document
//! - `GET  /rooms`                          - All rooms
//! - `GET  /rooms/search`                   - Rooms available for a stay
//! - `POST /bookings`                       - Create a booking
//! - `POST /bookings/:booking_id/cancel`    - Cancel a booking

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use thiserror::Error;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::discovery::{DiscoveryDocument, ModuleDocument, WELL_KNOWN_PATH};
use crate::publisher::{
    openapi_document, Booking, BookingRequest, Catalog, HotelError, HotelStore, Room, SearchQuery,
};

/// Shared application state for the HTTP server.
#[derive(Clone)]
pub struct AppState {
    /// Published documents.
    pub catalog: Arc<Catalog>,
    /// Rooms and bookings behind the booking module.
    pub hotel: Arc<HotelStore>,
    /// Fixed public base URL; derived from the `Host` header when `None`.
    pub public_base_url: Option<String>,
}

impl AppState {
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            catalog: Arc::new(Catalog::hotel(service_name)),
            hotel: Arc::new(HotelStore::new()),
            public_base_url: None,
        }
    }

    pub fn with_public_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.public_base_url = Some(base_url.into().trim_end_matches('/').to_string());
        self
    }

    /// Base URL that links in served documents are built from.
    fn base_url(&self, headers: &HeaderMap) -> String {
        if let Some(ref base) = self.public_base_url {
            return base.clone();
        }
        let host = headers
            .get(header::HOST)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("localhost");
        let scheme = headers
            .get("x-forwarded-proto")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("http");
        format!("{}://{}", scheme, host)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_SERVICE_NAME)
    }
}

/// Handler failure rendered as `{"error": "..."}` with a matching status.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Module '{0}' not found")]
    ModuleNotFound(String),

    #[error(transparent)]
    Hotel(#[from] HotelError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::ModuleNotFound(_) => StatusCode::NOT_FOUND,
            Self::Hotel(HotelError::RoomNotFound | HotelError::BookingNotFound) => {
                StatusCode::NOT_FOUND
            }
            Self::Hotel(HotelError::RoomUnavailable(_)) => StatusCode::CONFLICT,
            Self::Hotel(HotelError::InvalidInput { .. }) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::debug!(%status, error = %self, "request rejected");
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

/// Build the axum router with all routes.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route(WELL_KNOWN_PATH, get(discovery_handler))
        .route("/.well-known/:document", get(module_handler))
        .route(crate::publisher::OPENAPI_PATH, get(openapi_handler))
        .route("/rooms", get(list_rooms_handler))
        .route("/rooms/search", get(search_rooms_handler))
        .route("/bookings", post(create_booking_handler))
        .route("/bookings/:booking_id/cancel", post(cancel_booking_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// GET / - points clients at the discovery document.
async fn root_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "service": state.catalog.service_name(),
        "uap": WELL_KNOWN_PATH,
    }))
}

/// GET /health - liveness probe.
async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION,
        "service": state.catalog.service_name(),
    }))
}

/// GET /.well-known/uap - root discovery document.
async fn discovery_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Json<DiscoveryDocument> {
    Json(state.catalog.discovery(&state.base_url(&headers)))
}

/// GET /.well-known/:module.json - one module document.
async fn module_handler(
    State(state): State<AppState>,
    Path(document): Path<String>,
    headers: HeaderMap,
) -> Result<Json<ModuleDocument>, ApiError> {
    let id = document
        .strip_suffix(".json")
        .ok_or_else(|| ApiError::ModuleNotFound(document.clone()))?;
    state
        .catalog
        .module(id, &state.base_url(&headers))
        .map(Json)
        .ok_or_else(|| ApiError::ModuleNotFound(id.to_string()))
}

/// GET /openapi.json
async fn openapi_handler(State(state): State<AppState>, headers: HeaderMap) -> Json<Value> {
    Json(openapi_document(&state.catalog, &state.base_url(&headers)))
}

/// GET /rooms
async fn list_rooms_handler(State(state): State<AppState>) -> Json<Vec<Room>> {
    Json(state.hotel.rooms().to_vec())
}

/// GET /rooms/search?check_in=&check_out=&guests=
async fn search_rooms_handler(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<Room>>, ApiError> {
    Ok(Json(state.hotel.search(&query)?))
}

/// POST /bookings
async fn create_booking_handler(
    State(state): State<AppState>,
    Json(request): Json<BookingRequest>,
) -> Result<Json<Booking>, ApiError> {
    let booking = state.hotel.create_booking(request)?;
    tracing::info!(booking_id = %booking.id, room_id = %booking.room_id, "booking created");
    Ok(Json(booking))
}

/// POST /bookings/:booking_id/cancel
async fn cancel_booking_handler(
    State(state): State<AppState>,
    Path(booking_id): Path<String>,
) -> Result<Json<Booking>, ApiError> {
    let booking = state.hotel.cancel_booking(&booking_id)?;
    tracing::info!(booking_id = %booking.id, "booking canceled");
    Ok(Json(booking))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
