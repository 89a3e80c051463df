//! Route handlers, grouped by URL prefix.

pub mod auth;
pub mod hotels;
pub mod my_bookings;
pub mod my_hotels;
pub mod users;

use std::sync::Arc;

use axum::Router;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Every `/api` route.
pub fn api() -> Router<Arc<AppState>> {
    Router::new()
        .nest("/users", users::router())
        .nest("/auth", auth::router())
        .nest("/hotels", hotels::router())
        .nest("/my-hotels", my_hotels::router())
        .nest("/my-bookings", my_bookings::router())
        .fallback(api_not_found)
}

async fn api_not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({ "message": "Not found" })))
}

/// Path ids that are not UUIDs cannot name a stored hotel.
fn parse_hotel_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| innkeep_core::InnkeepError::not_found("hotel", raw).into())
}
