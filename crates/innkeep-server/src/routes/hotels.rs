//! `/api/hotels`: public search and detail, plus the booking workflow.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_extra::extract::Query;
use chrono::{DateTime, Utc};
use innkeep_core::models::booking::Booking;
use innkeep_core::models::hotel::Hotel;
use innkeep_core::search::{SearchPage, SearchParams};
use innkeep_hotels::{BookingError, ConfirmBooking, PaymentQuote};
use serde::Deserialize;
use uuid::Uuid;

use super::parse_hotel_id;
use crate::error::{ApiError, ApiResult};
use crate::extract::{ApiJson, AuthUser, number_or_text};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list))
        .route("/search", get(search))
        .route("/{hotel_id}", get(detail))
        .route("/{hotel_id}/bookings/payment-intent", post(payment_intent))
        .route("/{hotel_id}/bookings", post(book))
}

async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> ApiResult<Json<SearchPage<Hotel>>> {
    let search = params.into_search();
    Ok(Json(state.hotels.search(&search).await?))
}

async fn list(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Hotel>>> {
    Ok(Json(state.hotels.list().await?))
}

async fn detail(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> ApiResult<Json<Hotel>> {
    let id = parse_hotel_id(&id)?;
    Ok(Json(state.hotels.get(id).await?))
}

/// Unparseable hotel ids in booking routes read as an unknown hotel.
fn booking_hotel_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| BookingError::HotelNotFound.into())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuoteRequest {
    #[serde(deserialize_with = "number_or_text")]
    number_of_nights: u32,
}

async fn payment_intent(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Path(hotel_id): Path<String>,
    ApiJson(body): ApiJson<QuoteRequest>,
) -> ApiResult<Json<PaymentQuote>> {
    let hotel_id = booking_hotel_id(&hotel_id)?;
    let quote = state
        .bookings
        .quote(hotel_id, user_id, body.number_of_nights)
        .await?;
    Ok(Json(quote))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BookingRequest {
    payment_intent_id: String,
    first_name: String,
    last_name: String,
    email: String,
    #[serde(deserialize_with = "number_or_text")]
    adult_count: u32,
    #[serde(deserialize_with = "number_or_text")]
    child_count: u32,
    check_in: DateTime<Utc>,
    check_out: DateTime<Utc>,
}

impl From<BookingRequest> for ConfirmBooking {
    fn from(body: BookingRequest) -> Self {
        Self {
            payment_intent_id: body.payment_intent_id,
            first_name: body.first_name,
            last_name: body.last_name,
            email: body.email,
            adult_count: body.adult_count,
            child_count: body.child_count,
            check_in: body.check_in,
            check_out: body.check_out,
        }
    }
}

async fn book(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Path(hotel_id): Path<String>,
    ApiJson(body): ApiJson<BookingRequest>,
) -> ApiResult<Json<Booking>> {
    let hotel_id = booking_hotel_id(&hotel_id)?;
    let booking = state
        .bookings
        .confirm(hotel_id, user_id, body.into())
        .await?;
    Ok(Json(booking))
}
