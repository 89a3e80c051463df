//! `/api/my-bookings`: hotels the signed-in user has booked.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use innkeep_core::models::hotel::Hotel;

use crate::error::ApiResult;
use crate::extract::AuthUser;
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(my_bookings))
}

async fn my_bookings(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
) -> ApiResult<Json<Vec<Hotel>>> {
    Ok(Json(state.bookings.my_bookings(user_id).await?))
}
