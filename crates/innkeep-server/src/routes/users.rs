//! `/api/users`: registration and profile.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_extra::extract::CookieJar;
use innkeep_auth::RegisterInput;
use innkeep_core::models::user::User;
use serde_json::{Value, json};

use crate::error::ApiResult;
use crate::extract::{ApiJson, AuthUser, session_cookie};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/register", post(register))
        .route("/me", get(me))
}

async fn register(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    ApiJson(input): ApiJson<RegisterInput>,
) -> ApiResult<(CookieJar, Json<Value>)> {
    let session = state.auth.register(input).await?;
    let jar = jar.add(session_cookie(session.token, state.secure_cookies));
    Ok((jar, Json(json!({ "message": "User registered OK" }))))
}

async fn me(State(state): State<Arc<AppState>>, AuthUser(user_id): AuthUser) -> ApiResult<Json<User>> {
    Ok(Json(state.auth.current_user(user_id).await?))
}
