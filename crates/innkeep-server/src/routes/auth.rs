//! `/api/auth`: login, session check and logout.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_extra::extract::CookieJar;
use innkeep_auth::LoginInput;
use serde_json::{Value, json};

use crate::error::ApiResult;
use crate::extract::{ApiJson, AuthUser, expired_cookie, session_cookie};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/login", post(login))
        .route("/validate-token", get(validate_token))
        .route("/logout", post(logout))
}

async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    ApiJson(input): ApiJson<LoginInput>,
) -> ApiResult<(CookieJar, Json<Value>)> {
    let session = state.auth.login(input).await?;
    let jar = jar.add(session_cookie(session.token, state.secure_cookies));
    Ok((jar, Json(json!({ "userId": session.user_id }))))
}

async fn validate_token(AuthUser(user_id): AuthUser) -> Json<Value> {
    Json(json!({ "userId": user_id }))
}

async fn logout(State(state): State<Arc<AppState>>, jar: CookieJar) -> (CookieJar, Json<Value>) {
    let jar = jar.add(expired_cookie(state.secure_cookies));
    (jar, Json(json!({ "message": "Signed out" })))
}
