//! Shared helpers for HTTP tests: an in-memory app with mock gateways.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{HeaderMap, Request, StatusCode, header};
use innkeep_auth::AuthConfig;
use innkeep_db::{DbConfig, DbManager};
use innkeep_gateway::mock::{MockMediaStore, MockPaymentGateway};
use innkeep_server::config::ServerConfig;
use innkeep_server::state::AppState;
use serde_json::Value;
use tower::ServiceExt;

pub struct TestApp {
    pub router: Router,
    pub state: Arc<AppState>,
    pub payments: Arc<MockPaymentGateway>,
    pub media: Arc<MockMediaStore>,
}

pub struct Reply {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl Reply {
    /// `name=value` part of the session cookie set by this response.
    pub fn session_cookie(&self) -> Option<String> {
        self.set_cookie()
            .and_then(|raw| raw.split(';').next().map(str::to_string))
    }

    pub fn set_cookie(&self) -> Option<String> {
        self.headers
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    }

    pub fn message(&self) -> &str {
        self.body["message"].as_str().unwrap_or_default()
    }
}

pub async fn spawn_app() -> TestApp {
    let db = DbManager::connect(&DbConfig::default()).await.unwrap();
    innkeep_db::run_migrations(db.client()).await.unwrap();

    let payments = Arc::new(MockPaymentGateway::new());
    let media = Arc::new(MockMediaStore::new());
    let auth = AuthConfig {
        jwt_secret: "http-test-secret".into(),
        ..AuthConfig::default()
    };

    let state = AppState::new(
        db.client().clone(),
        auth,
        payments.clone(),
        media.clone(),
        false,
    );
    let router = innkeep_server::app(state.clone(), &ServerConfig::default());

    TestApp {
        router,
        state,
        payments,
        media,
    }
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> Reply {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::String(
                String::from_utf8_lossy(&bytes).into_owned(),
            ))
        };
        Reply {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> Reply {
        let mut builder = Request::get(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn post_json(&self, uri: &str, cookie: Option<&str>, body: Value) -> Reply {
        let mut builder = Request::post(uri).header(header::CONTENT_TYPE, "application/json");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::from(body.to_string())).unwrap())
            .await
    }

    pub async fn send_form(
        &self,
        method: &str,
        uri: &str,
        cookie: &str,
        form: MultipartForm,
    ) -> Reply {
        let (content_type, body) = form.finish();
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::COOKIE, cookie)
            .header(header::CONTENT_TYPE, content_type)
            .body(Body::from(body))
            .unwrap();
        self.send(request).await
    }

    /// Register a user and return the session cookie.
    pub async fn register(&self, email: &str) -> String {
        let reply = self
            .post_json(
                "/api/users/register",
                None,
                serde_json::json!({
                    "email": email,
                    "password": "Secret123",
                    "firstName": "Test",
                    "lastName": "User",
                }),
            )
            .await;
        assert_eq!(reply.status, StatusCode::OK, "{:?}", reply.body);
        reply.session_cookie().unwrap()
    }
}

const BOUNDARY: &str = "innkeep-test-boundary";

/// Minimal `multipart/form-data` body builder.
#[derive(Default)]
pub struct MultipartForm {
    body: Vec<u8>,
}

impl MultipartForm {
    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, file_name: &str, content_type: &str, bytes: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; \
                 filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(bytes);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    fn finish(mut self) -> (String, Vec<u8>) {
        self.body
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        (
            format!("multipart/form-data; boundary={BOUNDARY}"),
            self.body,
        )
    }
}

/// A complete, valid hotel form.
pub fn hotel_form(name: &str) -> MultipartForm {
    MultipartForm::default()
        .text("name", name)
        .text("city", "Manchester")
        .text("country", "England")
        .text("description", "Near the station")
        .text("type", "Budget")
        .text("pricePerNight", "100")
        .text("starRating", "3")
        .text("adultCount", "2")
        .text("childCount", "1")
        .text("facilities[0]", "Free WiFi")
        .text("facilities[1]", "Parking")
}
