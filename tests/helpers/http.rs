use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use hotel_directory::bootstrap::build_app_state;
use hotel_directory::infrastructure::http::router::build_router;
use hotel_directory::infrastructure::persistence::Database;
use hotel_directory::infrastructure::providers::StaticIdentityProvider;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

pub const ADMIN_KEY: &str = "admin-key";
pub const USER_KEY: &str = "user-key";

pub fn test_app(db: &Database) -> Router {
    let state = build_app_state(
        db.clone(),
        Arc::new(StaticIdentityProvider::builtin()),
        false,
    );
    build_router(state)
}

/// Send one request through the router; an empty body decodes to `Value::Null`.
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    send_request(app, builder.body(body).expect("Failed to build request")).await
}

pub async fn send_request(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("Router failed");

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("Response is not JSON")
    };
    (status, json)
}
