#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use recruitment_hub::{
    database::memory::MemoryStore, middleware::auth::Claims, models::context::permissions,
    routes, utils::token::issue_token, AppState,
};
use serde_json::Value as JsonValue;
use tower::ServiceExt;
use uuid::Uuid;

pub const SECRET: &str = "test_secret_key";

pub fn app() -> Router {
    routes::router(AppState::new(Arc::new(MemoryStore::new()), SECRET))
}

pub fn token_for(tenant_id: Option<Uuid>, grants: &[&str]) -> String {
    let exp = (chrono::Utc::now() + chrono::Duration::hours(1)).timestamp() as usize;
    let claims = Claims {
        sub: "tester".into(),
        exp,
        tenant_id,
        permissions: grants.iter().map(|p| p.to_string()).collect(),
    };
    issue_token(SECRET, &claims).expect("sign token")
}

/// Token for a fresh tenant holding every module permission.
pub fn tenant_token() -> String {
    token_for(Some(Uuid::new_v4()), &permissions::ALL)
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> JsonValue {
        serde_json::from_slice(&self.body).expect("json body")
    }
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<JsonValue>,
) -> TestResponse {
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
    let res = app
        .clone()
        .oneshot(builder.body(body).expect("request"))
        .await
        .expect("response");
    let status = res.status();
    let headers = res.headers().clone();
    let body = to_bytes(res.into_body(), usize::MAX)
        .await
        .expect("body")
        .to_vec();
    TestResponse {
        status,
        headers,
        body,
    }
}

pub async fn create_position(app: &Router, token: &str, body: JsonValue) -> JsonValue {
    let res = send(
        app,
        Method::POST,
        "/api/recruitment/job-positions",
        Some(token),
        Some(body),
    )
    .await;
    assert_eq!(res.status, StatusCode::CREATED, "{}", String::from_utf8_lossy(&res.body));
    res.json()
}
