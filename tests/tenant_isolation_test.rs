mod common;

use axum::http::{Method, StatusCode};
use recruitment_hub::models::context::permissions;
use serde_json::json;

use common::{app, create_position, send, tenant_token, token_for};

#[tokio::test]
async fn tenants_never_see_each_other() {
    let app = app();
    let alice = tenant_token();
    let bob = tenant_token();

    let position = create_position(&app, &alice, json!({ "title": "Secret Role" })).await;
    let uri = format!("/api/recruitment/job-positions/{}", position["id"].as_str().unwrap());

    let listed = send(
        &app,
        Method::GET,
        "/api/recruitment/job-positions?include_deleted=1",
        Some(&bob),
        None,
    )
    .await
    .json();
    assert_eq!(listed["total"], 0);

    let edit = send(&app, Method::PATCH, &uri, Some(&bob), Some(json!({ "title": "Mine" }))).await;
    assert_eq!(edit.status, StatusCode::NOT_FOUND);
    let delete = send(&app, Method::DELETE, &uri, Some(&bob), None).await;
    assert_eq!(delete.status, StatusCode::NOT_FOUND);

    let bulk = send(
        &app,
        Method::POST,
        "/api/recruitment/job-positions/bulk",
        Some(&bob),
        Some(json!({ "ids": [position["id"]], "action": "delete" })),
    )
    .await
    .json();
    assert_eq!(bulk["affected"], 0);

    let foreign_candidate = send(
        &app,
        Method::POST,
        "/api/recruitment/candidates",
        Some(&bob),
        Some(json!({ "position": position["id"], "name": "Spy" })),
    )
    .await;
    assert_eq!(foreign_candidate.status, StatusCode::BAD_REQUEST);

    let dashboard = send(&app, Method::GET, "/api/recruitment/dashboard", Some(&alice), None)
        .await
        .json();
    assert_eq!(dashboard["total_job_positions"], 1);
    assert_eq!(dashboard["total_candidates"], 0);
}

#[tokio::test]
async fn session_is_required() {
    let app = app();

    let health = send(&app, Method::GET, "/health", None, None).await;
    assert_eq!(health.status, StatusCode::OK);

    let anonymous = send(&app, Method::GET, "/api/recruitment/job-positions", None, None).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);
    assert_eq!(anonymous.json()["error"], "missing_authorization");

    let forged = send(
        &app,
        Method::GET,
        "/api/recruitment/job-positions",
        Some("not.a.jwt"),
        None,
    )
    .await;
    assert_eq!(forged.status, StatusCode::UNAUTHORIZED);
    assert_eq!(forged.json()["error"], "invalid_token");
}

#[tokio::test]
async fn tenantless_session_is_unauthorized() {
    let app = app();
    let token = token_for(None, &permissions::ALL);

    let res = send(&app, Method::GET, "/api/recruitment/job-positions", Some(&token), None).await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);

    let tool = send(
        &app,
        Method::POST,
        "/api/recruitment/assistant/tools/list_job_positions",
        Some(&token),
        Some(json!({})),
    )
    .await;
    assert_eq!(tool.status, StatusCode::UNAUTHORIZED);
}
