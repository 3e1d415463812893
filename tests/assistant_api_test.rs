mod common;

use axum::http::{Method, StatusCode};
use recruitment_hub::models::context::permissions;
use serde_json::json;
use uuid::Uuid;

use common::{app, send, tenant_token, token_for};

const TOOLS: &str = "/api/recruitment/assistant/tools";

#[tokio::test]
async fn create_requires_confirmation() {
    let app = app();
    let token = tenant_token();
    let uri = format!("{}/create_job_position", TOOLS);

    let proposal = send(
        &app,
        Method::POST,
        &uri,
        Some(&token),
        Some(json!({ "arguments": { "title": "Data Engineer", "vacancies": 2 } })),
    )
    .await;
    assert_eq!(proposal.status, StatusCode::OK);
    let proposal = proposal.json();
    assert_eq!(proposal["status"], "pending_confirmation");
    assert_eq!(proposal["arguments"]["title"], "Data Engineer");

    let listed = send(
        &app,
        Method::GET,
        "/api/recruitment/job-positions",
        Some(&token),
        None,
    )
    .await
    .json();
    assert_eq!(listed["total"], 0);

    let done = send(
        &app,
        Method::POST,
        &uri,
        Some(&token),
        Some(json!({
            "arguments": { "title": "Data Engineer", "vacancies": 2 },
            "confirmed": true
        })),
    )
    .await
    .json();
    assert_eq!(done["status"], "completed");
    assert_eq!(done["result"]["created"], true);
    assert_eq!(done["result"]["title"], "Data Engineer");

    let positions = send(
        &app,
        Method::POST,
        &format!("{}/list_job_positions", TOOLS),
        Some(&token),
        Some(json!({ "arguments": { "department": "" } })),
    )
    .await
    .json();
    let first = &positions["result"]["positions"][0];
    assert_eq!(first["title"], "Data Engineer");
    assert_eq!(first["vacancies"], 2);
    assert_eq!(first["status"], "open");
}

#[tokio::test]
async fn candidate_tools_round_trip() {
    let app = app();
    let token = tenant_token();

    let position = send(
        &app,
        Method::POST,
        &format!("{}/create_job_position", TOOLS),
        Some(&token),
        Some(json!({ "arguments": { "title": "Recruiter" }, "confirmed": true })),
    )
    .await
    .json();
    let position_id = position["result"]["id"].clone();

    let created = send(
        &app,
        Method::POST,
        &format!("{}/create_candidate", TOOLS),
        Some(&token),
        Some(json!({
            "arguments": { "position_id": position_id, "name": "Barbara", "email": "b@example.com" },
            "confirmed": true
        })),
    )
    .await
    .json();
    assert_eq!(created["result"]["name"], "Barbara");

    let listed = send(
        &app,
        Method::POST,
        &format!("{}/list_candidates", TOOLS),
        Some(&token),
        Some(json!({ "arguments": { "position_id": position_id, "stage": "applied", "limit": 0 } })),
    )
    .await
    .json();
    let candidates = listed["result"]["candidates"].as_array().unwrap();
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0]["position"], "Recruiter");
    assert_eq!(candidates[0]["rating"], 0);

    let bad_stage = send(
        &app,
        Method::POST,
        &format!("{}/list_candidates", TOOLS),
        Some(&token),
        Some(json!({ "arguments": { "stage": "sleeping" } })),
    )
    .await;
    assert_eq!(bad_stage.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn missing_permission_is_forbidden() {
    let app = app();
    let token = token_for(Some(Uuid::new_v4()), &[permissions::VIEW_CANDIDATE]);

    let res = send(
        &app,
        Method::POST,
        &format!("{}/create_job_position", TOOLS),
        Some(&token),
        Some(json!({ "arguments": { "title": "Nope" }, "confirmed": true })),
    )
    .await;
    assert_eq!(res.status, StatusCode::FORBIDDEN);

    let tools = send(&app, Method::GET, TOOLS, Some(&token), None).await.json();
    assert_eq!(tools["tools"].as_array().unwrap().len(), 1);
    assert_eq!(tools["tools"][0]["name"], "list_candidates");
}

#[tokio::test]
async fn unknown_tool_and_extra_arguments() {
    let app = app();
    let token = tenant_token();

    let unknown = send(
        &app,
        Method::POST,
        &format!("{}/fire_everyone", TOOLS),
        Some(&token),
        Some(json!({})),
    )
    .await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);

    let extra = send(
        &app,
        Method::POST,
        &format!("{}/list_job_positions", TOOLS),
        Some(&token),
        Some(json!({ "arguments": { "salary": 100 } })),
    )
    .await;
    assert_eq!(extra.status, StatusCode::BAD_REQUEST);
}
