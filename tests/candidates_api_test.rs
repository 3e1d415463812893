mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{app, create_position, send, tenant_token};

#[tokio::test]
async fn candidate_lifecycle() {
    let app = app();
    let token = tenant_token();
    let position = create_position(&app, &token, json!({ "title": "Designer" })).await;

    let created = send(
        &app,
        Method::POST,
        "/api/recruitment/candidates",
        Some(&token),
        Some(json!({
            "position": position["id"],
            "name": "Grace Hopper",
            "email": "grace@example.com",
            "rating": "five"
        })),
    )
    .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let created = created.json();
    assert_eq!(created["stage"], "applied");
    assert_eq!(created["rating"], 0);
    assert_eq!(created["position"], "Designer");

    let uri = format!("/api/recruitment/candidates/{}", created["id"].as_str().unwrap());
    let moved = send(
        &app,
        Method::PATCH,
        &uri,
        Some(&token),
        Some(json!({ "stage": "interview", "rating": 4 })),
    )
    .await
    .json();
    assert_eq!(moved["stage"], "interview");
    assert_eq!(moved["rating"], 4);
    assert_eq!(moved["email"], "grace@example.com");

    let bad_stage = send(
        &app,
        Method::PATCH,
        &uri,
        Some(&token),
        Some(json!({ "stage": "ghosted" })),
    )
    .await;
    assert_eq!(bad_stage.status, StatusCode::BAD_REQUEST);

    let listed = send(
        &app,
        Method::GET,
        "/api/recruitment/candidates?q=example.com&sort=position",
        Some(&token),
        None,
    )
    .await
    .json();
    assert_eq!(listed["total"], 1);

    let deleted = send(&app, Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);
    let after = send(&app, Method::GET, "/api/recruitment/candidates", Some(&token), None)
        .await
        .json();
    assert_eq!(after["total"], 0);
}

#[tokio::test]
async fn deleted_position_cannot_take_candidates() {
    let app = app();
    let token = tenant_token();
    let position = create_position(&app, &token, json!({ "title": "Closed Role" })).await;
    let position_uri = format!(
        "/api/recruitment/job-positions/{}",
        position["id"].as_str().unwrap()
    );
    send(&app, Method::DELETE, &position_uri, Some(&token), None).await;

    let res = send(
        &app,
        Method::POST,
        "/api/recruitment/candidates",
        Some(&token),
        Some(json!({ "position": position["id"], "name": "Late Applicant" })),
    )
    .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert!(res.json()["error"].as_str().unwrap().contains("position"));
}

#[tokio::test]
async fn missing_position_is_rejected() {
    let app = app();
    let token = tenant_token();
    let res = send(
        &app,
        Method::POST,
        "/api/recruitment/candidates",
        Some(&token),
        Some(json!({ "name": "No Role" })),
    )
    .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn candidate_bulk_only_supports_delete() {
    let app = app();
    let token = tenant_token();
    let position = create_position(&app, &token, json!({ "title": "Tester" })).await;
    let candidate = send(
        &app,
        Method::POST,
        "/api/recruitment/candidates",
        Some(&token),
        Some(json!({ "position": position["id"], "name": "Linus" })),
    )
    .await
    .json();

    let activate = send(
        &app,
        Method::POST,
        "/api/recruitment/candidates/bulk",
        Some(&token),
        Some(json!({ "ids": [candidate["id"]], "action": "activate" })),
    )
    .await
    .json();
    assert_eq!(activate["affected"], 0);

    let delete = send(
        &app,
        Method::POST,
        "/api/recruitment/candidates/bulk",
        Some(&token),
        Some(json!({ "ids": [candidate["id"]], "action": "delete" })),
    )
    .await
    .json();
    assert_eq!(delete["affected"], 1);
}

#[tokio::test]
async fn candidate_csv_export_uses_position_title() {
    let app = app();
    let token = tenant_token();
    let position = create_position(&app, &token, json!({ "title": "Designer" })).await;
    send(
        &app,
        Method::POST,
        "/api/recruitment/candidates",
        Some(&token),
        Some(json!({
            "position": position["id"],
            "name": "Ada",
            "stage": "offer",
            "rating": 5,
            "phone": "+1 555"
        })),
    )
    .await;

    let res = send(
        &app,
        Method::GET,
        "/api/recruitment/candidates?export=csv",
        Some(&token),
        None,
    )
    .await;
    let text = String::from_utf8(res.body).unwrap();
    assert_eq!(
        text,
        "Name,JobPosition,Stage,Rating,Email,Phone\nAda,Designer,offer,5,,+1 555\n"
    );
}

#[tokio::test]
async fn malformed_email_is_rejected() {
    let app = app();
    let token = tenant_token();
    let position = create_position(&app, &token, json!({ "title": "Support" })).await;

    let res = send(
        &app,
        Method::POST,
        "/api/recruitment/candidates",
        Some(&token),
        Some(json!({ "position": position["id"], "name": "Ada", "email": "not an email" })),
    )
    .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert!(res.json()["error"].as_str().unwrap().contains("email"));

    let listed = send(&app, Method::GET, "/api/recruitment/candidates", Some(&token), None)
        .await
        .json();
    assert_eq!(listed["total"], 0);
}
