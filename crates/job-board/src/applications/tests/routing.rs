use axum::http::{Method, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use crate::applications::application_router;
use crate::testing::*;

#[tokio::test]
async fn apply_list_and_review_over_http() {
    let board = board();
    let company = board.company("c1", "Acme");
    let job = board.job(&company, "Backend Engineer");
    board.applicant("a1", "Ada");
    let router = application_router(board.tracker.clone());
    let base = format!("/api/v1/companies/{company}/jobs/{job}/applications");

    let response = router
        .clone()
        .oneshot(json_request(
            Method::POST,
            &base,
            json!({ "applicant_id": "a1" }),
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = router
        .clone()
        .oneshot(json_request(
            Method::POST,
            &base,
            json!({ "applicant_id": "a1" }),
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["already_applied"], json!(true));

    let response = router
        .clone()
        .oneshot(json_request(
            Method::PUT,
            &format!("{base}/a1/status"),
            json!({ "status": "Accepted" }),
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);

    let response = router
        .oneshot(empty_request(Method::GET, &base))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let applications = read_json_body(response).await;
    let applications = applications.as_array().expect("array");
    assert_eq!(applications.len(), 1);
    assert_eq!(applications[0]["id"], json!("a1"));
    assert_eq!(applications[0]["status"], json!("Accepted"));
    assert_eq!(applications[0]["snapshot"]["name"], json!("Ada"));
}

#[tokio::test]
async fn errors_map_to_http_statuses() {
    let board = board();
    let company = board.company("c1", "Acme");
    let job = board.job(&company, "Backend Engineer");
    board.applicant("a1", "Ada");
    let router = application_router(board.tracker.clone());
    let base = format!("/api/v1/companies/{company}/jobs/{job}/applications");

    let response = router
        .clone()
        .oneshot(json_request(
            Method::POST,
            &base,
            json!({ "applicant_id": "ghost" }),
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = router
        .clone()
        .oneshot(json_request(
            Method::PUT,
            &format!("{base}/a1/status"),
            json!({ "status": "Hired" }),
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = router
        .clone()
        .oneshot(json_request(
            Method::POST,
            &base,
            json!({ "applicant_id": "a1" }),
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = router
        .clone()
        .oneshot(json_request(
            Method::PUT,
            &format!("{base}/a1/status"),
            json!({ "status": "Rejected" }),
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);

    let response = router
        .clone()
        .oneshot(json_request(
            Method::PUT,
            &format!("{base}/a1/status"),
            json!({ "status": "Accepted" }),
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = router
        .oneshot(empty_request(
            Method::GET,
            "/api/v1/companies/c2/jobs/missing/applications",
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn applicant_lists_own_applications() {
    let board = board();
    let company = board.company("c1", "Acme");
    let job = board.job(&company, "Backend Engineer");
    let applicant = board.applicant("a1", "Ada");
    board
        .tracker
        .apply_with_profile(&company, &job, &applicant)
        .expect("applied");

    let response = application_router(board.tracker.clone())
        .oneshot(empty_request(
            Method::GET,
            "/api/v1/applicants/a1/applications",
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload.as_array().expect("array").len(), 1);
}
