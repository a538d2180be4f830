//! Integration tests for experience and project CRUD plus health endpoints.

mod helpers;

use axum::http::StatusCode;
use helpers::TestApp;
use serde_json::json;

fn experience_body() -> serde_json::Value {
    json!({
        "title": "Backend Engineer",
        "company": "Acme",
        "url": "https://acme.example",
        "location": "Berlin",
        "type": "Hybrid",
        "start_date": "01/03/2021",
        "end_date": "2023-06-30",
        "description": "Built the payments API"
    })
}

fn project_body() -> serde_json::Value {
    json!({
        "name": "folio",
        "description": "Portfolio backend",
        "url": "https://github.com/acme/folio",
        "technologies": ["rust", "axum"],
        "start_date": "2024-01-01"
    })
}

#[tokio::test]
async fn test_experience_lifecycle() {
    let app = TestApp::new().await;
    let cookie = app.authenticated().await;

    let created = app
        .request("POST", "/api/v1/experiences", Some(experience_body()), Some(&cookie))
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let data = &created.body["data"];
    assert_eq!(data["type"], "Hybrid");
    assert_eq!(data["start_date"], "2021-03-01");
    assert_eq!(data["end_date"], "2023-06-30");
    let id = data["id"].as_i64().unwrap();

    let listed = app.request("GET", "/api/v1/experiences", None, None).await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.body["data"].as_array().unwrap().len(), 1);

    let path = format!("/api/v1/experiences/{id}");
    let patched = app
        .request(
            "PATCH",
            &path,
            Some(json!({ "title": "Staff Engineer", "type": "On Site", "end_date": "" })),
            Some(&cookie),
        )
        .await;
    assert_eq!(patched.status, StatusCode::OK);
    assert_eq!(patched.body["data"]["title"], "Staff Engineer");
    assert_eq!(patched.body["data"]["type"], "On Site");
    assert_eq!(patched.body["data"]["company"], "Acme");
    assert!(patched.body["data"]["end_date"].is_null());

    let fetched = app.request("GET", &path, None, None).await;
    assert_eq!(fetched.body["data"]["title"], "Staff Engineer");

    let deleted = app.request("DELETE", &path, None, Some(&cookie)).await;
    assert_eq!(deleted.status, StatusCode::OK);

    let missing = app.request("GET", &path, None, None).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.message(), "experience not found");
}

#[tokio::test]
async fn test_experience_writes_require_session() {
    let app = TestApp::new().await;

    let response = app
        .request("POST", "/api/v1/experiences", Some(experience_body()), None)
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app.request("DELETE", "/api/v1/experiences/1", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_experience_validation() {
    let app = TestApp::new().await;
    let cookie = app.authenticated().await;

    let mut body = experience_body();
    body["type"] = json!("Freelance");
    let response = app
        .request("POST", "/api/v1/experiences", Some(body), Some(&cookie))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");

    let mut body = experience_body();
    body["end_date"] = json!("2020-01-01");
    let response = app
        .request("POST", "/api/v1/experiences", Some(body), Some(&cookie))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.message(), "end date must be after start date");

    let mut body = experience_body();
    body["start_date"] = json!("someday");
    let response = app
        .request("POST", "/api/v1/experiences", Some(body), Some(&cookie))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .request("GET", "/api/v1/experiences/not-a-number", None, None)
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.message(), "Invalid ID");
}

#[tokio::test]
async fn test_project_lifecycle() {
    let app = TestApp::new().await;
    let cookie = app.authenticated().await;

    let created = app
        .request("POST", "/api/v1/projects", Some(project_body()), Some(&cookie))
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["data"]["technologies"], json!(["rust", "axum"]));
    assert!(created.body["data"]["end_date"].is_null());
    let id = created.body["data"]["id"].as_i64().unwrap();

    let path = format!("/api/v1/projects/{id}");
    let patched = app
        .request(
            "PATCH",
            &path,
            Some(json!({ "end_date": "30/06/2024", "technologies": ["rust"] })),
            Some(&cookie),
        )
        .await;
    assert_eq!(patched.status, StatusCode::OK);
    assert_eq!(patched.body["data"]["end_date"], "2024-06-30");
    assert_eq!(patched.body["data"]["technologies"], json!(["rust"]));
    assert_eq!(patched.body["data"]["name"], "folio");

    let inverted = app
        .request(
            "PATCH",
            &path,
            Some(json!({ "end_date": "2023-01-01" })),
            Some(&cookie),
        )
        .await;
    assert_eq!(inverted.status, StatusCode::BAD_REQUEST);

    let deleted = app.request("DELETE", &path, None, Some(&cookie)).await;
    assert_eq!(deleted.status, StatusCode::OK);

    let missing = app.request("DELETE", &path, None, Some(&cookie)).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.message(), "project not found");
}

#[tokio::test]
async fn test_health_endpoints() {
    let app = TestApp::new().await;

    for path in ["/health", "/api/v1/health"] {
        let response = app.request("GET", path, None, None).await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["status"], "ok");
        assert!(response.body["version"].is_string());
    }
}
