//! Integration tests for batch certificate uploads and file serving.

mod helpers;

use axum::http::{StatusCode, header};
use helpers::{FilePart, TestApp};

const UPLOAD_PATH: &str = "/api/v1/upload-certificates";

#[tokio::test]
async fn test_upload_all_valid_files() {
    let app = TestApp::new().await;
    let cookie = app.authenticated().await;

    let response = app
        .upload(
            UPLOAD_PATH,
            &[FilePart::png("aws.png"), FilePart::png("gcp.png")],
            &[],
            Some(&cookie),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.message(), "Files upload completed");

    let data = &response.body["data"];
    assert_eq!(data["total"], 2);
    assert_eq!(data["successful"], 2);
    assert_eq!(data["failed"], 0);
    assert_eq!(data["errors"].as_array().unwrap().len(), 0);

    let files = data["files"].as_array().unwrap();
    assert_eq!(files.len(), 2);
    for file in files {
        let url = file["file_url"].as_str().unwrap();
        assert!(url.starts_with("http://folio.test/certifications/"), "{url}");
        assert!(file["file_name"].as_str().unwrap().ends_with(".png"));
        assert_eq!(file["title"], file["original_name"]);
        assert_eq!(file["issuer"], "N/A");
    }

    let listed = app.request("GET", UPLOAD_PATH, None, None).await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.body["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_uploaded_file_is_served() {
    let app = TestApp::new().await;
    let cookie = app.authenticated().await;

    let response = app
        .upload(UPLOAD_PATH, &[FilePart::png("badge.png")], &[], Some(&cookie))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let file_name = response.body["data"]["files"][0]["file_name"]
        .as_str()
        .unwrap()
        .to_string();

    let served = app
        .request("GET", &format!("/certifications/{file_name}"), None, None)
        .await;

    assert_eq!(served.status, StatusCode::OK);
    assert_eq!(
        served.headers.get(header::CONTENT_TYPE).unwrap(),
        "image/png"
    );
    assert_eq!(&served.bytes[..], FilePart::png("badge.png").data);
}

#[tokio::test]
async fn test_serving_unknown_file_is_not_found() {
    let app = TestApp::new().await;

    let response = app
        .request("GET", "/certifications/missing.png", None, None)
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app
        .request("GET", "/certifications/..secret", None, None)
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_upload_partial_success() {
    let app = TestApp::new().await;
    let cookie = app.authenticated().await;

    let response = app
        .upload(
            UPLOAD_PATH,
            &[
                FilePart::png("good.png"),
                FilePart {
                    file_name: "malware.exe",
                    content_type: "application/octet-stream",
                    data: b"MZ",
                },
            ],
            &[],
            Some(&cookie),
        )
        .await;

    assert_eq!(response.status, StatusCode::MULTI_STATUS);
    assert_eq!(response.body["success"], true);

    let data = &response.body["data"];
    assert_eq!(data["total"], 2);
    assert_eq!(data["successful"], 1);
    assert_eq!(data["failed"], 1);
    assert_eq!(data["files"][0]["original_name"], "good.png");
    assert_eq!(data["errors"][0]["original"], "malware.exe");
    assert!(
        data["errors"][0]["error"]
            .as_str()
            .unwrap()
            .starts_with("invalid file type")
    );
}

#[tokio::test]
async fn test_upload_all_invalid_files() {
    let app = TestApp::new().await;
    let cookie = app.authenticated().await;

    let response = app
        .upload(
            UPLOAD_PATH,
            &[
                FilePart {
                    file_name: "notes.txt",
                    content_type: "text/plain",
                    data: b"hello",
                },
                FilePart {
                    file_name: "scan.pdf",
                    content_type: "application/pdf",
                    data: b"%PDF",
                },
            ],
            &[],
            Some(&cookie),
        )
        .await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.message(), "Files upload completed");
    assert_eq!(response.body["data"]["failed"], 2);
    assert_eq!(response.body["data"]["successful"], 0);

    let listed = app.request("GET", UPLOAD_PATH, None, None).await;
    assert_eq!(listed.body["data"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_upload_applies_metadata_fields() {
    let app = TestApp::new().await;
    let cookie = app.authenticated().await;

    let response = app
        .upload(
            UPLOAD_PATH,
            &[FilePart::png("cka.png")],
            &[
                ("title", "Certified Kubernetes Administrator"),
                ("issuer", "CNCF"),
                ("issue_date", "15/01/2024"),
            ],
            Some(&cookie),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let file = &response.body["data"]["files"][0];
    assert_eq!(file["title"], "Certified Kubernetes Administrator");
    assert_eq!(file["issuer"], "CNCF");
    assert_eq!(file["issue_date"], "2024-01-15T00:00:00Z");
}

#[tokio::test]
async fn test_upload_without_files() {
    let app = TestApp::new().await;
    let cookie = app.authenticated().await;

    let response = app
        .upload(UPLOAD_PATH, &[], &[("title", "Nothing")], Some(&cookie))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.message(), "no files uploaded");
}

#[tokio::test]
async fn test_upload_worker_bounds() {
    let app = TestApp::new().await;
    let cookie = app.authenticated().await;

    let response = app
        .upload(
            &format!("{UPLOAD_PATH}?workers=21"),
            &[FilePart::png("a.png")],
            &[],
            Some(&cookie),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.message(), "workers must be between 0 and 20");

    let response = app
        .upload(
            &format!("{UPLOAD_PATH}?workers=20"),
            &[FilePart::png("a.png")],
            &[],
            Some(&cookie),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_upload_refused_during_shutdown() {
    let app = TestApp::new().await;
    let cookie = app.authenticated().await;
    app.state.shutdown.cancel();

    let response = app
        .upload(UPLOAD_PATH, &[FilePart::png("late.png")], &[], Some(&cookie))
        .await;

    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.body["error"], "SERVICE_UNAVAILABLE");
    assert_eq!(response.message(), "server is shutting down");
    assert_eq!(std::fs::read_dir(app.upload_dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_upload_requires_session() {
    let app = TestApp::new().await;

    let response = app
        .upload(UPLOAD_PATH, &[FilePart::png("a.png")], &[], None)
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_get_certification_by_id() {
    let app = TestApp::new().await;
    let cookie = app.authenticated().await;

    let response = app
        .upload(UPLOAD_PATH, &[FilePart::png("a.png")], &[], Some(&cookie))
        .await;
    let id = response.body["data"]["files"][0]["id"].as_i64().unwrap();

    let response = app
        .request("GET", &format!("{UPLOAD_PATH}/{id}"), None, None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["id"], id);
    assert_eq!(response.body["data"]["original_name"], "a.png");

    let response = app.request("GET", &format!("{UPLOAD_PATH}/abc"), None, None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.message(), "Invalid ID");

    let response = app.request("GET", &format!("{UPLOAD_PATH}/999"), None, None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.message(), "certification not found");
}

#[tokio::test]
async fn test_delete_certification_removes_file() {
    let app = TestApp::new().await;
    let cookie = app.authenticated().await;

    let response = app
        .upload(UPLOAD_PATH, &[FilePart::png("a.png")], &[], Some(&cookie))
        .await;
    let file = &response.body["data"]["files"][0];
    let id = file["id"].as_i64().unwrap();
    let file_name = file["file_name"].as_str().unwrap().to_string();
    assert!(app.upload_dir.path().join(&file_name).exists());

    let unauthenticated = app
        .request("DELETE", &format!("{UPLOAD_PATH}/{id}"), None, None)
        .await;
    assert_eq!(unauthenticated.status, StatusCode::UNAUTHORIZED);

    let response = app
        .request("DELETE", &format!("{UPLOAD_PATH}/{id}"), None, Some(&cookie))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(!app.upload_dir.path().join(&file_name).exists());

    let response = app
        .request("GET", &format!("{UPLOAD_PATH}/{id}"), None, None)
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app
        .request("GET", &format!("/certifications/{file_name}"), None, None)
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
