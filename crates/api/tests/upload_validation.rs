//! Integration tests for upload rejection paths.
//!
//! Every rejection here happens before a file is stored or a row is
//! created, so the tests run against a lazily-connected pool with no
//! database behind it.

mod common;

use axum::http::StatusCode;
use common::{body_json, multipart_upload, multipart_without_file};
use mirador_core::upload::MAX_UPLOAD_BYTES;
use tower::ServiceExt;

// ---------------------------------------------------------------------------
// Test: unsupported file type is rejected with a validation error
// ---------------------------------------------------------------------------

#[tokio::test]
async fn rejects_unsupported_file_type() {
    let app = common::build_test_app();
    let request = multipart_upload(
        "/api/v1/prospects",
        "malware.exe",
        "application/x-msdownload",
        b"MZ",
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["error"]
        .as_str()
        .unwrap()
        .contains("Unsupported file type"));
}

// ---------------------------------------------------------------------------
// Test: oversized upload is rejected before any prospect is created
// ---------------------------------------------------------------------------

#[tokio::test]
async fn rejects_upload_over_50mb() {
    let app = common::build_test_app();
    let oversized = vec![0u8; (MAX_UPLOAD_BYTES + 1) as usize];
    let request = multipart_upload(
        "/api/v1/prospects",
        "brochure.pdf",
        "application/pdf",
        &oversized,
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["error"].as_str().unwrap().contains("50MB"));
}

// ---------------------------------------------------------------------------
// Test: multipart without a file field is a bad request
// ---------------------------------------------------------------------------

#[tokio::test]
async fn rejects_multipart_without_file() {
    let app = common::build_test_app();
    let request = multipart_without_file("/api/v1/prospects");

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
    assert!(json["error"].as_str().unwrap().contains("No file received"));
}

// ---------------------------------------------------------------------------
// Test: error responses use the standard {error, code} envelope
// ---------------------------------------------------------------------------

#[tokio::test]
async fn error_envelope_has_error_and_code_fields() {
    let app = common::build_test_app();
    let request = multipart_upload("/api/v1/prospects", "notes.txt", "text/plain", b"hello");

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert!(json["error"].is_string());
    assert!(json["code"].is_string());
}
