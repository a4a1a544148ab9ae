//! Conversion relay integration tests.
//!
//! Run with: `cargo test -p paperlane-api --test convert_test`

mod helpers;

use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};
use helpers::{api_path, setup_test_app, Upstreams};
use serde_json::Value;

const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

fn convert_form(filename: &str, bytes: &[u8], instructions: Option<&str>) -> MultipartForm {
    let mut form = MultipartForm::new().add_part(
        "file",
        Part::bytes(bytes.to_vec())
            .file_name(filename.to_string())
            .mime_type(DOCX_MIME),
    );
    if let Some(instructions) = instructions {
        form = form.add_text("instructions", instructions.to_string());
    }
    form
}

#[tokio::test]
async fn test_convert_passes_converted_bytes_through() {
    let mut upstream = mockito::Server::new_async().await;
    let source = b"source document bytes".to_vec();
    // Upstream echoes the input back unchanged
    let mock = upstream
        .mock("POST", "/convert")
        .with_status(200)
        .with_body(source.clone())
        .create_async()
        .await;

    let server = setup_test_app(&Upstreams {
        conversion_url: &upstream.url(),
        ..Default::default()
    });

    let response = server
        .post(&api_path("/convert"))
        .multipart(convert_form("report.docx", &source, Some("{}")))
        .await;

    mock.assert_async().await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.as_bytes().as_ref(), source.as_slice());
    assert_eq!(
        response.header("content-type").to_str().unwrap(),
        "application/pdf"
    );
    assert_eq!(
        response.header("content-disposition").to_str().unwrap(),
        "attachment; filename=\"report.pdf\""
    );
}

#[tokio::test]
async fn test_convert_derives_pdf_name_for_extensionless_source() {
    let mut upstream = mockito::Server::new_async().await;
    let _mock = upstream
        .mock("POST", "/convert")
        .with_status(200)
        .with_body("%PDF")
        .create_async()
        .await;

    let server = setup_test_app(&Upstreams {
        conversion_url: &upstream.url(),
        ..Default::default()
    });

    let response = server
        .post(&api_path("/convert"))
        .multipart(convert_form("scan", b"bytes", Some(r#"{"ocr": true}"#)))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.header("content-disposition").to_str().unwrap(),
        "attachment; filename=\"scan.pdf\""
    );
}

#[tokio::test]
async fn test_convert_without_file_is_rejected() {
    let server = setup_test_app(&Upstreams::default());

    let form = MultipartForm::new().add_text("instructions", "{}");
    let response = server.post(&api_path("/convert")).multipart(form).await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("file"));
}

#[tokio::test]
async fn test_convert_without_instructions_is_rejected() {
    let server = setup_test_app(&Upstreams::default());

    let response = server
        .post(&api_path("/convert"))
        .multipart(convert_form("report.docx", b"bytes", None))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("instructions"));
}

#[tokio::test]
async fn test_convert_with_malformed_instructions_is_rejected() {
    let server = setup_test_app(&Upstreams::default());

    let response = server
        .post(&api_path("/convert"))
        .multipart(convert_form("report.docx", b"bytes", Some("not json")))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("instructions"));
}

#[tokio::test]
async fn test_convert_with_empty_file_is_rejected() {
    let server = setup_test_app(&Upstreams::default());

    let response = server
        .post(&api_path("/convert"))
        .multipart(convert_form("report.docx", b"", Some("{}")))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_convert_without_credential_skips_upstream() {
    let mut upstream = mockito::Server::new_async().await;
    let mock = upstream
        .mock("POST", "/convert")
        .expect(0)
        .create_async()
        .await;

    let server = setup_test_app(&Upstreams {
        conversion_url: &upstream.url(),
        conversion_key: None,
        ..Default::default()
    });

    let response = server
        .post(&api_path("/convert"))
        .multipart(convert_form("report.docx", b"bytes", Some("{}")))
        .await;

    // Credential precheck fires before any network call
    mock.assert_async().await;
    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("not configured"));
}

#[tokio::test]
async fn test_convert_passes_upstream_error_status_through() {
    let mut upstream = mockito::Server::new_async().await;
    let _mock = upstream
        .mock("POST", "/convert")
        .with_status(503)
        .with_body("conversion backend overloaded")
        .create_async()
        .await;

    let server = setup_test_app(&Upstreams {
        conversion_url: &upstream.url(),
        ..Default::default()
    });

    let response = server
        .post(&api_path("/convert"))
        .multipart(convert_form("report.docx", b"bytes", Some("{}")))
        .await;

    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = response.json();
    assert_eq!(body["code"].as_str().unwrap(), "UPSTREAM_ERROR");
    assert!(body["details"]
        .as_str()
        .unwrap()
        .contains("conversion backend overloaded"));
}

#[tokio::test]
async fn test_convert_instructions_forwarded_to_upstream() {
    let mut upstream = mockito::Server::new_async().await;
    let mock = upstream
        .mock("POST", "/convert")
        .match_body(mockito::Matcher::AllOf(vec![
            mockito::Matcher::Regex("\"ocr\":true".to_string()),
            mockito::Matcher::Regex("\"redact\":true".to_string()),
        ]))
        .with_status(200)
        .with_body("%PDF")
        .create_async()
        .await;

    let server = setup_test_app(&Upstreams {
        conversion_url: &upstream.url(),
        ..Default::default()
    });

    let response = server
        .post(&api_path("/convert"))
        .multipart(convert_form(
            "report.docx",
            b"bytes",
            Some(r#"{"ocr": true, "redact": true}"#),
        ))
        .await;

    mock.assert_async().await;
    assert_eq!(response.status_code(), StatusCode::OK);
}
