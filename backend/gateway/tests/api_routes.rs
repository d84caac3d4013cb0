use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use aegis_core::{AegisError, Document, DocumentKind, TextFragments, TextRecognizer};
use aegis_eligibility::EligibilityPolicy;
use aegis_gateway::{GatewaySettings, GatewayState, build_router};
use aegis_understanding::{DocumentReader, OcrSettings};
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;
use tracing_subscriber::fmt::MakeWriter;

const BOUNDARY: &str = "aegis-test-boundary";

fn app_with(settings: GatewaySettings, ocr: OcrSettings) -> Router {
    let reader = DocumentReader::from_settings(ocr);
    let state = GatewayState::new(Arc::new(reader), EligibilityPolicy::default());
    build_router(state, &settings)
}

/// Reader that never finishes within a test timeout.
struct StalledReader;

#[async_trait::async_trait]
impl TextRecognizer for StalledReader {
    fn name(&self) -> &str {
        "stalled"
    }

    fn supports(&self, _kind: DocumentKind) -> bool {
        true
    }

    async fn recognize(&self, _document: &Document) -> Result<TextFragments, AegisError> {
        tokio::time::sleep(Duration::from_secs(5)).await;
        Ok(TextFragments::default())
    }
}

/// Log sink shared between the subscriber and the test.
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

fn app() -> Router {
    app_with(GatewaySettings::default(), OcrSettings::default())
}

fn multipart_body(field: &str, filename: &str, content: &[u8]) -> Vec<u8> {
    let mut body = format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
    )
    .into_bytes();
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn upload_request(field: &str, filename: &str, content: &[u8]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/v1/upload-document")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(field, filename, content)))
        .expect("request builder should not fail")
}

fn eligibility_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/v1/check-eligibility")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builder should not fail")
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.expect("router should respond");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("response body must be readable")
        .to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn root_reports_active() {
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let (status, body) = send(app(), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "active", "service": "UnivAegis-Backend" }));
}

#[tokio::test]
async fn health_reports_version_and_uptime() {
    let request = Request::builder().uri("/api/health").body(Body::empty()).unwrap();
    let (status, body) = send(app(), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert!(body["uptime_seconds"].is_u64());
    assert!(body.get("ocr_engine").is_some());
}

#[tokio::test]
async fn text_upload_is_extracted() {
    let transcript = b"ANNA UNIVERSITY\nName: Priya Raman\nCGPA: 9.2\nTotal: 55000\n";
    let (status, body) = send(app(), upload_request("file", "transcript.txt", transcript)).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["status"], "success");
    assert_eq!(body["filename"], "transcript.txt");

    let data = &body["data"];
    assert_eq!(data["extracted_gpa"], "9.2");
    assert_eq!(data["extracted_name"], "Priya Raman");
    assert!(data["extracted_balance"].is_null());
    assert_eq!(
        data["raw_text"],
        "ANNA UNIVERSITY Name: Priya Raman CGPA: 9.2 Total: 55000"
    );
    let confidence = data["confidence_score"].as_f64().unwrap();
    assert!((0.0..=1.0).contains(&confidence));
}

#[tokio::test]
async fn bank_statement_balance() {
    let statement = b"STATE BANK OF INDIA\nAvailable Balance: Rs. 1,25,000.50\n";
    let (status, body) = send(app(), upload_request("file", "statement.txt", statement)).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["extracted_balance"], "125000.50");
}

#[tokio::test]
async fn unsupported_extension_is_rejected() {
    let (status, body) = send(app(), upload_request("file", "essay.docx", b"hello")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["detail"],
        "Unsupported file type. Allowed: pdf, jpg, jpeg, png, bmp, tiff, webp, txt"
    );
}

#[tokio::test]
async fn empty_upload_is_rejected() {
    let (status, body) = send(app(), upload_request("file", "scan.png", b"")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Uploaded file is empty");
}

#[tokio::test]
async fn missing_file_field_is_rejected() {
    let (status, body) = send(app(), upload_request("document", "scan.txt", b"GPA 3.9")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().unwrap().contains("file"));
}

#[tokio::test]
async fn missing_engine_is_service_unavailable() {
    let ocr = OcrSettings {
        tesseract_path: "/nonexistent/aegis-tesseract".to_string(),
        ..OcrSettings::default()
    };
    let app = app_with(GatewaySettings::default(), ocr);
    let (status, body) = send(app, upload_request("file", "scan.png", b"\x89PNG")).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body["detail"].as_str().unwrap().contains("unavailable"));
}

#[tokio::test]
async fn eligible_candidate() {
    let (status, body) =
        send(app(), eligibility_request(r#"{"extracted_gpa": "9.0", "ielts_score": 8.5}"#)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "eligible": true,
            "reasons": [
                "GPA 9.0 meets requirement (>= 8.0)",
                "IELTS score 8.5 meets requirement (>= 8.0)"
            ]
        })
    );
}

#[tokio::test]
async fn missing_grade_is_not_eligible() {
    let (status, body) =
        send(app(), eligibility_request(r#"{"extracted_gpa": null, "test_score": 7}"#)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["eligible"], false);
    assert_eq!(body["reasons"][0], "GPA/Percentage not found in document");
    assert_eq!(body["reasons"][1], "IELTS score 7.0 is below required 8.0");
}

#[tokio::test]
async fn malformed_json_is_unprocessable() {
    let (status, body) = send(app(), eligibility_request("{not json")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn rate_limit_applies_to_verification_routes() {
    let settings = GatewaySettings {
        rate_limit_max_requests: 1,
        rate_limit_window: Duration::from_secs(60),
        ..GatewaySettings::default()
    };
    let app = app_with(settings, OcrSettings::default());
    let body = r#"{"extracted_gpa": "85", "ielts_score": 8}"#;

    let (first, _) = send(app.clone(), eligibility_request(body)).await;
    assert_eq!(first, StatusCode::OK);
    let (second, detail) = send(app.clone(), eligibility_request(body)).await;
    assert_eq!(second, StatusCode::TOO_MANY_REQUESTS);
    assert!(detail["detail"].is_string());

    // health stays reachable
    let request = Request::builder().uri("/api/health").body(Body::empty()).unwrap();
    let (status, _) = send(app, request).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn oversize_upload_is_rejected() {
    let settings = GatewaySettings {
        max_upload_bytes: 64,
        ..GatewaySettings::default()
    };
    let app = app_with(settings, OcrSettings::default());
    let content = vec![b'a'; 4096];
    let (status, body) = send(app, upload_request("file", "transcript.txt", &content)).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body, json!({ "detail": "Uploaded file is too large" }));
}

#[tokio::test]
async fn slow_recognition_times_out() {
    let settings = GatewaySettings {
        request_timeout: Duration::from_millis(100),
        ..GatewaySettings::default()
    };
    let state = GatewayState::new(Arc::new(StalledReader), EligibilityPolicy::default());
    let app = build_router(state, &settings);
    let (status, _) = send(app, upload_request("file", "scan.png", b"\x89PNG")).await;
    assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
}

#[tokio::test]
async fn upload_logs_mask_the_filename() {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let transcript = b"Name: Priya Raman\nCGPA: 9.2\n";
    let (status, body) = send(
        app(),
        upload_request("file", "priya.raman@example.edu.txt", transcript),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["filename"], "priya.raman@example.edu.txt");

    let output = logs.contents();
    assert!(output.contains("Received document"), "{output}");
    assert!(!output.contains("priya.raman@example.edu"), "{output}");
}
