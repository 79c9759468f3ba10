//! Image archive endpoint tests.
//!
//! Uses tower::ServiceExt to send requests directly to the router.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use showroom_core::{
    ArchiveResult, FileLocationService, FileSystemStore, ImageLocator, RowId,
};
use showroom_server::{create_router, AppState};
use tower::ServiceExt;

const BOUNDARY: &str = "showroom-test-boundary";
const JPEG_BYTES: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46, 0x49, 0x46];

/// Stands in for the storage-backed locator and records what it was given.
#[derive(Default)]
struct FakeLocator {
    saved: Mutex<Vec<(Vec<u8>, String)>>,
}

impl ImageLocator for FakeLocator {
    fn save(&self, bytes: &[u8], name: &str) -> ArchiveResult<RowId> {
        let mut saved = self.saved.lock().unwrap();
        saved.push((bytes.to_vec(), name.to_string()));
        Ok(saved.len() as RowId)
    }

    fn find(&self, id: RowId) -> ArchiveResult<Option<Vec<u8>>> {
        Ok((id == 1).then(|| JPEG_BYTES.to_vec()))
    }
}

fn router_with(locator: Arc<dyn ImageLocator>) -> Router {
    create_router(AppState::new(locator), Duration::from_secs(5), 1024 * 1024)
}

fn multipart_request(field: &str, file_name: &str, bytes: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: text/plain\r\n\r\n");
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri("/file-system/image")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

#[tokio::test]
async fn upload_returns_generated_id_as_text() {
    let locator = Arc::new(FakeLocator::default());
    let app = router_with(locator.clone());

    let response = app
        .oneshot(multipart_request("image", "canedo", JPEG_BYTES))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, b"1");

    let saved = locator.saved.lock().unwrap();
    assert_eq!(saved.as_slice(), &[(JPEG_BYTES.to_vec(), "canedo".to_string())]);
}

#[tokio::test]
async fn upload_without_image_field_is_bad_request() {
    let locator = Arc::new(FakeLocator::default());
    let app = router_with(locator.clone());

    let response = app
        .oneshot(multipart_request("document", "canedo", JPEG_BYTES))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(locator.saved.lock().unwrap().is_empty());
}

#[tokio::test]
async fn download_returns_jpeg_bytes() {
    let app = router_with(Arc::new(FakeLocator::default()));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/file-system/image/1")
                .header(header::CONTENT_TYPE, "image/jpeg")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "image/jpeg"
    );
    assert_eq!(body_bytes(response).await, JPEG_BYTES);
}

#[tokio::test]
async fn download_unknown_id_is_not_found() {
    let app = router_with(Arc::new(FakeLocator::default()));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/file-system/image/2")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn download_with_non_numeric_id_is_rejected() {
    let app = router_with(Arc::new(FakeLocator::default()));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/file-system/image/latest")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn upload_then_download_through_file_location_service() {
    let dir = tempfile::tempdir().unwrap();
    let conn = showroom_core::db::open_db_in_memory().unwrap();
    let locator = FileLocationService::new(
        Arc::new(Mutex::new(conn)),
        FileSystemStore::new(dir.path()),
    );
    let app = router_with(Arc::new(locator));

    let response = app
        .clone()
        .oneshot(multipart_request("image", "canedo", JPEG_BYTES))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let id = String::from_utf8(body_bytes(response).await).unwrap();
    assert_eq!(id, "1");

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/file-system/image/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, JPEG_BYTES);
}

#[tokio::test]
async fn health_reports_ok() {
    let app = router_with(Arc::new(FakeLocator::default()));

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(body["status"], "ok");
}
