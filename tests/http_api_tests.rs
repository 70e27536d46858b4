//! End-to-end tests for the HTTP API, driving the router directly with
//! `tower::ServiceExt::oneshot` and the in-memory repository.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::fs::File;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

use skycam_backend::config::AppConfig;
use skycam_backend::db::{Camera, CaptureImage, CaptureRepository, LocalRepository};
use skycam_backend::http::{create_router, AppState};

struct Fixture {
    router: Router,
    // Keeps the image files alive for the duration of the test
    _archive: TempDir,
}

fn fixture() -> Fixture {
    let archive = TempDir::new().unwrap();
    let repo = LocalRepository::new();
    repo.insert_camera(Camera {
        id: 1,
        name: "allsky-north".to_string(),
    });
    for (id, at, sqm) in [(1, 100, Some(19.5)), (2, 200, Some(20.0)), (3, 300, None)] {
        let path = archive.path().join(format!("img{id}.jpg"));
        File::create(&path).unwrap();
        repo.insert_image(CaptureImage {
            id,
            camera_id: 1,
            captured_at: at,
            filename: path.to_string_lossy().into_owned(),
            sqm,
        });
    }

    let mut config = AppConfig::default();
    config.archive.rewrite_from = archive.path().to_string_lossy().into_owned();
    config.archive.rewrite_to = "/images".to_string();
    // Point the scanner at the (empty) temp archive rather than the system default
    config.archive.base_dir = archive.path().to_path_buf();

    let state = AppState::new(
        Arc::new(repo) as Arc<dyn CaptureRepository>,
        Arc::new(config),
    );
    Fixture {
        router: create_router(state),
        _archive: archive,
    }
}

async fn get(router: Router, uri: &str) -> (StatusCode, Option<String>, Vec<u8>) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec();
    (status, content_type, body)
}

async fn get_json(router: Router, uri: &str) -> Value {
    let (status, _, body) = get(router, uri).await;
    assert_eq!(status, StatusCode::OK);
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let fx = fixture();
    let json = get_json(fx.router, "/health").await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["version"], "v1");
    assert_eq!(json["database"], "connected");
}

#[tokio::test]
async fn test_list_cameras_endpoint() {
    let fx = fixture();
    let json = get_json(fx.router, "/v1/cameras").await;
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["name"], "allsky-north");
}

#[tokio::test]
async fn test_camera_images_endpoint_chronological_with_rewrite() {
    let fx = fixture();
    let json = get_json(fx.router, "/v1/cameras/1/images").await;
    let rows = json.as_array().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["file"], "/images/img1.jpg");
    assert_eq!(rows[0]["measurement"], 19.5);
    assert_eq!(rows[2]["file"], "/images/img3.jpg");
    assert!(rows[2]["measurement"].is_null());
}

#[tokio::test]
async fn test_camera_images_invalid_limit_falls_back_to_default() {
    let fx = fixture();
    // A mangled limit must not produce an HTTP error
    let json = get_json(fx.router, "/v1/cameras/1/images?limit=bananas").await;
    assert_eq!(json.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_camera_images_limit_is_clamped() {
    let fx = fixture();
    // limit=0 clamps to 1: only the newest row survives, then chronological
    let json = get_json(fx.router, "/v1/cameras/1/images?limit=0").await;
    let rows = json.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["file"], "/images/img3.jpg");
}

#[tokio::test]
async fn test_camera_sqm_endpoint() {
    let fx = fixture();
    let json = get_json(fx.router, "/v1/cameras/1/sqm?from=150").await;
    let points = json.as_array().unwrap();
    // Only t=200 has a reading inside the window; t=300 is NULL
    assert_eq!(points.len(), 1);
    assert_eq!(points[0]["x"], 200);
    assert_eq!(points[0]["y"], 20.0);
}

#[tokio::test]
async fn test_recent_images_endpoint_empty_archive() {
    let fx = fixture();
    let json = get_json(fx.router, "/v1/recent-images").await;
    assert_eq!(json, serde_json::json!([]));
}

#[tokio::test]
async fn test_recent_images_script_endpoint() {
    let fx = fixture();
    let (status, content_type, body) = get(fx.router, "/v1/recent-images.js").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("application/javascript"));
    let script = String::from_utf8(body).unwrap();
    assert!(script.starts_with("function getImages(maxImages)"));
    assert!(script.contains("return image_list;"));
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let fx = fixture();
    let (status, _, _) = get(fx.router, "/v1/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
