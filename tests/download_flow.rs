//! Integration tests for file downloads, from single transfers up to the
//! full extract-then-download flow against a mocked Instagram and CDN.

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use instagrab::app::Downloader;
use instagrab::core::error::AppError;
use instagrab::download::{FileDownloader, Quality};
use instagrab::extract::Endpoints;

/// Shortcode and media id of the same post, per the shortcode codec.
const SHORTCODE: &str = "CJvQ2ph5iD1";
const MEDIA_ID: u64 = 2481276043892498677;

fn downloader_for(mock_server: &MockServer) -> Downloader {
    Downloader::with_endpoints(
        Endpoints {
            web_base: mock_server.uri(),
            api_base: mock_server.uri(),
        },
        false,
    )
    .expect("downloader should build")
}

#[tokio::test]
async fn test_download_file_writes_body_to_disk() {
    let mock_server = MockServer::start().await;
    // Large enough to span several stream chunks.
    let body = vec![7u8; 64 * 1024];
    Mock::given(method("GET"))
        .and(path("/media/video.mp4"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body.clone()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().expect("tempdir");
    let target = dir.path().join("clip.mp4");
    let files = FileDownloader::new().expect("file downloader");

    files
        .download_file(&format!("{}/media/video.mp4", mock_server.uri()), &target, false)
        .await
        .expect("download should succeed");

    let written = std::fs::read(&target).expect("file should exist");
    assert_eq!(written, body);
}

#[tokio::test]
async fn test_download_file_unexpected_status_is_terminal() {
    let mock_server = MockServer::start().await;
    // Exactly one hit: a 410 is not a transient failure, so no retry.
    Mock::given(method("GET"))
        .and(path("/media/gone.mp4"))
        .respond_with(ResponseTemplate::new(410))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().expect("tempdir");
    let target = dir.path().join("gone.mp4");
    let files = FileDownloader::new().expect("file downloader");

    let err = files
        .download_file(&format!("{}/media/gone.mp4", mock_server.uri()), &target, false)
        .await
        .expect_err("download should fail");

    match err {
        AppError::Download(msg) => assert_eq!(msg, "Unexpected error: HTTP 410: Gone"),
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(!target.exists());
}

#[tokio::test]
async fn test_carousel_images_written_with_indexed_names() {
    let mock_server = MockServer::start().await;
    let mut downloader = downloader_for(&mock_server);

    Mock::given(method("GET"))
        .and(path(format!("/p/{}/", SHORTCODE)))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .mount(&mock_server)
        .await;

    let first_url = format!("{}/cdn/one.jpg", mock_server.uri());
    let second_url = format!("{}/cdn/two.jpg", mock_server.uri());
    let payload = json!({
        "items": [{
            "pk": MEDIA_ID,
            "user": {"username": "traveler"},
            "caption": {"text": "Two cities"},
            "carousel_media": [
                {"image_versions2": {"candidates": [
                    {"url": first_url, "width": 1080, "height": 1080}
                ]}},
                {"image_versions2": {"candidates": [
                    {"url": second_url, "width": 1080, "height": 1350}
                ]}}
            ]
        }]
    });
    Mock::given(method("GET"))
        .and(path(format!("/api/v1/media/{}/info/", MEDIA_ID)))
        .respond_with(ResponseTemplate::new(200).set_body_json(payload))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/cdn/one.jpg"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"first frame".to_vec()))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/cdn/two.jpg"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"second frame".to_vec()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().expect("tempdir");
    let files = downloader
        .download(
            &format!("https://www.instagram.com/p/{}/", SHORTCODE),
            Some(dir.path()),
            Quality::Best,
        )
        .await
        .expect("carousel download should succeed");

    assert_eq!(files.len(), 2);
    assert_eq!(files[0], dir.path().join("Two_cities_CJvQ2ph5iD1_01.jpg"));
    assert_eq!(files[1], dir.path().join("Two_cities_CJvQ2ph5iD1_02.jpg"));
    assert_eq!(std::fs::read(&files[0]).expect("first file"), b"first frame");
    assert_eq!(std::fs::read(&files[1]).expect("second file"), b"second frame");
}

#[tokio::test]
async fn test_worst_quality_picks_the_smallest_rendition() {
    let mock_server = MockServer::start().await;
    let mut downloader = downloader_for(&mock_server);

    Mock::given(method("GET"))
        .and(path(format!("/p/{}/", SHORTCODE)))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .mount(&mock_server)
        .await;

    let best_url = format!("{}/cdn/best.mp4", mock_server.uri());
    let worst_url = format!("{}/cdn/worst.mp4", mock_server.uri());
    let payload = json!({
        "items": [{
            "pk": MEDIA_ID,
            "user": {"username": "creator"},
            "caption": {"text": "Clip"},
            "video_versions": [
                {"url": best_url, "width": 720, "height": 1280},
                {"url": worst_url, "width": 480, "height": 854}
            ],
            "image_versions2": {"candidates": [
                {"url": "https://cdn.test/cover.jpg", "width": 720, "height": 1280}
            ]}
        }]
    });
    Mock::given(method("GET"))
        .and(path(format!("/api/v1/media/{}/info/", MEDIA_ID)))
        .respond_with(ResponseTemplate::new(200).set_body_json(payload))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/cdn/best.mp4"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"best rendition".to_vec()))
        .expect(0)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/cdn/worst.mp4"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"worst rendition".to_vec()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().expect("tempdir");
    let target = dir.path().join("my_clip.mp4");
    let files = downloader
        .download(
            &format!("https://www.instagram.com/reel/{}/", SHORTCODE),
            Some(&target),
            Quality::Worst,
        )
        .await
        .expect("video download should succeed");

    assert_eq!(files, vec![target.clone()]);
    assert_eq!(std::fs::read(&target).expect("video file"), b"worst rendition");
}

#[tokio::test]
async fn test_profile_picture_downloads_to_single_file() {
    let mock_server = MockServer::start().await;
    let mut downloader = downloader_for(&mock_server);

    let html = format!(
        r#"{{"profile_pic_url_hd":"{}/cdn/avatar.jpg"}}"#,
        mock_server.uri()
    );
    Mock::given(method("GET"))
        .and(path("/snapshooter/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(html))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/cdn/avatar.jpg"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"avatar bytes".to_vec()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().expect("tempdir");
    let files = downloader
        .download(
            "https://www.instagram.com/snapshooter/",
            Some(dir.path()),
            Quality::Best,
        )
        .await
        .expect("profile picture download should succeed");

    assert_eq!(files.len(), 1);
    assert_eq!(
        files[0],
        dir.path().join("snapshooter's_profile_picture_snapshooter.jpg")
    );
    assert_eq!(std::fs::read(&files[0]).expect("picture file"), b"avatar bytes");
}
