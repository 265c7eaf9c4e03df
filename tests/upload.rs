//! End-to-end tests of file uploads, chunked and single-shot, against a
//! local mock server.

use std::io::Write;

use apivideo::Client;
use serde_json::json;
use tempfile::NamedTempFile;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MIB: usize = 1024 * 1024;

fn client_for(server: &MockServer, chunk_size: u64) -> Client {
    Client::builder("test-api-key")
        .base_url(server.uri())
        .chunk_size(chunk_size)
        .build()
        .expect("client")
}

async fn mount_auth(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/auth/api-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "token-abc",
            "token_type": "Bearer",
            "refresh_token": "refresh-xyz",
            "expires_in": 3600,
        })))
        .mount(server)
        .await;
}

fn temp_file_of(len: usize) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(&vec![0xAB; len]).expect("fill temp file");
    file
}

#[tokio::test]
async fn large_file_goes_out_as_ranged_chunks() {
    let server = MockServer::start().await;
    mount_auth(&server).await;

    Mock::given(method("POST"))
        .and(path("/videos/vi4k0jvEUuaTdRAEjQ4Jfrgz/source"))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({"videoId": "vi4k0jvEUuaTdRAEjQ4Jfrgz"})),
        )
        .expect(4)
        .mount(&server)
        .await;

    let file = temp_file_of(8 * MIB);
    let client = client_for(&server, 2 * MIB as u64);
    client
        .videos()
        .upload("vi4k0jvEUuaTdRAEjQ4Jfrgz", file.path())
        .await
        .expect("chunked upload");

    let requests = server.received_requests().await.unwrap();
    let ranges: Vec<_> = requests
        .iter()
        .filter(|r| r.url.path().ends_with("/source"))
        .map(|r| {
            r.headers
                .get("content-range")
                .expect("every chunk carries a range")
                .to_str()
                .unwrap()
                .to_owned()
        })
        .collect();
    assert_eq!(
        ranges,
        [
            "bytes 0-2097151/8388608",
            "bytes 2097152-4194303/8388608",
            "bytes 4194304-6291455/8388608",
            "bytes 6291456-8388607/8388608",
        ]
    );
}

#[tokio::test]
async fn final_chunk_response_is_returned() {
    let server = MockServer::start().await;
    mount_auth(&server).await;

    // The last range gets a distinct body; the caller must see that one.
    Mock::given(method("POST"))
        .and(path("/videos/vi4k0jvEUuaTdRAEjQ4Jfrgz/source"))
        .and(header("content-range", "bytes 2097152-4194303/4194304"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "videoId": "vi4k0jvEUuaTdRAEjQ4Jfrgz",
            "title": "fully ingested",
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/videos/vi4k0jvEUuaTdRAEjQ4Jfrgz/source"))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({"videoId": "vi4k0jvEUuaTdRAEjQ4Jfrgz"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let file = temp_file_of(4 * MIB);
    let client = client_for(&server, 2 * MIB as u64);
    let video = client
        .videos()
        .upload("vi4k0jvEUuaTdRAEjQ4Jfrgz", file.path())
        .await
        .expect("chunked upload");
    assert_eq!(video.title.as_deref(), Some("fully ingested"));
}

#[tokio::test]
async fn zero_chunk_size_sends_one_request_without_range() {
    let server = MockServer::start().await;
    mount_auth(&server).await;

    Mock::given(method("POST"))
        .and(path("/videos/vi4k0jvEUuaTdRAEjQ4Jfrgz/source"))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({"videoId": "vi4k0jvEUuaTdRAEjQ4Jfrgz"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let file = temp_file_of(8 * MIB);
    let client = client_for(&server, 0);
    client
        .videos()
        .upload("vi4k0jvEUuaTdRAEjQ4Jfrgz", file.path())
        .await
        .expect("single-shot upload");

    let requests = server.received_requests().await.unwrap();
    let upload = requests
        .iter()
        .find(|r| r.url.path().ends_with("/source"))
        .expect("upload request recorded");
    assert!(upload.headers.get("content-range").is_none());
}

#[tokio::test]
async fn small_file_is_single_shot_even_with_chunking_enabled() {
    let server = MockServer::start().await;
    mount_auth(&server).await;

    Mock::given(method("POST"))
        .and(path("/videos/vi4k0jvEUuaTdRAEjQ4Jfrgz/source"))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({"videoId": "vi4k0jvEUuaTdRAEjQ4Jfrgz"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let file = temp_file_of(MIB);
    let client = client_for(&server, 2 * MIB as u64);
    client
        .videos()
        .upload("vi4k0jvEUuaTdRAEjQ4Jfrgz", file.path())
        .await
        .expect("single-shot upload");

    let requests = server.received_requests().await.unwrap();
    let upload = requests
        .iter()
        .find(|r| r.url.path().ends_with("/source"))
        .expect("upload request recorded");
    assert!(upload.headers.get("content-range").is_none());
}

#[tokio::test]
async fn failing_chunk_aborts_the_upload() {
    let server = MockServer::start().await;
    mount_auth(&server).await;

    Mock::given(method("POST"))
        .and(path("/videos/vi4k0jvEUuaTdRAEjQ4Jfrgz/source"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "type": "https://docs.api.video/problems/payload.invalid",
            "title": "The request payload is invalid.",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let file = temp_file_of(8 * MIB);
    let client = client_for(&server, 2 * MIB as u64);
    let err = client
        .videos()
        .upload("vi4k0jvEUuaTdRAEjQ4Jfrgz", file.path())
        .await
        .expect_err("first chunk fails");
    assert_eq!(err.status(), Some(400));

    // No later chunk was attempted after the failure.
    let uploads = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|r| r.url.path().ends_with("/source"))
        .count();
    assert_eq!(uploads, 1);
}

#[tokio::test]
async fn player_logo_upload_carries_link_field() {
    let server = MockServer::start().await;
    mount_auth(&server).await;

    Mock::given(method("POST"))
        .and(path("/players/pl45KFKdlddgk8fYXkfvu5DR1hk3/logo"))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({"playerId": "pl45KFKdlddgk8fYXkfvu5DR1hk3"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(b"\x89PNG fake logo bytes").expect("fill temp file");

    let client = client_for(&server, 0);
    client
        .players()
        .upload_logo(
            "pl45KFKdlddgk8fYXkfvu5DR1hk3",
            "https://example.org",
            file.path(),
        )
        .await
        .expect("logo upload");

    let requests = server.received_requests().await.unwrap();
    let upload = requests
        .iter()
        .find(|r| r.url.path().ends_with("/logo"))
        .expect("logo request recorded");
    let body = String::from_utf8_lossy(&upload.body);
    assert!(body.contains("name=\"link\""), "multipart body was {body:?}");
    assert!(body.contains("https://example.org"));
    assert!(body.contains("name=\"file\""));
}
