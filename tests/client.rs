//! End-to-end tests of authentication and the transport layer against a
//! local mock server.

use apivideo::{Client, Error};
use serde_json::json;
use wiremock::matchers::{bearer_token, body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> Client {
    Client::builder("test-api-key")
        .base_url(server.uri())
        .build()
        .expect("client")
}

async fn mount_auth(server: &MockServer, expires_in: u64, expected_exchanges: u64) {
    Mock::given(method("POST"))
        .and(path("/auth/api-key"))
        .and(body_json(json!({"apiKey": "test-api-key"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "token-abc",
            "token_type": "Bearer",
            "refresh_token": "refresh-xyz",
            "expires_in": expires_in,
        })))
        .expect(expected_exchanges)
        .mount(server)
        .await;
}

#[tokio::test]
async fn fresh_token_is_reused_across_requests() {
    let server = MockServer::start().await;
    mount_auth(&server, 3600, 1).await;

    Mock::given(method("GET"))
        .and(path("/account"))
        .and(bearer_token("token-abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "quota": {"quotaUsed": 1, "quotaRemaining": 39, "quotaTotal": 40},
        })))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.account().get().await.expect("first call");
    client.account().get().await.expect("second call");
}

#[tokio::test]
async fn expired_token_triggers_a_new_exchange() {
    let server = MockServer::start().await;
    // expires_in of zero means the token is already stale by the second call.
    mount_auth(&server, 0, 2).await;

    Mock::given(method("GET"))
        .and(path("/account"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.account().get().await.expect("first call");
    client.account().get().await.expect("second call");
}

#[tokio::test]
async fn rejected_api_key_surfaces_as_auth_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/api-key"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "type": "https://docs.api.video/problems/unauthorized",
            "title": "Authentication required.",
        })))
        .mount(&server)
        .await;
    // The target endpoint must never be reached without a token.
    Mock::given(method("GET"))
        .and(path("/account"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.account().get().await.expect_err("rejected key");
    assert!(matches!(err, Error::Auth(_)));
    assert_eq!(err.status(), Some(401));
}

#[tokio::test]
async fn json_error_body_is_decoded_into_api_error() {
    let server = MockServer::start().await;
    mount_auth(&server, 3600, 1).await;

    Mock::given(method("GET"))
        .and(path("/videos/vi_does_not_exist"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "type": "https://docs.api.video/problems/video.not_found",
            "title": "The requested video was not found.",
            "name": "videoId",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .videos()
        .get("vi_does_not_exist")
        .await
        .expect_err("missing video");
    match err {
        Error::Api { status, title, name, .. } => {
            assert_eq!(status, 404);
            assert_eq!(title.as_deref(), Some("The requested video was not found."));
            assert_eq!(name.as_deref(), Some("videoId"));
        }
        other => panic!("expected Error::Api, got {other:?}"),
    }
}

#[tokio::test]
async fn non_json_error_body_is_kept_verbatim() {
    let server = MockServer::start().await;
    mount_auth(&server, 3600, 1).await;

    Mock::given(method("GET"))
        .and(path("/account"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.account().get().await.expect_err("server error");
    match err {
        Error::Api { status, title, .. } => {
            assert_eq!(status, 500);
            assert_eq!(title.as_deref(), Some("internal error"));
        }
        other => panic!("expected Error::Api, got {other:?}"),
    }
}

#[tokio::test]
async fn delete_discards_response_body() {
    let server = MockServer::start().await;
    mount_auth(&server, 3600, 1).await;

    Mock::given(method("DELETE"))
        .and(path("/videos/vi4k0jvEUuaTdRAEjQ4Jfrgz"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client
        .videos()
        .delete("vi4k0jvEUuaTdRAEjQ4Jfrgz")
        .await
        .expect("delete");
}

#[tokio::test]
async fn invalid_id_fails_before_any_request() {
    let server = MockServer::start().await;

    let client = client_for(&server);
    let err = client
        .videos()
        .get("not-a-video-id")
        .await
        .expect_err("invalid id");
    assert!(matches!(err, Error::InvalidRequest(_)));

    // Neither the auth endpoint nor the resource endpoint was touched.
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn list_options_become_query_parameters() {
    let server = MockServer::start().await;
    mount_auth(&server, 3600, 1).await;

    Mock::given(method("GET"))
        .and(path("/videos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [],
            "pagination": {"currentPage": 2, "pageSize": 5},
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let options = apivideo::videos::VideoListOptions {
        current_page: Some(2),
        page_size: Some(5),
        tags: vec!["demo".into()],
        ..Default::default()
    };
    let list = client.videos().list(&options).await.expect("list");
    assert!(list.data.is_empty());

    let requests = server.received_requests().await.unwrap();
    let listing = requests
        .iter()
        .find(|r| r.url.path() == "/videos")
        .expect("list request recorded");
    let query = listing.url.query().unwrap_or_default();
    assert!(query.contains("currentPage=2"), "query was {query:?}");
    assert!(query.contains("pageSize=5"), "query was {query:?}");
    assert!(query.contains("tags%5B%5D=demo"), "query was {query:?}");
}

#[tokio::test]
async fn concurrent_calls_share_one_exchange() {
    let server = MockServer::start().await;
    mount_auth(&server, 3600, 1).await;

    Mock::given(method("GET"))
        .and(path("/account"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(4)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let calls = (0..4).map(|_| {
        let client = client.clone();
        tokio::spawn(async move { client.account().get().await })
    });
    for handle in calls {
        handle.await.unwrap().expect("call");
    }
}
