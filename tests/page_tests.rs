//! Release page publishing against a mock documentation service.

use mockito::Matcher;
use release_bookkeeper::confluence::{PagePublisher, PageRequest, ReleaseLink, render_release_page};
use release_bookkeeper::{Credentials, PageConfig, ReleaseError, RetryPolicy};
use serde_json::json;
use std::time::Duration;

fn publisher(api_url: &str) -> PagePublisher {
    let config = PageConfig::new(
        api_url,
        "https://wiki.example.com/wiki",
        Credentials::new("user", "token"),
        "rest/api/space",
        "rest/api/content",
    )
    .expect("valid page config");
    PagePublisher::new(config, RetryPolicy::new(1, Duration::from_millis(1)))
        .expect("client should build")
}

fn page_request() -> PageRequest {
    PageRequest {
        space_key: "REL".to_string(),
        title: "Release 24.07.27.07".to_string(),
    }
}

#[tokio::test]
async fn test_publish_creates_page_in_space() {
    let mut server = mockito::Server::new_async().await;
    let space = server
        .mock("GET", "/rest/api/space/REL")
        .with_status(200)
        .with_body(r#"{"id":98304,"key":"REL","name":"Releases"}"#)
        .expect(1)
        .create_async()
        .await;
    let create = server
        .mock("POST", "/rest/api/content")
        .match_header("authorization", "Basic dXNlcjp0b2tlbg==")
        .match_body(Matcher::PartialJson(json!({
            "type": "page",
            "title": "Release 24.07.27.07",
            "space": {"key": "REL"},
            "spaceId": "98304",
            "body": {"storage": {"representation": "storage"}}
        })))
        .with_status(200)
        .with_body(r#"{"id":"123456","title":"Release 24.07.27.07"}"#)
        .expect(1)
        .create_async()
        .await;

    let body = render_release_page(
        "Release 24.07.27.07",
        &[ReleaseLink::named("A-R24.07.27.07")],
        &[],
    )
    .unwrap();
    let page = publisher(&server.url())
        .publish(&page_request(), body)
        .await
        .unwrap();

    assert_eq!(page.id, "123456");
    assert_eq!(page.space_name, "Releases");
    assert_eq!(
        page.url,
        "https://wiki.example.com/wiki/spaces/REL/pages/123456"
    );
    space.assert_async().await;
    create.assert_async().await;
}

#[tokio::test]
async fn test_missing_space_fails_without_creating_page() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/rest/api/space/REL")
        .with_status(404)
        .create_async()
        .await;
    let never_create = server
        .mock("POST", "/rest/api/content")
        .expect(0)
        .create_async()
        .await;

    let error = publisher(&server.url())
        .publish(&page_request(), "<p/>".to_string())
        .await
        .unwrap_err();

    assert!(matches!(
        &error,
        ReleaseError::PagePublish { space_key, source, .. }
            if space_key == "REL" && source.status() == Some(404)
    ));
    never_create.assert_async().await;
}

#[tokio::test]
async fn test_duplicate_title_surfaces_status() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/rest/api/space/REL")
        .with_status(200)
        .with_body(r#"{"id":"1","name":"Releases"}"#)
        .create_async()
        .await;
    server
        .mock("POST", "/rest/api/content")
        .with_status(400)
        .with_body(r#"{"statusCode":400,"message":"A page with this title already exists"}"#)
        .create_async()
        .await;

    let error = publisher(&server.url())
        .publish(&page_request(), "<p/>".to_string())
        .await
        .unwrap_err();

    match error {
        ReleaseError::PagePublish { source, .. } => {
            assert_eq!(source.status(), Some(400));
            assert_eq!(
                source.body().and_then(|b| b["message"].as_str()),
                Some("A page with this title already exists")
            );
        }
        other => panic!("expected page publish failure, got {other:?}"),
    }
}
