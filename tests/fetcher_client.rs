use std::time::Duration;

use reviewscope::fetcher::{FetchError, FetchSettings, Fetcher};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header_exists, method, path},
};

fn fetcher() -> Fetcher {
    Fetcher::new(&FetchSettings::default()).unwrap()
}

#[tokio::test]
async fn test_fetch_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/product-reviews/B09G9FPHY6"))
        .and(header_exists("user-agent"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(
                    "<html><head><title>Reviews</title></head><body>Hello World</body></html>"
                        .as_bytes(),
                )
                .insert_header("Content-Type", "text/html; charset=utf-8"),
        )
        .mount(&mock_server)
        .await;

    let url = format!("{}/product-reviews/B09G9FPHY6", mock_server.uri());
    let page = fetcher().fetch(&url).await.unwrap();

    assert!(page.status.is_success());
    assert!(page.body_utf8.contains("Hello World"));
    assert_eq!(page.url_final.as_str(), url);
    assert_eq!(page.encoding, encoding_rs::UTF_8);
}

#[tokio::test]
async fn test_fetch_decodes_legacy_charset() {
    let mock_server = MockServer::start().await;

    // "Très bien" in windows-1252
    let body = b"<html><body>Tr\xe8s bien</body></html>".to_vec();
    Mock::given(method("GET"))
        .and(path("/fr"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(body)
                .insert_header("Content-Type", "text/html; charset=windows-1252"),
        )
        .mount(&mock_server)
        .await;

    let page = fetcher()
        .fetch(&format!("{}/fr", mock_server.uri()))
        .await
        .unwrap();
    assert!(page.body_utf8.contains("Très bien"));
}

#[tokio::test]
async fn test_fetch_404_not_retriable() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/notfound"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let result = fetcher()
        .fetch(&format!("{}/notfound", mock_server.uri()))
        .await;

    match result {
        Err(FetchError::Http { status }) => {
            assert_eq!(status.as_u16(), 404);
            assert!(!FetchError::Http { status }.is_retriable());
        }
        other => panic!("Expected HTTP 404 error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_503_retriable() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/busy"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let result = fetcher().fetch(&format!("{}/busy", mock_server.uri())).await;

    match result {
        Err(FetchError::Http { status }) => {
            assert_eq!(status.as_u16(), 503);
            assert!(FetchError::Http { status }.is_retriable());
        }
        other => panic!("Expected HTTP 503 error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_follows_redirect() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/dp/B09G9FPHY6"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", "/final"))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/final"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes("<html><body>Final page</body></html>".as_bytes())
                .insert_header("Content-Type", "text/html"),
        )
        .mount(&mock_server)
        .await;

    let page = fetcher()
        .fetch(&format!("{}/dp/B09G9FPHY6", mock_server.uri()))
        .await
        .unwrap();

    assert!(page.body_utf8.contains("Final page"));
    assert!(page.url_final.as_str().ends_with("/final"));
}

#[tokio::test]
async fn test_fetch_unsupported_content_type() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/image"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(vec![0xFF, 0xD8, 0xFF])
                .insert_header("Content-Type", "image/jpeg"),
        )
        .mount(&mock_server)
        .await;

    let result = fetcher().fetch(&format!("{}/image", mock_server.uri())).await;

    match result {
        Err(FetchError::UnsupportedContentType(content_type)) => {
            assert_eq!(content_type, "image/jpeg");
        }
        other => panic!("Expected UnsupportedContentType error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_body_too_large() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/large"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes("x".repeat(4096).into_bytes())
                .insert_header("Content-Type", "text/html"),
        )
        .mount(&mock_server)
        .await;

    let settings = FetchSettings {
        max_body_bytes: 1024,
        ..FetchSettings::default()
    };
    let result = Fetcher::new(&settings)
        .unwrap()
        .fetch(&format!("{}/large", mock_server.uri()))
        .await;

    match result {
        Err(FetchError::BodyTooLarge(limit)) => assert_eq!(limit, 1024),
        other => panic!("Expected BodyTooLarge error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_secs(2))
                .insert_header("Content-Type", "text/html"),
        )
        .mount(&mock_server)
        .await;

    let settings = FetchSettings {
        timeout: Duration::from_millis(200),
        ..FetchSettings::default()
    };
    let result = Fetcher::new(&settings)
        .unwrap()
        .fetch(&format!("{}/slow", mock_server.uri()))
        .await;

    match result {
        Err(FetchError::Timeout) => {}
        other => panic!("Expected Timeout error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_invalid_url() {
    match fetcher().fetch("not-a-valid-url").await {
        Err(FetchError::InvalidUrl(_)) => {}
        other => panic!("Expected InvalidUrl error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_rejects_non_http_scheme() {
    match fetcher().fetch("file:///etc/passwd").await {
        Err(FetchError::UnsupportedScheme(scheme)) => assert_eq!(scheme, "file"),
        other => panic!("Expected UnsupportedScheme error, got {:?}", other),
    }
}
