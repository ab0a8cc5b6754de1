use popscope::fetcher::{Charset, FetchError, fetch};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

const POP_PAGE: &str = "<html><head><title>Base Set Pop Report</title></head>\
<body><div class='card-entry'>Charizard 4/102 PSA 10 1,234 Total Population 2,500</div></body></html>";

#[tokio::test]
async fn fetch_success_decodes_utf8_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/pop/baseset"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(POP_PAGE.as_bytes(), "text/html; charset=utf-8"),
        )
        .mount(&mock_server)
        .await;

    let url = format!("{}/pop/baseset", mock_server.uri());
    let page = fetch(&url).await.unwrap();

    assert!(page.status.is_success());
    assert!(page.body_utf8.contains("Charizard 4/102"));
    assert_eq!(page.charset, Charset::Utf8);
    assert_eq!(page.url_final.as_str(), url);
}

#[tokio::test]
async fn fetch_decodes_legacy_charset_from_meta() {
    let mock_server = MockServer::start().await;

    let body: Vec<u8> = b"<html><head><meta charset=\"windows-1252\"></head>\
<body>Pok\xE9mon 4/102</body></html>"
        .to_vec();

    Mock::given(method("GET"))
        .and(path("/legacy"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(body)
                .insert_header("Content-Type", "text/html"),
        )
        .mount(&mock_server)
        .await;

    let url = format!("{}/legacy", mock_server.uri());
    let page = fetch(&url).await.unwrap();

    assert_eq!(page.charset, Charset::Windows1252);
    assert!(page.body_utf8.contains("Pokémon 4/102"));
}

#[tokio::test]
async fn fetch_404_is_not_retriable() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/pop/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let url = format!("{}/pop/missing", mock_server.uri());
    match fetch(&url).await {
        Err(FetchError::Http { status, retriable }) => {
            assert_eq!(status.as_u16(), 404);
            assert!(!retriable);
        }
        other => panic!("expected HTTP 404 error, got {other:?}"),
    }
}

#[tokio::test]
async fn fetch_500_is_retriable() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/pop/flaky"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let url = format!("{}/pop/flaky", mock_server.uri());
    match fetch(&url).await {
        Err(FetchError::Http { status, retriable }) => {
            assert_eq!(status.as_u16(), 500);
            assert!(retriable);
        }
        other => panic!("expected HTTP 500 error, got {other:?}"),
    }
}

#[tokio::test]
async fn fetch_follows_redirects() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/pop/old-slug"))
        .respond_with(ResponseTemplate::new(302).insert_header("location", "/pop/baseset"))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/pop/baseset"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(POP_PAGE.as_bytes(), "text/html"),
        )
        .mount(&mock_server)
        .await;

    let url = format!("{}/pop/old-slug", mock_server.uri());
    let page = fetch(&url).await.unwrap();

    assert!(page.body_utf8.contains("Charizard"));
    assert!(page.url_final.as_str().ends_with("/pop/baseset"));
}

#[tokio::test]
async fn fetch_decompresses_gzip_bodies() {
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::io::Write;

    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(POP_PAGE.as_bytes()).unwrap();
    let compressed = encoder.finish().unwrap();

    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/pop/gzipped"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(compressed)
                .insert_header("Content-Type", "text/html; charset=utf-8")
                .insert_header("Content-Encoding", "gzip"),
        )
        .mount(&mock_server)
        .await;

    let url = format!("{}/pop/gzipped", mock_server.uri());
    let page = fetch(&url).await.unwrap();

    assert!(page.body_utf8.contains("Total Population 2,500"));
}

#[tokio::test]
async fn fetch_rejects_non_html_content() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/card.jpg"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(vec![0xFF, 0xD8, 0xFF])
                .insert_header("Content-Type", "image/jpeg"),
        )
        .mount(&mock_server)
        .await;

    let url = format!("{}/card.jpg", mock_server.uri());
    match fetch(&url).await {
        Err(FetchError::UnsupportedContentType(content_type)) => {
            assert_eq!(content_type, "image/jpeg");
        }
        other => panic!("expected UnsupportedContentType, got {other:?}"),
    }
}

#[tokio::test]
async fn fetch_rejects_oversized_bodies() {
    let mock_server = MockServer::start().await;

    let large_body = "x".repeat(6 * 1024 * 1024);
    Mock::given(method("GET"))
        .and(path("/pop/huge"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(large_body)
                .insert_header("Content-Type", "text/html"),
        )
        .mount(&mock_server)
        .await;

    let url = format!("{}/pop/huge", mock_server.uri());
    match fetch(&url).await {
        Err(FetchError::BodyTooLarge(size)) => assert_eq!(size, 6 * 1024 * 1024),
        other => panic!("expected BodyTooLarge, got {other:?}"),
    }
}

#[tokio::test]
async fn fetch_rejects_invalid_urls() {
    match fetch("not-a-valid-url").await {
        Err(FetchError::InvalidUrl(_)) => {}
        other => panic!("expected InvalidUrl, got {other:?}"),
    }
}

#[test]
fn retry_classification() {
    assert!(!FetchError::InvalidUrl(url::ParseError::EmptyHost).should_retry());
    assert!(!FetchError::BodyTooLarge(1000).should_retry());
    assert!(!FetchError::UnsupportedContentType("image/png".to_string()).should_retry());
    assert!(!FetchError::Charset("bad encoding".to_string()).should_retry());

    assert!(FetchError::Dns("dns failure".to_string()).should_retry());
    assert!(FetchError::ConnectTimeout.should_retry());
    assert!(FetchError::RequestTimeout.should_retry());
    assert!(FetchError::Render("browser crashed".to_string()).should_retry());

    assert!(
        !FetchError::Http {
            status: reqwest::StatusCode::NOT_FOUND,
            retriable: false
        }
        .should_retry()
    );
    assert!(
        FetchError::Http {
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            retriable: true
        }
        .should_retry()
    );
}
