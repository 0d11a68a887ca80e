// Tests for sitemap loading and title enrichment

use interlink_core::fetch::{TitleFetchOptions, enrich_titles, load_sitemap};
use interlink_core::{InterlinkError, UrlRecord};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn html(title: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(
        format!("<html><head><title>{}</title></head><body></body></html>", title),
        "text/html; charset=utf-8",
    )
}

fn options(max_samples: usize) -> TitleFetchOptions {
    TitleFetchOptions {
        workers: 2,
        timeout_secs: 5,
        max_samples,
        show_progress_bars: false,
    }
}

// ============================================================================
// Sitemaps
// ============================================================================

#[tokio::test]
async fn test_load_sitemap_records() {
    let server = MockServer::start().await;
    let xml = format!(
        "<urlset><url><loc>{0}/ca</loc></url><url><loc>{0}/ca/fresno</loc></url><url><loc>{0}/ca</loc></url></urlset>",
        server.uri()
    );
    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(xml, "application/xml"))
        .mount(&server)
        .await;

    let records = load_sitemap(&format!("{}/sitemap.xml", server.uri()), 5)
        .await
        .unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[1].components.segments, vec!["ca", "fresno"]);
}

#[tokio::test]
async fn test_load_sitemap_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw("<html><body>oops</body></html>", "text/html"),
        )
        .mount(&server)
        .await;

    let result = load_sitemap(&format!("{}/sitemap.xml", server.uri()), 5).await;
    assert!(matches!(result, Err(InterlinkError::MalformedSitemap(_))));
}

#[tokio::test]
async fn test_load_sitemap_http_failure_halts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let result = load_sitemap(&format!("{}/sitemap.xml", server.uri()), 5).await;
    assert!(matches!(result, Err(InterlinkError::Scan(_))));
}

// ============================================================================
// Titles
// ============================================================================

#[tokio::test]
async fn test_enrich_titles_fills_missing_titles() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/a"))
        .respond_with(html("Alpha | Site"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/b"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let mut records = vec![
        UrlRecord::new(format!("{}/a", server.uri())),
        UrlRecord::new(format!("{}/b", server.uri())),
        UrlRecord::new(format!("{}/c", server.uri())).with_title("Kept"),
    ];

    let titled = enrich_titles(&mut records, options(10), None).await.unwrap();

    assert_eq!(titled, 1);
    assert_eq!(records[0].title.as_deref(), Some("Alpha | Site"));
    assert_eq!(records[0].status_code, Some(200));
    assert_eq!(records[1].title, None);
    assert_eq!(records[1].status_code, Some(404));
    assert_eq!(records[2].title.as_deref(), Some("Kept"));
}

#[tokio::test]
async fn test_enrich_titles_respects_sample_limit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(html("Page"))
        .mount(&server)
        .await;

    let mut records: Vec<UrlRecord> = (0..5)
        .map(|i| UrlRecord::new(format!("{}/p{}", server.uri(), i)))
        .collect();

    let calls = Arc::new(AtomicUsize::new(0));
    let calls_clone = calls.clone();
    let callback = Arc::new(move |_msg: String| {
        calls_clone.fetch_add(1, Ordering::SeqCst);
    });

    let titled = enrich_titles(&mut records, options(3), Some(callback)).await.unwrap();

    assert_eq!(titled, 3);
    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert!(records[..3].iter().all(|r| r.title.as_deref() == Some("Page")));
    assert!(records[3..].iter().all(|r| r.title.is_none()));
}

#[tokio::test]
async fn test_enrich_titles_unreachable_host_degrades() {
    let mut records = vec![UrlRecord::new("http://127.0.0.1:1/nothing")];
    let titled = enrich_titles(&mut records, options(10), None).await.unwrap();
    assert_eq!(titled, 0);
    assert_eq!(records[0].title, None);
}
