use crate::error::Result;
use crate::result::PageMetadata;
use crate::DEFAULT_USER_AGENT;
use reqwest::Client;
use scraper::{Html, Selector};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

/// Called after every finished request with (completed count, url).
pub type ProgressCallback = Arc<dyn Fn(usize, String) + Send + Sync>;

/// Fetches page `<title>`s with a bounded pool of concurrent requests.
///
/// Every request is best-effort: a network error, a timeout or a non-HTML response
/// yields a [`PageMetadata`] without a title, never an error for the batch.
pub struct TitleFetcher {
    client: Client,
    workers: usize,
    progress_callback: Option<ProgressCallback>,
}

impl TitleFetcher {
    pub fn new() -> Result<Self> {
        Self::with_timeout(10)
    }

    pub fn with_timeout(timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .user_agent(DEFAULT_USER_AGENT)
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.div_ceil(2)))
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;

        Ok(Self {
            client,
            workers: 5,
            progress_callback: None,
        })
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Fetch metadata for every URL. Output order matches input order.
    pub async fn fetch_all(&self, urls: Vec<String>) -> Result<Vec<PageMetadata>> {
        info!("Fetching titles for {} URLs with {} workers", urls.len(), self.workers);

        let semaphore = Arc::new(Semaphore::new(self.workers));
        let completed = Arc::new(AtomicUsize::new(0));
        let mut handles = Vec::with_capacity(urls.len());

        for url in urls {
            let client = self.client.clone();
            let semaphore = semaphore.clone();
            let completed = completed.clone();
            let progress_cb = self.progress_callback.clone();

            handles.push(tokio::spawn(async move {
                let metadata = match semaphore.acquire_owned().await {
                    Ok(_permit) => Self::fetch_one(&client, &url).await,
                    Err(e) => PageMetadata::with_error(url.clone(), e.to_string()),
                };

                let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
                if let Some(ref callback) = progress_cb {
                    callback(done, url);
                }
                metadata
            }));
        }

        let mut results = Vec::with_capacity(handles.len());
        for outcome in futures::future::join_all(handles).await {
            results.push(outcome?);
        }

        let with_title = results.iter().filter(|m| m.title.is_some()).count();
        info!("Title fetch complete: {}/{} pages titled", with_title, results.len());
        Ok(results)
    }

    async fn fetch_one(client: &Client, url: &str) -> PageMetadata {
        debug!("Fetching {}", url);
        let start = Instant::now();

        let response = match client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("Title fetch failed for {}: {}", url, e);
                return PageMetadata::with_error(url.to_string(), e.to_string());
            }
        };

        let mut metadata = PageMetadata::new(url.to_string());
        metadata.status_code = Some(response.status().as_u16());
        metadata.content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        let is_html = metadata
            .content_type
            .as_ref()
            .map(|ct| ct.contains("html"))
            .unwrap_or(true);

        if response.status().is_success() && is_html {
            match response.text().await {
                Ok(body) => metadata.title = extract_title(&body),
                Err(e) => {
                    warn!("Could not read body of {}: {}", url, e);
                    metadata.error = Some(e.to_string());
                }
            }
        }

        metadata.response_time = start.elapsed();
        metadata
    }
}

/// Text of the first `<title>` element, whitespace-collapsed.
pub fn extract_title(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("title").ok()?;
    let raw: String = document.select(&selector).next()?.text().collect();
    let title = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if title.is_empty() { None } else { Some(title) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Mutex as StdMutex;
    use wiremock::{
        matchers::{method, path},
        Mock, MockServer, ResponseTemplate,
    };

    #[test]
    fn test_extract_title() {
        let html = "<html><head><title>\n  Blue Shirt |\n Example Store </title></head></html>";
        assert_eq!(
            extract_title(html),
            Some("Blue Shirt | Example Store".to_string())
        );
    }

    #[test]
    fn test_extract_title_missing() {
        assert_eq!(extract_title("<html><body>Hi</body></html>"), None);
        assert_eq!(extract_title("<title>   </title>"), None);
    }

    #[tokio::test]
    async fn test_fetch_all_preserves_order_and_degrades() {
        let mock_server = MockServer::start().await;

        for i in 1..=3 {
            Mock::given(method("GET"))
                .and(path(format!("/page{}", i)))
                .respond_with(
                    ResponseTemplate::new(200).set_body_raw(
                        format!("<html><head><title>Page {}</title></head></html>", i),
                        "text/html; charset=utf-8",
                    ),
                )
                .mount(&mock_server)
                .await;
        }
        Mock::given(method("GET"))
            .and(path("/gone"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/file.pdf"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "application/pdf")
                    .set_body_bytes(b"%PDF-1.4".to_vec()),
            )
            .mount(&mock_server)
            .await;

        let urls: Vec<String> = ["/page1", "/gone", "/page2", "/file.pdf", "/page3"]
            .iter()
            .map(|p| format!("{}{}", mock_server.uri(), p))
            .collect();

        let fetcher = TitleFetcher::with_timeout(5).unwrap().with_workers(2);
        let results = fetcher.fetch_all(urls.clone()).await.unwrap();

        assert_eq!(results.len(), 5);
        for (result, url) in results.iter().zip(&urls) {
            assert_eq!(&result.url, url);
        }
        assert_eq!(results[0].title.as_deref(), Some("Page 1"));
        assert_eq!(results[1].title, None);
        assert_eq!(results[1].status_code, Some(404));
        assert_eq!(results[2].title.as_deref(), Some("Page 2"));
        assert_eq!(results[3].title, None);
        assert_eq!(results[4].title.as_deref(), Some("Page 3"));
    }

    #[tokio::test]
    async fn test_unreachable_host_yields_error_not_failure() {
        let fetcher = TitleFetcher::with_timeout(2).unwrap();
        let results = fetcher
            .fetch_all(vec!["http://127.0.0.1:1/nothing".to_string()])
            .await
            .unwrap();
        assert_eq!(results.len(), 1);
        assert!(results[0].title.is_none());
        assert!(results[0].error.is_some());
    }

    #[tokio::test]
    async fn test_progress_callback_counts_every_url() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "text/html")
                    .set_body_string("<title>x</title>"),
            )
            .mount(&mock_server)
            .await;

        let seen: Arc<StdMutex<HashSet<usize>>> = Arc::new(StdMutex::new(HashSet::new()));
        let seen_clone = seen.clone();
        let fetcher = TitleFetcher::new()
            .unwrap()
            .with_workers(3)
            .with_progress_callback(Arc::new(move |done, _url| {
                seen_clone.lock().unwrap().insert(done);
            }));

        let urls = (0..6)
            .map(|i| format!("{}/p{}", mock_server.uri(), i))
            .collect();
        fetcher.fetch_all(urls).await.unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 6);
        assert!(seen.contains(&6));
    }
}
