use crate::error::{InterlinkError, Result};
use crate::ingest::records_from_urls;
use crate::record::UrlRecord;
use indicatif::{ProgressBar, ProgressStyle};
use interlink_scanner::{ScanError, SitemapFetcher, TitleFetcher};
use std::sync::Arc;
use tracing::info;

/// Options for the optional title enrichment step.
pub struct TitleFetchOptions {
    pub workers: usize,
    pub timeout_secs: u64,
    /// Only the first `max_samples` records are fetched.
    pub max_samples: usize,
    pub show_progress_bars: bool,
}

impl Default for TitleFetchOptions {
    fn default() -> Self {
        Self {
            workers: 5,
            timeout_secs: 10,
            max_samples: 100,
            show_progress_bars: false,
        }
    }
}

/// Callback for reporting fetch progress
pub type FetchProgressCallback = Arc<dyn Fn(String) + Send + Sync>;

/// Load a sitemap (or plain-text URL list) into records.
pub async fn load_sitemap(url: &str, timeout_secs: u64) -> Result<Vec<UrlRecord>> {
    let fetcher = SitemapFetcher::with_timeout(timeout_secs)?;
    let entries = fetcher.fetch(url).await.map_err(|e| match e {
        ScanError::ParseError(msg) => InterlinkError::MalformedSitemap(msg),
        other => InterlinkError::Scan(other),
    })?;
    records_from_urls(entries.into_iter().map(|entry| entry.loc))
}

/// Fill in titles for records that lack one. Returns how many records gained a title.
/// Per-page failures leave the title empty.
pub async fn enrich_titles(
    records: &mut [UrlRecord],
    options: TitleFetchOptions,
    progress_callback: Option<FetchProgressCallback>,
) -> Result<usize> {
    let TitleFetchOptions {
        workers,
        timeout_secs,
        max_samples,
        show_progress_bars,
    } = options;

    let sample_len = max_samples.min(records.len());
    let pending: Vec<usize> = (0..sample_len)
        .filter(|&i| records[i].title.is_none())
        .collect();
    if pending.is_empty() {
        return Ok(0);
    }
    let urls: Vec<String> = pending.iter().map(|&i| records[i].address.clone()).collect();
    let total = urls.len();

    let progress_bar = if show_progress_bars {
        let pb = ProgressBar::new(total as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .map_err(|e| InterlinkError::InvalidValue(e.to_string()))?
                .progress_chars("=>-"),
        );
        pb.set_message("fetching titles");
        Some(Arc::new(pb))
    } else {
        None
    };

    let pb_clone = progress_bar.clone();
    let callback_clone = progress_callback.clone();
    let fetcher = TitleFetcher::with_timeout(timeout_secs)?
        .with_workers(workers)
        .with_progress_callback(Arc::new(move |done: usize, url: String| {
            if let Some(ref pb) = pb_clone {
                pb.set_position(done as u64);
            }
            if let Some(ref cb) = callback_clone {
                cb(format!("[{}/{}] {}", done, total, url));
            }
        }));

    let results = fetcher.fetch_all(urls).await?;

    let mut titled = 0;
    for (idx, metadata) in pending.into_iter().zip(results) {
        let record = &mut records[idx];
        if record.status_code.is_none() {
            record.status_code = metadata.status_code;
        }
        if record.content_type.is_none() {
            record.content_type = metadata.content_type;
        }
        if let Some(title) = metadata.title {
            record.title = Some(title);
            titled += 1;
        }
    }

    if let Some(pb) = progress_bar {
        pb.finish_and_clear();
    }
    info!("Fetched titles for {}/{} pages", titled, total);
    Ok(titled)
}
