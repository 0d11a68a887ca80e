//! Sitemap retrieval and parsing.
//!
//! Accepts either a standard `<urlset>` document, a `<sitemapindex>` (followed one
//! level deep) or a newline-delimited plain-text list of URLs.

use crate::error::{Result, ScanError};
use crate::DEFAULT_USER_AGENT;
use quick_xml::events::Event;
use quick_xml::Reader;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// One `<url>` entry of a sitemap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SitemapEntry {
    pub loc: String,
    pub lastmod: Option<String>,
    pub changefreq: Option<String>,
    pub priority: Option<f32>,
}

impl SitemapEntry {
    pub fn new(loc: impl Into<String>) -> Self {
        Self {
            loc: loc.into(),
            lastmod: None,
            changefreq: None,
            priority: None,
        }
    }
}

/// A parsed sitemap document: page entries plus any child sitemaps of an index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SitemapDocument {
    pub entries: Vec<SitemapEntry>,
    pub child_sitemaps: Vec<String>,
}

/// Parse sitemap XML. Fails on ill-formed XML or when neither a `<urlset>` nor a
/// `<sitemapindex>` root is present.
pub fn parse_sitemap(xml: &str) -> Result<SitemapDocument> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();
    let mut doc = SitemapDocument::default();

    let mut root_seen = false;
    let mut in_url = false;
    let mut in_sitemap = false;
    let mut depth = 0usize;
    // Namespace prefix of the root element; fields must share it.
    let mut sitemap_prefix: Option<Vec<u8>> = None;
    let mut current_tag = String::new();
    let mut current = SitemapEntry::new(String::new());

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                depth += 1;
                let name = String::from_utf8_lossy(e.local_name().as_ref()).to_string();
                let prefix = e.name().prefix().map(|p| p.as_ref().to_vec());
                current_tag.clear();
                match depth {
                    1 if name == "urlset" || name == "sitemapindex" => {
                        root_seen = true;
                        sitemap_prefix = prefix;
                    }
                    2 if root_seen && prefix == sitemap_prefix => match name.as_str() {
                        "url" => {
                            in_url = true;
                            current = SitemapEntry::new(String::new());
                        }
                        "sitemap" => {
                            in_sitemap = true;
                            current = SitemapEntry::new(String::new());
                        }
                        _ => {}
                    },
                    3 if (in_url || in_sitemap) && prefix == sitemap_prefix => current_tag = name,
                    _ => {}
                }
            }
            Ok(Event::End(e)) => {
                if depth == 2 {
                    let name = String::from_utf8_lossy(e.local_name().as_ref()).to_string();
                    match name.as_str() {
                        "url" if in_url => {
                            if !current.loc.is_empty() {
                                doc.entries.push(current.clone());
                            }
                            in_url = false;
                        }
                        "sitemap" if in_sitemap => {
                            if !current.loc.is_empty() {
                                doc.child_sitemaps.push(current.loc.clone());
                            }
                            in_sitemap = false;
                        }
                        _ => {}
                    }
                }
                current_tag.clear();
                depth = depth.saturating_sub(1);
            }
            Ok(Event::Text(e)) => {
                let text = e
                    .unescape()
                    .map_err(|err| ScanError::ParseError(format!("XML text error: {}", err)))?
                    .trim()
                    .to_string();
                assign_field(&mut current, &current_tag, text, in_url, in_sitemap);
            }
            Ok(Event::CData(e)) => {
                let text = String::from_utf8_lossy(&e.into_inner()).trim().to_string();
                assign_field(&mut current, &current_tag, text, in_url, in_sitemap);
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(ScanError::ParseError(format!(
                    "XML parse error at byte {}: {}",
                    reader.buffer_position(),
                    e
                )));
            }
            _ => {}
        }
        buf.clear();
    }

    if !root_seen {
        return Err(ScanError::ParseError(
            "document has no <urlset> or <sitemapindex> root".to_string(),
        ));
    }

    Ok(doc)
}

fn assign_field(entry: &mut SitemapEntry, tag: &str, text: String, in_url: bool, in_sitemap: bool) {
    if text.is_empty() {
        return;
    }
    match tag {
        "loc" if in_url || in_sitemap => entry.loc = text,
        "lastmod" if in_url || in_sitemap => entry.lastmod = Some(text),
        "changefreq" if in_url => entry.changefreq = Some(text),
        "priority" if in_url => entry.priority = text.parse::<f32>().ok(),
        _ => {}
    }
}

/// Parse a newline-delimited URL list, keeping only `http://` and `https://` lines.
pub fn parse_url_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| line.starts_with("http://") || line.starts_with("https://"))
        .map(str::to_string)
        .collect()
}

/// Fetches a sitemap (XML or plain text) over HTTP.
pub struct SitemapFetcher {
    client: Client,
}

impl SitemapFetcher {
    pub fn new() -> Result<Self> {
        Self::with_timeout(10)
    }

    pub fn with_timeout(timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .user_agent(DEFAULT_USER_AGENT)
            .timeout(Duration::from_secs(timeout_secs))
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;
        Ok(Self { client })
    }

    /// Fetch and parse the resource at `url`. Child sitemaps of an index are fetched
    /// one level deep; a failing child is logged and skipped.
    pub async fn fetch(&self, url: &str) -> Result<Vec<SitemapEntry>> {
        info!("Fetching sitemap {}", url);
        let body = self.fetch_body(url).await?;

        if !looks_like_xml(&body) {
            let urls = parse_url_list(&body);
            debug!("Parsed {} URLs from plain-text list", urls.len());
            return Ok(urls.into_iter().map(SitemapEntry::new).collect());
        }

        let doc = parse_sitemap(&body)?;
        let mut entries = doc.entries;

        for child in doc.child_sitemaps {
            debug!("Following child sitemap {}", child);
            let child_doc = match self.fetch_body(&child).await {
                Ok(body) => parse_sitemap(&body),
                Err(e) => Err(e),
            };
            match child_doc {
                Ok(child_doc) => entries.extend(child_doc.entries),
                Err(e) => warn!("Skipping child sitemap {}: {}", child, e),
            }
        }

        info!("Sitemap yielded {} URLs", entries.len());
        Ok(entries)
    }

    async fn fetch_body(&self, url: &str) -> Result<String> {
        Url::parse(url).map_err(|e| ScanError::InvalidUrl(format!("{}: {}", url, e)))?;

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScanError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response.text().await?)
    }
}

fn looks_like_xml(body: &str) -> bool {
    body.trim_start_matches('\u{feff}').trim_start().starts_with('<')
}
