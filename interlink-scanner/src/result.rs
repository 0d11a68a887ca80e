use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Metadata gathered for one page by the title fetcher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageMetadata {
    pub url: String,
    pub status_code: Option<u16>,
    pub content_type: Option<String>,
    pub title: Option<String>,
    pub response_time: Duration,
    pub error: Option<String>,
}

impl PageMetadata {
    pub fn new(url: String) -> Self {
        Self {
            url,
            status_code: None,
            content_type: None,
            title: None,
            response_time: Duration::from_secs(0),
            error: None,
        }
    }

    pub fn with_error(url: String, error: String) -> Self {
        Self {
            error: Some(error),
            ..Self::new(url)
        }
    }
}
