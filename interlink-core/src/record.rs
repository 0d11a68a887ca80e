use serde::{Deserialize, Serialize};
use url::Url;

/// Parsed pieces of a URL used for classification and hierarchical matching.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlComponents {
    pub domain: String,
    /// Path with leading and trailing slashes stripped.
    pub path: String,
    pub segments: Vec<String>,
    pub depth: usize,
}

impl UrlComponents {
    /// Parse an absolute URL. Anything the URL parser rejects yields the empty
    /// (zero-segment) component record.
    pub fn parse(address: &str) -> Self {
        let Ok(parsed) = Url::parse(address.trim()) else {
            return Self::default();
        };

        let domain = parsed.host_str().unwrap_or_default().to_string();
        let path = parsed.path().trim_matches('/').to_string();
        let segments: Vec<String> = path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(str::to_string)
            .collect();

        Self {
            domain,
            depth: segments.len(),
            path,
            segments,
        }
    }
}

/// One ingested page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrlRecord {
    pub address: String,
    pub status_code: Option<u16>,
    pub content_type: Option<String>,
    pub title: Option<String>,
    pub components: UrlComponents,
}

impl UrlRecord {
    pub fn new(address: impl Into<String>) -> Self {
        let address = address.into().trim().to_string();
        let components = UrlComponents::parse(&address);
        Self {
            address,
            status_code: None,
            content_type: None,
            title: None,
            components,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        let title = title.into();
        self.title = if title.trim().is_empty() { None } else { Some(title) };
        self
    }

    pub fn with_status_code(mut self, status_code: u16) -> Self {
        self.status_code = Some(status_code);
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn segments(&self) -> &[String] {
        &self.components.segments
    }

    pub fn path(&self) -> &str {
        &self.components.path
    }
}
