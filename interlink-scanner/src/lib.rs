pub mod error;
pub mod result;
pub mod sitemap;
pub mod titles;

pub use error::ScanError;
pub use result::PageMetadata;
pub use sitemap::{SitemapEntry, SitemapFetcher};
pub use titles::TitleFetcher;

/// Browser-like identification sent with every request.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
