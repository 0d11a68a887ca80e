use thiserror::Error;

#[derive(Error, Debug)]
pub enum InterlinkError {
    #[error("Missing required column '{0}'")]
    MissingColumn(String),

    #[error("No URLs to process")]
    EmptyInput,

    #[error("Malformed sitemap: {0}")]
    MalformedSitemap(String),

    #[error("Invalid pattern for category '{category}': {source}")]
    InvalidPattern {
        category: String,
        #[source]
        source: regex::Error,
    },

    #[error("Unknown category '{0}'")]
    UnknownCategory(String),

    #[error("Unknown preset '{0}'")]
    UnknownPreset(String),

    #[error("Unknown export format '{0}'")]
    UnknownFormat(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Spreadsheet error: {0}")]
    Excel(#[from] rust_xlsxwriter::XlsxError),

    #[error("Fetch error: {0}")]
    Scan(#[from] interlink_scanner::ScanError),
}

pub type Result<T> = std::result::Result<T, InterlinkError>;
