//! Turning tabular exports and URL lists into [`UrlRecord`]s.

use crate::error::{InterlinkError, Result};
use crate::record::UrlRecord;
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

pub use interlink_scanner::sitemap::parse_url_list as parse_manual_urls;

pub const ADDRESS_COLUMN: &str = "Address";
pub const STATUS_CODE_COLUMN: &str = "Status Code";
pub const CONTENT_TYPE_COLUMN: &str = "Content Type";
pub const TITLE_COLUMN: &str = "Title";

/// Read a crawler export. Requires an `Address` column; when a `Status Code` column
/// exists only rows with status 200 are kept.
pub fn read_url_table<R: Read>(reader: R) -> Result<Vec<UrlRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let mut index = HashMap::<String, usize>::new();
    for (idx, header) in headers.iter().enumerate() {
        let name = header.trim_start_matches('\u{feff}').trim().to_ascii_lowercase();
        index.entry(name).or_insert(idx);
    }
    let column = |name: &str| index.get(&name.to_ascii_lowercase()).copied();

    let address_idx =
        column(ADDRESS_COLUMN).ok_or_else(|| InterlinkError::MissingColumn(ADDRESS_COLUMN.to_string()))?;
    let status_idx = column(STATUS_CODE_COLUMN);
    let content_type_idx = column(CONTENT_TYPE_COLUMN);
    let title_idx = column(TITLE_COLUMN);

    let mut records = Vec::new();
    let mut skipped_status = 0usize;

    for row in reader.records() {
        let row = row?;
        let field = |idx: Option<usize>| {
            idx.and_then(|i| row.get(i))
                .map(str::trim)
                .filter(|value| !value.is_empty())
        };

        let Some(address) = field(Some(address_idx)) else {
            continue;
        };

        let mut record = UrlRecord::new(address);
        if status_idx.is_some() {
            match field(status_idx).and_then(|s| s.parse::<u16>().ok()) {
                Some(200) => record = record.with_status_code(200),
                _ => {
                    skipped_status += 1;
                    continue;
                }
            }
        }
        if let Some(content_type) = field(content_type_idx) {
            record = record.with_content_type(content_type);
        }
        if let Some(title) = field(title_idx) {
            record = record.with_title(title);
        }
        records.push(record);
    }

    if skipped_status > 0 {
        debug!("Dropped {} rows without status 200", skipped_status);
    }

    let records = dedupe(records);
    if records.is_empty() {
        return Err(InterlinkError::EmptyInput);
    }
    info!("Loaded {} URLs from table", records.len());
    Ok(records)
}

pub fn load_url_table(path: &Path) -> Result<Vec<UrlRecord>> {
    let file = File::open(path)?;
    read_url_table(file)
}

/// Records for a plain URL list, keeping the first occurrence of each address.
pub fn records_from_urls<I, S>(urls: I) -> Result<Vec<UrlRecord>>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let records = dedupe(urls.into_iter().map(UrlRecord::new).collect());
    if records.is_empty() {
        return Err(InterlinkError::EmptyInput);
    }
    Ok(records)
}

/// Records from freeform text: one URL per line, `http(s)://` only.
pub fn records_from_text(text: &str) -> Result<Vec<UrlRecord>> {
    records_from_urls(parse_manual_urls(text))
}

fn dedupe(records: Vec<UrlRecord>) -> Vec<UrlRecord> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|record| !record.address.is_empty() && seen.insert(record.address.clone()))
        .collect()
}
