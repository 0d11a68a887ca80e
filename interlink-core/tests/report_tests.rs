// Tests for report generation and exports

use interlink_core::report::{
    ExportFormat, HTML_ROW_LIMIT, ReportData, escape_html, generate_html_report,
    generate_json_report, generate_text_report, read_links_csv, render_report, save_report,
    write_links_csv,
};
use interlink_core::{
    CategorizedPages, Category, InterlinkError, LinkEngine, LinkRecord, PatternPreset, Placement,
    Priority, UrlRecord, categorize,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::str::FromStr;
use tempfile::TempDir;

fn sample_link(i: usize) -> LinkRecord {
    LinkRecord {
        source_page: format!("https://x.com/ca/la/{}-main-st", i),
        target_page: "https://x.com/ca/la".to_string(),
        link_type: "pdp_to_city_plp".to_string(),
        anchor_text: "La Listings".to_string(),
        placement: Placement::Breadcrumb,
        priority: Priority::High,
        position: None,
        relevance_score: None,
    }
}

fn sample_data() -> ReportData {
    let patterns = PatternPreset::RealEstate.pattern_set().unwrap();
    let urls = [
        "https://x.com/ca/los-angeles/123-main-st",
        "https://x.com/ca/los-angeles/456-oak-ave",
        "https://x.com/ca/los-angeles",
        "https://x.com/ca",
        "https://x.com/condos",
    ];
    let pages = categorize(urls.iter().map(|u| UrlRecord::new(*u)).collect(), &patterns);
    let links = LinkEngine::new().generate(&pages, &mut StdRng::seed_from_u64(1));
    ReportData::new(&pages, links, false)
}

// ============================================================================
// Export Format Tests
// ============================================================================

#[test]
fn test_export_format_from_str() {
    assert_eq!(ExportFormat::from_str("csv").unwrap(), ExportFormat::Csv);
    assert_eq!(ExportFormat::from_str("Excel").unwrap(), ExportFormat::Excel);
    assert_eq!(ExportFormat::from_str("xlsx").unwrap(), ExportFormat::Excel);
    assert_eq!(ExportFormat::from_str("HTML").unwrap(), ExportFormat::Html);
    assert_eq!(ExportFormat::from_str("json").unwrap(), ExportFormat::Json);
    assert_eq!(ExportFormat::from_str("text").unwrap(), ExportFormat::Text);
}

#[test]
fn test_export_format_unknown() {
    assert!(matches!(
        ExportFormat::from_str("pdf"),
        Err(InterlinkError::UnknownFormat(_))
    ));
}

#[test]
fn test_export_format_extension() {
    assert_eq!(ExportFormat::Excel.extension(), "xlsx");
    assert_eq!(ExportFormat::Csv.extension(), "csv");
    assert!(ExportFormat::Excel.is_binary());
    assert!(!ExportFormat::Html.is_binary());
}

// ============================================================================
// CSV Tests
// ============================================================================

#[test]
fn test_csv_header_row() {
    let mut buffer = Vec::new();
    write_links_csv(&mut buffer, &[sample_link(1)], false).unwrap();
    let text = String::from_utf8(buffer).unwrap();
    assert!(text.starts_with(
        "source_page,target_page,link_type,anchor_text,placement,priority,position\n"
    ));
}

#[test]
fn test_csv_relevance_column_only_when_enabled() {
    let mut link = sample_link(1);
    link.relevance_score = Some(0.5);

    let mut buffer = Vec::new();
    write_links_csv(&mut buffer, &[link], true).unwrap();
    let text = String::from_utf8(buffer).unwrap();
    let header = text.lines().next().unwrap();
    assert!(header.ends_with(",relevance_score"));
    assert!(text.contains("0.5000"));
}

#[test]
fn test_csv_round_trip() {
    let data = sample_data();
    assert!(!data.links.is_empty());

    let mut buffer = Vec::new();
    write_links_csv(&mut buffer, &data.links, false).unwrap();
    let parsed = read_links_csv(buffer.as_slice()).unwrap();

    assert_eq!(parsed, data.links);
}

#[test]
fn test_csv_round_trip_with_commas_and_quotes() {
    let mut link = sample_link(2);
    link.anchor_text = "Shop \"Big\", Bold Deals".to_string();
    link.placement = Placement::FeaturedSection;
    link.position = Some(3);

    let mut buffer = Vec::new();
    write_links_csv(&mut buffer, std::slice::from_ref(&link), false).unwrap();
    let parsed = read_links_csv(buffer.as_slice()).unwrap();
    assert_eq!(parsed, vec![link]);
}

// ============================================================================
// HTML Tests
// ============================================================================

#[test]
fn test_escape_html() {
    assert_eq!(
        escape_html("<a href=\"x\">Tom & Jerry's</a>"),
        "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
    );
}

#[test]
fn test_html_escapes_link_text() {
    let mut data = sample_data();
    data.links = vec![sample_link(1)];
    data.links[0].anchor_text = "<script>alert(1)</script>".to_string();

    let html = generate_html_report(&data);
    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;"));
}

#[test]
fn test_html_row_limit() {
    let pages = CategorizedPages::default();
    let links: Vec<LinkRecord> = (0..HTML_ROW_LIMIT + 25).map(sample_link).collect();
    let data = ReportData::new(&pages, links, false);

    let html = generate_html_report(&data);
    let rows = html.matches("<tr><td>").count();
    assert_eq!(rows, HTML_ROW_LIMIT);
    assert!(html.contains(&format!("Showing the first {} of {}", HTML_ROW_LIMIT, HTML_ROW_LIMIT + 25)));
}

#[test]
fn test_html_contains_summary_sections() {
    let html = generate_html_report(&sample_data());
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("Link distribution"));
    assert!(html.contains("Implementation guide"));
    assert!(html.contains("pdp_to_city_plp"));
}

// ============================================================================
// JSON / Text Tests
// ============================================================================

#[test]
fn test_json_report_structure() {
    let data = sample_data();
    let json = generate_json_report(&data).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    let metadata = &value["report"]["metadata"];
    assert_eq!(metadata["generator"], "Interlink");
    assert_eq!(metadata["run_id"], data.run_id.as_str());
    assert!(metadata["generated_at"].is_string());
    assert_eq!(value["report"]["summary"]["total_urls"], 5);
    assert_eq!(
        value["report"]["links"].as_array().unwrap().len(),
        data.links.len()
    );
}

#[test]
fn test_text_report_sections() {
    let data = sample_data();
    let text = generate_text_report(&data);
    assert!(text.contains("PAGE CATEGORIES"));
    assert!(text.contains("LINKS BY TYPE"));
    assert!(text.contains(Category::CityPlp.as_str()));
    assert!(text.contains(&format!("Links:        {}", data.links.len())));
}

// ============================================================================
// Excel / rendering Tests
// ============================================================================

#[test]
fn test_excel_is_zip_container() {
    let bytes = render_report(&sample_data(), ExportFormat::Excel).unwrap();
    assert!(bytes.starts_with(b"PK"));
}

#[test]
fn test_render_and_save_report() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("links.csv");
    let data = sample_data();

    let bytes = render_report(&data, ExportFormat::Csv).unwrap();
    save_report(&bytes, &path).unwrap();

    let parsed = read_links_csv(std::fs::File::open(&path).unwrap()).unwrap();
    assert_eq!(parsed.len(), data.links.len());
}
