// Report and export generation for a link plan

use crate::analysis::{LinkDistribution, analyze_links};
use crate::category::Category;
use crate::classify::CategorizedPages;
use crate::error::{InterlinkError, Result};
use crate::link::LinkRecord;
use rust_xlsxwriter::{Color, Format, FormatBorder, Workbook};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use std::str::FromStr;

/// The HTML report only renders this many link rows.
pub const HTML_ROW_LIMIT: usize = 1000;

const TOP_PAGES: usize = 10;

pub const CSV_HEADERS: [&str; 7] = [
    "source_page",
    "target_page",
    "link_type",
    "anchor_text",
    "placement",
    "priority",
    "position",
];
pub const RELEVANCE_HEADER: &str = "relevance_score";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportFormat {
    Text,
    Json,
    Csv,
    Excel,
    Html,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Text => "txt",
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
            ExportFormat::Excel => "xlsx",
            ExportFormat::Html => "html",
        }
    }

    /// Binary formats cannot be written to a terminal.
    pub fn is_binary(&self) -> bool {
        matches!(self, ExportFormat::Excel)
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExportFormat::Text => "text",
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
            ExportFormat::Excel => "excel",
            ExportFormat::Html => "html",
        };
        f.write_str(name)
    }
}

impl FromStr for ExportFormat {
    type Err = InterlinkError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(ExportFormat::Text),
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            "excel" | "xlsx" => Ok(ExportFormat::Excel),
            "html" => Ok(ExportFormat::Html),
            _ => Err(InterlinkError::UnknownFormat(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: Category,
    pub urls: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportData {
    pub run_id: String,
    pub generated_at: String,
    pub total_urls: usize,
    pub category_counts: Vec<CategoryCount>,
    pub links: Vec<LinkRecord>,
    pub distribution: LinkDistribution,
    /// Emit the relevance_score column.
    pub include_relevance: bool,
}

impl ReportData {
    pub fn new(pages: &CategorizedPages, links: Vec<LinkRecord>, include_relevance: bool) -> Self {
        let distribution = analyze_links(&links, TOP_PAGES);
        Self {
            run_id: uuid::Uuid::new_v4().to_string(),
            generated_at: chrono::Utc::now().to_rfc3339(),
            total_urls: pages.total(),
            category_counts: pages
                .counts()
                .into_iter()
                .map(|(category, urls)| CategoryCount { category, urls })
                .collect(),
            links,
            distribution,
            include_relevance,
        }
    }
}

/// Render the report in `format`. Text formats come back as UTF-8 bytes.
pub fn render_report(data: &ReportData, format: ExportFormat) -> Result<Vec<u8>> {
    match format {
        ExportFormat::Text => Ok(generate_text_report(data).into_bytes()),
        ExportFormat::Json => Ok(generate_json_report(data)?.into_bytes()),
        ExportFormat::Csv => {
            let mut buffer = Vec::new();
            write_links_csv(&mut buffer, &data.links, data.include_relevance)?;
            Ok(buffer)
        }
        ExportFormat::Excel => generate_excel_report(data),
        ExportFormat::Html => Ok(generate_html_report(data).into_bytes()),
    }
}

pub fn write_links_csv<W: Write>(writer: W, links: &[LinkRecord], include_relevance: bool) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);

    let mut headers: Vec<&str> = CSV_HEADERS.to_vec();
    if include_relevance {
        headers.push(RELEVANCE_HEADER);
    }
    writer.write_record(&headers)?;

    for link in links {
        let mut row = vec![
            link.source_page.clone(),
            link.target_page.clone(),
            link.link_type.clone(),
            link.anchor_text.clone(),
            link.placement.to_string(),
            link.priority.to_string(),
            link.position.map(|p| p.to_string()).unwrap_or_default(),
        ];
        if include_relevance {
            row.push(
                link.relevance_score
                    .map(|s| format!("{:.4}", s))
                    .unwrap_or_default(),
            );
        }
        writer.write_record(&row)?;
    }

    writer.flush()?;
    Ok(())
}

/// Parse a CSV produced by [`write_links_csv`].
pub fn read_links_csv<R: Read>(reader: R) -> Result<Vec<LinkRecord>> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut links = Vec::new();
    for record in reader.deserialize() {
        let link: LinkRecord = record?;
        links.push(link);
    }
    Ok(links)
}

pub fn generate_json_report(data: &ReportData) -> Result<String> {
    let json_report = serde_json::json!({
        "report": {
            "metadata": {
                "generator": "Interlink",
                "version": env!("CARGO_PKG_VERSION"),
                "generated_at": data.generated_at,
                "run_id": data.run_id,
                "format": "json"
            },
            "summary": {
                "total_urls": data.total_urls,
                "total_links": data.links.len(),
                "categories": data.category_counts,
                "distribution": data.distribution
            },
            "links": data.links
        }
    });

    Ok(serde_json::to_string_pretty(&json_report)?)
}

pub fn generate_text_report(data: &ReportData) -> String {
    let rule = "━".repeat(78);
    let mut report = String::new();

    report.push_str(&format!("{}\n", rule));
    report.push_str("                         INTERLINK CROSS-LINK PLAN\n");
    report.push_str(&format!("{}\n\n", rule));

    report.push_str(&format!("Run ID:       {}\n", data.run_id));
    report.push_str(&format!("Generated:    {}\n", data.generated_at));
    report.push_str(&format!("URLs:         {}\n", data.total_urls));
    report.push_str(&format!("Links:        {}\n\n", data.links.len()));

    report.push_str(&format!("{}\nPAGE CATEGORIES\n{}\n\n", rule, rule));
    for count in &data.category_counts {
        report.push_str(&format!("  {:<14} {}\n", count.category.as_str(), count.urls));
    }
    report.push('\n');

    report.push_str(&format!("{}\nLINKS BY TYPE\n{}\n\n", rule, rule));
    for entry in &data.distribution.by_link_type {
        report.push_str(&format!("  {:<30} {}\n", entry.label, entry.count));
    }
    report.push('\n');
    for entry in &data.distribution.by_priority {
        report.push_str(&format!("  [{}] {}\n", entry.label.to_uppercase(), entry.count));
    }
    report.push('\n');

    if !data.distribution.top_outgoing.is_empty() {
        report.push_str(&format!("{}\nMOST OUTGOING LINKS\n{}\n\n", rule, rule));
        for page in &data.distribution.top_outgoing {
            report.push_str(&format!("  {:>4}  {}\n", page.links, page.page));
        }
        report.push('\n');
        report.push_str(&format!("{}\nMOST INCOMING LINKS\n{}\n\n", rule, rule));
        for page in &data.distribution.top_incoming {
            report.push_str(&format!("  {:>4}  {}\n", page.links, page.page));
        }
        report.push('\n');
    }

    report.push_str(&format!(
        "Pages with no incoming links: {}\nPages with no outgoing links: {}\n\n",
        data.distribution.no_incoming.len(),
        data.distribution.no_outgoing.len()
    ));

    if !data.links.is_empty() {
        report.push_str(&format!("{}\nLINKS\n{}\n\n", rule, rule));
        for link in &data.links {
            report.push_str(&format!(
                "  [{}] {} -> {}\n      \"{}\" ({}{})\n",
                link.priority.as_str().to_uppercase(),
                link.source_page,
                link.target_page,
                link.anchor_text,
                link.placement,
                link.position.map(|p| format!(" #{}", p)).unwrap_or_default()
            ));
        }
        report.push('\n');
    }

    report.push_str(&format!("{}\n", rule));
    report.push_str("\nGenerated by Interlink - export with --format csv|excel|html|json\n\n");
    report
}

pub fn generate_html_report(data: &ReportData) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>Interlink Cross-Link Plan</title>\n<style>\n");
    html.push_str(
        "body{font-family:-apple-system,Segoe UI,Helvetica,Arial,sans-serif;margin:2rem;color:#222}\n\
         h1{color:#1f4e78}\n\
         .summary{display:flex;flex-wrap:wrap;gap:1rem;margin-bottom:1.5rem}\n\
         .card{background:#f3f6fa;border-radius:6px;padding:.75rem 1rem;min-width:12rem}\n\
         table{border-collapse:collapse;width:100%;font-size:.9rem}\n\
         th{background:#1f4e78;color:#fff;text-align:left;padding:.4rem}\n\
         td{border-bottom:1px solid #ddd;padding:.35rem;word-break:break-all}\n\
         .high{color:#b00020;font-weight:bold}.medium{color:#b26a00}.low{color:#555}\n",
    );
    html.push_str("</style>\n</head>\n<body>\n");
    html.push_str("<h1>Cross-Link Plan</h1>\n");
    html.push_str(&format!(
        "<p>Run <code>{}</code> generated {}</p>\n",
        escape_html(&data.run_id),
        escape_html(&data.generated_at)
    ));

    html.push_str("<div class=\"summary\">\n");
    html.push_str(&format!(
        "<div class=\"card\"><strong>{}</strong> URLs<br><strong>{}</strong> links</div>\n",
        data.total_urls,
        data.links.len()
    ));
    html.push_str("<div class=\"card\"><strong>Categories</strong><ul>");
    for count in &data.category_counts {
        html.push_str(&format!("<li>{}: {}</li>", count.category, count.urls));
    }
    html.push_str("</ul></div>\n");
    html.push_str("<div class=\"card\"><strong>Link types</strong><ul>");
    for entry in &data.distribution.by_link_type {
        html.push_str(&format!("<li>{}: {}</li>", escape_html(&entry.label), entry.count));
    }
    html.push_str("</ul></div>\n");
    html.push_str("<div class=\"card\"><strong>Priorities</strong><ul>");
    for entry in &data.distribution.by_priority {
        html.push_str(&format!("<li>{}: {}</li>", escape_html(&entry.label), entry.count));
    }
    html.push_str("</ul></div>\n</div>\n");

    html.push_str("<h2>Link distribution</h2>\n");
    push_page_list(&mut html, "Most outgoing links", &data.distribution.top_outgoing);
    push_page_list(&mut html, "Most incoming links", &data.distribution.top_incoming);
    html.push_str(&format!(
        "<p>{} pages have no incoming links; {} pages have no outgoing links.</p>\n",
        data.distribution.no_incoming.len(),
        data.distribution.no_outgoing.len()
    ));

    html.push_str(
        "<h2>Implementation guide</h2>\n<ol>\n\
         <li>Start with <span class=\"high\">high</span> priority links.</li>\n\
         <li>Place each link in the suggested placement; keep breadcrumbs hierarchical.</li>\n\
         <li>Use the suggested anchor text, adjusting only for readability.</li>\n\
         <li>Roll out gradually on large sites and re-run the plan periodically.</li>\n\
         </ol>\n",
    );

    let shown = data.links.len().min(HTML_ROW_LIMIT);
    html.push_str("<h2>Links</h2>\n");
    if data.links.len() > HTML_ROW_LIMIT {
        html.push_str(&format!(
            "<p>Showing the first {} of {} links. Export CSV or Excel for the full list.</p>\n",
            HTML_ROW_LIMIT,
            data.links.len()
        ));
    }
    html.push_str("<table>\n<thead><tr>");
    for header in CSV_HEADERS {
        html.push_str(&format!("<th>{}</th>", header));
    }
    if data.include_relevance {
        html.push_str(&format!("<th>{}</th>", RELEVANCE_HEADER));
    }
    html.push_str("</tr></thead>\n<tbody>\n");
    for link in &data.links[..shown] {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td class=\"{}\">{}</td><td>{}</td>",
            escape_html(&link.source_page),
            escape_html(&link.target_page),
            escape_html(&link.link_type),
            escape_html(&link.anchor_text),
            link.placement,
            link.priority,
            link.priority,
            link.position.map(|p| p.to_string()).unwrap_or_default()
        ));
        if data.include_relevance {
            html.push_str(&format!(
                "<td>{}</td>",
                link.relevance_score
                    .map(|s| format!("{:.4}", s))
                    .unwrap_or_default()
            ));
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</tbody>\n</table>\n</body>\n</html>\n");
    html
}

fn push_page_list(html: &mut String, heading: &str, pages: &[crate::analysis::PageLinkCount]) {
    if pages.is_empty() {
        return;
    }
    html.push_str(&format!("<h3>{}</h3>\n<ol>\n", heading));
    for page in pages {
        html.push_str(&format!(
            "<li>{} <small>({})</small></li>\n",
            escape_html(&page.page),
            page.links
        ));
    }
    html.push_str("</ol>\n");
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Spreadsheet with a styled header row and auto-sized columns.
pub fn generate_excel_report(data: &ReportData) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::White)
        .set_background_color(Color::RGB(0x1F4E78))
        .set_border(FormatBorder::Thin);

    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Cross Links")?;

    let mut headers: Vec<&str> = CSV_HEADERS.to_vec();
    if data.include_relevance {
        headers.push(RELEVANCE_HEADER);
    }
    for (col, header) in headers.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }

    for (idx, link) in data.links.iter().enumerate() {
        let row = (idx + 1) as u32;
        worksheet.write_string(row, 0, &link.source_page)?;
        worksheet.write_string(row, 1, &link.target_page)?;
        worksheet.write_string(row, 2, &link.link_type)?;
        worksheet.write_string(row, 3, &link.anchor_text)?;
        worksheet.write_string(row, 4, link.placement.as_str())?;
        worksheet.write_string(row, 5, link.priority.as_str())?;
        if let Some(position) = link.position {
            worksheet.write_number(row, 6, position as f64)?;
        }
        if data.include_relevance {
            if let Some(score) = link.relevance_score {
                worksheet.write_number(row, 7, score)?;
            }
        }
    }

    worksheet.set_freeze_panes(1, 0)?;
    worksheet.autofit();

    Ok(workbook.save_to_buffer()?)
}

pub fn save_report(content: &[u8], path: &Path) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content)?;
    Ok(())
}
