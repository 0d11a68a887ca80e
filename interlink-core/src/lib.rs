pub mod analysis;
pub mod anchor;
pub mod balance;
pub mod category;
pub mod classify;
pub mod config;
pub mod engine;
pub mod error;
pub mod fetch;
pub mod ingest;
pub mod link;
pub mod matching;
pub mod record;
pub mod report;
pub mod rules;
pub mod similarity;

pub use category::{Category, PatternPreset, PatternSet};
pub use classify::{CategorizedPages, categorize, classify};
pub use engine::LinkEngine;
pub use error::{InterlinkError, Result};
pub use link::LinkRecord;
pub use record::{UrlComponents, UrlRecord};
pub use rules::{LinkRule, Placement, Priority};

const BANNER: &str = r#"
  _       _            _ _       _
 (_)_ __ | |_ ___ _ __| (_)_ __ | | __
 | | '_ \| __/ _ \ '__| | | '_ \| |/ /
 | | | | | ||  __/ |  | | | | | |   <
 |_|_| |_|\__\___|_|  |_|_|_| |_|_|\_\
"#;

/// Print the startup banner to stderr so report output on stdout stays clean.
pub fn print_banner() {
    eprintln!("{}", BANNER);
    eprintln!("  interlink v{} - internal cross-link planner\n", env!("CARGO_PKG_VERSION"));
}
