use clap::{Arg, arg, command};
use interlink_core::config::DEFAULT_CONFIG_DIR;
use url::Url;

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);

pub const PRESET_NAMES: [&str; 5] = ["ecommerce", "real-estate", "blog", "local-business", "custom"];
pub const FORMAT_NAMES: [&str; 5] = ["text", "json", "csv", "excel", "html"];

/// Arguments shared by every command that needs a pattern set.
fn pattern_args() -> Vec<Arg> {
    vec![
        arg!(-p --"preset" <PRESET>)
            .required(false)
            .help("Pattern preset (default: real-estate)")
            .value_parser(PRESET_NAMES),
        arg!(--"pdp-pattern" <REGEX>)
            .required(false)
            .help("Regex for detail pages, matched against the URL path"),
        arg!(--"city-pattern" <REGEX>)
            .required(false)
            .help("Regex for city listing pages"),
        arg!(--"state-pattern" <REGEX>)
            .required(false)
            .help("Regex for state listing pages"),
        arg!(--"category-pattern" <REGEX>)
            .required(false)
            .help("Regex for category listing pages"),
        arg!(-c --"config" <PATH>)
            .required(false)
            .help("Config file (default: ~/.config/interlink/config.json when present)")
            .value_parser(clap::value_parser!(std::path::PathBuf)),
    ]
}

pub fn command_argument_builder() -> clap::Command {
    clap::Command::new("interlink")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("interlink")
        .styles(CLAP_STYLING)
        .arg(
            arg!(-q --"quiet" "Suppress banner and non-essential output")
                .required(false)
                .global(true),
        )
        .arg(
            arg!(-v --"verbose" "Increase log verbosity (-v info, -vv debug)")
                .required(false)
                .action(clap::ArgAction::Count)
                .global(true),
        )
        .subcommand_required(false)
        .subcommand(
            command!("init")
                .about("Writes a default interlink config file")
                .arg(
                    arg!([PATH])
                        .required(false)
                        .help("Directory to store the config file in")
                        .default_value(DEFAULT_CONFIG_DIR),
                )
                .arg(
                    arg!(-f --"force")
                        .help("Overwrite an existing config file without asking")
                        .required(false),
                ),
        )
        .subcommand(
            command!("generate")
                .about("Classify a list of URLs and generate internal cross-link recommendations")
                .arg(
                    arg!(-i --"input" <CSV>)
                        .required(false)
                        .help("Crawler export with an 'Address' column")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                )
                .arg(
                    arg!(-s --"sitemap" <URL>)
                        .required(false)
                        .help("XML sitemap or plain-text URL list to fetch")
                        .value_parser(clap::value_parser!(Url)),
                )
                .arg(
                    arg!(-u --"urls-file" <PATH>)
                        .required(false)
                        .help("Newline-delimited URL file, or '-' for stdin")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                )
                .group(
                    clap::ArgGroup::new("source")
                        .args(["input", "sitemap", "urls-file"])
                        .required(true)
                        .multiple(false),
                )
                .args(pattern_args())
                .arg(
                    arg!(-m --"max-links" <NUM>)
                        .required(false)
                        .help("Maximum number of links to generate (default: 1000)")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    arg!(--"balance")
                        .required(false)
                        .help("Trim low-priority links from pages that link out far more than they receive")
                        .action(clap::ArgAction::SetTrue),
                )
                .arg(
                    arg!(--"content-similarity")
                        .required(false)
                        .help("Add an informational relevance_score to every link")
                        .action(clap::ArgAction::SetTrue),
                )
                .arg(
                    arg!(--"fetch-titles")
                        .required(false)
                        .help("Fetch page titles for richer anchor text")
                        .action(clap::ArgAction::SetTrue),
                )
                .arg(
                    arg!(--"max-title-samples" <NUM>)
                        .required(false)
                        .help("Fetch titles for at most this many pages (default: 100)")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    arg!(-t --"threads" <NUM_WORKERS>)
                        .required(false)
                        .help("The number of concurrent title requests (default: 5)")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    arg!(--"timeout" <SECONDS>)
                        .required(false)
                        .help("Request timeout in seconds (default: 10)")
                        .value_parser(clap::value_parser!(u64)),
                )
                .arg(
                    arg!(--"seed" <SEED>)
                        .required(false)
                        .help("Seed for sampling and anchor phrasing, for reproducible output")
                        .value_parser(clap::value_parser!(u64)),
                )
                .arg(
                    arg!(-o --"output" <PATH>)
                        .required(false)
                        .help("Save report to file (default: display to screen)")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                )
                .arg(
                    arg!(-f --"format" <FORMAT>)
                        .required(false)
                        .help("Report format: text, json, csv, excel, html")
                        .value_parser(FORMAT_NAMES)
                        .default_value("text"),
                ),
        )
        .subcommand(
            command!("classify")
                .about("Test the configured patterns against a single URL")
                .arg(arg!(<URL>).required(true).help("The URL to classify"))
                .args(pattern_args()),
        )
        .subcommand(command!("presets").about("List the built-in pattern presets"))
}
