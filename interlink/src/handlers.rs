use anyhow::{Context, Result, bail};
use clap::ArgMatches;
use colored::Colorize;
use interlink_core::balance::balance_links;
use interlink_core::config::{CONFIG_FILE_NAME, DEFAULT_CONFIG_DIR, RunConfig};
use interlink_core::fetch::{TitleFetchOptions, enrich_titles, load_sitemap};
use interlink_core::ingest::{load_url_table, records_from_text};
use interlink_core::report::{ExportFormat, ReportData, render_report, save_report};
use interlink_core::{Category, LinkEngine, PatternPreset, UrlComponents, UrlRecord, categorize, classify};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};
use url::Url;

/// Where the URL table for a run comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum InputSource {
    Csv(PathBuf),
    Sitemap(Url),
    /// Newline-delimited URLs; `-` reads stdin.
    UrlsFile(PathBuf),
}

impl InputSource {
    pub fn from_matches(args: &ArgMatches) -> Result<Self> {
        if let Some(path) = args.get_one::<PathBuf>("input") {
            Ok(InputSource::Csv(path.clone()))
        } else if let Some(url) = args.get_one::<Url>("sitemap") {
            Ok(InputSource::Sitemap(url.clone()))
        } else if let Some(path) = args.get_one::<PathBuf>("urls-file") {
            Ok(InputSource::UrlsFile(path.clone()))
        } else {
            bail!("One of --input, --sitemap or --urls-file must be provided")
        }
    }
}

/// Load the URL table for a run
pub async fn load_urls_from_source(source: &InputSource, timeout_secs: u64) -> Result<Vec<UrlRecord>> {
    match source {
        InputSource::Csv(path) => {
            load_url_table(path).with_context(|| format!("Failed to load CSV {}", path.display()))
        }
        InputSource::Sitemap(url) => load_sitemap(url.as_str(), timeout_secs)
            .await
            .with_context(|| format!("Failed to load sitemap {}", url)),
        InputSource::UrlsFile(path) => {
            let content = if path.as_os_str() == "-" {
                let mut content = String::new();
                io::stdin()
                    .read_to_string(&mut content)
                    .context("Failed to read URLs from stdin")?;
                content
            } else {
                fs::read_to_string(path)
                    .with_context(|| format!("Failed to read URL file {}", path.display()))?
            };
            records_from_text(&content)
                .with_context(|| format!("No valid URLs found in {}", path.display()))
        }
    }
}

/// Config file named on the command line, else the default file when it exists, else defaults.
pub fn load_run_config(explicit: Option<&PathBuf>) -> Result<RunConfig> {
    match explicit {
        Some(path) => RunConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => {
            let default_path = RunConfig::default_path();
            if default_path.exists() {
                info!("Using config {}", default_path.display());
                RunConfig::load(&default_path)
                    .with_context(|| format!("Failed to load config {}", default_path.display()))
            } else {
                Ok(RunConfig::default())
            }
        }
    }
}

/// Apply pattern flags (`--preset`, `--*-pattern`) over the config.
pub fn apply_pattern_overrides(config: &mut RunConfig, args: &ArgMatches) -> Result<()> {
    if let Some(preset) = args.get_one::<String>("preset") {
        config.preset = preset.parse::<PatternPreset>()?;
    }
    let flags = [
        ("pdp-pattern", Category::Pdp),
        ("city-pattern", Category::CityPlp),
        ("state-pattern", Category::StatePlp),
        ("category-pattern", Category::CategoryPlp),
    ];
    for (flag, category) in flags {
        if let Some(pattern) = args.get_one::<String>(flag) {
            config.set_pattern(category, pattern.as_str());
        }
    }
    Ok(())
}

/// Apply every `generate` flag over the config. Flags win over file values.
pub fn apply_generate_overrides(config: &mut RunConfig, args: &ArgMatches) -> Result<()> {
    apply_pattern_overrides(config, args)?;

    if let Some(max_links) = args.get_one::<usize>("max-links") {
        config.max_links = *max_links;
    }
    if let Some(samples) = args.get_one::<usize>("max-title-samples") {
        config.max_title_samples = *samples;
    }
    if let Some(threads) = args.get_one::<usize>("threads") {
        config.threads = *threads;
    }
    if let Some(timeout) = args.get_one::<u64>("timeout") {
        config.timeout_secs = *timeout;
    }
    if args.get_flag("balance") {
        config.balance = true;
    }
    if args.get_flag("content-similarity") {
        config.content_similarity = true;
    }
    if args.get_flag("fetch-titles") {
        config.fetch_titles = true;
    }

    config.validate().context("Invalid configuration")?;
    Ok(())
}

pub fn build_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn print_divider() {
    eprintln!("{}", "═".repeat(60).bright_blue().bold());
}

fn print_prompt(msg: &str) -> Result<String> {
    print!("{} ", msg.bright_cyan().bold());
    io::stdout().flush()?;
    let mut response = String::new();
    io::stdin().read_line(&mut response)?;
    Ok(response.trim().to_lowercase())
}

/// Write the default config into `config_dir`, returning the file path.
pub fn write_default_config(config_dir: &Path) -> Result<PathBuf> {
    let config_path = config_dir.join(CONFIG_FILE_NAME);
    RunConfig::default()
        .save(&config_path)
        .with_context(|| format!("Failed to write config {}", config_path.display()))?;
    Ok(config_path)
}

pub fn handle_init(args: &ArgMatches) -> Result<()> {
    let quiet = args.get_flag("quiet");
    let config_dir = args
        .get_one::<String>("PATH")
        .map(String::as_str)
        .unwrap_or(DEFAULT_CONFIG_DIR);
    let force = args.get_flag("force");
    let expanded_config_dir = shellexpand::tilde(config_dir);
    let config_dir = Path::new(expanded_config_dir.as_ref());
    let config_path = config_dir.join(CONFIG_FILE_NAME);

    if !quiet {
        print_divider();
        eprintln!("{}", "  INTERLINK INITIALIZATION".bright_white().bold());
        print_divider();
        eprintln!();
    }

    if config_path.exists() && !force {
        println!("{}", "⚠ WARNING".yellow().bold());
        println!("Config file already exists:");
        println!(
            "  {} {}",
            "•".yellow(),
            config_path.display().to_string().bright_white()
        );
        println!();

        let response = print_prompt("Overwrite it with the defaults? [y/N]:")?;
        println!();

        if response != "y" && response != "yes" {
            println!("{} Initialization cancelled.", "✗".red().bold());
            return Ok(());
        }
    }

    let written = write_default_config(config_dir)?;
    println!(
        "{} Config written: {}",
        "✓".green().bold(),
        written.display().to_string().bright_white()
    );
    Ok(())
}

pub async fn handle_generate(args: &ArgMatches) -> Result<()> {
    let quiet = args.get_flag("quiet");
    let mut config = load_run_config(args.get_one::<PathBuf>("config"))?;
    apply_generate_overrides(&mut config, args)?;

    let format = args
        .get_one::<String>("format")
        .map(|f| f.parse::<ExportFormat>())
        .transpose()?
        .unwrap_or(ExportFormat::Text);
    let output = args.get_one::<PathBuf>("output");
    if format.is_binary() && output.is_none() {
        bail!("The {} format needs --output <PATH>", format);
    }

    let source = InputSource::from_matches(args)?;
    let mut records = load_urls_from_source(&source, config.timeout_secs).await?;
    if !quiet {
        eprintln!("{} Loaded {} URLs", "✓".green().bold(), records.len());
    }

    if config.fetch_titles {
        let options = TitleFetchOptions {
            workers: config.threads,
            timeout_secs: config.timeout_secs,
            max_samples: config.max_title_samples,
            show_progress_bars: !quiet,
        };
        let progress_callback = Arc::new(|msg: String| {
            tracing::debug!("{}", msg);
        });
        let titled = enrich_titles(&mut records, options, Some(progress_callback))
            .await
            .context("Title fetch failed")?;
        if !quiet {
            eprintln!("{} Fetched {} titles", "✓".green().bold(), titled);
        }
    }

    let patterns = config.pattern_set()?;
    if patterns.is_empty() {
        warn!("No patterns configured; every URL will be classified as 'other'");
    }
    let pages = categorize(records, &patterns);
    if !quiet {
        for (category, count) in pages.counts() {
            eprintln!("  {} {:<14} {}", "→".blue(), category.as_str(), count);
        }
    }

    let mut rng = build_rng(args.get_one::<u64>("seed").copied());
    let engine = LinkEngine::new()
        .with_max_links(config.max_links)
        .with_content_similarity(config.content_similarity);
    let mut links = engine.generate(&pages, &mut rng);

    if config.balance {
        let before = links.len();
        links = balance_links(links, &config.balance_options(), &mut rng);
        info!("Balancing removed {} links", before - links.len());
    }
    if !quiet {
        eprintln!("{} Generated {} links", "✓".green().bold(), links.len());
    }

    let data = ReportData::new(&pages, links, config.content_similarity);
    let rendered = render_report(&data, format)?;

    match output {
        Some(path) => {
            save_report(&rendered, path)
                .with_context(|| format!("Failed to write report {}", path.display()))?;
            if !quiet {
                eprintln!(
                    "{} Report saved: {}",
                    "✓".green().bold(),
                    path.display().to_string().bright_white()
                );
            }
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(&rendered)?;
            stdout.flush()?;
        }
    }
    Ok(())
}

/// Classification result for one URL as JSON.
pub fn classify_report(url: &str, config: &RunConfig) -> Result<serde_json::Value> {
    let patterns = config.pattern_set()?;
    let components = UrlComponents::parse(url);
    let category = classify(url, &patterns);
    Ok(serde_json::json!({
        "url": url,
        "category": category,
        "preset": config.preset,
        "components": components,
    }))
}

pub fn handle_classify(args: &ArgMatches) -> Result<()> {
    let url = args
        .get_one::<String>("URL")
        .context("A URL to classify is required")?;
    let mut config = load_run_config(args.get_one::<PathBuf>("config"))?;
    apply_pattern_overrides(&mut config, args)?;
    config.validate().context("Invalid configuration")?;

    let report = classify_report(url, &config)?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    if report["category"] == Category::Other.as_str() {
        eprintln!(
            "{} No pattern matched; '{}' falls back to 'other'",
            "⚠".yellow().bold(),
            url
        );
    }
    Ok(())
}

pub fn handle_presets() -> Result<()> {
    for preset in PatternPreset::ALL {
        println!(
            "{} {}",
            preset.as_str().bright_white().bold(),
            format!("- {}", preset.description()).dimmed()
        );
        let patterns = preset.patterns();
        if patterns.is_empty() {
            println!("    {}", "(no patterns)".dimmed());
        }
        for (category, pattern) in patterns {
            println!("    {:<14} {}", category.as_str().cyan(), pattern);
        }
        println!();
    }
    Ok(())
}
