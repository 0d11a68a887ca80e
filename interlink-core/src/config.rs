use crate::balance::BalanceOptions;
use crate::category::{Category, PatternPreset, PatternSet};
use crate::engine::DEFAULT_MAX_LINKS;
use crate::error::{InterlinkError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_DIR: &str = "~/.config/interlink/";
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Settings for one run, loadable from a JSON file. Missing keys take defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub preset: PatternPreset,
    /// Category name -> regex, in evaluation order. Overrides preset entries.
    pub patterns: Map<String, Value>,
    pub max_links: usize,
    pub balance: bool,
    pub balance_ratio: f64,
    pub balance_min_outgoing: usize,
    pub balance_removal_fraction: f64,
    pub content_similarity: bool,
    pub fetch_titles: bool,
    pub max_title_samples: usize,
    pub threads: usize,
    pub timeout_secs: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        let balance = BalanceOptions::default();
        Self {
            preset: PatternPreset::RealEstate,
            patterns: Map::new(),
            max_links: DEFAULT_MAX_LINKS,
            balance: false,
            balance_ratio: balance.ratio,
            balance_min_outgoing: balance.min_outgoing,
            balance_removal_fraction: balance.removal_fraction,
            content_similarity: false,
            fetch_titles: false,
            max_title_samples: 100,
            threads: 5,
            timeout_secs: 10,
        }
    }
}

impl RunConfig {
    /// `~/.config/interlink/config.json`, tilde-expanded.
    pub fn default_path() -> PathBuf {
        PathBuf::from(shellexpand::tilde(DEFAULT_CONFIG_DIR).as_ref()).join(CONFIG_FILE_NAME)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: RunConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.balance_removal_fraction) {
            return Err(InterlinkError::InvalidValue(format!(
                "balance_removal_fraction must be within 0..=1, got {}",
                self.balance_removal_fraction
            )));
        }
        if self.balance_ratio < 0.0 {
            return Err(InterlinkError::InvalidValue(format!(
                "balance_ratio must not be negative, got {}",
                self.balance_ratio
            )));
        }
        if self.threads == 0 {
            return Err(InterlinkError::InvalidValue("threads must be at least 1".to_string()));
        }
        self.pattern_set().map(|_| ())
    }

    /// Preset patterns with the configured overrides applied on top.
    pub fn pattern_set(&self) -> Result<PatternSet> {
        let mut set = self.preset.pattern_set()?;
        for (name, value) in &self.patterns {
            let category = name.parse::<Category>()?;
            let pattern = value.as_str().ok_or_else(|| {
                InterlinkError::InvalidValue(format!("pattern for '{}' must be a string", name))
            })?;
            set.set(category, pattern)?;
        }
        Ok(set)
    }

    pub fn set_pattern(&mut self, category: Category, pattern: impl Into<String>) {
        self.patterns
            .insert(category.as_str().to_string(), Value::String(pattern.into()));
    }

    pub fn balance_options(&self) -> BalanceOptions {
        BalanceOptions {
            ratio: self.balance_ratio,
            min_outgoing: self.balance_min_outgoing,
            removal_fraction: self.balance_removal_fraction,
        }
    }
}
