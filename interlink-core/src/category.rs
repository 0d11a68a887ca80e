use crate::error::{InterlinkError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Page-type classification of a URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Pdp,
    CityPlp,
    StatePlp,
    CategoryPlp,
    Other,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Pdp,
        Category::CityPlp,
        Category::StatePlp,
        Category::CategoryPlp,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Pdp => "pdp",
            Category::CityPlp => "city_plp",
            Category::StatePlp => "state_plp",
            Category::CategoryPlp => "category_plp",
            Category::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = InterlinkError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "pdp" => Ok(Category::Pdp),
            "city_plp" => Ok(Category::CityPlp),
            "state_plp" => Ok(Category::StatePlp),
            "category_plp" => Ok(Category::CategoryPlp),
            "other" => Ok(Category::Other),
            _ => Err(InterlinkError::UnknownCategory(s.to_string())),
        }
    }
}

/// Ordered category patterns. Classification takes the first match in insertion
/// order, not the most specific one.
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    patterns: Vec<(Category, Regex)>,
}

impl PatternSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from (category name, regex) pairs. Empty patterns are skipped.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut set = Self::new();
        for (name, pattern) in pairs {
            let category = name.as_ref().parse::<Category>()?;
            set.set(category, pattern.as_ref())?;
        }
        Ok(set)
    }

    /// Set the pattern for `category`. An existing entry is replaced in place so its
    /// evaluation position is kept; an empty pattern removes the entry.
    pub fn set(&mut self, category: Category, pattern: &str) -> Result<()> {
        if category == Category::Other {
            return Err(InterlinkError::InvalidValue(
                "the 'other' category is the fallback and cannot carry a pattern".to_string(),
            ));
        }

        let pattern = pattern.trim();
        if pattern.is_empty() {
            self.patterns.retain(|(c, _)| *c != category);
            return Ok(());
        }

        let regex = Regex::new(pattern).map_err(|source| InterlinkError::InvalidPattern {
            category: category.to_string(),
            source,
        })?;

        match self.patterns.iter_mut().find(|(c, _)| *c == category) {
            Some(entry) => entry.1 = regex,
            None => self.patterns.push((category, regex)),
        }
        Ok(())
    }

    /// First category whose pattern matches `path`.
    pub fn first_match(&self, path: &str) -> Option<Category> {
        self.patterns
            .iter()
            .find(|(_, regex)| regex.is_match(path))
            .map(|(category, _)| *category)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, &str)> {
        self.patterns.iter().map(|(c, r)| (*c, r.as_str()))
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// Built-in pattern sets for common site layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PatternPreset {
    Ecommerce,
    RealEstate,
    Blog,
    LocalBusiness,
    Custom,
}

impl PatternPreset {
    pub const ALL: [PatternPreset; 5] = [
        PatternPreset::Ecommerce,
        PatternPreset::RealEstate,
        PatternPreset::Blog,
        PatternPreset::LocalBusiness,
        PatternPreset::Custom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PatternPreset::Ecommerce => "ecommerce",
            PatternPreset::RealEstate => "real-estate",
            PatternPreset::Blog => "blog",
            PatternPreset::LocalBusiness => "local-business",
            PatternPreset::Custom => "custom",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            PatternPreset::Ecommerce => "Online store: products, collections, store locator",
            PatternPreset::RealEstate => "Listings under /{state}/{city}/{property}",
            PatternPreset::Blog => "Posts, topic archives and location hubs",
            PatternPreset::LocalBusiness => "Service pages and service areas",
            PatternPreset::Custom => "No patterns; supply your own",
        }
    }

    /// Patterns in evaluation order. Matched against the slash-stripped path.
    pub fn patterns(&self) -> &'static [(Category, &'static str)] {
        match self {
            PatternPreset::Ecommerce => &[
                (Category::Pdp, r"^(products?|p|item)/[a-z0-9-]+$"),
                (Category::CityPlp, r"^stores/[a-z]{2}/[a-z0-9-]+$"),
                (Category::StatePlp, r"^stores/[a-z]{2}$"),
                (Category::CategoryPlp, r"^(category|categories|collections|shop)(/[a-z0-9-]+)+$"),
            ],
            PatternPreset::RealEstate => &[
                (Category::Pdp, r"^[a-z]{2}/[a-z0-9-]+/[0-9][a-z0-9-]*$"),
                (Category::CityPlp, r"^[a-z]{2}/[a-z0-9-]+$"),
                (Category::StatePlp, r"^[a-z]{2}$"),
                (
                    Category::CategoryPlp,
                    r"^(homes-for-sale|homes-for-rent|condos|townhomes|land)(/[a-z0-9-]+)*$",
                ),
            ],
            PatternPreset::Blog => &[
                (Category::Pdp, r"^(blog|posts?|articles?)/[a-z0-9-]+$"),
                (Category::CityPlp, r"^(locations?|cities)/[a-z0-9-]+/[a-z0-9-]+$"),
                (Category::StatePlp, r"^(locations?|cities)/[a-z0-9-]+$"),
                (Category::CategoryPlp, r"^(category|tags?|topics?)/[a-z0-9-]+$"),
            ],
            PatternPreset::LocalBusiness => &[
                (Category::Pdp, r"^services?/[a-z0-9-]+$"),
                (Category::CityPlp, r"^(service-areas?|locations?)/[a-z]{2}/[a-z0-9-]+$"),
                (Category::StatePlp, r"^(service-areas?|locations?)/[a-z]{2}$"),
                (Category::CategoryPlp, r"^(services|categories/[a-z0-9-]+)$"),
            ],
            PatternPreset::Custom => &[],
        }
    }

    pub fn pattern_set(&self) -> Result<PatternSet> {
        PatternSet::from_pairs(self.patterns().iter().map(|(c, p)| (c.as_str(), *p)))
    }
}

impl fmt::Display for PatternPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PatternPreset {
    type Err = InterlinkError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "ecommerce" | "e-commerce" => Ok(PatternPreset::Ecommerce),
            "real-estate" | "realestate" => Ok(PatternPreset::RealEstate),
            "blog" => Ok(PatternPreset::Blog),
            "local-business" | "local" => Ok(PatternPreset::LocalBusiness),
            "custom" => Ok(PatternPreset::Custom),
            _ => Err(InterlinkError::UnknownPreset(s.to_string())),
        }
    }
}
