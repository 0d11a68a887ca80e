use crate::category::Category;
use crate::error::{InterlinkError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = InterlinkError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            _ => Err(InterlinkError::InvalidValue(format!("unknown priority '{}'", s))),
        }
    }
}

/// Zone of the source page where a recommended link belongs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    Breadcrumb,
    FeaturedSection,
    Sidebar,
    RelatedLinks,
    ContentBody,
    Footer,
}

impl Placement {
    pub fn as_str(&self) -> &'static str {
        match self {
            Placement::Breadcrumb => "breadcrumb",
            Placement::FeaturedSection => "featured_section",
            Placement::Sidebar => "sidebar",
            Placement::RelatedLinks => "related_links",
            Placement::ContentBody => "content_body",
            Placement::Footer => "footer",
        }
    }

    /// Only featured sections carry a numeric position.
    pub fn is_ranked(&self) -> bool {
        matches!(self, Placement::FeaturedSection)
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Placement {
    type Err = InterlinkError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "breadcrumb" => Ok(Placement::Breadcrumb),
            "featured_section" => Ok(Placement::FeaturedSection),
            "sidebar" => Ok(Placement::Sidebar),
            "related_links" => Ok(Placement::RelatedLinks),
            "content_body" => Ok(Placement::ContentBody),
            "footer" => Ok(Placement::Footer),
            _ => Err(InterlinkError::InvalidValue(format!("unknown placement '{}'", s))),
        }
    }
}

/// Which category links to which, how many times per source page, and where.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRule {
    pub source: Category,
    pub target: Category,
    pub max_targets: usize,
    pub priority: Priority,
    pub placement: Placement,
}

impl LinkRule {
    pub const fn new(
        source: Category,
        target: Category,
        max_targets: usize,
        priority: Priority,
        placement: Placement,
    ) -> Self {
        Self {
            source,
            target,
            max_targets,
            priority,
            placement,
        }
    }

    pub fn link_type(&self) -> String {
        format!("{}_to_{}", self.source, self.target)
    }
}

/// The standard rule list, evaluated in order.
pub const DEFAULT_RULES: [LinkRule; 9] = [
    LinkRule::new(Category::Pdp, Category::CityPlp, 1, Priority::High, Placement::Breadcrumb),
    LinkRule::new(Category::Pdp, Category::StatePlp, 1, Priority::High, Placement::Breadcrumb),
    LinkRule::new(Category::CityPlp, Category::Pdp, 10, Priority::High, Placement::FeaturedSection),
    LinkRule::new(Category::StatePlp, Category::CityPlp, 20, Priority::High, Placement::Sidebar),
    LinkRule::new(Category::Pdp, Category::Pdp, 4, Priority::Medium, Placement::RelatedLinks),
    LinkRule::new(Category::CategoryPlp, Category::Pdp, 8, Priority::Medium, Placement::FeaturedSection),
    LinkRule::new(Category::CategoryPlp, Category::CategoryPlp, 5, Priority::Low, Placement::Footer),
    LinkRule::new(Category::Pdp, Category::CategoryPlp, 2, Priority::Low, Placement::Sidebar),
    LinkRule::new(Category::CityPlp, Category::CategoryPlp, 3, Priority::Low, Placement::ContentBody),
];

pub fn default_rules() -> Vec<LinkRule> {
    DEFAULT_RULES.to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_type_format() {
        assert_eq!(DEFAULT_RULES[0].link_type(), "pdp_to_city_plp");
        assert_eq!(DEFAULT_RULES[6].link_type(), "category_plp_to_category_plp");
    }

    #[test]
    fn test_placement_and_priority_parse() {
        assert_eq!("featured_section".parse::<Placement>().unwrap(), Placement::FeaturedSection);
        assert_eq!("LOW".parse::<Priority>().unwrap(), Priority::Low);
        assert!("banner".parse::<Placement>().is_err());
    }

    #[test]
    fn test_only_featured_section_is_ranked() {
        assert!(Placement::FeaturedSection.is_ranked());
        assert!(!Placement::Breadcrumb.is_ranked());
        assert!(!Placement::Sidebar.is_ranked());
    }
}
