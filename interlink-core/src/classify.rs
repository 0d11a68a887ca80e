use crate::category::{Category, PatternSet};
use crate::record::{UrlComponents, UrlRecord};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Classify one URL. Total and deterministic: falls back to [`Category::Other`].
pub fn classify(url: &str, patterns: &PatternSet) -> Category {
    classify_components(&UrlComponents::parse(url), patterns)
}

pub fn classify_components(components: &UrlComponents, patterns: &PatternSet) -> Category {
    patterns
        .first_match(&components.path)
        .unwrap_or(Category::Other)
}

/// Pages grouped by category, each group in ingestion order.
#[derive(Debug, Clone, Default)]
pub struct CategorizedPages {
    groups: BTreeMap<Category, Vec<UrlRecord>>,
}

impl CategorizedPages {
    pub fn insert(&mut self, category: Category, record: UrlRecord) {
        self.groups.entry(category).or_default().push(record);
    }

    pub fn get(&self, category: Category) -> &[UrlRecord] {
        self.groups
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn count(&self, category: Category) -> usize {
        self.get(category).len()
    }

    /// Counts for every category, including empty ones.
    pub fn counts(&self) -> Vec<(Category, usize)> {
        Category::ALL
            .iter()
            .map(|category| (*category, self.count(*category)))
            .collect()
    }

    pub fn total(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, &[UrlRecord])> {
        self.groups.iter().map(|(c, pages)| (*c, pages.as_slice()))
    }
}

/// Classify a whole URL table.
pub fn categorize(records: Vec<UrlRecord>, patterns: &PatternSet) -> CategorizedPages {
    let mut pages = CategorizedPages::default();
    for record in records {
        let category = classify_components(&record.components, patterns);
        debug!("{} -> {}", record.address, category);
        pages.insert(category, record);
    }

    let summary = pages
        .counts()
        .iter()
        .map(|(c, n)| format!("{}={}", c, n))
        .collect::<Vec<_>>()
        .join(" ");
    info!("Categorized {} URLs: {}", pages.total(), summary);
    pages
}
