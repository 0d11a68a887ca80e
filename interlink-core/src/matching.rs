//! Hierarchical target-matching strategies.
//!
//! A strategy decides whether a target page belongs next to a source page, usually by
//! comparing leading path segments (`/{state}/{city}/...`). Category pairs without a
//! registered strategy fall back to random sampling in the engine.

use crate::category::Category;
use crate::record::UrlRecord;
use std::collections::HashMap;
use std::fmt;

/// `true` when `target` is a valid link target for `source`.
pub type MatchStrategy = fn(&UrlRecord, &UrlRecord) -> bool;

/// Both segment lists have at least `n` entries and agree on the first `n`.
pub fn shares_prefix(a: &[String], b: &[String], n: usize) -> bool {
    a.len() >= n && b.len() >= n && a[..n] == b[..n]
}

pub fn same_first_two(source: &UrlRecord, target: &UrlRecord) -> bool {
    shares_prefix(source.segments(), target.segments(), 2)
}

pub fn same_first(source: &UrlRecord, target: &UrlRecord) -> bool {
    shares_prefix(source.segments(), target.segments(), 1)
}

pub fn sibling_of_first_two(source: &UrlRecord, target: &UrlRecord) -> bool {
    source.address != target.address && same_first_two(source, target)
}

pub fn sibling_of_first(source: &UrlRecord, target: &UrlRecord) -> bool {
    source.address != target.address && same_first(source, target)
}

/// Maps (source, target) category pairs to their matching strategy.
#[derive(Clone)]
pub struct StrategyRegistry {
    strategies: HashMap<(Category, Category), MatchStrategy>,
}

impl fmt::Debug for StrategyRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut pairs: Vec<_> = self.strategies.keys().collect();
        pairs.sort();
        f.debug_struct("StrategyRegistry").field("pairs", &pairs).finish()
    }
}

impl StrategyRegistry {
    /// No strategies: every rule samples randomly.
    pub fn empty() -> Self {
        Self {
            strategies: HashMap::new(),
        }
    }

    /// The location-hierarchy strategies.
    pub fn hierarchical() -> Self {
        Self::empty()
            .with(Category::Pdp, Category::CityPlp, same_first_two)
            .with(Category::Pdp, Category::StatePlp, same_first)
            .with(Category::CityPlp, Category::Pdp, same_first_two)
            .with(Category::Pdp, Category::Pdp, sibling_of_first_two)
            .with(Category::StatePlp, Category::CityPlp, same_first)
            .with(Category::CategoryPlp, Category::CategoryPlp, sibling_of_first)
    }

    pub fn with(mut self, source: Category, target: Category, strategy: MatchStrategy) -> Self {
        self.register(source, target, strategy);
        self
    }

    pub fn register(&mut self, source: Category, target: Category, strategy: MatchStrategy) {
        self.strategies.insert((source, target), strategy);
    }

    pub fn remove(&mut self, source: Category, target: Category) -> Option<MatchStrategy> {
        self.strategies.remove(&(source, target))
    }

    pub fn get(&self, source: Category, target: Category) -> Option<MatchStrategy> {
        self.strategies.get(&(source, target)).copied()
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}

impl Default for StrategyRegistry {
    fn default() -> Self {
        Self::hierarchical()
    }
}
