use crate::anchor::anchor_text;
use crate::classify::CategorizedPages;
use crate::link::LinkRecord;
use crate::matching::StrategyRegistry;
use crate::record::UrlRecord;
use crate::rules::{LinkRule, default_rules};
use crate::similarity::relevance_score;
use rand::Rng;
use rand::seq::index;
use tracing::{debug, info};

pub const DEFAULT_MAX_LINKS: usize = 1000;

/// Turns categorized pages into link records by walking the rule list.
pub struct LinkEngine {
    rules: Vec<LinkRule>,
    strategies: StrategyRegistry,
    max_links: usize,
    content_similarity: bool,
}

impl LinkEngine {
    pub fn new() -> Self {
        Self {
            rules: default_rules(),
            strategies: StrategyRegistry::default(),
            max_links: DEFAULT_MAX_LINKS,
            content_similarity: false,
        }
    }

    pub fn with_rules(mut self, rules: Vec<LinkRule>) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_strategies(mut self, strategies: StrategyRegistry) -> Self {
        self.strategies = strategies;
        self
    }

    /// Global cap across all rules.
    pub fn with_max_links(mut self, max_links: usize) -> Self {
        self.max_links = max_links;
        self
    }

    pub fn with_content_similarity(mut self, enabled: bool) -> Self {
        self.content_similarity = enabled;
        self
    }

    pub fn rules(&self) -> &[LinkRule] {
        &self.rules
    }

    pub fn max_links(&self) -> usize {
        self.max_links
    }

    /// Generate link records. Rules run in list order, sources in ingestion order;
    /// generation stops as soon as the global cap is reached.
    pub fn generate<R: Rng + ?Sized>(&self, pages: &CategorizedPages, rng: &mut R) -> Vec<LinkRecord> {
        let mut links: Vec<LinkRecord> = Vec::new();

        'rules: for rule in &self.rules {
            let sources = pages.get(rule.source);
            let targets = pages.get(rule.target);
            if sources.is_empty() || targets.is_empty() {
                debug!(
                    "Skipping {}: {} sources, {} targets",
                    rule.link_type(),
                    sources.len(),
                    targets.len()
                );
                continue;
            }

            let before = links.len();
            for source in sources {
                for (rank, target) in self.candidates(rule, source, targets, rng).into_iter().enumerate() {
                    if links.len() >= self.max_links {
                        info!("Link cap of {} reached during {}", self.max_links, rule.link_type());
                        break 'rules;
                    }
                    links.push(self.build_record(rule, source, target, rank, rng));
                }
            }
            debug!("{} produced {} links", rule.link_type(), links.len() - before);
        }

        info!("Generated {} links from {} rules", links.len(), self.rules.len());
        links
    }

    /// Targets for one source page, at most `rule.max_targets` of them.
    fn candidates<'a, R: Rng + ?Sized>(
        &self,
        rule: &LinkRule,
        source: &UrlRecord,
        targets: &'a [UrlRecord],
        rng: &mut R,
    ) -> Vec<&'a UrlRecord> {
        let mut selected: Vec<&UrlRecord> = match self.strategies.get(rule.source, rule.target) {
            Some(strategy) => targets
                .iter()
                .filter(|target| strategy(source, target))
                .collect(),
            None => {
                let pool: Vec<&UrlRecord> = targets
                    .iter()
                    .filter(|target| target.address != source.address)
                    .collect();
                let amount = rule.max_targets.min(pool.len());
                index::sample(rng, pool.len(), amount)
                    .into_iter()
                    .map(|i| pool[i])
                    .collect()
            }
        };
        selected.truncate(rule.max_targets);
        selected
    }

    fn build_record<R: Rng + ?Sized>(
        &self,
        rule: &LinkRule,
        source: &UrlRecord,
        target: &UrlRecord,
        rank: usize,
        rng: &mut R,
    ) -> LinkRecord {
        LinkRecord {
            source_page: source.address.clone(),
            target_page: target.address.clone(),
            link_type: rule.link_type(),
            anchor_text: anchor_text(target, rule.target, rng),
            placement: rule.placement,
            priority: rule.priority,
            position: rule.placement.is_ranked().then_some(rank + 1),
            relevance_score: self
                .content_similarity
                .then(|| relevance_score(source, target)),
        }
    }
}

impl Default for LinkEngine {
    fn default() -> Self {
        Self::new()
    }
}
