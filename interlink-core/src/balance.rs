//! Post-generation smoothing of link volume.
//!
//! Pages that hand out far more links than they receive lose a random share of their
//! low-priority outgoing links. This is a heuristic: depending on the draw it can
//! under- or over-correct.

use crate::link::LinkRecord;
use crate::rules::Priority;
use rand::Rng;
use rand::seq::index;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BalanceOptions {
    /// A page is over-linked when outgoing > ratio * incoming...
    pub ratio: f64,
    /// ...and outgoing > min_outgoing.
    pub min_outgoing: usize,
    /// Share of the page's low-priority links to drop, in `[0, 1]`.
    pub removal_fraction: f64,
}

impl Default for BalanceOptions {
    fn default() -> Self {
        Self {
            ratio: 3.0,
            min_outgoing: 5,
            removal_fraction: 0.3,
        }
    }
}

/// Drop part of the low-priority links of over-linked source pages. Survivors keep
/// their order.
pub fn balance_links<R: Rng + ?Sized>(
    links: Vec<LinkRecord>,
    options: &BalanceOptions,
    rng: &mut R,
) -> Vec<LinkRecord> {
    let mut outgoing: HashMap<&str, usize> = HashMap::new();
    let mut incoming: HashMap<&str, usize> = HashMap::new();
    let mut sources: Vec<&str> = Vec::new();

    for link in &links {
        let count = outgoing.entry(link.source_page.as_str()).or_insert(0);
        if *count == 0 {
            sources.push(link.source_page.as_str());
        }
        *count += 1;
        *incoming.entry(link.target_page.as_str()).or_insert(0) += 1;
    }

    let fraction = options.removal_fraction.clamp(0.0, 1.0);
    let mut removed: HashSet<usize> = HashSet::new();

    for source in sources {
        let out = outgoing[source];
        let inc = incoming.get(source).copied().unwrap_or(0);
        if (out as f64) <= options.ratio * inc as f64 || out <= options.min_outgoing {
            continue;
        }

        let low: Vec<usize> = links
            .iter()
            .enumerate()
            .filter(|(_, l)| l.source_page == source && l.priority == Priority::Low)
            .map(|(i, _)| i)
            .collect();
        let amount = ((low.len() as f64) * fraction).round() as usize;
        let amount = amount.min(low.len());
        if amount == 0 {
            continue;
        }

        debug!(
            "Balancing {}: {} out / {} in, dropping {} of {} low-priority links",
            source,
            out,
            inc,
            amount,
            low.len()
        );
        removed.extend(index::sample(rng, low.len(), amount).into_iter().map(|i| low[i]));
    }

    if removed.is_empty() {
        return links;
    }

    links
        .into_iter()
        .enumerate()
        .filter(|(i, _)| !removed.contains(i))
        .map(|(_, link)| link)
        .collect()
}
