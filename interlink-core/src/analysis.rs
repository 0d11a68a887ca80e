use crate::link::LinkRecord;
use crate::rules::Priority;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLinkCount {
    pub page: String,
    pub links: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelCount {
    pub label: String,
    pub count: usize,
}

/// Shape of a generated link graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkDistribution {
    pub top_outgoing: Vec<PageLinkCount>,
    pub top_incoming: Vec<PageLinkCount>,
    /// Pages that link out but receive nothing.
    pub no_incoming: Vec<String>,
    /// Pages that receive links but link nowhere.
    pub no_outgoing: Vec<String>,
    pub by_link_type: Vec<LabelCount>,
    pub by_priority: Vec<LabelCount>,
}

pub fn analyze_links(links: &[LinkRecord], top_n: usize) -> LinkDistribution {
    let mut outgoing: HashMap<&str, usize> = HashMap::new();
    let mut incoming: HashMap<&str, usize> = HashMap::new();
    let mut by_type: BTreeMap<&str, usize> = BTreeMap::new();
    let mut by_priority: BTreeMap<Priority, usize> = BTreeMap::new();
    let mut source_order: Vec<&str> = Vec::new();
    let mut target_order: Vec<&str> = Vec::new();

    for link in links {
        let out = outgoing.entry(&link.source_page).or_insert(0);
        if *out == 0 {
            source_order.push(&link.source_page);
        }
        *out += 1;

        let inc = incoming.entry(&link.target_page).or_insert(0);
        if *inc == 0 {
            target_order.push(&link.target_page);
        }
        *inc += 1;

        *by_type.entry(&link.link_type).or_insert(0) += 1;
        *by_priority.entry(link.priority).or_insert(0) += 1;
    }

    let targets: HashSet<&str> = target_order.iter().copied().collect();
    let sources: HashSet<&str> = source_order.iter().copied().collect();

    LinkDistribution {
        top_outgoing: top_pages(&outgoing, top_n),
        top_incoming: top_pages(&incoming, top_n),
        no_incoming: source_order
            .iter()
            .filter(|page| !targets.contains(*page))
            .map(|page| page.to_string())
            .collect(),
        no_outgoing: target_order
            .iter()
            .filter(|page| !sources.contains(*page))
            .map(|page| page.to_string())
            .collect(),
        by_link_type: by_type
            .into_iter()
            .map(|(label, count)| LabelCount {
                label: label.to_string(),
                count,
            })
            .collect(),
        by_priority: by_priority
            .into_iter()
            .map(|(priority, count)| LabelCount {
                label: priority.to_string(),
                count,
            })
            .collect(),
    }
}

fn top_pages(counts: &HashMap<&str, usize>, top_n: usize) -> Vec<PageLinkCount> {
    let mut pages: Vec<PageLinkCount> = counts
        .iter()
        .map(|(page, links)| PageLinkCount {
            page: page.to_string(),
            links: *links,
        })
        .collect();
    pages.sort_by(|a, b| b.links.cmp(&a.links).then_with(|| a.page.cmp(&b.page)));
    pages.truncate(top_n);
    pages
}
