use crate::rules::{Placement, Priority};
use serde::{Deserialize, Serialize};

/// One recommended internal link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkRecord {
    pub source_page: String,
    pub target_page: String,
    pub link_type: String,
    pub anchor_text: String,
    pub placement: Placement,
    pub priority: Priority,
    /// 1-based rank, set only for featured-section placements.
    #[serde(default)]
    pub position: Option<usize>,
    /// Informational similarity score; never used for ranking.
    #[serde(default)]
    pub relevance_score: Option<f64>,
}
