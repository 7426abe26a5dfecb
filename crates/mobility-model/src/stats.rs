use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::category::CareerCategory;

/// Counters reported at the end of a run.
///
/// Every input row ends up either in `rejected_rows` or in one author's
/// sequence, so nothing is dropped without being counted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    /// Data rows read from the input.
    pub total_rows: u64,
    /// Rows dropped by normalization.
    pub rejected_rows: u64,
    /// Rejected rows per reason key.
    pub rejections_by_reason: BTreeMap<String, u64>,
    /// Career sequences produced.
    pub authors: u64,
    /// Sequences whose first country is the origin.
    pub origin_authors: u64,
    /// Origin sequences left out of the cohorts by the start-year floor.
    pub below_floor_authors: u64,
    /// Classified origin sequences per category.
    pub category_distribution: BTreeMap<CareerCategory, u64>,
}

impl RunStats {
    pub fn accepted_rows(&self) -> u64 {
        self.total_rows.saturating_sub(self.rejected_rows)
    }

    pub fn classified_authors(&self) -> u64 {
        self.category_distribution.values().sum()
    }
}
