//! Cohort buckets: category counts per career start year.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::category::CareerCategory;

/// Category counts for all authors whose careers start in one year.
///
/// Every category key is present, with zero when nobody fell into it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CohortBucket {
    pub start_year: i32,
    pub category_counts: BTreeMap<CareerCategory, u64>,
}

impl CohortBucket {
    pub fn new(start_year: i32) -> Self {
        Self {
            start_year,
            category_counts: CareerCategory::ALL
                .into_iter()
                .map(|category| (category, 0))
                .collect(),
        }
    }

    pub fn record(&mut self, category: CareerCategory) {
        *self.category_counts.entry(category).or_insert(0) += 1;
    }

    pub fn count(&self, category: CareerCategory) -> u64 {
        self.category_counts.get(&category).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.category_counts.values().sum()
    }

    /// Share of `category` in this cohort, in percent.
    pub fn percentage(&self, category: CareerCategory) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            self.count(category) as f64 / total as f64 * 100.0
        }
    }

    /// All six shares in category order.
    pub fn percentages(&self) -> BTreeMap<CareerCategory, f64> {
        CareerCategory::ALL
            .into_iter()
            .map(|category| (category, self.percentage(category)))
            .collect()
    }
}

/// Long-form row: one (start year, category) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CohortShare {
    pub start_year: i32,
    pub category: CareerCategory,
    pub count: u64,
    pub percentage: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_bucket_lists_every_category() {
        let bucket = CohortBucket::new(2001);
        assert_eq!(bucket.category_counts.len(), CareerCategory::ALL.len());
        assert_eq!(bucket.total(), 0);
        assert_eq!(bucket.percentage(CareerCategory::StayedInOrigin), 0.0);
    }

    #[test]
    fn percentages_sum_to_hundred() {
        let mut bucket = CohortBucket::new(2001);
        bucket.record(CareerCategory::StayedInOrigin);
        bucket.record(CareerCategory::StayedInOrigin);
        bucket.record(CareerCategory::ExpatriateToHub);
        let shares = bucket.percentages();
        let sum: f64 = shares.values().sum();
        assert!((sum - 100.0).abs() < 1e-9);
        assert!((shares[&CareerCategory::StayedInOrigin] - 200.0 / 3.0).abs() < 1e-9);
        assert_eq!(shares[&CareerCategory::ComplexOngoing], 0.0);
    }
}
