//! Cohort summaries: category shares per career start year.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use mobility_model::{CareerCategory, CohortBucket, CohortShare, DEFAULT_FLOOR_YEAR};

/// Options for the cohort fold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryOptions {
    /// Exclusive lower bound on start years.
    pub floor_year: i32,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            floor_year: DEFAULT_FLOOR_YEAR,
        }
    }
}

impl SummaryOptions {
    #[must_use]
    pub fn with_floor_year(mut self, floor_year: i32) -> Self {
        self.floor_year = floor_year;
        self
    }
}

/// Category counts per start year, for start years after the floor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CohortSummary {
    pub floor_year: i32,
    pub buckets: BTreeMap<i32, CohortBucket>,
    /// Classified sequences left out because they start at or before the floor.
    pub below_floor: u64,
}

impl CohortSummary {
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn bucket(&self, start_year: i32) -> Option<&CohortBucket> {
        self.buckets.get(&start_year)
    }

    /// Percentages per start year, every category present.
    pub fn percentages(&self) -> BTreeMap<i32, BTreeMap<CareerCategory, f64>> {
        self.buckets
            .iter()
            .map(|(year, bucket)| (*year, bucket.percentages()))
            .collect()
    }

    /// Long-form rows ordered by start year, then category.
    pub fn rows(&self) -> Vec<CohortShare> {
        self.buckets
            .values()
            .flat_map(|bucket| {
                CareerCategory::ALL.into_iter().map(move |category| CohortShare {
                    start_year: bucket.start_year,
                    category,
                    count: bucket.count(category),
                    percentage: bucket.percentage(category),
                })
            })
            .collect()
    }

    /// The latest `n` cohorts, oldest first.
    pub fn tail(&self, n: usize) -> Vec<&CohortBucket> {
        let skip = self.buckets.len().saturating_sub(n);
        self.buckets.values().skip(skip).collect()
    }

    /// Category totals across all cohorts.
    pub fn overall_distribution(&self) -> BTreeMap<CareerCategory, u64> {
        let mut totals: BTreeMap<CareerCategory, u64> = CareerCategory::ALL
            .into_iter()
            .map(|category| (category, 0))
            .collect();
        for bucket in self.buckets.values() {
            for (category, count) in &bucket.category_counts {
                *totals.entry(*category).or_insert(0) += count;
            }
        }
        totals
    }

    /// Number of sequences counted in some cohort.
    pub fn total(&self) -> u64 {
        self.buckets.values().map(CohortBucket::total).sum()
    }
}

/// Folds classified sequences into a [`CohortSummary`].
#[derive(Debug, Clone)]
pub struct CohortSummarizer {
    summary: CohortSummary,
}

impl CohortSummarizer {
    pub fn new(options: SummaryOptions) -> Self {
        Self {
            summary: CohortSummary {
                floor_year: options.floor_year,
                buckets: BTreeMap::new(),
                below_floor: 0,
            },
        }
    }

    pub fn record(&mut self, start_year: i32, category: CareerCategory) {
        if start_year <= self.summary.floor_year {
            self.summary.below_floor += 1;
            return;
        }
        self.summary
            .buckets
            .entry(start_year)
            .or_insert_with(|| CohortBucket::new(start_year))
            .record(category);
    }

    pub fn finish(self) -> CohortSummary {
        self.summary
    }
}

/// Summarize `(start_year, category)` pairs with the given floor.
pub fn summarize<I>(classified: I, options: SummaryOptions) -> CohortSummary
where
    I: IntoIterator<Item = (i32, CareerCategory)>,
{
    let mut summarizer = CohortSummarizer::new(options);
    for (start_year, category) in classified {
        summarizer.record(start_year, category);
    }
    summarizer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CohortSummary {
        summarize(
            vec![
                (1985, CareerCategory::StayedInOrigin),
                (1990, CareerCategory::ExpatriateToHub),
                (1991, CareerCategory::StayedInOrigin),
                (1991, CareerCategory::ExpatriateToHub),
                (1991, CareerCategory::StayedInOrigin),
                (2005, CareerCategory::ComplexOngoing),
            ],
            SummaryOptions::default(),
        )
    }

    #[test]
    fn floor_is_exclusive() {
        let summary = sample();
        assert_eq!(summary.below_floor, 2);
        assert_eq!(summary.buckets.keys().copied().collect::<Vec<_>>(), vec![1991, 2005]);
        assert_eq!(summary.total(), 4);
    }

    #[test]
    fn every_category_is_reported() {
        let percentages = sample().percentages();
        for shares in percentages.values() {
            assert_eq!(shares.len(), CareerCategory::ALL.len());
            let sum: f64 = shares.values().sum();
            assert!((sum - 100.0).abs() < 1e-9);
        }
        assert_eq!(percentages[&2005][&CareerCategory::ComplexOngoing], 100.0);
        assert_eq!(percentages[&2005][&CareerCategory::StayedInOrigin], 0.0);
    }

    #[test]
    fn rows_are_long_form() {
        let rows = sample().rows();
        assert_eq!(rows.len(), 2 * CareerCategory::ALL.len());
        assert_eq!(rows[0].start_year, 1991);
        assert_eq!(rows[0].category, CareerCategory::StayedInOrigin);
        assert_eq!(rows[0].count, 2);
        assert_eq!(rows[6].start_year, 2005);
    }

    #[test]
    fn tail_keeps_latest_cohorts() {
        let summary = sample();
        let tail = summary.tail(1);
        assert_eq!(tail.len(), 1);
        assert_eq!(tail[0].start_year, 2005);
        assert_eq!(summary.tail(10).len(), 2);
        assert!(summary.tail(0).is_empty());
    }

    #[test]
    fn overall_distribution_sums_cohorts() {
        let totals = sample().overall_distribution();
        assert_eq!(totals[&CareerCategory::StayedInOrigin], 2);
        assert_eq!(totals[&CareerCategory::ExpatriateToHub], 1);
        assert_eq!(totals[&CareerCategory::RoundTripDirect], 0);
    }

    #[test]
    fn same_input_same_percentages() {
        assert_eq!(sample().percentages(), sample().percentages());
    }
}
