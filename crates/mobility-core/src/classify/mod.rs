//! Trajectory classification for origin-starting career sequences.

mod rules;

pub use rules::{CLASSIFICATION_RULES, ClassificationRule, TrajectoryFacts, first_match};

use mobility_model::{CareerCategory, CareerSequence, DEFAULT_HUB, DEFAULT_ORIGIN};
use thiserror::Error;

/// Errors raised by the classifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifyError {
    /// The sequence does not start in the configured origin country.
    #[error(
        "sequence for author {author_id} starts in {}, expected {expected}",
        .found.as_deref().unwrap_or("no country")
    )]
    PreconditionViolated {
        author_id: String,
        expected: String,
        found: Option<String>,
    },
}

/// Origin and hub country codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifierConfig {
    pub origin: String,
    pub hub: String,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN.to_string(),
            hub: DEFAULT_HUB.to_string(),
        }
    }
}

impl ClassifierConfig {
    #[must_use]
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = origin.into();
        self
    }

    #[must_use]
    pub fn with_hub(mut self, hub: impl Into<String>) -> Self {
        self.hub = hub.into();
        self
    }
}

/// Applies [`CLASSIFICATION_RULES`] to finished sequences.
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    config: ClassifierConfig,
}

impl Classifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Assign the category of `sequence`.
    ///
    /// The sequence must start in the origin country.
    pub fn classify(&self, sequence: &CareerSequence) -> Result<CareerCategory, ClassifyError> {
        self.explain(sequence).map(|rule| rule.category)
    }

    /// The rule that decides the category of `sequence`.
    pub fn explain(
        &self,
        sequence: &CareerSequence,
    ) -> Result<&'static ClassificationRule, ClassifyError> {
        self.check_origin(sequence)?;
        let facts = TrajectoryFacts::gather(sequence, &self.config.origin, &self.config.hub);
        Ok(first_match(&facts))
    }

    fn check_origin(&self, sequence: &CareerSequence) -> Result<(), ClassifyError> {
        let found = sequence.first_country();
        if found == Some(self.config.origin.as_str()) {
            return Ok(());
        }
        Err(ClassifyError::PreconditionViolated {
            author_id: sequence.author_id().to_string(),
            expected: self.config.origin.clone(),
            found: found.map(str::to_string),
        })
    }
}

/// Classify one sequence with explicit origin and hub codes.
pub fn classify(
    sequence: &CareerSequence,
    origin: &str,
    hub: &str,
) -> Result<CareerCategory, ClassifyError> {
    Classifier::new(ClassifierConfig::default().with_origin(origin).with_hub(hub)).classify(sequence)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mobility_model::{CareerEntry, CountryField};

    fn sequence(countries: &[&str]) -> CareerSequence {
        let entries = countries
            .iter()
            .enumerate()
            .map(|(offset, value)| CareerEntry {
                year: 2001 + offset as i32,
                countries: CountryField::parse_serialized(value),
            })
            .collect();
        CareerSequence::new("A1", entries).unwrap()
    }

    fn category(countries: &[&str]) -> CareerCategory {
        classify(&sequence(countries), "FR", "US").unwrap()
    }

    #[test]
    fn single_origin_entry_stays() {
        assert_eq!(category(&["FR"]), CareerCategory::StayedInOrigin);
        assert_eq!(category(&["FR", "FR", "FR"]), CareerCategory::StayedInOrigin);
    }

    #[test]
    fn return_through_hub() {
        assert_eq!(category(&["FR", "US", "FR"]), CareerCategory::RoundTripViaHub);
        assert_eq!(
            category(&["FR", "DE,US", "GB", "FR"]),
            CareerCategory::RoundTripViaHub
        );
    }

    #[test]
    fn return_without_hub() {
        assert_eq!(category(&["FR", "DE", "FR"]), CareerCategory::RoundTripDirect);
    }

    #[test]
    fn expatriates() {
        assert_eq!(category(&["FR", "US"]), CareerCategory::ExpatriateToHub);
        assert_eq!(category(&["FR", "DE"]), CareerCategory::ExpatriateElsewhere);
        assert_eq!(category(&["FR", "<empty>"]), CareerCategory::ExpatriateElsewhere);
        assert_eq!(category(&["FR", "??,x1"]), CareerCategory::ExpatriateElsewhere);
    }

    #[test]
    fn mixed_last_entry_is_complex() {
        assert_eq!(category(&["FR", "FR,US"]), CareerCategory::ComplexOngoing);
        assert_eq!(category(&["FR", "DE,FR"]), CareerCategory::ComplexOngoing);
    }

    #[test]
    fn padded_origin_still_counts_as_exact() {
        assert_eq!(category(&["FR", "FR "]), CareerCategory::StayedInOrigin);
        assert_eq!(category(&["FR", "DE", " FR"]), CareerCategory::RoundTripDirect);
        assert_eq!(category(&["FR", "fr"]), CareerCategory::ExpatriateElsewhere);
    }

    #[test]
    fn hub_in_journey_needs_an_unpadded_token() {
        assert_eq!(category(&["FR", "DE, US", "FR"]), CareerCategory::RoundTripDirect);
        assert_eq!(category(&["FR", "DE,US ", "FR"]), CareerCategory::RoundTripViaHub);
        // The last entry is read with trimmed tokens.
        assert_eq!(category(&["FR", "DE, US"]), CareerCategory::ExpatriateToHub);
    }

    #[test]
    fn leading_placeholders_are_skipped() {
        assert_eq!(category(&["<empty>", "FR", "US"]), CareerCategory::ExpatriateToHub);
        assert_eq!(category(&["EMPTY", "FR"]), CareerCategory::RoundTripDirect);
    }

    #[test]
    fn explain_names_the_rule() {
        let classifier = Classifier::default();
        let rule = classifier.explain(&sequence(&["FR", "US", "FR"])).unwrap();
        assert_eq!(rule.id, "R2-return-via-hub");
    }

    #[test]
    fn custom_origin_and_hub() {
        let classifier = Classifier::new(ClassifierConfig::default().with_origin("DE").with_hub("GB"));
        let category = classifier.classify(&sequence(&["DE", "GB"])).unwrap();
        assert_eq!(category, CareerCategory::ExpatriateToHub);
    }

    #[test]
    fn foreign_start_is_a_precondition_error() {
        let err = classify(&sequence(&["US", "FR"]), "FR", "US").unwrap_err();
        assert_eq!(
            err,
            ClassifyError::PreconditionViolated {
                author_id: "A1".to_string(),
                expected: "FR".to_string(),
                found: Some("US".to_string()),
            }
        );
        let err = classify(&sequence(&["<empty>"]), "FR", "US").unwrap_err();
        assert!(err.to_string().contains("no country"));
    }

    #[test]
    fn repeated_calls_agree() {
        let seq = sequence(&["FR", "DE,FR", "US"]);
        let first = classify(&seq, "FR", "US").unwrap();
        for _ in 0..10 {
            assert_eq!(classify(&seq, "FR", "US").unwrap(), first);
        }
    }
}
