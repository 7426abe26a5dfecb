//! Merge thesis evidence onto finished career sequences.

use serde::{Deserialize, Serialize};
use tracing::{info, info_span, warn};

use mobility_model::{CareerSequence, DEFAULT_ORIGIN};

use crate::evidence::{ThesisConfidence, ThesisEvidence, assess, rank_candidates};
use crate::payload::{AuthorProfile, ThesisCandidate};
use crate::source::{AuthorDirectory, ThesisQuery, ThesisRegistry};

/// Options for an enrichment pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichOptions {
    pub origin: String,
    /// Skip sequences that do not start in the origin.
    pub origin_only: bool,
}

impl Default for EnrichOptions {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN.to_string(),
            origin_only: false,
        }
    }
}

impl EnrichOptions {
    #[must_use]
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = origin.into();
        self
    }

    #[must_use]
    pub fn with_origin_only(mut self, origin_only: bool) -> Self {
        self.origin_only = origin_only;
        self
    }
}

/// One sequence with its enrichment attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedSequence {
    pub author_id: String,
    pub display_name: Option<String>,
    pub started_in_origin: bool,
    pub ever_in_origin: bool,
    /// Country sequence in its serialized form.
    pub country_sequence: String,
    pub has_potential_thesis: bool,
    pub thesis_confidence: ThesisConfidence,
    pub thesis: Option<ThesisCandidate>,
    /// Score of the best ranked candidate, when any candidate scored.
    pub best_match_score: Option<u32>,
}

/// Counters for an enrichment pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichStats {
    /// Sequences enriched.
    pub total: u64,
    /// Profiles with a display name.
    pub profiles_found: u64,
    /// Registry searches that returned a result.
    pub successful_searches: u64,
    /// Searches with at least one candidate.
    pub potential_matches: u64,
    /// Searches with an author-role candidate.
    pub confident_matches: u64,
    /// Origin starters with at least one candidate.
    pub origin_starters_with_thesis: u64,
    pub ever_in_origin: u64,
    /// Collaborator failures, each leaving one author without evidence.
    pub lookup_failures: u64,
}

/// Enriched records plus counters.
#[derive(Debug, Clone)]
pub struct EnrichOutcome {
    pub records: Vec<EnrichedSequence>,
    pub stats: EnrichStats,
}

/// Looks authors up in a directory, then searches a registry by name.
pub struct Enricher<D, R> {
    directory: D,
    registry: R,
    options: EnrichOptions,
}

impl<D: AuthorDirectory, R: ThesisRegistry> Enricher<D, R> {
    pub fn new(directory: D, registry: R, options: EnrichOptions) -> Self {
        Self {
            directory,
            registry,
            options,
        }
    }

    /// Enrich `sequences` in order.
    pub fn enrich(&self, sequences: &[CareerSequence]) -> EnrichOutcome {
        let span = info_span!("enrich", sequences = sequences.len(), origin = %self.options.origin);
        let _guard = span.enter();

        let mut stats = EnrichStats::default();
        let records: Vec<EnrichedSequence> = sequences
            .iter()
            .filter(|sequence| {
                !self.options.origin_only || sequence.started_in(&self.options.origin)
            })
            .map(|sequence| self.enrich_one(sequence, &mut stats))
            .collect();

        info!(
            total = stats.total,
            profiles = stats.profiles_found,
            searches = stats.successful_searches,
            potential = stats.potential_matches,
            confident = stats.confident_matches,
            failures = stats.lookup_failures,
            "enrichment complete"
        );
        EnrichOutcome { records, stats }
    }

    fn enrich_one(&self, sequence: &CareerSequence, stats: &mut EnrichStats) -> EnrichedSequence {
        let started_in_origin = sequence.started_in(&self.options.origin);
        let ever_in_origin = sequence.ever_in(&self.options.origin);
        stats.total += 1;
        if ever_in_origin {
            stats.ever_in_origin += 1;
        }

        let mut record = EnrichedSequence {
            author_id: sequence.author_id().to_string(),
            display_name: None,
            started_in_origin,
            ever_in_origin,
            country_sequence: sequence.countries_joined(),
            has_potential_thesis: false,
            thesis_confidence: ThesisConfidence::None,
            thesis: None,
            best_match_score: None,
        };

        let Some(profile) = self.profile(sequence.author_id(), stats) else {
            return record;
        };
        record.display_name.clone_from(&profile.display_name);
        let Some(display_name) = profile.display_name.clone() else {
            return record;
        };

        let query = ThesisQuery {
            author_id: record.author_id.clone(),
            display_name,
        };
        let candidates = match self.registry.search(&query) {
            Ok(Some(candidates)) => candidates,
            Ok(None) => return record,
            Err(err) => {
                warn!(author_id = %record.author_id, error = %err, "thesis search failed");
                stats.lookup_failures += 1;
                return record;
            }
        };
        stats.successful_searches += 1;

        let ThesisEvidence { confidence, thesis } = assess(&candidates);
        record.has_potential_thesis = confidence != ThesisConfidence::None;
        record.thesis_confidence = confidence;
        record.thesis = thesis;
        let authors: Vec<ThesisCandidate> = candidates
            .iter()
            .filter(|candidate| candidate.is_author())
            .cloned()
            .collect();
        record.best_match_score = rank_candidates(&profile, &authors)
            .first()
            .map(|ranked| ranked.score);

        if record.has_potential_thesis {
            stats.potential_matches += 1;
            if started_in_origin {
                stats.origin_starters_with_thesis += 1;
            }
        }
        if confidence == ThesisConfidence::High {
            stats.confident_matches += 1;
        }
        record
    }

    fn profile(&self, author_id: &str, stats: &mut EnrichStats) -> Option<AuthorProfile> {
        match self.directory.lookup(author_id) {
            Ok(Some(profile)) => {
                if profile.display_name.is_some() {
                    stats.profiles_found += 1;
                }
                Some(profile)
            }
            Ok(None) => None,
            Err(err) => {
                warn!(author_id, error = %err, "author lookup failed");
                stats.lookup_failures += 1;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use mobility_model::{CareerEntry, CountryField};

    use crate::error::{EnrichError, Result};

    #[derive(Default)]
    struct MemoryDirectory(HashMap<String, AuthorProfile>);

    impl AuthorDirectory for MemoryDirectory {
        fn lookup(&self, author_id: &str) -> Result<Option<AuthorProfile>> {
            if author_id == "broken" {
                return Err(EnrichError::Io {
                    path: "broken.json".into(),
                    source: std::io::Error::other("unreadable"),
                });
            }
            Ok(self.0.get(author_id).cloned())
        }
    }

    #[derive(Default)]
    struct MemoryRegistry(HashMap<String, Vec<ThesisCandidate>>);

    impl ThesisRegistry for MemoryRegistry {
        fn search(&self, query: &ThesisQuery) -> Result<Option<Vec<ThesisCandidate>>> {
            Ok(self.0.get(&query.display_name).cloned())
        }
    }

    fn sequence(author_id: &str, countries: &[&str]) -> CareerSequence {
        let entries = countries
            .iter()
            .enumerate()
            .map(|(offset, value)| CareerEntry {
                year: 2000 + offset as i32,
                countries: CountryField::parse_serialized(value),
            })
            .collect();
        CareerSequence::new(author_id, entries).unwrap()
    }

    fn profile(author_id: &str, name: &str) -> AuthorProfile {
        AuthorProfile {
            author_id: author_id.to_string(),
            display_name: Some(name.to_string()),
            institution: Some("Paris".to_string()),
            concepts: vec!["physics".to_string()],
        }
    }

    fn enricher(options: EnrichOptions) -> Enricher<MemoryDirectory, MemoryRegistry> {
        let mut directory = MemoryDirectory::default();
        directory.0.insert("A1".into(), profile("A1", "Ada"));
        directory.0.insert("A2".into(), profile("A2", "Bob"));
        let mut registry = MemoryRegistry::default();
        registry.0.insert(
            "Ada".into(),
            vec![ThesisCandidate {
                name: "Ada".to_string(),
                roles: vec!["Auteur / Autrice".to_string()],
                disciplines: vec!["Physics".to_string()],
                establishments: vec!["Université Paris".to_string()],
                ..ThesisCandidate::default()
            }],
        );
        registry.0.insert("Bob".into(), Vec::new());
        Enricher::new(directory, registry, options)
    }

    #[test]
    fn merges_evidence_onto_sequences() {
        let sequences = vec![
            sequence("A1", &["FR", "US"]),
            sequence("A2", &["US", "FR"]),
            sequence("A3", &["DE"]),
        ];
        let outcome = enricher(EnrichOptions::default()).enrich(&sequences);
        assert_eq!(outcome.records.len(), 3);

        let a1 = &outcome.records[0];
        assert!(a1.started_in_origin);
        assert_eq!(a1.thesis_confidence, ThesisConfidence::High);
        assert_eq!(a1.best_match_score, Some(15));
        assert_eq!(a1.country_sequence, "FR -> US");

        let a2 = &outcome.records[1];
        assert!(!a2.started_in_origin);
        assert!(a2.ever_in_origin);
        assert!(!a2.has_potential_thesis);

        assert_eq!(outcome.records[2].display_name, None);
        assert_eq!(outcome.stats.successful_searches, 2);
        assert_eq!(outcome.stats.confident_matches, 1);
        assert_eq!(outcome.stats.origin_starters_with_thesis, 1);
        assert_eq!(outcome.stats.ever_in_origin, 2);
    }

    #[test]
    fn origin_only_skips_other_starters() {
        let sequences = vec![sequence("A1", &["FR"]), sequence("A2", &["US"])];
        let options = EnrichOptions::default().with_origin_only(true);
        let outcome = enricher(options).enrich(&sequences);
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].author_id, "A1");
    }

    #[test]
    fn match_score_ignores_non_author_roles() {
        let director = ThesisCandidate {
            name: "Eve".to_string(),
            roles: vec!["Directeur / Directrice de thèse".to_string()],
            disciplines: vec!["Physics".to_string()],
            establishments: vec!["Université Paris".to_string()],
            ..ThesisCandidate::default()
        };
        let author = ThesisCandidate {
            name: "Eve".to_string(),
            roles: vec!["Auteur / Autrice".to_string()],
            disciplines: vec!["Physics".to_string()],
            ..ThesisCandidate::default()
        };
        let mut directory = MemoryDirectory::default();
        directory.0.insert("E1".into(), profile("E1", "Eve"));
        directory.0.insert("Z1".into(), profile("Z1", "Zoe"));
        let mut registry = MemoryRegistry::default();
        registry.0.insert("Eve".into(), vec![director.clone(), author]);
        registry.0.insert("Zoe".into(), vec![director]);
        let enricher = Enricher::new(directory, registry, EnrichOptions::default());

        let outcome = enricher.enrich(&[sequence("E1", &["FR"]), sequence("Z1", &["FR"])]);
        assert_eq!(outcome.records[0].best_match_score, Some(5));
        assert_eq!(outcome.records[1].best_match_score, None);
    }

    #[test]
    fn lookup_failure_leaves_author_without_evidence() {
        let outcome = enricher(EnrichOptions::default()).enrich(&[sequence("broken", &["FR"])]);
        assert_eq!(outcome.stats.lookup_failures, 1);
        assert_eq!(outcome.records[0].thesis_confidence, ThesisConfidence::None);
    }
}
