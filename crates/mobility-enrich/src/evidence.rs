//! Thesis evidence assessment and candidate ranking.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::payload::{AuthorProfile, ThesisCandidate};

/// Points for an institution match.
pub const INSTITUTION_SCORE: u32 = 10;
/// Points per matching discipline.
pub const DISCIPLINE_SCORE: u32 = 5;

/// How strongly the registry supports a thesis for an author.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThesisConfidence {
    /// No search result, or a search with no candidates.
    #[default]
    None,
    /// Candidates exist but none holds the author role.
    Medium,
    /// A candidate holds the author role.
    High,
}

impl ThesisConfidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThesisConfidence::None => "none",
            ThesisConfidence::Medium => "medium",
            ThesisConfidence::High => "high",
        }
    }
}

impl fmt::Display for ThesisConfidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of assessing one search result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThesisEvidence {
    pub confidence: ThesisConfidence,
    /// First candidate holding the author role, for high confidence.
    pub thesis: Option<ThesisCandidate>,
}

impl ThesisEvidence {
    /// True when the search returned at least one candidate.
    pub fn has_potential_thesis(&self) -> bool {
        self.confidence != ThesisConfidence::None
    }
}

/// Assess registry candidates for one author.
pub fn assess(candidates: &[ThesisCandidate]) -> ThesisEvidence {
    if candidates.is_empty() {
        return ThesisEvidence::default();
    }
    match candidates.iter().find(|candidate| candidate.is_author()) {
        Some(candidate) => ThesisEvidence {
            confidence: ThesisConfidence::High,
            thesis: Some(candidate.clone()),
        },
        None => ThesisEvidence {
            confidence: ThesisConfidence::Medium,
            thesis: None,
        },
    }
}

/// A candidate with its match score against a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedCandidate<'a> {
    pub candidate: &'a ThesisCandidate,
    pub score: u32,
    /// Human-readable reasons for the score.
    pub evidence: Vec<String>,
}

/// Score candidates against `profile`, best first.
///
/// The institution scores when it is a case-insensitive substring of the
/// candidate's establishments. Each profile concept equal to a candidate
/// discipline scores separately. Unscored candidates are dropped and equal
/// scores keep their input order.
pub fn rank_candidates<'a>(
    profile: &AuthorProfile,
    candidates: &'a [ThesisCandidate],
) -> Vec<RankedCandidate<'a>> {
    let institution = profile
        .institution
        .as_deref()
        .map(str::to_lowercase)
        .filter(|name| !name.is_empty());

    let mut ranked: Vec<RankedCandidate<'a>> = candidates
        .iter()
        .filter_map(|candidate| {
            let mut score = 0;
            let mut evidence = Vec::new();

            let establishments = candidate.establishments.join(", ").to_lowercase();
            if let Some(institution) = &institution
                && !establishments.is_empty()
                && establishments.contains(institution.as_str())
            {
                score += INSTITUTION_SCORE;
                evidence.push(format!(
                    "institution match on '{}'",
                    profile.institution.as_deref().unwrap_or_default()
                ));
            }

            let disciplines: Vec<String> = candidate
                .disciplines
                .iter()
                .map(|discipline| discipline.to_lowercase())
                .collect();
            for concept in &profile.concepts {
                if disciplines.iter().any(|discipline| discipline == concept) {
                    score += DISCIPLINE_SCORE;
                    evidence.push(format!("discipline match on '{concept}'"));
                }
            }

            (score > 0).then_some(RankedCandidate {
                candidate,
                score,
                evidence,
            })
        })
        .collect();
    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(name: &str, roles: &[&str], disciplines: &[&str], establishments: &[&str]) -> ThesisCandidate {
        ThesisCandidate {
            name: name.to_string(),
            roles: roles.iter().map(|s| s.to_string()).collect(),
            disciplines: disciplines.iter().map(|s| s.to_string()).collect(),
            establishments: establishments.iter().map(|s| s.to_string()).collect(),
            ..ThesisCandidate::default()
        }
    }

    fn profile() -> AuthorProfile {
        AuthorProfile {
            author_id: "A1".to_string(),
            display_name: Some("Ada Lovelace".to_string()),
            institution: Some("Université de Lyon".to_string()),
            concepts: vec!["mathematics".to_string(), "physics".to_string()],
        }
    }

    #[test]
    fn confidence_levels() {
        assert_eq!(assess(&[]).confidence, ThesisConfidence::None);
        let medium = assess(&[candidate("X", &["Directeur / Directrice"], &[], &[])]);
        assert_eq!(medium.confidence, ThesisConfidence::Medium);
        assert!(medium.has_potential_thesis());
        assert!(medium.thesis.is_none());

        let high = assess(&[
            candidate("X", &["Rapporteur"], &[], &[]),
            candidate("Y", &["Auteur / Autrice"], &[], &[]),
        ]);
        assert_eq!(high.confidence, ThesisConfidence::High);
        assert_eq!(high.thesis.unwrap().name, "Y");
    }

    #[test]
    fn ranks_by_score() {
        let candidates = vec![
            candidate("none", &[], &["Chimie"], &["Paris"]),
            candidate("discipline", &[], &["Mathematics"], &["Paris"]),
            candidate("both", &[], &["Physics", "Mathematics"], &["Université de Lyon, Lyon"]),
            candidate("institution", &[], &[], &["UNIVERSITÉ DE LYON"]),
        ];
        let ranked = rank_candidates(&profile(), &candidates);
        let names: Vec<(&str, u32)> = ranked
            .iter()
            .map(|entry| (entry.candidate.name.as_str(), entry.score))
            .collect();
        assert_eq!(
            names,
            vec![("both", 20), ("institution", 10), ("discipline", 5)]
        );
        assert_eq!(ranked[0].evidence.len(), 3);
    }

    #[test]
    fn equal_scores_keep_input_order() {
        let candidates = vec![
            candidate("first", &[], &["Physics"], &[]),
            candidate("second", &[], &["Mathematics"], &[]),
        ];
        let ranked = rank_candidates(&profile(), &candidates);
        assert_eq!(ranked[0].candidate.name, "first");
        assert_eq!(ranked[1].candidate.name, "second");
    }
}
