//! Directory and thesis registry payloads.
//!
//! The directory payload is an author record with a display name, the last
//! known institution and a ranked concept list. The registry payload is a
//! person search result under a `personnes` key.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Concepts kept from a directory record.
pub const TOP_CONCEPTS: usize = 5;

/// Registry role marking the author of a thesis.
pub const AUTHOR_ROLE: &str = "Auteur / Autrice";

/// Author details resolved by the directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorProfile {
    pub author_id: String,
    pub display_name: Option<String>,
    pub institution: Option<String>,
    /// Top concepts, lower-cased.
    pub concepts: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct NamedRef {
    display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DirectoryRecord {
    display_name: Option<String>,
    last_known_institution: Option<NamedRef>,
    #[serde(default)]
    x_concepts: Vec<NamedRef>,
}

impl AuthorProfile {
    /// Parse a directory record for `author_id`.
    pub fn from_json(author_id: &str, bytes: &[u8]) -> serde_json::Result<Self> {
        let record: DirectoryRecord = serde_json::from_slice(bytes)?;
        Ok(Self {
            author_id: author_id.to_string(),
            display_name: record.display_name.filter(|name| !name.trim().is_empty()),
            institution: record
                .last_known_institution
                .and_then(|institution| institution.display_name),
            concepts: record
                .x_concepts
                .into_iter()
                .take(TOP_CONCEPTS)
                .filter_map(|concept| concept.display_name)
                .map(|name| name.to_lowercase())
                .collect(),
        })
    }
}

/// One person returned by a thesis registry search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThesisCandidate {
    /// Given name and family name joined by a space.
    pub name: String,
    pub idref: Option<String>,
    pub thesis_id: Option<String>,
    pub roles: Vec<String>,
    pub disciplines: Vec<String>,
    pub establishments: Vec<String>,
}

impl ThesisCandidate {
    pub fn is_author(&self) -> bool {
        self.roles.iter().any(|role| role == AUTHOR_ROLE)
    }
}

#[derive(Debug, Deserialize)]
struct RegistryResponse {
    #[serde(default)]
    personnes: Vec<RegistryPerson>,
}

#[derive(Debug, Deserialize)]
struct RegistryPerson {
    prenom: Option<String>,
    nom: Option<String>,
    id: Option<Value>,
    these: Option<Value>,
    #[serde(default)]
    roles: Value,
    #[serde(default)]
    disciplines: Vec<String>,
    #[serde(default)]
    etablissements: Vec<String>,
}

impl From<RegistryPerson> for ThesisCandidate {
    fn from(person: RegistryPerson) -> Self {
        let name = format!(
            "{} {}",
            person.prenom.unwrap_or_default(),
            person.nom.unwrap_or_default()
        )
        .trim()
        .to_string();
        Self {
            name,
            idref: person.id.as_ref().and_then(scalar_text),
            thesis_id: person.these.as_ref().and_then(scalar_text),
            roles: role_names(&person.roles),
            disciplines: person.disciplines,
            establishments: person.etablissements,
        }
    }
}

/// Parse a registry search response into candidates, in response order.
pub fn parse_candidates(bytes: &[u8]) -> serde_json::Result<Vec<ThesisCandidate>> {
    let response: RegistryResponse = serde_json::from_slice(bytes)?;
    Ok(response
        .personnes
        .into_iter()
        .map(ThesisCandidate::from)
        .collect())
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

// Roles come either as an object keyed by role name or as a plain list.
fn role_names(value: &Value) -> Vec<String> {
    match value {
        Value::Object(map) => map.keys().cloned().collect(),
        Value::Array(items) => items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect(),
        Value::String(role) => vec![role.clone()],
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_directory_record() {
        let json = br#"{
            "display_name": "Marie Curie",
            "last_known_institution": {"display_name": "Sorbonne Universite"},
            "x_concepts": [
                {"display_name": "Physics"}, {"display_name": "Chemistry"},
                {"display_name": "Radiology"}, {"display_name": "Medicine"},
                {"display_name": "Optics"}, {"display_name": "Biology"}
            ]
        }"#;
        let profile = AuthorProfile::from_json("A1", json).unwrap();
        assert_eq!(profile.display_name.as_deref(), Some("Marie Curie"));
        assert_eq!(profile.institution.as_deref(), Some("Sorbonne Universite"));
        assert_eq!(
            profile.concepts,
            vec!["physics", "chemistry", "radiology", "medicine", "optics"]
        );
    }

    #[test]
    fn tolerates_missing_directory_fields() {
        let profile =
            AuthorProfile::from_json("A1", br#"{"last_known_institution": null}"#).unwrap();
        assert_eq!(profile.display_name, None);
        assert_eq!(profile.institution, None);
        assert!(profile.concepts.is_empty());
    }

    #[test]
    fn parses_registry_people() {
        let json = br#"{"personnes": [
            {"prenom": "Marie", "nom": "Curie", "id": "0271", "these": "1903PA000001",
             "roles": {"Auteur / Autrice": 1}, "disciplines": ["Physique"],
             "etablissements": ["Paris"]},
            {"nom": "Curie", "id": 42, "roles": ["Directeur / Directrice"]}
        ]}"#;
        let candidates = parse_candidates(json).unwrap();
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].name, "Marie Curie");
        assert!(candidates[0].is_author());
        assert_eq!(candidates[0].thesis_id.as_deref(), Some("1903PA000001"));
        assert_eq!(candidates[1].name, "Curie");
        assert_eq!(candidates[1].idref.as_deref(), Some("42"));
        assert!(!candidates[1].is_author());
    }

    #[test]
    fn empty_registry_response() {
        assert!(parse_candidates(b"{}").unwrap().is_empty());
        assert!(parse_candidates(b"not json").is_err());
    }
}
