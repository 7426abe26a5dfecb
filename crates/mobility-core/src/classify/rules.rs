//! Ordered rule table for trajectory classification.
//!
//! Rules are evaluated top to bottom and the first match decides. The last
//! rule matches unconditionally, so every sequence gets exactly one
//! category.

use mobility_model::{CareerCategory, CareerSequence};

/// Facts about a sequence that the rules are written against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrajectoryFacts {
    /// Every entry's value, outer whitespace removed, is exactly the origin code.
    pub all_only_origin: bool,
    /// The last entry's value, outer whitespace removed, is exactly the origin code.
    pub last_only_origin: bool,
    /// The hub code appears as an untrimmed token in some entry.
    pub journey_had_hub: bool,
    /// The hub code appears as a trimmed token in the last entry.
    pub last_in_hub: bool,
    /// The origin code appears as a trimmed token in the last entry.
    pub last_in_origin: bool,
}

impl TrajectoryFacts {
    pub fn gather(sequence: &CareerSequence, origin: &str, hub: &str) -> Self {
        let entries = sequence.entries();
        let last = &sequence.last().countries;
        Self {
            all_only_origin: entries.iter().all(|entry| entry.countries.is_exactly(origin)),
            last_only_origin: last.is_exactly(origin),
            journey_had_hub: entries.iter().any(|entry| entry.countries.lists_verbatim(hub)),
            last_in_hub: last.contains(hub),
            last_in_origin: last.contains(origin),
        }
    }
}

/// One row of the rule table.
#[derive(Debug, Clone, Copy)]
pub struct ClassificationRule {
    /// Unique rule identifier.
    pub id: &'static str,
    /// Category assigned when the rule matches.
    pub category: CareerCategory,
    /// Human-readable description of the condition.
    pub description: &'static str,
    predicate: fn(&TrajectoryFacts) -> bool,
}

impl ClassificationRule {
    pub fn matches(&self, facts: &TrajectoryFacts) -> bool {
        (self.predicate)(facts)
    }
}

/// The classification rules in priority order.
pub static CLASSIFICATION_RULES: [ClassificationRule; 6] = [
    ClassificationRule {
        id: "R1-stayed",
        category: CareerCategory::StayedInOrigin,
        description: "every entry is exactly the origin",
        predicate: |facts| facts.all_only_origin,
    },
    ClassificationRule {
        id: "R2-return-via-hub",
        category: CareerCategory::RoundTripViaHub,
        description: "last entry is exactly the origin and the hub appears somewhere",
        predicate: |facts| facts.last_only_origin && facts.journey_had_hub,
    },
    ClassificationRule {
        id: "R3-return-direct",
        category: CareerCategory::RoundTripDirect,
        description: "last entry is exactly the origin",
        predicate: |facts| facts.last_only_origin,
    },
    ClassificationRule {
        id: "R4-expat-hub",
        category: CareerCategory::ExpatriateToHub,
        description: "last entry lists the hub but not the origin",
        predicate: |facts| facts.last_in_hub && !facts.last_in_origin,
    },
    ClassificationRule {
        id: "R5-expat-elsewhere",
        category: CareerCategory::ExpatriateElsewhere,
        description: "last entry lists neither the hub nor the origin",
        predicate: |facts| !facts.last_in_hub && !facts.last_in_origin,
    },
    ClassificationRule {
        id: "R6-complex",
        category: CareerCategory::ComplexOngoing,
        description: "last entry mixes the origin with other countries",
        predicate: |_| true,
    },
];

/// First rule of the table matching `facts`.
pub fn first_match(facts: &TrajectoryFacts) -> &'static ClassificationRule {
    CLASSIFICATION_RULES
        .iter()
        .find(|rule| rule.matches(facts))
        .unwrap_or(&CLASSIFICATION_RULES[CLASSIFICATION_RULES.len() - 1])
}
