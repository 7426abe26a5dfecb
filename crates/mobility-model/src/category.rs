//! Migration-pattern categories.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Career trajectory category.
///
/// The declaration order is the fixed column order used by every output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CareerCategory {
    /// Every publication lists the origin country alone.
    StayedInOrigin,
    /// Left, passed through the hub country, and ended back in the origin only.
    RoundTripViaHub,
    /// Left and ended back in the origin only, never through the hub.
    RoundTripDirect,
    /// Last seen in the hub country, without the origin.
    ExpatriateToHub,
    /// Last seen abroad, neither in the hub nor the origin.
    ExpatriateElsewhere,
    /// Last seen in the origin together with another country.
    ComplexOngoing,
}

impl CareerCategory {
    pub const ALL: [CareerCategory; 6] = [
        CareerCategory::StayedInOrigin,
        CareerCategory::RoundTripViaHub,
        CareerCategory::RoundTripDirect,
        CareerCategory::ExpatriateToHub,
        CareerCategory::ExpatriateElsewhere,
        CareerCategory::ComplexOngoing,
    ];

    /// Stable machine-readable key.
    pub fn as_str(&self) -> &'static str {
        match self {
            CareerCategory::StayedInOrigin => "stayed_in_origin",
            CareerCategory::RoundTripViaHub => "round_trip_via_hub",
            CareerCategory::RoundTripDirect => "round_trip_direct",
            CareerCategory::ExpatriateToHub => "expatriate_to_hub",
            CareerCategory::ExpatriateElsewhere => "expatriate_elsewhere",
            CareerCategory::ComplexOngoing => "complex_ongoing",
        }
    }

    /// Human-readable label for tables and charts.
    pub fn label(&self) -> &'static str {
        match self {
            CareerCategory::StayedInOrigin => "Stayed in origin",
            CareerCategory::RoundTripViaHub => "Round-trip (via hub)",
            CareerCategory::RoundTripDirect => "Round-trip (no hub)",
            CareerCategory::ExpatriateToHub => "Expatriate (to hub)",
            CareerCategory::ExpatriateElsewhere => "Expatriate (elsewhere)",
            CareerCategory::ComplexOngoing => "Complex/ongoing migration",
        }
    }
}

impl fmt::Display for CareerCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for CareerCategory {
    type Err = String;

    /// Accepts the machine key (case-insensitive) or the exact label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        CareerCategory::ALL
            .into_iter()
            .find(|category| {
                category.as_str().eq_ignore_ascii_case(trimmed) || category.label() == trimmed
            })
            .ok_or_else(|| format!("Unknown career category: {s}"))
    }
}
