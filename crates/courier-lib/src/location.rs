//! Location identifiers and the catalog of known delivery locations.
//!
//! A [`LocationId`] is an opaque code (single letters in the built-in
//! catalog). The [`LocationCatalog`] maps each code to a human-readable label
//! and is the authority on which codes exist at all. Which of them accept
//! deliveries on a given day is decided separately by the dispatch queue.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Similarity threshold below which a catalog entry is not offered as a
/// suggestion for a mistyped location.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// Number of suggestions attached to [`Error::UnknownLocation`].
pub(crate) const MAX_SUGGESTIONS: usize = 3;

/// Reference catalog: eight districts keyed by single-letter codes.
const BUILTIN_LOCATIONS: [(&str, &str); 8] = [
    ("A", "Colombo"),
    ("B", "Gampaha"),
    ("C", "Kurunegala"),
    ("D", "Kandy"),
    ("E", "Galle"),
    ("F", "Matara"),
    ("G", "Jaffna"),
    ("H", "Anuradhapura"),
];

/// Opaque identifier for a delivery location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationId(String);

impl LocationId {
    /// Create an identifier, trimming surrounding whitespace.
    pub fn new(code: impl Into<String>) -> Self {
        let code = code.into();
        let trimmed = code.trim();
        if trimmed.len() == code.len() {
            Self(code)
        } else {
            Self(trimmed.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LocationId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for LocationId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl Borrow<str> for LocationId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for LocationId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A catalog entry: code plus label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub code: LocationId,
    pub label: String,
}

/// Fixed set of locations known to a network, ordered by code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationCatalog {
    labels: BTreeMap<LocationId, String>,
}

impl LocationCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The reference eight-district catalog (codes `A` through `H`).
    pub fn builtin() -> Self {
        BUILTIN_LOCATIONS
            .iter()
            .map(|(code, label)| Location {
                code: LocationId::from(*code),
                label: (*label).to_string(),
            })
            .collect()
    }

    /// Register a location, returning the label it replaced, if any.
    pub fn insert(&mut self, code: LocationId, label: impl Into<String>) -> Option<String> {
        self.labels.insert(code, label.into())
    }

    pub fn contains(&self, code: &str) -> bool {
        self.labels.contains_key(code)
    }

    pub fn label(&self, code: &str) -> Option<&str> {
        self.labels.get(code).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Iterate over `(code, label)` pairs in code order.
    pub fn iter(&self) -> impl Iterator<Item = (&LocationId, &str)> {
        self.labels
            .iter()
            .map(|(code, label)| (code, label.as_str()))
    }

    pub fn codes(&self) -> impl Iterator<Item = &LocationId> {
        self.labels.keys()
    }

    /// Format a location as `CODE (Label)`, or the bare code when unlabelled.
    pub fn display_name(&self, code: &LocationId) -> String {
        match self.label(code.as_str()) {
            Some(label) => format!("{code} ({label})"),
            None => code.to_string(),
        }
    }

    /// Resolve user input to a catalog code.
    ///
    /// Codes match exactly; labels match case-insensitively. Anything else
    /// yields [`Error::UnknownLocation`] with the closest catalog entries as
    /// suggestions.
    pub fn resolve(&self, query: &str) -> Result<LocationId> {
        let query = query.trim();
        if let Some((code, _)) = self.labels.get_key_value(query) {
            return Ok(code.clone());
        }

        if let Some((code, _)) = self
            .labels
            .iter()
            .find(|(_, label)| label.eq_ignore_ascii_case(query))
        {
            return Ok(code.clone());
        }

        Err(Error::UnknownLocation {
            query: query.to_string(),
            suggestions: self.fuzzy_matches(query, MAX_SUGGESTIONS),
        })
    }

    /// Return up to `limit` catalog entries resembling `query`, best first.
    pub fn fuzzy_matches(&self, query: &str, limit: usize) -> Vec<String> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<(f64, &LocationId)> = self
            .labels
            .iter()
            .map(|(code, label)| {
                let by_label = strsim::jaro_winkler(&needle, &label.to_lowercase());
                let by_code = strsim::jaro_winkler(&needle, &code.as_str().to_lowercase());
                (by_label.max(by_code), code)
            })
            .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
            .collect();

        scored.sort_by(|a, b| {
            b.0.partial_cmp(&a.0)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.1.cmp(b.1))
        });

        scored
            .into_iter()
            .take(limit)
            .map(|(_, code)| self.display_name(code))
            .collect()
    }
}

impl FromIterator<Location> for LocationCatalog {
    fn from_iter<I: IntoIterator<Item = Location>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for location in iter {
            catalog.insert(location.code, location.label);
        }
        catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_has_eight_districts() {
        let catalog = LocationCatalog::builtin();
        assert_eq!(catalog.len(), 8);
        assert_eq!(catalog.label("A"), Some("Colombo"));
        assert_eq!(catalog.label("H"), Some("Anuradhapura"));
        assert!(!catalog.contains("Z"));
    }

    #[test]
    fn location_id_trims_whitespace() {
        assert_eq!(LocationId::new("  B \n").as_str(), "B");
    }

    #[test]
    fn resolve_accepts_code_and_label() {
        let catalog = LocationCatalog::builtin();
        assert_eq!(catalog.resolve("D").unwrap(), LocationId::from("D"));
        assert_eq!(catalog.resolve("kandy").unwrap(), LocationId::from("D"));
        assert_eq!(catalog.resolve(" Galle ").unwrap(), LocationId::from("E"));
    }

    #[test]
    fn resolve_suggests_close_labels() {
        let catalog = LocationCatalog::builtin();
        let err = catalog.resolve("Kandi").expect_err("typo is not a location");
        match err {
            Error::UnknownLocation { query, suggestions } => {
                assert_eq!(query, "Kandi");
                assert_eq!(suggestions.first().map(String::as_str), Some("D (Kandy)"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn fuzzy_matches_ignores_unrelated_input() {
        let catalog = LocationCatalog::builtin();
        assert!(catalog.fuzzy_matches("", 3).is_empty());
        assert!(catalog.fuzzy_matches("xqzv", 3).is_empty());
    }

    #[test]
    fn display_name_falls_back_to_code() {
        let catalog = LocationCatalog::builtin();
        assert_eq!(catalog.display_name(&"A".into()), "A (Colombo)");
        assert_eq!(catalog.display_name(&"Q".into()), "Q");
    }
}
