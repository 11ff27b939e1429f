//! Localized season phrase lookup ("第一季" .. "第十季").
//!
//! This is a closed table, not a numeral parser: "第十一季" is unknown unless
//! the caller registers it.

use std::collections::HashMap;

/// The ten season phrases recognized out of the box.
pub const DEFAULT_SEASON_PHRASES: [(&str, u32); 10] = [
    ("第一季", 1),
    ("第二季", 2),
    ("第三季", 3),
    ("第四季", 4),
    ("第五季", 5),
    ("第六季", 6),
    ("第七季", 7),
    ("第八季", 8),
    ("第九季", 9),
    ("第十季", 10),
];

/// Maps whole season phrases to season numbers.
#[derive(Debug, Clone)]
pub struct NumeralResolver {
    phrases: HashMap<String, u32>,
}

impl NumeralResolver {
    /// Build a resolver from an explicit phrase table.
    pub fn new<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<String>,
    {
        Self {
            phrases: phrases.into_iter().map(|(p, n)| (p.into(), n)).collect(),
        }
    }

    /// Season number for an exact phrase, or `None` if the phrase is unknown.
    pub fn resolve(&self, phrase: &str) -> Option<u32> {
        self.phrases.get(phrase).copied()
    }

    /// Whether a whole path segment is one of the known season phrases.
    pub fn is_season_phrase(&self, segment: &str) -> bool {
        self.phrases.contains_key(segment)
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    /// All registered phrases, ordered by season number.
    pub fn phrases(&self) -> Vec<(&str, u32)> {
        let mut all: Vec<_> = self.phrases.iter().map(|(p, n)| (p.as_str(), *n)).collect();
        all.sort_by_key(|(_, n)| *n);
        all
    }
}

impl Default for NumeralResolver {
    fn default() -> Self {
        Self::new(DEFAULT_SEASON_PHRASES)
    }
}
