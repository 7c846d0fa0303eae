use serde::{Deserialize, Serialize};
use std::fmt;

/// TVmaze show identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShowId(pub u64);

impl fmt::Display for ShowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Poster links as served by the show database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowImage {
    #[serde(rename = "medium")]
    pub medium_url: String,
    #[serde(rename = "original")]
    pub original_url: String,
}

/// A single show record. Immutable once received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShowSummary {
    pub id: ShowId,
    pub name: String,
    #[serde(default)]
    pub image: Option<ShowImage>,
    /// HTML fragment, may be missing or empty.
    #[serde(default)]
    pub summary: Option<String>,
}

impl ShowSummary {
    /// Summary markup, treating an empty string the same as a missing one.
    pub fn summary_markup(&self) -> Option<&str> {
        self.summary.as_deref().filter(|s| !s.trim().is_empty())
    }
}

/// One entry of a name search. The wrapper shape mirrors the search endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    #[serde(default)]
    pub score: f64,
    pub show: ShowSummary,
}
