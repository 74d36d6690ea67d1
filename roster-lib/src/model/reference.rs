//! Reference-data items (professions, qualities)

use serde::Deserialize;
use serde::Serialize;

/// A reference-data entry from one of the lookup lists.
///
/// Professions and qualities are served as ordered lists of these; forms
/// use them to populate select and multi-select inputs, and multi-select
/// values carry them inside [`Value::Options`](super::Value::Options).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionRef {
    /// The backend identifier of the entry.
    #[serde(rename = "_id")]
    pub id: String,
    /// Human-readable display name.
    pub name: String,
}

impl OptionRef {
    /// Creates a new reference entry.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

impl std::fmt::Display for OptionRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
