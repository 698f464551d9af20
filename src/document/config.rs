//! Declarative document shape.
//!
//! Lets the relationship selection live in a config file next to the rest of
//! an application's settings:
//!
//! ```json
//! { "relationship_to_include": ["author", "comments"] }
//! ```

use serde::{Deserialize, Serialize};

/// Options for a [`DocumentDeserializer`](super::DocumentDeserializer).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DocumentOptions {
    /// Relationships to resolve against `included`. `None` means every
    /// relationship found on the first resource of `data`.
    #[serde(default)]
    pub relationship_to_include: Option<Vec<String>>,
}

impl DocumentOptions {
    pub fn from_json_str(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}
