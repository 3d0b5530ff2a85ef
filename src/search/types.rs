//! Search Data Types
//!
//! The document model stored in the engine and the simplified records returned to clients.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Value, json};

/// A single sense of a word, kept exactly as stored.
///
/// The engine accepts any JSON here (numbers in text fields, extra keys), so the
/// element is never reshaped on its way back to the client.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Definition(pub Value);

impl Definition {
    pub fn new(kind: &str, meaning: &str) -> Self {
        Self(json!({ "type": kind, "meaning": meaning }))
    }

    pub fn kind(&self) -> Option<&str> {
        self.0.get("type").and_then(Value::as_str)
    }

    pub fn meaning(&self) -> Option<&str> {
        self.0.get("meaning").and_then(Value::as_str)
    }
}

/// The stored shape of a word document (`_source` in the engine).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WordDocument {
    #[serde(default, deserialize_with = "lenient_word")]
    pub word: String,
    #[serde(default, deserialize_with = "lenient_definitions")]
    pub definitions: Vec<Definition>,
}

/// `null` reads as empty; scalars keep their JSON text.
fn lenient_word<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(word) => word,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// `null` reads as no definitions; a lone object counts as a one-element array.
fn lenient_definitions<'de, D>(deserializer: D) -> Result<Vec<Definition>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items.into_iter().map(Definition).collect(),
        Value::Null => Vec::new(),
        single => vec![Definition(single)],
    })
}

/// One matched document as handed over by the engine layer.
///
/// `matched_definitions` is the inner-hits slice of definitions that satisfied the
/// type filter, or `None` when the engine returned no such slice.
#[derive(Debug, Clone, PartialEq)]
pub struct Hit {
    pub id: String,
    pub document: WordDocument,
    pub matched_definitions: Option<Vec<Definition>>,
}

/// A search result as returned by `GET /search`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordResult {
    pub word: String,
    pub definitions: Vec<Definition>,
}

/// Normalized search inputs. `None` means "not present".
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchTerms {
    pub text: Option<String>,
    pub kind: Option<String>,
}
