//! Result Projector: engine hits to `{word, definitions}` records.

use super::types::{Hit, WordResult};

/// With a type filter only the inner-hits slice is returned (empty when missing),
/// never the full stored array. Without one the stored array is returned as is.
pub fn project_hits(hits: Vec<Hit>, type_filtered: bool) -> Vec<WordResult> {
    hits.into_iter()
        .map(|hit| {
            let definitions = if type_filtered {
                hit.matched_definitions.unwrap_or_default()
            } else {
                hit.document.definitions
            };
            WordResult {
                word: hit.document.word,
                definitions,
            }
        })
        .collect()
}
