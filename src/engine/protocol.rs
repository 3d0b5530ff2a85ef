//! Engine Wire Protocol
//!
//! Endpoint paths, request body rendering and response decoding for the external
//! search engine. This is the only place that knows the engine's JSON dialect;
//! the rest of the crate works with `BoolQuery`, `Clause` and `Hit`.

use crate::search::query::{
    BoolQuery, Clause, DEFINITIONS_PATH, MATCHED_DEFINITIONS, WORD_FIELD,
};
use crate::search::types::{Definition, Hit, WordDocument};
use serde::Deserialize;
use serde_json::{Value, json};
use std::collections::HashMap;

// --- API Endpoints ---

pub const ENDPOINT_CLUSTER_HEALTH: [&str; 2] = ["_cluster", "health"];
pub const ENDPOINT_DOC: &str = "_doc";
pub const ENDPOINT_CREATE: &str = "_create";
pub const ENDPOINT_SEARCH: &str = "_search";
pub const ENDPOINT_DELETE_BY_QUERY: &str = "_delete_by_query";

/// Upper bound of the engine's inner-hits window; its default of 3 would truncate senses.
pub const INNER_HITS_SIZE: u32 = 100;

/// Error type the engine reports when asked to create an index that exists.
pub const INDEX_EXISTS_ERROR: &str = "resource_already_exists_exception";

// --- Request Rendering ---

pub fn render_search(query: &BoolQuery) -> Value {
    json!({ "query": render_bool(query) })
}

pub fn render_bool(query: &BoolQuery) -> Value {
    json!({
        "bool": {
            "must": query.must.iter().map(render_clause).collect::<Vec<_>>(),
            "filter": query.filter.iter().map(render_clause).collect::<Vec<_>>(),
            "should": query.should.iter().map(render_clause).collect::<Vec<_>>(),
            "minimum_should_match": query.minimum_should_match,
        }
    })
}

pub fn render_clause(clause: &Clause) -> Value {
    match clause {
        Clause::MatchAll => json!({ "match_all": {} }),
        Clause::Term { field, value } => json!({ "term": { *field: value } }),
        Clause::Prefix { field, value } => json!({ "prefix": { *field: value } }),
        Clause::Match { field, value } => json!({ "match": { *field: value } }),
        Clause::Nested {
            path,
            query,
            inner_hits,
        } => {
            let mut nested = json!({
                "path": path,
                "query": render_clause(query),
            });
            if let Some(name) = inner_hits {
                nested["inner_hits"] = json!({ "name": name, "size": INNER_HITS_SIZE });
            }
            json!({ "nested": nested })
        }
    }
}

/// Delete-by-query body removing every document whose `word` is exactly `word`.
pub fn render_word_delete(word: &str) -> Value {
    let clause = Clause::Term {
        field: WORD_FIELD,
        value: word.to_string(),
    };
    json!({ "query": render_clause(&clause) })
}

/// Index settings keeping `definitions` elements independent of one another.
pub fn index_mapping() -> Value {
    json!({
        "mappings": {
            "properties": {
                WORD_FIELD: { "type": "keyword" },
                DEFINITIONS_PATH: {
                    "type": "nested",
                    "properties": {
                        "type": { "type": "keyword" },
                        "meaning": { "type": "text" }
                    }
                }
            }
        }
    })
}

// --- Response Decoding ---

#[derive(Debug, Default, Deserialize)]
pub struct RawSearchResponse {
    #[serde(default)]
    pub hits: RawHits,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawHits {
    #[serde(default)]
    pub hits: Vec<RawHit>,
}

#[derive(Debug, Deserialize)]
pub struct RawHit {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(rename = "_source", default)]
    pub source: WordDocument,
    #[serde(default)]
    pub inner_hits: HashMap<String, RawInnerHits>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawInnerHits {
    #[serde(default)]
    pub hits: RawInnerHitList,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawInnerHitList {
    #[serde(default)]
    pub hits: Vec<RawInnerHit>,
}

#[derive(Debug, Deserialize)]
pub struct RawInnerHit {
    #[serde(rename = "_source", default)]
    pub source: Definition,
}

impl RawSearchResponse {
    pub fn into_hits(self) -> Vec<Hit> {
        self.hits
            .hits
            .into_iter()
            .map(|mut raw| {
                let matched_definitions = raw.inner_hits.remove(MATCHED_DEFINITIONS).map(|slice| {
                    slice
                        .hits
                        .hits
                        .into_iter()
                        .map(|inner| inner.source)
                        .collect()
                });
                Hit {
                    id: raw.id,
                    document: raw.source,
                    matched_definitions,
                }
            })
            .collect()
    }
}
