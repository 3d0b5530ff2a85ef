//! Query Shaper
//!
//! Turns normalized search terms into an engine-neutral boolean query. The engine
//! layer decides how a `BoolQuery` is spelled on the wire; nothing here knows the
//! engine's field names for clause types.
//!
//! ## Policy
//! The three rules are independent and additive:
//! 1. neither parameter present: `match_all` in `must`;
//! 2. text present: term, prefix and nested-meaning clauses in `should`,
//!    with `minimum_should_match = 1`;
//! 3. type present: a nested exact-type clause in `filter` that also asks for the
//!    matching definitions back as an inner-hits slice.

use super::types::SearchTerms;

pub const WORD_FIELD: &str = "word";
pub const DEFINITIONS_PATH: &str = "definitions";
pub const MEANING_FIELD: &str = "definitions.meaning";
pub const TYPE_FIELD: &str = "definitions.type";

/// Label of the inner-hits slice carrying definitions that passed the type filter.
pub const MATCHED_DEFINITIONS: &str = "matched_definitions";

#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    MatchAll,
    /// Exact value match.
    Term { field: &'static str, value: String },
    /// Value starts with the given text.
    Prefix { field: &'static str, value: String },
    /// Analyzed full-text match.
    Match { field: &'static str, value: String },
    /// Evaluates `query` against each element of the nested array at `path` on its own.
    Nested {
        path: &'static str,
        query: Box<Clause>,
        inner_hits: Option<&'static str>,
    },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BoolQuery {
    pub must: Vec<Clause>,
    pub filter: Vec<Clause>,
    pub should: Vec<Clause>,
    pub minimum_should_match: u32,
}

impl BoolQuery {
    /// Label of the inner-hits slice requested by a filter clause, if any.
    pub fn inner_hits_label(&self) -> Option<&'static str> {
        self.filter.iter().find_map(|clause| match clause {
            Clause::Nested { inner_hits, .. } => *inner_hits,
            _ => None,
        })
    }
}

pub fn shape_query(terms: &SearchTerms) -> BoolQuery {
    let mut query = BoolQuery::default();

    if terms.text.is_none() && terms.kind.is_none() {
        query.must.push(Clause::MatchAll);
    }

    if let Some(text) = &terms.text {
        query.should.push(Clause::Term {
            field: WORD_FIELD,
            value: text.clone(),
        });
        query.should.push(Clause::Prefix {
            field: WORD_FIELD,
            value: text.clone(),
        });
        query.should.push(Clause::Nested {
            path: DEFINITIONS_PATH,
            query: Box::new(Clause::Match {
                field: MEANING_FIELD,
                value: text.clone(),
            }),
            inner_hits: None,
        });
        query.minimum_should_match = 1;
    }

    if let Some(kind) = &terms.kind {
        query.filter.push(Clause::Nested {
            path: DEFINITIONS_PATH,
            query: Box::new(Clause::Term {
                field: TYPE_FIELD,
                value: kind.clone(),
            }),
            inner_hits: Some(MATCHED_DEFINITIONS),
        });
    }

    query
}
