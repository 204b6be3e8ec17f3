// file: src/models/match_result.rs
// description: per-query match and resolution outcome types
// reference: returned by the fuzzy resolvers

use serde::Serialize;

/// Maximum similarity score; also used for identifier hits.
pub const MAX_SCORE: u8 = 100;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult<R> {
    pub record: R,
    pub score: u8,
}

impl<R> MatchResult<R> {
    pub fn new(record: R, score: u8) -> Self {
        Self { record, score }
    }

    pub fn exact(record: R) -> Self {
        Self::new(record, MAX_SCORE)
    }
}

/// Outcome of resolving a query against one dataset.
///
/// Missing data is a value, never an error: `DatasetUnavailable` lets callers
/// emit a different message than for an ordinary `NoMatch`.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution<R> {
    Found(MatchResult<R>),
    NoMatch,
    DatasetUnavailable,
}

impl<R> Resolution<R> {
    pub fn into_match(self) -> Option<MatchResult<R>> {
        match self {
            Resolution::Found(m) => Some(m),
            _ => None,
        }
    }
}
