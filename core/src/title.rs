//! Title lookup.
//!
//! Resolution order, all case-insensitive:
//! 1. exact title match;
//! 2. a single substring match (title contains the query or the query contains the title);
//! 3. suggestions: several substring matches ranked by length difference, or,
//!    failing any, titles within `max(MIN_SUGGESTION_DISTANCE, chars / 3)` Levenshtein
//!    edits or sharing a word with the query, ranked by edit distance.
//!
//! Ties always fall back to load order.

use crate::config::{MAX_TITLE_SUGGESTIONS, MIN_SUGGESTION_DISTANCE};
use crate::document::Document;
use crate::error::{DocsError, Result};
use crate::index::DocIndex;
use serde::Serialize;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    Exact,
    Partial,
}

#[derive(Debug, Clone)]
pub enum TitleLookup<'a> {
    Found { document: &'a Document, kind: MatchKind },
    /// No single page matched; closest titles, best first.
    Suggestions(Vec<&'a str>),
    NotFound,
}

impl DocIndex {
    pub fn get_by_title(&self, title: &str) -> Result<TitleLookup<'_>> {
        let query = title.trim().to_lowercase();
        if query.is_empty() {
            return Err(DocsError::invalid("title must not be empty"));
        }
        let titles: Vec<(&Document, String)> =
            self.documents().iter().map(|d| (d, d.title.to_lowercase())).collect();

        if let Some((doc, _)) = titles.iter().find(|(_, t)| *t == query) {
            return Ok(TitleLookup::Found { document: *doc, kind: MatchKind::Exact });
        }

        let mut partial: Vec<&(&Document, String)> =
            titles.iter().filter(|(_, t)| t.contains(&query) || query.contains(t.as_str())).collect();
        if partial.len() == 1 {
            return Ok(TitleLookup::Found { document: partial[0].0, kind: MatchKind::Partial });
        }
        let query_chars = query.chars().count();
        if !partial.is_empty() {
            partial.sort_by_key(|(d, t)| (t.chars().count().abs_diff(query_chars), d.doc_id));
            return Ok(suggestions(partial.into_iter().map(|(d, _)| *d)));
        }

        let budget = MIN_SUGGESTION_DISTANCE.max(query_chars / 3);
        let query_words: HashSet<&str> = query.split_whitespace().collect();
        let mut fuzzy: Vec<(usize, &Document)> = titles
            .iter()
            .filter_map(|(d, t)| {
                let distance = strsim::levenshtein(&query, t);
                let shares_word = t.split_whitespace().any(|w| query_words.contains(w));
                (distance <= budget || shares_word).then_some((distance, *d))
            })
            .collect();
        fuzzy.sort_by_key(|(distance, d)| (*distance, d.doc_id));
        tracing::debug!(title, candidates = fuzzy.len(), "no title match");
        Ok(suggestions(fuzzy.into_iter().map(|(_, d)| d)))
    }
}

fn suggestions<'a>(ranked: impl Iterator<Item = &'a Document>) -> TitleLookup<'a> {
    let titles: Vec<&str> = ranked.take(MAX_TITLE_SUGGESTIONS).map(|d| d.title.as_str()).collect();
    if titles.is_empty() { TitleLookup::NotFound } else { TitleLookup::Suggestions(titles) }
}
