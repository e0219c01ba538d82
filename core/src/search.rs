//! BM25 ranking with title and code boosts.
//!
//! Final score for a document with at least one matching query term:
//!
//! 1. `bm25` = sum over matched terms of `idf * tf * (k1 + 1) / (tf + k1 * (1 - b + b * len / avg_len))`
//!    with `idf = ln((N - df + 0.5) / (df + 0.5) + 1)`.
//! 2. Title boost: `+ TITLE_EXACT_BOOST` when the query is the title, otherwise
//!    `+ TITLE_TERM_BOOST` for each distinct query term contained in the title.
//! 3. Code boost: `* CODE_BOOST` when the page has a code block.
//!
//! Ties are broken by load order.

use crate::config::{
    BM25_B, BM25_K1, CODE_BOOST, SNIPPET_CHARS, SNIPPET_LEAD_CHARS, TITLE_EXACT_BOOST, TITLE_TERM_BOOST,
};
use crate::document::{DocSummary, Document};
use crate::error::{DocsError, Result};
use crate::index::DocIndex;
use regex::RegexBuilder;
use serde::{Serialize, Serializer};
use std::cmp::Ordering;

#[derive(Debug, Clone)]
pub struct SearchHit<'a> {
    pub document: &'a Document,
    pub score: f64,
    /// Distinct query terms present in the document, in query order.
    pub matched_terms: Vec<String>,
    pub snippet: String,
}

impl Serialize for SearchHit<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct HitView<'b> {
            #[serde(flatten)]
            summary: DocSummary<'b>,
            score: f64,
            matched_terms: &'b [String],
            snippet: &'b str,
        }
        HitView {
            summary: DocSummary::from(self.document),
            score: (self.score * 100.0).round() / 100.0,
            matched_terms: &self.matched_terms,
            snippet: &self.snippet,
        }
        .serialize(serializer)
    }
}

impl DocIndex {
    /// Rank documents against `query`, returning at most `max_results` hits.
    ///
    /// A query with no searchable terms yields no hits. `max_results == 0` is
    /// an `InvalidArgument`.
    pub fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchHit<'_>>> {
        self.search_filtered(query, max_results, |_| true)
    }

    /// Like [`DocIndex::search`] but only over pages that contain code.
    pub fn code_examples(&self, topic: &str, max_results: usize) -> Result<Vec<SearchHit<'_>>> {
        self.search_filtered(topic, max_results, |d| d.has_code)
    }

    fn search_filtered(
        &self,
        query: &str,
        max_results: usize,
        keep: impl Fn(&Document) -> bool,
    ) -> Result<Vec<SearchHit<'_>>> {
        if max_results == 0 {
            return Err(DocsError::invalid("max_results must be at least 1"));
        }
        let terms = DocIndex::query_terms(query);
        if terms.is_empty() || self.is_empty() {
            return Ok(Vec::new());
        }

        let idfs: Vec<f64> = terms.iter().map(|t| self.idf(t)).collect();
        let mut scored: Vec<(&Document, f64, Vec<String>)> = Vec::new();
        for doc in self.documents().iter().filter(|&d| keep(d)) {
            let mut bm25 = 0.0;
            let mut matched = Vec::new();
            for (term, idf) in terms.iter().zip(&idfs) {
                let tf = doc.term_frequency(term);
                if tf == 0 {
                    continue;
                }
                bm25 += idf * self.tf_norm(tf, doc.length);
                matched.push(term.clone());
            }
            if matched.is_empty() {
                continue;
            }
            let score = apply_boosts(bm25, query, &terms, doc);
            scored.push((doc, score, matched));
        }

        scored.sort_by(|a, b| match b.1.total_cmp(&a.1) {
            Ordering::Equal => a.0.doc_id.cmp(&b.0.doc_id),
            other => other,
        });
        scored.truncate(max_results);
        tracing::debug!(query, hits = scored.len(), "search");

        Ok(scored
            .into_iter()
            .map(|(document, score, matched_terms)| {
                let snippet = extract_snippet(&document.body, &matched_terms);
                SearchHit { document, score, matched_terms, snippet }
            })
            .collect())
    }

    fn idf(&self, term: &str) -> f64 {
        let n = self.num_docs() as f64;
        let df = f64::from(self.document_frequency(term));
        ((n - df + 0.5) / (df + 0.5) + 1.0).ln()
    }

    fn tf_norm(&self, tf: u32, doc_len: u32) -> f64 {
        let tf = f64::from(tf);
        let avg = self.average_document_length().max(1.0);
        let len_norm = 1.0 - BM25_B + BM25_B * f64::from(doc_len) / avg;
        tf * (BM25_K1 + 1.0) / (tf + BM25_K1 * len_norm)
    }
}

fn apply_boosts(bm25: f64, query: &str, terms: &[String], doc: &Document) -> f64 {
    let mut score = bm25;
    let title_lc = doc.title.to_lowercase();
    if is_title_match(query, &title_lc) {
        score += TITLE_EXACT_BOOST;
    } else {
        let in_title = terms.iter().filter(|t| title_lc.contains(t.as_str())).count();
        score += TITLE_TERM_BOOST * in_title as f64;
    }
    if doc.has_code {
        score *= CODE_BOOST;
    }
    score
}

/// Case-insensitive title equality, also ignoring punctuation and spacing
/// (`"al curve"` matches `"AlCurve"`).
fn is_title_match(query: &str, title_lc: &str) -> bool {
    let query_lc = query.trim().to_lowercase();
    if query_lc == title_lc {
        return true;
    }
    let compact = |s: &str| s.chars().filter(|c| c.is_alphanumeric()).collect::<String>();
    let q = compact(&query_lc);
    !q.is_empty() && q == compact(title_lc)
}

/// Excerpt of `body` around the earliest case-insensitive occurrence of any term,
/// or the start of the body when none occurs verbatim.
pub fn extract_snippet(body: &str, terms: &[String]) -> String {
    let anchor = terms
        .iter()
        .filter_map(|t| {
            RegexBuilder::new(&regex::escape(t))
                .case_insensitive(true)
                .build()
                .ok()?
                .find(body)
                .map(|m| m.start())
        })
        .min();

    let start = match anchor {
        Some(pos) => {
            let lead = body[..pos].chars().rev().take(SNIPPET_LEAD_CHARS).map(char::len_utf8).sum::<usize>();
            pos - lead
        }
        None => 0,
    };
    let end = body[start..].char_indices().nth(SNIPPET_CHARS).map_or(body.len(), |(i, _)| start + i);

    let mut snippet = String::with_capacity(end - start + 6);
    if start > 0 {
        snippet.push_str("...");
    }
    snippet.push_str(&body[start..end]);
    if end < body.len() {
        snippet.push_str("...");
    }
    snippet
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snippet_from_start_when_no_anchor() {
        assert_eq!(extract_snippet("short body", &["zzz".into()]), "short body");
        let long = "x".repeat(SNIPPET_CHARS + 10);
        let s = extract_snippet(&long, &[]);
        assert_eq!(s.chars().count(), SNIPPET_CHARS + 3);
        assert!(s.ends_with("..."));
    }

    #[test]
    fn snippet_centers_on_first_term() {
        let body = format!("{}Curve here", "é".repeat(200));
        let s = extract_snippet(&body, &["surface".into(), "curve".into()]);
        assert!(s.starts_with("..."));
        assert!(s.ends_with("Curve here"));
        assert_eq!(s.chars().count(), 3 + SNIPPET_LEAD_CHARS + "Curve here".len());
    }

    #[test]
    fn title_match_ignores_case_and_punctuation() {
        assert!(is_title_match("  alcurve ", "alcurve"));
        assert!(is_title_match("Al Curve", "alcurve"));
        assert!(!is_title_match("curve", "alcurve"));
        assert!(!is_title_match("!!", "??"));
    }
}
