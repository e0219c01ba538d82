//! Text (markdown) and structured (JSON) renderings of query results.

use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use docs_core::config::SCORING_VERSION;
use docs_core::{DocsError, Document, MatchKind, Page, SearchHit};
use serde_json::{json, Value};
use std::fmt::Write;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResponseFormat {
    #[default]
    Text,
    Structured,
}

impl ResponseFormat {
    /// Parse the optional `response_format` parameter; absent means text.
    pub fn parse(value: Option<&str>) -> Result<Self, DocsError> {
        match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            None | Some("") | Some("text") | Some("markdown") => Ok(ResponseFormat::Text),
            Some("structured") | Some("json") => Ok(ResponseFormat::Structured),
            Some(other) => Err(DocsError::invalid(format!(
                "unknown response_format {other:?}, expected text or structured"
            ))),
        }
    }
}

pub enum Rendered {
    Text(String),
    Structured(Value),
}

impl IntoResponse for Rendered {
    fn into_response(self) -> Response {
        match self {
            Rendered::Text(body) => ([(header::CONTENT_TYPE, "text/markdown; charset=utf-8")], body).into_response(),
            Rendered::Structured(value) => Json(value).into_response(),
        }
    }
}

const CODE_TAG: &str = " [code]";

pub fn search_results(format: ResponseFormat, query: &str, hits: &[SearchHit<'_>], empty_hint: &str) -> Rendered {
    match format {
        ResponseFormat::Structured => Rendered::Structured(json!({
            "query": query,
            "scoring_version": SCORING_VERSION,
            "total_results": hits.len(),
            "results": hits,
        })),
        ResponseFormat::Text if hits.is_empty() => {
            Rendered::Text(format!("No results found for: '{query}'.\n\n{empty_hint}"))
        }
        ResponseFormat::Text => {
            let mut out = format!("Found {} results for: {query}\n\n", hits.len());
            for (i, hit) in hits.iter().enumerate() {
                let doc = hit.document;
                let tag = if doc.has_code { CODE_TAG } else { "" };
                let _ = writeln!(out, "## {}. {}{tag}", i + 1, doc.title);
                if let Some(url) = &doc.url {
                    let _ = writeln!(out, "**URL:** {url}");
                }
                let _ = writeln!(out, "**Score:** {:.2}", hit.score);
                let _ = writeln!(out, "**Matched terms:** {}", hit.matched_terms.join(", "));
                let _ = write!(out, "\n{}\n\n---\n\n", hit.snippet);
            }
            Rendered::Text(out)
        }
    }
}

pub fn page(format: ResponseFormat, page: &Page<'_>) -> Rendered {
    match format {
        ResponseFormat::Structured => Rendered::Structured(json!({
            "category": page.label(),
            "total": page.total,
            "offset": page.offset,
            "showing": page.documents.len(),
            "has_more": page.has_more,
            "next_offset": page.next_offset,
            "pages": page.documents.iter().map(|d| json!({
                "id": d.id,
                "title": d.title,
                "category": d.category,
                "has_code": d.has_code,
            })).collect::<Vec<_>>(),
        })),
        ResponseFormat::Text => {
            let mut out = format!("## {} ({} total)\n", page.label(), page.total);
            if page.documents.is_empty() {
                let _ = writeln!(out, "No pages at offset {}. Try offset=0 or a smaller offset.", page.offset);
            } else {
                let _ = writeln!(
                    out,
                    "Showing {}-{} of {}\n",
                    page.offset + 1,
                    page.offset + page.documents.len(),
                    page.total
                );
                for doc in &page.documents {
                    let tag = if doc.has_code { CODE_TAG } else { "" };
                    let _ = writeln!(out, "- **{}**{tag}", doc.title);
                }
            }
            let _ = writeln!(
                out,
                "\n---\n**Total:** {} | **Showing:** {} | **Offset:** {}",
                page.total,
                page.documents.len(),
                page.offset
            );
            match page.next_offset {
                Some(next) => { let _ = writeln!(out, "**Has more:** Yes | **Next offset:** {next}"); }
                None => out.push_str("**Has more:** No\n"),
            }
            Rendered::Text(out)
        }
    }
}

pub fn document(format: ResponseFormat, doc: &Document, kind: MatchKind) -> Rendered {
    match format {
        ResponseFormat::Structured => Rendered::Structured(json!({
            "match": kind,
            "id": doc.id,
            "title": doc.title,
            "url": doc.url,
            "category": doc.category,
            "has_code": doc.has_code,
            "body": doc.body,
        })),
        ResponseFormat::Text => {
            let mut out = format!("# {}\n\n", doc.title);
            if let Some(url) = &doc.url {
                let _ = writeln!(out, "**URL:** {url}");
            }
            if doc.has_code {
                out.push_str("**Contains code examples:** Yes\n");
            }
            out.push('\n');
            out.push_str(if doc.body.is_empty() { "No content available." } else { &doc.body });
            Rendered::Text(out)
        }
    }
}
