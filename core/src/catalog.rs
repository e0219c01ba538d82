use crate::document::{Category, DocSummary, Document};
use crate::error::{DocsError, Result};
use crate::index::DocIndex;
use serde::Serialize;

/// Validated paging bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub offset: usize,
    pub limit: usize,
}

impl PageRequest {
    /// Check caller-supplied bounds: `offset >= 0`, `limit >= 1`.
    pub fn new(offset: i64, limit: i64) -> Result<Self> {
        if offset < 0 {
            return Err(DocsError::invalid(format!("offset must be >= 0, got {offset}")));
        }
        if limit <= 0 {
            return Err(DocsError::invalid(format!("limit must be >= 1, got {limit}")));
        }
        let to_usize = |v: i64| usize::try_from(v).map_err(|_| DocsError::invalid(format!("{v} is out of range")));
        Ok(Self { offset: to_usize(offset)?, limit: to_usize(limit)? })
    }
}

#[derive(Debug, Clone)]
pub struct Page<'a> {
    pub category: Option<Category>,
    pub documents: Vec<&'a Document>,
    /// Size of the filtered collection.
    pub total: usize,
    pub offset: usize,
    pub has_more: bool,
    pub next_offset: Option<usize>,
}

impl Page<'_> {
    pub fn label(&self) -> &'static str {
        self.category.map_or("All", |c| c.label())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CatalogIndex<'a> {
    pub total: usize,
    pub code_pages: usize,
    pub pages: Vec<DocSummary<'a>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CorpusStats {
    pub total_pages: usize,
    pub class_reference_pages: usize,
    pub guide_pages: usize,
    pub pages_with_code: usize,
}

impl DocIndex {
    /// One page of documents in load order, optionally restricted to a category.
    pub fn list(&self, category: Option<Category>, request: PageRequest) -> Page<'_> {
        let filtered: Vec<&Document> =
            self.documents().iter().filter(|d| category.map_or(true, |c| d.category == c)).collect();
        let total = filtered.len();
        let documents: Vec<&Document> = filtered.into_iter().skip(request.offset).take(request.limit).collect();
        let end = request.offset.saturating_add(request.limit);
        let has_more = !documents.is_empty() && end < total;
        Page {
            category,
            documents,
            total,
            offset: request.offset,
            has_more,
            next_offset: has_more.then_some(end),
        }
    }

    /// Every document's catalog entry, in load order.
    pub fn catalog(&self) -> CatalogIndex<'_> {
        let pages: Vec<DocSummary<'_>> = self.documents().iter().map(DocSummary::from).collect();
        CatalogIndex { total: pages.len(), code_pages: pages.iter().filter(|p| p.has_code).count(), pages }
    }

    pub fn stats(&self) -> CorpusStats {
        let docs = self.documents();
        let class_reference_pages = docs.iter().filter(|d| d.category == Category::Class).count();
        CorpusStats {
            total_pages: docs.len(),
            class_reference_pages,
            guide_pages: docs.len() - class_reference_pages,
            pages_with_code: docs.iter().filter(|d| d.has_code).count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_request_bounds() {
        assert!(PageRequest::new(0, 1).is_ok());
        assert!(matches!(PageRequest::new(-1, 10), Err(DocsError::InvalidArgument(_))));
        assert!(matches!(PageRequest::new(0, 0), Err(DocsError::InvalidArgument(_))));
        assert!(matches!(PageRequest::new(0, -5), Err(DocsError::InvalidArgument(_))));
    }
}
