use crate::document::{DocId, Document};
use crate::error::Result;
use crate::loader::{load_corpus, PageRecord};
use crate::tokenizer::tokenize;
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Immutable search index over the whole corpus.
///
/// Built in one go by [`DocIndex::build`]; nothing mutates it afterwards, so a
/// shared `&DocIndex` (or `Arc<DocIndex>`) can be queried from any thread.
#[derive(Debug, Default)]
pub struct DocIndex {
    documents: Vec<Document>,
    df: HashMap<String, u32>,
    avg_doc_len: f64,
}

impl DocIndex {
    /// Tokenize every page and compute per-document and corpus statistics.
    pub fn build(pages: Vec<PageRecord>) -> Self {
        let mut documents = Vec::with_capacity(pages.len());
        let mut df: HashMap<String, u32> = HashMap::new();
        let mut total_len: u64 = 0;

        for (doc_id, page) in pages.into_iter().enumerate() {
            let mut tf_counts: HashMap<String, u32> = HashMap::new();
            let mut length: u32 = 0;
            for term in tokenize(&page.body) {
                *tf_counts.entry(term).or_insert(0) += 1;
                length += 1;
            }
            for term in tf_counts.keys() {
                *df.entry(term.clone()).or_insert(0) += 1;
            }
            total_len += u64::from(length);

            documents.push(Document {
                doc_id: doc_id as DocId,
                id: page.id,
                title: page.title,
                url: page.url,
                body: page.body,
                category: page.category,
                has_code: page.has_code,
                term_frequencies: tf_counts,
                length,
            });
        }

        let avg_doc_len = if documents.is_empty() { 0.0 } else { total_len as f64 / documents.len() as f64 };
        tracing::info!(num_docs = documents.len(), num_terms = df.len(), avg_doc_len, "built index");
        Self { documents, df, avg_doc_len }
    }

    /// Load the corpus at `root` and build an index over it.
    pub fn open(root: &Path) -> Result<Self> {
        Ok(Self::build(load_corpus(root)?))
    }

    /// Documents in load order.
    pub fn documents(&self) -> &[Document] { &self.documents }

    pub fn num_docs(&self) -> usize { self.documents.len() }

    pub fn is_empty(&self) -> bool { self.documents.is_empty() }

    /// Number of documents containing `term`; zero for terms never seen.
    pub fn document_frequency(&self, term: &str) -> u32 { self.df.get(term).copied().unwrap_or(0) }

    pub fn average_document_length(&self) -> f64 { self.avg_doc_len }

    /// Distinct terms of `query` in first-occurrence order.
    pub(crate) fn query_terms(query: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        tokenize(query).into_iter().filter(|t| seen.insert(t.clone())).collect()
    }
}

/// Shared handle to the live index.
///
/// Readers take a snapshot with [`IndexHandle::current`] and keep it for the
/// whole request. A reload builds a brand new index and swaps the pointer;
/// the lock is held only for the clone or the swap, never while building.
pub struct IndexHandle {
    corpus_root: PathBuf,
    current: RwLock<Arc<DocIndex>>,
}

impl IndexHandle {
    pub fn open(corpus_root: impl Into<PathBuf>) -> Result<Self> {
        let corpus_root = corpus_root.into();
        let index = DocIndex::open(&corpus_root)?;
        Ok(Self { corpus_root, current: RwLock::new(Arc::new(index)) })
    }

    pub fn current(&self) -> Arc<DocIndex> { Arc::clone(&self.current.read()) }

    /// Rebuild from the corpus root and publish the result. On failure the live
    /// index is left untouched.
    pub fn reload(&self) -> Result<Arc<DocIndex>> {
        let fresh = Arc::new(DocIndex::open(&self.corpus_root)?);
        *self.current.write() = Arc::clone(&fresh);
        tracing::info!(num_docs = fresh.num_docs(), "index swapped");
        Ok(fresh)
    }
}
