//! In-memory search over a scraped API documentation corpus.
//!
//! [`DocIndex::open`] loads and indexes a corpus directory once; the resulting
//! index answers ranked search, title lookup, code example search and paged
//! listing without further mutation. [`IndexHandle`] publishes it to
//! concurrent readers and swaps in rebuilt indexes atomically.

pub mod catalog;
pub mod config;
pub mod document;
pub mod error;
pub mod index;
pub mod loader;
pub mod search;
pub mod title;
pub mod tokenizer;

pub use catalog::{CatalogIndex, CorpusStats, Page, PageRequest};
pub use document::{Category, DocId, DocSummary, Document};
pub use error::{DocsError, Result};
pub use index::{DocIndex, IndexHandle};
pub use loader::{load_corpus, PageRecord};
pub use search::SearchHit;
pub use title::{MatchKind, TitleLookup};
