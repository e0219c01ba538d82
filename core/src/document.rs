use crate::error::DocsError;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

lazy_static! {
    /// API class reference pages are titled after the class, e.g. `AlCurve`, `AlDagNode`.
    static ref CLASS_TITLE: Regex = Regex::new(r"^Al[A-Z0-9]").expect("valid regex");
}

/// Position of a document in load order. Used for tie-breaking and pagination.
pub type DocId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Class,
    Guide,
}

impl Category {
    pub fn from_title(title: &str) -> Self {
        if CLASS_TITLE.is_match(title) { Category::Class } else { Category::Guide }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Class => "class",
            Category::Guide => "guide",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Class => "Class Reference",
            Category::Guide => "Guides & Concepts",
        }
    }

    /// Parse a listing filter. `all` (or an empty string) means no filter.
    pub fn parse_filter(s: &str) -> Result<Option<Category>, DocsError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Ok(None),
            other => other.parse().map(Some),
        }
    }
}

impl FromStr for Category {
    type Err = DocsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "class" => Ok(Category::Class),
            "guide" => Ok(Category::Guide),
            other => Err(DocsError::invalid(format!(
                "unknown category {other:?}, expected one of: all, class, guide"
            ))),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One documentation page. Built once by the loader and never mutated.
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    pub doc_id: DocId,
    pub id: String,
    pub title: String,
    pub url: Option<String>,
    pub body: String,
    pub category: Category,
    pub has_code: bool,
    #[serde(skip)]
    pub term_frequencies: HashMap<String, u32>,
    /// Token count of `body`; always the sum of `term_frequencies`.
    pub length: u32,
}

impl Document {
    pub fn term_frequency(&self, term: &str) -> u32 {
        self.term_frequencies.get(term).copied().unwrap_or(0)
    }
}

/// Catalog entry for a document, without its body.
#[derive(Debug, Clone, Serialize)]
pub struct DocSummary<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub url: Option<&'a str>,
    pub has_code: bool,
    pub category: Category,
}

impl<'a> From<&'a Document> for DocSummary<'a> {
    fn from(doc: &'a Document) -> Self {
        DocSummary {
            id: &doc.id,
            title: &doc.title,
            url: doc.url.as_deref(),
            has_code: doc.has_code,
            category: doc.category,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_from_title() {
        assert_eq!(Category::from_title("AlCurve"), Category::Class);
        assert_eq!(Category::from_title("Al3DPoint"), Category::Class);
        assert_eq!(Category::from_title("Alias plug-in overview"), Category::Guide);
        assert_eq!(Category::from_title("Momentary plug-ins"), Category::Guide);
    }

    #[test]
    fn parse_filter() {
        assert_eq!(Category::parse_filter("all").unwrap(), None);
        assert_eq!(Category::parse_filter("Class").unwrap(), Some(Category::Class));
        assert!(matches!(Category::parse_filter("tutorial"), Err(DocsError::InvalidArgument(_))));
    }
}
