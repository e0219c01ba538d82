//! Corpus loading: scraped JSON records -> normalized page records.
//!
//! Accepts `*.json` files holding one object or an array of objects, and `*.jsonl`
//! files with one object per line. Files are visited in file-name order so the
//! resulting load order is stable across runs. Fields search does not need
//! (`raw_content`, `scraped_at`, anything unknown) are dropped here.

use crate::document::Category;
use crate::error::{DocsError, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// The scraper writes its own manifest next to the pages.
const MANIFEST_FILE: &str = "index.json";

const CODE_FENCE: &str = "```";

#[derive(Debug, Deserialize)]
struct InputDoc {
    #[serde(alias = "guid")]
    id: String,
    title: String,
    #[serde(alias = "content", default)]
    body: String,
    url: Option<String>,
    #[serde(default)]
    has_code_blocks: Option<bool>,
    #[serde(default)]
    raw_content: Option<String>,
}

/// A validated page with its derived fields, ready for indexing.
#[derive(Debug, Clone, PartialEq)]
pub struct PageRecord {
    pub id: String,
    pub title: String,
    pub url: Option<String>,
    pub body: String,
    pub category: Category,
    pub has_code: bool,
}

impl PageRecord {
    fn from_input(doc: InputDoc, source: &Path) -> Result<Self> {
        let id = doc.id.trim().to_string();
        let title = doc.title.trim().to_string();
        if id.is_empty() {
            return Err(malformed(source, "empty id"));
        }
        if title.is_empty() {
            return Err(malformed(source, format!("empty title for id {id:?}")));
        }
        // raw_content is only consulted here and then dropped with the InputDoc.
        let has_code = doc.has_code_blocks.unwrap_or(false)
            || doc.body.contains(CODE_FENCE)
            || doc.raw_content.as_deref().is_some_and(|raw| raw.contains(CODE_FENCE));
        Ok(PageRecord {
            category: Category::from_title(&title),
            id,
            title,
            url: doc.url.filter(|u| !u.trim().is_empty()),
            body: doc.body,
            has_code,
        })
    }
}

/// Load every page under `root` (a directory or a single file).
///
/// Fails with `CorpusUnavailable` when the path is missing or yields no pages,
/// `MalformedRecord` on the first unparseable or incomplete record, and
/// `DuplicateId` when two records share an id.
pub fn load_corpus(root: &Path) -> Result<Vec<PageRecord>> {
    if !root.exists() {
        return Err(unavailable(root, "path does not exist"));
    }
    let files = collect_files(root)?;
    let mut pages = Vec::new();
    for file in &files {
        if file.extension().and_then(|s| s.to_str()) == Some("jsonl") {
            load_jsonl(file, &mut pages)?;
        } else {
            load_json(file, &mut pages)?;
        }
    }
    if pages.is_empty() {
        return Err(unavailable(root, "no documents found"));
    }

    let mut seen = HashSet::with_capacity(pages.len());
    for page in &pages {
        if !seen.insert(page.id.as_str()) {
            return Err(DocsError::DuplicateId { id: page.id.clone() });
        }
    }

    let code_pages = pages.iter().filter(|p| p.has_code).count();
    tracing::info!(files = files.len(), pages = pages.len(), code_pages, root = %root.display(), "loaded corpus");
    Ok(pages)
}

fn collect_files(root: &Path) -> Result<Vec<PathBuf>> {
    if root.is_file() {
        return Ok(vec![root.to_path_buf()]);
    }
    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| unavailable(root, e.to_string()))?;
        let p = entry.path();
        if !p.is_file() {
            continue;
        }
        if p.file_name().and_then(|s| s.to_str()) == Some(MANIFEST_FILE) {
            tracing::debug!(path = %p.display(), "skipping scrape manifest");
            continue;
        }
        match p.extension().and_then(|s| s.to_str()) {
            Some("json" | "jsonl") => files.push(p.to_path_buf()),
            _ => tracing::warn!(path = %p.display(), "skipping non-document file"),
        }
    }
    Ok(files)
}

fn load_jsonl(file: &Path, pages: &mut Vec<PageRecord>) -> Result<()> {
    let f = File::open(file).map_err(|e| unavailable(file, e.to_string()))?;
    let reader = BufReader::new(f);
    for (lineno, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| unavailable(file, e.to_string()))?;
        if line.trim().is_empty() { continue; }
        let doc: InputDoc = serde_json::from_str(&line)
            .map_err(|e| malformed(file, format!("line {}: {e}", lineno + 1)))?;
        pages.push(PageRecord::from_input(doc, file)?);
    }
    Ok(())
}

fn load_json(file: &Path, pages: &mut Vec<PageRecord>) -> Result<()> {
    let f = File::open(file).map_err(|e| unavailable(file, e.to_string()))?;
    let reader = BufReader::new(f);
    let json: serde_json::Value = serde_json::from_reader(reader).map_err(|e| malformed(file, e.to_string()))?;
    match json {
        serde_json::Value::Array(arr) => {
            for v in arr {
                let doc: InputDoc = serde_json::from_value(v).map_err(|e| malformed(file, e.to_string()))?;
                pages.push(PageRecord::from_input(doc, file)?);
            }
        }
        serde_json::Value::Object(_) => {
            let doc: InputDoc = serde_json::from_value(json).map_err(|e| malformed(file, e.to_string()))?;
            pages.push(PageRecord::from_input(doc, file)?);
        }
        _ => return Err(malformed(file, "expected a JSON object or array")),
    }
    Ok(())
}

fn unavailable(path: &Path, reason: impl Into<String>) -> DocsError {
    DocsError::CorpusUnavailable { path: path.to_path_buf(), reason: reason.into() }
}

fn malformed(path: &Path, reason: impl Into<String>) -> DocsError {
    DocsError::MalformedRecord { path: path.to_path_buf(), reason: reason.into() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn reads_scraper_fields_and_derives() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("a.json"),
            r#"{"guid":"G1","title":"AlCurve","url":"https://x/AlCurve","content":"A curve.",
                "raw_content":"<pre>```py\ncurve()\n```</pre>","scraped_at":"2024-01-01","extra":1}"#,
        )
        .unwrap();
        let pages = load_corpus(dir.path()).unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].id, "G1");
        assert_eq!(pages[0].body, "A curve.");
        assert_eq!(pages[0].category, Category::Class);
        assert!(pages[0].has_code);
    }

    #[test]
    fn file_name_order_and_manifest_skipped() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.json"), r#"{"id":"2","title":"Second","body":"b"}"#).unwrap();
        fs::write(dir.path().join("a.jsonl"), "{\"id\":\"1\",\"title\":\"First\",\"body\":\"a\"}\n\n").unwrap();
        fs::write(dir.path().join("index.json"), r#"{"total_pages": 2}"#).unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        let ids: Vec<String> = load_corpus(dir.path()).unwrap().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn missing_and_empty_corpus_unavailable() {
        let dir = tempdir().unwrap();
        assert!(matches!(load_corpus(&dir.path().join("nope")), Err(DocsError::CorpusUnavailable { .. })));
        assert!(matches!(load_corpus(dir.path()), Err(DocsError::CorpusUnavailable { .. })));
    }

    #[test]
    fn malformed_and_duplicate_records_rejected() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.json"), r#"{"id":"1","body":"no title"}"#).unwrap();
        assert!(matches!(load_corpus(dir.path()), Err(DocsError::MalformedRecord { .. })));

        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("a.json"),
            r#"[{"id":"1","title":"One","body":""},{"id":"1","title":"Uno","body":""}]"#,
        )
        .unwrap();
        assert!(matches!(load_corpus(dir.path()), Err(DocsError::DuplicateId { .. })));
    }
}
