use docs_core::{Category, DocIndex, DocsError, PageRecord};

fn page(id: &str, title: &str, body: &str, has_code: bool) -> PageRecord {
    PageRecord {
        id: id.into(),
        title: title.into(),
        url: Some(format!("https://help.example.com/{id}")),
        body: body.into(),
        category: Category::from_title(title),
        has_code,
    }
}

fn alias_classes() -> DocIndex {
    DocIndex::build(vec![
        page("g1", "AlCurve", "Interface to curve geometry in the model.", false),
        page("g2", "AlSurface", "Surfaces are built from curve networks: curve, curve and more curve data. Every AlSurface hangs off an AlDagNode, AlDagNode.", false),
        page("g3", "AlDagNode", "AlDagNode is a node in the DAG hierarchy.", false),
    ])
}

#[test]
fn title_boost_beats_body_frequency() {
    let idx = alias_classes();
    let docs = idx.documents();
    assert!(docs[1].term_frequency("curve") > docs[0].term_frequency("curve"));

    let hits = idx.search("curve", 5).unwrap();
    let titles: Vec<&str> = hits.iter().map(|h| h.document.title.as_str()).collect();
    assert_eq!(titles, vec!["AlCurve", "AlSurface"]);
    assert_eq!(hits[0].matched_terms, vec!["curve"]);
}

#[test]
fn exact_title_query_ranks_first() {
    let idx = alias_classes();
    let docs = idx.documents();
    assert!(docs[1].term_frequency("aldagnode") > docs[2].term_frequency("aldagnode"));
    let hits = idx.search("AlDagNode", 5).unwrap();
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].document.title, "AlDagNode");
}

#[test]
fn unmatched_documents_are_excluded() {
    let idx = alias_classes();
    let hits = idx.search("hierarchy", 5).unwrap();
    assert_eq!(hits.len(), 1);
    assert!(idx.search("nonexistent", 5).unwrap().is_empty());
}

#[test]
fn empty_query_and_zero_limit() {
    let idx = alias_classes();
    assert!(idx.search("", 5).unwrap().is_empty());
    assert!(idx.search("   the and of  ", 5).unwrap().is_empty());
    assert!(matches!(idx.search("curve", 0), Err(DocsError::InvalidArgument(_))));
}

#[test]
fn results_are_capped_sorted_and_tie_broken_by_load_order() {
    let mut pages = Vec::new();
    for i in 0..10 {
        pages.push(page(&format!("p{i}"), &format!("Guide {i}"), "curve surface", false));
    }
    pages.push(page("p10", "Curve basics", "curve curve curve surface", false));
    let idx = DocIndex::build(pages);

    let hits = idx.search("curve", 4).unwrap();
    assert_eq!(hits.len(), 4);
    assert_eq!(hits[0].document.id, "p10");
    for pair in hits.windows(2) {
        assert!(pair[0].score >= pair[1].score);
        if pair[0].score == pair[1].score {
            assert!(pair[0].document.doc_id < pair[1].document.doc_id);
        }
    }
    let tied: Vec<&str> = hits[1..].iter().map(|h| h.document.id.as_str()).collect();
    assert_eq!(tied, vec!["p0", "p1", "p2"]);
    assert!(hits.iter().all(|h| !h.matched_terms.is_empty()));
}

#[test]
fn code_pages_get_boosted() {
    let idx = DocIndex::build(vec![
        page("a", "Guide A", "create a curve", false),
        page("b", "Guide B", "create a curve", true),
    ]);
    let hits = idx.search("curve", 5).unwrap();
    assert_eq!(hits[0].document.id, "b");
    assert!((hits[0].score / hits[1].score - 1.2).abs() < 1e-9);
}

#[test]
fn search_is_deterministic() {
    let idx = alias_classes();
    let first = serde_json::to_string(&idx.search("curve surface node", 10).unwrap()).unwrap();
    let second = serde_json::to_string(&idx.search("curve surface node", 10).unwrap()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn code_examples_are_filtered_search() {
    let idx = DocIndex::build(vec![
        page("a", "Curve guide", "curve curve", false),
        page("b", "AlCurve", "curve example", true),
        page("c", "Plug-in sample", "a curve plug-in", true),
        page("d", "AlSurface", "surface only", true),
    ]);
    let code = idx.code_examples("curve", 2).unwrap();
    let all = idx.search("curve", idx.num_docs()).unwrap();
    let expected: Vec<&str> =
        all.iter().filter(|h| h.document.has_code).take(2).map(|h| h.document.id.as_str()).collect();
    let got: Vec<&str> = code.iter().map(|h| h.document.id.as_str()).collect();
    assert_eq!(got, expected);
    assert!(code.iter().all(|h| h.document.has_code));
}

#[test]
fn hit_serializes_summary_fields() {
    let idx = alias_classes();
    let hits = idx.search("curve", 1).unwrap();
    let json = serde_json::to_value(&hits[0]).unwrap();
    assert_eq!(json["id"], "g1");
    assert_eq!(json["title"], "AlCurve");
    assert_eq!(json["category"], "class");
    assert_eq!(json["has_code"], false);
    assert_eq!(json["matched_terms"][0], "curve");
    assert!(json["snippet"].as_str().unwrap().contains("curve"));
    assert!(json.get("body").is_none());
}
