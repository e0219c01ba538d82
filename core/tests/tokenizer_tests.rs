use docs_core::tokenizer::tokenize;

#[test]
fn it_normalizes_and_lowercases() {
    // NFKC folds fullwidth letters and ligatures before lowercasing.
    let words = tokenize("ＡｌＣｕｒｖｅ ﬁle DAG");
    assert_eq!(words, vec!["alcurve", "file", "dag"]);
}

#[test]
fn it_filters_stopwords_and_short_terms() {
    let words = tokenize("How do I create a curve in the plug-in?");
    assert_eq!(words, vec!["create", "curve", "plug"]);
}

#[test]
fn it_is_deterministic() {
    let text = "AlSurface::create(), AlCurve::create(); NURBS 2D/3D.";
    assert_eq!(tokenize(text), tokenize(text));
    assert_eq!(tokenize(text), vec!["alsurface", "create", "alcurve", "create", "nurbs", "2d", "3d"]);
}
