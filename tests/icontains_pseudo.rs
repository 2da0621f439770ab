use std::error::Error;

use livewatch::ui::{icontains, register_icontains, Document, Element, SelectorEngine};

type TestResult = Result<(), Box<dyn Error>>;

fn cell(text: &str) -> (Document, livewatch::ui::ElementId) {
    let mut doc = Document::new();
    let el = doc.append(None, Element::new("td").with_text_content(text));
    (doc, el)
}

#[test]
fn match_is_case_insensitive_both_ways() {
    let (doc, el) = cell("Hello World");
    assert!(icontains(&doc, el, "WORLD"));
    assert!(icontains(&doc, el, "hello"));
    assert!(icontains(&doc, el, "o w"));
    assert!(!icontains(&doc, el, "xyz"));
}

#[test]
fn empty_query_matches_everything() {
    let (doc, el) = cell("Hello World");
    assert!(icontains(&doc, el, ""));

    let mut empty_doc = Document::new();
    let empty = empty_doc.append(None, Element::new("td"));
    assert!(icontains(&empty_doc, empty, ""));
}

#[test]
fn element_without_text_matches_only_empty_query() {
    let mut doc = Document::new();
    let el = doc.append(None, Element::new("td"));
    assert!(icontains(&doc, el, ""));
    assert!(!icontains(&doc, el, "a"));
}

#[test]
fn falls_back_through_text_sources() {
    let mut doc = Document::new();
    let inner_only = doc.append(None, Element::new("td").with_inner_text("Visible Text"));
    assert!(icontains(&doc, inner_only, "visible"));

    // No own text: collected descendant text is the effective text.
    let parent = doc.append(None, Element::new("td"));
    doc.append(Some(parent), Element::new("b").with_text_content("Bold Label"));
    assert!(icontains(&doc, parent, "bold label"));
}

#[test]
fn composes_with_the_selector_engine() -> TestResult {
    let mut doc = Document::new();
    let table = doc.append(None, Element::new("table").with_class("ui"));
    let hit = doc.append(
        Some(table),
        Element::new("td").with_text_content("Berlin Office"),
    );
    doc.append(
        Some(table),
        Element::new("td").with_text_content("Paris Office"),
    );

    let mut engine = SelectorEngine::new();
    register_icontains(&mut engine);

    assert_eq!(engine.select(&doc, "td:icontains(BERLIN)")?, vec![hit]);
    Ok(())
}

#[test]
fn multi_word_queries_compose_in_selectors() -> TestResult {
    let mut doc = Document::new();
    let table = doc.append(None, Element::new("table").with_class("ui"));
    let hit = doc.append(
        Some(table),
        Element::new("td").with_text_content("Berlin Office"),
    );
    doc.append(
        Some(table),
        Element::new("td").with_text_content("Berlin Warehouse"),
    );

    let mut engine = SelectorEngine::new();
    register_icontains(&mut engine);

    // User-typed filter text contains spaces; the selector must carry it
    // through whole, quoted or not.
    assert_eq!(engine.select(&doc, "td:icontains(berlin office)")?, vec![hit]);
    assert_eq!(
        engine.select(&doc, "td:icontains('Berlin Office')")?,
        vec![hit]
    );
    assert_eq!(
        engine.select(&doc, "table.ui td:icontains(\"berlin office\")")?,
        vec![hit]
    );

    // The bare predicate and the registered pseudo agree.
    assert!(icontains(&doc, hit, "berlin office"));
    Ok(())
}

#[test]
fn positional_fallback_behaves_identically() -> TestResult {
    let mut doc = Document::new();
    let hit = doc.append(None, Element::new("td").with_text_content("Berlin Office"));
    doc.append(None, Element::new("td").with_text_content("Paris Office"));

    // An engine without create-pseudo support takes the positional strategy;
    // query extraction comes from the raw match arguments.
    let mut engine = SelectorEngine::legacy();
    assert!(!engine.supports_create_pseudo());
    register_icontains(&mut engine);

    assert_eq!(engine.select(&doc, "td:icontains(berlin)")?, vec![hit]);
    assert!(engine.select(&doc, "td:icontains(london)")?.is_empty());
    Ok(())
}
