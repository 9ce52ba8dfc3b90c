use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Once;

use preview_engine::{
    BuildContext, Document, Files, Plugin, PreviewError, PreviewPlugin, RunSummary,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

const LOREM: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit. Sed do eiusmod.";

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(preview_logging::initialize_for_tests);
}

fn single(path: &str, body: &str) -> Files {
    let mut files = Files::new();
    files.insert(path.to_string(), Document::from_bytes(body.to_string()));
    files
}

fn body(files: &Files, path: &str) -> String {
    String::from_utf8(files[path].contents.as_buffer().unwrap().to_vec()).unwrap()
}

/// Run the plugin and return everything passed to the completion signal.
fn run(options: Value, files: &mut Files) -> Vec<Result<RunSummary, PreviewError>> {
    init_logging();
    let calls = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&calls);
    PreviewPlugin::from_options(&options).run(
        files,
        &BuildContext::default(),
        Box::new(move |result: Result<RunSummary, PreviewError>| sink.borrow_mut().push(result)),
    );
    let calls = calls.borrow().clone();
    calls
}

#[test]
fn builds_a_word_preview() {
    let mut files = single("words.md", "Lorem ipsum dolor sit amet");
    let calls = run(json!({ "words": 3 }), &mut files);
    assert_eq!(calls.len(), 1);
    assert_eq!(files["words.md"].get_str("preview"), Some("Lorem ipsum dolor..."));
    assert_eq!(body(&files, "words.md"), "Lorem ipsum dolor sit amet");
}

#[test]
fn builds_a_character_preview_from_a_number() {
    let mut files = single("chars.md", LOREM);
    run(json!({ "characters": 15 }), &mut files);
    assert_eq!(files["chars.md"].get_str("preview"), Some("Lorem ipsum ..."));
}

#[test]
fn builds_a_character_preview_from_an_object() {
    let mut files = single("chars.md", LOREM);
    run(json!({ "characters": { "count": 15, "trim": true } }), &mut files);
    assert_eq!(files["chars.md"].get_str("preview"), Some("Lorem ipsum..."));
}

#[test]
fn builds_a_marker_preview_with_defaults() {
    let mut files = single(
        "markers.md",
        "{{ previewStart }}Etiam fermentum dignissim{{ previewEnd }}reliqua",
    );
    let calls = run(json!({}), &mut files);
    assert_eq!(
        calls,
        vec![Ok(RunSummary {
            matched: 1,
            attached: 1,
            skipped_existing: 0,
            skipped_not_buffer: 0,
        })]
    );
    assert_eq!(
        files["markers.md"].get_str("preview"),
        Some("Etiam fermentum dignissim...")
    );
    assert_eq!(body(&files, "markers.md"), "Etiam fermentum dignissimreliqua");
}

#[test]
fn unmarked_documents_get_only_the_indicator() {
    let mut files = single("plain.md", "No markers in here.");
    run(json!({}), &mut files);
    assert_eq!(files["plain.md"].get_str("preview"), Some("..."));
    assert_eq!(body(&files, "plain.md"), "No markers in here.");
}

#[test]
fn default_run_leaves_unmarked_encodings_alone() {
    let latin1 = b"Le caf\xe9 de la rue est tr\xe8s chaud, et le g\xe2teau est d\xe9licieux.";
    let mut files = Files::new();
    files.insert("fr.md".into(), Document::from_bytes(latin1.as_slice()));
    files.insert("bom.md".into(), Document::from_bytes(b"\xEF\xBB\xBFplain".as_slice()));

    let calls = run(json!({}), &mut files);
    assert_eq!(calls[0].as_ref().unwrap().attached, 2);
    assert_eq!(&files["fr.md"].buffer().unwrap()[..], latin1.as_slice());
    assert_eq!(&files["bom.md"].buffer().unwrap()[..], b"\xEF\xBB\xBFplain");
    assert_eq!(files["fr.md"].get_str("preview"), Some("..."));
}

#[test]
fn no_matches_still_signals_completion() {
    let mut files = single("test.txt", LOREM);
    let before = files.clone();
    let calls = run(json!({ "pattern": "*.md", "words": 2 }), &mut files);
    assert_eq!(calls, vec![Ok(RunSummary::default())]);
    assert_eq!(files, before);
}

#[test]
fn only_matching_paths_are_processed() {
    let mut files = Files::new();
    files.insert("index.md".into(), Document::from_bytes("one two three"));
    files.insert("posts/a.md".into(), Document::from_bytes("four five six"));
    files.insert("drafts/b.md".into(), Document::from_bytes("seven eight"));
    files.insert("style.css".into(), Document::from_bytes("body { }"));

    let calls = run(
        json!({ "pattern": ["**/*.md", "!drafts/**"], "words": 1 }),
        &mut files,
    );

    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].as_ref().unwrap().matched, 2);
    assert_eq!(files["index.md"].get_str("preview"), Some("one..."));
    assert_eq!(files["posts/a.md"].get_str("preview"), Some("four..."));
    assert!(!files["drafts/b.md"].has_key("preview"));
    assert!(!files["style.css"].has_key("preview"));
}

#[test]
fn summary_counts_soft_skips() {
    let mut files = Files::new();
    files.insert("a.md".into(), Document::from_bytes("alpha beta"));
    files.insert(
        "b.md".into(),
        Document::from_bytes("gamma delta").with_metadata("preview", "kept"),
    );
    files.insert("c.md".into(), Document::from_text("already a string"));

    let calls = run(json!({ "words": 1 }), &mut files);
    assert_eq!(
        calls,
        vec![Ok(RunSummary {
            matched: 3,
            attached: 1,
            skipped_existing: 1,
            skipped_not_buffer: 1,
        })]
    );
    assert_eq!(files["b.md"].get_str("preview"), Some("kept"));
}

#[test]
fn invalid_budget_fails_the_batch_once() {
    let mut files = single("a.md", LOREM);
    let calls = run(json!({ "characters": 2 }), &mut files);
    assert_eq!(calls.len(), 1);
    assert!(matches!(
        calls[0],
        Err(PreviewError::InvalidArgument { value: 0, .. })
    ));
}

#[test]
fn apply_can_be_called_directly() {
    let mut files = single("a.md", "**Strong** words *here* today");
    let plugin = PreviewPlugin::from_options(&json!({ "words": 3, "continueIndicator": " »" }));
    let summary = plugin.apply(&mut files).unwrap();
    assert_eq!(summary.attached, 1);
    assert_eq!(files["a.md"].get_str("preview"), Some("Strong words here »"));
    assert_eq!(body(&files, "a.md"), "**Strong** words *here* today");
}
