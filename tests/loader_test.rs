use miette::Diagnostic;
use std::fs;
use std::path::PathBuf;
use tokens_core::ast::{Category, TokenNode};
use tokens_core::error::LoadError;
use tokens_core::loader::{load_category, load_documents, parse_category};

fn fixture_dir(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn test_load_all_categories() {
    let doc = load_documents(&fixture_dir("movement"), &Category::ALL).unwrap();
    let loaded: Vec<Category> = doc.iter().map(|(c, _)| c).collect();
    assert_eq!(loaded, Category::ALL.to_vec());
    assert_eq!(doc.token_count(), 23);
}

#[test]
fn test_missing_files_are_skipped() {
    let doc = load_documents(&fixture_dir("cycle"), &Category::ALL).unwrap();
    let loaded: Vec<Category> = doc.iter().map(|(c, _)| c).collect();
    assert_eq!(loaded, vec![Category::Core]);

    let missing = load_category(&fixture_dir("does-not-exist"), Category::Semantic).unwrap();
    assert!(missing.is_none());
}

#[test]
fn test_malformed_json_is_fatal() {
    let err = load_documents(&fixture_dir("malformed"), &Category::ALL).unwrap_err();
    let LoadError::Parse { span, message, .. } = &err else {
        panic!("Expected a parse error, got {err:?}");
    };
    assert!(message.contains("trailing comma"), "message: {message}");

    let source = fs::read_to_string(fixture_dir("malformed").join("core.json")).unwrap();
    let (line_two_end, _) = source.match_indices('\n').nth(1).unwrap();
    assert!(span.offset() > line_two_end, "span should point at line 3");
    assert_eq!(
        err.code().map(|c| c.to_string()),
        Some("loader::parse".to_string())
    );
}

#[test]
fn test_missing_category_key_is_skipped() {
    let source = r#"{ "semantic": { "x": { "value": "1" } } }"#;
    assert!(parse_category(source, "core.json", Category::Core)
        .unwrap()
        .is_none());
}

#[test]
fn test_non_object_category_is_rejected() {
    let source = r#"{ "core": ["not", "a", "tree"] }"#;
    let err = parse_category(source, "core.json", Category::Core).unwrap_err();
    assert!(matches!(err, LoadError::InvalidShape { .. }));
}

#[test]
fn test_leaf_stops_the_walk() {
    let source = r#"{
        "core": {
            "shadow": {
                "value": "0 1px 2px black",
                "nested": { "value": "not a token" }
            },
            "note": "groups may carry plain annotations"
        }
    }"#;
    let group = parse_category(source, "core.json", Category::Core)
        .unwrap()
        .unwrap();
    assert_eq!(group.entries.len(), 1);
    let Some(TokenNode::Leaf(token)) = group.get("shadow") else {
        panic!("Expected shadow to be a leaf");
    };
    assert_eq!(token.extensions.len(), 1);
    assert_eq!(token.extensions[0].0, "nested");
}
