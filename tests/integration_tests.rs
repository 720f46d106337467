// End-to-end builds over the fixtures in tests/fixtures
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tokens_core::error::TokenError;
use tokens_core::{build, BuildConfig};

fn fixture_dir(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn config_for(fixture: &str, out: &Path) -> BuildConfig {
    BuildConfig {
        tokens_dir: fixture_dir(fixture),
        out_dir: out.join("dist"),
        root_dir: out.to_path_buf(),
        ..BuildConfig::default()
    }
}

fn read(path: PathBuf) -> String {
    fs::read_to_string(&path).unwrap_or_else(|_| panic!("Failed to read output: {path:?}"))
}

#[test]
fn test_minimal_end_to_end() {
    let tokens = TempDir::new().unwrap();
    fs::write(
        tokens.path().join("core.json"),
        r##"{"core":{"color":{"red":{"500":{"value":"#ff0000"}}}}}"##,
    )
    .unwrap();
    fs::write(
        tokens.path().join("semantic.json"),
        r#"{"semantic":{"color":{"error":{"value":"{color.red.500}"}}}}"#,
    )
    .unwrap();

    let out = TempDir::new().unwrap();
    let config = BuildConfig {
        tokens_dir: tokens.path().to_path_buf(),
        ..config_for("unused", out.path())
    };
    let report = build(&config).unwrap();
    assert!(report.diagnostics.is_empty());
    assert_eq!(report.token_count, 2);

    let css = read(out.path().join("dist").join("movement-tokens.css"));
    assert!(css.contains("  --core-color-red-500: #ff0000;\n"));
    assert!(css.contains("  --semantic-color-error: #ff0000;\n"));
    let root_block = &css[..css.find("/* Semantic HTML Element Styles */").unwrap()];
    assert_eq!(root_block.matches('{').count(), 1, "no unresolved references expected");
}

mod movement {
    use super::*;

    #[test]
    fn test_build_writes_every_output() {
        let out = TempDir::new().unwrap();
        let report = build(&config_for("movement", out.path())).unwrap();

        let mut written: Vec<PathBuf> = report.written.clone();
        written.sort();
        let mut expected = vec![
            out.path().join("dist").join("sd-tokens.json"),
            out.path().join("dist").join("movement-tokens.css"),
            out.path().join("dist").join("tokens.js"),
            out.path().join("token-documentation.html"),
            out.path().join("movement-tokens.css"),
        ];
        expected.sort();
        assert_eq!(written, expected);
        for path in &expected {
            assert!(path.exists(), "{path:?} should exist");
        }
        assert_eq!(
            read(out.path().join("dist").join("movement-tokens.css")),
            read(out.path().join("movement-tokens.css"))
        );
    }

    #[test]
    fn test_references_resolve_across_categories() {
        let out = TempDir::new().unwrap();
        build(&config_for("movement", out.path())).unwrap();
        let css = read(out.path().join("dist").join("movement-tokens.css"));

        for line in [
            "--semantic-color-primary-base: #ffd935;",
            "--semantic-color-primary-darken: #ddba22;",
            "--semantic-color-background-base: #000000;",
            "--semantic-color-background-muted: rgba(255, 255, 255, 0.1);",
            "--semantic-color-success: #28cf98;",
            "--semantic-space-gutter: 16;",
            "--components-button-primary-default: #ffd935;",
            "--components-navigation-bg: #000000;",
            "--interactions-hover-button: #ddba22;",
            "--interactions-currency-symbol: MoveETH;",
            "--core-typography-font-weight-bold: 700;",
        ] {
            assert!(css.contains(line), "missing `{line}`");
        }
    }

    #[test]
    fn test_unresolved_reference_is_visible_and_non_fatal() {
        let out = TempDir::new().unwrap();
        let report = build(&config_for("movement", out.path())).unwrap();
        assert_eq!(report.diagnostics.len(), 1);
        assert_eq!(
            report.diagnostics[0].to_string(),
            "interactions.missing: reference not found: {color.does.not.exist}"
        );

        let css = read(out.path().join("dist").join("movement-tokens.css"));
        assert!(css.contains("--interactions-missing: {color.does.not.exist};"));
    }

    #[test]
    fn test_js_module_holds_resolved_tree() {
        let out = TempDir::new().unwrap();
        build(&config_for("movement", out.path())).unwrap();
        let js = read(out.path().join("dist").join("tokens.js"));
        let json = js
            .strip_prefix("export default ")
            .and_then(|s| s.strip_suffix(";\n"))
            .unwrap();
        let tree: serde_json::Value = serde_json::from_str(json).unwrap();
        assert_eq!(
            tree["components"]["button"]["primary"]["default"]["value"],
            "#ffd935"
        );
        assert_eq!(
            tree["semantic"]["color"]["primary"]["base"]["description"],
            "Brand primary"
        );
        assert_eq!(tree["core"]["typography"]["font-weight"]["bold"]["value"], 700);
    }

    #[test]
    fn test_merged_tokens_keep_raw_references() {
        let out = TempDir::new().unwrap();
        build(&config_for("movement", out.path())).unwrap();
        let merged: serde_json::Value =
            serde_json::from_str(&read(out.path().join("dist").join("sd-tokens.json"))).unwrap();
        // `color` is defined by core and semantic; semantic comes later and wins.
        assert_eq!(
            merged["tokens"]["color"]["primary"]["base"]["value"],
            "{color.moveus-marigold.500}"
        );
        assert!(merged["tokens"]["color"].get("moveus-marigold").is_none());
        assert!(merged["tokens"]["button"].is_object());
    }

    #[test]
    fn test_docs_list_tokens_by_category() {
        let out = TempDir::new().unwrap();
        build(&config_for("movement", out.path())).unwrap();
        let html = read(out.path().join("token-documentation.html"));
        assert!(html.contains("<title>Movement Labs Design Tokens</title>"));
        assert!(html.contains(
            r#"data-token-name="--components-button-primary-default" data-category="components""#
        ));
        assert!(html.contains(r#"<section id="interactions">"#));
        assert!(html.contains(r#"id="token-search""#));
    }

    #[test]
    fn test_build_is_idempotent() {
        let out = TempDir::new().unwrap();
        let first = build(&config_for("movement", out.path())).unwrap();
        let snapshot: Vec<String> = first.written.iter().cloned().map(read).collect();

        let second = build(&config_for("movement", out.path())).unwrap();
        let again: Vec<String> = second.written.iter().cloned().map(read).collect();
        assert_eq!(snapshot, again);
    }
}

#[test]
fn test_cycle_does_not_abort_build() {
    let out = TempDir::new().unwrap();
    let report = build(&config_for("cycle", out.path())).unwrap();
    assert_eq!(report.diagnostics.len(), 2);
    let css = read(out.path().join("dist").join("movement-tokens.css"));
    assert!(css.contains("--core-a-x: {b.y};"));
    assert!(css.contains("--core-b-y: {a.x};"));
}

#[test]
fn test_malformed_input_fails_the_build() {
    let out = TempDir::new().unwrap();
    let result = build(&config_for("malformed", out.path()));
    assert!(matches!(result, Err(TokenError::Load(_))));
    assert!(!out.path().join("dist").exists(), "nothing is written on failure");
}

#[test]
fn test_unwritable_output_is_fatal() {
    let out = TempDir::new().unwrap();
    // A file where the output directory should be.
    let blocker = out.path().join("dist");
    fs::write(&blocker, "not a directory").unwrap();
    let result = build(&config_for("movement", out.path()));
    assert!(matches!(result, Err(TokenError::Emit(_))));
}

#[test]
fn test_composite_value_is_carried_through() {
    let tokens = TempDir::new().unwrap();
    fs::write(
        tokens.path().join("core.json"),
        r#"{"core":{"shadow":{"sm":{"value":{"x":0,"y":1,"blur":2},"type":"shadow"}}}}"#,
    )
    .unwrap();

    let out = TempDir::new().unwrap();
    let config = BuildConfig {
        tokens_dir: tokens.path().to_path_buf(),
        ..config_for("unused", out.path())
    };
    let report = build(&config).unwrap();
    assert!(report.diagnostics.is_empty());
    assert_eq!(report.token_count, 1);

    let css = read(out.path().join("dist").join("movement-tokens.css"));
    assert!(css.contains(r#"  --core-shadow-sm: {"x":0,"y":1,"blur":2};"#));

    let js = read(out.path().join("dist").join("tokens.js"));
    let json = js
        .strip_prefix("export default ")
        .and_then(|s| s.strip_suffix(";\n"))
        .unwrap();
    let tree: serde_json::Value = serde_json::from_str(json).unwrap();
    assert_eq!(
        tree["core"]["shadow"]["sm"]["value"],
        serde_json::json!({ "x": 0, "y": 1, "blur": 2 })
    );
}

#[test]
fn test_empty_token_dir_builds_empty_root() {
    let tokens = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let config = BuildConfig {
        tokens_dir: tokens.path().to_path_buf(),
        write_root_copy: false,
        ..config_for("unused", out.path())
    };
    let report = build(&config).unwrap();
    assert_eq!(report.token_count, 0);
    assert_eq!(report.written.len(), 4);
    let css = read(out.path().join("dist").join("movement-tokens.css"));
    assert!(css.contains(":root {\n}\n"));
}
