use tokens_core::ast::{Category, TokenDocument};
use tokens_core::css::CssOptions;
use tokens_core::loader::parse_category;
use tokens_core::{resolve_tokens, BuildConfig};

fn main() {
    let core = r##"{
        "core": {
            "color": { "red": { "500": { "value": "#ff0000", "type": "color" } } },
            "space": { "md": { "value": "16px" } }
        }
    }"##;
    let semantic = r#"{
        "semantic": {
            "color": { "error": { "value": "{color.red.500}" } },
            "space": { "gutter": { "value": "{space.md}" } }
        }
    }"#;

    let mut document = TokenDocument::new();
    for (category, source) in [(Category::Core, core), (Category::Semantic, semantic)] {
        match parse_category(source, &format!("{category}.json"), category) {
            Ok(Some(group)) => document.insert(category, group),
            Ok(None) => {}
            Err(e) => {
                eprintln!("Failed to load tokens: {:?}", miette::Report::new(e));
                return;
            }
        }
    }

    match resolve_tokens(&document, &BuildConfig::default()) {
        Ok(resolved) => {
            for diagnostic in &resolved.diagnostics {
                eprintln!("warning: {diagnostic}");
            }
            println!("{}", resolved.to_css(&CssOptions::default()));
            match resolved.to_js() {
                Ok(js) => println!("{js}"),
                Err(e) => eprintln!("Failed to serialize tokens: {e}"),
            }
        }
        Err(e) => eprintln!("Failed to resolve tokens: {e:?}"),
    }
}
