use crate::ast::{Category, TokenDocument};
use std::fmt::Write;

/// One `--name: value;` declaration derived from a token leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssVariable {
    pub name: String,
    pub value: String,
    /// `None` when the name carries no known category prefix.
    pub category: Option<Category>,
}

impl CssVariable {
    pub fn new(name: String, value: String) -> Self {
        let category = category_for_name(&name);
        CssVariable {
            name,
            value,
            category,
        }
    }
}

/// Infers the category of a variable from its `--<category>-` prefix.
pub fn category_for_name(name: &str) -> Option<Category> {
    let rest = name.strip_prefix("--")?;
    Category::ALL.into_iter().find(|c| {
        rest.strip_prefix(c.name())
            .is_some_and(|tail| tail.starts_with('-'))
    })
}

/// Lists one variable per leaf of `document`, in category then document order.
pub fn variables(document: &TokenDocument) -> Vec<CssVariable> {
    let mut vars = Vec::new();
    for (category, group) in document.iter() {
        let mut path = vec![category.name()];
        group.for_each_leaf(&mut path, &mut |segments, token| {
            vars.push(CssVariable::new(
                format!("--{}", segments.join("-")),
                token.value.to_string(),
            ));
        });
    }
    vars
}

#[derive(Debug, Clone)]
pub struct CssOptions {
    pub banner: String,
}

impl Default for CssOptions {
    fn default() -> Self {
        CssOptions {
            banner: "Movement Design System Tokens".to_string(),
        }
    }
}

// (selector, declarations)
type Rule = (&'static str, &'static [(&'static str, &'static str)]);

const BODY: Rule = (
    "body",
    &[
        ("font-family", "var(--core-typography-font-family-body)"),
        ("color", "var(--semantic-color-foreground-base, #ffffff)"),
        ("background-color", "var(--semantic-color-background-base, #000000)"),
        ("line-height", "1.5"),
        ("margin", "0"),
        ("padding", "0"),
    ],
);

// Font size token per heading level.
const HEADINGS: [(&str, &str); 6] = [
    ("h1", "6xl"),
    ("h2", "5xl"),
    ("h3", "4xl"),
    ("h4", "3xl"),
    ("h5", "2xl"),
    ("h6", "xl"),
];

const ELEMENT_RULES: &[Rule] = &[
    (
        "p",
        &[
            ("font-family", "var(--core-typography-font-family-body, \"Neue Haas Unica Pro\")"),
            ("font-size", "var(--core-typography-font-size-md, 16px)"),
            ("color", "var(--semantic-color-foreground-base, #ffffff)"),
            ("line-height", "1.6"),
            ("margin-bottom", "1em"),
        ],
    ),
    (
        "a",
        &[
            ("color", "var(--semantic-color-primary-base, #ffd935)"),
            ("text-decoration", "none"),
            ("transition", "color 0.2s ease"),
        ],
    ),
    (
        "a:hover",
        &[
            ("color", "var(--semantic-color-primary-darken, #ddba22)"),
            ("text-decoration", "underline"),
        ],
    ),
    (
        "button",
        &[
            ("font-family", "var(--core-typography-font-family-body, \"Neue Haas Unica Pro\")"),
            ("font-size", "var(--core-typography-font-size-md, 16px)"),
            ("font-weight", "var(--core-typography-font-weight-medium, Medium)"),
            (
                "background-color",
                "var(--components-button-primary-default, var(--semantic-color-primary-base, #ffd935))",
            ),
            ("color", "var(--semantic-color-foreground-inverse, #000000)"),
            ("border", "none"),
            ("border-radius", "4px"),
            ("padding", "0.5em 1em"),
            ("cursor", "pointer"),
            ("transition", "background-color 0.2s ease"),
        ],
    ),
    (
        "button:hover",
        &[(
            "background-color",
            "var(--components-button-primary-hover, var(--semantic-color-primary-darken, #ddba22))",
        )],
    ),
    (
        "strong",
        &[("font-weight", "var(--core-typography-font-weight-bold, Bold)")],
    ),
    ("em", &[("font-style", "italic")]),
    (
        "code",
        &[
            ("font-family", "monospace"),
            ("background-color", "var(--semantic-color-background-muted, rgba(255, 255, 255, 0.1))"),
            ("padding", "0.2em 0.4em"),
            ("border-radius", "3px"),
            ("font-size", "0.9em"),
        ],
    ),
    (
        "pre",
        &[
            ("font-family", "monospace"),
            ("background-color", "var(--semantic-color-background-muted, rgba(255, 255, 255, 0.1))"),
            ("padding", "1em"),
            ("border-radius", "4px"),
            ("overflow-x", "auto"),
            ("line-height", "1.4"),
        ],
    ),
    ("ul, ol", &[("padding-left", "2em"), ("margin-bottom", "1em")]),
    ("li", &[("margin-bottom", "0.5em")]),
    (
        "table",
        &[
            ("border-collapse", "collapse"),
            ("width", "100%"),
            ("margin-bottom", "1em"),
        ],
    ),
    (
        "th, td",
        &[
            ("border", "1px solid var(--semantic-color-border-base, rgba(255, 255, 255, 0.2))"),
            ("padding", "0.5em"),
            ("text-align", "left"),
        ],
    ),
    (
        "th",
        &[
            ("background-color", "var(--semantic-color-background-muted, rgba(255, 255, 255, 0.1))"),
            ("font-weight", "var(--core-typography-font-weight-bold, Bold)"),
        ],
    ),
];

/// Renders the stylesheet: a `:root` block with every variable followed by
/// the semantic element rules.
pub fn render(vars: &[CssVariable], options: &CssOptions) -> String {
    let mut css = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(css, "/* {} */\n", options.banner);
    css.push_str(":root {\n");
    for var in vars {
        let _ = writeln!(css, "  {}: {};", var.name, var.value);
    }
    css.push_str("}\n\n");

    css.push_str("/* Semantic HTML Element Styles */\n\n");
    write_rule(&mut css, BODY.0, BODY.1.iter().map(|&(p, v)| (p, v.to_string())));

    for (tag, size) in HEADINGS {
        let declarations = [
            (
                "font-family",
                "var(--core-typography-font-family-heading, \"TWK Everett\")".to_string(),
            ),
            (
                "font-weight",
                "var(--core-typography-font-weight-bold, Bold)".to_string(),
            ),
            (
                "font-size",
                format!("var(--core-typography-font-size-{size}, 16px)"),
            ),
            (
                "color",
                "var(--semantic-color-foreground-base, #ffffff)".to_string(),
            ),
            ("margin-bottom", "0.5em".to_string()),
            ("margin-top", "0.7em".to_string()),
        ];
        write_rule(&mut css, tag, declarations);
    }

    for &(selector, declarations) in ELEMENT_RULES {
        write_rule(
            &mut css,
            selector,
            declarations.iter().map(|&(p, v)| (p, v.to_string())),
        );
    }
    css
}

fn write_rule<I>(css: &mut String, selector: &str, declarations: I)
where
    I: IntoIterator<Item = (&'static str, String)>,
{
    let _ = writeln!(css, "{selector} {{");
    for (property, value) in declarations {
        let _ = writeln!(css, "  {property}: {value};");
    }
    css.push_str("}\n\n");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_for_name() {
        assert_eq!(category_for_name("--core-color-red"), Some(Category::Core));
        assert_eq!(
            category_for_name("--components-button-bg"),
            Some(Category::Components)
        );
        assert_eq!(category_for_name("--corexyz"), None);
        assert_eq!(category_for_name("core-color"), None);
        assert_eq!(category_for_name("--brand-primary"), None);
    }

    #[test]
    fn test_render_root_block() {
        let vars = vec![CssVariable::new(
            "--core-space-sm".to_string(),
            "4px".to_string(),
        )];
        let css = render(&vars, &CssOptions::default());
        assert!(css.starts_with("/* Movement Design System Tokens */\n\n:root {\n  --core-space-sm: 4px;\n}\n\n"));
        assert!(css.contains("h1 {\n"));
        assert!(css.contains("font-size: var(--core-typography-font-size-6xl, 16px);"));
        assert!(css.contains("th, td {\n  border: 1px solid"));
        assert!(css.ends_with("}\n\n"));
    }
}
