//! Static, self-contained token catalog page.

use crate::ast::Category;
use crate::css::CssVariable;
use crate::utils::escape_html;
use std::fmt::Write;

#[derive(Debug, Clone)]
pub struct DocsOptions {
    pub title: String,
}

impl Default for DocsOptions {
    fn default() -> Self {
        DocsOptions {
            title: "Movement Labs Design Tokens".to_string(),
        }
    }
}

/// Variables grouped per category, in [`Category::ALL`] order. Variables
/// without a category are only listed in the "All Tokens" section.
pub fn group_by_category(vars: &[CssVariable]) -> Vec<(Category, Vec<&CssVariable>)> {
    Category::ALL
        .into_iter()
        .map(|category| {
            let members = vars
                .iter()
                .filter(|v| v.category == Some(category))
                .collect();
            (category, members)
        })
        .collect()
}

const STYLE: &str = r#"    :root {
      --font-family: system-ui, -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Oxygen, Ubuntu, Cantarell, 'Open Sans', 'Helvetica Neue', sans-serif;
      --color-bg: #f8f9fa;
      --color-text: #212529;
      --color-primary: #0d6efd;
      --color-border: #dee2e6;
      --color-card: #ffffff;
      --spacing-sm: 0.5rem;
      --spacing-md: 1rem;
      --spacing-lg: 1.5rem;
      --spacing-xl: 2rem;
      --radius-sm: 0.25rem;
      --radius-md: 0.5rem;
      --shadow-sm: 0 1px 3px rgba(0,0,0,0.12), 0 1px 2px rgba(0,0,0,0.24);
    }

    body {
      font-family: var(--font-family);
      background-color: var(--color-bg);
      color: var(--color-text);
      line-height: 1.6;
      margin: 0;
      padding: 0;
    }

    .container {
      max-width: 1200px;
      margin: 0 auto;
      padding: var(--spacing-lg);
    }

    header {
      margin-bottom: var(--spacing-xl);
      border-bottom: 1px solid var(--color-border);
      padding-bottom: var(--spacing-md);
    }

    h1 {
      font-size: 2.5rem;
      margin-top: 0;
    }

    h2 {
      font-size: 1.75rem;
      margin-top: var(--spacing-xl);
      padding-bottom: var(--spacing-sm);
      border-bottom: 1px solid var(--color-border);
    }

    .token-grid {
      display: grid;
      grid-template-columns: repeat(auto-fill, minmax(280px, 1fr));
      gap: var(--spacing-md);
      margin-bottom: var(--spacing-xl);
    }

    .token-card {
      background-color: var(--color-card);
      border-radius: var(--radius-md);
      box-shadow: var(--shadow-sm);
      padding: var(--spacing-md);
      display: flex;
      flex-direction: column;
    }

    .token-name {
      font-weight: bold;
      margin-bottom: var(--spacing-sm);
      word-break: break-all;
    }

    .token-value {
      font-family: monospace;
      background-color: var(--color-bg);
      padding: var(--spacing-sm);
      border-radius: var(--radius-sm);
      word-break: break-all;
    }

    .color-preview {
      width: 100%;
      height: 40px;
      border-radius: var(--radius-sm);
      margin-bottom: var(--spacing-sm);
      border: 1px solid var(--color-border);
    }

    #token-search {
      width: 100%;
      padding: var(--spacing-md);
      margin-bottom: var(--spacing-lg);
      border: 1px solid var(--color-border);
      border-radius: var(--radius-md);
      font-size: 1rem;
    }

    .category-nav {
      display: flex;
      flex-wrap: wrap;
      gap: var(--spacing-sm);
      margin-bottom: var(--spacing-lg);
    }

    .category-nav a {
      text-decoration: none;
      color: var(--color-text);
      background-color: var(--color-card);
      padding: var(--spacing-sm) var(--spacing-md);
      border-radius: var(--radius-md);
      border: 1px solid var(--color-border);
    }

    @media (max-width: 768px) {
      .token-grid {
        grid-template-columns: 1fr;
      }
    }
"#;

const SCRIPT: &str = r"    document.addEventListener('DOMContentLoaded', function() {
      const searchInput = document.getElementById('token-search');
      searchInput.addEventListener('input', function() {
        const searchTerm = this.value.toLowerCase();
        document.querySelectorAll('.token-card').forEach(card => {
          const tokenName = card.dataset.tokenName.toLowerCase();
          card.style.display = tokenName.includes(searchTerm) ? '' : 'none';
        });
      });
    });
";

fn is_color(value: &str) -> bool {
    value.contains('#') || value.contains("rgb")
}

fn write_card(html: &mut String, var: &CssVariable) {
    let name = escape_html(&var.name);
    let value = escape_html(&var.value);
    let category = var.category.map_or("other", Category::name);
    let _ = writeln!(
        html,
        r#"        <div class="token-card" data-token-name="{name}" data-category="{category}">"#
    );
    if is_color(&var.value) {
        let _ = writeln!(
            html,
            r#"          <div class="color-preview" style="background-color: {value};"></div>"#
        );
    }
    let _ = writeln!(html, r#"          <div class="token-name">{name}</div>"#);
    let _ = writeln!(html, r#"          <div class="token-value">{value}</div>"#);
    html.push_str("        </div>\n");
}

fn write_section<'a>(
    html: &mut String,
    id: &str,
    heading: &str,
    vars: impl IntoIterator<Item = &'a CssVariable>,
) {
    let _ = writeln!(html, r#"    <section id="{id}">"#);
    let _ = writeln!(html, "      <h2>{heading}</h2>");
    html.push_str("      <div class=\"token-grid\">\n");
    for var in vars {
        write_card(html, var);
    }
    html.push_str("      </div>\n    </section>\n\n");
}

/// Renders the catalog page for `vars`.
pub fn render(vars: &[CssVariable], options: &DocsOptions) -> String {
    let title = escape_html(&options.title);
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("  <meta charset=\"UTF-8\">\n");
    html.push_str("  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    let _ = writeln!(html, "  <title>{title}</title>");
    let _ = write!(html, "  <style>\n{STYLE}  </style>\n</head>\n<body>\n");
    html.push_str("  <div class=\"container\">\n    <header>\n");
    let _ = writeln!(html, "      <h1>{title}</h1>");
    let _ = writeln!(
        html,
        "      <p>This documentation displays all the design tokens used in the design system ({} tokens).</p>",
        vars.len()
    );
    html.push_str("    </header>\n\n");
    html.push_str(
        "    <input type=\"text\" id=\"token-search\" placeholder=\"Search tokens...\">\n\n",
    );

    html.push_str("    <nav class=\"category-nav\">\n");
    for category in Category::ALL {
        let _ = writeln!(
            html,
            r##"      <a href="#{}">{}</a>"##,
            category.name(),
            capitalize(category.name())
        );
    }
    html.push_str("      <a href=\"#all\">All Tokens</a>\n    </nav>\n\n");

    for (category, members) in group_by_category(vars) {
        let heading = format!("{} Tokens", category.title());
        write_section(&mut html, category.name(), &heading, members);
    }
    write_section(&mut html, "all", "All Tokens", vars);

    let _ = write!(
        html,
        "  </div>\n\n  <script>\n{SCRIPT}  </script>\n</body>\n</html>\n"
    );
    html
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
