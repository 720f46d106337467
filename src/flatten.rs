use crate::ast::{Category, TokenDocument};
use std::collections::HashMap;

/// Dotted path → textual value lookup table built from a [`TokenDocument`].
///
/// Keys keep their first insertion order so case-insensitive lookups are
/// deterministic. The table is immutable once built by [`flatten`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlatTable {
    keys: Vec<String>,
    values: HashMap<String, String>,
}

impl FlatTable {
    pub fn get(&self, path: &str) -> Option<&str> {
        self.values.get(path).map(String::as_str)
    }

    pub fn contains_key(&self, path: &str) -> bool {
        self.values.contains_key(path)
    }

    /// First key (in insertion order) equal to `path` ignoring ASCII case.
    pub fn find_case_insensitive(&self, path: &str) -> Option<(&str, &str)> {
        self.keys
            .iter()
            .find(|k| k.eq_ignore_ascii_case(path))
            .and_then(|k| self.values.get(k).map(|v| (k.as_str(), v.as_str())))
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.keys
            .iter()
            .filter_map(|k| self.values.get(k).map(|v| (k.as_str(), v.as_str())))
    }

    fn insert(&mut self, key: String, value: String) {
        match self.values.get_mut(&key) {
            Some(existing) => {
                if *existing != value {
                    log::trace!("`{key}` overwritten: {existing} -> {value}");
                }
                *existing = value;
            }
            None => {
                self.keys.push(key.clone());
                self.values.insert(key, value);
            }
        }
    }

    fn insert_if_absent(&mut self, key: &str, value: String) {
        if !self.contains_key(key) {
            self.insert(key.to_string(), value);
        }
    }
}

impl FromIterator<(String, String)> for FlatTable {
    /// Builds a table directly from entries; later duplicates win.
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut table = FlatTable::default();
        for (key, value) in iter {
            table.insert(key, value);
        }
        table
    }
}

/// A hand-authored entry added to the table after the document walk. No
/// injection ever replaces a key the walk already produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Injection {
    /// `key` takes the value of `source`, or `default` if `source` is missing.
    Alias {
        key: &'static str,
        source: &'static str,
        default: Option<&'static str>,
    },
    /// A name that stands for itself or a fixed value.
    Literal {
        key: &'static str,
        value: &'static str,
    },
    /// Registers a respelled copy of every key that contains `needle` with
    /// different casing, e.g. `neutrals.whitealpha.100` for
    /// `neutrals.whiteAlpha`.
    CaseVariant { needle: &'static str },
}

/// The built-in injection table.
pub fn default_injections() -> Vec<Injection> {
    vec![
        Injection::CaseVariant {
            needle: "neutrals.whiteAlpha",
        },
        Injection::CaseVariant {
            needle: "neutrals.blackAlpha",
        },
        Injection::Alias {
            key: "background.bg",
            source: "semantic.color.background.base",
            default: Some("#000000"),
        },
        Injection::Alias {
            key: "navigation.bg",
            source: "components.navigation.bg",
            default: Some("#000000"),
        },
        Injection::Literal {
            key: "MoveETH",
            value: "MoveETH",
        },
        Injection::Literal {
            key: "MOVE",
            value: "MOVE",
        },
        Injection::Alias {
            key: "color.neutrals.white",
            source: "core.color.neutrals.white",
            default: Some("#ffffff"),
        },
        Injection::Alias {
            key: "color.neutrals.black",
            source: "core.color.neutrals.black",
            default: Some("#000000"),
        },
        Injection::Literal {
            key: "color.feedback.success",
            value: "#28cf98",
        },
        Injection::Literal {
            key: "color.feedback.error",
            value: "#d82c2d",
        },
        Injection::Literal {
            key: "color.feedback.warning",
            value: "#ea5330",
        },
    ]
}

/// Flattens `document` into a [`FlatTable`].
///
/// Categories are merged in `order`; on colliding keys the later category
/// wins. Categories listed in `order` but absent from the document are
/// skipped, and categories not listed are ignored.
pub fn flatten(document: &TokenDocument, order: &[Category], injections: &[Injection]) -> FlatTable {
    let mut table = FlatTable::default();

    for &category in order {
        let Some(group) = document.get(category) else {
            continue;
        };
        let mut path = vec![category.name()];
        group.for_each_leaf(&mut path, &mut |segments, token| {
            let value = token.value.to_string();
            table.insert(segments.join("."), value.clone());

            let simplified = segments[1..].join(".");
            if simplified.starts_with("color.") {
                table.insert(simplified.replace('.', "-"), value.clone());
            }
            table.insert(simplified, value);
        });
    }

    for injection in injections {
        apply_injection(&mut table, injection);
    }

    log::debug!("Flattened {} token paths", table.len());
    table
}

fn apply_injection(table: &mut FlatTable, injection: &Injection) {
    match *injection {
        Injection::Alias {
            key,
            source,
            default,
        } => {
            if table.contains_key(key) {
                return;
            }
            if let Some(value) = table.get(source).map(str::to_string) {
                table.insert_if_absent(key, value);
            } else if let Some(default) = default {
                table.insert_if_absent(key, default.to_string());
            }
        }
        Injection::Literal { key, value } => table.insert_if_absent(key, value.to_string()),
        Injection::CaseVariant { needle } => {
            let lowered = needle.to_ascii_lowercase();
            let variants: Vec<(String, String)> = table
                .iter()
                .filter_map(|(key, value)| {
                    let idx = key.to_ascii_lowercase().find(&lowered)?;
                    let matched = &key[idx..idx + needle.len()];
                    if matched == needle {
                        return None;
                    }
                    let respelled =
                        format!("{}{}{}", &key[..idx], needle, &key[idx + needle.len()..]);
                    Some((respelled, value.to_string()))
                })
                .collect();
            for (key, value) in variants {
                table.insert_if_absent(&key, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Token, TokenGroup, TokenNode, TokenValue};

    fn leaf(value: &str) -> TokenNode {
        TokenNode::Leaf(Token::new(TokenValue::Text(value.to_string())))
    }

    fn nested(path: &[&str], value: &str) -> TokenGroup {
        let mut node = leaf(value);
        for key in path[1..].iter().rev() {
            let mut group = TokenGroup::new();
            group.push(*key, node);
            node = TokenNode::Group(group);
        }
        let mut root = TokenGroup::new();
        root.push(path[0], node);
        root
    }

    #[test]
    fn test_case_variant_respells_segment() {
        let mut doc = TokenDocument::new();
        doc.insert(
            Category::Core,
            nested(&["color", "neutrals", "whitealpha", "100"], "rgba(255,255,255,0.1)"),
        );
        let table = flatten(&doc, &Category::ALL, &default_injections());
        assert_eq!(
            table.get("color.neutrals.whiteAlpha.100"),
            Some("rgba(255,255,255,0.1)")
        );
        assert_eq!(
            table.get("core.color.neutrals.whiteAlpha.100"),
            Some("rgba(255,255,255,0.1)")
        );
    }

    #[test]
    fn test_alias_prefers_source_over_default() {
        let mut doc = TokenDocument::new();
        doc.insert(
            Category::Semantic,
            nested(&["color", "background", "base"], "#111111"),
        );
        let table = flatten(&doc, &Category::ALL, &default_injections());
        assert_eq!(table.get("background.bg"), Some("#111111"));
        assert_eq!(table.get("navigation.bg"), Some("#000000"));
    }

    #[test]
    fn test_injection_does_not_override_walked_entry() {
        let mut doc = TokenDocument::new();
        doc.insert(
            Category::Semantic,
            nested(&["color", "feedback", "success"], "#00ff00"),
        );
        let table = flatten(&doc, &Category::ALL, &default_injections());
        assert_eq!(table.get("color.feedback.success"), Some("#00ff00"));
        assert_eq!(table.get("color.feedback.error"), Some("#d82c2d"));
    }

    #[test]
    fn test_unlisted_category_is_ignored() {
        let mut doc = TokenDocument::new();
        doc.insert(Category::Interactions, nested(&["motion", "fast"], "100ms"));
        let table = flatten(&doc, &[Category::Core], &[]);
        assert!(table.is_empty());
    }
}
