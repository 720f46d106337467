use crate::ast::{Reference, TokenDocument, TokenValue};
use crate::flatten::FlatTable;
use std::collections::HashSet;
use std::fmt::{self, Display};

/// Which references a [`FallbackRule`] applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matcher {
    Prefix(&'static str),
    PrefixExcept {
        prefix: &'static str,
        except: &'static str,
    },
    AnyPrefix(&'static [&'static str]),
    Exact(&'static [&'static str]),
}

impl Matcher {
    pub fn matches(&self, path: &str) -> bool {
        match *self {
            Matcher::Prefix(prefix) => path.starts_with(prefix),
            Matcher::PrefixExcept { prefix, except } => {
                path.starts_with(prefix) && !path.starts_with(except)
            }
            Matcher::AnyPrefix(prefixes) => prefixes.iter().any(|p| path.starts_with(p)),
            Matcher::Exact(names) => names.iter().any(|n| *n == path),
        }
    }
}

/// What a matching [`FallbackRule`] does with the reference path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Retry as `{<prefix><path>}`, provided that key exists.
    Redirect(&'static str),
    /// The path is a plain name, not a reference; it resolves to itself.
    Literal,
    /// `dimension.<n>...` resolves to `<n>` as written when `<n>` starts
    /// with an integer, so `dimension.24px` gives `24px`.
    NumericSegment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallbackRule {
    pub matcher: Matcher,
    pub action: Action,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleOutcome {
    /// Continue resolution at this path.
    Redirect(String),
    /// Final literal value.
    Value(String),
}

impl FallbackRule {
    /// Applies the rule to a reference path that had no direct match.
    /// Returns `None` when the rule does not match or cannot produce a result.
    pub fn apply(&self, path: &str, table: &FlatTable) -> Option<RuleOutcome> {
        if !self.matcher.matches(path) {
            return None;
        }
        match self.action {
            Action::Redirect(prefix) => {
                let target = format!("{prefix}{path}");
                table
                    .contains_key(&target)
                    .then_some(RuleOutcome::Redirect(target))
            }
            Action::Literal => Some(RuleOutcome::Value(path.to_string())),
            Action::NumericSegment => {
                let segment = path.split('.').nth(1)?;
                starts_with_integer(segment).then(|| RuleOutcome::Value(segment.to_string()))
            }
        }
    }
}

// An optional sign followed by at least one ASCII digit.
fn starts_with_integer(segment: &str) -> bool {
    let digits = segment.strip_prefix(['+', '-']).unwrap_or(segment);
    digits.starts_with(|c: char| c.is_ascii_digit())
}

/// The built-in fallback rules, evaluated in order.
pub fn default_rules() -> Vec<FallbackRule> {
    vec![
        FallbackRule {
            matcher: Matcher::PrefixExcept {
                prefix: "color.",
                except: "color.neutrals",
            },
            action: Action::Redirect("semantic."),
        },
        FallbackRule {
            matcher: Matcher::AnyPrefix(&[
                "navigation.",
                "button.",
                "feedback.",
                "table.",
                "modal.",
                "input.",
            ]),
            action: Action::Redirect("components."),
        },
        FallbackRule {
            matcher: Matcher::AnyPrefix(&["background.", "foreground."]),
            action: Action::Redirect("semantic.color."),
        },
        FallbackRule {
            matcher: Matcher::Exact(&["MoveETH", "MOVE"]),
            action: Action::Literal,
        },
        FallbackRule {
            matcher: Matcher::Prefix("dimension."),
            action: Action::NumericSegment,
        },
    ]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// The value was not a reference.
    Literal,
    Resolved,
    /// No entry or rule matched `missing`.
    Unresolved { missing: String },
    /// `path` was reached twice in one chain.
    Cycle { path: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub value: String,
    pub status: Status,
}

/// A recoverable problem found while resolving one token. The token keeps the
/// unresolved reference text of the failing step in the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveDiagnostic {
    Unresolved {
        token: String,
        reference: String,
        missing: String,
    },
    Cycle {
        token: String,
        reference: String,
        path: String,
    },
}

impl Display for ResolveDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveDiagnostic::Unresolved {
                token,
                reference,
                missing,
            } => {
                if reference.trim_matches(|c| c == '{' || c == '}') == missing {
                    write!(f, "{token}: reference not found: {reference}")
                } else {
                    write!(f, "{token}: reference not found: {reference} (missing `{missing}`)")
                }
            }
            ResolveDiagnostic::Cycle {
                token,
                reference,
                path,
            } => write!(f, "{token}: circular reference detected at `{path}` while resolving {reference}"),
        }
    }
}

pub struct ResolveOutcome {
    pub document: TokenDocument,
    pub diagnostics: Vec<ResolveDiagnostic>,
}

fn braced(path: &str) -> String {
    Reference { path }.to_string()
}

enum Chain {
    Found(String),
    Missing(String),
    Cycle(String),
}

pub struct Resolver<'t> {
    table: &'t FlatTable,
    rules: Vec<FallbackRule>,
}

impl<'t> Resolver<'t> {
    pub fn new(table: &'t FlatTable) -> Self {
        Self::with_rules(table, default_rules())
    }

    pub fn with_rules(table: &'t FlatTable, rules: Vec<FallbackRule>) -> Self {
        Resolver { table, rules }
    }

    /// Resolves a single token value. Literals are returned unchanged. When
    /// a chain breaks, the value is the reference at the step that failed:
    /// the missing link, or the path reached a second time.
    pub fn resolve_value(&self, value: &str) -> Resolution {
        let Some(reference) = Reference::parse(value) else {
            return Resolution {
                value: value.to_string(),
                status: Status::Literal,
            };
        };

        let mut visited = HashSet::new();
        let (value, status) = match self.follow(reference.path, &mut visited) {
            Chain::Found(resolved) => (resolved, Status::Resolved),
            Chain::Missing(missing) => (braced(&missing), Status::Unresolved { missing }),
            Chain::Cycle(path) => (braced(&path), Status::Cycle { path }),
        };
        Resolution { value, status }
    }

    // One step of a reference chain. `visited` holds every path already
    // followed in this chain.
    fn follow(&self, path: &str, visited: &mut HashSet<String>) -> Chain {
        if visited.contains(path) {
            return Chain::Cycle(path.to_string());
        }

        let direct = self
            .table
            .get(path)
            .or_else(|| self.table.find_case_insensitive(path).map(|(_, v)| v));
        if let Some(found) = direct {
            return match Reference::parse(found) {
                Some(next) => {
                    visited.insert(path.to_string());
                    self.follow(next.path, visited)
                }
                None => Chain::Found(found.to_string()),
            };
        }

        for rule in &self.rules {
            match rule.apply(path, self.table) {
                Some(RuleOutcome::Redirect(target)) => return self.follow(&target, visited),
                Some(RuleOutcome::Value(value)) => return Chain::Found(value),
                None => {}
            }
        }

        Chain::Missing(path.to_string())
    }

    /// Returns a copy of `document` with every reference replaced by its
    /// resolved value. Each token is resolved independently against the
    /// unmodified table.
    pub fn resolve_document(&self, document: &TokenDocument) -> ResolveOutcome {
        let mut resolved = document.clone();
        let mut diagnostics = Vec::new();

        for (category, group) in resolved.iter_mut() {
            let mut path = vec![category.name().to_string()];
            group.for_each_leaf_mut(&mut path, &mut |segments, token| {
                let TokenValue::Text(text) = &token.value else {
                    return;
                };
                let resolution = self.resolve_value(text);
                let token_path = segments.join(".");
                let diagnostic = match resolution.status {
                    Status::Literal | Status::Resolved => None,
                    Status::Unresolved { missing } => Some(ResolveDiagnostic::Unresolved {
                        token: token_path,
                        reference: text.clone(),
                        missing,
                    }),
                    Status::Cycle { path } => Some(ResolveDiagnostic::Cycle {
                        token: token_path,
                        reference: text.clone(),
                        path,
                    }),
                };
                if let Some(diagnostic) = diagnostic {
                    log::warn!("{diagnostic}");
                    diagnostics.push(diagnostic);
                }
                token.value = TokenValue::Text(resolution.value);
            });
        }

        ResolveOutcome {
            document: resolved,
            diagnostics,
        }
    }
}
