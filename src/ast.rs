use std::fmt::{self, Display};

/// A named top-level partition of the token set.
///
/// The declaration order is the resolution precedence: `Core` first,
/// `Interactions` last. Later categories may reference earlier ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Core,
    Semantic,
    Components,
    Interactions,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Core,
        Category::Semantic,
        Category::Components,
        Category::Interactions,
    ];

    /// The key used both as the file stem (`core.json`) and as the top-level
    /// JSON key inside that file.
    pub fn name(self) -> &'static str {
        match self {
            Category::Core => "core",
            Category::Semantic => "semantic",
            Category::Components => "components",
            Category::Interactions => "interactions",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }

    /// Human readable section title used by the documentation page.
    pub fn title(self) -> &'static str {
        match self {
            Category::Core => "Core",
            Category::Semantic => "Semantic",
            Category::Components => "Component",
            Category::Interactions => "Interaction",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    Text(String),
    Number(serde_json::Number),
    Boolean(bool),
    /// An object, array or `null` value such as a composite shadow. Never
    /// resolved; its textual form is compact JSON.
    Composite(serde_json::Value),
}

impl Display for TokenValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenValue::Text(s) => f.write_str(s),
            TokenValue::Number(n) => write!(f, "{n}"),
            TokenValue::Boolean(b) => write!(f, "{b}"),
            TokenValue::Composite(value) => write!(f, "{value}"),
        }
    }
}

/// A token leaf: a JSON object carrying a `value` key.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub value: TokenValue,
    pub token_type: Option<String>,
    pub description: Option<String>,
    // Any other metadata keys, in source order.
    pub extensions: Vec<(String, serde_json::Value)>,
}

impl Token {
    pub fn new(value: TokenValue) -> Self {
        Token {
            value,
            token_type: None,
            description: None,
            extensions: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenNode {
    Leaf(Token),
    Group(TokenGroup),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TokenGroup {
    pub entries: Vec<Entry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub key: String,
    pub node: TokenNode,
}

impl TokenGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: impl Into<String>, node: TokenNode) {
        self.entries.push(Entry {
            key: key.into(),
            node,
        });
    }

    pub fn get(&self, key: &str) -> Option<&TokenNode> {
        self.entries.iter().find(|e| e.key == key).map(|e| &e.node)
    }

    /// Depth-first walk over every leaf, calling `visit` with the path of
    /// segments leading to it (starting with `prefix`).
    pub fn for_each_leaf<'a, F>(&'a self, prefix: &mut Vec<&'a str>, visit: &mut F)
    where
        F: FnMut(&[&'a str], &'a Token),
    {
        for entry in &self.entries {
            prefix.push(&entry.key);
            match &entry.node {
                TokenNode::Leaf(token) => visit(prefix, token),
                TokenNode::Group(group) => group.for_each_leaf(prefix, visit),
            }
            prefix.pop();
        }
    }

    /// Mutable counterpart of [`TokenGroup::for_each_leaf`].
    pub fn for_each_leaf_mut<F>(&mut self, prefix: &mut Vec<String>, visit: &mut F)
    where
        F: FnMut(&[String], &mut Token),
    {
        for entry in &mut self.entries {
            prefix.push(entry.key.clone());
            match &mut entry.node {
                TokenNode::Leaf(token) => visit(prefix, token),
                TokenNode::Group(group) => group.for_each_leaf_mut(prefix, visit),
            }
            prefix.pop();
        }
    }
}

/// The merged token set, one tree per loaded category.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TokenDocument {
    categories: Vec<(Category, TokenGroup)>,
}

impl TokenDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the tree of `category`. Categories are always
    /// kept in precedence order regardless of insertion order.
    pub fn insert(&mut self, category: Category, group: TokenGroup) {
        match self.categories.binary_search_by_key(&category, |(c, _)| *c) {
            Ok(idx) => self.categories[idx].1 = group,
            Err(idx) => self.categories.insert(idx, (category, group)),
        }
    }

    pub fn get(&self, category: Category) -> Option<&TokenGroup> {
        self.categories
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, g)| g)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, &TokenGroup)> {
        self.categories.iter().map(|(c, g)| (*c, g))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Category, &mut TokenGroup)> {
        self.categories.iter_mut().map(|(c, g)| (*c, g))
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Number of leaves across all categories.
    pub fn token_count(&self) -> usize {
        let mut count = 0;
        for (_, group) in self.iter() {
            group.for_each_leaf(&mut Vec::new(), &mut |_, _| count += 1);
        }
        count
    }
}

/// A value of the exact form `{dotted.path}`. An empty path (`{}`) parses
/// but never resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference<'a> {
    pub path: &'a str,
}

impl<'a> Reference<'a> {
    pub fn parse(value: &'a str) -> Option<Self> {
        let path = value.strip_prefix('{')?.strip_suffix('}')?;
        Some(Reference { path })
    }
}

impl Display for Reference<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.path)
    }
}
