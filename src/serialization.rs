use crate::ast::{Token, TokenDocument, TokenGroup, TokenNode, TokenValue};
use serde_json::{Map, Value};

/// Converts the (resolved) document back into the JSON token shape:
/// `{ "<category>": { ... { "value": ..., "type": ... } } }`.
pub fn to_json_value(document: &TokenDocument) -> Value {
    let mut root = Map::new();
    for (category, group) in document.iter() {
        root.insert(category.name().to_string(), group_to_value(group));
    }
    Value::Object(root)
}

/// The merged intermediate: every category's top-level groups in one
/// `tokens` object, later categories replacing earlier keys.
pub fn merged_tokens(document: &TokenDocument) -> Value {
    let mut tokens = Map::new();
    for (_, group) in document.iter() {
        for entry in &group.entries {
            tokens.insert(entry.key.clone(), node_to_value(&entry.node));
        }
    }
    let mut root = Map::new();
    root.insert("tokens".to_string(), Value::Object(tokens));
    Value::Object(root)
}

/// Renders the resolved tree as an importable ES module.
///
/// # Errors
/// Returns a `serde_json::Error` if serialization fails.
pub fn to_js_module(document: &TokenDocument) -> Result<String, serde_json::Error> {
    let json = serde_json::to_string_pretty(&to_json_value(document))?;
    Ok(format!("export default {json};\n"))
}

fn group_to_value(group: &TokenGroup) -> Value {
    let mut map = Map::new();
    for entry in &group.entries {
        map.insert(entry.key.clone(), node_to_value(&entry.node));
    }
    Value::Object(map)
}

fn node_to_value(node: &TokenNode) -> Value {
    match node {
        TokenNode::Leaf(token) => token_to_value(token),
        TokenNode::Group(group) => group_to_value(group),
    }
}

fn token_to_value(token: &Token) -> Value {
    let mut map = Map::new();
    let value = match &token.value {
        TokenValue::Text(s) => Value::String(s.clone()),
        TokenValue::Number(n) => Value::Number(n.clone()),
        TokenValue::Boolean(b) => Value::Bool(*b),
        TokenValue::Composite(value) => value.clone(),
    };
    map.insert("value".to_string(), value);
    if let Some(token_type) = &token.token_type {
        map.insert("type".to_string(), Value::String(token_type.clone()));
    }
    if let Some(description) = &token.description {
        map.insert("description".to_string(), Value::String(description.clone()));
    }
    for (key, meta) in &token.extensions {
        map.insert(key.clone(), meta.clone());
    }
    Value::Object(map)
}
