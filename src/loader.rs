use crate::ast::{Category, Token, TokenDocument, TokenGroup, TokenNode, TokenValue};
use crate::error::LoadError;
use crate::utils::get_offset;
use miette::NamedSource;
use serde_json::{Map, Value};
use std::io::ErrorKind;
use std::path::Path;

/// Loads every category in `categories` from `<dir>/<category>.json`, in the
/// given order. Missing files are skipped; anything else that goes wrong is
/// fatal.
pub fn load_documents(dir: &Path, categories: &[Category]) -> Result<TokenDocument, LoadError> {
    let mut document = TokenDocument::new();
    for &category in categories {
        if let Some(group) = load_category(dir, category)? {
            document.insert(category, group);
        }
    }
    Ok(document)
}

/// Loads a single category file. Returns `Ok(None)` when the file does not
/// exist or does not contain the category key.
pub fn load_category(dir: &Path, category: Category) -> Result<Option<TokenGroup>, LoadError> {
    let path = dir.join(format!("{}.json", category.name()));
    let source = match std::fs::read_to_string(&path) {
        Ok(source) => source,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            log::debug!("{} not found, skipping category `{category}`", path.display());
            return Ok(None);
        }
        Err(source) => return Err(LoadError::Io { path, source }),
    };
    log::debug!("Loading {}", path.display());
    parse_category(&source, &path.to_string_lossy(), category)
}

/// Parses the JSON text of a category file. Only the top-level key named
/// after `category` contributes; other keys are ignored.
pub fn parse_category(
    source: &str,
    file_name: &str,
    category: Category,
) -> Result<Option<TokenGroup>, LoadError> {
    let root: Value = serde_json::from_str(source).map_err(|err| {
        let start = get_offset(source, err.line(), err.column());
        let len = usize::from(start < source.len());
        LoadError::Parse {
            src: NamedSource::new(file_name, source.to_string()),
            span: (start, len).into(),
            message: err.to_string(),
        }
    })?;

    let tree = match root {
        Value::Object(mut members) => members.remove(category.name()),
        _ => None,
    };
    match tree {
        None => {
            log::warn!("{file_name} has no `{category}` key, skipping it");
            Ok(None)
        }
        Some(Value::Object(members)) => {
            let mut path = vec![category.name().to_string()];
            Ok(Some(convert_group(members, &mut path, file_name)))
        }
        Some(_) => Err(LoadError::InvalidShape {
            file: file_name.to_string(),
            category: category.name().to_string(),
        }),
    }
}

fn convert_group(members: Map<String, Value>, path: &mut Vec<String>, file_name: &str) -> TokenGroup {
    let mut group = TokenGroup::new();
    for (key, value) in members {
        path.push(key.clone());
        match value {
            Value::Object(object) if object.contains_key("value") => {
                group.push(key, TokenNode::Leaf(convert_token(object, path, file_name)));
            }
            Value::Object(object) => {
                group.push(key, TokenNode::Group(convert_group(object, path, file_name)));
            }
            // Scalars directly under a group are annotations, not tokens.
            _ => log::debug!("Ignoring non-token entry `{}` in {file_name}", path.join(".")),
        }
        path.pop();
    }
    group
}

fn convert_token(mut object: Map<String, Value>, path: &[String], file_name: &str) -> Token {
    let value = match object.remove("value") {
        Some(Value::String(s)) => TokenValue::Text(s),
        Some(Value::Number(n)) => TokenValue::Number(n),
        Some(Value::Bool(b)) => TokenValue::Boolean(b),
        Some(other) => {
            log::warn!(
                "`{}` in {file_name} has a composite value, emitting it unresolved",
                path.join(".")
            );
            TokenValue::Composite(other)
        }
        None => TokenValue::Composite(Value::Null),
    };

    let mut token = Token::new(value);
    for (key, meta) in object {
        let meta = match (key.as_str(), meta) {
            ("type", Value::String(s)) => {
                token.token_type = Some(s);
                continue;
            }
            ("description", Value::String(s)) => {
                token.description = Some(s);
                continue;
            }
            (_, meta) => meta,
        };
        token.extensions.push((key, meta));
    }
    token
}
