use crate::ast::Category;
use crate::error::ConfigError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Settings of one build. Every field has a default, so an empty YAML file
/// (or no file at all) is a valid configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Directory holding `<category>.json`.
    pub tokens_dir: PathBuf,
    /// Directory receiving the generated files.
    pub out_dir: PathBuf,
    /// Directory receiving the root-level stylesheet copy and the docs page.
    pub root_dir: PathBuf,
    /// Stem of the stylesheet, `<css_name>.css`.
    pub css_name: String,
    pub write_root_copy: bool,
    pub docs_file: String,
    /// Resolution precedence, earliest first.
    pub categories: Vec<String>,
    pub title: String,
    pub banner: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        BuildConfig {
            tokens_dir: PathBuf::from("tokens"),
            out_dir: PathBuf::from("dist"),
            root_dir: PathBuf::from("."),
            css_name: "movement-tokens".to_string(),
            write_root_copy: true,
            docs_file: "token-documentation.html".to_string(),
            categories: Category::ALL.iter().map(|c| c.name().to_string()).collect(),
            title: "Movement Labs Design Tokens".to_string(),
            banner: "Movement Design System Tokens".to_string(),
        }
    }
}

impl BuildConfig {
    /// Parses a YAML configuration.
    ///
    /// # Errors
    /// Returns a `ConfigError` if the YAML is malformed or names an unknown
    /// category.
    pub fn from_yaml_str(source: &str, path: &Path) -> Result<Self, ConfigError> {
        // serde_yaml reads an empty document as null rather than an empty map.
        if source.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: BuildConfig =
            serde_yaml::from_str(source).map_err(|source| ConfigError::Yaml {
                path: path.to_path_buf(),
                source,
            })?;
        config.category_order()?;
        Ok(config)
    }

    /// # Errors
    /// Returns a `ConfigError` if the file cannot be read or is invalid.
    pub fn from_yaml_file(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Loaded config from {}", path.display());
        Self::from_yaml_str(&source, path)
    }

    /// The configured categories, parsed.
    ///
    /// # Errors
    /// Returns `ConfigError::UnknownCategory` for a name that is not a category.
    pub fn category_order(&self) -> Result<Vec<Category>, ConfigError> {
        self.categories
            .iter()
            .map(|name| {
                Category::from_name(name)
                    .ok_or_else(|| ConfigError::UnknownCategory { name: name.clone() })
            })
            .collect()
    }

    pub fn css_file_name(&self) -> String {
        format!("{}.css", self.css_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = BuildConfig::from_yaml_str(
            "tokens_dir: movement-tokens\ncss_name: brand\n",
            Path::new("tokens.yaml"),
        )
        .unwrap();
        assert_eq!(config.tokens_dir, PathBuf::from("movement-tokens"));
        assert_eq!(config.css_file_name(), "brand.css");
        assert_eq!(config.out_dir, PathBuf::from("dist"));
        assert_eq!(config.category_order().unwrap(), Category::ALL.to_vec());
    }

    #[test]
    fn test_empty_yaml_is_default() {
        let config = BuildConfig::from_yaml_str("\n", Path::new("tokens.yaml")).unwrap();
        assert_eq!(config, BuildConfig::default());
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        let err = BuildConfig::from_yaml_str(
            "categories: [core, brand]\n",
            Path::new("tokens.yaml"),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::UnknownCategory { name } if name == "brand"));
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let err = BuildConfig::from_yaml_str("colour: red\n", Path::new("tokens.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Yaml { .. }));
    }
}
