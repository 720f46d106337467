use miette::{Diagnostic, NamedSource, SourceSpan};
use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors of a build. Recoverable resolution problems are not errors,
/// see [`crate::resolver::ResolveDiagnostic`].
#[derive(Error, Debug, Diagnostic)]
pub enum TokenError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Emit(#[from] EmitError),
}

#[derive(Error, Debug, Diagnostic)]
pub enum LoadError {
    #[error("Failed to read {}", .path.display())]
    #[diagnostic(
        code(loader::io),
        help("The file exists but could not be read. Check its permissions.")
    )]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed JSON: {message}")]
    #[diagnostic(
        code(loader::parse),
        help("Token files must be valid JSON of the form {{ \"<category>\": {{ ... }} }}.")
    )]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: SourceSpan,
        message: String,
    },

    #[error("Expected `{category}` in {file} to be an object")]
    #[diagnostic(
        code(loader::invalid_shape),
        help("The category key must map to a tree of token groups.")
    )]
    InvalidShape { file: String, category: String },
}

#[derive(Error, Debug, Diagnostic)]
pub enum ConfigError {
    #[error("Failed to read config file {}", .path.display())]
    #[diagnostic(code(config::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {}", .path.display())]
    #[diagnostic(code(config::yaml), help("The config file must be valid YAML."))]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Unknown token category `{name}`")]
    #[diagnostic(
        code(config::unknown_category),
        help("Valid categories are: core, semantic, components, interactions.")
    )]
    UnknownCategory { name: String },
}

#[derive(Error, Debug, Diagnostic)]
pub enum EmitError {
    #[error("Failed to write {}", .path.display())]
    #[diagnostic(
        code(emit::io),
        help("Check that the output directory is writable.")
    )]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize {what}")]
    #[diagnostic(code(emit::serialize))]
    Serialize {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
}
