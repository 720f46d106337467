use crate::ast::TokenDocument;
use crate::config::BuildConfig;
use crate::css::{self, CssOptions, CssVariable};
use crate::docs::{self, DocsOptions};
use crate::error::{EmitError, TokenError};
use crate::flatten::{default_injections, flatten, FlatTable};
use crate::loader::load_documents;
use crate::resolver::{ResolveDiagnostic, Resolver};
use crate::serialization::{merged_tokens, to_js_module};
use std::path::{Path, PathBuf};

/// The outcome of flattening and resolving a document.
pub struct ResolvedTokens {
    pub document: TokenDocument,
    pub table: FlatTable,
    pub diagnostics: Vec<ResolveDiagnostic>,
}

impl ResolvedTokens {
    #[must_use]
    pub fn variables(&self) -> Vec<CssVariable> {
        css::variables(&self.document)
    }

    /// Renders the stylesheet for the resolved tokens.
    #[must_use]
    pub fn to_css(&self, options: &CssOptions) -> String {
        css::render(&self.variables(), options)
    }

    #[must_use]
    pub fn to_docs(&self, options: &DocsOptions) -> String {
        docs::render(&self.variables(), options)
    }

    /// # Errors
    /// Returns a `serde_json::Error` if serialization fails.
    pub fn to_js(&self) -> Result<String, serde_json::Error> {
        to_js_module(&self.document)
    }
}

/// Flattens `document` in the configured precedence order and resolves every
/// reference. Unresolvable references are not errors; they are reported in
/// [`ResolvedTokens::diagnostics`].
///
/// # Errors
/// Returns a `TokenError` if the configured category order is invalid.
pub fn resolve_tokens(
    document: &TokenDocument,
    config: &BuildConfig,
) -> Result<ResolvedTokens, TokenError> {
    let order = config.category_order()?;
    let table = flatten(document, &order, &default_injections());
    let outcome = Resolver::new(&table).resolve_document(document);
    Ok(ResolvedTokens {
        document: outcome.document,
        table,
        diagnostics: outcome.diagnostics,
    })
}

/// Summary of a successful [`build`].
#[derive(Debug)]
pub struct BuildReport {
    pub written: Vec<PathBuf>,
    pub token_count: usize,
    pub diagnostics: Vec<ResolveDiagnostic>,
}

/// Runs the whole pipeline: load, flatten, resolve and write every output.
///
/// # Errors
/// Returns a `TokenError` if a token file cannot be read or parsed, the
/// configuration is invalid, or an output cannot be written.
pub fn build(config: &BuildConfig) -> Result<BuildReport, TokenError> {
    log::info!("Building design tokens from {}", config.tokens_dir.display());
    let order = config.category_order()?;
    let document = load_documents(&config.tokens_dir, &order)?;
    if document.is_empty() {
        log::warn!("No token files found in {}", config.tokens_dir.display());
    }
    let resolved = resolve_tokens(&document, config)?;

    let css = resolved.to_css(&CssOptions {
        banner: config.banner.clone(),
    });
    let js = resolved.to_js().map_err(|source| EmitError::Serialize {
        what: "tokens.js",
        source,
    })?;
    let merged = serde_json::to_string_pretty(&merged_tokens(&document)).map_err(|source| {
        EmitError::Serialize {
            what: "sd-tokens.json",
            source,
        }
    })?;
    let docs = resolved.to_docs(&DocsOptions {
        title: config.title.clone(),
    });

    let css_file = config.css_file_name();
    let mut outputs = vec![
        (config.out_dir.join("sd-tokens.json"), merged),
        (config.out_dir.join(&css_file), css.clone()),
        (config.out_dir.join("tokens.js"), js),
        (config.root_dir.join(&config.docs_file), docs),
    ];
    if config.write_root_copy {
        outputs.push((config.root_dir.join(&css_file), css));
    }

    let mut written = Vec::with_capacity(outputs.len());
    for (path, contents) in outputs {
        write_output(&path, contents.as_bytes())?;
        log::info!("Wrote {}", path.display());
        written.push(path);
    }

    if !resolved.diagnostics.is_empty() {
        log::warn!(
            "{} token reference(s) could not be resolved",
            resolved.diagnostics.len()
        );
    }

    Ok(BuildReport {
        written,
        token_count: resolved.document.token_count(),
        diagnostics: resolved.diagnostics,
    })
}

/// Writes `contents` to `path`, replacing any previous file and creating
/// the parent directory if needed.
///
/// # Errors
/// Returns an `EmitError` if the directory or file cannot be written.
pub fn write_output(path: &Path, contents: &[u8]) -> Result<(), EmitError> {
    let io_err = |source| EmitError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(io_err)?;
    }
    std::fs::write(path, contents).map_err(io_err)
}
