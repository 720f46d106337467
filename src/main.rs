use clap::{Args, Parser, Subcommand};
use miette::Result;
use std::path::{Path, PathBuf};
use tokens_core::api::write_output;
use tokens_core::error::{EmitError, LoadError, TokenError};
use tokens_core::{build, coverage, loader, BuildConfig};

// How many entries of each list the validate summary prints.
const SUMMARY_LIMIT: usize = 10;

#[derive(Parser)]
#[command(name = "build-tokens")]
#[command(about = "Builds CSS variables, a JS module and docs from design token files", long_about = None)]
#[command(version)]
struct Cli {
    /// YAML build configuration; flags override its values
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the token files and write every output
    Build(PathArgs),
    /// Report which tokens lack CSS variables or utility classes
    Validate {
        #[command(flatten)]
        paths: PathArgs,
        /// Stylesheet to check
        #[arg(long)]
        css: PathBuf,
        /// Where to write the JSON report
        #[arg(long, default_value = "token-coverage-report.json")]
        report: PathBuf,
        /// Where to write the suggestions, one per line
        #[arg(long, default_value = "token-suggestions.txt")]
        suggestions: PathBuf,
    },
}

#[derive(Args)]
struct PathArgs {
    /// Directory containing core.json, semantic.json, components.json and interactions.json
    #[arg(long)]
    tokens_dir: Option<PathBuf>,
    /// Output directory for the generated files
    #[arg(long)]
    out_dir: Option<PathBuf>,
}

impl PathArgs {
    fn apply(&self, config: &mut BuildConfig) {
        if let Some(dir) = &self.tokens_dir {
            config.tokens_dir.clone_from(dir);
        }
        if let Some(dir) = &self.out_dir {
            config.out_dir.clone_from(dir);
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();

    let mut config = match &cli.config {
        Some(path) => BuildConfig::from_yaml_file(path).map_err(TokenError::from)?,
        None => BuildConfig::default(),
    };

    match cli.command {
        Commands::Build(paths) => {
            paths.apply(&mut config);
            let report = build(&config)?;
            log::info!(
                "Design tokens built successfully: {} tokens, {} files, {} unresolved reference(s)",
                report.token_count,
                report.written.len(),
                report.diagnostics.len()
            );
        }
        Commands::Validate {
            paths,
            css,
            report,
            suggestions,
        } => {
            paths.apply(&mut config);
            validate(&config, &css, &report, &suggestions)?;
        }
    }
    Ok(())
}

fn validate(
    config: &BuildConfig,
    css_path: &Path,
    report_path: &Path,
    suggestions_path: &Path,
) -> Result<(), TokenError> {
    let order = config.category_order()?;
    let document = loader::load_documents(&config.tokens_dir, &order)?;
    let css = std::fs::read_to_string(css_path).map_err(|source| LoadError::Io {
        path: css_path.to_path_buf(),
        source,
    })?;

    let result = coverage::validate(&document, &css);
    println!("===== TOKEN COVERAGE REPORT =====");
    println!(
        "Coverage: {}% ({}/{})",
        result.coverage.percentage, result.coverage.covered, result.coverage.total
    );
    print_list("Missing Selectors", &result.missing_selectors);
    print_list("Unused Tokens", &result.unused_tokens);
    print_list("Suggestions", &result.suggestions);

    if !result.suggestions.is_empty() {
        write_output(suggestions_path, result.suggestions.join("\n").as_bytes())?;
        println!("\nAll suggestions written to: {}", suggestions_path.display());
    }
    let json = serde_json::to_string_pretty(&result).map_err(|source| EmitError::Serialize {
        what: "coverage report",
        source,
    })?;
    write_output(report_path, json.as_bytes())?;
    println!("Full report written to: {}", report_path.display());
    Ok(())
}

fn print_list(heading: &str, items: &[String]) {
    if items.is_empty() {
        println!("\n{heading}: none");
        return;
    }
    println!("\n{heading}:");
    for item in items.iter().take(SUMMARY_LIMIT) {
        println!("  - {item}");
    }
    if items.len() > SUMMARY_LIMIT {
        println!("  ... and {} more", items.len() - SUMMARY_LIMIT);
    }
}
