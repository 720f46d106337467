pub mod api;
pub mod ast;
pub mod config;
pub mod coverage;
pub mod css;
pub mod docs;
pub mod error;
pub mod flatten;
pub mod loader;
pub mod resolver;
pub mod serialization;
pub mod utils;

pub use api::{build, resolve_tokens, BuildReport, ResolvedTokens};
pub use config::BuildConfig;
