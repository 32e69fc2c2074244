//! Application configuration
//!
//! Values come from CLI flags, falling back to environment variables (a `.env`
//! file is loaded first when present).

use std::path::PathBuf;

use clap::Args;
use tally::{
    catalog::Catalog,
    fixtures::{FixtureError, load_catalog, load_rules},
    promotions::PricingRules,
};

/// Log output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn", global = true)]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(
        long,
        env = "LOG_FORMAT",
        value_enum,
        default_value_t = LogFormat::Compact,
        global = true
    )]
    pub log_format: LogFormat,
}

/// Catalog and promotion rule sources.
#[derive(Debug, Args)]
pub struct CatalogConfig {
    /// Catalog YAML file; the built-in demo catalog is used when omitted
    #[arg(long, env = "TALLY_CATALOG", global = true)]
    pub catalog: Option<PathBuf>,

    /// Promotion rules YAML file; default rules are used when omitted
    #[arg(long, env = "TALLY_RULES", global = true)]
    pub rules: Option<PathBuf>,
}

impl CatalogConfig {
    /// Load the configured catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog file cannot be read or parsed.
    pub fn load_catalog(&self) -> Result<Catalog, FixtureError> {
        match &self.catalog {
            Some(path) => load_catalog(path),
            None => Ok(Catalog::sample()),
        }
    }

    /// Load the configured promotion rules.
    ///
    /// # Errors
    ///
    /// Returns an error if the rules file cannot be read or parsed.
    pub fn load_rules(&self) -> Result<PricingRules, FixtureError> {
        match &self.rules {
            Some(path) => load_rules(path),
            None => Ok(PricingRules::default()),
        }
    }
}
