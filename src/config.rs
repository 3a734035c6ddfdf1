use std::path::Path;

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::types::QueryError;

/// Config files tried in order when no explicit path is given
pub const CONFIG_PATHS: [&str; 2] = ["/etc/querykit/querykit.toml", "./querykit.toml"];
pub const ENV_PREFIX: &str = "QUERYKIT";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// SQL text, then the placed values; rows as JSON lines
    #[default]
    Text,
    Json,
    Table,
}

/// CLI configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QueryKitConfig {
    #[serde(default)]
    pub format: OutputFormat,
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_log_filter() -> String { "warn".to_string() }

impl Default for QueryKitConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            log_filter: default_log_filter(),
        }
    }
}

impl QueryKitConfig {
    /// Load configuration with priority: ENV > config file > defaults.
    /// An explicit path must exist; the default paths are optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self, QueryError> {
        let builder = match explicit {
            Some(path) => Config::builder().add_source(File::from(path).required(true)),
            None => Self::with_first_existing(Config::builder(), &CONFIG_PATHS.map(Path::new)),
        };
        Self::finish(builder, ENV_PREFIX)
    }

    /// The file [`QueryKitConfig::load`] reads, if any.
    #[must_use]
    pub fn locate(explicit: Option<&Path>) -> Option<&Path> {
        explicit.or_else(|| first_existing(&CONFIG_PATHS.map(Path::new)))
    }

    /// Same layering as [`QueryKitConfig::load`] over arbitrary paths and prefix.
    pub fn load_from(paths: &[&Path], env_prefix: &str) -> Result<Self, QueryError> {
        Self::finish(Self::with_first_existing(Config::builder(), paths), env_prefix)
    }

    fn with_first_existing(
        mut builder: config::ConfigBuilder<config::builder::DefaultState>,
        paths: &[&Path],
    ) -> config::ConfigBuilder<config::builder::DefaultState> {
        if let Some(path) = first_existing(paths) {
            builder = builder.add_source(File::from(path));
        }
        builder
    }

    fn finish(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
        env_prefix: &str,
    ) -> Result<Self, QueryError> {
        let config = builder
            .add_source(Environment::with_prefix(env_prefix))
            .build()?;
        Ok(config.try_deserialize()?)
    }
}

fn first_existing<'a>(paths: &[&'a Path]) -> Option<&'a Path> {
    paths.iter().copied().find(|path| path.exists())
}
