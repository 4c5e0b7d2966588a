//! Layered indexer configuration
//!
//! `defaults/indexer.default.toml` is embedded into the crate so documentation and
//! runtime behavior stay in sync. [`IndexerConfig::load`] layers an optional user file
//! over it, and [`Indexer::from_config`] validates the result into an [`Indexer`].
//! Keys the user file leaves out keep their default values.
//!
//! Classification tables are deliberately absent here: they are tied to
//! [`OCCURRENCE_INDEX_VERSION`](crate::indexing::OCCURRENCE_INDEX_VERSION) and change
//! only with a new algorithm version.

use crate::indexing::{Indexer, TodoPattern, TodoScanner, WordScanner};
use ::config::{Config, File, FileFormat};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

const DEFAULT_TOML: &str = include_str!("../defaults/indexer.default.toml");

/// Errors raised while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),

    #[error("invalid pattern for TODO marker '{id}': {source}")]
    InvalidPattern {
        id: String,
        #[source]
        source: regex::Error,
    },

    #[error("{key} must be a single character, got {value:?}")]
    InvalidCharacter { key: String, value: String },
}

/// Top-level indexer configuration
#[derive(Debug, Clone, Deserialize)]
pub struct IndexerConfig {
    pub words: WordsConfig,
    pub todo: TodoConfig,
}

/// Word boundary settings
#[derive(Debug, Clone, Deserialize)]
pub struct WordsConfig {
    pub connectors: Vec<String>,
    pub escape: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TodoConfig {
    pub patterns: Vec<TodoPatternConfig>,
}

/// One TODO marker; `pattern` is a regex unless `literal` is set
#[derive(Debug, Clone, Deserialize)]
pub struct TodoPatternConfig {
    pub id: String,
    pub pattern: String,
    #[serde(default)]
    pub literal: bool,
    #[serde(default)]
    pub case_sensitive: bool,
}

impl IndexerConfig {
    /// The embedded defaults
    pub fn defaults() -> Result<Self, ConfigError> {
        Self::load(None)
    }

    /// The embedded defaults with `user_file` layered on top; a missing file is an error
    pub fn load(user_file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        if let Some(path) = user_file {
            tracing::debug!(path = %path.display(), "layering configuration file");
            let source = File::from(path).format(FileFormat::Toml).required(true);
            builder = builder.add_source(source);
        }
        Ok(builder.build()?.try_deserialize()?)
    }
}

impl TodoPatternConfig {
    fn compile(&self) -> Result<TodoPattern, ConfigError> {
        let source = if self.literal {
            regex::escape(&self.pattern)
        } else {
            self.pattern.clone()
        };
        TodoPattern::regex(self.id.clone(), &source, self.case_sensitive).map_err(|source| {
            ConfigError::InvalidPattern {
                id: self.id.clone(),
                source,
            }
        })
    }
}

impl Indexer {
    /// Build an indexer from validated configuration
    pub fn from_config(config: &IndexerConfig) -> Result<Self, ConfigError> {
        let connectors = config
            .words
            .connectors
            .iter()
            .map(|value| single_char("words.connectors", value))
            .collect::<Result<Vec<_>, _>>()?;
        let escape = single_char("words.escape", &config.words.escape)?;

        let patterns = config
            .todo
            .patterns
            .iter()
            .map(TodoPatternConfig::compile)
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(
            connectors = ?connectors,
            ?escape,
            todo_patterns = patterns.len(),
            "indexer configured"
        );
        Ok(Indexer::new(
            WordScanner::new(connectors, escape),
            TodoScanner::new(patterns),
        ))
    }
}

fn single_char(key: &str, value: &str) -> Result<char, ConfigError> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(ConfigError::InvalidCharacter {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}
