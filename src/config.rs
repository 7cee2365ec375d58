//! Runtime configuration.
//!
//! Settings are read from a TOML file and then overridden from the
//! environment:
//!
//! ```toml
//! log_level = "info"
//!
//! [api]
//! base_url = "http://localhost:8080/api"
//! timeout_secs = 30
//!
//! [board]
//! default_status = "BACKLOG"
//! sprint_scoped = false
//! reconcile = "mark_unsynced"
//!
//! [[board.columns]]
//! key = "BACKLOG"
//! label = "Backlog"
//! ```
//!
//! Every section is optional. `SPRINTBOARD_API_URL`,
//! `SPRINTBOARD_API_TOKEN`, and `SPRINTBOARD_API_TIMEOUT_SECS` override the
//! API section.

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use serde::Deserialize;
use thiserror::Error;

use crate::board::domain::{BoardDomainError, BoardLayout, Column, StatusKey};
use crate::board::services::{BoardSettings, ReconcilePolicy};

/// Environment variable overriding [`ApiConfig::base_url`].
pub const API_URL_ENV: &str = "SPRINTBOARD_API_URL";
/// Environment variable overriding [`ApiConfig::bearer_token`].
pub const API_TOKEN_ENV: &str = "SPRINTBOARD_API_TOKEN";
/// Environment variable overriding [`ApiConfig::timeout_secs`].
pub const API_TIMEOUT_ENV: &str = "SPRINTBOARD_API_TIMEOUT_SECS";

const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// Path that was read.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for this schema.
    #[error("failed to parse {path}: {source}")]
    Parse {
        /// Path that was parsed.
        path: Utf8PathBuf,
        /// Underlying parse failure.
        #[source]
        source: Box<toml::de::Error>,
    },

    /// An environment override held an unusable value.
    #[error("invalid value {value:?} for {name}")]
    InvalidEnv {
        /// Variable name.
        name: &'static str,
        /// Rejected value.
        value: String,
    },

    /// The configured columns do not form a valid layout.
    #[error(transparent)]
    Layout(#[from] BoardDomainError),
}

/// REST API connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to.
    pub base_url: String,
    /// Request timeout; `None` uses the transport default.
    pub timeout_secs: Option<u64>,
    /// Bearer token sent with every request.
    pub bearer_token: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout_secs: Some(DEFAULT_TIMEOUT_SECS),
            bearer_token: None,
        }
    }
}

/// One configured board column.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColumnConfig {
    /// Status key of the column.
    pub key: String,
    /// Header label.
    pub label: String,
}

/// Board layout and synchronization settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BoardConfig {
    /// Columns, left to right.
    pub columns: Vec<ColumnConfig>,
    /// Column for new tasks; moving a card here clears its sprint.
    pub default_status: String,
    /// Whether cards may only leave the default column during a sprint.
    pub sprint_scoped: bool,
    /// Handling of moves the server rejects.
    pub reconcile: ReconcilePolicy,
}

impl Default for BoardConfig {
    fn default() -> Self {
        let layout = BoardLayout::default();
        Self {
            columns: layout
                .columns()
                .iter()
                .map(|column| ColumnConfig {
                    key: column.key().to_string(),
                    label: column.label().to_owned(),
                })
                .collect(),
            default_status: layout.default_status().to_string(),
            sprint_scoped: false,
            reconcile: ReconcilePolicy::default(),
        }
    }
}

/// Complete runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SprintboardConfig {
    /// REST API connection.
    pub api: ApiConfig,
    /// Board layout and behaviour.
    pub board: BoardConfig,
    /// Default tracing filter, used when `SPRINTBOARD_LOG` is unset.
    pub log_level: String,
}

impl Default for SprintboardConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            board: BoardConfig::default(),
            log_level: "info".to_owned(),
        }
    }
}

impl SprintboardConfig {
    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns the parse error for malformed TOML or unknown keys.
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Reads `path`, or starts from defaults when no path is given, then
    /// applies environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read or parsed, or an
    /// override is invalid.
    pub fn load(path: Option<&Utf8Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(file) => Self::read(file)?,
            None => Self::default(),
        };
        config.apply_overrides(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    fn read(path: &Utf8Path) -> Result<Self, ConfigError> {
        let read_error = |source: std::io::Error| ConfigError::Read {
            path: path.to_owned(),
            source,
        };
        let file_name = path
            .file_name()
            .ok_or_else(|| read_error(std::io::Error::other("path must include a file name")))?;
        let parent = path
            .parent()
            .filter(|dir| !dir.as_str().is_empty())
            .unwrap_or_else(|| Utf8Path::new("."));
        let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(read_error)?;
        let text = dir.read_to_string(file_name).map_err(read_error)?;
        Self::from_toml(&text).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source: Box::new(source),
        })
    }

    /// Applies API overrides looked up through `lookup`.
    ///
    /// Blank values are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnv`] when the timeout is not a whole
    /// number of seconds.
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        let value_of = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if let Some(url) = value_of(API_URL_ENV) {
            self.api.base_url = url;
        }
        if let Some(token) = value_of(API_TOKEN_ENV) {
            self.api.bearer_token = Some(token);
        }
        if let Some(raw) = value_of(API_TIMEOUT_ENV) {
            let secs = raw.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                name: API_TIMEOUT_ENV,
                value: raw.clone(),
            })?;
            self.api.timeout_secs = Some(secs);
        }
        Ok(())
    }

    /// Builds the board layout from the configured columns.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Layout`] for an invalid status key, duplicate
    /// or missing columns, or a default status that is not a column.
    pub fn layout(&self) -> Result<BoardLayout, ConfigError> {
        let columns = self
            .board
            .columns
            .iter()
            .map(|column| {
                StatusKey::new(column.key.as_str())
                    .map(|key| Column::new(key, column.label.clone()))
                    .map_err(BoardDomainError::from)
            })
            .collect::<Result<Vec<_>, _>>()?;
        let default_status =
            StatusKey::new(self.board.default_status.as_str()).map_err(BoardDomainError::from)?;
        Ok(BoardLayout::new(columns, default_status)?)
    }

    /// Builds controller settings from the board section.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Layout`] when the layout is invalid.
    pub fn board_settings(&self) -> Result<BoardSettings, ConfigError> {
        Ok(BoardSettings::new(self.layout()?)
            .with_sprint_scoped(self.board.sprint_scoped)
            .with_reconcile(self.board.reconcile))
    }
}
