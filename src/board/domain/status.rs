//! Status keys, board columns, and the configured column layout.

use super::{BoardDomainError, ParseStatusKeyError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Normalized task status value.
///
/// The set of statuses is configuration rather than a closed enum: a key is
/// any non-empty run of ASCII letters, digits, and underscores, stored in
/// upper case.
///
/// # Examples
///
/// ```
/// use sprintboard::board::domain::StatusKey;
///
/// let key = StatusKey::new(" in_progress ").expect("valid status key");
/// assert_eq!(key.as_str(), "IN_PROGRESS");
/// assert!(StatusKey::new("in progress").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StatusKey(String);

impl StatusKey {
    /// Key of the default backlog column.
    pub const BACKLOG: &'static str = "BACKLOG";

    /// Creates a validated status key.
    ///
    /// # Errors
    ///
    /// Returns [`ParseStatusKeyError`] when the trimmed value is empty or
    /// contains characters other than ASCII alphanumerics and `_`.
    pub fn new(value: impl Into<String>) -> Result<Self, ParseStatusKeyError> {
        let raw = value.into();
        let normalized = raw.trim().to_ascii_uppercase();
        let is_valid = !normalized.is_empty()
            && normalized
                .chars()
                .all(|ch| ch.is_ascii_alphanumeric() || ch == '_');
        if !is_valid {
            return Err(ParseStatusKeyError(raw));
        }
        Ok(Self(normalized))
    }

    /// Returns the backlog status key.
    #[must_use]
    pub fn backlog() -> Self {
        Self(Self::BACKLOG.to_owned())
    }

    /// Returns the key as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for StatusKey {
    type Error = ParseStatusKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for StatusKey {
    type Error = ParseStatusKeyError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<StatusKey> for String {
    fn from(value: StatusKey) -> Self {
        value.0
    }
}

impl AsRef<str> for StatusKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for StatusKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A named board column bound to one status value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    key: StatusKey,
    label: String,
}

impl Column {
    /// Creates a column for `key` displayed as `label`.
    #[must_use]
    pub fn new(key: StatusKey, label: impl Into<String>) -> Self {
        Self {
            key,
            label: label.into(),
        }
    }

    /// Returns the status key the column holds.
    #[must_use]
    pub const fn key(&self) -> &StatusKey {
        &self.key
    }

    /// Returns the display label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }
}

/// Ordered, exhaustive set of board columns.
///
/// Column keys are unique and the default status, assigned to new tasks
/// and treated as outside any sprint, is always one of the columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardLayout {
    columns: Vec<Column>,
    default_status: StatusKey,
}

impl BoardLayout {
    /// Creates a validated layout.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyLayout`] for an empty column list,
    /// [`BoardDomainError::DuplicateColumn`] when two columns share a key,
    /// and [`BoardDomainError::UnknownDefaultStatus`] when the default
    /// status names no column.
    pub fn new(columns: Vec<Column>, default_status: StatusKey) -> Result<Self, BoardDomainError> {
        if columns.is_empty() {
            return Err(BoardDomainError::EmptyLayout);
        }
        for (position, column) in columns.iter().enumerate() {
            let seen_before = columns
                .iter()
                .take(position)
                .any(|earlier| earlier.key() == column.key());
            if seen_before {
                return Err(BoardDomainError::DuplicateColumn(column.key().clone()));
            }
        }
        if !columns.iter().any(|column| column.key() == &default_status) {
            return Err(BoardDomainError::UnknownDefaultStatus(default_status));
        }
        Ok(Self {
            columns,
            default_status,
        })
    }

    /// Returns the columns in display order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Returns the status assigned to new tasks.
    #[must_use]
    pub const fn default_status(&self) -> &StatusKey {
        &self.default_status
    }

    /// Returns the column for `status`, if configured.
    #[must_use]
    pub fn column(&self, status: &StatusKey) -> Option<&Column> {
        self.columns.iter().find(|column| column.key() == status)
    }

    /// Returns whether `status` maps to a configured column.
    #[must_use]
    pub fn contains(&self, status: &StatusKey) -> bool {
        self.column(status).is_some()
    }

    /// Returns whether `status` is the default (unscoped) column.
    #[must_use]
    pub fn is_default(&self, status: &StatusKey) -> bool {
        &self.default_status == status
    }
}

impl Default for BoardLayout {
    fn default() -> Self {
        let columns = [
            ("BACKLOG", "Backlog"),
            ("TODO", "To Do"),
            ("IN_PROGRESS", "In Progress"),
            ("IN_REVIEW", "In Review"),
            ("DONE", "Done"),
        ]
        .into_iter()
        .map(|(key, label)| Column::new(StatusKey(key.to_owned()), label))
        .collect();

        Self {
            columns,
            default_status: StatusKey::backlog(),
        }
    }
}
