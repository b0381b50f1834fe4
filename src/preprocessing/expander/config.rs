//! Configuration for [`CategoricalExpander`](super::CategoricalExpander).
//!
//! The configuration is plain data and can be stored next to an experiment:
//!
//! ```json
//! {
//!   "columns": ["color", "size"],
//!   "prefix": { "per_column": ["c", "s"] },
//!   "prefix_sep": "=",
//!   "drop_first": true
//! }
//! ```
//!
//! `prefix` may be omitted or `null` (every column is its own prefix), or
//! `{ "shared": "..." }` for one prefix used by all columns.

use crate::preprocessing::error::PreprocessingError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Separator used between prefix and category when none is configured.
pub const DEFAULT_PREFIX_SEP: &str = "_";

fn default_prefix_sep() -> String {
    DEFAULT_PREFIX_SEP.to_string()
}

/// How output column names are prefixed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Prefix {
    /// One prefix for every encoded column.
    Shared(String),
    /// One prefix per encoded column, in column order.
    PerColumn(Vec<String>),
}

/// Configuration of a [`CategoricalExpander`](super::CategoricalExpander).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpanderConfig {
    /// Columns to encode. Their order is the order of the output blocks.
    pub columns: Vec<String>,

    /// Prefix mode. `None` uses each column's own name.
    #[serde(default)]
    pub prefix: Option<Prefix>,

    /// Separator between prefix and category value.
    #[serde(default = "default_prefix_sep")]
    pub prefix_sep: String,

    /// Omit the first category (in fitted order) of every column.
    #[serde(default)]
    pub drop_first: bool,
}

impl ExpanderConfig {
    /// Configuration encoding `columns` with default naming and no dropping.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            prefix: None,
            prefix_sep: default_prefix_sep(),
            drop_first: false,
        }
    }

    /// Set the prefix mode directly.
    pub fn with_prefix(mut self, prefix: Option<Prefix>) -> Self {
        self.prefix = prefix;
        self
    }

    /// Use one prefix for every column.
    pub fn with_shared_prefix(self, prefix: impl Into<String>) -> Self {
        self.with_prefix(Some(Prefix::Shared(prefix.into())))
    }

    /// Use one prefix per column.
    pub fn with_prefixes<I, S>(self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.with_prefix(Some(Prefix::PerColumn(
            prefixes.into_iter().map(Into::into).collect(),
        )))
    }

    /// Set the separator between prefix and category.
    pub fn with_prefix_sep(mut self, sep: impl Into<String>) -> Self {
        self.prefix_sep = sep.into();
        self
    }

    /// Set whether the first category of every column is dropped.
    pub fn with_drop_first(mut self, drop_first: bool) -> Self {
        self.drop_first = drop_first;
        self
    }

    /// Validate the configuration.
    ///
    /// `columns` must be non-empty without duplicates, and a per-column
    /// prefix list must have exactly one entry per column.
    pub fn validate(&self) -> Result<(), PreprocessingError> {
        if self.columns.is_empty() {
            return Err(PreprocessingError::InvalidConfig(
                "`columns` must name at least one column".to_string(),
            ));
        }

        let mut seen = HashSet::with_capacity(self.columns.len());
        for column in &self.columns {
            if !seen.insert(column.as_str()) {
                return Err(PreprocessingError::InvalidConfig(format!(
                    "column `{}` is listed more than once",
                    column
                )));
            }
        }

        if let Some(Prefix::PerColumn(prefixes)) = &self.prefix {
            if prefixes.len() != self.columns.len() {
                return Err(PreprocessingError::PrefixLengthMismatch {
                    columns: self.columns.len(),
                    prefixes: prefixes.len(),
                });
            }
        }

        Ok(())
    }

    /// Validate and return the prefix of every column, in column order.
    pub fn resolve_prefixes(&self) -> Result<Vec<String>, PreprocessingError> {
        self.validate()?;
        let prefixes = match &self.prefix {
            None => self.columns.clone(),
            Some(Prefix::Shared(prefix)) => vec![prefix.clone(); self.columns.len()],
            Some(Prefix::PerColumn(prefixes)) => prefixes.clone(),
        };
        Ok(prefixes)
    }

    /// Save configuration to a JSON file.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<(), PreprocessingError> {
        let json_string = serde_json::to_string_pretty(self)?;
        fs::write(path, json_string)?;
        Ok(())
    }

    /// Load configuration from a JSON file and validate it.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self, PreprocessingError> {
        let contents = fs::read_to_string(path)?;
        let config: ExpanderConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preprocessing::error::ErrorKind;

    #[test]
    fn test_defaults() {
        let config = ExpanderConfig::new(["color"]);
        assert_eq!(config.prefix, None);
        assert_eq!(config.prefix_sep, "_");
        assert!(!config.drop_first);
    }

    #[test]
    fn test_prefix_defaults_to_column_names() {
        let config = ExpanderConfig::new(["color", "size"]);
        assert_eq!(config.resolve_prefixes().unwrap(), vec!["color", "size"]);
    }

    #[test]
    fn test_shared_prefix_repeated() {
        let config = ExpanderConfig::new(["color", "size"]).with_shared_prefix("f");
        assert_eq!(config.resolve_prefixes().unwrap(), vec!["f", "f"]);
    }

    #[test]
    fn test_per_column_prefixes() {
        let config = ExpanderConfig::new(["color", "size"]).with_prefixes(["c", "s"]);
        assert_eq!(config.resolve_prefixes().unwrap(), vec!["c", "s"]);
    }

    #[test]
    fn test_prefix_length_mismatch() {
        let config = ExpanderConfig::new(["color", "size"]).with_prefixes(["a", "b", "c"]);
        let err = config.resolve_prefixes().unwrap_err();
        assert!(matches!(
            err,
            PreprocessingError::PrefixLengthMismatch {
                columns: 2,
                prefixes: 3
            }
        ));
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_empty_columns_rejected() {
        let config = ExpanderConfig::new(Vec::<String>::new());
        assert!(matches!(
            config.validate(),
            Err(PreprocessingError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_duplicate_columns_rejected() {
        let config = ExpanderConfig::new(["color", "color"]);
        let err = config.validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_json_shape() {
        let config = ExpanderConfig::new(["color"])
            .with_shared_prefix("c")
            .with_drop_first(true);
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["prefix"]["shared"], "c");
        assert_eq!(json["drop_first"], true);
    }

    #[test]
    fn test_json_fields_default() {
        let config: ExpanderConfig = serde_json::from_str(r#"{"columns": ["color"]}"#).unwrap();
        assert_eq!(config, ExpanderConfig::new(["color"]));
    }

    #[test]
    fn test_save_load_json() {
        let config = ExpanderConfig::new(["color", "size"])
            .with_prefixes(["c", "s"])
            .with_prefix_sep("=")
            .with_drop_first(true);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("expander.json");
        config.save_json(&path).unwrap();

        let loaded = ExpanderConfig::load_json(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_json_validates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(
            &path,
            r#"{"columns": ["a", "b"], "prefix": {"per_column": ["x"]}}"#,
        )
        .unwrap();

        assert!(matches!(
            ExpanderConfig::load_json(&path),
            Err(PreprocessingError::PrefixLengthMismatch { .. })
        ));
    }
}
