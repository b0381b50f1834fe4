//! Error types for preprocessing operations.

use thiserror::Error;

/// Coarse classification of a [`PreprocessingError`].
///
/// Callers at the pipeline-orchestration layer usually only need to know
/// which family an error belongs to, not the exact variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The transformer was constructed with an invalid configuration.
    Configuration,
    /// The input table does not have the expected shape or columns.
    Schema,
    /// A column selected for encoding has fewer than two distinct values.
    DegenerateColumn,
    /// The values inside the table cannot be processed.
    Data,
    /// Fitted parameters could not be encoded or decoded.
    Serialization,
    /// Reading or writing a file failed.
    Io,
}

/// Error type for preprocessing operations.
#[derive(Debug, Error)]
pub enum PreprocessingError {
    /// Invalid hyperparameter or configuration value.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// `prefix` given as a list whose length differs from `columns`.
    #[error(
        "When `prefix` is a list it must have one entry per column. Found: {prefixes} != {columns}"
    )]
    PrefixLengthMismatch { columns: usize, prefixes: usize },

    /// A required column is not present in the input table.
    #[error("Column `{0}` for one-hot encoding wasn't found in the input data")]
    MissingColumn(String),

    /// Two columns would end up with the same name.
    #[error("Duplicate column name `{0}`")]
    DuplicateColumn(String),

    /// A column has fewer than two distinct values at fit time.
    #[error(
        "Trying to one-hot encode column `{column}` with {n_unique} unique value(s); at least 2 are required"
    )]
    DegenerateColumn { column: String, n_unique: usize },

    /// The column's dtype cannot hold categories.
    #[error("Column `{column}` has dtype {dtype}, which cannot be one-hot encoded")]
    UnsupportedDtype { column: String, dtype: String },

    /// The column's dtype differs from the one seen during fit.
    #[error("Column `{column}` was fitted as {expected} but got {got}")]
    DtypeMismatch {
        column: String,
        expected: String,
        got: String,
    },

    /// A column or index has a different length than the table.
    #[error("Length mismatch for `{column}`: expected {expected} rows, got {got}")]
    LengthMismatch {
        column: String,
        expected: usize,
        got: usize,
    },

    /// Feature dimension mismatch.
    #[error("Feature mismatch: expected {expected_features} features, got {got_features}")]
    FeatureMismatch {
        expected_features: usize,
        got_features: usize,
    },

    /// Empty data provided where non-empty was required.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// A category not seen during fit, with the strict unknown policy.
    #[error("Unknown category `{value}` in column `{column}`")]
    UnknownCategory { column: String, value: String },

    /// Indicator columns that cannot be mapped back to a category.
    #[error("Cannot inverse transform: {0}")]
    InverseTransform(String),

    /// Serialization or deserialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PreprocessingError {
    /// The family this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            PreprocessingError::InvalidConfig(_)
            | PreprocessingError::PrefixLengthMismatch { .. } => ErrorKind::Configuration,
            PreprocessingError::MissingColumn(_)
            | PreprocessingError::DuplicateColumn(_)
            | PreprocessingError::UnsupportedDtype { .. }
            | PreprocessingError::DtypeMismatch { .. }
            | PreprocessingError::LengthMismatch { .. }
            | PreprocessingError::FeatureMismatch { .. } => ErrorKind::Schema,
            PreprocessingError::DegenerateColumn { .. } => ErrorKind::DegenerateColumn,
            PreprocessingError::EmptyData(_)
            | PreprocessingError::UnknownCategory { .. }
            | PreprocessingError::InverseTransform(_) => ErrorKind::Data,
            PreprocessingError::SerializationError(_) => ErrorKind::Serialization,
            PreprocessingError::Io(_) => ErrorKind::Io,
        }
    }
}

impl From<serde_json::Error> for PreprocessingError {
    fn from(err: serde_json::Error) -> Self {
        PreprocessingError::SerializationError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_prefix_length_mismatch() {
        let err = PreprocessingError::PrefixLengthMismatch {
            columns: 2,
            prefixes: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains("3 != 2"), "message was: {}", msg);
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_error_display_missing_column() {
        let err = PreprocessingError::MissingColumn("color".to_string());
        assert!(err.to_string().contains("`color`"));
        assert_eq!(err.kind(), ErrorKind::Schema);
    }

    #[test]
    fn test_error_display_degenerate_column() {
        let err = PreprocessingError::DegenerateColumn {
            column: "flag".to_string(),
            n_unique: 1,
        };
        assert!(err.to_string().contains("`flag` with 1 unique"));
        assert_eq!(err.kind(), ErrorKind::DegenerateColumn);
    }

    #[test]
    fn test_error_kind_data() {
        let err = PreprocessingError::UnknownCategory {
            column: "color".to_string(),
            value: "purple".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::Data);
        assert!(err.to_string().contains("purple"));
    }

    #[test]
    fn test_error_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        let err: PreprocessingError = io_err.into();
        assert!(matches!(err, PreprocessingError::Io(_)));
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn test_error_is_std_error() {
        let err = PreprocessingError::InvalidConfig("test".to_string());
        let _: &dyn std::error::Error = &err;
    }

    #[test]
    fn test_error_from_json_error() {
        let json_err = serde_json::from_str::<Vec<String>>("{").unwrap_err();
        let err: PreprocessingError = json_err.into();
        assert!(matches!(err, PreprocessingError::SerializationError(_)));
    }
}
