//! # categorical-expander
//!
//! One-hot expansion of categorical table columns into named `i8` indicator
//! columns, with a strict split between configuration and fitted state.
//!
//! ## Core Design Principles
//!
//! - **Stateful Type Safety**: An unfitted [`CategoricalExpander`] cannot
//!   transform; fitting returns a [`FittedCategoricalExpander`].
//! - **Deterministic Layout**: Categories are sorted ascending, so names and
//!   column order depend only on the fitted vocabulary.
//! - **Row Preservation**: Output has the input's rows, in order, with the
//!   same row index.
//!
//! ## Quick Start
//!
//! ```rust
//! use categorical_expander::dataset::{Column, DataFrame};
//! use categorical_expander::preprocessing::{
//!     CategoricalExpander, ExpanderConfig, FittedTransformer, Transformer,
//! };
//!
//! let train = DataFrame::new(vec![
//!     Column::new("color", vec!["red", "blue", "red", "green"]),
//!     Column::new("price", vec![3.5, 1.0, 2.0, 4.0]),
//! ])
//! .unwrap();
//!
//! let config = ExpanderConfig::new(["color"]).with_drop_first(true);
//! let fitted = CategoricalExpander::from_config(config).unwrap().fit(&train).unwrap();
//!
//! let out = fitted.transform(&train).unwrap();
//! assert_eq!(out.column_names(), vec!["price", "color_green", "color_red"]);
//! ```
//!
//! ## Module Structure
//!
//! - `dataset` — In-memory table, columns and category values
//! - `preprocessing` — Transformers, their traits and errors
//! - `serialization` — Persistence of fitted parameters

/// Tabular data and category values.
pub mod dataset;

/// Data preprocessing transformers.
pub mod preprocessing;

/// Fitted parameter persistence.
pub mod serialization;

pub use dataset::{Category, Column, ColumnData, DType, DataFrame, Tabular};
pub use preprocessing::{
    CategoricalExpander, ErrorKind, ExpanderConfig, FittedCategoricalExpander, FittedTransformer,
    PreprocessingError, Transformer,
};
