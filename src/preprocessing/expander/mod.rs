//! Named one-hot expansion of table columns.
//!
//! [`CategoricalExpander`] wraps the [`OneHotEncoder`](crate::preprocessing::OneHotEncoder)
//! primitive with output naming (`prefix + prefix_sep + category`), optional
//! reference-category dropping, and recombination with the columns that are
//! not encoded.

pub mod config;
#[allow(clippy::module_inception)]
mod expander;

pub use config::{ExpanderConfig, Prefix, DEFAULT_PREFIX_SEP};
pub use expander::{CategoricalExpander, ExpanderParams, FittedCategoricalExpander};
