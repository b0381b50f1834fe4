//! Tabular dataset abstractions.
//!
//! This module provides the [`Tabular`] trait, the input contract of the
//! transformers in this crate, and [`DataFrame`], an in-memory
//! implementation of it.
//!
//! # Core Concepts
//!
//! - **Column** — A named, homogeneously typed sequence of values ([`Column`], [`ColumnData`]).
//! - **Row index** — Integer labels identifying rows independently of position.
//! - **Category** — A distinct value of an encodable column ([`Category`]); floats are not categories.
//!
//! # Example
//!
//! ```
//! use categorical_expander::dataset::{Column, DataFrame, Tabular};
//!
//! let df = DataFrame::new(vec![Column::new("color", vec!["red", "blue", "red"])]).unwrap();
//! assert_eq!(df.n_unique("color"), Some(2));
//! assert_eq!(df.n_unique("size"), None);
//! ```

pub mod category;
pub mod frame;

pub use self::category::{Category, ValueRef};
pub use self::frame::{Column, ColumnData, DType, DataFrame};

/// Read access to a table with named, order-preserving columns.
///
/// Implementors expose the values of a column by name; distinct-value
/// counting is derived from them.
pub trait Tabular {
    /// Values of the column called `name`, if present.
    fn column_data(&self, name: &str) -> Option<&ColumnData>;

    /// Number of distinct values in column `name`, or `None` if it is absent.
    fn n_unique(&self, name: &str) -> Option<usize> {
        self.column_data(name).map(ColumnData::n_unique)
    }
}
