//! Categorical feature encoding.
//!
//! [`OneHotEncoder`] is the vocabulary primitive used by the
//! [`CategoricalExpander`](crate::preprocessing::CategoricalExpander): it
//! learns the sorted distinct values of every column it is fitted on and
//! turns those columns into a dense `i8` indicator matrix.
//!
//! ```text
//! // Input column: [red, blue, green]   categories: [blue, green, red]
//! // Output:       [[0,0,1], [1,0,0], [0,1,0]]
//! ```
//!
//! # Design Notes
//!
//! The encoder knows nothing about output column names or recombination with
//! the rest of the table; that bookkeeping lives in the expander.

mod one_hot;

pub use one_hot::{FittedOneHotEncoder, OneHotEncoder, OneHotEncoderParams};

/// Strategy for handling unknown categories during transform.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum HandleUnknown {
    /// Raise an error when unknown categories are encountered.
    #[default]
    Error,
    /// Ignore unknown categories (output zeros for the whole block).
    Ignore,
}
