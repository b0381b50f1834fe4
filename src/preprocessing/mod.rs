//! Data preprocessing transformers.
//!
//! Transformers follow a type-state lifecycle: an unfitted [`Transformer`]
//! holds configuration only, and [`Transformer::fit`] returns a separate
//! fitted type implementing [`FittedTransformer`]. Transforming with an
//! unfitted value does not compile.
//!
//! # Design Philosophy
//!
//! - **Type Safety**: Fitted and unfitted states are distinct types
//! - **Serializable**: Fitted transformers can be saved and loaded
//! - **Deterministic**: Categories are ordered ascending, so output layout depends only on the fitted vocabulary
//!
//! # Available Transformers
//!
//! - [`CategoricalExpander`]: Replace table columns with named indicator columns
//! - [`OneHotEncoder`]: Encode columns into a dense `i8` indicator matrix
//!
//! # Example
//!
//! ```ignore
//! use categorical_expander::preprocessing::{
//!     CategoricalExpander, ExpanderConfig, FittedCategoricalExpander, FittedTransformer, Transformer,
//! };
//!
//! let config = ExpanderConfig::new(["color"]).with_drop_first(true);
//! let fitted = CategoricalExpander::from_config(config)?.fit(&train)?;
//! let expanded = fitted.transform(&test)?;
//!
//! fitted.save_to_file("expander.bin")?;
//! let loaded = FittedCategoricalExpander::load_from_file("expander.bin")?;
//! ```

pub mod encoding;
pub mod error;
pub mod expander;
pub mod traits;

// Re-export main types
pub use encoding::{FittedOneHotEncoder, HandleUnknown, OneHotEncoder, OneHotEncoderParams};
pub use error::{ErrorKind, PreprocessingError};
pub use expander::{
    CategoricalExpander, ExpanderConfig, ExpanderParams, FittedCategoricalExpander, Prefix,
};
pub use traits::{FittedTransformer, Transformer};
