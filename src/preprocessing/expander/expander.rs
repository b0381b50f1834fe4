//! Named one-hot expansion of table columns.

use crate::dataset::{Category, Column, DType, DataFrame, Tabular};
use crate::preprocessing::encoding::{
    FittedOneHotEncoder, HandleUnknown, OneHotEncoder, OneHotEncoderParams,
};
use crate::preprocessing::error::PreprocessingError;
use crate::preprocessing::expander::config::ExpanderConfig;
use crate::preprocessing::traits::{FittedTransformer, Transformer};
use log::{debug, trace};
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Replaces categorical columns of a table with named `i8` indicator columns.
///
/// Every configured column `c` with fitted categories `v1 < v2 < ...` is
/// replaced by columns `prefix + prefix_sep + v` holding 1 where the row's
/// value is `v` and 0 elsewhere. Passthrough columns keep their position at
/// the front of the output; the indicator blocks follow in configured order.
/// Values never seen during fit produce an all-zero block.
///
/// # Example
/// ```
/// use categorical_expander::dataset::{Column, DataFrame};
/// use categorical_expander::preprocessing::{CategoricalExpander, FittedTransformer, Transformer};
///
/// let train = DataFrame::new(vec![Column::new("color", vec!["red", "blue", "red", "green"])]).unwrap();
/// let fitted = CategoricalExpander::new(["color"]).unwrap().fit(&train).unwrap();
///
/// let test = DataFrame::new(vec![Column::new("color", vec!["red", "blue"])]).unwrap();
/// let out = fitted.transform(&test).unwrap();
/// assert_eq!(out.column_names(), vec!["color_blue", "color_green", "color_red"]);
/// assert_eq!(out.column("color_red").unwrap().data().as_i8(), Some(&[1i8, 0][..]));
/// ```
#[derive(Clone, Debug)]
pub struct CategoricalExpander {
    config: ExpanderConfig,
    /// One resolved prefix per configured column.
    prefixes: Vec<String>,
    encoder: OneHotEncoder,
}

impl CategoricalExpander {
    /// Expander for `columns` with default naming and no dropped category.
    pub fn new<I, S>(columns: I) -> Result<Self, PreprocessingError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_config(ExpanderConfig::new(columns))
    }

    /// Build an expander from a configuration, validating it.
    pub fn from_config(config: ExpanderConfig) -> Result<Self, PreprocessingError> {
        let prefixes = config.resolve_prefixes()?;
        Ok(Self {
            config,
            prefixes,
            encoder: OneHotEncoder::new().with_handle_unknown(HandleUnknown::Ignore),
        })
    }

    pub fn config(&self) -> &ExpanderConfig {
        &self.config
    }

    pub fn columns(&self) -> &[String] {
        &self.config.columns
    }

    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    pub fn prefix_sep(&self) -> &str {
        &self.config.prefix_sep
    }

    pub fn drop_first(&self) -> bool {
        self.config.drop_first
    }

    /// Check that every configured column is present and has at least two
    /// distinct values.
    fn validate_fit_input<T: Tabular + ?Sized>(&self, data: &T) -> Result<(), PreprocessingError> {
        for column in self.columns() {
            let n_unique = data
                .n_unique(column)
                .ok_or_else(|| PreprocessingError::MissingColumn(column.clone()))?;
            if n_unique < 2 {
                return Err(PreprocessingError::DegenerateColumn {
                    column: column.clone(),
                    n_unique,
                });
            }
        }
        Ok(())
    }
}

/// Serializable parameters for a fitted [`CategoricalExpander`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExpanderParams {
    pub config: ExpanderConfig,
    pub encoder: OneHotEncoderParams,
}

/// Output layout of one configured column.
#[derive(Clone, Debug)]
struct Block {
    /// First column of this block in the encoder matrix.
    offset: usize,
    /// Matrix columns `start..end` are emitted; `start > offset` when the
    /// first category is dropped.
    start: usize,
    end: usize,
}

/// Fitted [`CategoricalExpander`] ready for inference.
#[derive(Clone, Debug)]
pub struct FittedCategoricalExpander {
    expander: CategoricalExpander,
    encoder: FittedOneHotEncoder,
    blocks: Vec<Block>,
    feature_names_out: Vec<String>,
}

impl FittedCategoricalExpander {
    fn assemble(
        expander: CategoricalExpander,
        encoder: FittedOneHotEncoder,
    ) -> Result<Self, PreprocessingError> {
        if encoder.feature_names_in() != expander.columns() {
            return Err(PreprocessingError::SerializationError(format!(
                "encoder was fitted on {:?} but the expander encodes {:?}",
                encoder.feature_names_in(),
                expander.columns()
            )));
        }

        let skip = usize::from(expander.drop_first());
        let mut blocks = Vec::with_capacity(expander.columns().len());
        let mut feature_names_out = Vec::with_capacity(encoder.n_features_out());
        let mut seen = HashSet::with_capacity(encoder.n_features_out());
        let mut offset = 0;

        for (prefix, cats) in expander.prefixes().iter().zip(encoder.categories()) {
            for category in cats.iter().skip(skip) {
                let name = format!("{}{}{}", prefix, expander.prefix_sep(), category);
                if !seen.insert(name.clone()) {
                    return Err(PreprocessingError::DuplicateColumn(name));
                }
                feature_names_out.push(name);
            }
            blocks.push(Block {
                offset,
                start: offset + skip.min(cats.len()),
                end: offset + cats.len(),
            });
            offset += cats.len();
        }

        Ok(Self {
            expander,
            encoder,
            blocks,
            feature_names_out,
        })
    }

    /// The unfitted expander this was fitted from.
    pub fn expander(&self) -> &CategoricalExpander {
        &self.expander
    }

    pub fn config(&self) -> &ExpanderConfig {
        self.expander.config()
    }

    pub fn columns(&self) -> &[String] {
        self.expander.columns()
    }

    pub fn prefixes(&self) -> &[String] {
        self.expander.prefixes()
    }

    /// Names of the generated indicator columns, in output order.
    pub fn feature_names_out(&self) -> &[String] {
        &self.feature_names_out
    }

    pub fn n_features_out(&self) -> usize {
        self.feature_names_out.len()
    }

    /// Fitted categories of `column`, sorted ascending. Includes the dropped
    /// first category when `drop_first` is set.
    pub fn categories(&self, column: &str) -> Option<&[Category]> {
        let idx = self.columns().iter().position(|c| c == column)?;
        Some(&self.encoder.categories()[idx])
    }

    /// Fitted categories of every configured column, in configured order.
    pub fn categories_all(&self) -> &[Vec<Category>] {
        self.encoder.categories()
    }
}

impl Transformer for CategoricalExpander {
    type Input = DataFrame;
    type Output = DataFrame;
    type Params = ExpanderParams;
    type Fitted = FittedCategoricalExpander;

    fn fit(&self, data: &Self::Input) -> Result<Self::Fitted, PreprocessingError> {
        self.validate_fit_input(data)?;

        let subset = data.select(self.columns())?;
        let encoder = self.encoder.fit(&subset)?;
        let fitted = FittedCategoricalExpander::assemble(self.clone(), encoder)?;

        debug!(
            "CategoricalExpander fitted {} column(s) into {} indicator column(s)",
            self.columns().len(),
            fitted.n_features_out()
        );
        trace!("output columns: {:?}", fitted.feature_names_out());
        Ok(fitted)
    }
}

impl FittedTransformer for FittedCategoricalExpander {
    type Input = DataFrame;
    type Output = DataFrame;
    type Params = ExpanderParams;

    /// Replace the configured columns of `data` with their indicator columns.
    ///
    /// # Errors
    /// - [`PreprocessingError::MissingColumn`] if a configured column is absent.
    /// - [`PreprocessingError::DtypeMismatch`] if a column changed type since fit.
    /// - [`PreprocessingError::DuplicateColumn`] if a passthrough column has
    ///   the name of a generated column.
    fn transform(&self, data: &Self::Input) -> Result<Self::Output, PreprocessingError> {
        // The encoder looks up the configured columns by name, in order, and
        // reports the first missing one.
        let matrix = self.encoder.transform(data)?;

        let mut expansion = Vec::with_capacity(self.feature_names_out.len());
        let mut names = self.feature_names_out.iter();
        for block in &self.blocks {
            for (idx, name) in (block.start..block.end).zip(names.by_ref()) {
                expansion.push(Column::new(name.clone(), matrix.column(idx).to_vec()));
            }
        }

        debug!(
            "CategoricalExpander expanded {} column(s) into {} over {} row(s)",
            self.columns().len(),
            expansion.len(),
            data.height()
        );
        data.drop(self.columns()).hstack(expansion)
    }

    /// Rebuild the configured columns from their indicator columns.
    ///
    /// Indicator columns are removed and the restored columns are appended
    /// after the remaining ones. With `drop_first`, an all-zero block maps to
    /// the dropped first category; without it, an all-zero block is an error.
    fn inverse_transform(&self, data: &Self::Output) -> Result<Self::Input, PreprocessingError> {
        let rows = data.height();
        let mut matrix = Array2::<i8>::zeros((rows, self.encoder.n_features_out()));
        let by_name: HashMap<&str, &Column> =
            data.columns().iter().map(|c| (c.name(), c)).collect();

        let mut names = self.feature_names_out.iter();
        for block in &self.blocks {
            for (idx, name) in (block.start..block.end).zip(names.by_ref()) {
                let column = *by_name
                    .get(name.as_str())
                    .ok_or_else(|| PreprocessingError::MissingColumn(name.clone()))?;
                let values =
                    column
                        .data()
                        .as_i8()
                        .ok_or_else(|| PreprocessingError::DtypeMismatch {
                            column: name.clone(),
                            expected: DType::Int8.to_string(),
                            got: column.dtype().to_string(),
                        })?;
                for (row, &value) in values.iter().enumerate() {
                    matrix[[row, idx]] = value;
                }
            }

            if block.start > block.offset {
                for row in 0..rows {
                    if (block.start..block.end).all(|idx| matrix[[row, idx]] == 0) {
                        matrix[[row, block.offset]] = 1;
                    }
                }
            }
        }

        let restored = self.encoder.inverse_transform(&matrix)?;
        data.drop(&self.feature_names_out)
            .hstack(restored.into_columns())
    }

    fn extract_params(&self) -> Self::Params {
        ExpanderParams {
            config: self.expander.config().clone(),
            encoder: self.encoder.extract_params(),
        }
    }

    fn from_params(params: Self::Params) -> Result<Self, PreprocessingError> {
        let expander = CategoricalExpander::from_config(params.config)?;
        if params.encoder.handle_unknown != HandleUnknown::Ignore {
            return Err(PreprocessingError::SerializationError(
                "expander encoder params must ignore unknown categories".to_string(),
            ));
        }
        let encoder = FittedOneHotEncoder::from_params(params.encoder)?;
        FittedCategoricalExpander::assemble(expander, encoder)
    }

    fn n_features_in(&self) -> usize {
        self.columns().len()
    }
}
