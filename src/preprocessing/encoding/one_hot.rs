//! One-hot encoding for categorical features.
//!
//! Transforms categorical columns of a [`DataFrame`] into a dense 0/1 matrix.

use crate::dataset::{Category, Column, ColumnData, DType, DataFrame};
use crate::preprocessing::encoding::HandleUnknown;
use crate::preprocessing::error::PreprocessingError;
use crate::preprocessing::traits::{FittedTransformer, Transformer};
use log::{debug, trace};
use ndarray::{s, Array2};
use serde::{Deserialize, Serialize};

/// One-hot encoder for categorical features.
///
/// Every column of the input table is treated as a categorical feature. The
/// encoder learns the distinct values (categories) of each column during
/// fitting, sorted ascending, and emits one indicator column per category.
///
/// # Example
/// ```
/// use categorical_expander::dataset::{Column, DataFrame};
/// use categorical_expander::preprocessing::{FittedTransformer, OneHotEncoder, Transformer};
///
/// let data = DataFrame::new(vec![Column::new("color", vec!["red", "blue", "green"])]).unwrap();
///
/// let encoder = OneHotEncoder::new();
/// let fitted = encoder.fit(&data).unwrap();
///
/// // Categories are sorted: blue, green, red
/// let encoded = fitted.transform(&data).unwrap();
/// assert_eq!(encoded.row(0).to_vec(), vec![0i8, 0, 1]);
/// assert_eq!(encoded.row(1).to_vec(), vec![1i8, 0, 0]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct OneHotEncoder {
    /// How to handle unknown categories during transform.
    handle_unknown: HandleUnknown,
}

impl OneHotEncoder {
    /// Create a new OneHotEncoder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the strategy for handling unknown categories.
    pub fn with_handle_unknown(mut self, strategy: HandleUnknown) -> Self {
        self.handle_unknown = strategy;
        self
    }

    pub fn handle_unknown(&self) -> HandleUnknown {
        self.handle_unknown
    }
}

/// Serializable parameters for a fitted OneHotEncoder.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OneHotEncoderParams {
    /// Names of the columns seen during fit, in order.
    pub feature_names_in: Vec<String>,
    /// Dtype of each column seen during fit.
    pub dtypes_in: Vec<DType>,
    /// Categories (unique sorted values) for each input column.
    pub categories_: Vec<Vec<Category>>,
    /// Handle unknown strategy.
    pub handle_unknown: HandleUnknown,
}

/// Fitted OneHotEncoder ready for inference.
#[derive(Clone, Debug)]
pub struct FittedOneHotEncoder {
    feature_names_in: Vec<String>,
    dtypes_in: Vec<DType>,
    /// Categories (unique sorted values) for each input column.
    categories_: Vec<Vec<Category>>,
    /// First output column of each input column's block.
    offsets: Vec<usize>,
    /// Total number of output features.
    n_features_out: usize,
    handle_unknown: HandleUnknown,
}

impl FittedOneHotEncoder {
    fn build(
        feature_names_in: Vec<String>,
        dtypes_in: Vec<DType>,
        categories_: Vec<Vec<Category>>,
        handle_unknown: HandleUnknown,
    ) -> Self {
        let mut offsets = Vec::with_capacity(categories_.len());
        let mut n_features_out = 0;
        for cats in &categories_ {
            offsets.push(n_features_out);
            n_features_out += cats.len();
        }
        Self {
            feature_names_in,
            dtypes_in,
            categories_,
            offsets,
            n_features_out,
            handle_unknown,
        }
    }

    /// Get the categories learned for each feature.
    pub fn categories(&self) -> &[Vec<Category>] {
        &self.categories_
    }

    /// Get the number of output features.
    pub fn n_features_out(&self) -> usize {
        self.n_features_out
    }

    /// Get the number of categories per input feature.
    pub fn n_values(&self) -> Vec<usize> {
        self.categories_.iter().map(Vec::len).collect()
    }

    /// Names of the columns seen during fit.
    pub fn feature_names_in(&self) -> &[String] {
        &self.feature_names_in
    }

    pub fn handle_unknown(&self) -> HandleUnknown {
        self.handle_unknown
    }

    /// Encode one column into its block of `out`. Returns the number of
    /// cells whose value was not in the vocabulary.
    fn encode_column(
        &self,
        feature: usize,
        values: &ColumnData,
        out: &mut Array2<i8>,
    ) -> Result<usize, PreprocessingError> {
        let cats = &self.categories_[feature];
        let offset = self.offsets[feature];
        let mut unknown = 0;

        for row in 0..values.len() {
            let Some(value) = values.value_ref(row) else {
                return Err(PreprocessingError::UnsupportedDtype {
                    column: self.feature_names_in[feature].clone(),
                    dtype: values.dtype().to_string(),
                });
            };
            match cats.binary_search_by(|c| c.as_value_ref().cmp(&value)) {
                Ok(idx) => out[[row, offset + idx]] = 1,
                Err(_) => match self.handle_unknown {
                    HandleUnknown::Error => {
                        return Err(PreprocessingError::UnknownCategory {
                            column: self.feature_names_in[feature].clone(),
                            value: value.to_string(),
                        });
                    }
                    // With Ignore, leave as zeros
                    HandleUnknown::Ignore => unknown += 1,
                },
            }
        }

        Ok(unknown)
    }
}

impl Transformer for OneHotEncoder {
    type Input = DataFrame;
    type Output = Array2<i8>;
    type Params = OneHotEncoderParams;
    type Fitted = FittedOneHotEncoder;

    fn fit(&self, data: &Self::Input) -> Result<Self::Fitted, PreprocessingError> {
        if data.height() == 0 {
            return Err(PreprocessingError::EmptyData(
                "Cannot fit OneHotEncoder on empty data".to_string(),
            ));
        }
        if data.width() == 0 {
            return Err(PreprocessingError::EmptyData(
                "Cannot fit OneHotEncoder without columns".to_string(),
            ));
        }

        let mut feature_names_in = Vec::with_capacity(data.width());
        let mut dtypes_in = Vec::with_capacity(data.width());
        let mut categories_ = Vec::with_capacity(data.width());

        for column in data.columns() {
            let cats = column.data().categories().ok_or_else(|| {
                PreprocessingError::UnsupportedDtype {
                    column: column.name().to_string(),
                    dtype: column.dtype().to_string(),
                }
            })?;
            trace!("column `{}`: categories {:?}", column.name(), cats);
            debug!(
                "OneHotEncoder fitted {} categories for column `{}`",
                cats.len(),
                column.name()
            );

            feature_names_in.push(column.name().to_string());
            dtypes_in.push(column.dtype());
            categories_.push(cats);
        }

        Ok(FittedOneHotEncoder::build(
            feature_names_in,
            dtypes_in,
            categories_,
            self.handle_unknown,
        ))
    }
}

impl FittedTransformer for FittedOneHotEncoder {
    type Input = DataFrame;
    type Output = Array2<i8>;
    type Params = OneHotEncoderParams;

    /// Encode the fitted columns of `data`, looked up by name. Other columns
    /// are ignored.
    fn transform(&self, data: &Self::Input) -> Result<Self::Output, PreprocessingError> {
        let rows = data.height();
        let mut result = Array2::<i8>::zeros((rows, self.n_features_out));

        for (feature, name) in self.feature_names_in.iter().enumerate() {
            let column = data
                .column(name)
                .ok_or_else(|| PreprocessingError::MissingColumn(name.clone()))?;
            let expected = self.dtypes_in[feature];
            if !column.dtype().is_compatible_with(expected) {
                return Err(PreprocessingError::DtypeMismatch {
                    column: name.clone(),
                    expected: expected.to_string(),
                    got: column.dtype().to_string(),
                });
            }

            let unknown = self.encode_column(feature, column.data(), &mut result)?;
            if unknown > 0 {
                debug!(
                    "OneHotEncoder zero-filled {} unknown value(s) in column `{}`",
                    unknown, name
                );
            }
        }

        Ok(result)
    }

    fn inverse_transform(&self, data: &Self::Output) -> Result<Self::Input, PreprocessingError> {
        let (rows, out_cols) = data.dim();

        if out_cols != self.n_features_out {
            return Err(PreprocessingError::FeatureMismatch {
                expected_features: self.n_features_out,
                got_features: out_cols,
            });
        }

        let mut columns = Vec::with_capacity(self.feature_names_in.len());
        for (feature, name) in self.feature_names_in.iter().enumerate() {
            let cats = &self.categories_[feature];
            let offset = self.offsets[feature];
            let block = data.slice(s![.., offset..offset + cats.len()]);

            let mut values = Vec::with_capacity(rows);
            for (row, indicators) in block.outer_iter().enumerate() {
                let mut active = indicators
                    .iter()
                    .enumerate()
                    .filter(|&(_, &v)| v != 0)
                    .map(|(idx, _)| idx);
                match (active.next(), active.next()) {
                    (Some(idx), None) => values.push(cats[idx].clone()),
                    (None, _) => {
                        return Err(PreprocessingError::InverseTransform(format!(
                            "row {} of `{}` has no active category",
                            row, name
                        )));
                    }
                    (Some(_), Some(_)) => {
                        return Err(PreprocessingError::InverseTransform(format!(
                            "row {} of `{}` has more than one active category",
                            row, name
                        )));
                    }
                }
            }

            let dtype = self.dtypes_in[feature];
            let restored = ColumnData::from_categories(dtype, &values).ok_or_else(|| {
                PreprocessingError::InverseTransform(format!(
                    "categories of `{}` do not fit dtype {}",
                    name, dtype
                ))
            })?;
            columns.push(Column::new(name.clone(), restored));
        }

        if columns.is_empty() {
            return Ok(DataFrame::default());
        }
        DataFrame::new(columns)
    }

    fn extract_params(&self) -> Self::Params {
        OneHotEncoderParams {
            feature_names_in: self.feature_names_in.clone(),
            dtypes_in: self.dtypes_in.clone(),
            categories_: self.categories_.clone(),
            handle_unknown: self.handle_unknown,
        }
    }

    fn from_params(params: Self::Params) -> Result<Self, PreprocessingError> {
        let n = params.feature_names_in.len();
        if params.dtypes_in.len() != n || params.categories_.len() != n {
            return Err(PreprocessingError::SerializationError(format!(
                "OneHotEncoder params describe {} features but carry {} dtypes and {} vocabularies",
                n,
                params.dtypes_in.len(),
                params.categories_.len()
            )));
        }
        let columns = params
            .feature_names_in
            .iter()
            .zip(&params.dtypes_in)
            .zip(&params.categories_);
        for ((name, &dtype), cats) in columns {
            if !dtype.is_categorical() {
                return Err(PreprocessingError::SerializationError(format!(
                    "`{}` is stored with dtype {}, which cannot hold categories",
                    name, dtype
                )));
            }
            if let Some(bad) = cats.iter().find(|c| !c.fits(dtype)) {
                return Err(PreprocessingError::SerializationError(format!(
                    "category `{}` of `{}` does not fit dtype {}",
                    bad, name, dtype
                )));
            }
            if cats.is_empty() || cats.windows(2).any(|w| w[0] >= w[1]) {
                return Err(PreprocessingError::SerializationError(format!(
                    "categories of `{}` must be non-empty, sorted and distinct",
                    name
                )));
            }
        }

        Ok(FittedOneHotEncoder::build(
            params.feature_names_in,
            params.dtypes_in,
            params.categories_,
            params.handle_unknown,
        ))
    }

    fn n_features_in(&self) -> usize {
        self.feature_names_in.len()
    }
}
