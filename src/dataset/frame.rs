//! In-memory column-oriented table.

use crate::dataset::category::{Category, ValueRef};
use crate::dataset::Tabular;
use crate::preprocessing::error::PreprocessingError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::hash::Hash;

/// Element type of a column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DType {
    Bool,
    Int8,
    Int64,
    Float64,
    Utf8,
}

impl DType {
    /// Whether values of this type can be used as categories.
    pub fn is_categorical(&self) -> bool {
        !matches!(self, DType::Float64)
    }

    /// Whether a column of type `self` can be encoded with a vocabulary
    /// fitted on a column of type `fitted`. Integer widths are interchangeable.
    pub fn is_compatible_with(&self, fitted: DType) -> bool {
        match (self, fitted) {
            (DType::Int8 | DType::Int64, DType::Int8 | DType::Int64) => true,
            (a, b) => *a == b,
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DType::Bool => "bool",
            DType::Int8 => "i8",
            DType::Int64 => "i64",
            DType::Float64 => "f64",
            DType::Utf8 => "str",
        };
        f.write_str(name)
    }
}

/// The values of one column.
#[derive(Clone, Debug, PartialEq)]
pub enum ColumnData {
    Bool(Vec<bool>),
    Int8(Vec<i8>),
    Int64(Vec<i64>),
    Float64(Vec<f64>),
    Utf8(Vec<String>),
}

fn count_distinct<T: Eq + Hash>(values: impl Iterator<Item = T>) -> usize {
    values.collect::<HashSet<T>>().len()
}

fn sorted_distinct<'a>(values: impl Iterator<Item = ValueRef<'a>>) -> Vec<Category> {
    values
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(ValueRef::to_category)
        .collect()
}

impl ColumnData {
    /// Number of rows.
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Bool(v) => v.len(),
            ColumnData::Int8(v) => v.len(),
            ColumnData::Int64(v) => v.len(),
            ColumnData::Float64(v) => v.len(),
            ColumnData::Utf8(v) => v.len(),
        }
    }

    /// Whether the column has no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn dtype(&self) -> DType {
        match self {
            ColumnData::Bool(_) => DType::Bool,
            ColumnData::Int8(_) => DType::Int8,
            ColumnData::Int64(_) => DType::Int64,
            ColumnData::Float64(_) => DType::Float64,
            ColumnData::Utf8(_) => DType::Utf8,
        }
    }

    /// Number of distinct values. NaN is not counted.
    pub fn n_unique(&self) -> usize {
        match self {
            ColumnData::Bool(v) => count_distinct(v.iter()),
            ColumnData::Int8(v) => count_distinct(v.iter()),
            ColumnData::Int64(v) => count_distinct(v.iter()),
            // `+ 0.0` folds -0.0 into 0.0 before comparing bit patterns
            ColumnData::Float64(v) => {
                count_distinct(v.iter().filter(|x| !x.is_nan()).map(|x| (x + 0.0).to_bits()))
            }
            ColumnData::Utf8(v) => count_distinct(v.iter().map(String::as_str)),
        }
    }

    /// The cell at `row` as a category view, or `None` for float columns and
    /// out-of-range rows.
    pub fn value_ref(&self, row: usize) -> Option<ValueRef<'_>> {
        match self {
            ColumnData::Bool(v) => v.get(row).map(|&b| ValueRef::Bool(b)),
            ColumnData::Int8(v) => v.get(row).map(|&i| ValueRef::Int(i64::from(i))),
            ColumnData::Int64(v) => v.get(row).map(|&i| ValueRef::Int(i)),
            ColumnData::Float64(_) => None,
            ColumnData::Utf8(v) => v.get(row).map(|s| ValueRef::Str(s)),
        }
    }

    /// Distinct values in ascending order, or `None` for float columns.
    pub fn categories(&self) -> Option<Vec<Category>> {
        let cats = match self {
            ColumnData::Bool(v) => sorted_distinct(v.iter().map(|&b| ValueRef::Bool(b))),
            ColumnData::Int8(v) => sorted_distinct(v.iter().map(|&i| ValueRef::Int(i64::from(i)))),
            ColumnData::Int64(v) => sorted_distinct(v.iter().map(|&i| ValueRef::Int(i))),
            ColumnData::Float64(_) => return None,
            ColumnData::Utf8(v) => sorted_distinct(v.iter().map(|s| ValueRef::Str(s))),
        };
        Some(cats)
    }

    /// Build a column of `dtype` from category values.
    ///
    /// Returns `None` if a value does not fit the dtype.
    pub fn from_categories(dtype: DType, values: &[Category]) -> Option<ColumnData> {
        let data = match dtype {
            DType::Bool => ColumnData::Bool(
                values
                    .iter()
                    .map(|c| match c {
                        Category::Bool(b) => Some(*b),
                        _ => None,
                    })
                    .collect::<Option<_>>()?,
            ),
            DType::Int8 => ColumnData::Int8(
                values
                    .iter()
                    .map(|c| match c {
                        Category::Int(i) => i8::try_from(*i).ok(),
                        _ => None,
                    })
                    .collect::<Option<_>>()?,
            ),
            DType::Int64 => ColumnData::Int64(
                values
                    .iter()
                    .map(|c| match c {
                        Category::Int(i) => Some(*i),
                        _ => None,
                    })
                    .collect::<Option<_>>()?,
            ),
            DType::Float64 => return None,
            DType::Utf8 => ColumnData::Utf8(
                values
                    .iter()
                    .map(|c| match c {
                        Category::Str(s) => Some(s.clone()),
                        _ => None,
                    })
                    .collect::<Option<_>>()?,
            ),
        };
        Some(data)
    }

    pub fn as_i8(&self) -> Option<&[i8]> {
        match self {
            ColumnData::Int8(v) => Some(v),
            _ => None,
        }
    }
}

impl From<Vec<bool>> for ColumnData {
    fn from(v: Vec<bool>) -> Self {
        ColumnData::Bool(v)
    }
}

impl From<Vec<i8>> for ColumnData {
    fn from(v: Vec<i8>) -> Self {
        ColumnData::Int8(v)
    }
}

impl From<Vec<i64>> for ColumnData {
    fn from(v: Vec<i64>) -> Self {
        ColumnData::Int64(v)
    }
}

impl From<Vec<f64>> for ColumnData {
    fn from(v: Vec<f64>) -> Self {
        ColumnData::Float64(v)
    }
}

impl From<Vec<String>> for ColumnData {
    fn from(v: Vec<String>) -> Self {
        ColumnData::Utf8(v)
    }
}

impl From<Vec<&str>> for ColumnData {
    fn from(v: Vec<&str>) -> Self {
        ColumnData::Utf8(v.into_iter().map(str::to_string).collect())
    }
}

/// A named column.
#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    name: String,
    data: ColumnData,
}

impl Column {
    pub fn new(name: impl Into<String>, data: impl Into<ColumnData>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data(&self) -> &ColumnData {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn dtype(&self) -> DType {
        self.data.dtype()
    }
}

/// Column-oriented in-memory table with an `i64` row index.
///
/// Column names are unique and column order is preserved. The row index
/// labels rows independently of their position; it defaults to `0..n` and
/// is carried through [`select`](Self::select), [`drop`](Self::drop) and
/// [`hstack`](Self::hstack) unchanged.
///
/// # Example
/// ```
/// use categorical_expander::dataset::{Column, DataFrame};
///
/// let df = DataFrame::new(vec![
///     Column::new("color", vec!["red", "blue"]),
///     Column::new("size", vec![1i64, 2]),
/// ])
/// .unwrap();
/// assert_eq!(df.height(), 2);
/// assert_eq!(df.column_names(), vec!["color", "size"]);
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub struct DataFrame {
    index: Vec<i64>,
    columns: Vec<Column>,
}

impl DataFrame {
    /// Create a table from columns of equal length with unique names.
    pub fn new(columns: Vec<Column>) -> Result<Self, PreprocessingError> {
        let height = columns.first().map_or(0, Column::len);
        let frame = Self {
            index: (0..height as i64).collect(),
            columns: Vec::with_capacity(columns.len()),
        };
        frame.hstack(columns)
    }

    /// Replace the row index.
    pub fn with_index(mut self, index: Vec<i64>) -> Result<Self, PreprocessingError> {
        if index.len() != self.height() {
            return Err(PreprocessingError::LengthMismatch {
                column: "index".to_string(),
                expected: self.height(),
                got: index.len(),
            });
        }
        self.index = index;
        Ok(self)
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.index.len()
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn index(&self) -> &[i64] {
        &self.index
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Consume the table, keeping only its columns.
    pub fn into_columns(self) -> Vec<Column> {
        self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(Column::name).collect()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// A new table with only `names`, in the given order.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<DataFrame, PreprocessingError> {
        let columns = names
            .iter()
            .map(|name| {
                self.column(name.as_ref())
                    .cloned()
                    .ok_or_else(|| PreprocessingError::MissingColumn(name.as_ref().to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        DataFrame {
            index: self.index.clone(),
            columns: Vec::with_capacity(columns.len()),
        }
        .hstack(columns)
    }

    /// A new table without `names`. Names not present are ignored.
    pub fn drop<S: AsRef<str>>(&self, names: &[S]) -> DataFrame {
        let names: HashSet<&str> = names.iter().map(|n| n.as_ref()).collect();
        let columns = self
            .columns
            .iter()
            .filter(|c| !names.contains(c.name.as_str()))
            .cloned()
            .collect();
        DataFrame {
            index: self.index.clone(),
            columns,
        }
    }

    /// Append columns on the right.
    ///
    /// Every column must have [`height`](Self::height) rows and a name not yet
    /// in the table.
    pub fn hstack(mut self, columns: Vec<Column>) -> Result<DataFrame, PreprocessingError> {
        let height = self.height();
        let mut seen: HashSet<&str> = self.columns.iter().map(Column::name).collect();
        for column in &columns {
            if column.len() != height {
                return Err(PreprocessingError::LengthMismatch {
                    column: column.name.clone(),
                    expected: height,
                    got: column.len(),
                });
            }
            if !seen.insert(column.name()) {
                return Err(PreprocessingError::DuplicateColumn(column.name.clone()));
            }
        }
        self.columns.extend(columns);
        Ok(self)
    }
}

impl Tabular for DataFrame {
    fn column_data(&self, name: &str) -> Option<&ColumnData> {
        self.column(name).map(Column::data)
    }
}
