//! Category values and their ordering.
//!
//! A category is a single distinct value of an encodable column. Categories
//! order by their natural order: byte-lexicographic for strings, numeric for
//! integers and `false < true` for booleans. That order decides the position
//! of each indicator column and which category `drop_first` removes.

use crate::dataset::frame::DType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An owned category value learned during fit.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Bool(bool),
    Int(i64),
    Str(String),
}

impl Category {
    /// Borrow the category for comparison against column values.
    pub fn as_value_ref(&self) -> ValueRef<'_> {
        match self {
            Category::Bool(b) => ValueRef::Bool(*b),
            Category::Int(i) => ValueRef::Int(*i),
            Category::Str(s) => ValueRef::Str(s),
        }
    }

    /// Whether this value can be stored in a column of `dtype`.
    pub fn fits(&self, dtype: DType) -> bool {
        match (self, dtype) {
            (Category::Bool(_), DType::Bool) => true,
            (Category::Int(i), DType::Int8) => i8::try_from(*i).is_ok(),
            (Category::Int(_), DType::Int64) => true,
            (Category::Str(_), DType::Utf8) => true,
            _ => false,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_value_ref().fmt(f)
    }
}

impl From<&str> for Category {
    fn from(s: &str) -> Self {
        Category::Str(s.to_string())
    }
}

impl From<String> for Category {
    fn from(s: String) -> Self {
        Category::Str(s)
    }
}

impl From<i64> for Category {
    fn from(i: i64) -> Self {
        Category::Int(i)
    }
}

impl From<bool> for Category {
    fn from(b: bool) -> Self {
        Category::Bool(b)
    }
}

/// A borrowed view of one cell of an encodable column.
///
/// Variant order matches [`Category`], so `a.as_value_ref().cmp(&b.as_value_ref())`
/// equals `a.cmp(&b)` and sorted vocabularies can be binary searched with
/// borrowed cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ValueRef<'a> {
    Bool(bool),
    Int(i64),
    Str(&'a str),
}

impl ValueRef<'_> {
    /// Convert into an owned category.
    pub fn to_category(self) -> Category {
        match self {
            ValueRef::Bool(b) => Category::Bool(b),
            ValueRef::Int(i) => Category::Int(i),
            ValueRef::Str(s) => Category::Str(s.to_string()),
        }
    }
}

impl fmt::Display for ValueRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueRef::Bool(b) => write!(f, "{}", b),
            ValueRef::Int(i) => write!(f, "{}", i),
            ValueRef::Str(s) => f.write_str(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_categories_sort_lexicographically() {
        let mut cats: Vec<Category> = vec!["red".into(), "blue".into(), "Green".into()];
        cats.sort();
        assert_eq!(cats, vec!["Green".into(), "blue".into(), "red".into()]);
    }

    #[test]
    fn test_int_categories_sort_numerically() {
        let mut cats: Vec<Category> = vec![10.into(), (-3).into(), 2.into()];
        cats.sort();
        assert_eq!(cats, vec![Category::Int(-3), Category::Int(2), Category::Int(10)]);
    }

    #[test]
    fn test_value_ref_order_matches_category_order() {
        let a = Category::from("apple");
        let b = Category::from("banana");
        assert_eq!(
            a.as_value_ref().cmp(&b.as_value_ref()),
            a.cmp(&b)
        );
        let sorted = vec![Category::from("a"), Category::from("c"), Category::from("e")];
        assert_eq!(
            sorted.binary_search_by(|c| c.as_value_ref().cmp(&ValueRef::Str("c"))),
            Ok(1)
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Category::from("red").to_string(), "red");
        assert_eq!(Category::Int(-7).to_string(), "-7");
        assert_eq!(Category::Bool(true).to_string(), "true");
    }

    #[test]
    fn test_fits_dtype() {
        assert!(Category::Bool(true).fits(DType::Bool));
        assert!(Category::Int(-5).fits(DType::Int8));
        assert!(!Category::Int(300).fits(DType::Int8));
        assert!(Category::Int(300).fits(DType::Int64));
        assert!(!Category::Int(1).fits(DType::Utf8));
        assert!(!Category::from("1").fits(DType::Float64));
    }

    #[test]
    fn test_to_category() {
        assert_eq!(ValueRef::Str("x").to_category(), Category::from("x"));
        assert_eq!(ValueRef::Int(4).to_category(), Category::Int(4));
    }
}
