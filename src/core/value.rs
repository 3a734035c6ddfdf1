use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use super::error::QueryError;

/// A value that can be bound to a `?` placeholder or stored in a row cell.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Scalar {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Scalar {
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Int(_) | Self::Float(_) => "number",
            Self::Text(_) => "string",
        }
    }

    /// Converts a JSON cell, rejecting arrays and objects.
    ///
    /// The error carries only the JSON kind; callers attach row/column context.
    pub fn from_json(value: &JsonValue) -> Result<Self, &'static str> {
        match value {
            JsonValue::Null => Ok(Self::Null),
            JsonValue::Bool(b) => Ok(Self::Bool(*b)),
            JsonValue::Number(n) => Ok(n
                .as_i64()
                .map_or_else(|| Self::Float(n.as_f64().unwrap_or(f64::NAN)), Self::Int)),
            JsonValue::String(s) => Ok(Self::Text(s.clone())),
            JsonValue::Array(_) => Err("array"),
            JsonValue::Object(_) => Err("object"),
        }
    }

    /// Same as [`Scalar::from_json`] but reports the offending column.
    pub fn from_cell(column: &str, value: &JsonValue) -> Result<Self, QueryError> {
        Self::from_json(value).map_err(|kind| QueryError::NonScalarValue {
            column: column.to_string(),
            kind,
        })
    }

    /// Numeric view used for coercion: booleans count as 0/1, strings are
    /// parsed after trimming. Null and non-numeric text have no numeric view.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Null => None,
            Self::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Self::Int(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            Self::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    trimmed.parse().ok()
                }
            }
        }
    }

    /// Loose equality with SQL null semantics.
    ///
    /// Null never equals anything (including null). Two strings compare
    /// exactly; any other pairing compares numerically, so `"250.00" == 250`
    /// and `true == 1`.
    #[must_use]
    pub fn loose_eq(&self, other: &Self) -> bool {
        self.loose_cmp(other) == Some(Ordering::Equal)
    }

    /// Loose ordering with SQL null semantics; `None` means "unknown"
    /// (a null side, or a string that does not coerce to a number).
    #[must_use]
    pub fn loose_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Null, _) | (_, Self::Null) => None,
            (Self::Text(a), Self::Text(b)) => Some(a.cmp(b)),
            (Self::Int(a), Self::Int(b)) => Some(a.cmp(b)),
            (a, b) => a.as_number()?.partial_cmp(&b.as_number()?),
        }
    }

    /// Total ordering for ORDER BY, ranked by storage class the way SQLite
    /// sorts: null < numbers (booleans as 0/1) < text. Numbers compare by
    /// value, text byte-wise. Numeric-looking text still sorts as text.
    #[must_use]
    pub fn sort_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Null, Self::Null) => Ordering::Equal,
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (a, b) if a.sort_rank() != b.sort_rank() => a.sort_rank().cmp(&b.sort_rank()),
            (a, b) => match (a.sort_number(), b.sort_number()) {
                (SortNumber::Int(x), SortNumber::Int(y)) => x.cmp(&y),
                (SortNumber::Int(x), SortNumber::Float(y)) => cmp_int_float(x, y),
                (SortNumber::Float(x), SortNumber::Int(y)) => cmp_int_float(y, x).reverse(),
                (SortNumber::Float(x), SortNumber::Float(y)) => cmp_floats(x, y),
            },
        }
    }

    const fn sort_rank(&self) -> u8 {
        match self {
            Self::Null => 0,
            Self::Bool(_) | Self::Int(_) | Self::Float(_) => 1,
            Self::Text(_) => 2,
        }
    }

    /// Only called on rank 1 values.
    fn sort_number(&self) -> SortNumber {
        match self {
            Self::Bool(b) => SortNumber::Int(i64::from(*b)),
            Self::Int(i) => SortNumber::Int(*i),
            Self::Float(f) => SortNumber::Float(*f),
            Self::Null | Self::Text(_) => SortNumber::Float(f64::NAN),
        }
    }
}

#[derive(Clone, Copy)]
enum SortNumber {
    Int(i64),
    Float(f64),
}

/// NaN sorts above every other number.
fn cmp_floats(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

/// Exact integer/float comparison, no rounding of large integers.
#[allow(clippy::cast_possible_truncation)]
fn cmp_int_float(i: i64, f: f64) -> Ordering {
    // 2^63, the first float past i64::MAX
    const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;
    if f.is_nan() || f >= I64_BOUND {
        return Ordering::Less;
    }
    if f < -I64_BOUND {
        return Ordering::Greater;
    }
    let whole = f.trunc();
    match i.cmp(&(whole as i64)) {
        Ordering::Equal => cmp_floats(whole, f),
        ordering => ordering,
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl<T: Into<Self>> From<Option<T>> for Scalar {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl From<Scalar> for JsonValue {
    fn from(value: Scalar) -> Self {
        match value {
            Scalar::Null => Self::Null,
            Scalar::Bool(b) => Self::Bool(b),
            Scalar::Int(i) => Self::from(i),
            Scalar::Float(f) => Self::from(f),
            Scalar::Text(s) => Self::String(s),
        }
    }
}

impl std::fmt::Display for Scalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => write!(f, "NULL"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(r) => write!(f, "{r}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numeric_string_equals_number() {
        assert!(Scalar::from("250.00").loose_eq(&Scalar::Int(250)));
        assert!(Scalar::Float(2.5).loose_eq(&Scalar::from(" 2.5 ")));
        assert!(!Scalar::from("abc").loose_eq(&Scalar::Int(0)));
        assert!(!Scalar::from("").loose_eq(&Scalar::Int(0)));
    }

    #[test]
    fn test_boolean_coerces_to_integer() {
        assert!(Scalar::Bool(true).loose_eq(&Scalar::Int(1)));
        assert!(Scalar::Bool(false).loose_eq(&Scalar::Int(0)));
        assert!(Scalar::Bool(true).loose_eq(&Scalar::from("1")));
        assert!(!Scalar::Bool(true).loose_eq(&Scalar::Int(2)));
    }

    #[test]
    fn test_strings_compare_exactly() {
        assert!(!Scalar::from("1.0").loose_eq(&Scalar::from("1")));
        assert_eq!(
            Scalar::from("10").loose_cmp(&Scalar::from("9")),
            Some(Ordering::Less)
        );
    }

    #[test]
    fn test_null_is_unknown() {
        assert!(!Scalar::Null.loose_eq(&Scalar::Null));
        assert_eq!(Scalar::Null.loose_cmp(&Scalar::Int(1)), None);
        assert_eq!(Scalar::Null.sort_cmp(&Scalar::Int(1)), Ordering::Less);
        assert_eq!(Scalar::Int(1).sort_cmp(&Scalar::Null), Ordering::Greater);
    }

    #[test]
    fn test_sort_ranks_null_numbers_text() {
        let mut values = vec![
            Scalar::from("10a"),
            Scalar::Int(10),
            Scalar::from("9"),
            Scalar::Null,
            Scalar::Float(9.5),
            Scalar::Bool(true),
            Scalar::from("abc"),
        ];
        values.sort_by(Scalar::sort_cmp);
        assert_eq!(
            values,
            vec![
                Scalar::Null,
                Scalar::Bool(true),
                Scalar::Float(9.5),
                Scalar::Int(10),
                Scalar::from("10a"),
                Scalar::from("9"),
                Scalar::from("abc"),
            ]
        );
    }

    #[test]
    fn test_sort_order_is_transitive_on_mixed_values() {
        let values = [
            Scalar::from("10a"),
            Scalar::from("9"),
            Scalar::Int(10),
            Scalar::Float(10.0),
            Scalar::Float(-0.5),
            Scalar::Int(9_007_199_254_740_993),
            Scalar::Float(9_007_199_254_740_992.0),
            Scalar::Bool(false),
            Scalar::Null,
            Scalar::from(""),
        ];
        for a in &values {
            for b in &values {
                assert_eq!(a.sort_cmp(b), b.sort_cmp(a).reverse(), "{a:?} vs {b:?}");
                for c in &values {
                    if a.sort_cmp(b).is_le() && b.sort_cmp(c).is_le() {
                        assert!(a.sort_cmp(c).is_le(), "{a:?} <= {b:?} <= {c:?}");
                    }
                }
            }
        }
        assert_eq!(Scalar::Int(10).sort_cmp(&Scalar::Float(10.0)), Ordering::Equal);
        assert_eq!(Scalar::Float(-0.5).sort_cmp(&Scalar::Bool(false)), Ordering::Less);
        assert_eq!(
            Scalar::Int(9_007_199_254_740_993).sort_cmp(&Scalar::Float(9_007_199_254_740_992.0)),
            Ordering::Greater
        );
    }

    #[test]
    fn test_large_integers_compare_exactly() {
        let a = Scalar::Int(9_007_199_254_740_993);
        let b = Scalar::Int(9_007_199_254_740_992);
        assert_eq!(a.loose_cmp(&b), Some(Ordering::Greater));
    }

    #[test]
    fn test_from_json() {
        assert_eq!(Scalar::from_json(&json!(3)), Ok(Scalar::Int(3)));
        assert_eq!(Scalar::from_json(&json!(1.5)), Ok(Scalar::Float(1.5)));
        assert_eq!(Scalar::from_json(&json!("x")), Ok(Scalar::from("x")));
        assert_eq!(Scalar::from_json(&json!(null)), Ok(Scalar::Null));
        assert_eq!(Scalar::from_json(&json!([1])), Err("array"));
        assert_eq!(Scalar::from_json(&json!({"a": 1})), Err("object"));
    }

    #[test]
    fn test_deserialize_untagged() {
        let values: Vec<Scalar> = serde_json::from_str(r#"[null, true, 7, 7.5, "s"]"#).unwrap();
        assert_eq!(
            values,
            vec![
                Scalar::Null,
                Scalar::Bool(true),
                Scalar::Int(7),
                Scalar::Float(7.5),
                Scalar::from("s"),
            ]
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Scalar::Null.to_string(), "NULL");
        assert_eq!(Scalar::Int(42).to_string(), "42");
        assert_eq!(Scalar::Float(3.25).to_string(), "3.25");
        assert_eq!(Scalar::from("hello").to_string(), "hello");
        assert_eq!(Scalar::Bool(true).to_string(), "true");
    }
}
