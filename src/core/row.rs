use serde_json::{Map, Value as JsonValue};

use super::error::QueryError;
use super::value::Scalar;

/// A plain row record: column name to cell value, in insertion order.
pub type Row = Map<String, JsonValue>;

/// Reads a cell as a scalar. The column must exist on the row.
pub fn cell(row: &Row, column: &str) -> Result<Scalar, QueryError> {
    let value = row
        .get(column)
        .ok_or_else(|| QueryError::MissingField(column.to_string()))?;
    Scalar::from_cell(column, value)
}

/// Builds a row from `(column, value)` pairs, keeping their order.
pub fn row_from<I, K, V>(pairs: I) -> Row
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Scalar>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), JsonValue::from(v.into())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_lookup() {
        let row = row_from([("id", Scalar::Int(1)), ("name", Scalar::from("Alice"))]);
        assert_eq!(cell(&row, "name").unwrap(), Scalar::from("Alice"));
        assert!(matches!(cell(&row, "age"), Err(QueryError::MissingField(c)) if c == "age"));
    }

    #[test]
    fn test_row_keeps_insertion_order() {
        let row = row_from([("b", 1), ("a", 2), ("c", 3)]);
        let keys: Vec<&str> = row.keys().map(String::as_str).collect();
        assert_eq!(keys, ["b", "a", "c"]);
    }
}
