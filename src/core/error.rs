use thiserror::Error;

#[derive(Error, Debug)]
pub enum QueryError {
    #[error("Can not create INSERT query: supplied rows are empty")]
    EmptyRows,
    #[error("No key `{column}` in the {row}-th row required to insert many")]
    MissingInsertColumn { row: usize, column: String },
    #[error("Invalid insert value on key `{column}` in the {row}-th row - {kind}")]
    NonPrimitiveValue {
        row: usize,
        column: String,
        kind: &'static str,
    },
    #[error("Value of `{column}` must be a scalar, got {kind}")]
    NonScalarValue { column: String, kind: &'static str },
    #[error("Can not create UPDATE query: nothing to set")]
    EmptyAssignments,
    #[error("Field `{0}` is missing in the row")]
    MissingField(String),
    #[error("Unsupported operator: {0}")]
    UnsupportedOperator(String),
    #[error("Unsupported identifier: {0}")]
    UnsupportedIdentifier(String),
    #[error("Invalid operand for {operator}: {reason}")]
    InvalidOperand {
        operator: &'static str,
        reason: &'static str,
    },
    #[error("Invalid ORDER BY entry: {0}")]
    InvalidOrderBy(String),
    #[error("Condition nesting exceeds {0} levels, likely a circular reference")]
    ConditionTooDeep(usize),
    #[error("Raw SQL conditions can not be evaluated against in-memory rows")]
    RawSqlNotEvaluable,
    #[error("JOIN is not supported by the in-memory evaluator")]
    JoinsNotSupported,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}
