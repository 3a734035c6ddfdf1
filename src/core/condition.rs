//! Condition tree shared by the SQL builder and the in-memory emulator.
//!
//! A condition is one of three shapes: an opaque raw SQL fragment, an
//! AND/OR group of child conditions, or a single column comparison.
//! The JSON form mirrors the tuple notation used by callers:
//! `["col", "=", 1]`, `["OR", [...]]` and `{"raw": "...", "values": [...]}`.

use std::str::FromStr;

use serde::Deserialize;

use super::error::QueryError;
use super::value::Scalar;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum Operator {
    Eq,
    NotEq,
    Gte,
    Gt,
    Lte,
    Lt,
    Is,
    IsNot,
    Like,
    NotLike,
    In,
    NotIn,
}

impl Operator {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::NotEq => "!=",
            Self::Gte => ">=",
            Self::Gt => ">",
            Self::Lte => "<=",
            Self::Lt => "<",
            Self::Is => "IS",
            Self::IsNot => "IS NOT",
            Self::Like => "LIKE",
            Self::NotLike => "NOT LIKE",
            Self::In => "IN",
            Self::NotIn => "NOT IN",
        }
    }

    /// `IN` and `NOT IN` take a list operand, everything else a scalar.
    #[must_use]
    pub const fn takes_list(self) -> bool {
        matches!(self, Self::In | Self::NotIn)
    }
}

impl FromStr for Operator {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.split_whitespace().collect::<Vec<_>>().join(" ");
        match normalized.to_ascii_uppercase().as_str() {
            "=" => Ok(Self::Eq),
            "!=" | "<>" => Ok(Self::NotEq),
            ">=" => Ok(Self::Gte),
            ">" => Ok(Self::Gt),
            "<=" => Ok(Self::Lte),
            "<" => Ok(Self::Lt),
            "IS" => Ok(Self::Is),
            "IS NOT" => Ok(Self::IsNot),
            "LIKE" => Ok(Self::Like),
            "NOT LIKE" => Ok(Self::NotLike),
            "IN" => Ok(Self::In),
            "NOT IN" => Ok(Self::NotIn),
            _ => Err(QueryError::UnsupportedOperator(s.to_string())),
        }
    }
}

impl TryFrom<String> for Operator {
    type Error = QueryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conjunction {
    And,
    Or,
}

impl Conjunction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }
}

impl FromStr for Conjunction {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "AND" => Ok(Self::And),
            "OR" => Ok(Self::Or),
            _ => Err(QueryError::UnsupportedOperator(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Operand {
    List(Vec<Scalar>),
    Single(Scalar),
}

/// `column <operator> operand`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "(String, String, Operand)")]
pub struct Comparison {
    pub column: String,
    pub operator: Operator,
    pub operand: Operand,
}

impl Comparison {
    pub fn new(column: impl Into<String>, operator: Operator, operand: Operand) -> Self {
        Self {
            column: column.into(),
            operator,
            operand,
        }
    }

    /// The operand of a scalar operator. Fails for list operators or list operands.
    pub fn scalar_operand(&self) -> Result<&Scalar, QueryError> {
        match (&self.operand, self.operator.takes_list()) {
            (Operand::Single(value), false) => Ok(value),
            (_, true) => Err(QueryError::InvalidOperand {
                operator: self.operator.as_str(),
                reason: "expected a list of values",
            }),
            (Operand::List(_), false) => Err(QueryError::InvalidOperand {
                operator: self.operator.as_str(),
                reason: "expected a single value",
            }),
        }
    }

    /// The non-empty operand list of `IN` / `NOT IN`.
    pub fn list_operand(&self) -> Result<&[Scalar], QueryError> {
        match (&self.operand, self.operator.takes_list()) {
            (Operand::List(values), true) if !values.is_empty() => Ok(values),
            (Operand::List(_), true) => Err(QueryError::InvalidOperand {
                operator: self.operator.as_str(),
                reason: "value list is empty",
            }),
            _ => Err(QueryError::InvalidOperand {
                operator: self.operator.as_str(),
                reason: "expected a list of values",
            }),
        }
    }
}

impl TryFrom<(String, String, Operand)> for Comparison {
    type Error = QueryError;

    fn try_from((column, operator, operand): (String, String, Operand)) -> Result<Self, Self::Error> {
        Ok(Self::new(column, operator.parse()?, operand))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "ConditionRepr")]
pub enum Condition {
    /// Opaque SQL with its own placeholder values. Not evaluable in memory.
    Raw { sql: String, values: Vec<Scalar> },
    Group {
        conjunction: Conjunction,
        children: Vec<Condition>,
    },
    Compare(Comparison),
}

impl Condition {
    pub fn raw(sql: impl Into<String>, values: Vec<Scalar>) -> Self {
        Self::Raw {
            sql: sql.into(),
            values,
        }
    }

    pub fn and(children: impl IntoIterator<Item = Self>) -> Self {
        Self::Group {
            conjunction: Conjunction::And,
            children: children.into_iter().collect(),
        }
    }

    pub fn or(children: impl IntoIterator<Item = Self>) -> Self {
        Self::Group {
            conjunction: Conjunction::Or,
            children: children.into_iter().collect(),
        }
    }

    pub fn compare(column: impl Into<String>, operator: Operator, value: impl Into<Scalar>) -> Self {
        Self::Compare(Comparison::new(column, operator, Operand::Single(value.into())))
    }

    pub fn eq(column: impl Into<String>, value: impl Into<Scalar>) -> Self {
        Self::compare(column, Operator::Eq, value)
    }

    pub fn is_null(column: impl Into<String>) -> Self {
        Self::compare(column, Operator::Is, Scalar::Null)
    }

    pub fn is_not_null(column: impl Into<String>) -> Self {
        Self::compare(column, Operator::IsNot, Scalar::Null)
    }

    pub fn is_in<V: Into<Scalar>>(column: impl Into<String>, values: impl IntoIterator<Item = V>) -> Self {
        Self::list(column, Operator::In, values)
    }

    pub fn not_in<V: Into<Scalar>>(column: impl Into<String>, values: impl IntoIterator<Item = V>) -> Self {
        Self::list(column, Operator::NotIn, values)
    }

    fn list<V: Into<Scalar>>(
        column: impl Into<String>,
        operator: Operator,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        let values = values.into_iter().map(Into::into).collect();
        Self::Compare(Comparison::new(column, operator, Operand::List(values)))
    }
}

impl From<Comparison> for Condition {
    fn from(comparison: Comparison) -> Self {
        Self::Compare(comparison)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ConditionRepr {
    Raw {
        raw: String,
        #[serde(default)]
        values: Vec<Scalar>,
    },
    Compare(String, String, Operand),
    Group(String, Vec<ConditionRepr>),
}

impl TryFrom<ConditionRepr> for Condition {
    type Error = QueryError;

    fn try_from(repr: ConditionRepr) -> Result<Self, Self::Error> {
        match repr {
            ConditionRepr::Raw { raw, values } => Ok(Self::raw(raw, values)),
            ConditionRepr::Compare(column, operator, operand) => {
                Ok(Self::Compare(Comparison::try_from((column, operator, operand))?))
            }
            ConditionRepr::Group(conjunction, children) => Ok(Self::Group {
                conjunction: conjunction.parse()?,
                children: children
                    .into_iter()
                    .map(Self::try_from)
                    .collect::<Result<_, _>>()?,
            }),
        }
    }
}
