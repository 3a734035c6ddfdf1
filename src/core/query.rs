use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::condition::{Comparison, Condition, Operator};
use super::error::QueryError;
use super::row::Row;
use super::value::Scalar;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl FromStr for SortDirection {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ASC" => Ok(Self::Asc),
            "DESC" => Ok(Self::Desc),
            _ => Err(QueryError::InvalidOrderBy(s.to_string())),
        }
    }
}

impl TryFrom<String> for SortDirection {
    type Error = QueryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// One `ORDER BY` key. In JSON either `["col"]` or `["col", "DESC"]`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Vec<String>")]
pub struct OrderBy {
    pub column: String,
    pub direction: SortDirection,
}

impl OrderBy {
    pub fn new(column: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            column: column.into(),
            direction,
        }
    }
}

impl TryFrom<Vec<String>> for OrderBy {
    type Error = QueryError;

    fn try_from(parts: Vec<String>) -> Result<Self, Self::Error> {
        match parts.as_slice() {
            [column] => Ok(Self::new(column.clone(), SortDirection::Asc)),
            [column, direction] => Ok(Self::new(column.clone(), direction.parse()?)),
            _ => Err(QueryError::InvalidOrderBy(parts.join(" "))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JoinKind {
    /// Bare `JOIN`
    #[default]
    #[serde(alias = "")]
    Plain,
    Inner,
    Left,
    Right,
}

impl JoinKind {
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Plain => "JOIN",
            Self::Inner => "INNER JOIN",
            Self::Left => "LEFT JOIN",
            Self::Right => "RIGHT JOIN",
        }
    }
}

/// Column-to-column `ON` pair, rendered verbatim (no placeholders).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "(String, Operator, String)")]
pub struct JoinOn {
    pub left: String,
    pub operator: Operator,
    pub right: String,
}

impl From<(String, Operator, String)> for JoinOn {
    fn from((left, operator, right): (String, Operator, String)) -> Self {
        Self {
            left,
            operator,
            right,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Join {
    #[serde(default, rename = "type")]
    pub kind: JoinKind,
    pub table: String,
    #[serde(default, rename = "as")]
    pub alias: Option<String>,
    pub on: Vec<JoinOn>,
}

impl Join {
    pub fn new(kind: JoinKind, table: impl Into<String>, alias: Option<&str>) -> Self {
        Self {
            kind,
            table: table.into(),
            alias: alias.map(str::to_string),
            on: Vec::new(),
        }
    }

    #[must_use]
    pub fn on(mut self, left: impl Into<String>, operator: Operator, right: impl Into<String>) -> Self {
        self.on.push(JoinOn {
            left: left.into(),
            operator,
            right: right.into(),
        });
        self
    }
}

/// Full description of a SELECT, shared by the SQL builder and the emulator.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuerySpec {
    pub table: String,
    #[serde(default, rename = "as")]
    pub alias: Option<String>,
    #[serde(default)]
    pub fields: Vec<String>,
    #[serde(default, rename = "join")]
    pub joins: Vec<Join>,
    #[serde(default, rename = "where")]
    pub filter: Option<Condition>,
    #[serde(default)]
    pub order_by: Vec<OrderBy>,
    #[serde(default)]
    pub group_by: Vec<String>,
    #[serde(default)]
    pub limit: Option<u64>,
    #[serde(default)]
    pub skip: Option<u64>,
}

impl QuerySpec {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    #[must_use]
    pub fn fields<S: Into<String>>(mut self, fields: impl IntoIterator<Item = S>) -> Self {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn join(mut self, join: Join) -> Self {
        self.joins.push(join);
        self
    }

    #[must_use]
    pub fn filter(mut self, condition: Condition) -> Self {
        self.filter = Some(condition);
        self
    }

    #[must_use]
    pub fn order_by(mut self, column: impl Into<String>, direction: SortDirection) -> Self {
        self.order_by.push(OrderBy::new(column, direction));
        self
    }

    #[must_use]
    pub fn group_by<S: Into<String>>(mut self, columns: impl IntoIterator<Item = S>) -> Self {
        self.group_by = columns.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub const fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub const fn skip(mut self, skip: u64) -> Self {
        self.skip = Some(skip);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InsertType {
    /// `INSERT ... ON DUPLICATE KEY UPDATE` every column
    #[default]
    InsertOrUpdate,
    /// Plain `INSERT`
    InsertNew,
    /// `REPLACE INTO`
    Replace,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertQuery {
    pub table: String,
    pub rows: Vec<Row>,
    #[serde(default)]
    pub insert_type: InsertType,
}

/// Legacy UPDATE shape: `set` in key order, `where` as a flat AND list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UpdateQuery {
    pub table: String,
    pub set: Row,
    #[serde(default, rename = "where")]
    pub filter: Vec<Comparison>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DeleteQuery {
    pub table: String,
    #[serde(default, rename = "where")]
    pub filter: Option<Condition>,
}

/// SQL text plus the values bound to its `?` markers, left to right.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompiledQuery {
    pub sql: String,
    pub placed_values: Vec<Scalar>,
}
