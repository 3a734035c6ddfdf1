/// Condition evaluation against in-memory rows
///
/// Mirrors the SQL builder: the same condition tree, evaluated against row
/// cells instead of rendered to text. Comparisons follow SQL null logic,
/// only `IS` / `IS NOT` can match a null cell.

use std::cmp::Ordering;

use regex::Regex;

use crate::types::{cell, Comparison, Condition, Conjunction, Operator, QueryError, Row, Scalar, MAX_CONDITION_DEPTH};

pub struct ConditionEvaluator;

impl ConditionEvaluator {
    /// Evaluate a condition against a row. A vacuous condition (a group with
    /// no effective children) matches every row.
    pub fn matches_condition(row: &Row, condition: &Condition) -> Result<bool, QueryError> {
        Ok(Self::evaluate(row, condition, 0)?.unwrap_or(true))
    }

    /// `None` marks a vacuous group, which the SQL builder drops entirely.
    fn evaluate(row: &Row, condition: &Condition, depth: usize) -> Result<Option<bool>, QueryError> {
        if depth > MAX_CONDITION_DEPTH {
            return Err(QueryError::ConditionTooDeep(MAX_CONDITION_DEPTH));
        }

        match condition {
            Condition::Raw { .. } => Err(QueryError::RawSqlNotEvaluable),
            Condition::Compare(comparison) => Self::evaluate_comparison(row, comparison).map(Some),
            Condition::Group {
                conjunction,
                children,
            } => {
                // Every child is evaluated so a missing field fails regardless of siblings.
                let mut results = Vec::with_capacity(children.len());
                for child in children {
                    if let Some(result) = Self::evaluate(row, child, depth + 1)? {
                        results.push(result);
                    }
                }
                if results.is_empty() {
                    return Ok(None);
                }
                Ok(Some(match conjunction {
                    Conjunction::And => results.iter().all(|r| *r),
                    Conjunction::Or => results.iter().any(|r| *r),
                }))
            }
        }
    }

    fn evaluate_comparison(row: &Row, comparison: &Comparison) -> Result<bool, QueryError> {
        let value = cell(row, &comparison.column)?;

        match comparison.operator {
            Operator::In => {
                let list = comparison.list_operand()?;
                Ok(list.iter().any(|item| value.loose_eq(item)))
            }
            Operator::NotIn => {
                let list = comparison.list_operand()?;
                Ok(!value.is_null()
                    && !list.iter().any(Scalar::is_null)
                    && !list.iter().any(|item| value.loose_eq(item)))
            }
            operator => {
                let operand = comparison.scalar_operand()?;
                Self::compare(operator, &value, operand)
            }
        }
    }

    fn compare(operator: Operator, value: &Scalar, operand: &Scalar) -> Result<bool, QueryError> {
        let ordering = value.loose_cmp(operand);
        let result = match operator {
            Operator::Eq => ordering == Some(Ordering::Equal),
            Operator::NotEq => !value.is_null() && !operand.is_null() && ordering != Some(Ordering::Equal),
            Operator::Gt => ordering == Some(Ordering::Greater),
            Operator::Gte => matches!(ordering, Some(Ordering::Greater | Ordering::Equal)),
            Operator::Lt => ordering == Some(Ordering::Less),
            Operator::Lte => matches!(ordering, Some(Ordering::Less | Ordering::Equal)),
            Operator::Is if operand.is_null() => value.is_null(),
            Operator::Is => value.loose_eq(operand),
            Operator::IsNot if operand.is_null() => !value.is_null(),
            Operator::IsNot => !value.loose_eq(operand),
            Operator::Like | Operator::NotLike => {
                if value.is_null() || operand.is_null() {
                    return Ok(false);
                }
                let matched = Self::like_regex(&Self::like_text(operand))?.is_match(&Self::like_text(value));
                if operator == Operator::Like { matched } else { !matched }
            }
            Operator::In | Operator::NotIn => {
                return Err(QueryError::InvalidOperand {
                    operator: operator.as_str(),
                    reason: "expected a list of values",
                });
            }
        };
        Ok(result)
    }

    /// Text form used by LIKE, booleans read as 1/0.
    fn like_text(value: &Scalar) -> String {
        match value {
            Scalar::Bool(b) => u8::from(*b).to_string(),
            other => other.to_string(),
        }
    }

    /// Translate a LIKE pattern into an anchored regex: `%` matches any
    /// sequence, everything else is literal. `_` is not a wildcard.
    /// Matching ignores case, like SQLite and the MySQL `_ci` collations.
    fn like_regex(pattern: &str) -> Result<Regex, QueryError> {
        let body = pattern
            .split('%')
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join(".*");
        Regex::new(&format!("(?si)^{body}$")).map_err(|_| QueryError::InvalidOperand {
            operator: "LIKE",
            reason: "pattern is too large",
        })
    }
}
