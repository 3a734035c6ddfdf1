/// Condition compilation for WHERE clauses
///
/// Turns a condition tree into SQL text with `?` placeholders and the
/// values to bind, in the order their markers appear.

use log::trace;

use crate::types::{Comparison, Condition, QueryError, Scalar, MAX_CONDITION_DEPTH};
use super::identifiers::quote_identifier;

/// SQL fragment produced for one condition node
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompiledCondition {
    pub sql: String,
    pub values: Vec<Scalar>,
    /// Set when the fragment must be parenthesized next to a sibling
    pub needs_parens: bool,
}

impl CompiledCondition {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }

    /// Text to embed next to other clauses, parenthesized if required.
    #[must_use]
    pub fn wrapped(&self) -> String {
        if self.needs_parens {
            format!("({})", self.sql)
        } else {
            self.sql.clone()
        }
    }
}

pub struct ConditionCompiler;

impl ConditionCompiler {
    /// Compile a condition tree starting at the given nesting depth.
    pub fn make_cond(condition: &Condition, depth: usize) -> Result<CompiledCondition, QueryError> {
        if depth > MAX_CONDITION_DEPTH {
            return Err(QueryError::ConditionTooDeep(MAX_CONDITION_DEPTH));
        }

        match condition {
            Condition::Raw { sql, values } => Ok(CompiledCondition {
                sql: format!("({sql})"),
                values: values.clone(),
                needs_parens: false,
            }),
            Condition::Compare(comparison) => Self::make_comparison(comparison),
            Condition::Group {
                conjunction,
                children,
            } => {
                let mut compiled = Vec::with_capacity(children.len());
                for child in children {
                    let fragment = Self::make_cond(child, depth + 1)?;
                    if !fragment.is_empty() {
                        compiled.push(fragment);
                    }
                }

                if compiled.len() <= 1 {
                    return Ok(compiled.pop().unwrap_or_default());
                }

                let separator = format!(" {} ", conjunction.as_str());
                let sql = compiled
                    .iter()
                    .map(CompiledCondition::wrapped)
                    .collect::<Vec<_>>()
                    .join(&separator);
                let values = compiled.into_iter().flat_map(|c| c.values).collect();

                trace!("compiled {} group at depth {depth}: {sql}", conjunction.as_str());
                Ok(CompiledCondition {
                    sql,
                    values,
                    needs_parens: true,
                })
            }
        }
    }

    /// Compile a single `column <op> ?` comparison.
    pub fn make_comparison(comparison: &Comparison) -> Result<CompiledCondition, QueryError> {
        let column = quote_identifier(&comparison.column)?;
        let operator = comparison.operator.as_str();

        if comparison.operator.takes_list() {
            let values = comparison.list_operand()?.to_vec();
            let places = vec!["?"; values.len()].join(", ");
            Ok(CompiledCondition {
                sql: format!("{column} {operator} ({places})"),
                values,
                needs_parens: false,
            })
        } else {
            let value = comparison.scalar_operand()?.clone();
            Ok(CompiledCondition {
                sql: format!("{column} {operator} ?"),
                values: vec![value],
                needs_parens: false,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Operator;

    fn compile(condition: &Condition) -> CompiledCondition {
        ConditionCompiler::make_cond(condition, 0).unwrap()
    }

    #[test]
    fn test_simple_comparison() {
        let fragment = compile(&Condition::eq("area", "B"));
        assert_eq!(fragment.sql, "`area` = ?");
        assert_eq!(fragment.values, vec![Scalar::from("B")]);
        assert!(!fragment.needs_parens);
    }

    #[test]
    fn test_in_list_placeholders() {
        let fragment = compile(&Condition::not_in("t.type", ["a", "b", "c"]));
        assert_eq!(fragment.sql, "`t`.`type` NOT IN (?, ?, ?)");
        assert_eq!(
            fragment.values,
            vec![Scalar::from("a"), Scalar::from("b"), Scalar::from("c")]
        );
    }

    #[test]
    fn test_or_group() {
        let cond = Condition::or([Condition::is_in("type", ["a", "b"]), Condition::eq("flag", true)]);
        let fragment = compile(&cond);
        assert_eq!(fragment.sql, "`type` IN (?, ?) OR `flag` = ?");
        assert_eq!(
            fragment.values,
            vec![Scalar::from("a"), Scalar::from("b"), Scalar::Bool(true)]
        );
        assert!(fragment.needs_parens);
    }

    #[test]
    fn test_single_child_group_is_transparent() {
        let child = Condition::compare("amount", Operator::Gt, 10);
        assert_eq!(compile(&Condition::and([child.clone()])), compile(&child));
        assert_eq!(
            compile(&Condition::or([Condition::and([child.clone()])])),
            compile(&child)
        );
    }

    #[test]
    fn test_nested_groups_are_parenthesized() {
        let cond = Condition::and([
            Condition::eq("a", 1),
            Condition::or([Condition::eq("b", 2), Condition::eq("c", 3)]),
        ]);
        let fragment = compile(&cond);
        assert_eq!(fragment.sql, "`a` = ? AND (`b` = ? OR `c` = ?)");
        assert_eq!(fragment.values, vec![Scalar::Int(1), Scalar::Int(2), Scalar::Int(3)]);
    }

    #[test]
    fn test_raw_fragment_is_parenthesized_once() {
        let cond = Condition::and([
            Condition::raw("id IN (SELECT id FROM t WHERE x > ?)", vec![Scalar::Int(5)]),
            Condition::eq("a", 1),
        ]);
        let fragment = compile(&cond);
        assert_eq!(fragment.sql, "(id IN (SELECT id FROM t WHERE x > ?)) AND `a` = ?");
        assert_eq!(fragment.values, vec![Scalar::Int(5), Scalar::Int(1)]);
    }

    #[test]
    fn test_empty_groups_are_dropped() {
        assert!(compile(&Condition::and([])).is_empty());

        let cond = Condition::or([Condition::and([]), Condition::eq("a", 1)]);
        let fragment = compile(&cond);
        assert_eq!(fragment.sql, "`a` = ?");
        assert!(!fragment.needs_parens);
    }

    #[test]
    fn test_placeholder_count_matches_values() {
        let cond = Condition::or([
            Condition::and([Condition::is_in("a", [1, 2, 3]), Condition::is_null("b")]),
            Condition::raw("c = ? OR d = ?", vec![Scalar::Int(1), Scalar::Int(2)]),
            Condition::compare("e", Operator::Like, "x%"),
        ]);
        let fragment = compile(&cond);
        assert_eq!(fragment.sql.matches('?').count(), fragment.values.len());
        assert_eq!(fragment.values.len(), 7);
    }

    #[test]
    fn test_depth_limit() {
        let mut cond = Condition::eq("a", 1);
        for _ in 0..=MAX_CONDITION_DEPTH {
            cond = Condition::and([cond]);
        }
        assert!(matches!(
            ConditionCompiler::make_cond(&cond, 0),
            Err(QueryError::ConditionTooDeep(100))
        ));

        let mut shallow = Condition::eq("a", 1);
        for _ in 0..10 {
            shallow = Condition::and([shallow]);
        }
        assert_eq!(compile(&shallow).sql, "`a` = ?");
    }

    #[test]
    fn test_empty_in_list_rejected() {
        let cond = Condition::is_in("a", Vec::<i64>::new());
        assert!(matches!(
            ConditionCompiler::make_cond(&cond, 0),
            Err(QueryError::InvalidOperand { operator: "IN", .. })
        ));
    }
}
