/// Query (SELECT) compilation
///
/// Output layout is fixed, one line per clause, empty clauses included:
/// SELECT/FROM, joins, WHERE, GROUP BY, ORDER BY, LIMIT.

use log::debug;

use crate::types::{CompiledQuery, Join, QueryError, QuerySpec};
use super::conditions::ConditionCompiler;
use super::identifiers::{quote_identifier, quote_list};

/// Row count used when only an offset is given; the largest value both
/// MySQL and SQLite accept in LIMIT
const UNBOUNDED_LIMIT: i64 = i64::MAX;

pub struct SelectBuilder;

impl SelectBuilder {
    pub fn make_select_query(spec: &QuerySpec) -> Result<CompiledQuery, QueryError> {
        let fields = if spec.fields.is_empty() {
            "*".to_string()
        } else {
            quote_list(&spec.fields)?
        };
        let from = Self::table_ref(&spec.table, spec.alias.as_deref());

        let joins = spec
            .joins
            .iter()
            .map(Self::join_line)
            .collect::<Vec<_>>()
            .join("\n");

        let (where_line, placed_values) = match &spec.filter {
            Some(condition) => {
                let compiled = ConditionCompiler::make_cond(condition, 0)?;
                if compiled.is_empty() {
                    (String::new(), Vec::new())
                } else {
                    (format!("WHERE {}", compiled.wrapped()), compiled.values)
                }
            }
            None => (String::new(), Vec::new()),
        };

        let group_by = if spec.group_by.is_empty() {
            String::new()
        } else {
            format!("GROUP BY {}", quote_list(&spec.group_by)?)
        };

        let order_by = if spec.order_by.is_empty() {
            String::new()
        } else {
            let keys = spec
                .order_by
                .iter()
                .map(|key| -> Result<String, QueryError> {
                    Ok(format!("{} {}", quote_identifier(&key.column)?, key.direction.as_str()))
                })
                .collect::<Result<Vec<_>, _>>()?;
            format!("ORDER BY {}", keys.join(", "))
        };

        let sql = [
            format!("SELECT {fields} FROM {from}"),
            joins,
            where_line,
            group_by,
            order_by,
            Self::limit_line(spec.limit, spec.skip),
        ]
        .join("\n");

        debug!(
            "compiled SELECT on {} with {} placeholder(s)",
            spec.table,
            placed_values.len()
        );
        Ok(CompiledQuery { sql, placed_values })
    }

    fn table_ref(table: &str, alias: Option<&str>) -> String {
        match alias {
            Some(alias) => format!("{table} AS {alias}"),
            None => table.to_string(),
        }
    }

    fn join_line(join: &Join) -> String {
        let on = join
            .on
            .iter()
            .map(|pair| format!("{} {} {}", pair.left, pair.operator, pair.right))
            .collect::<Vec<_>>()
            .join(" AND ");
        format!(
            "{} {} ON {on}",
            join.kind.keyword(),
            Self::table_ref(&join.table, join.alias.as_deref())
        )
    }

    fn limit_line(limit: Option<u64>, skip: Option<u64>) -> String {
        let skip = skip.unwrap_or(0);
        match limit {
            Some(limit) if skip > 0 => format!("LIMIT {skip}, {limit}"),
            Some(limit) => format!("LIMIT {limit}"),
            None if skip > 0 => format!("LIMIT {skip}, {UNBOUNDED_LIMIT}"),
            None => String::new(),
        }
    }
}
