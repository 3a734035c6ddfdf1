/// DML (Data Manipulation Language) compilation
///
/// INSERT (with batch row validation), UPDATE and DELETE.

use log::debug;

use crate::types::{
    CompiledQuery, DeleteQuery, InsertQuery, InsertType, QueryError, Row, Scalar, UpdateQuery,
};
use super::conditions::ConditionCompiler;
use super::identifiers::quote_identifier;

/// Checks a batch of rows for INSERT.
///
/// The column list is taken from the first row. Every row must carry all of
/// those columns and every cell must be a scalar or null. Extra keys on later
/// rows are ignored. Returns the columns and the cells in row-major order.
pub fn validate_rows(rows: &[Row]) -> Result<(Vec<String>, Vec<Scalar>), QueryError> {
    let first = rows.first().ok_or(QueryError::EmptyRows)?;
    let columns: Vec<String> = first.keys().cloned().collect();

    let mut cells = Vec::with_capacity(rows.len() * columns.len());
    for (index, row) in rows.iter().enumerate() {
        for column in &columns {
            let value = row.get(column).ok_or_else(|| QueryError::MissingInsertColumn {
                row: index,
                column: column.clone(),
            })?;
            let scalar = Scalar::from_json(value).map_err(|kind| QueryError::NonPrimitiveValue {
                row: index,
                column: column.clone(),
                kind,
            })?;
            cells.push(scalar);
        }
    }

    Ok((columns, cells))
}

pub struct DmlBuilder;

impl DmlBuilder {
    pub fn make_insert_query(query: &InsertQuery) -> Result<CompiledQuery, QueryError> {
        let (columns, placed_values) = validate_rows(&query.rows)?;

        let row_places = format!("({})", vec!["?"; columns.len()].join(", "));
        let all_places = vec![row_places.as_str(); query.rows.len()].join(", ");

        let keyword = match query.insert_type {
            InsertType::Replace => "REPLACE",
            InsertType::InsertOrUpdate | InsertType::InsertNew => "INSERT",
        };
        let on_duplicate = match query.insert_type {
            InsertType::InsertOrUpdate => format!(
                "ON DUPLICATE KEY UPDATE {}",
                columns
                    .iter()
                    .map(|column| format!("{column} = VALUES({column})"))
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            InsertType::InsertNew | InsertType::Replace => String::new(),
        };

        let sql = [
            keyword.to_string(),
            format!("INTO {} ({})", query.table, columns.join(", ")),
            format!("VALUES {all_places}"),
            on_duplicate,
        ]
        .join("\n");

        debug!(
            "compiled {keyword} into {} with {} row(s)",
            query.table,
            query.rows.len()
        );
        Ok(CompiledQuery { sql, placed_values })
    }

    pub fn make_update_query(query: &UpdateQuery) -> Result<CompiledQuery, QueryError> {
        if query.set.is_empty() {
            return Err(QueryError::EmptyAssignments);
        }

        let mut assignments = Vec::with_capacity(query.set.len());
        let mut placed_values = Vec::with_capacity(query.set.len() + query.filter.len());
        for (column, value) in &query.set {
            assignments.push(format!("{} = ?", quote_identifier(column)?));
            placed_values.push(Scalar::from_cell(column, value)?);
        }

        let where_line = if query.filter.is_empty() {
            "WHERE TRUE".to_string()
        } else {
            let mut conditions = Vec::with_capacity(query.filter.len());
            for comparison in &query.filter {
                let compiled = ConditionCompiler::make_comparison(comparison)?;
                conditions.push(compiled.sql);
                placed_values.extend(compiled.values);
            }
            format!("WHERE {}", conditions.join(" AND "))
        };

        let sql = [
            format!("UPDATE {}", query.table),
            format!("SET {}", assignments.join(", ")),
            where_line,
        ]
        .join("\n");

        debug!(
            "compiled UPDATE on {} with {} placeholder(s)",
            query.table,
            placed_values.len()
        );
        Ok(CompiledQuery { sql, placed_values })
    }

    pub fn make_delete_query(query: &DeleteQuery) -> Result<CompiledQuery, QueryError> {
        let mut lines = vec![format!("DELETE FROM {}", query.table)];
        let mut placed_values = Vec::new();

        if let Some(condition) = &query.filter {
            let compiled = ConditionCompiler::make_cond(condition, 0)?;
            if !compiled.is_empty() {
                lines.push(format!("WHERE {}", compiled.wrapped()));
                placed_values = compiled.values;
            }
        }

        debug!(
            "compiled DELETE on {} with {} placeholder(s)",
            query.table,
            placed_values.len()
        );
        Ok(CompiledQuery {
            sql: lines.join("\n"),
            placed_values,
        })
    }
}
