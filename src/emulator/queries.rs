/// Query (SELECT) emulation over in-memory rows
///
/// Execution order:
/// 1. WHERE filter
/// 2. GROUP BY (first row per distinct key wins, no aggregates)
/// 3. ORDER BY (stable, multi-key)
/// 4. OFFSET
/// 5. LIMIT
/// 6. field projection

use std::collections::HashSet;

use log::debug;

use crate::types::{cell, OrderBy, QueryError, QuerySpec, Row, Scalar, SortDirection};
use super::conditions::ConditionEvaluator;

pub struct QueryEmulator;

impl QueryEmulator {
    /// Answer a SELECT against plain rows the way the database would.
    /// Only single-table queries are supported.
    pub fn select_from_rows(spec: &QuerySpec, rows: &[Row]) -> Result<Vec<Row>, QueryError> {
        if !spec.joins.is_empty() {
            return Err(QueryError::JoinsNotSupported);
        }

        let mut matched = Vec::new();
        for row in rows {
            let keep = match &spec.filter {
                Some(condition) => ConditionEvaluator::matches_condition(row, condition)?,
                None => true,
            };
            if keep {
                matched.push(row);
            }
        }

        if !spec.group_by.is_empty() {
            matched = Self::first_per_group(matched, &spec.group_by)?;
        }

        if !spec.order_by.is_empty() {
            matched = Self::sort_rows(matched, &spec.order_by)?;
        }

        let skip = usize::try_from(spec.skip.unwrap_or(0)).unwrap_or(usize::MAX);
        let limit = spec
            .limit
            .map_or(usize::MAX, |limit| usize::try_from(limit).unwrap_or(usize::MAX));

        let result = matched
            .into_iter()
            .skip(skip)
            .take(limit)
            .map(|row| Self::project(row, &spec.fields))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            "emulated SELECT on {}: {} row(s) in, {} row(s) out",
            spec.table,
            rows.len(),
            result.len()
        );
        Ok(result)
    }

    /// Keep the first row seen for every distinct tuple of group-by values.
    fn first_per_group<'a>(rows: Vec<&'a Row>, columns: &[String]) -> Result<Vec<&'a Row>, QueryError> {
        let mut seen: HashSet<Vec<String>> = HashSet::new();
        let mut kept = Vec::new();
        for row in rows {
            let key = columns
                .iter()
                .map(|column| {
                    row.get(column)
                        .map(ToString::to_string)
                        .ok_or_else(|| QueryError::MissingField(column.clone()))
                })
                .collect::<Result<Vec<_>, _>>()?;
            if seen.insert(key) {
                kept.push(row);
            }
        }
        Ok(kept)
    }

    /// Stable sort by the ORDER BY keys. Keys are extracted up front so a
    /// missing column fails the whole query instead of the comparator.
    fn sort_rows<'a>(rows: Vec<&'a Row>, order_by: &[OrderBy]) -> Result<Vec<&'a Row>, QueryError> {
        let mut keyed = rows
            .into_iter()
            .map(|row| -> Result<(Vec<Scalar>, &'a Row), QueryError> {
                let keys = order_by
                    .iter()
                    .map(|key| cell(row, &key.column))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok((keys, row))
            })
            .collect::<Result<Vec<_>, _>>()?;

        keyed.sort_by(|(a, _), (b, _)| {
            order_by
                .iter()
                .zip(a.iter().zip(b.iter()))
                .map(|(key, (left, right))| {
                    let ordering = left.sort_cmp(right);
                    match key.direction {
                        SortDirection::Asc => ordering,
                        SortDirection::Desc => ordering.reverse(),
                    }
                })
                .find(|ordering| ordering.is_ne())
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        Ok(keyed.into_iter().map(|(_, row)| row).collect())
    }

    fn project(row: &Row, fields: &[String]) -> Result<Row, QueryError> {
        if fields.is_empty() {
            return Ok(row.clone());
        }
        fields
            .iter()
            .map(|field| {
                row.get(field)
                    .map(|value| (field.clone(), value.clone()))
                    .ok_or_else(|| QueryError::MissingField(field.clone()))
            })
            .collect()
    }
}
