/// Emulator module - answers query descriptions against in-memory rows
///
/// Structure:
/// - conditions: condition tree evaluation against a single row
/// - queries: filter, group, sort, paginate and project a row set

pub mod conditions;
pub mod queries;

pub use conditions::ConditionEvaluator;
pub use queries::QueryEmulator;

use crate::types::{Condition, QueryError, QuerySpec, Row};

pub fn matches_condition(row: &Row, condition: &Condition) -> Result<bool, QueryError> {
    ConditionEvaluator::matches_condition(row, condition)
}

pub fn select_from_rows(spec: &QuerySpec, rows: &[Row]) -> Result<Vec<Row>, QueryError> {
    QueryEmulator::select_from_rows(spec, rows)
}
