/// SQL builder - compiles query descriptions into SQL text plus placeholder values
///
/// Structure:
/// - identifiers: per-segment backtick quoting
/// - conditions: condition tree -> WHERE fragment
/// - queries: SELECT
/// - dml: INSERT/UPDATE/DELETE and the INSERT row validator

pub mod identifiers;
pub mod conditions;
pub mod queries;
pub mod dml;

pub use conditions::{CompiledCondition, ConditionCompiler};
pub use queries::SelectBuilder;
pub use dml::{DmlBuilder, validate_rows};

use crate::types::{
    CompiledQuery, Condition, DeleteQuery, InsertQuery, QueryError, QuerySpec, UpdateQuery,
};

pub fn make_cond(condition: &Condition, depth: usize) -> Result<CompiledCondition, QueryError> {
    ConditionCompiler::make_cond(condition, depth)
}

pub fn make_select_query(spec: &QuerySpec) -> Result<CompiledQuery, QueryError> {
    SelectBuilder::make_select_query(spec)
}

pub fn make_insert_query(query: &InsertQuery) -> Result<CompiledQuery, QueryError> {
    DmlBuilder::make_insert_query(query)
}

pub fn make_update_query(query: &UpdateQuery) -> Result<CompiledQuery, QueryError> {
    DmlBuilder::make_update_query(query)
}

pub fn make_delete_query(query: &DeleteQuery) -> Result<CompiledQuery, QueryError> {
    DmlBuilder::make_delete_query(query)
}
