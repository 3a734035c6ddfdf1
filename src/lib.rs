// QueryKit - parameterized SQL query builder with an in-memory twin
// The same query description compiles to SQL or runs against plain rows

#![allow(clippy::missing_errors_doc)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::multiple_crate_versions)]

// Data model: values, rows, condition tree, query descriptions, errors
pub mod core;

// Short path to the data model, used throughout the crate
pub mod types {
    pub use crate::core::*;
}

// SQL compilation (SELECT, INSERT, UPDATE, DELETE)
pub mod builder;

// In-memory evaluation of the same query descriptions
pub mod emulator;

// CLI: configuration, output rendering, subcommands
pub mod cli;
pub mod config;
pub mod output;

// Re-export commonly used types for convenience
pub use crate::core::{
    CompiledQuery, Condition, DeleteQuery, InsertQuery, InsertType, QueryError, QuerySpec, Row, Scalar,
    UpdateQuery,
};
pub use builder::{make_cond, make_delete_query, make_insert_query, make_select_query, make_update_query};
pub use emulator::{matches_condition, select_from_rows};
