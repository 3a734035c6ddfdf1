// Module declarations
pub mod error;
pub mod value;
pub mod row;
pub mod condition;
pub mod query;

// Re-exports for convenience
pub use error::QueryError;
pub use value::Scalar;
pub use row::{Row, cell, row_from};
pub use condition::{Comparison, Condition, Conjunction, Operand, Operator};
pub use query::{
    CompiledQuery, DeleteQuery, InsertQuery, InsertType, Join, JoinKind, JoinOn, OrderBy, QuerySpec,
    SortDirection, UpdateQuery,
};

/// Maximum nesting of a condition tree before it is treated as circular.
pub const MAX_CONDITION_DEPTH: usize = 100;
