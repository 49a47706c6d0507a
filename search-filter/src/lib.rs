//! Builds search-engine filter strings from typed conditions.
//!
//! Equality on text and booleans renders as `attribute:value`, numeric
//! conditions as `attribute OP number`, conditions are joined with `AND`, and
//! membership tests become parenthesized `OR` (or `AND NOT`) groups.

pub mod builder;
pub mod document;
pub mod errors;
pub mod operator;
pub mod statement;
pub mod value;

pub use builder::QueryBuilder;
pub use document::{Clause, FilterDocument};
pub use errors::FilterError;
pub use operator::Operator;
pub use value::{Number, Term, Value, ValueKind};
