//! JDBC sink dialect layer
//!
//! A [`JdbcDialect`] owns everything store-specific about writing rows over a
//! JDBC-style connection: which URLs it handles, the fallback driver class,
//! identifier quoting and the text of INSERT/UPDATE statements. Dialects are
//! pure string builders; executing the statements belongs to the JDBC
//! execution layer.
//!
//! ## Usage
//!
//! ```rust
//! use flowsql::flowsql::sink::{ColumnType, DialectRegistry, ImpalaDialect, StoreType};
//!
//! let dialect = ImpalaDialect::new(
//!     vec![ColumnType::Int, ColumnType::String],
//!     vec!["id".to_string()],
//!     StoreType::Generic,
//! );
//!
//! let mut registry = DialectRegistry::new();
//! registry.register(Box::new(dialect));
//! assert!(registry.dialect_for_url("jdbc:impala://host:21050/db").is_some());
//! ```

pub mod dialect;
pub mod impala;
pub mod table;

pub use dialect::{DialectRegistry, JdbcDialect};
pub use impala::ImpalaDialect;
pub use table::{ColumnType, StoreType, TableTarget};
