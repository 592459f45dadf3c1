//! # flowsql
//!
//! Configuration core and JDBC sink dialect layer for distributed stream-SQL
//! jobs. The crate computes settings and statement text; it never runs jobs,
//! opens connections or performs checkpoint I/O — those belong to the host
//! runtime and the JDBC execution layer.
//!
//! ## What it does
//!
//! - **Environment resolution**: a flat, string-keyed property bag is
//!   validated into [`ResolvedEnvironmentSettings`] — parallelism, time
//!   semantics, checkpoint cadence and mode, state backend choice,
//!   idle-state TTL and restart policy — with fail-fast, field-localized
//!   errors and no partial application.
//! - **Statement synthesis**: per-store [`JdbcDialect`] implementations turn
//!   table metadata into INSERT/UPDATE text, including Impala's Kudu
//!   columnar variant and partitioned-table handling.
//!
//! ## Quick start
//!
//! ```rust
//! use flowsql::{keys, resolve_environment};
//! use flowsql::{ColumnType, ImpalaDialect, JdbcDialect, StoreType};
//! use std::collections::HashMap;
//!
//! // Resolve job settings from the submission bag.
//! let mut props = HashMap::new();
//! props.insert(keys::SQL_CHECKPOINT_INTERVAL.to_string(), "60000".to_string());
//! props.insert(keys::STATE_BACKEND.to_string(), "rocksdb".to_string());
//! props.insert(keys::CHECKPOINTS_DIRECTORY.to_string(), "hdfs:///ckpt".to_string());
//! let settings = resolve_environment(&props).unwrap();
//! assert!(settings.checkpoint.is_some());
//!
//! // Synthesize sink SQL for a partitioned Impala table.
//! let dialect = ImpalaDialect::new(
//!     vec![ColumnType::Int, ColumnType::String],
//!     vec![],
//!     StoreType::Generic,
//! );
//! let insert = dialect.insert_statement(
//!     None,
//!     "events",
//!     &["id".to_string(), "day".to_string()],
//!     &["day".to_string()],
//! );
//! assert_eq!(insert, "INSERT INTO \"events\"(id) partition(day) VALUES (?, cast( ? as string))");
//! ```

pub mod flowsql;

pub use crate::flowsql::environment::{
    keys, parse_duration_ms, resolve_environment, trim_properties, CheckpointCleanup,
    CheckpointMode, CheckpointPolicy, EnvironmentError, EnvironmentResult,
    ResolvedEnvironmentSettings, RestartPolicy, StateBackendSpec, StateBackendType,
    TimeCharacteristic, TtlRange,
};
pub use crate::flowsql::sink::{
    ColumnType, DialectRegistry, ImpalaDialect, JdbcDialect, StoreType, TableTarget,
};
