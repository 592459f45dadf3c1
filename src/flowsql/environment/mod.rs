//! Execution-environment configuration resolution
//!
//! Turns the property bag submitted with a stream-SQL job into a single
//! validated [`ResolvedEnvironmentSettings`] value. Resolution is fail-fast
//! and all-or-nothing: the caller receives either a fully resolved settings
//! object or the first field-localized error, never a partially applied
//! environment.
//!
//! ## Usage
//!
//! ```rust
//! use flowsql::flowsql::environment::{keys, resolve_environment};
//! use std::collections::HashMap;
//!
//! let mut props = HashMap::new();
//! props.insert(keys::SQL_ENV_PARALLELISM.to_string(), "4".to_string());
//! props.insert(keys::SQL_CHECKPOINT_INTERVAL.to_string(), "60000".to_string());
//!
//! let settings = resolve_environment(&props).unwrap();
//! assert_eq!(settings.parallelism, Some(4));
//! assert_eq!(settings.checkpoint.as_ref().unwrap().interval_ms, 60000);
//! ```

pub mod duration;
pub mod error;
pub mod resolver;
pub mod state_backend;
pub mod ttl;

pub use duration::parse_duration_ms;
pub use error::{EnvironmentError, EnvironmentResult};
pub use resolver::{
    keys, resolve_environment, trim_properties, CheckpointCleanup, CheckpointMode,
    CheckpointPolicy, ResolvedEnvironmentSettings, RestartPolicy, TimeCharacteristic,
};
pub use state_backend::{create_state_backend, StateBackendSpec, StateBackendType};
pub use ttl::{resolve_ttl, TtlRange};
