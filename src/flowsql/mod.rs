//! # FlowSQL core modules
//!
//! Two cooperating subsystems:
//!
//! - [`environment`] — resolves a flat, string-keyed property bag into the
//!   validated execution and fault-tolerance settings of a stream-SQL job
//!   (parallelism, time semantics, checkpointing, state backend, idle-state
//!   TTL).
//! - [`sink`] — dialect layer for JDBC-style analytic stores: URL ownership,
//!   driver selection, identifier quoting and INSERT/UPDATE statement
//!   synthesis, including the Kudu columnar-engine variant.
//!
//! Both subsystems are pure: they compute settings objects and SQL text and
//! never touch the network, the filesystem or the host runtime themselves.

pub mod environment;
pub mod sink;
