//! State backend selection
//!
//! The resolver hands the host runtime a [`StateBackendSpec`] describing
//! where checkpointed state should live; actually instantiating the backend
//! and performing checkpoint I/O is the host runtime's job.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::{EnvironmentError, EnvironmentResult};
use super::resolver::parse_bool;

/// Supported state backend families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StateBackendType {
    /// Checkpoints held on the JobManager heap. No durable storage.
    Memory,
    /// Checkpoints written to a filesystem URI (HDFS, S3, local).
    Filesystem,
    /// Embedded RocksDB with checkpoints on a filesystem URI; supports
    /// incremental snapshots.
    RocksDb,
}

impl fmt::Display for StateBackendType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateBackendType::Memory => write!(f, "MEMORY"),
            StateBackendType::Filesystem => write!(f, "FILESYSTEM"),
            StateBackendType::RocksDb => write!(f, "ROCKSDB"),
        }
    }
}

impl FromStr for StateBackendType {
    type Err = EnvironmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "memory" => Ok(StateBackendType::Memory),
            "filesystem" => Ok(StateBackendType::Filesystem),
            "rocksdb" => Ok(StateBackendType::RocksDb),
            _ => Err(EnvironmentError::UnsupportedBackendType {
                value: s.to_string(),
            }),
        }
    }
}

/// A fully validated backend choice, ready to hand to the host runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StateBackendSpec {
    Memory,
    Filesystem { uri: String },
    RocksDb { uri: String, incremental: bool },
}

/// Build a [`StateBackendSpec`] from raw property values.
///
/// `incremental` applies only to RocksDB and defaults to `true` when the
/// property is absent or does not parse as a boolean. Filesystem and RocksDB
/// backends require a non-empty checkpoint URI; a missing URI is a fatal
/// configuration error, never silently defaulted.
pub fn create_state_backend(
    backend_type: &str,
    checkpoint_uri: &str,
    incremental: Option<&str>,
) -> EnvironmentResult<StateBackendSpec> {
    let backend_type: StateBackendType = backend_type.parse()?;
    let incremental = incremental.and_then(parse_bool).unwrap_or(true);

    match backend_type {
        StateBackendType::Memory => Ok(StateBackendSpec::Memory),
        StateBackendType::Filesystem => {
            require_checkpoint_uri(checkpoint_uri, backend_type)?;
            Ok(StateBackendSpec::Filesystem {
                uri: checkpoint_uri.to_string(),
            })
        }
        StateBackendType::RocksDb => {
            require_checkpoint_uri(checkpoint_uri, backend_type)?;
            Ok(StateBackendSpec::RocksDb {
                uri: checkpoint_uri.to_string(),
                incremental,
            })
        }
    }
}

fn require_checkpoint_uri(uri: &str, backend_type: StateBackendType) -> EnvironmentResult<()> {
    if uri.trim().is_empty() {
        return Err(EnvironmentError::MissingCheckpointUri {
            backend_type: backend_type.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_ignores_uri() {
        assert_eq!(
            create_state_backend("MEMORY", "", None).unwrap(),
            StateBackendSpec::Memory
        );
        assert_eq!(
            create_state_backend("memory", "hdfs:///ignored", Some("false")).unwrap(),
            StateBackendSpec::Memory
        );
    }

    #[test]
    fn test_filesystem_requires_uri() {
        assert_eq!(
            create_state_backend("FILESYSTEM", "", Some("true")).unwrap_err(),
            EnvironmentError::MissingCheckpointUri {
                backend_type: "FILESYSTEM".to_string()
            }
        );
        assert_eq!(
            create_state_backend("FileSystem", "hdfs:///ckpt", None).unwrap(),
            StateBackendSpec::Filesystem {
                uri: "hdfs:///ckpt".to_string()
            }
        );
    }

    #[test]
    fn test_rocksdb_uri_and_incremental() {
        assert_eq!(
            create_state_backend("ROCKSDB", "/tmp/ckpt", Some("false")).unwrap(),
            StateBackendSpec::RocksDb {
                uri: "/tmp/ckpt".to_string(),
                incremental: false,
            }
        );
        assert!(matches!(
            create_state_backend("rocksdb", "", None),
            Err(EnvironmentError::MissingCheckpointUri { .. })
        ));
    }

    #[test]
    fn test_incremental_defaults_true_when_unparseable() {
        assert_eq!(
            create_state_backend("rocksdb", "/tmp/ckpt", Some("maybe")).unwrap(),
            StateBackendSpec::RocksDb {
                uri: "/tmp/ckpt".to_string(),
                incremental: true,
            }
        );
    }

    #[test]
    fn test_unknown_backend_type() {
        assert_eq!(
            create_state_backend("cassandra", "/tmp/ckpt", None).unwrap_err(),
            EnvironmentError::UnsupportedBackendType {
                value: "cassandra".to_string()
            }
        );
    }
}
