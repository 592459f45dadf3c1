//! Error types for environment configuration resolution
//!
//! Every failure here is a deterministic, synchronous validation error raised
//! while resolving the submitted property bag. None of them are retryable:
//! re-resolving unchanged input reproduces the same failure, so the job
//! submission is aborted with a message naming the offending key or value.

use thiserror::Error;

/// Validation errors raised while resolving environment configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvironmentError {
    /// A duration string did not match `<positive integer><d|h|m|s>`.
    #[error("invalid duration '{value}': expected <number><d|h|m|s>, e.g. 1h or 30m")]
    InvalidDuration { value: String },

    /// The idle-state TTL bounds were not supplied as a valid pair.
    #[error("invalid TTL configuration: {message}")]
    InvalidTtlConfiguration { message: String },

    /// A numeric property failed to parse.
    #[error("invalid numeric value '{value}' for property '{key}'")]
    InvalidNumericValue { key: String, value: String },

    /// The time-characteristic property named no known characteristic.
    #[error("invalid time characteristic '{value}': expected one of ProcessingTime, IngestionTime, EventTime")]
    InvalidTimeCharacteristic { value: String },

    /// The checkpoint-mode property named no known mode.
    #[error("invalid checkpoint mode '{value}': expected EXACTLY_ONCE or AT_LEAST_ONCE")]
    InvalidCheckpointMode { value: String },

    /// The state-backend type property named no known backend.
    #[error("unsupported state backend type '{value}': expected one of MEMORY, FILESYSTEM, ROCKSDB")]
    UnsupportedBackendType { value: String },

    /// A filesystem or RocksDB backend was requested without a checkpoint URI.
    #[error("{backend_type} state backend requires a non-empty checkpoint directory URI")]
    MissingCheckpointUri { backend_type: String },
}

/// Result alias for environment resolution operations.
pub type EnvironmentResult<T> = Result<T, EnvironmentError>;
