//! Property-bag resolution into execution-environment settings
//!
//! The host runtime submits a flat `HashMap<String, String>` with the job;
//! this module trims it, applies per-field precedence and validation, and
//! produces one [`ResolvedEnvironmentSettings`] value. Two generations of
//! keys exist for the checkpoint interval and the cleanup flag; duplicate
//! interval keys merge by maximum, duplicate cleanup flags by logical OR.
//!
//! Resolution is all-or-nothing: the first invalid field aborts with an
//! [`EnvironmentError`] and nothing is applied to the host environment.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use super::error::{EnvironmentError, EnvironmentResult};
use super::state_backend::{create_state_backend, StateBackendSpec};
use super::ttl::{resolve_ttl, TtlRange};

/// Recognized property keys.
///
/// The `sql.*` checkpoint keys are the current generation; the `flink.*`
/// counterparts are kept for jobs submitted with the older naming.
pub mod keys {
    pub const SQL_ENV_PARALLELISM: &str = "sql.env.parallelism";
    pub const SQL_MAX_ENV_PARALLELISM: &str = "sql.max.env.parallelism";
    pub const SQL_BUFFER_TIMEOUT_MILLIS: &str = "sql.buffer.timeout.millis";
    pub const TIME_CHARACTERISTIC: &str = "time.characteristic";

    pub const SQL_CHECKPOINT_INTERVAL: &str = "sql.checkpoint.interval";
    pub const FLINK_CHECKPOINT_INTERVAL: &str = "flink.checkpoint.interval";
    pub const FLINK_CHECKPOINT_MODE: &str = "flink.checkpoint.mode";
    pub const FLINK_CHECKPOINT_TIMEOUT: &str = "flink.checkpoint.timeout";
    pub const FLINK_MAX_CONCURRENT_CHECKPOINTS: &str = "flink.maxConcurrentCheckpoints";
    pub const SQL_CHECKPOINT_CLEANUP_MODE: &str = "sql.checkpoint.cleanup.mode";
    pub const FLINK_CHECKPOINT_CLEANUP_MODE: &str = "flink.checkpoint.cleanup.mode";

    pub const STATE_BACKEND: &str = "state.backend";
    pub const CHECKPOINTS_DIRECTORY: &str = "state.checkpoints.dir";
    pub const STATE_BACKEND_INCREMENTAL: &str = "state.backend.incremental";

    pub const SQL_TTL_MIN: &str = "sql.ttl.min";
    pub const SQL_TTL_MAX: &str = "sql.ttl.max";
}

/// Notion of time driving windows and timers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeCharacteristic {
    ProcessingTime,
    IngestionTime,
    EventTime,
}

impl FromStr for TimeCharacteristic {
    type Err = EnvironmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "processingtime" => Ok(TimeCharacteristic::ProcessingTime),
            "ingestiontime" => Ok(TimeCharacteristic::IngestionTime),
            "eventtime" => Ok(TimeCharacteristic::EventTime),
            _ => Err(EnvironmentError::InvalidTimeCharacteristic {
                value: s.to_string(),
            }),
        }
    }
}

/// Delivery guarantee of the checkpoint barrier alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckpointMode {
    ExactlyOnce,
    AtLeastOnce,
}

impl FromStr for CheckpointMode {
    type Err = EnvironmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "exactly_once" => Ok(CheckpointMode::ExactlyOnce),
            "at_least_once" => Ok(CheckpointMode::AtLeastOnce),
            _ => Err(EnvironmentError::InvalidCheckpointMode {
                value: s.to_string(),
            }),
        }
    }
}

/// What happens to externalized checkpoints when the job is cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckpointCleanup {
    DeleteOnCancel,
    RetainOnCancel,
}

impl fmt::Display for CheckpointCleanup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckpointCleanup::DeleteOnCancel => write!(f, "DELETE_ON_CANCELLATION"),
            CheckpointCleanup::RetainOnCancel => write!(f, "RETAIN_ON_CANCELLATION"),
        }
    }
}

/// Checkpointing cadence and behavior, present only when active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckpointPolicy {
    /// Milliseconds between checkpoint triggers.
    pub interval_ms: u64,
    /// Unset leaves the host runtime's default mode in place.
    pub mode: Option<CheckpointMode>,
    /// Unset leaves the host runtime's default timeout in place.
    pub timeout_ms: Option<u64>,
    /// Unset leaves the host runtime's default concurrency in place.
    pub max_concurrent: Option<i32>,
    /// Always resolved; defaults to retaining checkpoints on cancel.
    pub cleanup: CheckpointCleanup,
    /// Explicit backend override, or `None` for the host runtime's default.
    pub state_backend: Option<StateBackendSpec>,
}

/// Fixed failure-rate restart parameters handed to the host runtime.
///
/// These are deliberately not configurable through the property bag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestartPolicy {
    /// Maximum failures per measurement interval before the job gives up.
    pub failure_rate: i32,
    /// Measurement interval, minutes.
    pub failure_interval_min: u64,
    /// Delay between restart attempts, seconds.
    pub delay_interval_sec: u64,
}

impl Default for RestartPolicy {
    fn default() -> Self {
        RestartPolicy {
            failure_rate: 3,
            failure_interval_min: 6,
            delay_interval_sec: 10,
        }
    }
}

/// Everything the host runtime needs to configure the execution environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedEnvironmentSettings {
    pub parallelism: Option<i32>,
    pub max_parallelism: Option<i32>,
    pub buffer_timeout_ms: Option<i64>,
    pub time_characteristic: Option<TimeCharacteristic>,
    pub restart_policy: RestartPolicy,
    /// Present only when checkpointing is active.
    pub checkpoint: Option<CheckpointPolicy>,
    /// Idle-state retention, independent of checkpoint activation.
    pub ttl: Option<TtlRange>,
    /// The trimmed submission bag, passed through as global job parameters.
    pub global_job_parameters: HashMap<String, String>,
}

/// Whitespace-trim every key and value of the submitted bag.
pub fn trim_properties(props: &HashMap<String, String>) -> HashMap<String, String> {
    props
        .iter()
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .collect()
}

/// Resolve the full settings object from a raw property bag.
///
/// Fail-fast: the first invalid field aborts resolution, so the caller never
/// observes partially applied settings.
pub fn resolve_environment(
    props: &HashMap<String, String>,
) -> EnvironmentResult<ResolvedEnvironmentSettings> {
    let props = trim_properties(props);

    let parallelism = env_parallelism(&props)?;
    let max_parallelism = max_env_parallelism(&props)?;
    let buffer_timeout_ms = buffer_timeout_millis(&props)?;
    let time_characteristic = stream_time_characteristic(&props)?;

    let checkpoint = if is_checkpointing_configured(&props) {
        let interval_ms = checkpoint_interval(&props)?;
        let cleanup = checkpoint_cleanup(&props);
        log::debug!(
            "checkpointing active, interval {} ms, cleanup {}",
            interval_ms,
            cleanup
        );
        Some(CheckpointPolicy {
            interval_ms,
            mode: checkpointing_mode(&props)?,
            timeout_ms: checkpoint_timeout(&props)?,
            max_concurrent: max_concurrent_checkpoints(&props)?,
            cleanup,
            state_backend: state_backend(&props)?,
        })
    } else {
        None
    };

    let ttl = resolve_ttl(
        props.get(keys::SQL_TTL_MIN).map(String::as_str),
        props.get(keys::SQL_TTL_MAX).map(String::as_str),
    )?;

    Ok(ResolvedEnvironmentSettings {
        parallelism,
        max_parallelism,
        buffer_timeout_ms,
        time_characteristic,
        restart_policy: RestartPolicy::default(),
        checkpoint,
        ttl,
        global_job_parameters: props,
    })
}

/// Parallelism override, `None` when the key is absent or blank.
pub fn env_parallelism(props: &HashMap<String, String>) -> EnvironmentResult<Option<i32>> {
    positive_int(props, keys::SQL_ENV_PARALLELISM)
}

/// Max-parallelism (key-group ceiling) override.
pub fn max_env_parallelism(props: &HashMap<String, String>) -> EnvironmentResult<Option<i32>> {
    positive_int(props, keys::SQL_MAX_ENV_PARALLELISM)
}

/// Network buffer flush timeout override, milliseconds.
pub fn buffer_timeout_millis(props: &HashMap<String, String>) -> EnvironmentResult<Option<i64>> {
    let Some(raw) = non_blank(props, keys::SQL_BUFFER_TIMEOUT_MILLIS) else {
        return Ok(None);
    };
    let millis: i64 = raw
        .parse()
        .ok()
        .filter(|v| *v >= 0)
        .ok_or_else(|| invalid_numeric(keys::SQL_BUFFER_TIMEOUT_MILLIS, raw))?;
    Ok(Some(millis))
}

/// Time-characteristic override. The value must name one of
/// ProcessingTime, IngestionTime or EventTime, case-insensitively.
pub fn stream_time_characteristic(
    props: &HashMap<String, String>,
) -> EnvironmentResult<Option<TimeCharacteristic>> {
    match non_blank(props, keys::TIME_CHARACTERISTIC) {
        Some(raw) => raw.parse().map(Some),
        None => Ok(None),
    }
}

/// True when either generation of the interval key is present.
///
/// The predecessor of this resolver computed the enabled flag inverted
/// (active when neither interval key was set); here checkpointing activates
/// exactly when an interval is configured.
pub fn is_checkpointing_configured(props: &HashMap<String, String>) -> bool {
    non_blank(props, keys::SQL_CHECKPOINT_INTERVAL).is_some()
        || non_blank(props, keys::FLINK_CHECKPOINT_INTERVAL).is_some()
}

/// Checkpoint interval in milliseconds: both key generations are read,
/// absent ones default to 0, and the larger value wins.
pub fn checkpoint_interval(props: &HashMap<String, String>) -> EnvironmentResult<u64> {
    let sql_interval = millis_or_zero(props, keys::SQL_CHECKPOINT_INTERVAL)?;
    let flink_interval = millis_or_zero(props, keys::FLINK_CHECKPOINT_INTERVAL)?;
    Ok(sql_interval.max(flink_interval))
}

/// Checkpoint mode override.
pub fn checkpointing_mode(
    props: &HashMap<String, String>,
) -> EnvironmentResult<Option<CheckpointMode>> {
    match non_blank(props, keys::FLINK_CHECKPOINT_MODE) {
        Some(raw) => raw.parse().map(Some),
        None => Ok(None),
    }
}

/// Checkpoint timeout override, milliseconds.
pub fn checkpoint_timeout(props: &HashMap<String, String>) -> EnvironmentResult<Option<u64>> {
    let Some(raw) = non_blank(props, keys::FLINK_CHECKPOINT_TIMEOUT) else {
        return Ok(None);
    };
    let timeout: u64 = raw
        .parse()
        .map_err(|_| invalid_numeric(keys::FLINK_CHECKPOINT_TIMEOUT, raw))?;
    Ok(Some(timeout))
}

/// Max concurrent checkpoints override.
pub fn max_concurrent_checkpoints(
    props: &HashMap<String, String>,
) -> EnvironmentResult<Option<i32>> {
    positive_int(props, keys::FLINK_MAX_CONCURRENT_CHECKPOINTS)
}

/// Cleanup policy: either generation of the flag parsing true means
/// externalized checkpoints are deleted on cancellation. Logical OR, not a
/// precedence rule.
pub fn checkpoint_cleanup(props: &HashMap<String, String>) -> CheckpointCleanup {
    let sql_clean = non_blank(props, keys::SQL_CHECKPOINT_CLEANUP_MODE)
        .and_then(parse_bool)
        .unwrap_or(false);
    let flink_clean = non_blank(props, keys::FLINK_CHECKPOINT_CLEANUP_MODE)
        .and_then(parse_bool)
        .unwrap_or(false);

    if sql_clean || flink_clean {
        CheckpointCleanup::DeleteOnCancel
    } else {
        CheckpointCleanup::RetainOnCancel
    }
}

/// Backend override, `None` when no backend-type key is present.
pub fn state_backend(
    props: &HashMap<String, String>,
) -> EnvironmentResult<Option<StateBackendSpec>> {
    let Some(backend_type) = non_blank(props, keys::STATE_BACKEND) else {
        return Ok(None);
    };
    let checkpoint_uri = non_blank(props, keys::CHECKPOINTS_DIRECTORY).unwrap_or("");
    let incremental = non_blank(props, keys::STATE_BACKEND_INCREMENTAL);
    create_state_backend(backend_type, checkpoint_uri, incremental).map(Some)
}

/// Lenient boolean parsing shared across the flag-valued keys.
///
/// Accepts `true/1/yes/on` and `false/0/no/off`, case-insensitively.
pub(crate) fn parse_bool(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn non_blank<'a>(props: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    props
        .get(key)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
}

fn positive_int(props: &HashMap<String, String>, key: &str) -> EnvironmentResult<Option<i32>> {
    let Some(raw) = non_blank(props, key) else {
        return Ok(None);
    };
    let value: i32 = raw
        .parse()
        .ok()
        .filter(|v| *v > 0)
        .ok_or_else(|| invalid_numeric(key, raw))?;
    Ok(Some(value))
}

fn millis_or_zero(props: &HashMap<String, String>, key: &str) -> EnvironmentResult<u64> {
    match non_blank(props, key) {
        Some(raw) => raw.parse().map_err(|_| invalid_numeric(key, raw)),
        None => Ok(0),
    }
}

fn invalid_numeric(key: &str, value: &str) -> EnvironmentError {
    EnvironmentError::InvalidNumericValue {
        key: key.to_string(),
        value: value.to_string(),
    }
}
