//! Sink table metadata
//!
//! [`TableTarget`] describes the table a sink writes into: name, ordered
//! columns with their semantic types, partition columns, primary keys and
//! the storage-engine family. It is supplied once per sink instantiation and
//! only read afterwards.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Semantic column types as the sink layer sees them.
///
/// Only the textual/non-textual distinction matters for statement synthesis;
/// the full set exists so table metadata round-trips without loss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnType {
    String,
    Varchar,
    Char,
    Int,
    BigInt,
    Float,
    Double,
    Boolean,
    Timestamp,
    Decimal,
}

impl ColumnType {
    /// Textual columns are bound through `cast( ? as string)` placeholders.
    pub fn is_textual(&self) -> bool {
        matches!(
            self,
            ColumnType::String | ColumnType::Varchar | ColumnType::Char
        )
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnType::String => "string",
            ColumnType::Varchar => "varchar",
            ColumnType::Char => "char",
            ColumnType::Int => "int",
            ColumnType::BigInt => "bigint",
            ColumnType::Float => "float",
            ColumnType::Double => "double",
            ColumnType::Boolean => "boolean",
            ColumnType::Timestamp => "timestamp",
            ColumnType::Decimal => "decimal",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for ColumnType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "string" => Ok(ColumnType::String),
            "varchar" => Ok(ColumnType::Varchar),
            "char" => Ok(ColumnType::Char),
            "int" | "integer" => Ok(ColumnType::Int),
            "bigint" | "long" => Ok(ColumnType::BigInt),
            "float" => Ok(ColumnType::Float),
            "double" => Ok(ColumnType::Double),
            "boolean" | "bool" => Ok(ColumnType::Boolean),
            "timestamp" => Ok(ColumnType::Timestamp),
            "decimal" => Ok(ColumnType::Decimal),
            _ => Err(format!("Unknown column type: {}", s)),
        }
    }
}

/// Storage-engine family of an Impala table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum StoreType {
    /// HDFS-backed table; inserts declare target partitions explicitly.
    #[default]
    Generic,
    /// Kudu columnar engine; no partition clause, all columns written.
    Kudu,
}

impl fmt::Display for StoreType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreType::Generic => write!(f, "generic"),
            StoreType::Kudu => write!(f, "kudu"),
        }
    }
}

impl FromStr for StoreType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "generic" | "hdfs" => Ok(StoreType::Generic),
            "kudu" => Ok(StoreType::Kudu),
            _ => Err(format!("Unknown store type: {}", s)),
        }
    }
}

/// Full description of a sink's target table.
///
/// `field_names` and `field_types` are parallel lists; supplying lists of
/// different lengths is a contract violation by the caller, not a condition
/// the statement builders detect or recover from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableTarget {
    pub schema: Option<String>,
    pub table: String,
    pub field_names: Vec<String>,
    pub field_types: Vec<ColumnType>,
    pub partition_fields: Vec<String>,
    pub primary_keys: Vec<String>,
    pub store_type: StoreType,
}

impl TableTarget {
    /// Plain unpartitioned table without keys.
    pub fn new(
        table: impl Into<String>,
        field_names: Vec<String>,
        field_types: Vec<ColumnType>,
    ) -> Self {
        TableTarget {
            schema: None,
            table: table.into(),
            field_names,
            field_types,
            partition_fields: Vec::new(),
            primary_keys: Vec::new(),
            store_type: StoreType::Generic,
        }
    }

    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    pub fn with_partition_fields(mut self, fields: Vec<String>) -> Self {
        self.partition_fields = fields;
        self
    }

    pub fn with_primary_keys(mut self, keys: Vec<String>) -> Self {
        self.primary_keys = keys;
        self
    }

    pub fn with_store_type(mut self, store_type: StoreType) -> Self {
        self.store_type = store_type;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_type_textual() {
        assert!(ColumnType::String.is_textual());
        assert!(ColumnType::Varchar.is_textual());
        assert!(!ColumnType::Int.is_textual());
        assert!(!ColumnType::Timestamp.is_textual());
    }

    #[test]
    fn test_column_type_from_str() {
        assert_eq!("STRING".parse::<ColumnType>().unwrap(), ColumnType::String);
        assert_eq!("integer".parse::<ColumnType>().unwrap(), ColumnType::Int);
        assert!("blob".parse::<ColumnType>().is_err());
    }

    #[test]
    fn test_store_type_from_str() {
        assert_eq!("KUDU".parse::<StoreType>().unwrap(), StoreType::Kudu);
        assert_eq!("hdfs".parse::<StoreType>().unwrap(), StoreType::Generic);
        assert!("iceberg".parse::<StoreType>().is_err());
    }

    #[test]
    fn test_builder_chain() {
        let target = TableTarget::new(
            "events",
            vec!["id".to_string(), "day".to_string()],
            vec![ColumnType::BigInt, ColumnType::String],
        )
        .with_schema("analytics")
        .with_partition_fields(vec!["day".to_string()])
        .with_store_type(StoreType::Kudu);

        assert_eq!(target.schema.as_deref(), Some("analytics"));
        assert_eq!(target.partition_fields, vec!["day"]);
        assert_eq!(target.store_type, StoreType::Kudu);
    }
}
