//! Impala dialect
//!
//! Statement synthesis for Impala over JDBC, covering both HDFS-backed
//! partitioned tables and Kudu columnar tables. Everything here is a pure
//! function of the table metadata fixed at construction, so synthesized text
//! may be cached keyed by the table's column layout.

use super::dialect::JdbcDialect;
use super::table::{ColumnType, StoreType, TableTarget};

const URL_PREFIX: &str = "jdbc:impala:";
const DRIVER_CLASS: &str = "com.cloudera.impala.jdbc41.Driver";
const PARTITION_KEYWORD: &str = "partition";

/// Impala statement synthesizer.
///
/// `field_types` is the full, unfiltered type list of the target table; the
/// placeholder list of an INSERT always mirrors it one-to-one, even when the
/// column list filters partition fields out.
#[derive(Debug, Clone)]
pub struct ImpalaDialect {
    field_types: Vec<ColumnType>,
    primary_keys: Vec<String>,
    store_type: StoreType,
}

impl ImpalaDialect {
    pub fn new(
        field_types: Vec<ColumnType>,
        primary_keys: Vec<String>,
        store_type: StoreType,
    ) -> Self {
        ImpalaDialect {
            field_types,
            primary_keys,
            store_type,
        }
    }

    /// Build the dialect from full table metadata.
    pub fn from_table(target: &TableTarget) -> Self {
        ImpalaDialect::new(
            target.field_types.clone(),
            target.primary_keys.clone(),
            target.store_type,
        )
    }

    /// Schema-qualified table reference in double-quote form:
    /// `"t"` or `"schema"."t"`.
    fn qualified_table(&self, schema: Option<&str>, table: &str) -> String {
        match schema.filter(|s| !s.is_empty()) {
            Some(schema) => format!("\"{}\".\"{}\"", schema, table),
            None => format!("\"{}\"", table),
        }
    }

    /// One placeholder per field type; textual columns go through an
    /// explicit cast so Impala does not reject string binds.
    fn placeholders(&self) -> String {
        self.field_types
            .iter()
            .map(|t| {
                if t.is_textual() {
                    "cast( ? as string)"
                } else {
                    "?"
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn kudu_insert(&self, schema: Option<&str>, table: &str, field_names: &[String]) -> String {
        let columns = field_names
            .iter()
            .map(|f| self.quote_identifier(f))
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            "INSERT INTO {}({}) VALUES ({})",
            self.qualified_table(schema, table),
            columns,
            self.placeholders()
        )
    }
}

impl JdbcDialect for ImpalaDialect {
    fn can_handle(&self, url: &str) -> bool {
        url.starts_with(URL_PREFIX)
    }

    fn default_driver_name(&self) -> Option<String> {
        Some(DRIVER_CLASS.to_string())
    }

    /// Impala applies no identifier quoting; this is deliberate, not an
    /// omission.
    fn quote_identifier(&self, identifier: &str) -> String {
        identifier.to_string()
    }

    fn update_statement(
        &self,
        table: &str,
        field_names: &[String],
        condition_fields: &[String],
    ) -> String {
        // Primary keys are never reassigned; an empty key list skips nothing.
        let set_clause = field_names
            .iter()
            .filter(|f| self.primary_keys.is_empty() || !self.primary_keys.contains(f))
            .map(|f| format!("{}=?", self.quote_identifier(f)))
            .collect::<Vec<_>>()
            .join(", ");

        let condition_clause = condition_fields
            .iter()
            .map(|f| format!("{}=?", self.quote_identifier(f)))
            .collect::<Vec<_>>()
            .join(" AND ");

        format!(
            "UPDATE {} SET {} WHERE {}",
            self.qualified_table(None, table),
            set_clause,
            condition_clause
        )
    }

    fn insert_statement(
        &self,
        schema: Option<&str>,
        table: &str,
        field_names: &[String],
        partition_fields: &[String],
    ) -> String {
        if self.store_type == StoreType::Kudu {
            return self.kudu_insert(schema, table, field_names);
        }

        let columns = field_names
            .iter()
            .filter(|f| !partition_fields.contains(f))
            .map(|f| self.quote_identifier(f))
            .collect::<Vec<_>>()
            .join(", ");

        let partition_list = partition_fields
            .iter()
            .map(|f| f.replace('"', "'"))
            .collect::<Vec<_>>()
            .join(", ");

        let partition_clause = if partition_list.is_empty() {
            String::new()
        } else {
            format!(" {}({})", PARTITION_KEYWORD, partition_list)
        };

        format!(
            "INSERT INTO {}({}){} VALUES ({})",
            self.qualified_table(schema, table),
            columns,
            partition_clause,
            self.placeholders()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn generic_dialect() -> ImpalaDialect {
        ImpalaDialect::new(
            vec![ColumnType::Int, ColumnType::String, ColumnType::Int],
            Vec::new(),
            StoreType::Generic,
        )
    }

    #[test]
    fn test_url_ownership() {
        let dialect = generic_dialect();
        assert!(dialect.can_handle("jdbc:impala://host:21050/db"));
        assert!(!dialect.can_handle("jdbc:mysql://host:3306/db"));
        assert!(!dialect.can_handle("impala://host"));
    }

    #[test]
    fn test_default_driver() {
        assert_eq!(
            generic_dialect().default_driver_name().as_deref(),
            Some("com.cloudera.impala.jdbc41.Driver")
        );
    }

    #[test]
    fn test_identifier_quoting_is_identity() {
        assert_eq!(generic_dialect().quote_identifier("col"), "col");
    }

    #[test]
    fn test_insert_generic_with_partition() {
        let sql = generic_dialect().insert_statement(
            None,
            "t",
            &fields(&["a", "b", "c"]),
            &fields(&["c"]),
        );
        assert_eq!(
            sql,
            "INSERT INTO \"t\"(a, b) partition(c) VALUES (?, cast( ? as string), ?)"
        );
    }

    #[test]
    fn test_insert_generic_without_partition() {
        let sql =
            generic_dialect().insert_statement(None, "t", &fields(&["a", "b", "c"]), &[]);
        assert_eq!(
            sql,
            "INSERT INTO \"t\"(a, b, c) VALUES (?, cast( ? as string), ?)"
        );
    }

    #[test]
    fn test_insert_kudu_keeps_all_columns() {
        let dialect = ImpalaDialect::new(
            vec![ColumnType::Int, ColumnType::String, ColumnType::Int],
            Vec::new(),
            StoreType::Kudu,
        );
        let sql = dialect.insert_statement(None, "t", &fields(&["a", "b", "c"]), &fields(&["c"]));
        assert_eq!(
            sql,
            "INSERT INTO \"t\"(a, b, c) VALUES (?, cast( ? as string), ?)"
        );
    }

    #[test]
    fn test_insert_with_schema_prefix() {
        let sql = generic_dialect().insert_statement(
            Some("analytics"),
            "t",
            &fields(&["a", "b", "c"]),
            &[],
        );
        assert!(sql.starts_with("INSERT INTO \"analytics\".\"t\"("));
    }

    #[test]
    fn test_partition_field_quote_substitution() {
        let sql = generic_dialect().insert_statement(
            None,
            "t",
            &fields(&["a", "b", "c"]),
            &fields(&["c=\"2024\""]),
        );
        assert!(sql.contains("partition(c='2024')"));
    }

    #[test]
    fn test_update_skips_primary_keys() {
        let dialect = ImpalaDialect::new(
            vec![ColumnType::Int, ColumnType::String],
            fields(&["a"]),
            StoreType::Generic,
        );
        let sql = dialect.update_statement("t", &fields(&["a", "b"]), &fields(&["b"]));
        assert_eq!(sql, "UPDATE \"t\" SET b=? WHERE b=?");
    }

    #[test]
    fn test_update_with_empty_primary_keys_excludes_nothing() {
        let sql = generic_dialect().update_statement("t", &fields(&["a", "b"]), &fields(&["a"]));
        assert_eq!(sql, "UPDATE \"t\" SET a=?, b=? WHERE a=?");
    }

    #[test]
    fn test_update_multiple_conditions() {
        let sql =
            generic_dialect().update_statement("t", &fields(&["a", "b"]), &fields(&["a", "b"]));
        assert!(sql.ends_with("WHERE a=? AND b=?"));
    }

    #[test]
    fn test_synthesis_is_deterministic() {
        let dialect = generic_dialect();
        let names = fields(&["a", "b", "c"]);
        let parts = fields(&["c"]);
        assert_eq!(
            dialect.insert_statement(None, "t", &names, &parts),
            dialect.insert_statement(None, "t", &names, &parts)
        );
    }
}
