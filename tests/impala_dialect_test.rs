//! End-to-end tests for Impala statement synthesis and dialect selection

use flowsql::flowsql::sink::{
    ColumnType, DialectRegistry, ImpalaDialect, JdbcDialect, StoreType, TableTarget,
};

fn fields(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn partitioned_target(store_type: StoreType) -> TableTarget {
    TableTarget::new(
        "t",
        fields(&["a", "b", "c"]),
        vec![ColumnType::Int, ColumnType::String, ColumnType::Int],
    )
    .with_partition_fields(fields(&["c"]))
    .with_store_type(store_type)
}

#[test]
fn test_generic_insert_filters_partition_columns() {
    let target = partitioned_target(StoreType::Generic);
    let dialect = ImpalaDialect::from_table(&target);

    let sql = dialect.insert_statement(
        target.schema.as_deref(),
        &target.table,
        &target.field_names,
        &target.partition_fields,
    );

    // Column list excludes the partition field; the placeholder list still
    // mirrors the full three-entry type list.
    assert_eq!(
        sql,
        "INSERT INTO \"t\"(a, b) partition(c) VALUES (?, cast( ? as string), ?)"
    );
}

#[test]
fn test_kudu_insert_writes_all_columns() {
    let target = partitioned_target(StoreType::Kudu);
    let dialect = ImpalaDialect::from_table(&target);

    let sql = dialect.insert_statement(
        target.schema.as_deref(),
        &target.table,
        &target.field_names,
        &target.partition_fields,
    );

    assert_eq!(
        sql,
        "INSERT INTO \"t\"(a, b, c) VALUES (?, cast( ? as string), ?)"
    );
}

#[test]
fn test_update_statement_with_primary_key() {
    let target = TableTarget::new(
        "t",
        fields(&["a", "b"]),
        vec![ColumnType::Int, ColumnType::String],
    )
    .with_primary_keys(fields(&["a"]));
    let dialect = ImpalaDialect::from_table(&target);

    let sql = dialect.update_statement(&target.table, &target.field_names, &fields(&["b"]));
    assert_eq!(sql, "UPDATE \"t\" SET b=? WHERE b=?");
}

#[test]
fn test_schema_qualified_insert() {
    let target = partitioned_target(StoreType::Generic).with_schema("warehouse");
    let dialect = ImpalaDialect::from_table(&target);

    let sql = dialect.insert_statement(
        target.schema.as_deref(),
        &target.table,
        &target.field_names,
        &target.partition_fields,
    );

    assert_eq!(
        sql,
        "INSERT INTO \"warehouse\".\"t\"(a, b) partition(c) VALUES (?, cast( ? as string), ?)"
    );
}

#[test]
fn test_registry_selects_impala_by_url_prefix() {
    let mut registry = DialectRegistry::new();
    registry.register(Box::new(ImpalaDialect::new(
        vec![ColumnType::Int],
        vec![],
        StoreType::Generic,
    )));

    let dialect = registry
        .dialect_for_url("jdbc:impala://impalad:21050/analytics")
        .expect("impala dialect should claim its URL prefix");
    assert_eq!(
        dialect.default_driver_name().as_deref(),
        Some("com.cloudera.impala.jdbc41.Driver")
    );

    assert!(registry
        .dialect_for_url("jdbc:postgresql://db:5432/analytics")
        .is_none());
}

#[test]
fn test_synthesis_idempotent_for_same_target() {
    let target = partitioned_target(StoreType::Generic);
    let dialect = ImpalaDialect::from_table(&target);

    let first = dialect.insert_statement(
        None,
        &target.table,
        &target.field_names,
        &target.partition_fields,
    );
    let second = dialect.insert_statement(
        None,
        &target.table,
        &target.field_names,
        &target.partition_fields,
    );
    assert_eq!(first, second);
}
