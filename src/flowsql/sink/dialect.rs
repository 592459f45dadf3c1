//! Dialect contract and registry
//!
//! One [`JdbcDialect`] per target store family. A [`DialectRegistry`] holds
//! dialects in registration order and picks the first whose URL test matches
//! a connection string; registration order is the only precedence.

/// Store-specific SQL synthesis and connection metadata.
///
/// Implementations are pure and immutable after construction, so a single
/// dialect instance may be shared across concurrent sink writers.
pub trait JdbcDialect: Send + Sync {
    /// True iff `url` starts with this dialect's reserved scheme prefix,
    /// e.g. `jdbc:impala:`.
    fn can_handle(&self, url: &str) -> bool;

    /// Fallback driver class identifier, used only when no explicit driver
    /// is configured.
    fn default_driver_name(&self) -> Option<String> {
        None
    }

    /// Dialect-specific identifier quoting for column names.
    fn quote_identifier(&self, identifier: &str) -> String {
        format!("\"{}\"", identifier)
    }

    /// UPDATE text: SET every non-primary-key field, WHERE over the
    /// condition fields.
    fn update_statement(
        &self,
        table: &str,
        field_names: &[String],
        condition_fields: &[String],
    ) -> String;

    /// INSERT text for the given column layout, with partition handling as
    /// the store family requires.
    fn insert_statement(
        &self,
        schema: Option<&str>,
        table: &str,
        field_names: &[String],
        partition_fields: &[String],
    ) -> String;
}

/// Ordered dialect collection; first registered match wins.
#[derive(Default)]
pub struct DialectRegistry {
    dialects: Vec<Box<dyn JdbcDialect>>,
}

impl DialectRegistry {
    pub fn new() -> Self {
        DialectRegistry::default()
    }

    pub fn register(&mut self, dialect: Box<dyn JdbcDialect>) {
        self.dialects.push(dialect);
    }

    /// Select the dialect for a connection string, or `None` when no
    /// registered dialect claims the URL.
    pub fn dialect_for_url(&self, url: &str) -> Option<&dyn JdbcDialect> {
        self.dialects
            .iter()
            .find(|d| d.can_handle(url))
            .map(|d| d.as_ref())
    }

    pub fn is_empty(&self) -> bool {
        self.dialects.is_empty()
    }

    pub fn len(&self) -> usize {
        self.dialects.len()
    }
}
