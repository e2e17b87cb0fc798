/// Configuration for a [`Source`](crate::Source)
#[derive(Debug, Clone)]
pub struct Config {
    /// Schema used for models that do not name one
    pub schema: Option<String>,

    /// Upper bound on parent rows looked up when a fuzzy search follows a
    /// parent relation
    pub chunk: u64,

    /// Rows per multi-row INSERT when creating without id retrieval
    pub insert_page_size: usize,

    /// Table recording applied migration stamps
    pub ledger_table: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema: None,
            chunk: 100,
            insert_page_size: 100,
            ledger_table: "_relsql_migration".to_string(),
        }
    }
}

impl Config {
    /// Create a new Config with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    pub fn chunk(mut self, chunk: u64) -> Self {
        self.chunk = chunk;
        self
    }

    /// Values of zero are treated as one.
    pub fn insert_page_size(mut self, size: usize) -> Self {
        self.insert_page_size = size.max(1);
        self
    }

    pub fn ledger_table(mut self, table: impl Into<String>) -> Self {
        self.ledger_table = table.into();
        self
    }
}
