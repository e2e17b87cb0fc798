mod create;
mod delete;
mod retrieve;
mod update;

use crate::Config;

use relsql_core::{
    driver::{Operation, Response, Sql},
    schema::Model,
    Connection, Result, Schema,
};
use relsql_sql::{Serializer, Statement};

use std::sync::Arc;

/// Executes model operations against one connection.
///
/// Statements are issued one at a time and each result is consumed before
/// the next is sent. A source is not meant to be shared between concurrent
/// callers.
#[derive(Debug)]
pub struct Source {
    name: String,
    connection: Box<dyn Connection>,
    schema: Arc<Schema>,
    config: Config,
    serializer: Serializer,
}

impl Source {
    pub fn new(name: impl Into<String>, connection: impl Connection) -> Self {
        Self {
            name: name.into(),
            connection: Box::new(connection),
            schema: Arc::new(Schema::new()),
            config: Config::default(),
            serializer: Serializer::postgresql(),
        }
    }

    /// Connects with the built-in PostgreSQL driver.
    #[cfg(feature = "postgresql")]
    pub async fn connect(name: impl Into<String>, url: &str) -> Result<Self> {
        let driver = relsql_driver_postgresql::PostgreSQL::connect(url).await?;
        Ok(Self::new(name, driver))
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Registers a model with this source. Models without a schema get the
    /// configured one.
    pub fn register(&mut self, model: Model) -> Result<()> {
        let model = self.bind(model);
        Arc::make_mut(&mut self.schema).register(model)
    }

    pub fn model(&self, name: &str) -> Result<&Model> {
        self.schema.model(name)
    }

    /// Fills in what a model inherits from the source.
    pub(crate) fn bind(&self, mut model: Model) -> Model {
        if model.schema.is_none() {
            model.schema = self.config.schema.clone();
        }
        if model.source.is_none() {
            model.source = Some(self.name.clone());
        }
        model
    }

    /// Serializes and runs one statement.
    pub(crate) async fn exec(&mut self, stmt: &Statement) -> Result<Response> {
        let mut params = vec![];
        let text = self.serializer.serialize(stmt, &mut params);

        tracing::debug!(sql = %text, params = params.len(), "exec");

        let sql = Sql::new(text, params);
        let op = if stmt.returns_rows() {
            Operation::Query(sql)
        } else {
            Operation::Execute(sql)
        };

        self.connection.exec(op).await
    }

    /// Runs parameterless statements in order and commits once.
    pub(crate) async fn batch(&mut self, statements: Vec<String>) -> Result<Response> {
        if statements.is_empty() {
            return Ok(Response::count(0));
        }

        tracing::debug!(statements = statements.len(), "batch");
        self.connection.exec(Operation::Batch(statements)).await
    }

    pub(crate) fn ddl(&self, stmt: &Statement) -> String {
        self.serializer.serialize_ddl(stmt)
    }
}
