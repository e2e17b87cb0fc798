use crate::Source;

use relsql_core::{stmt::Value, Result};
use relsql_sql::{Serializer, Statement};

/// Raw statements for [`Source::execute`].
///
/// Text is split on `;` followed by a newline. Blank statements are dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Commands {
    statements: Vec<String>,
}

impl Commands {
    pub fn split(text: &str) -> Self {
        text.split(";\n").collect::<Vec<_>>().into()
    }

    /// Renders statements that bind no values, such as DDL. A statement
    /// carrying values is an error since raw commands run without them.
    pub fn ddl(statements: &[Statement]) -> Result<Self> {
        let serializer = Serializer::postgresql();
        let mut rendered = vec![];

        for stmt in statements {
            let mut params: Vec<Value> = vec![];
            let sql = serializer.serialize(stmt, &mut params);

            if !params.is_empty() {
                relsql_core::bail!(
                    "statement binds {} values and cannot run as a raw command: {sql}",
                    params.len()
                );
            }
            rendered.push(sql);
        }

        Ok(rendered.into())
    }

    pub fn statements(&self) -> &[String] {
        &self.statements
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

impl From<&str> for Commands {
    fn from(value: &str) -> Self {
        Commands::split(value)
    }
}

impl From<String> for Commands {
    fn from(value: String) -> Self {
        Commands::split(&value)
    }
}

impl From<Vec<String>> for Commands {
    fn from(value: Vec<String>) -> Self {
        Commands {
            statements: value
                .into_iter()
                .map(|stmt| stmt.trim().to_string())
                .filter(|stmt| !stmt.is_empty())
                .collect(),
        }
    }
}

impl From<Vec<&str>> for Commands {
    fn from(value: Vec<&str>) -> Self {
        value
            .into_iter()
            .map(str::to_string)
            .collect::<Vec<_>>()
            .into()
    }
}

impl Source {
    /// Runs raw statements in order and commits once at the end.
    pub async fn execute(&mut self, commands: impl Into<Commands>) -> Result<()> {
        let commands = commands.into();
        self.batch(commands.statements).await?;
        Ok(())
    }
}
