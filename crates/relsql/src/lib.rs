mod collection;
pub use collection::Collection;

mod config;
pub use config::Config;

mod convert;

mod document;

mod execute;
pub use execute::Commands;

mod migrate;

mod record;
pub use record::{Action, Record};

mod source;
pub use source::Source;

pub use relsql_core::{driver, schema, stmt, Connection, Error, Result, Schema};

pub use relsql_sql as sql;

#[cfg(feature = "postgresql")]
pub use relsql_driver_postgresql::PostgreSQL;
