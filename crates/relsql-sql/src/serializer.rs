#[macro_use]
mod fmt;
use fmt::ToSql;

mod delim;
use delim::{Comma, Period};

mod ident;
use ident::Ident;

mod params;
pub use params::{Params, Placeholder};

// Fragment serializers
mod column_def;
mod expr;
mod name;
mod statement;
mod ty;
mod value;

use crate::stmt::Statement;

/// Serialize a statement to PostgreSQL text.
#[derive(Debug, Default, Clone, Copy)]
pub struct Serializer {
    _priv: (),
}

struct Formatter<'a, T> {
    /// Where to write the serialized SQL
    dst: &'a mut String,

    /// Where to store parameters
    params: &'a mut T,
}

impl Serializer {
    pub fn postgresql() -> Self {
        Serializer { _priv: () }
    }

    /// Serializes `stmt`, pushing every bound value into `params` in
    /// placeholder order.
    pub fn serialize(&self, stmt: &Statement, params: &mut impl Params) -> String {
        let mut ret = String::new();

        let mut fmt = Formatter {
            dst: &mut ret,
            params,
        };

        stmt.to_sql(&mut fmt);

        ret
    }

    /// Serializes a statement that binds no parameters, such as DDL.
    pub fn serialize_ddl(&self, stmt: &Statement) -> String {
        let mut params = vec![];
        let sql = self.serialize(stmt, &mut params);
        debug_assert!(params.is_empty(), "DDL bound parameters; sql={sql}");
        sql
    }
}
