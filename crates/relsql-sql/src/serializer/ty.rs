use super::{Formatter, Params, ToSql};

use crate::stmt::Type;

impl ToSql for Type {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        match self {
            Type::Boolean => fmt!(f, "BOOLEAN"),
            Type::Integer => fmt!(f, "INT"),
            Type::Serial => fmt!(f, "SERIAL"),
            Type::Float => fmt!(f, "FLOAT"),
            Type::VarChar(length) => {
                fmt!(f, "VARCHAR(");
                f.dst.push_str(&length.to_string());
                fmt!(f, ")");
            }
            Type::Jsonb => fmt!(f, "JSONB"),
        }
    }
}
