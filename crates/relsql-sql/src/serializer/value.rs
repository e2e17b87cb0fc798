use super::{Formatter, Params, ToSql};

use crate::stmt::Value;

/// A value inlined into DDL, used for column defaults.
pub(super) struct Literal<'a>(pub(super) &'a Value);

/// A single-quoted string literal.
pub(super) struct Quoted<'a>(pub(super) &'a str);

impl ToSql for Literal<'_> {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        match self.0 {
            Value::Null => fmt!(f, "NULL"),
            Value::Bool(true) => fmt!(f, "True"),
            Value::Bool(false) => fmt!(f, "False"),
            Value::I64(v) => f.dst.push_str(&v.to_string()),
            Value::F64(v) => f.dst.push_str(&v.to_string()),
            Value::String(v) => fmt!(f, Quoted(v)),
            value @ (Value::List(_) | Value::Json(_)) => {
                let json = value.to_json().to_string();
                fmt!(f, Quoted(&json));
            }
        }
    }
}

impl ToSql for Quoted<'_> {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        f.dst.push('\'');
        f.dst.push_str(&self.0.replace('\'', "''"));
        f.dst.push('\'');
    }
}

impl ToSql for &Value {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        let placeholder = f.params.push(self);
        fmt!(f, placeholder);
    }
}
