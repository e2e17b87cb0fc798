use super::{value::Literal, Formatter, Ident, Params, ToSql};

use crate::stmt::ColumnDef;

impl ToSql for &ColumnDef {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        if let Some(raw) = &self.raw {
            fmt!(f, raw);
            return;
        }

        fmt!(f, Ident(&self.name) " " self.ty);

        if let Some(generated) = &self.generated {
            fmt!(f, " GENERATED ALWAYS AS (" generated ") STORED");
        }

        if self.not_null {
            fmt!(f, " NOT NULL");
        }

        if self.primary_key {
            fmt!(f, " PRIMARY KEY");
        }

        if let Some(default) = &self.default {
            fmt!(f, " DEFAULT " Literal(default));
        }
    }
}
