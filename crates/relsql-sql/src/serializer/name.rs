use super::{Formatter, Ident, Params, Period, ToSql};

use crate::stmt::Name;

impl ToSql for &Name {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        fmt!(f, Period(self.0.iter().map(Ident)));
    }
}
