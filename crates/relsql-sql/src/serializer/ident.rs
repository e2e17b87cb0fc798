use super::{Formatter, Params, ToSql};

/// A double-quoted identifier.
pub(super) struct Ident<S>(pub(super) S);

impl<S: AsRef<str>> ToSql for Ident<S> {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        let ident = self.0.as_ref();
        f.dst.push('"');
        if ident.contains('"') {
            f.dst.push_str(&ident.replace('"', "\"\""));
        } else {
            f.dst.push_str(ident);
        }
        f.dst.push('"');
    }
}
