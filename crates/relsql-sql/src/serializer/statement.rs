use super::{value::Literal, Comma, Formatter, Ident, Params, ToSql};

use crate::stmt::{self, AlterColumnChange, AlterTableAction, Statement};

impl ToSql for &Statement {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        match self {
            Statement::AddColumn(stmt) => stmt.to_sql(f),
            Statement::AlterColumn(stmt) => stmt.to_sql(f),
            Statement::AlterIndex(stmt) => stmt.to_sql(f),
            Statement::AlterTable(stmt) => stmt.to_sql(f),
            Statement::CreateIndex(stmt) => stmt.to_sql(f),
            Statement::CreateTable(stmt) => stmt.to_sql(f),
            Statement::Delete(stmt) => stmt.to_sql(f),
            Statement::DropColumn(stmt) => stmt.to_sql(f),
            Statement::DropIndex(stmt) => stmt.to_sql(f),
            Statement::DropTable(stmt) => stmt.to_sql(f),
            Statement::Insert(stmt) => stmt.to_sql(f),
            Statement::Query(stmt) => stmt.to_sql(f),
            Statement::Raw(sql) => fmt!(f, sql),
            Statement::RenameColumn(stmt) => stmt.to_sql(f),
            Statement::Update(stmt) => stmt.to_sql(f),
        }
    }
}

impl ToSql for &stmt::CreateTable {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let if_not_exists = if self.if_not_exists {
            "IF NOT EXISTS "
        } else {
            ""
        };

        let name = &self.name;
        fmt!(f, "CREATE TABLE " if_not_exists name " (");

        let mut s = "\n  ";
        for column in &self.columns {
            fmt!(f, s column);
            s = ",\n  ";
        }

        fmt!(f, "\n)");
    }
}

impl ToSql for &stmt::CreateIndex {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let unique = if self.unique { "UNIQUE " } else { "" };
        let columns = Comma(self.columns.iter().map(Ident));

        let on = &self.on;

        fmt!(
            f, "CREATE " unique "INDEX " Ident(&self.name) " ON " on " (" columns ")"
        );
    }
}

impl ToSql for &stmt::DropIndex {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let if_exists = if self.if_exists { "IF EXISTS " } else { "" };
        let name = &self.name;
        fmt!(f, "DROP INDEX " if_exists name);
    }
}

impl ToSql for &stmt::AlterIndex {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let name = &self.name;
        fmt!(f, "ALTER INDEX " name " RENAME TO " Ident(&self.rename_to));
    }
}

impl ToSql for &stmt::DropTable {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let if_exists = if self.if_exists { "IF EXISTS " } else { "" };
        let name = &self.name;
        fmt!(f, "DROP TABLE " if_exists name);
    }
}

impl ToSql for &stmt::AlterTable {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let name = &self.name;
        fmt!(f, "ALTER TABLE " name);

        match &self.action {
            AlterTableAction::RenameTo(name) => fmt!(f, " RENAME TO " Ident(name)),
            AlterTableAction::SetSchema(schema) => fmt!(f, " SET SCHEMA " Ident(schema)),
        }
    }
}

impl ToSql for &stmt::AddColumn {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let (table, column) = (&self.table, &self.column);
        fmt!(f, "ALTER TABLE " table " ADD COLUMN " column);
    }
}

impl ToSql for &stmt::DropColumn {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let table = &self.table;
        fmt!(f, "ALTER TABLE " table " DROP COLUMN " Ident(&self.name));
    }
}

impl ToSql for &stmt::RenameColumn {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let table = &self.table;
        fmt!(
            f, "ALTER TABLE " table " RENAME COLUMN " Ident(&self.from) " TO " Ident(&self.to)
        );
    }
}

impl ToSql for &stmt::AlterColumn {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let column = &self.name;
        let changes = Comma(self.changes.iter().map(|change| ColumnChange { column, change }));

        let table = &self.table;
        fmt!(f, "ALTER TABLE " table " " changes);
    }
}

struct ColumnChange<'a> {
    column: &'a String,
    change: &'a AlterColumnChange,
}

impl ToSql for ColumnChange<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        fmt!(f, "ALTER COLUMN " Ident(self.column));

        match self.change {
            AlterColumnChange::Type(ty) => {
                let ty = *ty;
                fmt!(f, " TYPE " ty " USING " Ident(self.column) "::" ty)
            }
            AlterColumnChange::SetDefault(value) => fmt!(f, " SET DEFAULT " Literal(value)),
            AlterColumnChange::DropDefault => fmt!(f, " DROP DEFAULT"),
            AlterColumnChange::SetNotNull => fmt!(f, " SET NOT NULL"),
            AlterColumnChange::DropNotNull => fmt!(f, " DROP NOT NULL"),
        }
    }
}

impl ToSql for &stmt::Query {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        fmt!(f, "SELECT ");

        if self.returning.is_empty() {
            fmt!(f, "*");
        } else {
            fmt!(f, Comma(&self.returning));
        }

        let from = &self.from;
        fmt!(f, " FROM " from);

        if let Some(filter) = &self.filter {
            fmt!(f, " WHERE " filter);
        }

        if !self.order_by.is_empty() {
            fmt!(f, " ORDER BY " Comma(&self.order_by));
        }

        if let Some(limit) = &self.limit {
            let count = &limit.limit;
            fmt!(f, " LIMIT " count);

            if let Some(offset) = &limit.offset {
                fmt!(f, " OFFSET " offset);
            }
        }
    }
}

impl ToSql for &stmt::OrderBy {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let direction = if self.desc { " DESC" } else { "" };
        fmt!(f, &self.expr direction);
    }
}

impl ToSql for &stmt::Insert {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let columns = Comma(self.columns.iter().map(Ident));

        let table = &self.table;
        fmt!(f, "INSERT INTO " table " (" columns ") VALUES ");

        let mut s = "";
        for row in &self.rows {
            fmt!(f, s "(" Comma(row) ")");
            s = ", ";
        }

        if let Some(returning) = &self.returning {
            fmt!(f, " RETURNING " Ident(returning));
        }
    }
}

impl ToSql for &stmt::Update {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let assignments = Comma(
            self.assignments
                .iter()
                .map(|(column, expr)| Assignment { column, expr }),
        );

        let table = &self.table;
        fmt!(f, "UPDATE " table " SET " assignments);

        if let Some(filter) = &self.filter {
            fmt!(f, " WHERE " filter);
        }
    }
}

struct Assignment<'a> {
    column: &'a String,
    expr: &'a stmt::Expr,
}

impl ToSql for Assignment<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        fmt!(f, Ident(self.column) " = " self.expr);
    }
}

impl ToSql for &stmt::Delete {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let from = &self.from;
        fmt!(f, "DELETE FROM " from);

        if let Some(filter) = &self.filter {
            fmt!(f, " WHERE " filter);
        }
    }
}
