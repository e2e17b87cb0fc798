use super::{value::Quoted, Comma, Formatter, Ident, Params, ToSql};

use crate::stmt::{BinaryOp, Expr};

/// Parenthesizes nested AND/OR operands.
struct Operand<'a>(&'a Expr);

impl ToSql for &Expr {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        match self {
            Expr::And(operands) if operands.is_empty() => fmt!(f, "TRUE"),
            Expr::And(operands) => {
                let mut s = "";
                for operand in operands {
                    fmt!(f, s Operand(operand));
                    s = " AND ";
                }
            }
            Expr::Or(operands) if operands.is_empty() => fmt!(f, "FALSE"),
            Expr::Or(operands) => {
                let mut s = "(";
                for operand in operands {
                    fmt!(f, s Operand(operand));
                    s = " OR ";
                }
                fmt!(f, ")");
            }
            Expr::BinaryOp { lhs, op, rhs } => {
                let (lhs, rhs) = (&**lhs, &**rhs);
                fmt!(f, lhs " " op " " rhs);
            }
            Expr::Column(name) => fmt!(f, Ident(name)),
            Expr::Path { column, path, text } => {
                let op = if *text { "#>>" } else { "#>" };
                let path = &**path;
                fmt!(f, Ident(column) op path);
            }
            Expr::Cast { expr, ty } => {
                let ty = *ty;
                match &**expr {
                    Expr::Column(name) => fmt!(f, Ident(name) "::" ty),
                    expr => fmt!(f, "(" expr ")::" ty),
                }
            }
            Expr::InList { expr, list, negate } => {
                let op = if *negate { " NOT IN (" } else { " IN (" };
                let expr = &**expr;
                fmt!(f, expr op Comma(list) ")");
            }
            Expr::IsNull { expr, negate } => {
                let op = if *negate { " IS NOT NULL" } else { " IS NULL" };
                fmt!(f, &**expr op);
            }
            Expr::Like {
                expr,
                pattern,
                negate,
            } => {
                let op = if *negate { " NOT ILIKE " } else { " ILIKE " };
                let pattern = &**pattern;
                fmt!(f, &**expr op pattern);
            }
            Expr::Contains { expr, value } => {
                let value = &**value;
                fmt!(f, &**expr " @> " value);
            }
            Expr::Value(value) => fmt!(f, value),
            Expr::Literal(literal) => fmt!(f, Quoted(literal)),
            Expr::Const(true) => fmt!(f, "TRUE"),
            Expr::Const(false) => fmt!(f, "FALSE"),
            Expr::Count => fmt!(f, "COUNT(*)"),
        }
    }
}

impl ToSql for Operand<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        match self.0 {
            expr @ Expr::And(operands) if operands.len() > 1 => fmt!(f, "(" expr ")"),
            expr => fmt!(f, expr),
        }
    }
}

impl ToSql for &BinaryOp {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        f.dst.push_str(match self {
            BinaryOp::Eq => "=",
            BinaryOp::Ne => "<>",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
        })
    }
}
