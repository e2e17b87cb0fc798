//! Compiles a field's pending criteria into predicates.

use crate::{
    path,
    stmt::{BinaryOp, Expr, Type, Value},
};

use relsql_core::{schema::Field, stmt::Criteria};

/// Filter operators, written as the last `__` segment of a criterion key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Eq,
    Gt,
    Gte,
    Lt,
    Lte,
    In,
    /// Not in the list
    Ne,
    Like,
    NotLike,
    Null,
    /// Contains the single element
    Has,
    /// Contains at least one of the elements
    Any,
    /// Contains every element
    All,
}

impl Operator {
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s {
            "eq" => Operator::Eq,
            "gt" => Operator::Gt,
            "gte" => Operator::Gte,
            "lt" => Operator::Lt,
            "lte" => Operator::Lte,
            "in" => Operator::In,
            "ne" => Operator::Ne,
            "like" => Operator::Like,
            "notlike" => Operator::NotLike,
            "null" => Operator::Null,
            "has" => Operator::Has,
            "any" => Operator::Any,
            "all" => Operator::All,
            _ => return None,
        })
    }

    fn is_containment(self) -> bool {
        matches!(self, Operator::Has | Operator::Any | Operator::All)
    }
}

/// Splits a criterion key into an optional document path and its operator.
///
/// A key naming an extracted path is always that path. Otherwise a known
/// operator wins, then a trailing operator after a path, then the whole key
/// is a path compared for equality.
pub fn parse<'a>(field: &Field, key: &'a str) -> (Option<&'a str>, Operator) {
    if field.extract.contains_key(key) {
        return (Some(key), Operator::Eq);
    }

    if let Some(op) = Operator::parse(key) {
        return (None, op);
    }

    match key.rsplit_once("__") {
        Some((path, op)) => match Operator::parse(op) {
            Some(op) => (Some(path), op),
            None => (Some(key), Operator::Eq),
        },
        None => (Some(key), Operator::Eq),
    }
}

/// One predicate per criterion, in the order the criteria were added. The
/// caller ANDs them.
pub fn compile(field: &Field, criteria: &Criteria) -> Vec<Expr> {
    criteria
        .iter()
        .map(|(key, value)| {
            let (path, op) = parse(field, key);
            criterion(field, path, op, value)
        })
        .collect()
}

fn criterion(field: &Field, path: Option<&str>, op: Operator, value: &Value) -> Expr {
    let target = target(field, path, op, value);
    let compare = |op| Expr::binary_op(target.clone(), op, Expr::Value(value.clone()));

    match op {
        Operator::Eq => compare(BinaryOp::Eq),
        Operator::Gt => compare(BinaryOp::Gt),
        Operator::Gte => compare(BinaryOp::Ge),
        Operator::Lt => compare(BinaryOp::Lt),
        Operator::Lte => compare(BinaryOp::Le),
        Operator::In => target.in_list(values(value)),
        Operator::Ne => target.not_in_list(values(value)),
        Operator::Like | Operator::NotLike => {
            let pattern = Expr::value(format!("%{}%", text(value)));
            target.like(pattern, op == Operator::NotLike)
        }
        Operator::Null => target.is_null(!truthy(value)),
        Operator::Has => target.contains(document(vec![value.clone()])),
        Operator::All => target.contains(document(value.clone().into_list())),
        Operator::Any => Expr::or_from_vec(
            value
                .clone()
                .into_list()
                .into_iter()
                .map(|item| target.clone().contains(document(vec![item])))
                .collect(),
        ),
    }
}

/// What a criterion compares: the column, a generated column, or a runtime
/// document access cast after the sample value.
fn target(field: &Field, path: Option<&str>, op: Operator, value: &Value) -> Expr {
    let Some(path) = path else {
        return match op {
            Operator::Like | Operator::NotLike => Expr::column(field.store()).cast(Type::TEXT),
            _ => Expr::column(field.store()),
        };
    };

    if field.extract.contains_key(path) {
        let column = Expr::column(path::column_store(field.store(), path));
        return match op {
            Operator::Like | Operator::NotLike => column.cast(Type::TEXT),
            _ => column,
        };
    }

    let access = Expr::Path {
        column: field.store().to_string(),
        path: Box::new(Expr::value(path::walk(path))),
        text: !op.is_containment(),
    };

    match op {
        Operator::Like | Operator::NotLike | Operator::Null => access,
        op if op.is_containment() => access,
        _ => match cast(value.sample()) {
            Some(ty) => access.cast(ty),
            None => access,
        },
    }
}

/// The cast a document value needs to compare against `sample`.
fn cast(sample: &Value) -> Option<Type> {
    match sample {
        Value::Bool(_) => Some(Type::Boolean),
        Value::I64(_) => Some(Type::Integer),
        Value::F64(_) => Some(Type::Float),
        _ => None,
    }
}

fn values(value: &Value) -> Vec<Expr> {
    value.clone().into_list().into_iter().map(Expr::Value).collect()
}

fn document(items: Vec<Value>) -> Expr {
    Expr::Value(Value::List(items).into_json())
}

fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        value => value.to_json().to_string(),
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Null => false,
        _ => true,
    }
}
