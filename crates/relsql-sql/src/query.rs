//! Builds SELECT/INSERT/UPDATE/DELETE statements for a model.

use crate::{
    naming, path, predicate,
    stmt::{Delete, Expr, Insert, Limit, OrderBy, Query, Statement, Type, Update, Value},
};

use indexmap::IndexMap;
use relsql_core::{
    schema::{Field, Model},
    stmt::{Criteria, Filter},
    Result,
};

/// Parent keys matching a fuzzy search term, by the child's foreign key
/// field.
pub type ParentKeys = IndexMap<String, Vec<Value>>;

/// Resolves `name` or `name__path` to a stored field and a path within it.
/// Injected fields resolve into their base document.
pub fn resolve<'a>(model: &'a Model, name: &str) -> Result<(&'a Field, Option<String>)> {
    let (base, rest) = match model.field(name) {
        Some(_) => (name, None),
        None => match name.split_once("__") {
            Some((base, rest)) => (base, Some(rest)),
            None => (name, None),
        },
    };

    let field = model.expect_field(base)?;

    match field.injection() {
        Some((target, inject)) => {
            let path = [inject, rest.unwrap_or_default()]
                .into_iter()
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join("__");
            let target = model.expect_field(target)?;
            Ok((target, (!path.is_empty()).then_some(path)))
        }
        None => Ok((field, rest.map(str::to_string))),
    }
}

/// A stored field reference as an expression. Extracted paths use their
/// generated column.
fn reference(field: &Field, path: Option<&str>) -> Expr {
    match path {
        None => Expr::column(field.store()),
        Some(path) if field.extract.contains_key(path) => {
            Expr::column(path::column_store(field.store(), path))
        }
        Some(path) => Expr::Path {
            column: field.store().to_string(),
            path: Box::new(Expr::value(path::walk(path))),
            text: true,
        },
    }
}

/// ANDs the criteria of every field, visiting fields in declared order.
pub fn filter_expr(model: &Model, filter: &Filter) -> Result<Option<Expr>> {
    let mut routed: IndexMap<&str, Criteria> = IndexMap::new();

    for name in filter.criteria.keys() {
        model.expect_field(name)?;
    }

    for field in &model.fields {
        let Some(criteria) = filter.criteria(&field.name) else {
            continue;
        };

        match field.injection() {
            Some((base, inject)) => {
                let routed = routed.entry(base).or_default();
                for (key, value) in criteria {
                    let key = if inject.is_empty() {
                        key.clone()
                    } else {
                        format!("{inject}__{key}")
                    };
                    routed.insert(key, value.clone());
                }
            }
            None => {
                routed
                    .entry(&field.name)
                    .or_default()
                    .extend(criteria.iter().map(|(k, v)| (k.clone(), v.clone())));
            }
        }
    }

    let mut operands = vec![];

    for field in model.stored_fields() {
        if let Some(criteria) = routed.get(field.name.as_str()) {
            operands.extend(predicate::compile(field, criteria));
        }
    }

    Ok((!operands.is_empty()).then(|| Expr::and_from_vec(operands)))
}

/// ORs a match of `term` against every label field.
///
/// A label that is a foreign key matches when its value is one of the parent
/// keys found for the same term.
pub fn like_expr(model: &Model, term: &str, parents: &ParentKeys) -> Result<Option<Expr>> {
    let mut operands = vec![];

    for label in &model.label {
        if let Some(keys) = parents.get(label) {
            let field = model.expect_field(label)?;
            let keys = keys.iter().cloned().map(Expr::Value).collect();
            operands.push(Expr::column(field.store()).in_list(keys));
            continue;
        }

        let (field, path) = resolve(model, label)?;
        let pattern = Expr::value(format!("%{term}%"));
        let target = reference(field, path.as_deref()).cast(Type::TEXT);
        operands.push(target.like(pattern, false));
    }

    if operands.is_empty() {
        return Ok(None);
    }

    Ok(Some(Expr::Or(operands)))
}

fn where_clause(model: &Model, filter: &Filter, like: Option<Expr>) -> Result<Option<Expr>> {
    let mut operands = vec![];
    operands.extend(filter_expr(model, filter)?);
    operands.extend(like);
    Ok((!operands.is_empty()).then(|| Expr::and_from_vec(operands)))
}

/// The sort override if one is pending, else the model's order. Consumes the
/// override.
pub fn order_by(model: &Model, filter: &mut Filter) -> Result<Vec<OrderBy>> {
    let sort = filter.take_sort().unwrap_or_else(|| model.order.clone());

    sort.iter()
        .map(|token| {
            let (desc, name) = match token.as_bytes().first() {
                Some(b'-') => (true, &token[1..]),
                Some(b'+') => (false, &token[1..]),
                _ => (false, &token[..]),
            };
            let (field, path) = resolve(model, name)?;
            Ok(OrderBy {
                expr: reference(field, path.as_deref()),
                desc,
            })
        })
        .collect()
}

pub fn limit(filter: &Filter) -> Option<Limit> {
    filter.limit.map(|limit| Limit {
        limit: Expr::value(limit),
        offset: filter.offset.filter(|offset| *offset > 0).map(Expr::value),
    })
}

/// `SELECT *` with filter, fuzzy match, sort and pagination.
pub fn select(model: &Model, filter: &mut Filter, like: Option<Expr>) -> Result<Statement> {
    let mut query = Query::new(naming::table(model));
    query.filter = where_clause(model, filter, like)?;
    query.order_by = order_by(model, filter)?;
    query.limit = limit(filter);
    Ok(query.into())
}

/// `SELECT COUNT(*)` over the same rows, ignoring sort and pagination.
pub fn count(model: &Model, filter: &Filter, like: Option<Expr>) -> Result<Statement> {
    let mut query = Query::new(naming::table(model));
    query.returning = vec![Expr::Count];
    query.filter = where_clause(model, filter, like)?;
    Ok(query.into())
}

/// Encodes a value for a field's column. Documents are sent as JSON.
pub fn encode(field: &Field, value: Value) -> Value {
    if field.kind.is_document() {
        value.into_json()
    } else {
        value
    }
}

/// A multi-row insert. `returning` names the column whose generated value is
/// read back.
pub fn insert(
    model: &Model,
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
    returning: Option<&Field>,
) -> Statement {
    Insert {
        table: naming::table(model),
        columns,
        rows: rows
            .into_iter()
            .map(|row| row.into_iter().map(Expr::Value).collect())
            .collect(),
        returning: returning.map(|field| field.store().to_string()),
    }
    .into()
}

/// Updates every row matching the filter.
pub fn update_where(
    model: &Model,
    assignments: Vec<(String, Value)>,
    filter: &Filter,
    like: Option<Expr>,
) -> Result<Statement> {
    Ok(Update {
        table: naming::table(model),
        assignments: assign(assignments),
        filter: where_clause(model, filter, like)?,
    }
    .into())
}

/// Updates the one row identified by `id`.
pub fn update_id(
    model: &Model,
    id: &Field,
    assignments: Vec<(String, Value)>,
    key: Value,
) -> Statement {
    Update {
        table: naming::table(model),
        assignments: assign(assignments),
        filter: Some(Expr::eq(Expr::column(id.store()), Expr::Value(key))),
    }
    .into()
}

fn assign(assignments: Vec<(String, Value)>) -> Vec<(String, Expr)> {
    assignments
        .into_iter()
        .map(|(column, value)| (column, Expr::Value(value)))
        .collect()
}

pub fn delete_where(model: &Model, filter: &Filter, like: Option<Expr>) -> Result<Statement> {
    Ok(Delete {
        from: naming::table(model),
        filter: where_clause(model, filter, like)?,
    }
    .into())
}

pub fn delete_ids(model: &Model, id: &Field, keys: Vec<Value>) -> Statement {
    let keys = keys.into_iter().map(Expr::Value).collect();

    Delete {
        from: naming::table(model),
        filter: Some(Expr::column(id.store()).in_list(keys)),
    }
    .into()
}
