use relsql_core::stmt::{self, Value as CoreValue};
use tokio_postgres::{
    types::{private::BytesMut, to_sql_checked, IsNull, ToSql, Type},
    Column, Row,
};

type BoxError = Box<dyn std::error::Error + Sync + Send>;

/// A bound parameter, coerced to whatever type the server inferred for its
/// placeholder when the statement was prepared.
#[derive(Debug)]
pub struct Value(CoreValue);

impl From<CoreValue> for Value {
    fn from(value: CoreValue) -> Self {
        Self(value)
    }
}

impl ToSql for Value {
    fn to_sql(&self, ty: &Type, out: &mut BytesMut) -> Result<IsNull, BoxError>
    where
        Self: Sized,
    {
        match &self.0 {
            stmt::Value::Null => Ok(IsNull::Yes),
            stmt::Value::Bool(value) => match *ty {
                Type::BOOL => value.to_sql(ty, out),
                Type::JSON | Type::JSONB => serde_json::Value::Bool(*value).to_sql(ty, out),
                _ => text(value.to_string(), ty, out),
            },
            stmt::Value::I64(value) => match *ty {
                Type::INT2 => {
                    let value = i16::try_from(*value)?;
                    value.to_sql(ty, out)
                }
                Type::INT4 => {
                    let value = i32::try_from(*value)?;
                    value.to_sql(ty, out)
                }
                Type::INT8 => value.to_sql(ty, out),
                Type::FLOAT4 => {
                    let value = *value as f32;
                    value.to_sql(ty, out)
                }
                Type::FLOAT8 => {
                    let value = *value as f64;
                    value.to_sql(ty, out)
                }
                Type::JSON | Type::JSONB => serde_json::Value::from(*value).to_sql(ty, out),
                _ => text(value.to_string(), ty, out),
            },
            stmt::Value::F64(value) => match *ty {
                Type::FLOAT4 => {
                    let value = *value as f32;
                    value.to_sql(ty, out)
                }
                Type::FLOAT8 => value.to_sql(ty, out),
                Type::JSON | Type::JSONB => serde_json::Value::from(*value).to_sql(ty, out),
                _ => text(value.to_string(), ty, out),
            },
            stmt::Value::String(value) => match *ty {
                // Path literals such as `{a,b,0,"1"}` bind to `#>` / `#>>`
                Type::TEXT_ARRAY | Type::VARCHAR_ARRAY => {
                    text_array(value)?.to_sql(ty, out)
                }
                Type::JSON | Type::JSONB => {
                    let doc = serde_json::from_str(value)
                        .unwrap_or_else(|_| serde_json::Value::String(value.clone()));
                    doc.to_sql(ty, out)
                }
                _ => text(value.clone(), ty, out),
            },
            value @ (stmt::Value::Json(_) | stmt::Value::List(_)) => match *ty {
                Type::TEXT_ARRAY | Type::VARCHAR_ARRAY => {
                    let items = value
                        .clone()
                        .into_list()
                        .into_iter()
                        .map(|item| match item {
                            stmt::Value::String(item) => item,
                            item => item.to_json().to_string(),
                        })
                        .collect::<Vec<_>>();
                    items.to_sql(ty, out)
                }
                Type::JSON | Type::JSONB => value.to_json().to_sql(ty, out),
                _ => text(value.to_json().to_string(), ty, out),
            },
        }
    }

    fn accepts(_: &Type) -> bool {
        true
    }

    to_sql_checked!();
}

fn text(value: String, ty: &Type, out: &mut BytesMut) -> Result<IsNull, BoxError> {
    match *ty {
        Type::TEXT | Type::VARCHAR | Type::BPCHAR | Type::NAME | Type::UNKNOWN => {
            value.to_sql(&Type::TEXT, out)
        }
        _ => Err(format!("cannot bind `{value}` to a {ty} parameter").into()),
    }
}

/// Parses an array literal like `{a,b,0,"1"}` into its elements.
pub(crate) fn text_array(literal: &str) -> Result<Vec<String>, BoxError> {
    let inner = literal
        .strip_prefix('{')
        .and_then(|rest| rest.strip_suffix('}'))
        .ok_or_else(|| format!("malformed array literal `{literal}`"))?;

    let mut items = vec![];

    if inner.is_empty() {
        return Ok(items);
    }

    let mut current = String::new();
    let mut quoted = false;
    let mut chars = inner.chars();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => quoted = !quoted,
            '\\' if quoted => {
                if let Some(escaped) = chars.next() {
                    current.push(escaped);
                }
            }
            ',' if !quoted => items.push(std::mem::take(&mut current)),
            ch => current.push(ch),
        }
    }

    if quoted {
        return Err(format!("unterminated quote in array literal `{literal}`").into());
    }

    items.push(current);
    Ok(items)
}

/// Converts a PostgreSQL value within a row to a [`relsql_core::stmt::Value`].
pub(crate) fn postgres_to_relsql(
    index: usize,
    row: &Row,
    column: &Column,
) -> relsql_core::Result<CoreValue> {
    let ty = column.type_();

    let value = if *ty == Type::BOOL {
        row.try_get::<_, Option<bool>>(index)
            .map(|v| v.map(CoreValue::Bool))
    } else if *ty == Type::INT2 {
        row.try_get::<_, Option<i16>>(index)
            .map(|v| v.map(|v| CoreValue::I64(v.into())))
    } else if *ty == Type::INT4 {
        row.try_get::<_, Option<i32>>(index)
            .map(|v| v.map(|v| CoreValue::I64(v.into())))
    } else if *ty == Type::INT8 {
        row.try_get::<_, Option<i64>>(index)
            .map(|v| v.map(CoreValue::I64))
    } else if *ty == Type::FLOAT4 {
        row.try_get::<_, Option<f32>>(index)
            .map(|v| v.map(|v| CoreValue::F64(v.into())))
    } else if *ty == Type::FLOAT8 {
        row.try_get::<_, Option<f64>>(index)
            .map(|v| v.map(CoreValue::F64))
    } else if *ty == Type::JSON || *ty == Type::JSONB {
        row.try_get::<_, Option<serde_json::Value>>(index)
            .map(|v| v.map(CoreValue::from))
    } else {
        row.try_get::<_, Option<String>>(index)
            .map(|v| v.map(CoreValue::String))
    };

    value
        .map(Option::unwrap_or_default)
        .map_err(relsql_core::Error::driver)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn array_literal_unquotes_keys() {
        assert_eq!(
            text_array(r#"{a,b,0,"1"}"#).unwrap(),
            vec!["a", "b", "0", "1"]
        );
    }

    #[test]
    fn array_literal_keeps_quoted_commas() {
        assert_eq!(text_array(r#"{"a,b",c}"#).unwrap(), vec!["a,b", "c"]);
        assert_eq!(text_array("{}").unwrap(), Vec::<String>::new());
    }

    #[test]
    fn array_literal_must_be_braced() {
        assert!(text_array("a,b").is_err());
        assert!(text_array(r#"{"a}"#).is_err());
    }
}
