//! Reading and writing injected fields inside their base document.

use relsql_core::stmt::Value;
use relsql_sql::path;

/// A segment is an array index when it is numeric and unquoted.
fn index(segment: &str) -> Option<usize> {
    segment.parse().ok()
}

/// Object key for a segment. A leading `_` quotes the rest.
fn key(segment: &str) -> &str {
    segment.strip_prefix('_').unwrap_or(segment)
}

/// The value at `path` within `doc`, or null when absent. An empty path is
/// the whole document.
pub(crate) fn read(doc: &Value, path: &str) -> Value {
    if path.is_empty() {
        return doc.clone();
    }

    let doc = doc.to_json();
    let mut current = &doc;

    for segment in path::split(path) {
        let next = match current {
            serde_json::Value::Array(items) if !segment.starts_with('_') => {
                index(segment).and_then(|i| items.get(i))
            }
            serde_json::Value::Object(map) => map.get(key(segment)),
            _ => None,
        };

        match next {
            Some(next) => current = next,
            None => return Value::Null,
        }
    }

    Value::from(current.clone())
}

/// `doc` with `value` stored at `path`, creating objects along the way.
pub(crate) fn write(doc: Value, path: &str, value: Value) -> Value {
    if path.is_empty() {
        return value;
    }

    let mut doc = doc.to_json();
    insert(&mut doc, &path::split(path), value.to_json());
    Value::from(doc)
}

fn insert(doc: &mut serde_json::Value, segments: &[&str], value: serde_json::Value) {
    let Some((first, rest)) = segments.split_first() else {
        *doc = value;
        return;
    };

    if let serde_json::Value::Array(items) = doc {
        if let Some(i) = index(first).filter(|_| !first.starts_with('_')) {
            if items.len() <= i {
                items.resize(i + 1, serde_json::Value::Null);
            }
            insert(&mut items[i], rest, value);
            return;
        }
    }

    if !doc.is_object() {
        *doc = serde_json::Value::Object(Default::default());
    }

    if let serde_json::Value::Object(map) = doc {
        let entry = map
            .entry(key(first).to_string())
            .or_insert(serde_json::Value::Null);
        insert(entry, rest, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn read_nested() {
        let doc = Value::from(json!({"a": {"b": [1, {"1": "x"}]}}));
        assert_eq!(read(&doc, "a__b__0"), Value::I64(1));
        assert_eq!(read(&doc, "a__b__1___1"), Value::from("x"));
        assert_eq!(read(&doc, "a__c"), Value::Null);
        assert_eq!(read(&Value::Null, "a"), Value::Null);
    }

    #[test]
    fn write_creates_path() {
        let doc = write(Value::Null, "a__b", Value::from("x"));
        assert_eq!(doc, Value::from(json!({"a": {"b": "x"}})));

        let doc = write(doc, "a__c", Value::I64(2));
        assert_eq!(doc, Value::from(json!({"a": {"b": "x", "c": 2}})));
    }

    #[test]
    fn write_into_array() {
        let doc = Value::from(json!({"tags": ["a"]}));
        let doc = write(doc, "tags__1", Value::from("b"));
        assert_eq!(doc, Value::from(json!({"tags": ["a", "b"]})));
    }
}
