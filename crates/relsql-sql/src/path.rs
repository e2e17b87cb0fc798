//! Document paths.
//!
//! A path is a `__`-joined list of segments. Plain segments are emitted bare
//! and read by PostgreSQL as keys or array indexes; a segment with a leading
//! `_` is always a key and is emitted quoted without the underscore, so
//! `a__b__0___1` walks `{a,b,0,"1"}`.

/// Splits a path into segments.
pub fn split(path: &str) -> Vec<&str> {
    path.split("__").collect()
}

/// Renders a path as a PostgreSQL text array literal.
pub fn walk(path: &str) -> String {
    walk_segments(&split(path))
}

pub fn walk_segments<S: AsRef<str>>(segments: &[S]) -> String {
    let mut walked = String::from("{");

    for (i, segment) in segments.iter().enumerate() {
        if i > 0 {
            walked.push(',');
        }

        match segment.as_ref().strip_prefix('_') {
            Some(key) => {
                walked.push('"');
                walked.push_str(&key.replace('"', "\\\""));
                walked.push('"');
            }
            None => walked.push_str(segment.as_ref()),
        }
    }

    walked.push('}');
    walked
}

/// Name of the generated column materializing `path` of `store`.
pub fn column_store(store: &str, path: &str) -> String {
    format!("{store}__{path}")
}
