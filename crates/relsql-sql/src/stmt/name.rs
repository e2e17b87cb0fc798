/// A possibly schema-qualified identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Name(pub Vec<String>);

impl Name {
    /// `"schema"."name"`, or just `"name"` without a schema.
    pub fn qualified(schema: Option<&str>, name: &str) -> Self {
        Name(schema.into_iter().chain([name]).map(str::to_string).collect())
    }

    /// The last, unqualified part.
    pub fn base(&self) -> &str {
        self.0.last().map(String::as_str).unwrap_or_default()
    }
}

impl From<&str> for Name {
    fn from(value: &str) -> Self {
        Name(vec![value.to_string()])
    }
}
