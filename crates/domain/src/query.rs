use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Arguments handed verbatim to the host's list-query engine.
pub type QueryArgs = Map<String, Value>;

/// Comment type(s) injected into every list query under the `type` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeFilter {
    One(String),
    Many(Vec<String>),
}

impl TypeFilter {
    pub fn is_empty(&self) -> bool {
        match self {
            // "0" 与空串同样视为未设置
            TypeFilter::One(t) => t.is_empty() || t == "0",
            TypeFilter::Many(ts) => ts.is_empty(),
        }
    }

    fn to_value(&self) -> Value {
        match self {
            TypeFilter::One(t) => Value::from(t.as_str()),
            TypeFilter::Many(ts) => Value::from(ts.clone()),
        }
    }
}

impl Default for TypeFilter {
    fn default() -> Self {
        TypeFilter::Many(Vec::new())
    }
}

impl From<&str> for TypeFilter {
    fn from(t: &str) -> Self {
        TypeFilter::One(t.to_string())
    }
}

impl From<Vec<String>> for TypeFilter {
    fn from(ts: Vec<String>) -> Self {
        TypeFilter::Many(ts)
    }
}

/// Query configuration shared by every list query of a [`crate::CommentQuery`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryConfig {
    #[serde(default)]
    pub type_filter: TypeFilter,
    #[serde(default)]
    pub default_args: QueryArgs,
    /// Base of the admin area, used to build edit links.
    #[serde(default)]
    pub admin_url: String,
}

impl QueryConfig {
    pub fn with_type(mut self, type_filter: impl Into<TypeFilter>) -> Self {
        self.type_filter = type_filter.into();
        self
    }

    pub fn with_default_args(mut self, args: QueryArgs) -> Self {
        self.default_args = args;
        self
    }

    pub fn with_admin_url(mut self, admin_url: impl Into<String>) -> Self {
        self.admin_url = admin_url.into();
        self
    }

    /// Builds the effective arguments of one list query.
    ///
    /// A non-empty type filter is written into the caller's `type` key (replacing
    /// whatever the caller passed), then the result is laid over the defaults.
    /// Precedence is therefore: type filter, caller arguments, defaults.
    pub fn parse_query_args(&self, mut args: QueryArgs) -> QueryArgs {
        if !self.type_filter.is_empty() {
            args.insert("type".to_string(), self.type_filter.to_value());
        }

        let mut merged = self.default_args.clone();
        merged.extend(args);
        merged
    }
}
