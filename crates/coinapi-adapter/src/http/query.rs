/*
[INPUT]:  Optional endpoint parameters (filters, time bounds, limits)
[OUTPUT]: Query string appended to REST paths
[POS]:    HTTP layer - query parameter serialization
[UPDATE]: When changing parameter filtering rules or value types
*/

use std::fmt;

/// How optional parameters are filtered before serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryMode {
    /// Drops absent values and falsy ones (`0`, `""`, `false`).
    ///
    /// A `limit` of `0` therefore never reaches the server. This matches the
    /// behaviour of the reference JavaScript client and is the default.
    #[default]
    Legacy,
    /// Drops only absent values.
    Strict,
}

/// Scalar query parameter value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Str(String),
    Int(i64),
    UInt(u64),
    Bool(bool),
}

impl ParamValue {
    pub fn is_falsy(&self) -> bool {
        match self {
            ParamValue::Str(value) => value.is_empty(),
            ParamValue::Int(value) => *value == 0,
            ParamValue::UInt(value) => *value == 0,
            ParamValue::Bool(value) => !value,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Str(value) => f.write_str(value),
            ParamValue::Int(value) => write!(f, "{value}"),
            ParamValue::UInt(value) => write!(f, "{value}"),
            ParamValue::Bool(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Str(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Str(value)
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        ParamValue::UInt(u64::from(value))
    }
}

impl From<u64> for ParamValue {
    fn from(value: u64) -> Self {
        ParamValue::UInt(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

/// Ordered set of optional query parameters for one request.
///
/// Built fresh per call; serialization borrows it and never mutates it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(&'static str, Option<ParamValue>)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter, keeping insertion order
    pub fn push<V: Into<ParamValue>>(mut self, key: &'static str, value: Option<V>) -> Self {
        self.pairs.push((key, value.map(Into::into)));
        self
    }

    /// Parameters that survive filtering under `mode`, in insertion order
    pub fn retained(&self, mode: QueryMode) -> Vec<(&'static str, &ParamValue)> {
        self.pairs
            .iter()
            .filter_map(|(key, value)| {
                let value = value.as_ref()?;
                match mode {
                    QueryMode::Legacy if value.is_falsy() => None,
                    _ => Some((*key, value)),
                }
            })
            .collect()
    }

    /// Serialize to `?k=v&k=v`, or an empty string when nothing survives.
    pub fn to_query_string(&self, mode: QueryMode) -> String {
        let params: Vec<String> = self
            .retained(mode)
            .into_iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect();

        if params.is_empty() {
            String::new()
        } else {
            format!("?{}", params.join("&"))
        }
    }
}
