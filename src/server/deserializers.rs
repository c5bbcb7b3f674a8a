use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub fn first_page() -> i64 {
    1
}

// `?page=abc` falls back to the first page instead of rejecting the request
pub fn deserialize_page<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or_else(first_page))
}

/// A body field that should hold a `T` but is kept when it doesn't, so a
/// handler can tell a missing field (400) from a malformed one (422).
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Lenient<T> {
    Valid(T),
    Invalid(Value),
}

impl<T> Lenient<T> {
    pub fn valid(self) -> Option<T> {
        match self {
            Lenient::Valid(v) => Some(v),
            Lenient::Invalid(_) => None,
        }
    }
}

impl Lenient<i64> {
    /// Accepts JSON integers and integer-valued strings such as `"5"`.
    pub fn integer(self) -> Option<i64> {
        match self {
            Lenient::Valid(v) => Some(v),
            Lenient::Invalid(Value::String(s)) => s.trim().parse().ok(),
            Lenient::Invalid(_) => None,
        }
    }
}
