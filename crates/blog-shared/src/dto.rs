//! Data Transfer Objects - request bodies for the blog post API.
//!
//! Text fields are cast leniently: numbers and booleans become their string
//! form, `null` stays empty, and objects or arrays are rejected.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Fields `POST /posts` requires, in the order they are checked.
pub const REQUIRED_CREATE_FIELDS: [&str; 3] = ["title", "content", "author"];

/// Author as submitted by clients.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorInput {
    #[serde(default, deserialize_with = "text")]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub last_name: Option<String>,
}

/// Body of `POST /posts`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBlogPostRequest {
    #[serde(default, deserialize_with = "text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub content: Option<String>,
    #[serde(default)]
    pub author: Option<AuthorInput>,
}

/// Body of `PUT /posts/{id}`, minus the `id` which is checked separately.
///
/// Each field distinguishes "absent" (`None`) from an explicit `null` (`Some(None)`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateBlogPostRequest {
    #[serde(default, deserialize_with = "present_text")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "present_text")]
    pub content: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub author: Option<Option<AuthorInput>>,
}

/// Cast a JSON value to text. `Ok(None)` for `null`.
pub fn cast_text(value: &Value) -> Result<Option<String>, String> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Number(n) => Ok(Some(number_text(n))),
        Value::Array(_) | Value::Object(_) => Err(format!("cannot cast {} to text", value)),
    }
}

/// Integral floats print without a fractional part (`5.0` -> `"5"`).
fn number_text(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e21 => format!("{:.0}", f),
        _ => n.to_string(),
    }
}

fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    cast_text(&value).map_err(D::Error::custom)
}

fn present_text<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    text(deserializer).map(Some)
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// First required key missing from `body`, checked in declaration order.
///
/// Presence is all that matters; `null` or empty values count as present.
pub fn first_missing_field<'a>(body: &Map<String, Value>, fields: &[&'a str]) -> Option<&'a str> {
    fields.iter().copied().find(|field| !body.contains_key(*field))
}

/// Render a JSON value the way it appears in id-mismatch messages.
pub fn describe_id(value: Option<&Value>) -> String {
    match value {
        None => "undefined".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
