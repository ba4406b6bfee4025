//! Classification of raw durable entries.
//!
//! The durable namespace is shared and unschematized, so every value read
//! back is checked before it becomes a [`Bookmark`]. A value is a bookmark
//! when it is a JSON object whose `url` is a non-empty string. The other
//! fields are read leniently so a saved link is never hidden:
//!
//! - `title`: string, else the url
//! - `scrollTop`: number rounded down, negative or non-numeric becomes 0
//! - `timestamp`: integer, else 0
//! - `favicon`: kept only when it is a string

use serde_json::{Map, Value};

use super::Bookmark;

/// Why a stored value was not accepted as a bookmark.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("value is not an object")]
    NotAnObject,

    #[error("missing or empty url")]
    MissingUrl,
}

/// Classify the value stored under `key`.
pub fn classify(key: &str, value: &Value) -> Result<Bookmark, Rejection> {
    let object = value.as_object().ok_or(Rejection::NotAnObject)?;

    let url = match object.get("url") {
        Some(Value::String(url)) if !url.is_empty() => url.clone(),
        _ => return Err(Rejection::MissingUrl),
    };

    let title = match object.get("title") {
        Some(Value::String(title)) => title.clone(),
        _ => url.clone(),
    };

    Ok(Bookmark {
        key: key.to_string(),
        url,
        title,
        scroll_top: scroll_top(object),
        timestamp: timestamp(object),
        favicon: object.get("favicon").and_then(Value::as_str).map(str::to_string),
    })
}

fn scroll_top(object: &Map<String, Value>) -> u64 {
    match object.get("scrollTop") {
        Some(Value::Number(n)) => match n.as_u64() {
            Some(v) => v,
            None => n.as_f64().filter(|v| v.is_finite() && *v > 0.0).map_or(0, |v| v.floor() as u64),
        },
        _ => 0,
    }
}

fn timestamp(object: &Map<String, Value>) -> i64 {
    object.get("timestamp").and_then(Value::as_i64).unwrap_or(0)
}
