//! Stock formatters for [`Presentation::format`](crate::Presentation::format).
//!
//! Each formatter only touches the JSON type it understands and returns anything else
//! unchanged, so a formatter on an optional attribute leaves `null` alone.

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::warn;

fn map_str(value: Value, f: impl FnOnce(&str) -> String) -> Value {
    match value {
        Value::String(s) => Value::String(f(&s)),
        other => other,
    }
}

pub fn uppercase(value: Value) -> Value {
    map_str(value, str::to_uppercase)
}

pub fn lowercase(value: Value) -> Value {
    map_str(value, str::to_lowercase)
}

/// Uppercases the first letter of every whitespace-separated word.
pub fn capitalize(value: Value) -> Value {
    map_str(value, |s| {
        let mut out = String::with_capacity(s.len());
        let mut at_word_start = true;
        for c in s.chars() {
            if at_word_start && !c.is_whitespace() {
                out.extend(c.to_uppercase());
                at_word_start = false;
            } else {
                if c.is_whitespace() {
                    at_word_start = true;
                }
                out.push(c);
            }
        }
        out
    })
}

fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Formats an RFC 3339 timestamp with a chrono format string.
///
/// A format string chrono cannot parse is logged once and the formatter then returns
/// every value unchanged.
///
/// ```rust
/// use autopresenter::formatters;
/// use serde_json::json;
///
/// let short = formatters::date("%Y-%m-%d");
/// assert_eq!(short(json!("2024-05-04T12:00:00Z")), json!("2024-05-04"));
/// assert_eq!(short(json!("not a date")), json!("not a date"));
/// ```
pub fn date(format: &str) -> impl Fn(Value) -> Value + Send + Sync + 'static {
    let valid = !StrftimeItems::new(format).any(|item| matches!(item, Item::Error));
    if !valid {
        warn!(format, "invalid date format, dates will be left as is");
    }
    let format = format.to_string();
    move |value| {
        if !valid {
            return value;
        }
        let parsed = value.as_str().and_then(parse_timestamp);
        match parsed {
            Some(dt) => Value::String(dt.format(&format).to_string()),
            None => value,
        }
    }
}

/// Renders an RFC 3339 timestamp relative to now ("3 hours ago").
pub fn time_ago(value: Value) -> Value {
    time_ago_from(value, Utc::now())
}

fn time_ago_from(value: Value, now: DateTime<Utc>) -> Value {
    let parsed = value.as_str().and_then(parse_timestamp);
    match parsed {
        Some(dt) => {
            let duration = now.signed_duration_since(dt);
            let formatter = timeago::Formatter::new();
            Value::String(formatter.convert(duration.to_std().unwrap_or_default()))
        }
        None => value,
    }
}

/// Replaces `null` with a fallback.
pub fn default_to(fallback: impl Into<Value>) -> impl Fn(Value) -> Value + Send + Sync + 'static {
    let fallback = fallback.into();
    move |value| match value {
        Value::Null => fallback.clone(),
        other => other,
    }
}
