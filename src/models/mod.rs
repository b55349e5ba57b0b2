//! Wire and domain models for the forum API.

mod post;
mod thread;

pub use post::{Post, PostReply};
pub use thread::{Pagination, Thread, ThreadId, ThreadInfo};

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer};

/// Deserialize a string that might be null, defaulting to empty string.
pub(crate) fn deserialize_nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(|opt| opt.unwrap_or_default())
}

/// Deserialize an optional unix timestamp (seconds) into a `DateTime<Utc>`.
///
/// Null, zero and out-of-range values map to `None`.
pub(crate) fn deserialize_timestamp<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let secs = Option::<i64>::deserialize(deserializer)?;
    Ok(secs
        .filter(|s| *s > 0)
        .and_then(|s| Utc.timestamp_opt(s, 0).single()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Stamped {
        #[serde(default, deserialize_with = "deserialize_timestamp")]
        at: Option<DateTime<Utc>>,
    }

    #[test]
    fn test_timestamp_zero_is_none() {
        let s: Stamped = serde_json::from_str(r#"{"at": 0}"#).unwrap();
        assert!(s.at.is_none());
    }

    #[test]
    fn test_timestamp_missing_is_none() {
        let s: Stamped = serde_json::from_str("{}").unwrap();
        assert!(s.at.is_none());
    }

    #[test]
    fn test_timestamp_value() {
        let s: Stamped = serde_json::from_str(r#"{"at": 86400}"#).unwrap();
        assert_eq!(s.at.unwrap().timestamp(), 86400);
    }
}
