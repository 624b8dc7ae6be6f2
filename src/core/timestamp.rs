//! Timestamp and duration encoding
//!
//! Records carry an ISO 8601 timestamp with millisecond precision by
//! default, and duration fields are rendered as fractional milliseconds.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Timestamp format options for the `timestamp` key
///
/// # Examples
///
/// ```
/// use rust_log_facade::core::TimestampFormat;
/// use chrono::Utc;
///
/// let format = TimestampFormat::Iso8601;
/// let timestamp = format.format(&Utc::now());
/// assert!(timestamp.ends_with('Z'));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// ISO 8601 with milliseconds: `2025-01-08T10:30:45.123Z`
    #[default]
    Iso8601,
}

impl TimestampFormat {
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> String {
        match self {
            TimestampFormat::Iso8601 => datetime.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
        }
    }

    #[must_use]
    pub fn to_json_value(&self, datetime: &DateTime<Utc>) -> serde_json::Value {
        serde_json::Value::String(self.format(datetime))
    }
}

/// Duration as fractional milliseconds
#[inline]
pub fn encode_duration_millis(duration: Duration) -> f64 {
    duration.as_nanos() as f64 / 1_000_000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_datetime() -> DateTime<Utc> {
        // 2025-01-08 10:30:45.123456 UTC
        Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45)
            .single()
            .expect("valid datetime")
            + chrono::Duration::microseconds(123456)
    }

    #[test]
    fn test_iso8601_format() {
        let result = TimestampFormat::Iso8601.format(&fixed_datetime());
        assert_eq!(result, "2025-01-08T10:30:45.123Z");
    }

    #[test]
    fn test_json_value_is_iso8601_string() {
        let value = TimestampFormat::Iso8601.to_json_value(&fixed_datetime());
        assert_eq!(value, "2025-01-08T10:30:45.123Z");
    }

    #[test]
    fn test_duration_millis() {
        assert_eq!(encode_duration_millis(Duration::from_secs(2)), 2000.0);
        assert_eq!(encode_duration_millis(Duration::from_micros(250)), 0.25);
    }
}
