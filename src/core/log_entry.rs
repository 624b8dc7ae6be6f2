//! Log entry structure

use super::log_context::LogContext;
use super::log_level::LogLevel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::panic::Location;

/// Call site of a logging call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Caller {
    pub file: String,
    pub line: u32,
}

impl Caller {
    pub fn from_location(location: &Location<'_>) -> Self {
        Self {
            file: location.file().to_string(),
            line: location.line(),
        }
    }

    /// `<parent dir>/<file>:<line>`, the last two path components only
    pub fn short(&self) -> String {
        let is_sep = |c: char| c == '/' || c == '\\';
        let trimmed = match self.file.rfind(is_sep) {
            Some(last) => match self.file[..last].rfind(is_sep) {
                Some(prev) => &self.file[prev + 1..],
                None => self.file.as_str(),
            },
            None => self.file.as_str(),
        };
        format!("{}:{}", trimmed, self.line)
    }
}

impl fmt::Display for Caller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    /// Logical logger identity, empty when unnamed
    pub logger_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caller: Option<Caller>,
    pub context: LogContext,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stacktrace: Option<String>,
}

impl LogEntry {
    /// Escape newlines, carriage returns and tabs so a line-oriented
    /// record cannot be split or forged by its own text
    pub(crate) fn sanitize_message(message: &str) -> String {
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            timestamp: Utc::now(),
            logger_name: String::new(),
            caller: None,
            context: LogContext::new(),
            stacktrace: None,
        }
    }

    pub fn with_logger_name(mut self, name: impl Into<String>) -> Self {
        self.logger_name = name.into();
        self
    }

    pub fn with_caller(mut self, caller: Caller) -> Self {
        self.caller = Some(caller);
        self
    }

    pub fn with_context(mut self, context: LogContext) -> Self {
        self.context = context;
        self
    }

    pub fn with_stacktrace(mut self, stacktrace: impl Into<String>) -> Self {
        self.stacktrace = Some(stacktrace.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_is_kept_raw() {
        let entry = LogEntry::new(LogLevel::Info, "line one\nFAKE ERROR\tx\r");
        assert_eq!(entry.message, "line one\nFAKE ERROR\tx\r");
    }

    #[test]
    fn test_sanitize_message() {
        assert_eq!(
            LogEntry::sanitize_message("line one\nFAKE ERROR\tx\r"),
            "line one\\nFAKE ERROR\\tx\\r"
        );
    }

    #[test]
    fn test_short_caller() {
        let caller = Caller {
            file: "src/service/handler.rs".to_string(),
            line: 42,
        };
        assert_eq!(caller.short(), "service/handler.rs:42");

        let caller = Caller {
            file: "main.rs".to_string(),
            line: 7,
        };
        assert_eq!(caller.short(), "main.rs:7");

        let caller = Caller {
            file: "src\\win\\path.rs".to_string(),
            line: 1,
        };
        assert_eq!(caller.short(), "win\\path.rs:1");
    }

    #[test]
    fn test_caller_from_location() {
        let caller = Caller::from_location(Location::caller());
        assert!(caller.line > 0);
        assert!(!caller.file.is_empty());
    }
}
