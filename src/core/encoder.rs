//! Record encoding
//!
//! Two encodings are registered:
//! - `console`: tab-separated human-readable line, fields as a JSON object
//! - `json`: one JSON object per line
//!
//! Key names, line ending and per-element renderers come from
//! [`EncoderConfig`].

use super::error::{LoggerError, Result};
use super::log_entry::LogEntry;
use super::timestamp::TimestampFormat;
use colored::Colorize;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_LINE_ENDING: &str = "\n";

/// Prefix given to a JSON field whose key collides with a record key
pub const FIELD_KEY_PREFIX: &str = "fields.";

/// How the level is rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LevelEncoder {
    /// `INFO`
    #[default]
    Capital,
    /// `INFO` wrapped in terminal color codes; console encoding only
    CapitalColor,
}

/// How the call site is rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CallerEncoder {
    /// `dir/file.rs:42`
    #[default]
    Short,
    /// Full path as compiled
    Full,
}

/// Key names and element renderers shared by both encodings
///
/// An empty key omits that element from the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncoderConfig {
    pub message_key: String,
    pub level_key: String,
    pub time_key: String,
    pub name_key: String,
    pub caller_key: String,
    pub stacktrace_key: String,
    pub line_ending: String,
    pub level_encoder: LevelEncoder,
    pub time_encoder: TimestampFormat,
    pub caller_encoder: CallerEncoder,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            message_key: "message".to_string(),
            level_key: "level".to_string(),
            time_key: "timestamp".to_string(),
            name_key: "logger".to_string(),
            caller_key: "caller".to_string(),
            stacktrace_key: "stacktrace".to_string(),
            line_ending: DEFAULT_LINE_ENDING.to_string(),
            level_encoder: LevelEncoder::Capital,
            time_encoder: TimestampFormat::Iso8601,
            caller_encoder: CallerEncoder::Short,
        }
    }
}

impl EncoderConfig {
    /// Whether `key` names one of the record's own elements
    pub fn is_reserved(&self, key: &str) -> bool {
        !key.is_empty()
            && [
                &self.message_key,
                &self.level_key,
                &self.time_key,
                &self.name_key,
                &self.caller_key,
                &self.stacktrace_key,
            ]
            .iter()
            .any(|reserved| reserved.as_str() == key)
    }
}

/// Registered encodings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Encoding {
    /// Line-oriented human-readable text (default)
    ///
    /// Example: `2025-01-08T10:30:45.123Z	INFO	api	http/server.rs:88	Request processed	{"status":200}`
    #[default]
    Console,

    /// JSON format for machine processing
    ///
    /// Example: `{"level":"INFO","timestamp":"2025-01-08T10:30:45.123Z","message":"Request processed"}`
    Json,
}

impl Encoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            Encoding::Console => "console",
            Encoding::Json => "json",
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Encoding {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "console" => Ok(Encoding::Console),
            "json" => Ok(Encoding::Json),
            other => Err(LoggerError::unknown_encoding(other)),
        }
    }
}

/// Turns entries into output lines
#[derive(Debug, Clone)]
pub struct Encoder {
    encoding: Encoding,
    config: EncoderConfig,
    multiline_stacktrace: bool,
}

impl Encoder {
    pub fn new(encoding: Encoding, config: EncoderConfig) -> Self {
        Self {
            encoding,
            config,
            multiline_stacktrace: false,
        }
    }

    /// Render console stacktraces on their own lines instead of escaping them
    #[must_use]
    pub fn with_multiline_stacktrace(mut self, multiline: bool) -> Self {
        self.multiline_stacktrace = multiline;
        self
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// Encode one entry, line ending included
    pub fn encode(&self, entry: &LogEntry) -> String {
        let mut line = match self.encoding {
            Encoding::Console => self.encode_console(entry),
            Encoding::Json => self.encode_json(entry),
        };
        line.push_str(&self.config.line_ending);
        line
    }

    fn encode_console(&self, entry: &LogEntry) -> String {
        let config = &self.config;
        let mut parts: Vec<String> = Vec::with_capacity(6);

        if !config.time_key.is_empty() {
            parts.push(config.time_encoder.format(&entry.timestamp));
        }
        if !config.level_key.is_empty() {
            let level = entry.level.to_str();
            parts.push(match config.level_encoder {
                LevelEncoder::Capital => level.to_string(),
                LevelEncoder::CapitalColor => level.color(entry.level.color_code()).to_string(),
            });
        }
        if !config.name_key.is_empty() && !entry.logger_name.is_empty() {
            parts.push(entry.logger_name.clone());
        }
        if let Some(caller) = self.caller(entry) {
            parts.push(caller);
        }
        if !config.message_key.is_empty() {
            parts.push(LogEntry::sanitize_message(&entry.message));
        }
        if !entry.context.is_empty() {
            let fields = serde_json::Value::Object(entry.context.to_json_map());
            parts.push(fields.to_string());
        }

        let mut line = parts.join("\t");

        if let Some(stacktrace) = entry.stacktrace.as_ref().filter(|_| !config.stacktrace_key.is_empty()) {
            if self.multiline_stacktrace {
                line.push('\n');
                line.push_str(stacktrace.trim_end());
            } else {
                line.push('\t');
                line.push_str(&LogEntry::sanitize_message(stacktrace.trim_end()));
            }
        }

        line
    }

    fn encode_json(&self, entry: &LogEntry) -> String {
        let config = &self.config;
        let mut json_obj = serde_json::Map::new();

        // Color codes never go into JSON
        if !config.level_key.is_empty() {
            json_obj.insert(
                config.level_key.clone(),
                serde_json::Value::String(entry.level.to_str().to_string()),
            );
        }
        if !config.time_key.is_empty() {
            json_obj.insert(
                config.time_key.clone(),
                config.time_encoder.to_json_value(&entry.timestamp),
            );
        }
        if !config.name_key.is_empty() && !entry.logger_name.is_empty() {
            json_obj.insert(
                config.name_key.clone(),
                serde_json::Value::String(entry.logger_name.clone()),
            );
        }
        if let Some(caller) = self.caller(entry) {
            json_obj.insert(config.caller_key.clone(), serde_json::Value::String(caller));
        }
        if !config.message_key.is_empty() {
            json_obj.insert(
                config.message_key.clone(),
                serde_json::Value::String(entry.message.clone()),
            );
        }
        if let Some(ref stacktrace) = entry.stacktrace {
            if !config.stacktrace_key.is_empty() {
                json_obj.insert(
                    config.stacktrace_key.clone(),
                    serde_json::Value::String(stacktrace.clone()),
                );
            }
        }

        // User keys never replace the record's own elements
        for (key, value) in entry.context.to_json_map() {
            if config.is_reserved(&key) {
                json_obj.insert(format!("{}{}", FIELD_KEY_PREFIX, key), value);
            } else {
                json_obj.insert(key, value);
            }
        }

        serde_json::Value::Object(json_obj).to_string()
    }

    fn caller(&self, entry: &LogEntry) -> Option<String> {
        if self.config.caller_key.is_empty() {
            return None;
        }
        entry.caller.as_ref().map(|caller| match self.config.caller_encoder {
            CallerEncoder::Short => caller.short(),
            CallerEncoder::Full => caller.to_string(),
        })
    }
}
