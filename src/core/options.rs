//! Caller-facing logging options
//!
//! [`Options`] is the small set of knobs an application sets; the adapter
//! turns it into a fully wired [`Engine`](super::Engine). Nothing is
//! validated here: an unknown level falls back to `info` and an unknown
//! format fails the build.

use super::error::Result;
use serde::{Deserialize, Serialize};

pub const CONSOLE_FORMAT: &str = "console";
pub const JSON_FORMAT: &str = "json";

/// Logging options
///
/// Deserializes from camelCase keys; absent keys take the defaults of
/// [`Options::new`].
///
/// # Example
///
/// ```
/// use rust_log_facade::Options;
///
/// let options = Options::from_json(r#"{"level": "debug", "format": "json"}"#).unwrap();
/// assert_eq!(options.level, "debug");
/// assert_eq!(options.output_paths, vec!["stdout"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Options {
    /// Logical logger identity, rendered under the `logger` key
    pub name: String,
    /// debug, info, warn, error, panic or fatal
    pub level: String,
    /// `console` or `json`
    pub format: String,
    /// Color-code levels; only honoured by the console format
    pub enable_color: bool,
    pub disable_caller: bool,
    pub disable_stacktrace: bool,
    pub development: bool,
    /// Destinations for records: `stdout`, `stderr`, or file paths
    pub output_paths: Vec<String>,
    /// Destinations for the engine's own errors
    pub error_output_paths: Vec<String>,
}

impl Options {
    pub fn new() -> Self {
        Self {
            name: String::new(),
            level: "info".to_string(),
            format: CONSOLE_FORMAT.to_string(),
            enable_color: true,
            disable_caller: false,
            disable_stacktrace: false,
            development: false,
            output_paths: vec!["stdout".to_string()],
            error_output_paths: vec!["stderr".to_string()],
        }
    }

    /// Parse options from a JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl Default for Options {
    fn default() -> Self {
        Self::new()
    }
}
