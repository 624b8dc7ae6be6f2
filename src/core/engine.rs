//! Logging engine
//!
//! An [`Engine`] is built once from an [`EngineConfig`] and never
//! reconfigured in place, apart from its shared [`AtomicLevel`]. It owns the
//! encoder, the sampler and the destinations. Each destination sits behind
//! its own lock, so one record is always written whole before the next.

use super::{
    appender::Appender,
    atomic_level::AtomicLevel,
    encoder::{Encoder, EncoderConfig, Encoding},
    error::{LoggerError, Result},
    log_context::{Field, FieldValue, LogContext},
    log_entry::{Caller, LogEntry},
    log_level::LogLevel,
    sampling::{LogSampler, SamplingConfig},
};
use crate::appenders;
use chrono::Utc;
use parking_lot::Mutex;
use std::backtrace::Backtrace;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

/// Exit status used by `Fatal` records
pub const FATAL_EXIT_CODE: i32 = 1;

/// Everything needed to build an [`Engine`]
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Threshold shared with the built engine
    pub level: AtomicLevel,
    /// Development mode renders console stacktraces on their own lines
    pub development: bool,
    pub disable_caller: bool,
    /// Suppress the default stacktrace threshold (Error, or Warn in development)
    pub disable_stacktrace: bool,
    /// `None` disables sampling
    pub sampling: Option<SamplingConfig>,
    /// Registered encoding name: `console` or `json`
    pub encoding: String,
    pub encoder_config: EncoderConfig,
    pub output_paths: Vec<String>,
    pub error_output_paths: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            level: AtomicLevel::new(LogLevel::Info),
            development: false,
            disable_caller: false,
            disable_stacktrace: false,
            sampling: Some(SamplingConfig::default()),
            encoding: Encoding::Console.as_str().to_string(),
            encoder_config: EncoderConfig::default(),
            output_paths: vec!["stdout".to_string()],
            error_output_paths: vec!["stderr".to_string()],
        }
    }
}

impl EngineConfig {
    /// Open the configured destinations and build the engine
    pub fn build(&self) -> Result<Engine> {
        let outputs = appenders::open_all(&self.output_paths)?;
        let error_outputs = appenders::open_all(&self.error_output_paths)?;
        self.build_with(outputs, error_outputs)
    }

    /// Build the engine over already-opened destinations
    ///
    /// `output_paths` and `error_output_paths` are ignored.
    pub fn build_with(
        &self,
        outputs: Vec<Box<dyn Appender>>,
        error_outputs: Vec<Box<dyn Appender>>,
    ) -> Result<Engine> {
        let encoding: Encoding = self.encoding.parse()?;
        if self.encoder_config.line_ending.is_empty() {
            return Err(LoggerError::config("EncoderConfig", "line ending must not be empty"));
        }

        let encoder = Encoder::new(encoding, self.encoder_config.clone())
            .with_multiline_stacktrace(self.development);

        let stacktrace_level = if self.disable_stacktrace {
            None
        } else if self.development {
            Some(LogLevel::Warn)
        } else {
            Some(LogLevel::Error)
        };

        let core = EngineCore {
            level: self.level.clone(),
            encoder,
            sampler: self.sampling.clone().map(LogSampler::new),
            outputs: outputs.into_iter().map(Mutex::new).collect(),
            error_outputs: error_outputs.into_iter().map(Mutex::new).collect(),
            development: self.development,
            disable_caller: self.disable_caller,
        };

        Ok(Engine {
            core: Arc::new(core),
            name: String::new(),
            stacktrace_level,
        })
    }
}

struct EngineCore {
    level: AtomicLevel,
    encoder: Encoder,
    sampler: Option<LogSampler>,
    outputs: Vec<Mutex<Box<dyn Appender>>>,
    error_outputs: Vec<Mutex<Box<dyn Appender>>>,
    development: bool,
    disable_caller: bool,
}

impl EngineCore {
    fn flush_all(&self) -> Result<()> {
        let mut first_error = None;
        for appender in self.outputs.iter().chain(self.error_outputs.iter()) {
            if let Err(e) = appender.lock().flush() {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}

impl Drop for EngineCore {
    fn drop(&mut self) {
        if let Err(e) = self.flush_all() {
            eprintln!("[LOGGER ERROR] Failed to flush during shutdown: {}", e);
        }
    }
}

/// A built logging engine
///
/// Cloning is cheap; clones and [`named`](Engine::named) children share the
/// destinations, encoder, sampler and threshold.
#[derive(Clone)]
pub struct Engine {
    core: Arc<EngineCore>,
    name: String,
    stacktrace_level: Option<LogLevel>,
}

impl Engine {
    /// Child engine scoped under `name`
    ///
    /// Names nest with a `.` separator. An empty name returns an identical
    /// engine.
    #[must_use]
    pub fn named(&self, name: &str) -> Engine {
        let mut child = self.clone();
        if name.is_empty() {
            return child;
        }
        child.name = if self.name.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", self.name, name)
        };
        child
    }

    /// Capture stacktraces at `level` and above, replacing the configured threshold
    #[must_use]
    pub fn with_stacktrace_at(mut self, level: LogLevel) -> Engine {
        self.stacktrace_level = Some(level);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> &AtomicLevel {
        &self.core.level
    }

    #[inline]
    pub fn enabled(&self, level: LogLevel) -> bool {
        self.core.level.enabled(level)
    }

    pub fn is_development(&self) -> bool {
        self.core.development
    }

    pub fn encoding(&self) -> Encoding {
        self.core.encoder.encoding()
    }

    pub fn stacktrace_level(&self) -> Option<LogLevel> {
        self.stacktrace_level
    }

    /// Structured write: message plus typed fields
    pub fn log(&self, level: LogLevel, message: &str, fields: &[Field], caller: &Location<'_>) {
        if !self.enabled(level) {
            return;
        }
        self.write(level, message, LogContext::from_fields(fields), caller);
    }

    /// Formatted write; the message is only rendered when the level is enabled
    pub fn logf(&self, level: LogLevel, args: fmt::Arguments<'_>, caller: &Location<'_>) {
        if !self.enabled(level) {
            return;
        }
        self.write(level, &args.to_string(), LogContext::new(), caller);
    }

    /// Key/value write: `keys_and_values` alternates key, value, key, value...
    pub fn logw(
        &self,
        level: LogLevel,
        message: &str,
        keys_and_values: &[FieldValue],
        caller: &Location<'_>,
    ) {
        if !self.enabled(level) {
            return;
        }
        self.write(
            level,
            message,
            LogContext::from_keys_and_values(keys_and_values),
            caller,
        );
    }

    fn write(&self, level: LogLevel, message: &str, context: LogContext, caller: &Location<'_>) {
        let core = &self.core;
        if let Some(ref sampler) = core.sampler {
            if !sampler.should_sample(level, message) {
                return;
            }
        }

        let mut entry = LogEntry::new(level, message)
            .with_logger_name(self.name.as_str())
            .with_context(context);
        if !core.disable_caller {
            entry = entry.with_caller(Caller::from_location(caller));
        }
        if self.stacktrace_level.is_some_and(|threshold| level >= threshold) {
            entry = entry.with_stacktrace(Backtrace::force_capture().to_string());
        }

        let line = core.encoder.encode(&entry);
        for appender in &core.outputs {
            let mut appender = appender.lock();
            if let Err(e) = appender.append(&line) {
                let target = appender.name().to_string();
                drop(appender);
                self.report_error(&format!("write to '{}' failed: {}", target, e));
            }
        }

        // Records that precede a termination must reach the destination
        if level > LogLevel::Error {
            if let Err(e) = self.sync() {
                self.report_error(&format!("flush after {} record failed: {}", level, e));
            }
        }
    }

    /// Report an internal failure on the error outputs
    fn report_error(&self, message: &str) {
        let line = format!(
            "{} logger error: {}\n",
            Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ"),
            message
        );

        let mut reported = false;
        for appender in &self.core.error_outputs {
            let mut appender = appender.lock();
            if appender.append(&line).and_then(|_| appender.flush()).is_ok() {
                reported = true;
            }
        }
        if !reported {
            eprintln!("[LOGGER ERROR] {}", message);
        }
    }

    /// Flush every destination
    pub fn sync(&self) -> Result<()> {
        self.core.flush_all()
    }

    fn flush_before_termination(&self) {
        if let Err(e) = self.sync() {
            self.report_error(&format!("flush before termination failed: {}", e));
        }
    }

    /// Flush every destination, then unwind the calling thread with `message`
    #[track_caller]
    pub fn unwind(&self, message: &str) -> ! {
        self.flush_before_termination();
        panic!("{}", message)
    }

    /// Flush every destination, then exit the process with [`FATAL_EXIT_CODE`]
    pub fn exit(&self) -> ! {
        self.flush_before_termination();
        std::process::exit(FATAL_EXIT_CODE)
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("name", &self.name)
            .field("level", &self.core.level)
            .field("encoding", &self.core.encoder.encoding())
            .field("outputs", &self.core.outputs.len())
            .field("error_outputs", &self.core.error_outputs.len())
            .field("stacktrace_level", &self.stacktrace_level)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appenders::{MemoryAppender, MemoryBuffer};
    use crate::core::error::LoggerError;

    fn json_engine(config: EngineConfig) -> (Engine, MemoryBuffer) {
        let appender = MemoryAppender::new();
        let buffer = appender.buffer();
        let engine = EngineConfig {
            encoding: "json".to_string(),
            ..config
        }
        .build_with(vec![Box::new(appender)], Vec::new())
        .unwrap();
        (engine, buffer)
    }

    struct FailingAppender;

    impl Appender for FailingAppender {
        fn append(&mut self, _line: &str) -> Result<()> {
            Err(LoggerError::other("Simulated failure"))
        }

        fn flush(&mut self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    #[test]
    fn test_threshold_gates_records() {
        let (engine, buffer) = json_engine(EngineConfig {
            level: AtomicLevel::new(LogLevel::Warn),
            ..Default::default()
        });

        engine.log(LogLevel::Info, "dropped", &[], Location::caller());
        engine.log(LogLevel::Warn, "kept", &[], Location::caller());

        let records = buffer.json_records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["message"], "kept");
        assert_eq!(records[0]["level"], "WARN");
    }

    #[test]
    fn test_level_change_is_shared() {
        let level = AtomicLevel::new(LogLevel::Error);
        let (engine, buffer) = json_engine(EngineConfig {
            level: level.clone(),
            ..Default::default()
        });

        engine.log(LogLevel::Info, "before", &[], Location::caller());
        level.set_level(LogLevel::Debug);
        engine.log(LogLevel::Debug, "after", &[], Location::caller());

        let records = buffer.json_records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["message"], "after");
    }

    #[test]
    fn test_three_write_styles_agree() {
        let (engine, buffer) = json_engine(EngineConfig::default());

        engine.log(LogLevel::Info, "user 42", &[Field::new("id", 42)], Location::caller());
        engine.logf(LogLevel::Info, format_args!("user {}", 42), Location::caller());
        engine.logw(LogLevel::Info, "user 42", &["id".into(), 42.into()], Location::caller());

        let records = buffer.json_records();
        assert_eq!(records.len(), 3);
        for record in &records {
            assert_eq!(record["level"], "INFO");
            assert_eq!(record["message"], "user 42");
        }
        assert_eq!(records[0]["id"], records[2]["id"]);
    }

    #[test]
    fn test_named_children() {
        let (engine, buffer) = json_engine(EngineConfig::default());
        let child = engine.named("api").named("auth");

        child.log(LogLevel::Info, "login", &[], Location::caller());
        engine.named("").log(LogLevel::Info, "root", &[], Location::caller());

        let records = buffer.json_records();
        assert_eq!(records[0]["logger"], "api.auth");
        assert!(records[1].get("logger").is_none());
    }

    #[test]
    fn test_caller_and_disable_caller() {
        let (engine, buffer) = json_engine(EngineConfig::default());
        engine.log(LogLevel::Info, "with caller", &[], Location::caller());
        let caller = buffer.json_records()[0]["caller"].as_str().unwrap().to_string();
        assert!(caller.starts_with("core/engine.rs:"));

        let (engine, buffer) = json_engine(EngineConfig {
            disable_caller: true,
            ..Default::default()
        });
        engine.log(LogLevel::Info, "no caller", &[], Location::caller());
        assert!(buffer.json_records()[0].get("caller").is_none());
    }

    #[test]
    fn test_stacktrace_thresholds() {
        let (engine, buffer) = json_engine(EngineConfig::default());
        engine.log(LogLevel::Warn, "warn", &[], Location::caller());
        engine.log(LogLevel::Error, "error", &[], Location::caller());
        let records = buffer.json_records();
        assert!(records[0].get("stacktrace").is_none());
        assert!(records[1]["stacktrace"].is_string());

        let (engine, buffer) = json_engine(EngineConfig {
            disable_stacktrace: true,
            ..Default::default()
        });
        let engine = engine.with_stacktrace_at(LogLevel::Panic);
        engine.log(LogLevel::Error, "error", &[], Location::caller());
        engine.log(LogLevel::Panic, "panic", &[], Location::caller());
        let records = buffer.json_records();
        assert!(records[0].get("stacktrace").is_none());
        assert!(records[1]["stacktrace"].is_string());
    }

    #[test]
    fn test_sampling_applied() {
        let (engine, buffer) = json_engine(EngineConfig {
            sampling: Some(SamplingConfig::new(2, 0)),
            ..Default::default()
        });
        for _ in 0..5 {
            engine.log(LogLevel::Info, "repeated", &[], Location::caller());
        }
        engine.log(LogLevel::Info, "distinct", &[], Location::caller());
        assert_eq!(buffer.len(), 3);

        let (engine, buffer) = json_engine(EngineConfig {
            sampling: None,
            ..Default::default()
        });
        for _ in 0..500 {
            engine.log(LogLevel::Info, "repeated", &[], Location::caller());
        }
        assert_eq!(buffer.len(), 500);
    }

    #[test]
    fn test_unknown_encoding_fails_build() {
        let result = EngineConfig {
            encoding: "yaml".to_string(),
            ..Default::default()
        }
        .build_with(Vec::new(), Vec::new());
        assert!(matches!(result, Err(LoggerError::UnknownEncoding(_))));
    }

    #[test]
    fn test_empty_line_ending_fails_build() {
        let mut config = EngineConfig::default();
        config.encoder_config.line_ending = String::new();
        assert!(matches!(
            config.build_with(Vec::new(), Vec::new()),
            Err(LoggerError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_write_failure_reported_on_error_output() {
        let errors = MemoryAppender::new();
        let error_buffer = errors.buffer();
        let engine = EngineConfig::default()
            .build_with(vec![Box::new(FailingAppender)], vec![Box::new(errors)])
            .unwrap();

        engine.log(LogLevel::Info, "lost", &[], Location::caller());

        let lines = error_buffer.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("write to 'failing' failed"));
        assert!(lines[0].contains("Simulated failure"));
    }

    struct UnflushableAppender;

    impl Appender for UnflushableAppender {
        fn append(&mut self, _line: &str) -> Result<()> {
            Ok(())
        }

        fn flush(&mut self) -> Result<()> {
            Err(LoggerError::other("Simulated flush failure"))
        }

        fn name(&self) -> &str {
            "unflushable"
        }
    }

    #[test]
    fn test_flush_failure_after_panic_record_is_reported() {
        let errors = MemoryAppender::new();
        let error_buffer = errors.buffer();
        let engine = EngineConfig::default()
            .build_with(vec![Box::new(UnflushableAppender)], vec![Box::new(errors)])
            .unwrap();

        engine.log(LogLevel::Info, "buffered", &[], Location::caller());
        assert!(error_buffer.lines().is_empty());

        engine.log(LogLevel::Panic, "going down", &[], Location::caller());

        let lines = error_buffer.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("flush after PANIC record failed"));
        assert!(lines[0].contains("Simulated flush failure"));
    }

    #[test]
    fn test_unwind_panics_with_message() {
        let (engine, _buffer) = json_engine(EngineConfig::default());
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            engine.unwind("boom")
        }));
        let payload = result.unwrap_err();
        assert_eq!(payload.downcast_ref::<String>().map(String::as_str), Some("boom"));
    }

    #[test]
    fn test_build_opens_file_destinations() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("engine.log");
        let engine = EngineConfig {
            output_paths: vec![path.to_str().unwrap().to_string()],
            ..Default::default()
        }
        .build()
        .unwrap();

        engine.log(LogLevel::Info, "to file", &[], Location::caller());
        engine.sync().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("to file"));
    }
}
