//! Logger facade
//!
//! [`Logger`] is the logging contract application code depends on. Every
//! severity comes in three styles over the same engine:
//!
//! - `info(msg, fields)`: message plus typed [`Field`]s
//! - `infof(format_args!(...))`: formatted message, no fields
//! - `infow(msg, keys_and_values)`: message plus alternating key/value pairs
//!
//! `panic*` methods write the record and then unwind; `fatal*` methods write
//! the record and then exit the process. Both happen even when the record
//! itself is filtered out by the threshold.
//!
//! All methods carry `#[track_caller]`, so the `caller` of a record is the
//! application's call site.

use super::{
    adapter,
    appender::Appender,
    atomic_level::AtomicLevel,
    engine::Engine,
    error::Result,
    log_context::{Field, FieldValue},
    log_level::LogLevel,
    options::Options,
};
use std::fmt;
use std::panic::Location;

/// The logging contract
pub trait Logger: Send + Sync {
    #[track_caller]
    fn debug(&self, msg: &str, fields: &[Field]);
    #[track_caller]
    fn debugf(&self, args: fmt::Arguments<'_>);
    #[track_caller]
    fn debugw(&self, msg: &str, keys_and_values: &[FieldValue]);

    #[track_caller]
    fn info(&self, msg: &str, fields: &[Field]);
    #[track_caller]
    fn infof(&self, args: fmt::Arguments<'_>);
    #[track_caller]
    fn infow(&self, msg: &str, keys_and_values: &[FieldValue]);

    #[track_caller]
    fn warn(&self, msg: &str, fields: &[Field]);
    #[track_caller]
    fn warnf(&self, args: fmt::Arguments<'_>);
    #[track_caller]
    fn warnw(&self, msg: &str, keys_and_values: &[FieldValue]);

    #[track_caller]
    fn error(&self, msg: &str, fields: &[Field]);
    #[track_caller]
    fn errorf(&self, args: fmt::Arguments<'_>);
    #[track_caller]
    fn errorw(&self, msg: &str, keys_and_values: &[FieldValue]);

    #[track_caller]
    fn panic(&self, msg: &str, fields: &[Field]) -> !;
    #[track_caller]
    fn panicf(&self, args: fmt::Arguments<'_>) -> !;
    #[track_caller]
    fn panicw(&self, msg: &str, keys_and_values: &[FieldValue]) -> !;

    #[track_caller]
    fn fatal(&self, msg: &str, fields: &[Field]) -> !;
    #[track_caller]
    fn fatalf(&self, args: fmt::Arguments<'_>) -> !;
    #[track_caller]
    fn fatalw(&self, msg: &str, keys_and_values: &[FieldValue]) -> !;
}

/// [`Logger`] backed by a built [`Engine`]
///
/// # Example
///
/// ```
/// use rust_log_facade::prelude::*;
///
/// let logger = StructuredLogger::new(Options {
///     name: "api".to_string(),
///     format: "json".to_string(),
///     ..Options::new()
/// });
///
/// logger.info("server started", &[Field::new("port", 8080)]);
/// logger.infof(format_args!("listening on {}", 8080));
/// logger.infow("server started", &["port".into(), 8080.into()]);
/// ```
#[derive(Debug, Clone)]
pub struct StructuredLogger {
    engine: Engine,
}

impl StructuredLogger {
    /// Build a logger from `options`
    ///
    /// # Panics
    ///
    /// When a destination cannot be opened or the format is unknown.
    pub fn new(options: Options) -> Self {
        Self {
            engine: adapter::build(&options),
        }
    }

    pub fn try_new(options: Options) -> Result<Self> {
        Ok(Self {
            engine: adapter::try_build(&options)?,
        })
    }

    /// Build a logger writing to caller-supplied destinations
    pub fn with_appenders(
        options: Options,
        outputs: Vec<Box<dyn Appender>>,
        error_outputs: Vec<Box<dyn Appender>>,
    ) -> Result<Self> {
        Ok(Self {
            engine: adapter::try_build_with(&options, outputs, error_outputs)?,
        })
    }

    pub fn from_engine(engine: Engine) -> Self {
        Self { engine }
    }

    /// Child logger scoped under `name`, sharing destinations and threshold
    #[must_use]
    pub fn named(&self, name: &str) -> Self {
        Self {
            engine: self.engine.named(name),
        }
    }

    /// Runtime-adjustable threshold
    pub fn level(&self) -> &AtomicLevel {
        self.engine.level()
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Flush buffered records to every destination
    pub fn sync(&self) -> Result<()> {
        self.engine.sync()
    }

    #[track_caller]
    fn unwind_after(&self, level: LogLevel, msg: &str) -> ! {
        match level {
            LogLevel::Fatal => self.engine.exit(),
            _ => self.engine.unwind(msg),
        }
    }
}

impl Logger for StructuredLogger {
    #[track_caller]
    fn debug(&self, msg: &str, fields: &[Field]) {
        self.engine.log(LogLevel::Debug, msg, fields, Location::caller());
    }

    #[track_caller]
    fn debugf(&self, args: fmt::Arguments<'_>) {
        self.engine.logf(LogLevel::Debug, args, Location::caller());
    }

    #[track_caller]
    fn debugw(&self, msg: &str, keys_and_values: &[FieldValue]) {
        self.engine.logw(LogLevel::Debug, msg, keys_and_values, Location::caller());
    }

    #[track_caller]
    fn info(&self, msg: &str, fields: &[Field]) {
        self.engine.log(LogLevel::Info, msg, fields, Location::caller());
    }

    #[track_caller]
    fn infof(&self, args: fmt::Arguments<'_>) {
        self.engine.logf(LogLevel::Info, args, Location::caller());
    }

    #[track_caller]
    fn infow(&self, msg: &str, keys_and_values: &[FieldValue]) {
        self.engine.logw(LogLevel::Info, msg, keys_and_values, Location::caller());
    }

    #[track_caller]
    fn warn(&self, msg: &str, fields: &[Field]) {
        self.engine.log(LogLevel::Warn, msg, fields, Location::caller());
    }

    #[track_caller]
    fn warnf(&self, args: fmt::Arguments<'_>) {
        self.engine.logf(LogLevel::Warn, args, Location::caller());
    }

    #[track_caller]
    fn warnw(&self, msg: &str, keys_and_values: &[FieldValue]) {
        self.engine.logw(LogLevel::Warn, msg, keys_and_values, Location::caller());
    }

    #[track_caller]
    fn error(&self, msg: &str, fields: &[Field]) {
        self.engine.log(LogLevel::Error, msg, fields, Location::caller());
    }

    #[track_caller]
    fn errorf(&self, args: fmt::Arguments<'_>) {
        self.engine.logf(LogLevel::Error, args, Location::caller());
    }

    #[track_caller]
    fn errorw(&self, msg: &str, keys_and_values: &[FieldValue]) {
        self.engine.logw(LogLevel::Error, msg, keys_and_values, Location::caller());
    }

    #[track_caller]
    fn panic(&self, msg: &str, fields: &[Field]) -> ! {
        self.engine.log(LogLevel::Panic, msg, fields, Location::caller());
        self.unwind_after(LogLevel::Panic, msg)
    }

    #[track_caller]
    fn panicf(&self, args: fmt::Arguments<'_>) -> ! {
        // Formatted unconditionally: the message is also the panic payload
        let msg = args.to_string();
        self.engine.log(LogLevel::Panic, &msg, &[], Location::caller());
        self.unwind_after(LogLevel::Panic, &msg)
    }

    #[track_caller]
    fn panicw(&self, msg: &str, keys_and_values: &[FieldValue]) -> ! {
        self.engine.logw(LogLevel::Panic, msg, keys_and_values, Location::caller());
        self.unwind_after(LogLevel::Panic, msg)
    }

    #[track_caller]
    fn fatal(&self, msg: &str, fields: &[Field]) -> ! {
        self.engine.log(LogLevel::Fatal, msg, fields, Location::caller());
        self.unwind_after(LogLevel::Fatal, msg)
    }

    #[track_caller]
    fn fatalf(&self, args: fmt::Arguments<'_>) -> ! {
        self.engine.logf(LogLevel::Fatal, args, Location::caller());
        self.unwind_after(LogLevel::Fatal, "")
    }

    #[track_caller]
    fn fatalw(&self, msg: &str, keys_and_values: &[FieldValue]) -> ! {
        self.engine.logw(LogLevel::Fatal, msg, keys_and_values, Location::caller());
        self.unwind_after(LogLevel::Fatal, msg)
    }
}
