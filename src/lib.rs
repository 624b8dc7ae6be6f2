//! # Rust Log Facade
//!
//! A structured logging facade with a process-wide default logger.
//!
//! ## Features
//!
//! - **Three call styles**: typed fields, formatted messages, and alternating
//!   key/value pairs at every level
//! - **Small configuration surface**: [`Options`] maps onto a fully wired
//!   engine (threshold, encoding, destinations, color, caller, sampling)
//! - **Process-wide default**: lazily built, atomically swapped by
//!   [`global::init`], read without locking
//! - **Terminating levels**: `panic*` unwinds and `fatal*` exits after the
//!   record is written and flushed
//!
//! ## Example
//!
//! ```
//! use rust_log_facade::prelude::*;
//!
//! let logger = StructuredLogger::new(Options {
//!     name: "payments".to_string(),
//!     level: "debug".to_string(),
//!     format: "json".to_string(),
//!     ..Options::new()
//! });
//!
//! logger.debug("charge created", &[Field::new("amount", 1250)]);
//! logger.warnw("retrying", &["attempt".into(), 2.into()]);
//!
//! let db = logger.named("db");
//! db.errorf(format_args!("query took {} ms", 1200));
//! ```

pub mod appenders;
pub mod core;
pub mod global;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, FileAppender, MemoryAppender};
    pub use crate::core::{
        Appender, AtomicLevel, Field, FieldValue, LogContext, LogEntry, LogLevel, Logger,
        LoggerError, Options, Result, StructuredLogger,
    };
    pub use crate::global;
}

pub use appenders::{ConsoleAppender, FileAppender, MemoryAppender, MemoryBuffer};
pub use core::{
    Appender, AtomicLevel, Engine, EngineConfig, Field, FieldValue, LogContext, LogEntry,
    LogLevel, LogSampler, Logger, LoggerError, Options, Result, SamplingConfig,
    StructuredLogger,
};
pub use global::{
    debug, debugf, debugln, debugw, default_logger, error, errorf, errorln, errorw, fatal,
    fatalf, fatalln, fatalw, info, infof, infoln, infow, init, new, panic, panicf, panicln,
    panicw, sync, warn, warnf, warnln, warnw,
};
