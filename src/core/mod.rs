//! Core logger types and traits

pub mod adapter;
pub mod appender;
pub mod atomic_level;
pub mod encoder;
pub mod engine;
pub mod error;
pub mod log_context;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod options;
pub mod sampling;
pub mod timestamp;

pub use appender::Appender;
pub use atomic_level::AtomicLevel;
pub use encoder::{CallerEncoder, Encoder, EncoderConfig, Encoding, LevelEncoder, FIELD_KEY_PREFIX};
pub use engine::{Engine, EngineConfig, FATAL_EXIT_CODE};
pub use error::{LoggerError, Result};
pub use log_context::{Field, FieldValue, LogContext, IGNORED_KEY};
pub use log_entry::{Caller, LogEntry};
pub use log_level::LogLevel;
pub use logger::{Logger, StructuredLogger};
pub use options::{Options, CONSOLE_FORMAT, JSON_FORMAT};
pub use sampling::{LogSampler, SamplingConfig};
pub use timestamp::TimestampFormat;
