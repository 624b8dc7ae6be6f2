//! Logging macros for ergonomic log message formatting.
//!
//! The `*f!` macros format their message like `format!` and log it either
//! through the process-wide default or, with the `logger =>` prefix, through
//! an explicit [`Logger`](crate::core::Logger). The `*ln!` macros join their
//! arguments with a space and log through the default.
//!
//! # Examples
//!
//! ```
//! use rust_log_facade::prelude::*;
//! use rust_log_facade::{fields, infof, infoln, kv};
//!
//! let logger = StructuredLogger::new(Options::new());
//!
//! // Formatted, through an explicit logger
//! let port = 8080;
//! infof!(logger => "server listening on port {}", port);
//!
//! // Formatted, through the default
//! infof!("server listening on port {}", port);
//!
//! // Space-joined, through the default
//! infoln!("server", "listening on", port);
//!
//! // Typed fields and key/value pairs
//! logger.info("request", &fields!["method" => "GET", "status" => 200]);
//! logger.infow("request", &kv!["method", "GET", "status", 200]);
//! ```

/// Build an array of [`Field`](crate::core::Field)s from `key => value` pairs.
///
/// # Examples
///
/// ```
/// use rust_log_facade::fields;
///
/// let fields = fields!["user" => "alice", "attempts" => 3];
/// assert_eq!(fields.len(), 2);
/// assert_eq!(fields[0].key, "user");
/// ```
#[macro_export]
macro_rules! fields {
    ($($key:expr => $value:expr),* $(,)?) => {
        [$($crate::core::Field::new($key, $value)),*]
    };
}

/// Build an alternating key/value array of [`FieldValue`](crate::core::FieldValue)s.
///
/// # Examples
///
/// ```
/// use rust_log_facade::kv;
///
/// let pairs = kv!["user", "alice", "attempts", 3];
/// assert_eq!(pairs.len(), 4);
/// ```
#[macro_export]
macro_rules! kv {
    ($($item:expr),* $(,)?) => {
        [$($crate::core::FieldValue::from($item)),*]
    };
}

/// Log a formatted debug-level message.
///
/// # Examples
///
/// ```
/// # use rust_log_facade::prelude::*;
/// # let logger = StructuredLogger::new(Options { level: "debug".to_string(), ..Options::new() });
/// use rust_log_facade::debugf;
/// debugf!(logger => "cache size: {}", 10);
/// debugf!("cache size: {}", 10);
/// ```
#[macro_export]
macro_rules! debugf {
    ($logger:expr => $($arg:tt)+) => {
        $crate::core::Logger::debugf(&$logger, format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::global::debugf(format_args!($($arg)+))
    };
}

/// Log a formatted info-level message.
#[macro_export]
macro_rules! infof {
    ($logger:expr => $($arg:tt)+) => {
        $crate::core::Logger::infof(&$logger, format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::global::infof(format_args!($($arg)+))
    };
}

/// Log a formatted warn-level message.
///
/// # Examples
///
/// ```
/// # use rust_log_facade::prelude::*;
/// # let logger = StructuredLogger::new(Options::new());
/// use rust_log_facade::warnf;
/// warnf!(logger => "retry {} of {}", 1, 3);
/// ```
#[macro_export]
macro_rules! warnf {
    ($logger:expr => $($arg:tt)+) => {
        $crate::core::Logger::warnf(&$logger, format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::global::warnf(format_args!($($arg)+))
    };
}

/// Log a formatted error-level message.
#[macro_export]
macro_rules! errorf {
    ($logger:expr => $($arg:tt)+) => {
        $crate::core::Logger::errorf(&$logger, format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::global::errorf(format_args!($($arg)+))
    };
}

/// Log a formatted panic-level message, then unwind.
///
/// # Examples
///
/// ```should_panic
/// # use rust_log_facade::prelude::*;
/// # let logger = StructuredLogger::new(Options::new());
/// use rust_log_facade::panicf;
/// panicf!(logger => "invariant violated: {}", "negative balance");
/// ```
#[macro_export]
macro_rules! panicf {
    ($logger:expr => $($arg:tt)+) => {
        $crate::core::Logger::panicf(&$logger, format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::global::panicf(format_args!($($arg)+))
    };
}

/// Log a formatted fatal-level message, then exit the process.
#[macro_export]
macro_rules! fatalf {
    ($logger:expr => $($arg:tt)+) => {
        $crate::core::Logger::fatalf(&$logger, format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::global::fatalf(format_args!($($arg)+))
    };
}

/// Log space-joined arguments at debug level through the default logger.
#[macro_export]
macro_rules! debugln {
    ($($arg:expr),* $(,)?) => {
        $crate::global::debugln(&[$(&$arg as &dyn ::std::fmt::Display),*])
    };
}

/// Log space-joined arguments at info level through the default logger.
///
/// # Examples
///
/// ```
/// use rust_log_facade::infoln;
/// infoln!("processed", 64, "items in", 1.5, "s");
/// ```
#[macro_export]
macro_rules! infoln {
    ($($arg:expr),* $(,)?) => {
        $crate::global::infoln(&[$(&$arg as &dyn ::std::fmt::Display),*])
    };
}

/// Log space-joined arguments at warn level through the default logger.
#[macro_export]
macro_rules! warnln {
    ($($arg:expr),* $(,)?) => {
        $crate::global::warnln(&[$(&$arg as &dyn ::std::fmt::Display),*])
    };
}

/// Log space-joined arguments at error level through the default logger.
#[macro_export]
macro_rules! errorln {
    ($($arg:expr),* $(,)?) => {
        $crate::global::errorln(&[$(&$arg as &dyn ::std::fmt::Display),*])
    };
}

/// Log space-joined arguments at panic level through the default logger, then unwind.
#[macro_export]
macro_rules! panicln {
    ($($arg:expr),* $(,)?) => {
        $crate::global::panicln(&[$(&$arg as &dyn ::std::fmt::Display),*])
    };
}

/// Log space-joined arguments at fatal level through the default logger, then exit.
#[macro_export]
macro_rules! fatalln {
    ($($arg:expr),* $(,)?) => {
        $crate::global::fatalln(&[$(&$arg as &dyn ::std::fmt::Display),*])
    };
}
