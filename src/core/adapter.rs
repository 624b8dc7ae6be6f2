//! Options to engine translation
//!
//! Resolution rules:
//! - an unparseable level silently becomes `info`
//! - levels are color-coded only for the console format with color enabled
//! - encoder keys, time/duration/caller renderers and sampling are fixed
//! - stacktraces are always captured at `panic` and above, and only there
//!
//! Building fails only when a destination cannot be opened or the format is
//! not a registered encoding. [`build`] treats that as a deployment error and
//! panics; [`try_build`] hands the error back.

use super::{
    appender::Appender,
    atomic_level::AtomicLevel,
    encoder::{CallerEncoder, EncoderConfig, LevelEncoder, DEFAULT_LINE_ENDING},
    engine::{Engine, EngineConfig},
    error::Result,
    log_level::LogLevel,
    options::{Options, CONSOLE_FORMAT},
    sampling::SamplingConfig,
    timestamp::TimestampFormat,
};

/// Severity from which stacktraces are attached, whatever the options say
pub const STACKTRACE_LEVEL: LogLevel = LogLevel::Panic;

/// Translate options into an engine configuration
pub fn engine_config(options: &Options) -> EngineConfig {
    let level = LogLevel::parse_or_default(&options.level);

    let level_encoder = if options.format == CONSOLE_FORMAT && options.enable_color {
        LevelEncoder::CapitalColor
    } else {
        LevelEncoder::Capital
    };

    let encoder_config = EncoderConfig {
        message_key: "message".to_string(),
        level_key: "level".to_string(),
        time_key: "timestamp".to_string(),
        name_key: "logger".to_string(),
        caller_key: "caller".to_string(),
        stacktrace_key: "stacktrace".to_string(),
        line_ending: DEFAULT_LINE_ENDING.to_string(),
        level_encoder,
        time_encoder: TimestampFormat::Iso8601,
        caller_encoder: CallerEncoder::Short,
    };

    EngineConfig {
        level: AtomicLevel::new(level),
        development: options.development,
        disable_caller: options.disable_caller,
        disable_stacktrace: options.disable_stacktrace,
        sampling: Some(SamplingConfig::default()),
        encoding: options.format.clone(),
        encoder_config,
        output_paths: options.output_paths.clone(),
        error_output_paths: options.error_output_paths.clone(),
    }
}

fn finish(engine: Engine, options: &Options) -> Engine {
    engine
        .with_stacktrace_at(STACKTRACE_LEVEL)
        .named(&options.name)
}

/// Build an engine, returning construction errors
pub fn try_build(options: &Options) -> Result<Engine> {
    let engine = engine_config(options).build()?;
    Ok(finish(engine, options))
}

/// Build an engine over caller-supplied destinations
///
/// The options' output paths are ignored.
pub fn try_build_with(
    options: &Options,
    outputs: Vec<Box<dyn Appender>>,
    error_outputs: Vec<Box<dyn Appender>>,
) -> Result<Engine> {
    let engine = engine_config(options).build_with(outputs, error_outputs)?;
    Ok(finish(engine, options))
}

/// Build an engine; a construction error aborts the caller
///
/// # Panics
///
/// When a destination cannot be opened or `options.format` is unknown.
pub fn build(options: &Options) -> Engine {
    match try_build(options) {
        Ok(engine) => engine,
        Err(e) => panic!("failed to build logger: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Encoding;
    use crate::core::error::LoggerError;

    #[test]
    fn test_bogus_level_falls_back_to_info() {
        let options = Options {
            level: "bogus".to_string(),
            ..Options::new()
        };
        let engine = try_build_with(&options, Vec::new(), Vec::new()).unwrap();
        assert_eq!(engine.level().level(), LogLevel::Info);
    }

    #[test]
    fn test_level_parsed() {
        let options = Options {
            level: "warn".to_string(),
            ..Options::new()
        };
        assert_eq!(engine_config(&options).level.level(), LogLevel::Warn);
    }

    #[test]
    fn test_color_only_for_console() {
        let console = engine_config(&Options::new());
        assert_eq!(console.encoder_config.level_encoder, LevelEncoder::CapitalColor);

        let json = engine_config(&Options {
            format: "json".to_string(),
            ..Options::new()
        });
        assert_eq!(json.encoder_config.level_encoder, LevelEncoder::Capital);

        let no_color = engine_config(&Options {
            enable_color: false,
            ..Options::new()
        });
        assert_eq!(no_color.encoder_config.level_encoder, LevelEncoder::Capital);
    }

    #[test]
    fn test_fixed_encoder_keys_and_sampling() {
        let config = engine_config(&Options::new());
        let keys = &config.encoder_config;
        assert_eq!(keys.message_key, "message");
        assert_eq!(keys.level_key, "level");
        assert_eq!(keys.time_key, "timestamp");
        assert_eq!(keys.name_key, "logger");
        assert_eq!(keys.caller_key, "caller");
        assert_eq!(keys.stacktrace_key, "stacktrace");

        let sampling = config.sampling.unwrap();
        assert_eq!(sampling.initial, 100);
        assert_eq!(sampling.thereafter, 100);
    }

    #[test]
    fn test_stacktrace_forced_at_panic() {
        for disable_stacktrace in [false, true] {
            let options = Options {
                disable_stacktrace,
                ..Options::new()
            };
            let engine = try_build_with(&options, Vec::new(), Vec::new()).unwrap();
            assert_eq!(engine.stacktrace_level(), Some(LogLevel::Panic));
        }
    }

    #[test]
    fn test_engine_is_named() {
        let options = Options {
            name: "billing".to_string(),
            format: "json".to_string(),
            ..Options::new()
        };
        let engine = try_build_with(&options, Vec::new(), Vec::new()).unwrap();
        assert_eq!(engine.name(), "billing");
        assert_eq!(engine.encoding(), Encoding::Json);
    }

    #[test]
    fn test_unknown_format_is_an_error() {
        let options = Options {
            format: "yaml".to_string(),
            ..Options::new()
        };
        assert!(matches!(
            try_build_with(&options, Vec::new(), Vec::new()),
            Err(LoggerError::UnknownEncoding(_))
        ));
    }

    #[test]
    #[should_panic(expected = "failed to build logger")]
    fn test_build_panics_on_unopenable_destination() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing").join("app.log");
        let options = Options {
            output_paths: vec![missing.to_str().unwrap().to_string()],
            ..Options::new()
        };
        build(&options);
    }
}
