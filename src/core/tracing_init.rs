use crate::core::config::LoggingConfig;
use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is unset. Connection-level noise from hyper
/// stays at warn unless the configured level is stricter.
pub fn default_directives(config: &LoggingConfig) -> String {
    let transport = match config.level.as_str() {
        "error" => "error",
        _ => "warn",
    };

    format!("{},hyper={},hyper_util={}", config.level, transport, transport)
}

/// Install the global subscriber. `RUST_LOG` takes precedence over the configured level.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_directives(config))
            .context(format!("Invalid log level '{}'", config.level))?,
    };

    if config.console || config.format == "console" {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_ansi(true)
                    .with_line_number(true),
            )
            .try_init()
            .context("Failed to install console subscriber")?;
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(false),
            )
            .try_init()
            .context("Failed to install JSON subscriber")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logging(level: &str) -> LoggingConfig {
        LoggingConfig {
            level: level.to_string(),
            ..LoggingConfig::default()
        }
    }

    #[test]
    fn test_default_directives() {
        assert_eq!(default_directives(&logging("debug")), "debug,hyper=warn,hyper_util=warn");
        assert_eq!(default_directives(&logging("error")), "error,hyper=error,hyper_util=error");
    }

    #[test]
    fn test_directives_parse() {
        for level in ["trace", "debug", "info", "warn", "error"] {
            assert!(EnvFilter::try_new(default_directives(&logging(level))).is_ok());
        }
    }
}
