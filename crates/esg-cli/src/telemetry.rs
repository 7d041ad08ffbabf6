use thiserror::Error;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

/// Filter directive read before the configured level.
pub const LOG_ENV: &str = "ESG_SCORE_LOG";

#[derive(Error, Debug)]
pub enum TelemetryError {
    /// Configured `logging.level` is not a valid filter
    #[error("invalid log level/filter '{value}': unable to build EnvFilter")]
    EnvFilter {
        value: String,
        #[source]
        source: ParseError,
    },

    /// A global subscriber is already installed
    #[error("telemetry error: {0}")]
    Subscriber(String),
}

/// Install a stderr subscriber so stdout stays machine-readable.
pub fn init(level: &str) -> Result<(), TelemetryError> {
    let directive = std::env::var(LOG_ENV).ok();

    tracing_subscriber::fmt()
        .with_env_filter(filter(directive.as_deref(), level)?)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(|err| TelemetryError::Subscriber(err.to_string()))
}

/// A valid `directive` wins; otherwise `level` must parse.
fn filter(directive: Option<&str>, level: &str) -> Result<EnvFilter, TelemetryError> {
    if let Some(filter) = directive.and_then(|d| EnvFilter::try_new(d).ok()) {
        return Ok(filter);
    }
    EnvFilter::try_new(level).map_err(|source| TelemetryError::EnvFilter {
        value: level.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn invalid_level_keeps_value_and_source() {
        let err = filter(None, "esg_core=notalevel").unwrap_err();
        assert!(matches!(err, TelemetryError::EnvFilter { .. }));
        assert!(err.to_string().contains("'esg_core=notalevel'"));
        assert!(err.source().is_some());
    }

    #[test]
    fn valid_directive_overrides_level() {
        assert!(filter(Some("esg_core=debug"), "esg_core=notalevel").is_ok());
        assert!(filter(Some("esg_core=notalevel"), "warn").is_ok());
        assert!(filter(None, "info").is_ok());
    }
}
