//! Tracing subscriber setup.

use std::env::{self, VarError};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Errors raised while installing the tracing subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The filter directive could not be parsed.
    #[error("invalid log filter '{directive}' from {origin}: {source}")]
    InvalidFilter {
        /// Directive that failed to parse.
        directive: String,
        /// Where the directive came from: `RUST_LOG` or configuration.
        origin: &'static str,
        /// Underlying parse failure.
        source: tracing_subscriber::filter::ParseError,
    },

    /// `RUST_LOG` is set but is not valid Unicode.
    #[error("{variable} is not valid unicode")]
    NonUnicodeEnv {
        /// Name of the offending variable.
        variable: &'static str,
    },
}

const CONFIGURED_ORIGIN: &str = "configuration";

/// Installs a formatted tracing subscriber as the global default.
///
/// `RUST_LOG` takes precedence over `filter` when set. Calling this more than
/// once is harmless: later calls leave the first subscriber in place and
/// return `Ok(false)`.
///
/// # Errors
///
/// Returns [`TelemetryError`] when `RUST_LOG` is set but malformed, or when it
/// is unset and `filter` is not a valid directive.
pub fn init_tracing(filter: &str) -> Result<bool, TelemetryError> {
    let env_filter = resolve_filter(env::var(EnvFilter::DEFAULT_ENV), filter)?;

    Ok(tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .try_init()
        .is_ok())
}

fn resolve_filter(
    from_env: Result<String, VarError>,
    configured: &str,
) -> Result<EnvFilter, TelemetryError> {
    match from_env {
        Ok(directives) => parse_filter(&directives, EnvFilter::DEFAULT_ENV),
        Err(VarError::NotPresent) => parse_filter(configured, CONFIGURED_ORIGIN),
        Err(VarError::NotUnicode(_)) => Err(TelemetryError::NonUnicodeEnv {
            variable: EnvFilter::DEFAULT_ENV,
        }),
    }
}

fn parse_filter(directive: &str, origin: &'static str) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(directive).map_err(|source| TelemetryError::InvalidFilter {
        directive: directive.to_owned(),
        origin,
        source,
    })
}
