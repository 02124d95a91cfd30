//! Structured logging bootstrap for binaries built on the contracts.
//!
//! Log lines are JSON on stderr so stdout stays free for tool output such as
//! the OpenAPI dump. Filtering follows `RUST_LOG`.

use thiserror::Error;
use tracing_subscriber::{EnvFilter, fmt};

/// Failure to install the global subscriber.
#[derive(Debug, Error)]
#[error("tracing init failed: {message}")]
pub struct TelemetryError {
    message: String,
}

/// Install the JSON tracing subscriber.
///
/// Fails when a global subscriber is already set; callers usually log the
/// failure and carry on.
pub fn init_tracing() -> Result<(), TelemetryError> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| TelemetryError {
            message: err.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn second_initialisation_is_reported() {
        // Another test in this binary may have installed a subscriber first.
        let _first_attempt = init_tracing();
        let err = init_tracing().expect_err("global subscriber is already set");
        assert!(err.to_string().starts_with("tracing init failed"));
    }
}
