//! Tracing subscriber setup
//!
//! The library only emits `tracing` events. Binaries that have no
//! subscriber of their own can install the JSON one here.

use tracing_subscriber::EnvFilter;

use crate::{
    config::Config,
    error::{Error, Result},
};

/// Install a global JSON subscriber filtered at `config.log_level`
///
/// An unparsable level falls back to `info`. Installing twice returns
/// [`Error::Tracing`].
pub fn init_tracing(config: &Config) -> Result<()> {
    let log_level = config.log_level.as_str();

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .try_init()
        .map_err(|e| Error::Tracing(e.to_string()))?;

    tracing::info!(log_level, "Tracing initialized for pagination");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_tracing_twice_is_an_error() {
        let config = Config {
            log_level: "not a level[".to_string(),
            ..Config::default()
        };
        // Another subscriber may already be installed; either way the
        // second call cannot succeed
        let _ = init_tracing(&config);
        let err = init_tracing(&config).unwrap_err();
        assert!(matches!(err, Error::Tracing(_)));
    }
}
