use anyhow::{Context, Result};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, filter::Targets, fmt, prelude::__tracing_subscriber_SubscriberExt,
    util::SubscriberInitExt,
};

/// Level for this crate's own events. Silent unless verbose.
fn app_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::OFF
    }
}

/// Installs the global subscriber writing to stderr, so stdout only carries
/// conversion results and tables.
///
/// Fails instead of panicking when a subscriber is already installed, which
/// happens when the crate is embedded in a host that sets up its own.
pub fn init_logging(verbose: bool) -> Result<()> {
    let level = app_level(verbose);
    let app_filter = Targets::new().with_target("fxtrend", level);
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "off" }));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .compact()
                .without_time()
                .with_target(verbose)
                .with_writer(std::io::stderr),
        )
        .with(app_filter)
        .with(env_filter)
        .try_init()
        .context("Failed to install log subscriber")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_level_follows_verbose_flag() {
        assert_eq!(app_level(true), LevelFilter::DEBUG);
        assert_eq!(app_level(false), LevelFilter::OFF);
    }

    #[test]
    fn test_second_init_reports_error() {
        // only test in this binary touching the global subscriber
        assert!(init_logging(false).is_ok());
        assert!(init_logging(true).is_err());
    }
}
