pub mod cli;
pub mod core;
pub mod providers;

use crate::core::RateLookupService;
use crate::core::cache::RateCache;
use crate::core::config::AppConfig;
use crate::providers::FrankfurterProvider;
use anyhow::Result;
use chrono::NaiveDate;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Currency pair as typed by the user; missing sides use the configured defaults.
#[derive(Debug, Clone, Default)]
pub struct PairArgs {
    pub from: Option<String>,
    pub to: Option<String>,
}

#[derive(Debug, Clone)]
pub enum AppCommand {
    Convert {
        pair: PairArgs,
        amount: f64,
        trend: bool,
        days: Option<u32>,
    },
    Trend {
        pair: PairArgs,
        days: Option<u32>,
        date: Option<NaiveDate>,
    },
    Share {
        pair: PairArgs,
        amount: f64,
        recipient: String,
    },
    Currencies,
}

fn resolve_pair<'a>(pair: &'a PairArgs, config: &'a AppConfig) -> (&'a str, &'a str) {
    let from = pair.from.as_deref().unwrap_or(config.default_from.as_str());
    let to = pair.to.as_deref().unwrap_or(config.default_to.as_str());
    (from, to)
}

/// Builds a service backed by the Frankfurter API.
///
/// Historical rates are cached for the lifetime of the returned service, so
/// callers building several trends should keep one service around.
pub fn lookup_service(config: &AppConfig) -> RateLookupService {
    let provider = FrankfurterProvider::new(
        config.frankfurter_base_url(),
        Duration::from_secs(config.timeout_secs),
        RateCache::new(),
    );
    RateLookupService::new(Arc::new(provider))
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("fxtrend starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let service = lookup_service(&config);

    match command {
        AppCommand::Convert {
            pair,
            amount,
            trend,
            days,
        } => {
            let (from, to) = resolve_pair(&pair, &config);
            cli::convert::run(&service, from, to, amount).await?;
            if trend {
                let days = days.unwrap_or(config.trend_days);
                cli::trend::run(&service, from, to, days, None).await?;
            }
        }
        AppCommand::Trend { pair, days, date } => {
            let (from, to) = resolve_pair(&pair, &config);
            let days = days.unwrap_or(config.trend_days);
            cli::trend::run(&service, from, to, days, date).await?;
        }
        AppCommand::Share {
            pair,
            amount,
            recipient,
        } => {
            let (from, to) = resolve_pair(&pair, &config);
            cli::share::run(&service, &recipient, from, to, amount).await?;
        }
        AppCommand::Currencies => cli::currencies::run(&config.currencies),
    }

    Ok(())
}
