//! Historical rate series over a trailing window of days

use super::conversion::RateLookupService;
use super::currency::CurrencyCode;
use super::error::{FxError, Result};
use chrono::{Days, NaiveDate, Utc};
use futures::stream::{self, StreamExt};
use serde::Serialize;
use tracing::{debug, warn};

pub const DEFAULT_TREND_DAYS: u32 = 10;

/// Largest window accepted by [`TrendAssembler::build`], one leap year.
pub const MAX_TREND_DAYS: u32 = 366;

/// Provider requests in flight at once during a build.
const MAX_CONCURRENT_LOOKUPS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RatePoint {
    pub date: NaiveDate,
    pub rate: f64,
}

/// Rates ordered by ascending date.
///
/// Dates the provider could not resolve are left out of `points` and listed
/// in `missing`. Nothing is interpolated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendSeries {
    pub from: CurrencyCode,
    pub to: CurrencyCode,
    pub points: Vec<RatePoint>,
    pub missing: Vec<NaiveDate>,
}

impl TrendSeries {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Lowest and highest rate in the series.
    pub fn range(&self) -> Option<(f64, f64)> {
        self.points.iter().fold(None, |acc, p| match acc {
            None => Some((p.rate, p.rate)),
            Some((lo, hi)) => Some((lo.min(p.rate), hi.max(p.rate))),
        })
    }
}

pub struct TrendAssembler<'a> {
    service: &'a RateLookupService,
}

impl<'a> TrendAssembler<'a> {
    pub fn new(service: &'a RateLookupService) -> Self {
        Self { service }
    }

    /// Trend for the `window_days` days ending today.
    pub async fn build_recent(
        &self,
        from: &str,
        to: &str,
        window_days: u32,
    ) -> Result<TrendSeries> {
        self.build(from, to, window_days, Utc::now().date_naive())
            .await
    }

    /// Looks up each of the `window_days` dates ending at `reference_date`.
    ///
    /// Only malformed codes, a window above [`MAX_TREND_DAYS`] or a window
    /// reaching before the earliest representable date fail the whole call.
    /// Lookups run concurrently and are not retried.
    pub async fn build(
        &self,
        from: &str,
        to: &str,
        window_days: u32,
        reference_date: NaiveDate,
    ) -> Result<TrendSeries> {
        let from = CurrencyCode::parse(from)?;
        let to = CurrencyCode::parse(to)?;

        if window_days > MAX_TREND_DAYS {
            return Err(FxError::InvalidInput(format!(
                "trend window must be at most {MAX_TREND_DAYS} days, got {window_days}"
            )));
        }

        let dates = (0..window_days)
            .map(|offset| reference_date.checked_sub_days(Days::new(u64::from(offset))))
            .collect::<Option<Vec<NaiveDate>>>()
            .ok_or_else(|| {
                FxError::InvalidInput(format!(
                    "{window_days} day window ending {reference_date} starts before the earliest supported date"
                ))
            })?;
        debug!(
            %from, %to, window_days, %reference_date,
            "Fetching historical rates"
        );

        let lookups = dates.iter().map(|date| {
            let (from, to) = (&from, &to);
            async move { (*date, self.service.rate_on_date(from, to, *date).await) }
        });

        let mut points = Vec::new();
        let mut missing = Vec::new();
        let results: Vec<_> = stream::iter(lookups)
            .buffer_unordered(MAX_CONCURRENT_LOOKUPS)
            .collect()
            .await;
        for (date, result) in results {
            match result {
                Ok(rate) => points.push(RatePoint { date, rate }),
                Err(e) => {
                    warn!(error = %e, "Skipping date in trend");
                    missing.push(date);
                }
            }
        }

        points.sort_by_key(|p| p.date);
        missing.sort();

        Ok(TrendSeries {
            from,
            to,
            points,
            missing,
        })
    }
}
