use super::currency::{CurrencyCode, CurrencyRateProvider};
use super::error::ProviderError;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// In-memory provider counting every call it receives.
pub(crate) struct MockRateProvider {
    current: Result<f64, ProviderError>,
    history: HashMap<NaiveDate, f64>,
    call_count: AtomicUsize,
}

impl MockRateProvider {
    pub(crate) fn with_rate(rate: f64) -> Self {
        Self {
            current: Ok(rate),
            history: HashMap::new(),
            call_count: AtomicUsize::new(0),
        }
    }

    pub(crate) fn failing(error: ProviderError) -> Self {
        Self {
            current: Err(error),
            history: HashMap::new(),
            call_count: AtomicUsize::new(0),
        }
    }

    pub(crate) fn with_history(history: impl IntoIterator<Item = (NaiveDate, f64)>) -> Self {
        Self {
            current: Err(ProviderError::Unavailable("no current rate".to_string())),
            history: history.into_iter().collect(),
            call_count: AtomicUsize::new(0),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CurrencyRateProvider for MockRateProvider {
    async fn get_rate(
        &self,
        _from: &CurrencyCode,
        _to: &CurrencyCode,
    ) -> Result<f64, ProviderError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.current.clone()
    }

    async fn get_rate_on(
        &self,
        from: &CurrencyCode,
        to: &CurrencyCode,
        date: NaiveDate,
    ) -> Result<f64, ProviderError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.history.get(&date).copied().ok_or_else(|| {
            ProviderError::Unavailable(format!("no rate for {from}/{to} on {date}"))
        })
    }
}
