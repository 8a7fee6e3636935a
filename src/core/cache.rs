use super::currency::CurrencyCode;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

type RateKey = (CurrencyCode, CurrencyCode, NaiveDate);

/// Process-lifetime store of historical rates.
///
/// Published rates for a past date do not change, so entries never expire.
#[derive(Clone, Default)]
pub struct RateCache {
    inner: Arc<Mutex<HashMap<RateKey, f64>>>,
}

impl RateCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(
        &self,
        from: &CurrencyCode,
        to: &CurrencyCode,
        date: NaiveDate,
    ) -> Option<f64> {
        let cache = self.inner.lock().await;
        let value = cache.get(&(from.clone(), to.clone(), date)).copied();
        if value.is_some() {
            debug!(%from, %to, %date, "Rate cache HIT");
        } else {
            debug!(%from, %to, %date, "Rate cache MISS");
        }
        value
    }

    pub async fn put(&self, from: &CurrencyCode, to: &CurrencyCode, date: NaiveDate, rate: f64) {
        let mut cache = self.inner.lock().await;
        cache.insert((from.clone(), to.clone(), date), rate);
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }
}
