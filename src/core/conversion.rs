//! Amount conversion and point-in-time rate lookup

use super::currency::{CurrencyCode, CurrencyRateProvider};
use super::error::{FxError, ProviderError, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, instrument};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversionRequest {
    pub from: CurrencyCode,
    pub to: CurrencyCode,
    pub amount: f64,
}

impl ConversionRequest {
    /// Validates codes and amount without touching the provider.
    pub fn new(from: &str, to: &str, amount: f64) -> Result<Self> {
        let from = CurrencyCode::parse(from)?;
        let to = CurrencyCode::parse(to)?;
        validate_amount(amount)?;
        Ok(Self { from, to, amount })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversionResult {
    pub request: ConversionRequest,
    pub converted_amount: f64,
    pub rate: f64,
    pub timestamp: DateTime<Utc>,
}

impl ConversionResult {
    /// Display line, e.g. `1 USD = 83.1234 INR`.
    pub fn summary(&self) -> String {
        format!(
            "{} {} = {:.4} {}",
            self.request.amount, self.request.from, self.converted_amount, self.request.to
        )
    }
}

fn validate_amount(amount: f64) -> Result<()> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(FxError::InvalidInput(format!(
            "amount must be a positive number, got {amount}"
        )));
    }
    Ok(())
}

/// Normalises rate provider outcomes into [`FxError`].
#[derive(Clone)]
pub struct RateLookupService {
    provider: Arc<dyn CurrencyRateProvider>,
}

impl RateLookupService {
    pub fn new(provider: Arc<dyn CurrencyRateProvider>) -> Self {
        Self { provider }
    }

    /// Converts `amount` of `from` into `to` at the current rate.
    ///
    /// Input is validated before the provider is called. The result is not
    /// rounded.
    #[instrument(skip(self))]
    pub async fn convert(&self, from: &str, to: &str, amount: f64) -> Result<f64> {
        let request = ConversionRequest::new(from, to, amount)?;
        let result = self.convert_request(request).await?;
        Ok(result.converted_amount)
    }

    pub async fn convert_request(&self, request: ConversionRequest) -> Result<ConversionResult> {
        validate_amount(request.amount)?;

        let rate = self
            .provider
            .get_rate(&request.from, &request.to)
            .await
            .map_err(|e| match e {
                ProviderError::Rejected(msg) => {
                    debug!("Provider rejected pair: {}", msg);
                    FxError::InvalidCurrencyPair {
                        from: request.from.to_string(),
                        to: request.to.to_string(),
                    }
                }
                ProviderError::Unavailable(msg) => FxError::ProviderUnavailable(msg),
            })?;

        if !rate.is_finite() || rate <= 0.0 {
            return Err(FxError::ProviderUnavailable(format!(
                "provider returned an invalid rate {rate} for {}/{}",
                request.from, request.to
            )));
        }

        let converted_amount = request.amount * rate;
        debug!(rate, converted_amount, "Converted amount");

        Ok(ConversionResult {
            request,
            converted_amount,
            rate,
            timestamp: Utc::now(),
        })
    }

    /// Historical rate for `date`. Every failure, including dates in the
    /// future, is reported as [`FxError::RateUnavailable`].
    pub async fn rate_on_date(
        &self,
        from: &CurrencyCode,
        to: &CurrencyCode,
        date: NaiveDate,
    ) -> Result<f64> {
        let unavailable = || FxError::RateUnavailable {
            from: from.to_string(),
            to: to.to_string(),
            date,
        };

        if date > Utc::now().date_naive() {
            debug!(%date, "Refusing to look up a future date");
            return Err(unavailable());
        }

        match self.provider.get_rate_on(from, to, date).await {
            Ok(rate) if rate.is_finite() && rate > 0.0 => Ok(rate),
            Ok(rate) => {
                debug!(%date, rate, "Discarding invalid historical rate");
                Err(unavailable())
            }
            Err(e) => {
                debug!(%date, error = %e, "Historical rate lookup failed");
                Err(unavailable())
            }
        }
    }
}
