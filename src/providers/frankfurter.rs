use crate::core::cache::RateCache;
use crate::core::currency::{CurrencyCode, CurrencyRateProvider};
use crate::core::error::ProviderError;
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::StatusCode;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, instrument};

/// Rates from the Frankfurter API (European Central Bank reference rates).
pub struct FrankfurterProvider {
    base_url: String,
    timeout: Duration,
    cache: RateCache,
}

impl FrankfurterProvider {
    pub fn new(base_url: &str, timeout: Duration, cache: RateCache) -> Self {
        FrankfurterProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
            cache,
        }
    }

    async fn fetch(
        &self,
        endpoint: &str,
        from: &CurrencyCode,
        to: &CurrencyCode,
    ) -> Result<f64, ProviderError> {
        let url = format!("{}/{}?from={}&to={}", self.base_url, endpoint, from, to);
        debug!("Requesting currency rate from {}", url);

        let client = reqwest::Client::builder()
            .user_agent("fxtrend/1.0")
            .timeout(self.timeout)
            .build()
            .map_err(|e| ProviderError::Unavailable(format!("HTTP client error: {e}")))?;

        let response = client.get(&url).send().await.map_err(|e| {
            ProviderError::Unavailable(format!(
                "Request error: {e} for currency pair: {from}/{to}"
            ))
        })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND || status == StatusCode::UNPROCESSABLE_ENTITY {
            return Err(ProviderError::Rejected(format!(
                "Provider rejected currency pair {from}/{to} with {status}"
            )));
        }
        if !status.is_success() {
            return Err(ProviderError::Unavailable(format!(
                "HTTP error: {status} for currency pair: {from}/{to}"
            )));
        }

        let text = response.text().await.map_err(|e| {
            ProviderError::Unavailable(format!("Failed to read response for {from}/{to}: {e}"))
        })?;

        let data: FrankfurterResponse = serde_json::from_str(&text).map_err(|e| {
            ProviderError::Unavailable(format!(
                "Failed to parse JSON response for {from}/{to}: {e}"
            ))
        })?;
        debug!(base = %data.base, date = %data.date, "Received Frankfurter response");

        data.rates.get(to.as_str()).copied().ok_or_else(|| {
            ProviderError::Unavailable(format!("No rate data found for currency pair: {from}/{to}"))
        })
    }
}

#[derive(Debug, Deserialize)]
struct FrankfurterResponse {
    base: String,
    date: String,
    rates: HashMap<String, f64>,
}

#[async_trait]
impl CurrencyRateProvider for FrankfurterProvider {
    #[instrument(name = "FrankfurterRateFetch", skip(self))]
    async fn get_rate(
        &self,
        from: &CurrencyCode,
        to: &CurrencyCode,
    ) -> Result<f64, ProviderError> {
        // Frankfurter refuses identical base and target
        if from == to {
            return Ok(1.0);
        }
        self.fetch("latest", from, to).await
    }

    #[instrument(name = "FrankfurterHistoricalFetch", skip(self))]
    async fn get_rate_on(
        &self,
        from: &CurrencyCode,
        to: &CurrencyCode,
        date: NaiveDate,
    ) -> Result<f64, ProviderError> {
        if from == to {
            return Ok(1.0);
        }
        if let Some(cached) = self.cache.get(from, to, date).await {
            return Ok(cached);
        }

        let rate = self
            .fetch(&date.format("%Y-%m-%d").to_string(), from, to)
            .await?;
        self.cache.put(from, to, date, rate).await;
        Ok(rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn code(c: &str) -> CurrencyCode {
        CurrencyCode::parse(c).unwrap()
    }

    fn provider(server: &MockServer) -> FrankfurterProvider {
        FrankfurterProvider::new(&server.uri(), Duration::from_secs(5), RateCache::new())
    }

    async fn create_mock_server(endpoint: &str, status: u16, body: &str) -> MockServer {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/{endpoint}")))
            .and(query_param("from", "USD"))
            .and(query_param("to", "EUR"))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&mock_server)
            .await;
        mock_server
    }

    #[tokio::test]
    async fn test_successful_latest_rate_fetch() {
        let body = r#"{"amount":1.0,"base":"USD","date":"2024-05-10","rates":{"EUR":0.9281}}"#;
        let server = create_mock_server("latest", 200, body).await;

        let rate = provider(&server)
            .get_rate(&code("USD"), &code("EUR"))
            .await
            .expect("Failed to get rate");
        assert_eq!(rate, 0.9281);
    }

    #[tokio::test]
    async fn test_same_currency_skips_request() {
        // no mocks mounted, any request would fail
        let server = MockServer::start().await;
        let provider = provider(&server);

        assert_eq!(provider.get_rate(&code("USD"), &code("USD")).await, Ok(1.0));
        let date = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
        assert_eq!(
            provider.get_rate_on(&code("USD"), &code("USD"), date).await,
            Ok(1.0)
        );
    }

    #[tokio::test]
    async fn test_unknown_currency_is_rejected() {
        let server = create_mock_server("latest", 404, r#"{"message":"not found"}"#).await;

        let result = provider(&server).get_rate(&code("USD"), &code("EUR")).await;
        assert!(matches!(result, Err(ProviderError::Rejected(_))));
    }

    #[tokio::test]
    async fn test_server_error_is_unavailable() {
        let server = create_mock_server("latest", 500, "").await;

        let result = provider(&server).get_rate(&code("USD"), &code("EUR")).await;
        assert_eq!(
            result,
            Err(ProviderError::Unavailable(
                "HTTP error: 500 Internal Server Error for currency pair: USD/EUR".to_string()
            ))
        );
    }

    #[tokio::test]
    async fn test_missing_target_rate_is_unavailable() {
        let body = r#"{"amount":1.0,"base":"USD","date":"2024-05-10","rates":{"GBP":0.8}}"#;
        let server = create_mock_server("latest", 200, body).await;

        let result = provider(&server).get_rate(&code("USD"), &code("EUR")).await;
        assert_eq!(
            result,
            Err(ProviderError::Unavailable(
                "No rate data found for currency pair: USD/EUR".to_string()
            ))
        );
    }

    #[tokio::test]
    async fn test_malformed_response_is_unavailable() {
        let server = create_mock_server("latest", 200, r#"{"rate": 0.9}"#).await;

        let result = provider(&server).get_rate(&code("USD"), &code("EUR")).await;
        match result {
            Err(ProviderError::Unavailable(msg)) => {
                assert!(msg.contains("Failed to parse JSON response for USD/EUR"))
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unreachable_provider_is_unavailable() {
        let server = MockServer::start().await;
        let uri = server.uri();
        drop(server);

        let provider = FrankfurterProvider::new(&uri, Duration::from_secs(1), RateCache::new());
        let result = provider.get_rate(&code("USD"), &code("EUR")).await;
        assert!(matches!(result, Err(ProviderError::Unavailable(_))));
    }

    #[tokio::test]
    async fn test_slow_provider_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&server)
            .await;

        let provider =
            FrankfurterProvider::new(&server.uri(), Duration::from_millis(100), RateCache::new());
        let result = provider.get_rate(&code("USD"), &code("EUR")).await;
        assert!(matches!(result, Err(ProviderError::Unavailable(_))));
    }

    #[tokio::test]
    async fn test_historical_rate_is_cached() {
        let body = r#"{"amount":1.0,"base":"USD","date":"2024-05-10","rates":{"EUR":0.93}}"#;
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/2024-05-10"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .expect(1)
            .mount(&server)
            .await;

        let cache = RateCache::new();
        let provider =
            FrankfurterProvider::new(&server.uri(), Duration::from_secs(5), cache.clone());
        let date = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();

        let first = provider.get_rate_on(&code("USD"), &code("EUR"), date).await;
        let second = provider.get_rate_on(&code("USD"), &code("EUR"), date).await;
        assert_eq!(first, Ok(0.93));
        assert_eq!(second, Ok(0.93));
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_failed_historical_rate_is_not_cached() {
        let server = create_mock_server("2024-05-11", 500, "").await;
        let cache = RateCache::new();
        let provider =
            FrankfurterProvider::new(&server.uri(), Duration::from_secs(5), cache.clone());
        let date = NaiveDate::from_ymd_opt(2024, 5, 11).unwrap();

        let result = provider.get_rate_on(&code("USD"), &code("EUR"), date).await;
        assert!(matches!(result, Err(ProviderError::Unavailable(_))));
        assert_eq!(cache.len().await, 0);
    }
}
