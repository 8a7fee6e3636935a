//! Error taxonomy for rate lookups and conversions

use chrono::NaiveDate;
use thiserror::Error;

/// Failures surfaced by the conversion and trend workflow.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FxError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Rate provider unavailable: {0}")]
    ProviderUnavailable(String),

    #[error("Currency pair {from}/{to} is not supported by the rate provider")]
    InvalidCurrencyPair { from: String, to: String },

    #[error("No rate available for {from}/{to} on {date}")]
    RateUnavailable {
        from: String,
        to: String,
        date: NaiveDate,
    },
}

/// Failures reported by a rate provider adapter.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ProviderError {
    /// Network failure, timeout, server error or a response without a rate.
    #[error("{0}")]
    Unavailable(String),

    /// The provider explicitly refused the currency pair.
    #[error("{0}")]
    Rejected(String),
}

pub type Result<T> = std::result::Result<T, FxError>;
