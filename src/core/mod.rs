//! Conversion and trend workflow, independent of any presentation

pub mod cache;
pub mod config;
pub mod conversion;
pub mod currency;
pub mod error;
pub mod log;
pub mod share;
pub mod trend;

#[cfg(test)]
pub(crate) mod testing;

// Re-export main types for cleaner imports
pub use conversion::{ConversionRequest, ConversionResult, RateLookupService};
pub use currency::{CurrencyCode, CurrencyRateProvider};
pub use error::{FxError, ProviderError};
pub use trend::{RatePoint, TrendAssembler, TrendSeries};
