use async_trait::async_trait;
use chrono::NaiveDate;

use crate::errors::CoreError;
use crate::models::currency::Currency;

/// Latest rates returned by a provider: 1 `base` = `rate` units of each quote.
#[derive(Debug, Clone, PartialEq)]
pub struct RateQuote {
    pub base: Currency,
    pub date: NaiveDate,
    pub rates: Vec<(Currency, f64)>,
}

/// Source of exchange rates for the display-currency conversion.
///
/// Each source (ECB via Frankfurter, the built-in fixed table, a test mock)
/// implements this trait; the dashboard only ever sees `RateQuote`s.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait RateProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Latest rates from `base` into each of `quotes`.
    async fn latest_rates(&self, base: Currency, quotes: &[Currency]) -> Result<RateQuote, CoreError>;
}
