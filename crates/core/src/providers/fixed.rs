use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::currency::{Currency, RateTable};
use super::traits::{RateProvider, RateQuote};

/// Serves a fixed [`RateTable`] without touching the network.
/// Used offline and to reset rates back to the built-in defaults.
pub struct FixedRateProvider {
    table: RateTable,
}

impl FixedRateProvider {
    pub fn new(table: RateTable) -> Self {
        Self { table }
    }
}

impl Default for FixedRateProvider {
    fn default() -> Self {
        Self::new(RateTable::default())
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl RateProvider for FixedRateProvider {
    fn name(&self) -> &str {
        "fixed"
    }

    async fn latest_rates(&self, base: Currency, quotes: &[Currency]) -> Result<RateQuote, CoreError> {
        let base_rate = self.table.rate(base)?;
        let mut rates = Vec::with_capacity(quotes.len());
        for quote in quotes.iter().filter(|q| **q != base) {
            rates.push((*quote, self.table.rate(*quote)? / base_rate));
        }
        Ok(RateQuote {
            base,
            date: self
                .table
                .as_of
                .unwrap_or_else(|| chrono::Utc::now().date_naive()),
            rates,
        })
    }
}
