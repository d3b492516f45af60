use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use crate::errors::CoreError;
use crate::models::currency::Currency;
use super::traits::{RateProvider, RateQuote};

const BASE_URL: &str = "https://api.frankfurter.dev/v1";

/// Latest ECB reference rates via the Frankfurter API (no key needed).
///
/// Rates are published on working days, so `RateQuote::date` can lag
/// today by a few days over weekends and holidays.
pub struct FrankfurterProvider {
    client: Client,
    base_url: String,
}

impl FrankfurterProvider {
    pub fn new() -> Self {
        Self::with_base_url(BASE_URL)
    }

    /// Point the provider at a different host (self-hosted Frankfurter).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(30));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

impl Default for FrankfurterProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Deserialize)]
struct LatestResponse {
    date: String,
    rates: HashMap<String, f64>,
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl RateProvider for FrankfurterProvider {
    fn name(&self) -> &str {
        "Frankfurter"
    }

    async fn latest_rates(&self, base: Currency, quotes: &[Currency]) -> Result<RateQuote, CoreError> {
        let symbols: Vec<&str> = quotes
            .iter()
            .filter(|q| **q != base)
            .map(|q| q.code())
            .collect();
        if symbols.is_empty() {
            return Ok(RateQuote {
                base,
                date: chrono::Utc::now().date_naive(),
                rates: Vec::new(),
            });
        }

        let url = format!(
            "{}/latest?base={}&symbols={}",
            self.base_url,
            base.code(),
            symbols.join(",")
        );
        tracing::debug!(%url, "requesting latest rates");

        let resp: LatestResponse = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .map_err(|e| CoreError::Api {
                provider: "Frankfurter".into(),
                message: format!("Failed to parse latest rates for {base}: {e}"),
            })?;

        let date = NaiveDate::parse_from_str(&resp.date, "%Y-%m-%d").map_err(|e| CoreError::Api {
            provider: "Frankfurter".into(),
            message: format!("Unexpected date '{}': {e}", resp.date),
        })?;

        let rates = quotes
            .iter()
            .filter(|q| **q != base)
            .filter_map(|q| resp.rates.get(q.code()).map(|r| (*q, *r)))
            .collect();

        Ok(RateQuote { base, date, rates })
    }
}
