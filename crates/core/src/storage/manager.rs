use crate::errors::CoreError;
use crate::models::currency::RateTable;
use crate::models::portfolio::PortfolioData;

use super::store::KeyValueStore;

/// Key the portfolio record lives under (same as the browser dashboard).
pub const PORTFOLIO_KEY: &str = "portfolioData";

/// Key for the last fetched exchange-rate table.
pub const RATES_KEY: &str = "fxRates";

/// JSON round trip between the in-memory state and a [`KeyValueStore`].
pub struct StorageManager;

impl StorageManager {
    /// Read the portfolio record, if one was saved.
    ///
    /// Deserialization is lenient about amounts (see [`PortfolioData`]);
    /// the result is normalized so `total` equals the bucket sum.
    pub fn load_portfolio(store: &impl KeyValueStore) -> Result<Option<PortfolioData>, CoreError> {
        let Some(json) = store.get_item(PORTFOLIO_KEY)? else {
            return Ok(None);
        };
        let mut data = Self::parse_portfolio(&json)?;
        data.normalize();
        tracing::debug!(total = data.total, snapshots = data.history.len(), "loaded portfolio");
        Ok(Some(data))
    }

    /// Serialize and write the portfolio record unconditionally.
    pub fn save_portfolio(store: &mut impl KeyValueStore, data: &PortfolioData) -> Result<(), CoreError> {
        let json = serde_json::to_string(data)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize portfolio: {e}")))?;
        store.set_item(PORTFOLIO_KEY, &json)?;
        tracing::trace!(bytes = json.len(), "saved portfolio");
        Ok(())
    }

    /// Read the stored rate table. A table containing a rate that is not
    /// finite and positive is rejected as a whole.
    pub fn load_rates(store: &impl KeyValueStore) -> Result<Option<RateTable>, CoreError> {
        let Some(json) = store.get_item(RATES_KEY)? else {
            return Ok(None);
        };
        let table: RateTable = serde_json::from_str(&json)
            .map_err(|e| CoreError::Deserialization(format!("Failed to parse stored rates: {e}")))?;
        if let Some((currency, rate)) = table.iter().find(|(_, r)| !r.is_finite() || *r <= 0.0) {
            return Err(CoreError::Deserialization(format!(
                "Stored rate for {currency} is invalid: {rate}"
            )));
        }
        Ok(Some(table))
    }

    pub fn save_rates(store: &mut impl KeyValueStore, rates: &RateTable) -> Result<(), CoreError> {
        let json = serde_json::to_string(rates)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize rates: {e}")))?;
        store.set_item(RATES_KEY, &json)
    }

    pub fn parse_portfolio(json: &str) -> Result<PortfolioData, CoreError> {
        serde_json::from_str(json)
            .map_err(|e| CoreError::Deserialization(format!("Failed to parse portfolio: {e}")))
    }
}
