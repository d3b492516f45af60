use crate::errors::CoreError;
use crate::models::currency::{Currency, RateTable};

/// Converts amounts between the base currency (SGD) and display currencies
/// using a fixed [`RateTable`]. Pure scalar arithmetic, no lookups by date.
pub struct CurrencyService;

impl CurrencyService {
    pub fn new() -> Self {
        Self
    }

    /// Convert a base-currency amount into `to`.
    /// E.g., convert(1000.0, USD) with 0.74 → 740.0
    pub fn convert(
        &self,
        rates: &RateTable,
        amount: f64,
        to: Currency,
    ) -> Result<f64, CoreError> {
        Ok(amount * rates.rate(to)?)
    }

    /// Convert an amount expressed in `from` back into the base currency.
    pub fn to_base(
        &self,
        rates: &RateTable,
        amount: f64,
        from: Currency,
    ) -> Result<f64, CoreError> {
        // Rates are validated positive on insert, so the division is safe.
        Ok(amount / rates.rate(from)?)
    }

    /// Convert between any two supported currencies through the base.
    pub fn convert_between(
        &self,
        rates: &RateTable,
        amount: f64,
        from: Currency,
        to: Currency,
    ) -> Result<f64, CoreError> {
        if from == to {
            return Ok(amount);
        }
        let base = self.to_base(rates, amount, from)?;
        self.convert(rates, base, to)
    }
}

impl Default for CurrencyService {
    fn default() -> Self {
        Self::new()
    }
}
