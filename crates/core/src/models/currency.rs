use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;

use crate::errors::CoreError;

/// Currencies the dashboard can display. SGD is the base: every stored
/// balance is in SGD and every rate is "units of X per 1 SGD".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Currency {
    #[default]
    #[serde(rename = "SGD")]
    Sgd,
    #[serde(rename = "USD")]
    Usd,
    #[serde(rename = "EUR")]
    Eur,
    #[serde(rename = "GBP")]
    Gbp,
    #[serde(rename = "AUD")]
    Aud,
    #[serde(rename = "MYR")]
    Myr,
    #[serde(rename = "JPY")]
    Jpy,
    #[serde(rename = "CNY")]
    Cny,
    #[serde(rename = "INR")]
    Inr,
}

impl Currency {
    pub const BASE: Currency = Currency::Sgd;

    pub const ALL: [Currency; 9] = [
        Currency::Sgd,
        Currency::Usd,
        Currency::Eur,
        Currency::Gbp,
        Currency::Aud,
        Currency::Myr,
        Currency::Jpy,
        Currency::Cny,
        Currency::Inr,
    ];

    /// ISO 4217 code.
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Sgd => "SGD",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Aud => "AUD",
            Currency::Myr => "MYR",
            Currency::Jpy => "JPY",
            Currency::Cny => "CNY",
            Currency::Inr => "INR",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Currency::Sgd => "Singapore Dollar",
            Currency::Usd => "US Dollar",
            Currency::Eur => "Euro",
            Currency::Gbp => "British Pound",
            Currency::Aud => "Australian Dollar",
            Currency::Myr => "Malaysian Ringgit",
            Currency::Jpy => "Japanese Yen",
            Currency::Cny => "Chinese Yuan",
            Currency::Inr => "Indian Rupee",
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Currency {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_uppercase();
        Currency::ALL
            .into_iter()
            .find(|c| c.code() == code)
            .ok_or_else(|| CoreError::UnknownCurrency(s.to_string()))
    }
}

/// Exchange rates from the base currency: 1 SGD = `rate` units of the quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateTable {
    /// Keyed by ISO code so the JSON form stays a plain object
    rates: BTreeMap<String, f64>,

    /// Date the rates were published, if they came from a provider
    #[serde(default)]
    pub as_of: Option<NaiveDate>,

    /// Where the rates came from (e.g., "fixed", "Frankfurter")
    #[serde(default = "default_source")]
    pub source: String,

    /// Codes whose rate was set by hand on top of `source`
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    overrides: BTreeSet<String>,
}

fn default_source() -> String {
    "fixed".to_string()
}

impl Default for RateTable {
    fn default() -> Self {
        let rates = [
            (Currency::Usd, 0.74),
            (Currency::Eur, 0.68),
            (Currency::Gbp, 0.58),
            (Currency::Aud, 1.13),
            (Currency::Myr, 3.47),
            (Currency::Jpy, 110.5),
            (Currency::Cny, 5.36),
            (Currency::Inr, 62.3),
        ]
        .into_iter()
        .map(|(c, r)| (c.code().to_string(), r))
        .collect();
        Self {
            rates,
            as_of: None,
            source: default_source(),
            overrides: BTreeSet::new(),
        }
    }
}

impl RateTable {
    /// Units of `currency` per 1 SGD.
    pub fn rate(&self, currency: Currency) -> Result<f64, CoreError> {
        if currency == Currency::BASE {
            return Ok(1.0);
        }
        self.rates
            .get(currency.code())
            .copied()
            .ok_or_else(|| CoreError::RateNotAvailable(currency.code().to_string()))
    }

    /// Insert or replace a rate. Rates must be finite and strictly positive;
    /// the base currency is fixed at 1.0 and cannot be overridden.
    pub fn set_rate(&mut self, currency: Currency, rate: f64) -> Result<(), CoreError> {
        if currency == Currency::BASE {
            return Err(CoreError::ValidationError(format!(
                "{} is the base currency; its rate is always 1",
                Currency::BASE
            )));
        }
        if !rate.is_finite() || rate <= 0.0 {
            return Err(CoreError::ValidationError(format!(
                "Invalid rate for {currency}: {rate} (must be finite and positive)"
            )));
        }
        self.rates.insert(currency.code().to_string(), rate);
        Ok(())
    }

    /// Set a rate by hand. The table keeps its `source`; the code is
    /// remembered as overridden until the next provider refresh.
    pub fn override_rate(&mut self, currency: Currency, rate: f64) -> Result<(), CoreError> {
        self.set_rate(currency, rate)?;
        self.overrides.insert(currency.code().to_string());
        Ok(())
    }

    pub fn is_overridden(&self, currency: Currency) -> bool {
        self.overrides.contains(currency.code())
    }

    /// Forget manual overrides (a provider just supplied fresh rates).
    pub fn clear_overrides(&mut self) {
        self.overrides.clear();
    }

    /// All non-base rates, ordered by code. Codes this build does not know are skipped.
    pub fn iter(&self) -> impl Iterator<Item = (Currency, f64)> + '_ {
        self.rates
            .iter()
            .filter_map(|(code, r)| code.parse::<Currency>().ok().map(|c| (c, *r)))
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}
