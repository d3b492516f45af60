use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::bucket::Bucket;
use super::currency::Currency;
use super::history::{default_history, HistorySnapshot};

/// The persisted portfolio record.
///
/// All balances are in the base currency (SGD). `currency` only selects how
/// the dashboard displays them. Field names match the JSON written by the
/// browser dashboard, so records saved there load here unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioData {
    /// Sum of the four buckets. Kept in the record for compatibility;
    /// recomputed by [`PortfolioData::normalize`] and on every edit.
    #[serde(default, deserialize_with = "lenient_amount")]
    pub total: f64,

    /// Monthly savings contribution
    #[serde(default, deserialize_with = "lenient_amount")]
    pub savings: f64,

    #[serde(default, deserialize_with = "lenient_amount")]
    pub core: f64,

    #[serde(default, deserialize_with = "lenient_amount")]
    pub growth: f64,

    #[serde(default, deserialize_with = "lenient_amount")]
    pub crypto: f64,

    #[serde(default, deserialize_with = "lenient_amount")]
    pub hedge: f64,

    /// Display currency
    #[serde(default, deserialize_with = "lenient_currency")]
    pub currency: Currency,

    /// Year-end net worth snapshots, oldest first
    #[serde(default, deserialize_with = "lenient_history")]
    pub history: Vec<HistorySnapshot>,
}

impl Default for PortfolioData {
    fn default() -> Self {
        let mut data = Self {
            total: 0.0,
            savings: 7_000.0,
            core: 105_356.0,
            growth: 96_319.0,
            crypto: 101_000.0,
            hedge: 170_050.0,
            currency: Currency::Sgd,
            history: default_history(),
        };
        data.normalize();
        data
    }
}

impl PortfolioData {
    /// Balance of a single bucket.
    pub fn bucket(&self, bucket: Bucket) -> f64 {
        match bucket {
            Bucket::Core => self.core,
            Bucket::Growth => self.growth,
            Bucket::Crypto => self.crypto,
            Bucket::Hedge => self.hedge,
        }
    }

    /// Set a bucket balance and keep `total` in sync.
    pub fn set_bucket(&mut self, bucket: Bucket, value: f64) {
        let slot = match bucket {
            Bucket::Core => &mut self.core,
            Bucket::Growth => &mut self.growth,
            Bucket::Crypto => &mut self.crypto,
            Bucket::Hedge => &mut self.hedge,
        };
        *slot = value;
        self.total = self.bucket_sum();
    }

    pub fn bucket_sum(&self) -> f64 {
        Bucket::ALL.iter().map(|b| self.bucket(*b)).sum()
    }

    /// Restore the record's invariants after loading foreign data:
    /// non-finite amounts become zero, `total` equals the bucket sum and
    /// history is sorted by year with one entry per year (last one wins).
    pub fn normalize(&mut self) {
        for value in [
            &mut self.savings,
            &mut self.core,
            &mut self.growth,
            &mut self.crypto,
            &mut self.hedge,
        ] {
            if !value.is_finite() {
                *value = 0.0;
            }
        }
        self.total = self.bucket_sum();

        for snapshot in &mut self.history {
            if !snapshot.net_worth.is_finite() {
                snapshot.net_worth = 0.0;
            }
            if !snapshot.total_saved.is_finite() {
                snapshot.total_saved = 0.0;
            }
        }
        // Stable sort keeps insertion order within a year, so dedup keeps the last.
        self.history.sort_by_key(|s| s.year);
        let mut deduped: Vec<HistorySnapshot> = Vec::with_capacity(self.history.len());
        for snapshot in self.history.drain(..) {
            match deduped.last_mut() {
                Some(prev) if prev.year == snapshot.year => *prev = snapshot,
                _ => deduped.push(snapshot),
            }
        }
        self.history = deduped;
    }
}

/// Parse a user-entered amount the way the dashboard form does:
/// blank, non-numeric and non-finite input all count as zero.
pub fn parse_amount(text: &str) -> f64 {
    let cleaned: String = text.trim().chars().filter(|c| *c != ',').collect();
    match cleaned.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

/// Deserialize an amount that may have been stored as a number, a numeric
/// string (form inputs were persisted as typed), `null`, a boolean, or
/// something else entirely. Whatever doesn't yield a finite number is 0.
pub(crate) fn lenient_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()).unwrap_or(0.0),
        Value::String(s) => parse_amount(&s),
        Value::Bool(true) => 1.0,
        _ => 0.0,
    })
}

fn lenient_currency<'de, D>(deserializer: D) -> Result<Currency, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => Currency::Sgd,
        Value::String(code) => code.parse().unwrap_or_else(|_| {
            tracing::warn!(%code, "unknown stored currency, falling back to SGD");
            Currency::Sgd
        }),
        other => {
            tracing::warn!(value = %other, "stored currency is not a code, falling back to SGD");
            Currency::Sgd
        }
    })
}

/// Snapshots that can't be read (e.g. a year that isn't a number) are
/// dropped one by one; a history that isn't a list is dropped whole.
fn lenient_history<'de, D>(deserializer: D) -> Result<Vec<HistorySnapshot>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = match Value::deserialize(deserializer)? {
        Value::Array(entries) => entries,
        Value::Null => return Ok(Vec::new()),
        other => {
            tracing::warn!(value = %other, "stored history is not a list, ignoring it");
            return Ok(Vec::new());
        }
    };
    Ok(entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value::<HistorySnapshot>(entry.clone()) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                tracing::warn!(error = %e, entry = %entry, "dropping unreadable history snapshot");
                None
            }
        })
        .collect())
}
