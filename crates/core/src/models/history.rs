use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::portfolio::lenient_amount;

/// Year-end snapshot of the portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistorySnapshot {
    #[serde(deserialize_with = "lenient_year")]
    pub year: i32,

    /// Net worth at year end (SGD)
    #[serde(default, deserialize_with = "lenient_amount")]
    pub net_worth: f64,

    /// Cumulative contributions up to year end (SGD)
    #[serde(default, deserialize_with = "lenient_amount")]
    pub total_saved: f64,
}

impl HistorySnapshot {
    pub fn new(year: i32, net_worth: f64, total_saved: f64) -> Self {
        Self {
            year,
            net_worth,
            total_saved,
        }
    }

    /// Market gains on top of contributions.
    pub fn investment_gain(&self) -> f64 {
        self.net_worth - self.total_saved
    }
}

/// A year stored as a whole number or as a numeric string (`"2024"`).
fn lenient_year<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let year = match &value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    year.and_then(|y| i32::try_from(y).ok())
        .ok_or_else(|| de::Error::custom(format!("invalid year: {value}")))
}

/// Built-in performance table shipped with a fresh dashboard.
pub fn default_history() -> Vec<HistorySnapshot> {
    vec![
        HistorySnapshot::new(2020, 152_400.0, 128_000.0),
        HistorySnapshot::new(2021, 221_800.0, 176_000.0),
        HistorySnapshot::new(2022, 238_600.0, 226_000.0),
        HistorySnapshot::new(2023, 318_900.0, 280_000.0),
        HistorySnapshot::new(2024, 421_300.0, 340_000.0),
        HistorySnapshot::new(2025, 487_010.0, 382_000.0),
    ]
}
