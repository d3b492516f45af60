use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::CoreError;

/// A named allocation category of the portfolio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    /// Core Growth: broad index exposure
    Core,
    /// Alpha Growth: concentrated / active positions
    Growth,
    /// Crypto Hedge
    Crypto,
    /// Stability Hedge: bonds, cash, gold
    Hedge,
}

impl Bucket {
    /// All buckets in display order.
    pub const ALL: [Bucket; 4] = [Bucket::Core, Bucket::Growth, Bucket::Crypto, Bucket::Hedge];

    /// Field name used in the persisted record.
    pub fn key(&self) -> &'static str {
        match self {
            Bucket::Core => "core",
            Bucket::Growth => "growth",
            Bucket::Crypto => "crypto",
            Bucket::Hedge => "hedge",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Bucket::Core => "Core Growth",
            Bucket::Growth => "Alpha Growth",
            Bucket::Crypto => "Crypto Hedge",
            Bucket::Hedge => "Stability Hedge",
        }
    }
}

impl std::fmt::Display for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Bucket {
    type Err = CoreError;

    /// Accepts either the storage key (`core`) or the label (`Core Growth`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Bucket::ALL
            .into_iter()
            .find(|b| b.key() == needle || b.label().to_lowercase() == needle)
            .ok_or_else(|| CoreError::ValidationError(format!("Unknown bucket '{s}'")))
    }
}
