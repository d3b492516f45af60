use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::CoreError;
use crate::models::bucket::Bucket;
use crate::models::history::HistorySnapshot;
use crate::models::portfolio::{parse_amount, PortfolioData};

/// A field of the edit form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EditField {
    Bucket(Bucket),
    MonthlySavings,
}

impl EditField {
    pub const ALL: [EditField; 5] = [
        EditField::Bucket(Bucket::Core),
        EditField::Bucket(Bucket::Growth),
        EditField::Bucket(Bucket::Crypto),
        EditField::Bucket(Bucket::Hedge),
        EditField::MonthlySavings,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            EditField::Bucket(b) => b.label(),
            EditField::MonthlySavings => "Monthly Savings",
        }
    }
}

impl FromStr for EditField {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "savings" | "monthly savings" => Ok(EditField::MonthlySavings),
            _ => s.parse::<Bucket>().map(EditField::Bucket),
        }
    }
}

/// Raw text of the edit form, as typed. Nothing is parsed until save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditDraft {
    pub core: String,
    pub growth: String,
    pub crypto: String,
    pub hedge: String,
    pub savings: String,
}

impl EditDraft {
    pub fn get(&self, field: EditField) -> &str {
        match field {
            EditField::Bucket(Bucket::Core) => &self.core,
            EditField::Bucket(Bucket::Growth) => &self.growth,
            EditField::Bucket(Bucket::Crypto) => &self.crypto,
            EditField::Bucket(Bucket::Hedge) => &self.hedge,
            EditField::MonthlySavings => &self.savings,
        }
    }

    pub fn set(&mut self, field: EditField, text: impl Into<String>) {
        let slot = match field {
            EditField::Bucket(Bucket::Core) => &mut self.core,
            EditField::Bucket(Bucket::Growth) => &mut self.growth,
            EditField::Bucket(Bucket::Crypto) => &mut self.crypto,
            EditField::Bucket(Bucket::Hedge) => &mut self.hedge,
            EditField::MonthlySavings => &mut self.savings,
        };
        *slot = text.into();
    }
}

/// Edits to the portfolio record.
///
/// Pure business logic, no I/O. Persistence is the caller's job.
pub struct PortfolioService;

impl PortfolioService {
    pub fn new() -> Self {
        Self
    }

    /// Pre-fill the edit form with the current values.
    /// Zero balances start as empty inputs.
    pub fn open_edit(&self, data: &PortfolioData) -> EditDraft {
        let text = |v: f64| if v == 0.0 { String::new() } else { v.to_string() };
        EditDraft {
            core: text(data.core),
            growth: text(data.growth),
            crypto: text(data.crypto),
            hedge: text(data.hedge),
            savings: text(data.savings),
        }
    }

    /// Apply a submitted form to the record.
    ///
    /// Every field goes through [`parse_amount`] (blank or garbage → 0).
    /// Negative balances are rejected. The total is recomputed from the
    /// buckets; currency and history are carried over untouched.
    pub fn save_edit(
        &self,
        data: &PortfolioData,
        draft: &EditDraft,
    ) -> Result<PortfolioData, CoreError> {
        let mut updated = data.clone();
        for field in EditField::ALL {
            let value = parse_amount(draft.get(field));
            if value < 0.0 {
                return Err(CoreError::ValidationError(format!(
                    "{} cannot be negative (got {value})",
                    field.label()
                )));
            }
            match field {
                EditField::Bucket(b) => updated.set_bucket(b, value),
                EditField::MonthlySavings => updated.savings = value,
            }
        }
        Ok(updated)
    }

    /// Set a single bucket balance directly.
    pub fn set_bucket(
        &self,
        data: &mut PortfolioData,
        bucket: Bucket,
        value: f64,
    ) -> Result<(), CoreError> {
        Self::validate_amount(bucket.label(), value)?;
        data.set_bucket(bucket, value);
        Ok(())
    }

    pub fn set_monthly_savings(&self, data: &mut PortfolioData, value: f64) -> Result<(), CoreError> {
        Self::validate_amount("Monthly Savings", value)?;
        data.savings = value;
        Ok(())
    }

    /// Insert or replace the snapshot for `snapshot.year`, keeping history sorted.
    pub fn upsert_snapshot(
        &self,
        data: &mut PortfolioData,
        snapshot: HistorySnapshot,
    ) -> Result<(), CoreError> {
        Self::validate_amount("Net worth", snapshot.net_worth)?;
        Self::validate_amount("Total saved", snapshot.total_saved)?;
        match data
            .history
            .binary_search_by_key(&snapshot.year, |s| s.year)
        {
            Ok(idx) => data.history[idx] = snapshot,
            Err(idx) => data.history.insert(idx, snapshot),
        }
        Ok(())
    }

    pub fn remove_snapshot(&self, data: &mut PortfolioData, year: i32) -> Result<HistorySnapshot, CoreError> {
        let idx = data
            .history
            .iter()
            .position(|s| s.year == year)
            .ok_or(CoreError::SnapshotNotFound(year))?;
        Ok(data.history.remove(idx))
    }

    fn validate_amount(what: &str, value: f64) -> Result<(), CoreError> {
        if !value.is_finite() || value < 0.0 {
            return Err(CoreError::ValidationError(format!(
                "{what} must be a finite, non-negative amount (got {value})"
            )));
        }
        Ok(())
    }
}

impl Default for PortfolioService {
    fn default() -> Self {
        Self::new()
    }
}
