use serde::{Deserialize, Serialize};

use super::bucket::Bucket;

/// Per-bucket allocation targets (SGD).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BucketTargets {
    pub core: f64,
    pub growth: f64,
    pub crypto: f64,
    pub hedge: f64,
}

impl Default for BucketTargets {
    fn default() -> Self {
        Self {
            core: 222_400.0,
            growth: 48_700.0,
            crypto: 73_000.0,
            hedge: 146_000.0,
        }
    }
}

impl BucketTargets {
    pub fn get(&self, bucket: Bucket) -> f64 {
        match bucket {
            Bucket::Core => self.core,
            Bucket::Growth => self.growth,
            Bucket::Crypto => self.crypto,
            Bucket::Hedge => self.hedge,
        }
    }
}

/// Financial-independence goals the portfolio is measured against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FiTargets {
    /// Lean FI: minimal spending tier (SGD)
    pub lean: f64,

    /// Full FI: comfortable spending tier (SGD)
    pub full: f64,

    /// Safe withdrawal rate used for the passive-income figure
    pub withdrawal_rate: f64,

    /// Calendar year the plan aims to reach FI
    pub fi_year: i32,

    /// Annual return assumed when estimating time to target
    pub expected_return: f64,

    pub buckets: BucketTargets,
}

impl Default for FiTargets {
    fn default() -> Self {
        Self {
            lean: 1_850_000.0,
            full: 2_500_000.0,
            withdrawal_rate: 0.04,
            fi_year: 2032,
            expected_return: 0.07,
            buckets: BucketTargets::default(),
        }
    }
}

/// One point on the projected trajectory:
/// `total * growth_multiplier + monthly_savings * savings_months`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub year: i32,
    pub growth_multiplier: f64,
    pub savings_months: f64,
}

impl Milestone {
    pub fn new(year: i32, growth_multiplier: f64, savings_months: f64) -> Self {
        Self {
            year,
            growth_multiplier,
            savings_months,
        }
    }
}

/// Milestones shown on the trajectory panel by default.
pub fn default_milestones() -> Vec<Milestone> {
    vec![Milestone::new(2025, 1.12, 6.0), Milestone::new(2026, 1.25, 18.0)]
}
