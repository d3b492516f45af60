use serde::{Deserialize, Serialize};

use super::bucket::Bucket;
use super::currency::Currency;

/// How close a bucket is to its allocation target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BucketStatus {
    /// 95–105 % of target
    OnTarget,
    /// 80–120 % of target
    Drifting,
    /// Anything further off
    OffTrack,
}

impl std::fmt::Display for BucketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BucketStatus::OnTarget => write!(f, "on target"),
            BucketStatus::Drifting => write!(f, "drifting"),
            BucketStatus::OffTrack => write!(f, "off track"),
        }
    }
}

/// Progress toward one FI tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressView {
    /// Target in the display currency
    pub target: f64,

    /// Percent of target reached (may exceed 100)
    pub percent: f64,

    /// Width of the progress bar, capped at 100
    pub bar_width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketView {
    pub bucket: Bucket,

    /// Balance in the display currency
    pub value: f64,

    /// Target in the display currency
    pub target: f64,

    pub percent: f64,
    pub status: BucketStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryPoint {
    pub year: i32,

    /// Projected year-end value in the display currency
    pub value: f64,
}

/// Everything the dashboard page renders, already converted to the
/// display currency. The core computes this; front ends only format it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    pub currency: Currency,
    pub total: f64,
    pub monthly_savings: f64,

    /// Monthly income at `withdrawal_rate`
    pub passive_monthly: f64,
    pub withdrawal_rate: f64,

    pub lean: ProgressView,
    pub full: ProgressView,
    pub buckets: Vec<BucketView>,
    pub trajectory: Vec<TrajectoryPoint>,
    pub fi_year: i32,
    pub years_to_fi: i32,

    /// Months until Lean FI at the current savings rate, if reachable
    pub months_to_lean: Option<u32>,
}

/// One row of the historical performance table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceRow {
    pub year: i32,
    pub net_worth: f64,
    pub total_saved: f64,
    pub investment_gain: f64,

    /// Net worth growth over the previous row, in percent
    pub growth_pct: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceView {
    pub currency: Currency,
    pub rows: Vec<PerformanceRow>,

    /// Compound annual growth from the first to the last row, in percent
    pub cagr_pct: Option<f64>,
}
