use chrono::{Datelike, NaiveDate};

use crate::errors::CoreError;
use crate::models::bucket::Bucket;
use crate::models::currency::{Currency, RateTable};
use crate::models::dashboard::{
    BucketStatus, BucketView, DashboardView, PerformanceRow, PerformanceView, ProgressView,
    TrajectoryPoint,
};
use crate::models::history::HistorySnapshot;
use crate::models::portfolio::PortfolioData;
use crate::models::targets::{FiTargets, Milestone};
use crate::services::currency_service::CurrencyService;

/// Longest horizon `months_to_target` will simulate (100 years).
const MAX_PROJECTION_MONTHS: u32 = 1200;

/// Computes everything the dashboard shows: FI progress, bucket status,
/// passive income, projections and historical performance.
///
/// All inputs are SGD; `build_view` converts the results to the display
/// currency at the end. Percentages do not depend on currency.
pub struct AnalyticsService {
    currency_service: CurrencyService,
}

impl AnalyticsService {
    pub fn new() -> Self {
        Self {
            currency_service: CurrencyService::new(),
        }
    }

    /// `current / target × 100`, or 0 when the target is not positive.
    pub fn percent_of(&self, current: f64, target: f64) -> f64 {
        if !target.is_finite() || target <= 0.0 {
            return 0.0;
        }
        let pct = current / target * 100.0;
        if pct.is_finite() {
            pct
        } else {
            0.0
        }
    }

    pub fn bucket_status(&self, current: f64, target: f64) -> BucketStatus {
        let pct = self.percent_of(current, target);
        if (95.0..=105.0).contains(&pct) {
            BucketStatus::OnTarget
        } else if (80.0..=120.0).contains(&pct) {
            BucketStatus::Drifting
        } else {
            BucketStatus::OffTrack
        }
    }

    /// Monthly income from withdrawing `withdrawal_rate` of `total` per year.
    pub fn passive_monthly(&self, total: f64, withdrawal_rate: f64) -> f64 {
        total * withdrawal_rate / 12.0
    }

    /// Compound annual growth rate: `(end / start)^(1 / years) − 1`.
    ///
    /// Returns `None` when the inputs don't describe a growth path
    /// (non-positive start or horizon, negative end, non-finite values).
    pub fn cagr(&self, start: f64, end: f64, years: f64) -> Option<f64> {
        if !start.is_finite() || !end.is_finite() || !years.is_finite() {
            return None;
        }
        if start <= 0.0 || end < 0.0 || years <= 0.0 {
            return None;
        }
        let rate = (end / start).powf(1.0 / years) - 1.0;
        rate.is_finite().then_some(rate)
    }

    /// Projected value at each milestone:
    /// `total × growth_multiplier + savings × savings_months`.
    pub fn trajectory(&self, total: f64, monthly_savings: f64, milestones: &[Milestone]) -> Vec<TrajectoryPoint> {
        milestones
            .iter()
            .map(|m| TrajectoryPoint {
                year: m.year,
                value: total * m.growth_multiplier + monthly_savings * m.savings_months,
            })
            .collect()
    }

    /// Whole years left until the FI year, never negative.
    pub fn years_to_fi(&self, today: NaiveDate, fi_year: i32) -> i32 {
        (fi_year - today.year()).max(0)
    }

    /// Months until `target` is reached when `total` compounds monthly at
    /// `annual_return` and `monthly_savings` is added at each month end.
    /// `None` if the target is not reached within 100 years.
    pub fn months_to_target(
        &self,
        total: f64,
        monthly_savings: f64,
        annual_return: f64,
        target: f64,
    ) -> Option<u32> {
        if !total.is_finite() || !monthly_savings.is_finite() || !annual_return.is_finite() {
            return None;
        }
        if total >= target {
            return Some(0);
        }
        let monthly_rate = (1.0 + annual_return).powf(1.0 / 12.0) - 1.0;
        let mut value = total;
        for month in 1..=MAX_PROJECTION_MONTHS {
            value = value * (1.0 + monthly_rate) + monthly_savings;
            if value >= target {
                return Some(month);
            }
        }
        None
    }

    /// Historical performance table with year-over-year growth and the
    /// CAGR between the first and last snapshot.
    pub fn performance(
        &self,
        history: &[HistorySnapshot],
        rates: &RateTable,
        currency: Currency,
    ) -> Result<PerformanceView, CoreError> {
        let mut rows = Vec::with_capacity(history.len());
        let mut previous: Option<&HistorySnapshot> = None;

        for snapshot in history {
            let growth_pct = previous.and_then(|prev| {
                (prev.net_worth > 0.0)
                    .then(|| (snapshot.net_worth - prev.net_worth) / prev.net_worth * 100.0)
            });
            rows.push(PerformanceRow {
                year: snapshot.year,
                net_worth: self.currency_service.convert(rates, snapshot.net_worth, currency)?,
                total_saved: self.currency_service.convert(rates, snapshot.total_saved, currency)?,
                investment_gain: self
                    .currency_service
                    .convert(rates, snapshot.investment_gain(), currency)?,
                growth_pct,
            });
            previous = Some(snapshot);
        }

        let cagr_pct = match (history.first(), history.last()) {
            (Some(first), Some(last)) => self
                .cagr(first.net_worth, last.net_worth, f64::from(last.year - first.year))
                .map(|r| r * 100.0),
            _ => None,
        };

        Ok(PerformanceView {
            currency,
            rows,
            cagr_pct,
        })
    }

    /// Assemble the full dashboard for `data` in its display currency.
    ///
    /// The total shown is always the bucket sum, never the stored field.
    pub fn build_view(
        &self,
        data: &PortfolioData,
        targets: &FiTargets,
        rates: &RateTable,
        milestones: &[Milestone],
        today: NaiveDate,
    ) -> Result<DashboardView, CoreError> {
        let currency = data.currency;
        let total = data.bucket_sum();
        let convert = |amount: f64| self.currency_service.convert(rates, amount, currency);

        let progress = |target: f64| -> Result<ProgressView, CoreError> {
            let percent = self.percent_of(total, target);
            Ok(ProgressView {
                target: convert(target)?,
                percent,
                bar_width: percent.clamp(0.0, 100.0),
            })
        };

        let buckets = Bucket::ALL
            .iter()
            .map(|&bucket| {
                let value = data.bucket(bucket);
                let target = targets.buckets.get(bucket);
                Ok(BucketView {
                    bucket,
                    value: convert(value)?,
                    target: convert(target)?,
                    percent: self.percent_of(value, target),
                    status: self.bucket_status(value, target),
                })
            })
            .collect::<Result<Vec<_>, CoreError>>()?;

        let trajectory = self
            .trajectory(total, data.savings, milestones)
            .into_iter()
            .map(|p| {
                Ok(TrajectoryPoint {
                    year: p.year,
                    value: convert(p.value)?,
                })
            })
            .collect::<Result<Vec<_>, CoreError>>()?;

        Ok(DashboardView {
            currency,
            total: convert(total)?,
            monthly_savings: convert(data.savings)?,
            passive_monthly: convert(self.passive_monthly(total, targets.withdrawal_rate))?,
            withdrawal_rate: targets.withdrawal_rate,
            lean: progress(targets.lean)?,
            full: progress(targets.full)?,
            buckets,
            trajectory,
            fi_year: targets.fi_year,
            years_to_fi: self.years_to_fi(today, targets.fi_year),
            months_to_lean: self.months_to_target(
                total,
                data.savings,
                targets.expected_return,
                targets.lean,
            ),
        })
    }
}

impl Default for AnalyticsService {
    fn default() -> Self {
        Self::new()
    }
}
