use crate::models::advice::{Advice, AdviceSeverity, AdviceTopic};
use crate::models::dashboard::{BucketStatus, DashboardView, PerformanceView};
use crate::services::format::{format_amount, format_percent};

/// Builds the coach panel from fixed message templates.
///
/// Works on an already-computed [`DashboardView`], so every amount it
/// quotes is in the display currency. No scoring, no inference: each rule
/// either fires or doesn't.
pub struct AdviceService;

impl AdviceService {
    pub fn new() -> Self {
        Self
    }

    /// All messages for the current state, most severe first.
    pub fn advise(&self, view: &DashboardView, performance: Option<&PerformanceView>) -> Vec<Advice> {
        let mut advice = Vec::new();
        advice.push(self.milestone(view));
        advice.extend(self.buckets(view));
        if let Some(msg) = self.savings(view) {
            advice.push(msg);
        }
        if let Some(msg) = performance.and_then(|p| self.history(p)) {
            advice.push(msg);
        }
        // Stable sort keeps template order within a severity.
        advice.sort_by(|a, b| b.severity.cmp(&a.severity));
        advice
    }

    fn milestone(&self, view: &DashboardView) -> Advice {
        let pct = view.lean.percent;
        let shown = format_percent(pct);
        let message = if pct >= 100.0 {
            format!(
                "Lean FI reached ({shown}%). Full FI is {}% of the way there.",
                format_percent(view.full.percent)
            )
        } else if pct >= 75.0 {
            format!("{shown}% to Lean FI. The final quarter: keep contributions steady and avoid new risk.")
        } else if pct >= 50.0 {
            format!("{shown}% to Lean FI. Past halfway; compounding now does more of the work than savings.")
        } else if pct >= 25.0 {
            format!("{shown}% to Lean FI. Contributions still dominate growth at this stage.")
        } else {
            format!("{shown}% to Lean FI. Early days: savings rate matters more than returns.")
        };
        Advice::new(AdviceSeverity::Info, AdviceTopic::Milestone, message)
    }

    fn buckets(&self, view: &DashboardView) -> Vec<Advice> {
        let code = view.currency.code();
        view.buckets
            .iter()
            .filter(|b| b.target > 0.0)
            .map(|b| {
                let label = b.bucket.label();
                let pct = format_percent(b.percent);
                let topic = AdviceTopic::Bucket(b.bucket);
                match b.status {
                    BucketStatus::OnTarget => Advice::new(
                        AdviceSeverity::Info,
                        topic,
                        format!("{label} is on target at {pct}%."),
                    ),
                    _ if b.percent < 100.0 => {
                        let gap = b.target - b.value;
                        let severity = if b.status == BucketStatus::OffTrack {
                            AdviceSeverity::Suggestion
                        } else {
                            AdviceSeverity::Info
                        };
                        Advice::new(
                            severity,
                            topic,
                            format!(
                                "{label} is at {pct}% of target, {code} {} short. Direct new savings here first.",
                                format_amount(gap)
                            ),
                        )
                    }
                    _ => {
                        let excess = b.value - b.target;
                        let severity = if b.status == BucketStatus::OffTrack {
                            AdviceSeverity::Warning
                        } else {
                            AdviceSeverity::Info
                        };
                        Advice::new(
                            severity,
                            topic,
                            format!(
                                "{label} is at {pct}% of target, {code} {} over. Consider rebalancing the excess.",
                                format_amount(excess)
                            ),
                        )
                    }
                }
            })
            .collect()
    }

    fn savings(&self, view: &DashboardView) -> Option<Advice> {
        let gap = view.lean.target - view.total;
        if gap <= 0.0 {
            return None;
        }
        if view.monthly_savings <= 0.0 {
            return Some(Advice::new(
                AdviceSeverity::Warning,
                AdviceTopic::Savings,
                "No monthly savings recorded. Growth alone has to close the Lean FI gap.",
            ));
        }
        let months = (gap / view.monthly_savings).ceil();
        let mut message = format!(
            "At {} {} a month, contributions alone close the Lean FI gap in {} months.",
            view.currency.code(),
            format_amount(view.monthly_savings),
            format_amount(months)
        );
        if let Some(m) = view.months_to_lean {
            message.push_str(&format!(
                " With expected returns: about {:.1} years.",
                f64::from(m) / 12.0
            ));
        }
        Some(Advice::new(AdviceSeverity::Info, AdviceTopic::Savings, message))
    }

    fn history(&self, performance: &PerformanceView) -> Option<Advice> {
        let cagr = performance.cagr_pct?;
        let first = performance.rows.first()?;
        let last = performance.rows.last()?;
        let severity = if cagr < 0.0 {
            AdviceSeverity::Warning
        } else {
            AdviceSeverity::Info
        };
        Some(Advice::new(
            severity,
            AdviceTopic::History,
            format!(
                "Net worth compounded at {}% a year from {} to {}.",
                format_percent(cagr),
                first.year,
                last.year
            ),
        ))
    }
}

impl Default for AdviceService {
    fn default() -> Self {
        Self::new()
    }
}
