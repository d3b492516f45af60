//! Plain-text rendering of the dashboard panels.

use fi_dashboard_core::models::advice::Advice;
use fi_dashboard_core::models::currency::{Currency, RateTable};
use fi_dashboard_core::models::dashboard::{DashboardView, PerformanceView, ProgressView};
use fi_dashboard_core::services::format::{
    format_amount, format_compact, format_money, format_percent,
};
use std::fmt::Write;

const BAR_WIDTH: usize = 30;

pub fn dashboard(view: &DashboardView) -> String {
    let c = view.currency;
    let mut out = String::new();

    let _ = writeln!(out, "Strategic Command Center");
    let _ = writeln!(out, "Investment Dashboard\n");

    let _ = writeln!(out, "  Total Portfolio    {}", format_money(c, view.total));
    let _ = writeln!(
        out,
        "  Passive Monthly    {}  ({}% withdrawal)",
        format_money(c, view.passive_monthly),
        format_percent(view.withdrawal_rate * 100.0).trim_end_matches(".0")
    );
    let _ = writeln!(out, "  Monthly Savings    {}\n", format_money(c, view.monthly_savings));

    progress(&mut out, "Lean FI", c, view.total, &view.lean);
    progress(&mut out, "Full FI", c, view.total, &view.full);

    let _ = writeln!(out, "\nPortfolio Buckets");
    for b in &view.buckets {
        let _ = writeln!(
            out,
            "  {:<16} {:>16}   target {:>16}   {:>6}%  {}",
            b.bucket.label(),
            format_money(c, b.value),
            format_money(c, b.target),
            format_percent(b.percent),
            b.status
        );
    }

    let _ = writeln!(out, "\nTrajectory Analysis");
    for point in &view.trajectory {
        let _ = writeln!(out, "  End of {}        {}", point.year, format_money(c, point.value));
    }
    let _ = writeln!(out, "  Years to FI-{}    {}", view.fi_year, view.years_to_fi);
    match view.months_to_lean {
        Some(0) => {
            let _ = writeln!(out, "  Lean FI            reached");
        }
        Some(months) => {
            let _ = writeln!(out, "  Lean FI in        ~{:.1} years at expected returns", f64::from(months) / 12.0);
        }
        None => {
            let _ = writeln!(out, "  Lean FI in        not reachable at current savings");
        }
    }
    out
}

fn progress(out: &mut String, name: &str, c: Currency, total: f64, p: &ProgressView) {
    // bar_width is already capped at 100; the cast only drops the fraction.
    let filled = ((p.bar_width / 100.0) * BAR_WIDTH as f64).round() as usize;
    let _ = writeln!(
        out,
        "  {name:<8} {:>6}%  [{}{}]  {} / {} {}",
        format_percent(p.percent),
        "#".repeat(filled),
        ".".repeat(BAR_WIDTH - filled.min(BAR_WIDTH)),
        format_money(c, total),
        c.code(),
        format_compact(p.target)
    );
}

pub fn performance(view: &PerformanceView) -> String {
    let c = view.currency.code();
    let mut out = String::new();
    let _ = writeln!(out, "Historical Performance ({c})");
    let _ = writeln!(
        out,
        "  {:<6} {:>14} {:>14} {:>14} {:>8}",
        "Year", "Net worth", "Total saved", "Gain", "YoY"
    );
    for row in &view.rows {
        let yoy = row
            .growth_pct
            .map(|g| format!("{}%", format_percent(g)))
            .unwrap_or_else(|| "-".to_string());
        let _ = writeln!(
            out,
            "  {:<6} {:>14} {:>14} {:>14} {:>8}",
            row.year,
            format_amount(row.net_worth),
            format_amount(row.total_saved),
            format_amount(row.investment_gain),
            yoy
        );
    }
    match view.cagr_pct {
        Some(cagr) => {
            let _ = writeln!(out, "  CAGR: {}%", format_percent(cagr));
        }
        None => {
            let _ = writeln!(out, "  CAGR: n/a");
        }
    }
    out
}

pub fn advice(items: &[Advice]) -> String {
    let mut out = String::from("AI Coach\n");
    for item in items {
        let _ = writeln!(out, "  [{:<10}] {}", item.severity.to_string(), item.message);
    }
    out
}

pub fn rates(table: &RateTable) -> String {
    let mut out = String::new();
    let as_of = table
        .as_of
        .map(|d| d.to_string())
        .unwrap_or_else(|| "built-in".to_string());
    let _ = writeln!(out, "Exchange rates (1 {} =), source: {}, as of {}", Currency::BASE, table.source, as_of);
    for (currency, rate) in table.iter() {
        let mark = if table.is_overridden(currency) { " (manual)" } else { "" };
        let _ = writeln!(out, "  {:<4} {:>12.4}  {}{}", currency.code(), rate, currency.name(), mark);
    }
    out
}
