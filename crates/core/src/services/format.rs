//! Display formatting for money and percentages.
//!
//! Non-finite input (NaN, ±∞) and zero render as zero rather than leaking
//! "NaN" into the dashboard.

use crate::models::currency::Currency;

/// Round to a whole number and group thousands with commas: `487,010`.
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() || value == 0.0 {
        return "0".to_string();
    }
    let rounded = value.round();
    if rounded == 0.0 {
        return "0".to_string();
    }
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if rounded < 0.0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// One decimal place: `26.3`.
pub fn format_percent(value: f64) -> String {
    if !value.is_finite() || value == 0.0 {
        return "0.0".to_string();
    }
    format!("{value:.1}")
}

/// Short form used for target labels: `1.85M`, `2.5M`, `48.7K`.
///
/// The scale is picked after rounding, so `999_999` is `1M` and `999.6` is `1K`.
pub fn format_compact(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    if value.round().abs() >= 1_000.0 {
        for (unit, suffix) in [(1_000_000.0, "M"), (1_000.0, "K")] {
            let scaled = (value / unit * 100.0).round() / 100.0;
            if scaled.abs() >= 1.0 {
                let text = format!("{scaled:.2}");
                let text = text.trim_end_matches('0').trim_end_matches('.');
                return format!("{text}{suffix}");
            }
        }
    }
    format_amount(value)
}

/// Currency code followed by the grouped amount: `SGD 487,010`.
pub fn format_money(currency: Currency, value: f64) -> String {
    format!("{} {}", currency.code(), format_amount(value))
}
