// ═══════════════════════════════════════════════════════════════════
// Service Tests — Format, Currency, Analytics, Portfolio, Advice
// ═══════════════════════════════════════════════════════════════════

use chrono::NaiveDate;
use fi_dashboard_core::errors::CoreError;
use fi_dashboard_core::models::advice::{AdviceSeverity, AdviceTopic};
use fi_dashboard_core::models::bucket::Bucket;
use fi_dashboard_core::models::currency::{Currency, RateTable};
use fi_dashboard_core::models::dashboard::{BucketStatus, DashboardView};
use fi_dashboard_core::models::history::{default_history, HistorySnapshot};
use fi_dashboard_core::models::portfolio::PortfolioData;
use fi_dashboard_core::models::targets::{default_milestones, FiTargets, Milestone};
use fi_dashboard_core::services::advice_service::AdviceService;
use fi_dashboard_core::services::analytics_service::AnalyticsService;
use fi_dashboard_core::services::currency_service::CurrencyService;
use fi_dashboard_core::services::format::{
    format_amount, format_compact, format_money, format_percent,
};
use fi_dashboard_core::services::portfolio_service::{EditField, PortfolioService};

// ═══════════════════════════════════════════════════════════════════
// Test Helpers
// ═══════════════════════════════════════════════════════════════════

fn mid_2025() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 30).unwrap()
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

fn view_of(data: &PortfolioData) -> DashboardView {
    AnalyticsService::new()
        .build_view(
            data,
            &FiTargets::default(),
            &RateTable::default(),
            &default_milestones(),
            mid_2025(),
        )
        .unwrap()
}

// ═══════════════════════════════════════════════════════════════════
// Formatting
// ═══════════════════════════════════════════════════════════════════

mod format {
    use super::*;

    #[test]
    fn amount_grouping() {
        assert_eq!(format_amount(999.0), "999");
        assert_eq!(format_amount(1_000.0), "1,000");
        assert_eq!(format_amount(487_010.0), "487,010");
        assert_eq!(format_amount(1_234_567.0), "1,234,567");
    }

    #[test]
    fn amount_rounds() {
        assert_eq!(format_amount(1_575.75), "1,576");
        assert_eq!(format_amount(0.4), "0");
    }

    #[test]
    fn amount_negative() {
        assert_eq!(format_amount(-1_234.4), "-1,234");
    }

    #[test]
    fn amount_non_finite_is_zero() {
        assert_eq!(format_amount(f64::NAN), "0");
        assert_eq!(format_amount(f64::INFINITY), "0");
        assert_eq!(format_amount(0.0), "0");
    }

    #[test]
    fn percent_one_decimal() {
        assert_eq!(format_percent(25.5527), "25.6");
        assert_eq!(format_percent(100.0), "100.0");
        assert_eq!(format_percent(f64::NAN), "0.0");
    }

    #[test]
    fn compact_targets() {
        assert_eq!(format_compact(1_850_000.0), "1.85M");
        assert_eq!(format_compact(2_500_000.0), "2.5M");
        assert_eq!(format_compact(1_000_000.0), "1M");
        assert_eq!(format_compact(48_700.0), "48.7K");
        assert_eq!(format_compact(222_400.0), "222.4K");
        assert_eq!(format_compact(500.0), "500");
    }

    #[test]
    fn compact_rescales_after_rounding() {
        assert_eq!(format_compact(999_999.0), "1M");
        assert_eq!(format_compact(999.6), "1K");
        assert_eq!(format_compact(999.4), "999");
        assert_eq!(format_compact(-999_999.0), "-1M");
        assert_eq!(format_compact(994_400.0), "994.4K");
    }

    #[test]
    fn money_prefix() {
        assert_eq!(format_money(Currency::Sgd, 487_010.0), "SGD 487,010");
        assert_eq!(format_money(Currency::Usd, 1_000.0), "USD 1,000");
    }
}

// ═══════════════════════════════════════════════════════════════════
// CurrencyService
// ═══════════════════════════════════════════════════════════════════

mod currency_service {
    use super::*;

    #[test]
    fn convert_from_base() {
        let svc = CurrencyService::new();
        let rates = RateTable::default();
        assert!(approx(svc.convert(&rates, 1_000.0, Currency::Usd).unwrap(), 740.0));
        assert_eq!(svc.convert(&rates, 1_000.0, Currency::Sgd).unwrap(), 1_000.0);
    }

    #[test]
    fn round_trip_through_every_currency() {
        let svc = CurrencyService::new();
        let rates = RateTable::default();
        for c in Currency::ALL {
            let shown = svc.convert(&rates, 472_725.0, c).unwrap();
            let back = svc.to_base(&rates, shown, c).unwrap();
            assert!((back - 472_725.0).abs() < 1e-6, "{c}: {back}");
        }
    }

    #[test]
    fn convert_between_goes_through_base() {
        let svc = CurrencyService::new();
        let rates = RateTable::default();
        let eur = svc
            .convert_between(&rates, 100.0, Currency::Usd, Currency::Eur)
            .unwrap();
        assert!(approx(eur, 100.0 / 0.74 * 0.68));
        assert_eq!(
            svc.convert_between(&rates, 42.0, Currency::Jpy, Currency::Jpy).unwrap(),
            42.0
        );
    }

    #[test]
    fn missing_rate_errors() {
        let svc = CurrencyService::new();
        let rates: RateTable = serde_json::from_str(r#"{"rates":{}}"#).unwrap();
        assert!(matches!(
            svc.convert(&rates, 1.0, Currency::Usd),
            Err(CoreError::RateNotAvailable(_))
        ));
    }
}

// ═══════════════════════════════════════════════════════════════════
// AnalyticsService — scalar helpers
// ═══════════════════════════════════════════════════════════════════

mod analytics {
    use super::*;

    #[test]
    fn percent_of() {
        let svc = AnalyticsService::new();
        assert!(approx(svc.percent_of(50.0, 200.0), 25.0));
        assert!(approx(svc.percent_of(300.0, 200.0), 150.0));
    }

    #[test]
    fn percent_of_non_positive_target() {
        let svc = AnalyticsService::new();
        assert_eq!(svc.percent_of(100.0, 0.0), 0.0);
        assert_eq!(svc.percent_of(100.0, -5.0), 0.0);
        assert_eq!(svc.percent_of(100.0, f64::NAN), 0.0);
    }

    #[test]
    fn bucket_status_bands() {
        let svc = AnalyticsService::new();
        assert_eq!(svc.bucket_status(100.0, 100.0), BucketStatus::OnTarget);
        assert_eq!(svc.bucket_status(95.0, 100.0), BucketStatus::OnTarget);
        assert_eq!(svc.bucket_status(105.0, 100.0), BucketStatus::OnTarget);
        assert_eq!(svc.bucket_status(80.0, 100.0), BucketStatus::Drifting);
        assert_eq!(svc.bucket_status(120.0, 100.0), BucketStatus::Drifting);
        assert_eq!(svc.bucket_status(79.0, 100.0), BucketStatus::OffTrack);
        assert_eq!(svc.bucket_status(121.0, 100.0), BucketStatus::OffTrack);
    }

    #[test]
    fn passive_monthly() {
        let svc = AnalyticsService::new();
        assert!(approx(svc.passive_monthly(472_725.0, 0.04), 1_575.75));
    }

    #[test]
    fn cagr() {
        let svc = AnalyticsService::new();
        assert!(approx(svc.cagr(100.0, 121.0, 2.0).unwrap(), 0.1));
        assert!(approx(svc.cagr(100.0, 100.0, 5.0).unwrap(), 0.0));
    }

    #[test]
    fn cagr_rejects_degenerate_input() {
        let svc = AnalyticsService::new();
        assert_eq!(svc.cagr(0.0, 100.0, 2.0), None);
        assert_eq!(svc.cagr(100.0, 200.0, 0.0), None);
        assert_eq!(svc.cagr(100.0, -1.0, 2.0), None);
        assert_eq!(svc.cagr(f64::NAN, 1.0, 1.0), None);
    }

    #[test]
    fn trajectory_defaults() {
        let svc = AnalyticsService::new();
        let points = svc.trajectory(472_725.0, 7_000.0, &default_milestones());
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].year, 2025);
        assert!(approx(points[0].value, 571_452.0));
        assert_eq!(points[1].year, 2026);
        assert!(approx(points[1].value, 716_906.25));
    }

    #[test]
    fn trajectory_custom_milestones() {
        let svc = AnalyticsService::new();
        let points = svc.trajectory(100.0, 10.0, &[Milestone::new(2030, 2.0, 12.0)]);
        assert!(approx(points[0].value, 320.0));
    }

    #[test]
    fn years_to_fi() {
        let svc = AnalyticsService::new();
        assert_eq!(svc.years_to_fi(mid_2025(), 2032), 7);
        assert_eq!(svc.years_to_fi(NaiveDate::from_ymd_opt(2031, 1, 1).unwrap(), 2032), 1);
        assert_eq!(svc.years_to_fi(NaiveDate::from_ymd_opt(2040, 1, 1).unwrap(), 2032), 0);
    }

    #[test]
    fn months_to_target_savings_only() {
        let svc = AnalyticsService::new();
        assert_eq!(svc.months_to_target(0.0, 100.0, 0.0, 1_000.0), Some(10));
    }

    #[test]
    fn months_to_target_already_reached() {
        let svc = AnalyticsService::new();
        assert_eq!(svc.months_to_target(2_000.0, 0.0, 0.07, 1_000.0), Some(0));
    }

    #[test]
    fn months_to_target_unreachable() {
        let svc = AnalyticsService::new();
        assert_eq!(svc.months_to_target(100.0, 0.0, 0.0, 1_000.0), None);
        assert_eq!(svc.months_to_target(f64::NAN, 100.0, 0.0, 1_000.0), None);
    }

    #[test]
    fn months_to_target_returns_shorten_the_wait() {
        let svc = AnalyticsService::new();
        let flat = svc.months_to_target(472_725.0, 7_000.0, 0.0, 1_850_000.0).unwrap();
        let compounding = svc.months_to_target(472_725.0, 7_000.0, 0.07, 1_850_000.0).unwrap();
        assert_eq!(flat, 197);
        assert!(compounding < flat);
    }
}

// ═══════════════════════════════════════════════════════════════════
// AnalyticsService — performance table
// ═══════════════════════════════════════════════════════════════════

mod performance {
    use super::*;

    #[test]
    fn default_history_table() {
        let view = AnalyticsService::new()
            .performance(&default_history(), &RateTable::default(), Currency::Sgd)
            .unwrap();
        assert_eq!(view.rows.len(), 6);
        assert_eq!(view.rows[0].growth_pct, None);
        let yoy = view.rows[1].growth_pct.unwrap();
        assert!(approx(yoy, (221_800.0 - 152_400.0) / 152_400.0 * 100.0));
        assert!(approx(view.rows[5].investment_gain, 105_010.0));

        let cagr = view.cagr_pct.unwrap();
        assert!(cagr > 26.0 && cagr < 26.3, "cagr {cagr}");
    }

    #[test]
    fn converted_amounts_keep_percentages() {
        let svc = AnalyticsService::new();
        let sgd = svc
            .performance(&default_history(), &RateTable::default(), Currency::Sgd)
            .unwrap();
        let usd = svc
            .performance(&default_history(), &RateTable::default(), Currency::Usd)
            .unwrap();
        assert_eq!(usd.currency, Currency::Usd);
        assert!(approx(usd.rows[0].net_worth, 152_400.0 * 0.74));
        assert_eq!(sgd.rows[2].growth_pct, usd.rows[2].growth_pct);
        assert_eq!(sgd.cagr_pct, usd.cagr_pct);
    }

    #[test]
    fn zero_previous_net_worth_has_no_growth() {
        let history = vec![
            HistorySnapshot::new(2020, 0.0, 0.0),
            HistorySnapshot::new(2021, 10_000.0, 10_000.0),
        ];
        let view = AnalyticsService::new()
            .performance(&history, &RateTable::default(), Currency::Sgd)
            .unwrap();
        assert_eq!(view.rows[1].growth_pct, None);
        assert_eq!(view.cagr_pct, None);
    }

    #[test]
    fn single_snapshot_has_no_cagr() {
        let history = vec![HistorySnapshot::new(2024, 1.0, 1.0)];
        let view = AnalyticsService::new()
            .performance(&history, &RateTable::default(), Currency::Sgd)
            .unwrap();
        assert_eq!(view.cagr_pct, None);
    }

    #[test]
    fn empty_history() {
        let view = AnalyticsService::new()
            .performance(&[], &RateTable::default(), Currency::Sgd)
            .unwrap();
        assert!(view.rows.is_empty());
        assert_eq!(view.cagr_pct, None);
    }
}

// ═══════════════════════════════════════════════════════════════════
// AnalyticsService — dashboard view
// ═══════════════════════════════════════════════════════════════════

mod dashboard_view {
    use super::*;

    #[test]
    fn default_figures() {
        let view = view_of(&PortfolioData::default());
        assert_eq!(view.currency, Currency::Sgd);
        assert!(approx(view.total, 472_725.0));
        assert!(approx(view.monthly_savings, 7_000.0));
        assert!(approx(view.passive_monthly, 1_575.75));
        assert_eq!(view.withdrawal_rate, 0.04);
        assert_eq!(format_percent(view.lean.percent), "25.6");
        assert_eq!(format_percent(view.full.percent), "18.9");
        assert_eq!(view.fi_year, 2032);
        assert_eq!(view.years_to_fi, 7);
        assert!(view.months_to_lean.is_some());
    }

    #[test]
    fn bucket_statuses() {
        let view = view_of(&PortfolioData::default());
        let statuses: Vec<_> = view.buckets.iter().map(|b| (b.bucket, b.status)).collect();
        assert_eq!(
            statuses,
            vec![
                (Bucket::Core, BucketStatus::OffTrack),
                (Bucket::Growth, BucketStatus::OffTrack),
                (Bucket::Crypto, BucketStatus::OffTrack),
                (Bucket::Hedge, BucketStatus::Drifting),
            ]
        );
    }

    #[test]
    fn total_ignores_stale_stored_total() {
        let mut data = PortfolioData::default();
        data.total = 487_010.0;
        let view = view_of(&data);
        assert!(approx(view.total, 472_725.0));
    }

    #[test]
    fn bar_width_capped() {
        let mut data = PortfolioData::default();
        data.set_bucket(Bucket::Core, 3_000_000.0);
        let view = view_of(&data);
        assert!(view.lean.percent > 100.0);
        assert_eq!(view.lean.bar_width, 100.0);
        assert_eq!(view.full.bar_width, 100.0);
        assert_eq!(view.months_to_lean, Some(0));
    }

    #[test]
    fn empty_portfolio() {
        let data = PortfolioData {
            core: 0.0,
            growth: 0.0,
            crypto: 0.0,
            hedge: 0.0,
            savings: 0.0,
            ..PortfolioData::default()
        };
        let view = view_of(&data);
        assert_eq!(view.total, 0.0);
        assert_eq!(view.lean.percent, 0.0);
        assert_eq!(view.passive_monthly, 0.0);
        assert_eq!(view.months_to_lean, None);
    }

    #[test]
    fn display_currency_conversion() {
        let mut data = PortfolioData::default();
        data.currency = Currency::Usd;
        let usd = view_of(&data);
        let sgd = view_of(&PortfolioData::default());
        assert_eq!(usd.currency, Currency::Usd);
        assert!(approx(usd.total, 472_725.0 * 0.74));
        assert!(approx(usd.lean.target, 1_850_000.0 * 0.74));
        assert!(approx(usd.buckets[0].target, 222_400.0 * 0.74));
        assert!(approx(usd.trajectory[0].value, 571_452.0 * 0.74));
        // Percentages are currency independent
        assert!(approx(usd.lean.percent, sgd.lean.percent));
        assert_eq!(usd.buckets[1].status, sgd.buckets[1].status);
    }

    #[test]
    fn zero_bucket_target_is_zero_percent() {
        let mut targets = FiTargets::default();
        targets.buckets.crypto = 0.0;
        let view = AnalyticsService::new()
            .build_view(
                &PortfolioData::default(),
                &targets,
                &RateTable::default(),
                &default_milestones(),
                mid_2025(),
            )
            .unwrap();
        assert_eq!(view.buckets[2].percent, 0.0);
        assert_eq!(view.buckets[2].status, BucketStatus::OffTrack);
    }
}

// ═══════════════════════════════════════════════════════════════════
// PortfolioService
// ═══════════════════════════════════════════════════════════════════

mod portfolio_service {
    use super::*;

    #[test]
    fn open_edit_prefills() {
        let draft = PortfolioService::new().open_edit(&PortfolioData::default());
        assert_eq!(draft.core, "105356");
        assert_eq!(draft.hedge, "170050");
        assert_eq!(draft.savings, "7000");
    }

    #[test]
    fn open_edit_blank_for_zero() {
        let mut data = PortfolioData::default();
        data.set_bucket(Bucket::Crypto, 0.0);
        let draft = PortfolioService::new().open_edit(&data);
        assert_eq!(draft.crypto, "");
    }

    #[test]
    fn save_edit_parses_and_recomputes_total() {
        let svc = PortfolioService::new();
        let data = PortfolioData::default();
        let mut draft = svc.open_edit(&data);
        draft.set(EditField::Bucket(Bucket::Core), "200,000");
        draft.set(EditField::Bucket(Bucket::Growth), "");
        draft.set(EditField::MonthlySavings, "8000");

        let updated = svc.save_edit(&data, &draft).unwrap();
        assert_eq!(updated.core, 200_000.0);
        assert_eq!(updated.growth, 0.0);
        assert_eq!(updated.savings, 8_000.0);
        assert_eq!(updated.total, 200_000.0 + 101_000.0 + 170_050.0);
        assert_eq!(updated.history, data.history);
        assert_eq!(updated.currency, data.currency);
    }

    #[test]
    fn save_edit_garbage_is_zero() {
        let svc = PortfolioService::new();
        let data = PortfolioData::default();
        let mut draft = svc.open_edit(&data);
        draft.set(EditField::Bucket(Bucket::Hedge), "lots");
        let updated = svc.save_edit(&data, &draft).unwrap();
        assert_eq!(updated.hedge, 0.0);
    }

    #[test]
    fn save_edit_rejects_negative() {
        let svc = PortfolioService::new();
        let data = PortfolioData::default();
        let mut draft = svc.open_edit(&data);
        draft.set(EditField::Bucket(Bucket::Crypto), "-5");
        let err = svc.save_edit(&data, &draft).unwrap_err();
        assert!(matches!(err, CoreError::ValidationError(ref m) if m.contains("Crypto Hedge")));
    }

    #[test]
    fn edit_field_parsing() {
        assert_eq!("savings".parse::<EditField>().unwrap(), EditField::MonthlySavings);
        assert_eq!(
            "Monthly Savings".parse::<EditField>().unwrap(),
            EditField::MonthlySavings
        );
        assert_eq!(
            "hedge".parse::<EditField>().unwrap(),
            EditField::Bucket(Bucket::Hedge)
        );
        assert!("bonds".parse::<EditField>().is_err());
    }

    #[test]
    fn set_bucket_validates() {
        let svc = PortfolioService::new();
        let mut data = PortfolioData::default();
        assert!(svc.set_bucket(&mut data, Bucket::Core, f64::NAN).is_err());
        assert!(svc.set_bucket(&mut data, Bucket::Core, -1.0).is_err());
        svc.set_bucket(&mut data, Bucket::Core, 1.0).unwrap();
        assert_eq!(data.total, data.bucket_sum());
    }

    #[test]
    fn set_monthly_savings() {
        let svc = PortfolioService::new();
        let mut data = PortfolioData::default();
        svc.set_monthly_savings(&mut data, 9_000.0).unwrap();
        assert_eq!(data.savings, 9_000.0);
        assert!(svc.set_monthly_savings(&mut data, -1.0).is_err());
        assert_eq!(data.savings, 9_000.0);
    }

    #[test]
    fn upsert_snapshot_inserts_sorted() {
        let svc = PortfolioService::new();
        let mut data = PortfolioData::default();
        svc.upsert_snapshot(&mut data, HistorySnapshot::new(2019, 100_000.0, 90_000.0))
            .unwrap();
        svc.upsert_snapshot(&mut data, HistorySnapshot::new(2026, 600_000.0, 450_000.0))
            .unwrap();
        let years: Vec<i32> = data.history.iter().map(|s| s.year).collect();
        assert_eq!(years, vec![2019, 2020, 2021, 2022, 2023, 2024, 2025, 2026]);
    }

    #[test]
    fn upsert_snapshot_replaces_year() {
        let svc = PortfolioService::new();
        let mut data = PortfolioData::default();
        svc.upsert_snapshot(&mut data, HistorySnapshot::new(2025, 500_000.0, 390_000.0))
            .unwrap();
        assert_eq!(data.history.len(), 6);
        assert_eq!(data.history[5].net_worth, 500_000.0);
    }

    #[test]
    fn upsert_snapshot_validates() {
        let svc = PortfolioService::new();
        let mut data = PortfolioData::default();
        assert!(svc
            .upsert_snapshot(&mut data, HistorySnapshot::new(2026, -1.0, 0.0))
            .is_err());
        assert_eq!(data.history.len(), 6);
    }

    #[test]
    fn remove_snapshot() {
        let svc = PortfolioService::new();
        let mut data = PortfolioData::default();
        let removed = svc.remove_snapshot(&mut data, 2022).unwrap();
        assert_eq!(removed.net_worth, 238_600.0);
        assert_eq!(data.history.len(), 5);
        assert!(matches!(
            svc.remove_snapshot(&mut data, 1999),
            Err(CoreError::SnapshotNotFound(1999))
        ));
    }
}

// ═══════════════════════════════════════════════════════════════════
// AdviceService
// ═══════════════════════════════════════════════════════════════════

mod advice {
    use super::*;

    #[test]
    fn most_severe_first() {
        let view = view_of(&PortfolioData::default());
        let items = AdviceService::new().advise(&view, None);
        assert_eq!(items[0].severity, AdviceSeverity::Warning);
        for pair in items.windows(2) {
            assert!(pair[0].severity >= pair[1].severity);
        }
    }

    #[test]
    fn milestone_message() {
        let view = view_of(&PortfolioData::default());
        let items = AdviceService::new().advise(&view, None);
        let milestone = items
            .iter()
            .find(|a| a.topic == AdviceTopic::Milestone)
            .unwrap();
        assert!(milestone.message.starts_with("25.6% to Lean FI"));
    }

    #[test]
    fn bucket_messages_follow_status() {
        let view = view_of(&PortfolioData::default());
        let items = AdviceService::new().advise(&view, None);
        let find = |b: Bucket| {
            items
                .iter()
                .find(|a| a.topic == AdviceTopic::Bucket(b))
                .unwrap()
        };
        // Under target and off track
        assert_eq!(find(Bucket::Core).severity, AdviceSeverity::Suggestion);
        assert!(find(Bucket::Core).message.contains("short"));
        // Over target and off track
        assert_eq!(find(Bucket::Growth).severity, AdviceSeverity::Warning);
        assert!(find(Bucket::Growth).message.contains("over"));
        // Drifting
        assert_eq!(find(Bucket::Hedge).severity, AdviceSeverity::Info);
    }

    #[test]
    fn zero_target_bucket_skipped() {
        let mut targets = FiTargets::default();
        targets.buckets.growth = 0.0;
        let view = AnalyticsService::new()
            .build_view(
                &PortfolioData::default(),
                &targets,
                &RateTable::default(),
                &default_milestones(),
                mid_2025(),
            )
            .unwrap();
        let items = AdviceService::new().advise(&view, None);
        assert!(!items
            .iter()
            .any(|a| a.topic == AdviceTopic::Bucket(Bucket::Growth)));
    }

    #[test]
    fn no_savings_warns() {
        let mut data = PortfolioData::default();
        data.savings = 0.0;
        let items = AdviceService::new().advise(&view_of(&data), None);
        let savings = items.iter().find(|a| a.topic == AdviceTopic::Savings).unwrap();
        assert_eq!(savings.severity, AdviceSeverity::Warning);
    }

    #[test]
    fn savings_months_estimate() {
        let items = AdviceService::new().advise(&view_of(&PortfolioData::default()), None);
        let savings = items.iter().find(|a| a.topic == AdviceTopic::Savings).unwrap();
        // (1,850,000 - 472,725) / 7,000 rounded up
        assert!(savings.message.contains("197 months"), "{}", savings.message);
    }

    #[test]
    fn lean_reached_has_no_savings_message() {
        let mut data = PortfolioData::default();
        data.set_bucket(Bucket::Core, 2_000_000.0);
        let items = AdviceService::new().advise(&view_of(&data), None);
        assert!(!items.iter().any(|a| a.topic == AdviceTopic::Savings));
        let milestone = items
            .iter()
            .find(|a| a.topic == AdviceTopic::Milestone)
            .unwrap();
        assert!(milestone.message.starts_with("Lean FI reached"));
    }

    #[test]
    fn history_message_quotes_cagr() {
        let svc = AnalyticsService::new();
        let perf = svc
            .performance(&default_history(), &RateTable::default(), Currency::Sgd)
            .unwrap();
        let items = AdviceService::new().advise(&view_of(&PortfolioData::default()), Some(&perf));
        let history = items.iter().find(|a| a.topic == AdviceTopic::History).unwrap();
        assert_eq!(history.severity, AdviceSeverity::Info);
        assert!(history.message.contains("from 2020 to 2025"));
    }

    #[test]
    fn shrinking_history_warns() {
        let history = vec![
            HistorySnapshot::new(2023, 200_000.0, 100_000.0),
            HistorySnapshot::new(2024, 150_000.0, 110_000.0),
        ];
        let perf = AnalyticsService::new()
            .performance(&history, &RateTable::default(), Currency::Sgd)
            .unwrap();
        let items = AdviceService::new().advise(&view_of(&PortfolioData::default()), Some(&perf));
        let msg = items.iter().find(|a| a.topic == AdviceTopic::History).unwrap();
        assert_eq!(msg.severity, AdviceSeverity::Warning);
    }
}
