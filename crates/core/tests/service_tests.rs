// ═══════════════════════════════════════════════════════════════════
// Service Tests — record management, settings, search/sort, and value
// history through the InvestmentTracker facade
// ═══════════════════════════════════════════════════════════════════

use chrono::NaiveDate;
use uuid::Uuid;

use investment_tracker_core::errors::CoreError;
use investment_tracker_core::models::asset::{AssetPatch, AssetSortOrder};
use investment_tracker_core::models::category::AssetCategory;
use investment_tracker_core::models::currency::Currency;
use investment_tracker_core::models::sale::SalePatch;
use investment_tracker_core::InvestmentTracker;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

/// Tracker with one portfolio and one TRY equity (10 × 100, bought 2025-01-10).
fn tracker_with_asset() -> (InvestmentTracker, Uuid, Uuid) {
    let mut tracker = InvestmentTracker::create_new();
    let pid = tracker.create_portfolio("Main", None).unwrap();
    let aid = tracker
        .add_asset(
            pid,
            "Koç Holding",
            AssetCategory::Equity,
            10.0,
            100.0,
            d(2025, 1, 10),
            Currency::Try,
        )
        .unwrap();
    (tracker, pid, aid)
}

// ═══════════════════════════════════════════════════════════════════
//  Portfolios
// ═══════════════════════════════════════════════════════════════════

mod portfolios {
    use super::*;

    #[test]
    fn create_and_fetch() {
        let mut tracker = InvestmentTracker::create_new();
        let id = tracker
            .create_portfolio("Retirement", Some("long-term".into()))
            .unwrap();

        let p = tracker.get_portfolio(id).unwrap();
        assert_eq!(p.name, "Retirement");
        assert_eq!(p.description.as_deref(), Some("long-term"));
        assert_eq!(tracker.portfolio_count(), 1);
        assert!(tracker.has_unsaved_changes());
    }

    #[test]
    fn create_rejects_blank_name() {
        let mut tracker = InvestmentTracker::create_new();
        let err = tracker.create_portfolio("   ", None).unwrap_err();
        assert!(matches!(err, CoreError::ValidationError(_)));
        assert_eq!(tracker.portfolio_count(), 0);
    }

    #[test]
    fn update_name_and_description() {
        let (mut tracker, pid, _) = tracker_with_asset();
        tracker
            .update_portfolio(pid, Some("Renamed".into()), Some("new desc".into()))
            .unwrap();
        let p = tracker.get_portfolio(pid).unwrap();
        assert_eq!(p.name, "Renamed");
        assert_eq!(p.description.as_deref(), Some("new desc"));
    }

    #[test]
    fn update_with_none_fields_changes_nothing() {
        let (mut tracker, pid, _) = tracker_with_asset();
        tracker.update_portfolio(pid, None, None).unwrap();
        assert_eq!(tracker.get_portfolio(pid).unwrap().name, "Main");
    }

    #[test]
    fn update_rejects_blank_name() {
        let (mut tracker, pid, _) = tracker_with_asset();
        let err = tracker
            .update_portfolio(pid, Some("".into()), None)
            .unwrap_err();
        assert!(matches!(err, CoreError::ValidationError(_)));
        assert_eq!(tracker.get_portfolio(pid).unwrap().name, "Main");
    }

    #[test]
    fn update_unknown_id_is_not_found() {
        let mut tracker = InvestmentTracker::create_new();
        let err = tracker
            .update_portfolio(Uuid::new_v4(), Some("x".into()), None)
            .unwrap_err();
        assert!(matches!(err, CoreError::PortfolioNotFound(_)));
    }

    #[test]
    fn remove_cascades_to_assets_and_sales() {
        let (mut tracker, pid, aid) = tracker_with_asset();
        tracker
            .record_sale(aid, 2.0, 110.0, d(2025, 2, 1), Currency::Try)
            .unwrap();

        tracker.remove_portfolio(pid).unwrap();
        assert_eq!(tracker.portfolio_count(), 0);
        assert!(tracker.get_asset(aid).is_none());
    }

    #[test]
    fn active_portfolio_selection() {
        let (mut tracker, pid, _) = tracker_with_asset();
        assert!(tracker.active_portfolio().is_none());

        tracker.set_active_portfolio(Some(pid)).unwrap();
        assert_eq!(tracker.active_portfolio().unwrap().id, pid);

        tracker.set_active_portfolio(None).unwrap();
        assert!(tracker.active_portfolio().is_none());
    }

    #[test]
    fn active_portfolio_must_exist() {
        let mut tracker = InvestmentTracker::create_new();
        let err = tracker.set_active_portfolio(Some(Uuid::new_v4())).unwrap_err();
        assert!(matches!(err, CoreError::PortfolioNotFound(_)));
    }

    #[test]
    fn removing_active_portfolio_clears_selection() {
        let (mut tracker, pid, _) = tracker_with_asset();
        tracker.set_active_portfolio(Some(pid)).unwrap();
        tracker.remove_portfolio(pid).unwrap();
        assert!(tracker.active_portfolio().is_none());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Assets
// ═══════════════════════════════════════════════════════════════════

mod assets {
    use super::*;

    #[test]
    fn add_into_unknown_portfolio_fails() {
        let mut tracker = InvestmentTracker::create_new();
        let err = tracker
            .add_asset(
                Uuid::new_v4(),
                "X",
                AssetCategory::Fund,
                1.0,
                1.0,
                d(2025, 1, 1),
                Currency::Try,
            )
            .unwrap_err();
        assert!(matches!(err, CoreError::PortfolioNotFound(_)));
    }

    #[test]
    fn add_rejects_non_positive_amount() {
        let (mut tracker, pid, _) = tracker_with_asset();
        for amount in [0.0, -1.0, f64::NAN] {
            let err = tracker
                .add_asset(
                    pid,
                    "Bad",
                    AssetCategory::Fund,
                    amount,
                    1.0,
                    d(2025, 1, 1),
                    Currency::Try,
                )
                .unwrap_err();
            assert!(matches!(err, CoreError::ValidationError(_)));
        }
    }

    #[test]
    fn add_rejects_negative_price() {
        let (mut tracker, pid, _) = tracker_with_asset();
        let err = tracker
            .add_asset(
                pid,
                "Bad",
                AssetCategory::Fund,
                1.0,
                -0.01,
                d(2025, 1, 1),
                Currency::Try,
            )
            .unwrap_err();
        assert!(matches!(err, CoreError::ValidationError(_)));
    }

    #[test]
    fn add_with_notes() {
        let (mut tracker, pid, _) = tracker_with_asset();
        let aid = tracker
            .add_asset_with_notes(
                pid,
                "Gram Altın",
                AssetCategory::PreciousMetal,
                5.0,
                2400.0,
                d(2025, 2, 1),
                Currency::Try,
                "anniversary gift",
            )
            .unwrap();
        assert_eq!(
            tracker.get_asset(aid).unwrap().notes.as_deref(),
            Some("anniversary gift")
        );
    }

    #[test]
    fn patch_updates_only_given_fields() {
        let (mut tracker, _, aid) = tracker_with_asset();
        tracker
            .update_asset(
                aid,
                AssetPatch {
                    amount: Some(12.0),
                    current_price: Some(130.0),
                    ..Default::default()
                },
            )
            .unwrap();

        let a = tracker.get_asset(aid).unwrap();
        assert_eq!(a.amount, 12.0);
        assert_eq!(a.current_price, Some(130.0));
        assert_eq!(a.name, "Koç Holding");
        assert_eq!(a.purchase_price, 100.0);
    }

    #[test]
    fn invalid_patch_leaves_record_untouched() {
        let (mut tracker, _, aid) = tracker_with_asset();
        let err = tracker
            .update_asset(
                aid,
                AssetPatch {
                    name: Some("Renamed".into()),
                    amount: Some(-3.0),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, CoreError::ValidationError(_)));

        let a = tracker.get_asset(aid).unwrap();
        assert_eq!(a.name, "Koç Holding");
        assert_eq!(a.amount, 10.0);
    }

    #[test]
    fn set_current_price() {
        let (mut tracker, _, aid) = tracker_with_asset();
        tracker.set_current_price(aid, 142.5).unwrap();
        assert_eq!(tracker.get_asset(aid).unwrap().current_price, Some(142.5));
    }

    #[test]
    fn set_current_price_rejects_negative() {
        let (mut tracker, _, aid) = tracker_with_asset();
        let err = tracker.set_current_price(aid, -1.0).unwrap_err();
        assert!(matches!(err, CoreError::ValidationError(_)));
    }

    #[test]
    fn remove_cascades_to_its_sales() {
        let (mut tracker, pid, aid) = tracker_with_asset();
        let sid = tracker
            .record_sale(aid, 2.0, 110.0, d(2025, 2, 1), Currency::Try)
            .unwrap();

        tracker.remove_asset(aid).unwrap();
        assert!(tracker.get_asset(aid).is_none());
        assert!(tracker.get_sale(sid).is_none());
        assert!(tracker.get_sales(pid).unwrap().is_empty());
    }

    #[test]
    fn listing_is_newest_created_first() {
        let (mut tracker, pid, first) = tracker_with_asset();
        let second = tracker
            .add_asset(
                pid,
                "BTC",
                AssetCategory::Crypto,
                0.5,
                40000.0,
                d(2025, 1, 1),
                Currency::Usd,
            )
            .unwrap();

        let listed = tracker.get_assets(pid).unwrap();
        assert_eq!(listed[0].id, second);
        assert_eq!(listed[1].id, first);
    }

    #[test]
    fn sorted_by_amount_and_name() {
        let (mut tracker, pid, _) = tracker_with_asset();
        tracker
            .add_asset(
                pid,
                "BTC",
                AssetCategory::Crypto,
                0.5,
                40000.0,
                d(2025, 3, 1),
                Currency::Usd,
            )
            .unwrap();

        let by_amount = tracker
            .get_assets_sorted(pid, &AssetSortOrder::AmountDesc)
            .unwrap();
        assert_eq!(by_amount[0].amount, 10.0);

        let by_name = tracker
            .get_assets_sorted(pid, &AssetSortOrder::NameAsc)
            .unwrap();
        assert_eq!(by_name[0].name, "BTC");

        let by_date = tracker
            .get_assets_sorted(pid, &AssetSortOrder::DateDesc)
            .unwrap();
        assert_eq!(by_date[0].purchase_date, d(2025, 3, 1));
    }

    #[test]
    fn search_matches_name_and_notes_case_insensitive() {
        let (mut tracker, pid, _) = tracker_with_asset();
        tracker
            .add_asset_with_notes(
                pid,
                "BTC",
                AssetCategory::Crypto,
                0.5,
                40000.0,
                d(2025, 3, 1),
                Currency::Usd,
                "cold wallet",
            )
            .unwrap();

        assert_eq!(tracker.search_assets(pid, "koç").unwrap().len(), 1);
        assert_eq!(tracker.search_assets(pid, "WALLET").unwrap().len(), 1);
        assert_eq!(tracker.search_assets(pid, "").unwrap().len(), 2);
        assert!(tracker.search_assets(pid, "tesla").unwrap().is_empty());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Sales
// ═══════════════════════════════════════════════════════════════════

mod sales {
    use super::*;

    #[test]
    fn record_against_unknown_asset_fails() {
        let mut tracker = InvestmentTracker::create_new();
        tracker.create_portfolio("Main", None).unwrap();
        let err = tracker
            .record_sale(Uuid::new_v4(), 1.0, 10.0, d(2025, 2, 1), Currency::Try)
            .unwrap_err();
        assert!(matches!(err, CoreError::AssetNotFound(_)));
    }

    #[test]
    fn record_rejects_non_positive_amount() {
        let (mut tracker, _, aid) = tracker_with_asset();
        let err = tracker
            .record_sale(aid, 0.0, 10.0, d(2025, 2, 1), Currency::Try)
            .unwrap_err();
        assert!(matches!(err, CoreError::ValidationError(_)));
    }

    #[test]
    fn oversell_is_accepted() {
        // Sale quantity is deliberately not checked against holdings.
        let (mut tracker, pid, aid) = tracker_with_asset();
        tracker
            .record_sale(aid, 999.0, 10.0, d(2025, 2, 1), Currency::Try)
            .unwrap();
        assert_eq!(tracker.get_sales(pid).unwrap().len(), 1);
    }

    #[test]
    fn patch_updates_only_given_fields() {
        let (mut tracker, _, aid) = tracker_with_asset();
        let sid = tracker
            .record_sale(aid, 2.0, 110.0, d(2025, 2, 1), Currency::Try)
            .unwrap();
        tracker
            .update_sale(
                sid,
                SalePatch {
                    sale_price: Some(115.0),
                    notes: Some("corrected fill price".into()),
                    ..Default::default()
                },
            )
            .unwrap();

        let s = tracker.get_sale(sid).unwrap();
        assert_eq!(s.sale_price, 115.0);
        assert_eq!(s.amount, 2.0);
        assert_eq!(s.notes.as_deref(), Some("corrected fill price"));
    }

    #[test]
    fn invalid_patch_leaves_record_untouched() {
        let (mut tracker, _, aid) = tracker_with_asset();
        let sid = tracker
            .record_sale(aid, 2.0, 110.0, d(2025, 2, 1), Currency::Try)
            .unwrap();
        let err = tracker
            .update_sale(
                sid,
                SalePatch {
                    amount: Some(-2.0),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, CoreError::ValidationError(_)));
        assert_eq!(tracker.get_sale(sid).unwrap().amount, 2.0);
    }

    #[test]
    fn remove_sale() {
        let (mut tracker, pid, aid) = tracker_with_asset();
        let sid = tracker
            .record_sale(aid, 2.0, 110.0, d(2025, 2, 1), Currency::Try)
            .unwrap();
        tracker.remove_sale(sid).unwrap();
        assert!(tracker.get_sale(sid).is_none());
        assert!(tracker.get_sales(pid).unwrap().is_empty());
        // The asset itself is untouched
        assert!(tracker.get_asset(aid).is_some());
    }

    #[test]
    fn sales_for_asset_only_returns_that_assets_sales() {
        let (mut tracker, pid, aid) = tracker_with_asset();
        let other = tracker
            .add_asset(
                pid,
                "BTC",
                AssetCategory::Crypto,
                1.0,
                40000.0,
                d(2025, 1, 1),
                Currency::Usd,
            )
            .unwrap();
        tracker
            .record_sale(aid, 1.0, 110.0, d(2025, 2, 1), Currency::Try)
            .unwrap();
        tracker
            .record_sale(other, 0.5, 45000.0, d(2025, 2, 2), Currency::Usd)
            .unwrap();

        assert_eq!(tracker.get_sales_for_asset(aid).unwrap().len(), 1);
        assert_eq!(tracker.get_sales(pid).unwrap().len(), 2);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Settings
// ═══════════════════════════════════════════════════════════════════

mod settings {
    use super::*;

    #[test]
    fn defaults() {
        let tracker = InvestmentTracker::create_new();
        let s = tracker.get_settings();
        assert_eq!(s.display_currency, Currency::Try);
        assert_eq!(s.usd_to_try_rate, 34.50);
        assert!(!tracker.has_unsaved_changes());
    }

    #[test]
    fn set_exchange_rate_stamps_update_time() {
        let mut tracker = InvestmentTracker::create_new();
        let before = tracker.get_settings().exchange_rate_updated;
        tracker.set_exchange_rate(36.25).unwrap();
        let s = tracker.get_settings();
        assert_eq!(s.usd_to_try_rate, 36.25);
        assert!(s.exchange_rate_updated >= before);
        assert!(tracker.has_unsaved_changes());
    }

    #[test]
    fn set_exchange_rate_rejects_invalid_values() {
        let mut tracker = InvestmentTracker::create_new();
        for rate in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = tracker.set_exchange_rate(rate).unwrap_err();
            assert!(matches!(err, CoreError::InvalidExchangeRate(_)));
        }
        assert_eq!(tracker.get_settings().usd_to_try_rate, 34.50);
    }

    #[test]
    fn set_display_currency() {
        let mut tracker = InvestmentTracker::create_new();
        tracker.set_display_currency(Currency::Usd);
        assert_eq!(tracker.get_settings().display_currency, Currency::Usd);
    }

    #[test]
    fn stats_follow_display_currency_setting() {
        let (mut tracker, pid, aid) = tracker_with_asset();
        tracker.set_current_price(aid, 100.0).unwrap();
        tracker.set_exchange_rate(40.0).unwrap();

        let in_try = tracker.portfolio_stats(pid).unwrap();
        assert!((in_try.total_value - 1000.0).abs() < 1e-9);

        tracker.set_display_currency(Currency::Usd);
        let in_usd = tracker.portfolio_stats(pid).unwrap();
        assert!((in_usd.total_value - 25.0).abs() < 1e-9);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Value History
// ═══════════════════════════════════════════════════════════════════

mod value_history {
    use super::*;

    #[test]
    fn assets_enter_the_series_on_their_purchase_date() {
        let (tracker, pid, _) = tracker_with_asset();
        let points = tracker
            .value_history(pid, d(2025, 1, 8), d(2025, 1, 12))
            .unwrap();

        assert_eq!(points.len(), 5);
        assert_eq!(points[0].date, d(2025, 1, 8));
        assert_eq!(points[0].value, 0.0);
        assert_eq!(points[1].value, 0.0);
        // Purchase on 2025-01-10
        assert!((points[2].value - 1000.0).abs() < 1e-9);
        assert!((points[4].value - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn sales_enter_the_series_on_their_sale_date() {
        let (mut tracker, pid, aid) = tracker_with_asset();
        tracker
            .record_sale(aid, 5.0, 120.0, d(2025, 1, 12), Currency::Try)
            .unwrap();

        let points = tracker
            .value_history(pid, d(2025, 1, 11), d(2025, 1, 13))
            .unwrap();
        assert!((points[0].value - 1000.0).abs() < 1e-9);
        // +100 realized profit from the sale
        assert!((points[1].value - 1100.0).abs() < 1e-9);
        assert!((points[2].value - 1100.0).abs() < 1e-9);
    }

    #[test]
    fn series_is_deterministic() {
        let (tracker, pid, _) = tracker_with_asset();
        let a = tracker.value_history(pid, d(2025, 1, 1), d(2025, 2, 1)).unwrap();
        let b = tracker.value_history(pid, d(2025, 1, 1), d(2025, 2, 1)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_inverted_range() {
        let (tracker, pid, _) = tracker_with_asset();
        let err = tracker
            .value_history(pid, d(2025, 2, 1), d(2025, 1, 1))
            .unwrap_err();
        assert!(matches!(err, CoreError::ValidationError(_)));
    }

    #[test]
    fn rejects_range_over_ten_years() {
        let (tracker, pid, _) = tracker_with_asset();
        let err = tracker
            .value_history(pid, d(2010, 1, 1), d(2025, 1, 1))
            .unwrap_err();
        assert!(matches!(err, CoreError::ValidationError(_)));
    }

    #[test]
    fn days_helper_includes_today() {
        let (tracker, pid, _) = tracker_with_asset();
        let points = tracker.value_history_days(pid, 30).unwrap();
        assert_eq!(points.len(), 31);
        assert_eq!(
            points.last().unwrap().date,
            chrono::Utc::now().date_naive()
        );
    }
}

// ═══════════════════════════════════════════════════════════════════
//  CSV Export
// ═══════════════════════════════════════════════════════════════════

mod csv_export {
    use super::*;

    #[test]
    fn header_and_one_row_per_asset() {
        let (tracker, pid, _) = tracker_with_asset();
        let csv = tracker.export_assets_to_csv(pid).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("id,name,category"));
        assert!(lines[1].contains("Koç Holding"));
        assert!(lines[1].contains("Equity"));
    }

    #[test]
    fn fields_with_commas_are_quoted() {
        let mut tracker = InvestmentTracker::create_new();
        let pid = tracker.create_portfolio("Main", None).unwrap();
        tracker
            .add_asset_with_notes(
                pid,
                "Fund, Mixed",
                AssetCategory::Fund,
                1.0,
                10.0,
                d(2025, 1, 1),
                Currency::Try,
                "say \"hi\"",
            )
            .unwrap();

        let csv = tracker.export_assets_to_csv(pid).unwrap();
        assert!(csv.contains("\"Fund, Mixed\""));
        assert!(csv.contains("\"say \"\"hi\"\"\""));
    }
}
