// ═══════════════════════════════════════════════════════════════════
// Chart Tests — render vs retract state machine, slice derivation
// ═══════════════════════════════════════════════════════════════════

use std::fs;

use tempfile::TempDir;

use finance_tracker_core::models::position::{OpenValuation, Position, Valuation};
use finance_tracker_core::services::chart_service::{
    allocation_slices, stock_slices, ChartService,
};
use finance_tracker_core::ChartOutcome;

fn open_position(ticker: &str, market_value: f64) -> Position {
    Position {
        ticker: ticker.to_string(),
        shares: 10,
        cost_basis: market_value,
        valuation: Valuation::Open(OpenValuation {
            current_price: market_value / 10.0,
            market_value,
            average_cost: market_value / 10.0,
            return_pct: 0.0,
            value_share_pct: 0.0,
        }),
    }
}

fn closed_position(ticker: &str) -> Position {
    Position {
        ticker: ticker.to_string(),
        shares: 0,
        cost_basis: 0.0,
        valuation: Valuation::Closed,
    }
}

// ═══════════════════════════════════════════════════════════════════
// Slice derivation
// ═══════════════════════════════════════════════════════════════════

mod slices {
    use super::*;

    #[test]
    fn stock_slices_keep_position_order() {
        let positions = [open_position("2330", 6000.0), open_position("0050", 750.0)];
        let slices = stock_slices(&positions);
        assert_eq!(
            slices,
            [("2330".to_string(), 6000.0), ("0050".to_string(), 750.0)]
        );
    }

    #[test]
    fn stock_slices_skip_closed_positions() {
        let positions = [closed_position("0050"), open_position("2330", 6000.0)];
        assert_eq!(stock_slices(&positions), [("2330".to_string(), 6000.0)]);
    }

    #[test]
    fn allocation_slices_drop_zero_quantities() {
        assert_eq!(
            allocation_slices(0.0, 1000.0, 0.0),
            [("NTD".to_string(), 1000.0)]
        );
    }

    #[test]
    fn allocation_slices_empty_when_everything_is_zero() {
        assert!(allocation_slices(0.0, 0.0, 0.0).is_empty());
    }

    #[test]
    fn allocation_slices_order_is_usd_ntd_stock() {
        let slices = allocation_slices(315.0, 100.0, 1200.0);
        let labels: Vec<&str> = slices.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, ["USD", "NTD", "Stock"]);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Render / retract
// ═══════════════════════════════════════════════════════════════════

mod render {
    use super::*;

    #[test]
    fn renders_stock_chart_when_positions_exist() {
        let dir = TempDir::new().unwrap();
        let charts = ChartService::new(dir.path());

        let outcome = charts
            .render_stock_chart(&[open_position("2330", 6000.0), open_position("0050", 750.0)])
            .unwrap();

        assert_eq!(outcome, ChartOutcome::Rendered);
        let metadata = fs::metadata(charts.stock_chart_path()).unwrap();
        assert!(metadata.len() > 0);
    }

    #[test]
    fn rendering_overwrites_a_previous_artifact() {
        let dir = TempDir::new().unwrap();
        let charts = ChartService::new(dir.path());

        fs::write(charts.stock_chart_path(), b"stale").unwrap();
        charts
            .render_stock_chart(&[open_position("2330", 6000.0)])
            .unwrap();

        let metadata = fs::metadata(charts.stock_chart_path()).unwrap();
        assert!(metadata.len() > 5, "stale artifact was not overwritten");
    }

    #[test]
    fn retracts_stock_chart_when_no_positions() {
        let dir = TempDir::new().unwrap();
        let charts = ChartService::new(dir.path());

        fs::write(charts.stock_chart_path(), b"stale").unwrap();
        let outcome = charts.render_stock_chart(&[]).unwrap();

        assert_eq!(outcome, ChartOutcome::Retracted);
        assert!(!charts.stock_chart_path().exists());
    }

    #[test]
    fn retracts_when_every_position_is_closed() {
        let dir = TempDir::new().unwrap();
        let charts = ChartService::new(dir.path());

        let outcome = charts
            .render_stock_chart(&[closed_position("2330")])
            .unwrap();
        assert_eq!(outcome, ChartOutcome::Retracted);
    }

    #[test]
    fn retracting_an_absent_file_is_ok() {
        let dir = TempDir::new().unwrap();
        let charts = ChartService::new(dir.path());

        let outcome = charts.render_stock_chart(&[]).unwrap();
        assert_eq!(outcome, ChartOutcome::Retracted);
    }

    #[test]
    fn renders_allocation_chart_with_cash_only() {
        let dir = TempDir::new().unwrap();
        let charts = ChartService::new(dir.path());

        let outcome = charts.render_allocation_chart(315.0, 100.0, 0.0).unwrap();
        assert_eq!(outcome, ChartOutcome::Rendered);
        assert!(charts.allocation_chart_path().exists());
    }

    #[test]
    fn retracts_allocation_chart_when_all_zero() {
        let dir = TempDir::new().unwrap();
        let charts = ChartService::new(dir.path());

        fs::write(charts.allocation_chart_path(), b"stale").unwrap();
        let outcome = charts.render_allocation_chart(0.0, 0.0, 0.0).unwrap();

        assert_eq!(outcome, ChartOutcome::Retracted);
        assert!(!charts.allocation_chart_path().exists());
    }

    #[test]
    fn single_slice_renders() {
        let dir = TempDir::new().unwrap();
        let charts = ChartService::new(dir.path());

        let outcome = charts
            .render_stock_chart(&[open_position("2330", 6000.0)])
            .unwrap();
        assert_eq!(outcome, ChartOutcome::Rendered);
    }

    #[test]
    fn creates_the_static_dir_if_missing() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("static");
        let charts = ChartService::new(&nested);

        charts
            .render_stock_chart(&[open_position("2330", 6000.0)])
            .unwrap();
        assert!(nested.join("stock_piechart.jpg").exists());
    }
}
