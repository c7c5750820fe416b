// ═══════════════════════════════════════════════════════════════════
// Store Tests — SQLite ledger: cash CRUD, stock append, ticker scans
// ═══════════════════════════════════════════════════════════════════

use chrono::NaiveDate;
use tempfile::TempDir;

use finance_tracker_core::{NewCashEntry, NewStockTransaction, Store};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn new_cash(twd: f64, usd: f64, note: &str) -> NewCashEntry {
    NewCashEntry {
        twd_amount: twd,
        usd_amount: usd,
        note: note.to_string(),
        date: d(2024, 3, 1),
    }
}

fn new_tx(ticker: &str, shares: i64, price: f64) -> NewStockTransaction {
    NewStockTransaction {
        ticker: ticker.to_string(),
        shares,
        unit_price: price,
        fee: 20.0,
        tax: 9.0,
        date: d(2024, 3, 1),
    }
}

// ═══════════════════════════════════════════════════════════════════
// Cash
// ═══════════════════════════════════════════════════════════════════

mod cash {
    use super::*;

    #[test]
    fn fresh_store_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = Store::open(dir.path().join("ledger.db")).unwrap();
        assert!(store.list_cash().unwrap().is_empty());
    }

    #[test]
    fn insert_then_list_roundtrips() {
        let dir = TempDir::new().unwrap();
        let store = Store::open(dir.path().join("ledger.db")).unwrap();

        store.insert_cash(&new_cash(1000.0, 0.0, "salary")).unwrap();
        store.insert_cash(&new_cash(0.0, 50.0, "gift")).unwrap();

        let entries = store.list_cash().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].id, 1);
        assert_eq!(entries[0].twd_amount, 1000.0);
        assert_eq!(entries[0].note, "salary");
        assert_eq!(entries[0].date, d(2024, 3, 1));
        assert_eq!(entries[1].id, 2);
        assert_eq!(entries[1].usd_amount, 50.0);
    }

    #[test]
    fn delete_removes_only_that_row() {
        let dir = TempDir::new().unwrap();
        let store = Store::open(dir.path().join("ledger.db")).unwrap();

        store.insert_cash(&new_cash(1.0, 0.0, "a")).unwrap();
        store.insert_cash(&new_cash(2.0, 0.0, "b")).unwrap();
        store.delete_cash(1).unwrap();

        let entries = store.list_cash().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].note, "b");
    }

    #[test]
    fn deleting_an_absent_id_is_a_noop() {
        let dir = TempDir::new().unwrap();
        let store = Store::open(dir.path().join("ledger.db")).unwrap();

        store.insert_cash(&new_cash(1.0, 0.0, "a")).unwrap();
        store.delete_cash(999).unwrap();

        assert_eq!(store.list_cash().unwrap().len(), 1);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Stock
// ═══════════════════════════════════════════════════════════════════

mod stock {
    use super::*;

    #[test]
    fn insert_then_list_by_ticker_roundtrips() {
        let dir = TempDir::new().unwrap();
        let store = Store::open(dir.path().join("ledger.db")).unwrap();

        store.insert_stock(&new_tx("2330", 10, 600.0)).unwrap();
        store.insert_stock(&new_tx("2330", -4, 620.0)).unwrap();

        let rows = store.list_stock_by_ticker("2330").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].shares, 10);
        assert_eq!(rows[0].unit_price, 600.0);
        assert_eq!(rows[0].fee, 20.0);
        assert_eq!(rows[0].tax, 9.0);
        assert_eq!(rows[1].shares, -4);
    }

    #[test]
    fn list_by_ticker_filters_other_tickers() {
        let dir = TempDir::new().unwrap();
        let store = Store::open(dir.path().join("ledger.db")).unwrap();

        store.insert_stock(&new_tx("2330", 10, 600.0)).unwrap();
        store.insert_stock(&new_tx("0050", 5, 150.0)).unwrap();

        let rows = store.list_stock_by_ticker("0050").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].ticker, "0050");
    }

    #[test]
    fn tickers_are_distinct_in_first_seen_order() {
        let dir = TempDir::new().unwrap();
        let store = Store::open(dir.path().join("ledger.db")).unwrap();

        store.insert_stock(&new_tx("2330", 10, 600.0)).unwrap();
        store.insert_stock(&new_tx("0050", 5, 150.0)).unwrap();
        store.insert_stock(&new_tx("2330", 3, 610.0)).unwrap();
        store.insert_stock(&new_tx("2603", 100, 30.0)).unwrap();

        assert_eq!(
            store.list_stock_tickers().unwrap(),
            ["2330", "0050", "2603"]
        );
    }

    #[test]
    fn no_tickers_in_an_empty_store() {
        let dir = TempDir::new().unwrap();
        let store = Store::open(dir.path().join("ledger.db")).unwrap();
        assert!(store.list_stock_tickers().unwrap().is_empty());
    }
}

// ═══════════════════════════════════════════════════════════════════
// Lifecycle
// ═══════════════════════════════════════════════════════════════════

mod lifecycle {
    use super::*;

    #[test]
    fn data_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ledger.db");

        {
            let store = Store::open(&path).unwrap();
            store.insert_cash(&new_cash(42.0, 0.0, "kept")).unwrap();
            store.insert_stock(&new_tx("2330", 10, 600.0)).unwrap();
        } // connection dropped here

        let store = Store::open(&path).unwrap();
        assert_eq!(store.list_cash().unwrap().len(), 1);
        assert_eq!(store.list_stock_tickers().unwrap(), ["2330"]);
    }

    #[test]
    fn open_is_idempotent_on_an_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ledger.db");

        Store::open(&path).unwrap();
        let store = Store::open(&path).unwrap();
        assert!(store.list_cash().unwrap().is_empty());
    }
}
