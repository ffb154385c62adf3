//! Drives the public library API end to end: a file-backed store, the dashboard summary and the
//! monthly category breakdown.

use gofinances::format::{Currency, Formatter, LocaleTag};
use gofinances::model::{Catalog, Direction, Period, StoredAmount, Transaction};
use gofinances::resume::{listed_total, totals_by_category};
use gofinances::screen::{DashboardScreen, MonthStep, ResumeScreen};
use gofinances::storage::{self, FileStorage, Storage, TRANSACTIONS_KEY};
use gofinances::summary::summarize;
use rust_decimal::Decimal;
use std::str::FromStr;
use tempfile::TempDir;

fn record(id: &str, amount: &str, direction: Direction, category: &str, date: &str) -> Transaction {
    Transaction::from_stored(
        id,
        format!("record {id}"),
        StoredAmount::Text(amount.to_string()),
        direction,
        category,
        date,
    )
}

fn records() -> Vec<Transaction> {
    vec![
        record("1", "3200", Direction::Positive, "salary", "2023-05-05T09:00:00.000Z"),
        record("2", "1500.5", Direction::Negative, "purchases", "2023-05-12T18:30:00.000Z"),
        record("3", "499.5", Direction::Negative, "food", "2023-05-28"),
        record("4", "80", Direction::Negative, "leisure", "2023-04-30"),
    ]
}

async fn file_storage(dir: &TempDir) -> FileStorage {
    let storage = FileStorage::new(dir.path().join("storage.json"));
    storage.init().await.unwrap();
    storage
}

#[tokio::test]
async fn stored_records_summarize_in_en_us() {
    let dir = TempDir::new().unwrap();
    let storage = file_storage(&dir).await;
    storage::save_transactions(&storage, &records()).await.unwrap();

    let formatter = Formatter::new(LocaleTag::EnUs, Currency::Usd);
    let mut screen = DashboardScreen::new();
    assert!(screen.is_loading());
    let summary = screen.load(&storage, &formatter).await.unwrap().clone();
    assert!(!screen.is_loading());

    assert_eq!(summary.entries().amount(), "$3,200.00");
    assert_eq!(summary.entries().last_transaction(), "Last entry on May 5");
    assert_eq!(summary.expenses().amount(), "$2,080.00");
    assert_eq!(summary.expenses().last_transaction(), "Last expense on May 28");
    assert_eq!(summary.total().amount(), "$1,120.00");
    assert_eq!(summary.total().last_transaction(), "01 to May 28");
    assert_eq!(
        summary.entries().value() - summary.expenses().value(),
        summary.total().value()
    );
    assert_eq!(summary.transactions().len(), 4);
    assert_eq!(summary.transactions()[2].date(), "05/28/23");
}

#[tokio::test]
async fn monthly_breakdown_follows_selected_month() {
    let dir = TempDir::new().unwrap();
    let storage = file_storage(&dir).await;
    storage::save_transactions(&storage, &records()).await.unwrap();

    let formatter = Formatter::new(LocaleTag::PtBr, Currency::Brl);
    let catalog = Catalog::default();
    let mut screen = ResumeScreen::new(Period::from_str("2023-05").unwrap());
    let may = screen
        .load(&storage, &catalog, &formatter)
        .await
        .unwrap()
        .to_vec();
    let keys: Vec<&str> = may.iter().map(|c| c.key()).collect();
    assert_eq!(keys, vec!["purchases", "food"]);
    assert_eq!(may[0].percent(), "75%");
    assert_eq!(may[0].total_formatted(), "R$ 1.500,50");
    assert_eq!(may[1].percent(), "25%");
    assert_eq!(listed_total(&may), Decimal::from(2000));

    screen.step(MonthStep::Prev);
    assert!(screen.is_loading());
    let april = screen.load(&storage, &catalog, &formatter).await.unwrap();
    assert_eq!(april.len(), 1);
    assert_eq!(april[0].key(), "leisure");
    assert_eq!(april[0].percent(), "100%");
}

#[tokio::test]
async fn unreadable_store_is_empty_and_bad_records_are_errors() {
    let dir = TempDir::new().unwrap();
    let storage = file_storage(&dir).await;
    let formatter = Formatter::default();

    storage
        .set_item(TRANSACTIONS_KEY, "not json".to_string())
        .await
        .unwrap();
    let loaded = storage::load_transactions(&storage).await;
    assert!(loaded.is_empty());
    let summary = summarize(&loaded, &formatter).unwrap();
    assert!(summary.entries().last_transaction().is_empty());
    assert!(summary.total().value().is_zero());

    let bad = vec![record("9", "2023-05-01", Direction::Negative, "food", "tomorrow")];
    let e = summarize(&bad, &formatter).unwrap_err();
    assert_eq!(e.id(), "9");
    let period = Period::from_str("2023-05").unwrap();
    assert!(totals_by_category(&bad, &Catalog::default(), period, &formatter).is_err());
}
