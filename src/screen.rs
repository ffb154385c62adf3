//! State owned by the presentation layer for each view.
//!
//! A screen is created, loaded from storage, read while it is shown and dropped afterwards. Loading
//! again recomputes everything from the latest stored snapshot.

use crate::error::DataFormatError;
use crate::format::Formatter;
use crate::model::{Catalog, Period};
use crate::resume::{totals_by_category, CategorySummary};
use crate::storage::{load_transactions, Storage};
use crate::summary::{summarize, Summary};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The dashboard: highlight cards and the transaction listing.
#[derive(Debug, Default, Clone)]
pub struct DashboardScreen {
    summary: Option<Summary>,
}

impl DashboardScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a load has not yet completed.
    pub fn is_loading(&self) -> bool {
        self.summary.is_none()
    }

    pub fn summary(&self) -> Option<&Summary> {
        self.summary.as_ref()
    }

    /// Reads the stored transactions and recomputes the summary. On error the previous summary,
    /// if any, is kept.
    pub async fn load(
        &mut self,
        storage: &dyn Storage,
        formatter: &Formatter,
    ) -> Result<&Summary, DataFormatError> {
        let transactions = load_transactions(storage).await;
        let summary = summarize(&transactions, formatter)?;
        Ok(&*self.summary.insert(summary))
    }
}

/// Which way to move the selected month.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonthStep {
    Prev,
    Next,
}

/// The per-category spending breakdown for a selected month.
#[derive(Debug, Clone)]
pub struct ResumeScreen {
    selected: Period,
    categories: Option<Vec<CategorySummary>>,
}

impl ResumeScreen {
    pub fn new(selected: Period) -> Self {
        Self {
            selected,
            categories: None,
        }
    }

    pub fn selected(&self) -> Period {
        self.selected
    }

    pub fn is_loading(&self) -> bool {
        self.categories.is_none()
    }

    pub fn categories(&self) -> Option<&[CategorySummary]> {
        self.categories.as_deref()
    }

    /// Moves the selection by one month and discards the breakdown of the previous selection.
    pub fn step(&mut self, step: MonthStep) {
        self.selected = match step {
            MonthStep::Prev => self.selected.prev(),
            MonthStep::Next => self.selected.next(),
        };
        self.categories = None;
        debug!("Selected month is now {}", self.selected);
    }

    /// Reads the stored transactions and recomputes the breakdown for the selected month.
    pub async fn load(
        &mut self,
        storage: &dyn Storage,
        catalog: &Catalog,
        formatter: &Formatter,
    ) -> Result<&[CategorySummary], DataFormatError> {
        let transactions = load_transactions(storage).await;
        let categories = totals_by_category(&transactions, catalog, self.selected, formatter)?;
        Ok(self.categories.insert(categories).as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStorage, TRANSACTIONS_KEY};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    const RECORDS: &str = r#"[
        {"id":"1","name":"Salary","amount":"100","type":"positive","category":"salary","date":"2023-04-01T10:00:00.000Z"},
        {"id":"2","name":"Lunch","amount":"40","type":"negative","category":"food","date":"2023-04-02T10:00:00.000Z"},
        {"id":"3","name":"Fuel","amount":"60","type":"negative","category":"car","date":"2023-03-15T10:00:00.000Z"}
    ]"#;

    async fn seeded() -> MemoryStorage {
        let storage = MemoryStorage::new();
        storage
            .set_item(TRANSACTIONS_KEY, RECORDS.to_string())
            .await
            .unwrap();
        storage
    }

    #[tokio::test]
    async fn test_dashboard_lifecycle() {
        let storage = seeded().await;
        let mut screen = DashboardScreen::new();
        assert!(screen.is_loading());

        let summary = screen.load(&storage, &Formatter::default()).await.unwrap();
        assert_eq!(summary.total().value(), Decimal::ZERO);
        assert_eq!(summary.expenses().amount(), "R$ 100,00");
        assert!(!screen.is_loading());
        assert_eq!(screen.summary().unwrap().transactions().len(), 3);
    }

    #[tokio::test]
    async fn test_dashboard_reload_sees_new_data() {
        let storage = seeded().await;
        let mut screen = DashboardScreen::new();
        screen.load(&storage, &Formatter::default()).await.unwrap();

        storage
            .set_item(TRANSACTIONS_KEY, "[]".to_string())
            .await
            .unwrap();
        let summary = screen.load(&storage, &Formatter::default()).await.unwrap();
        assert!(summary.transactions().is_empty());
    }

    #[tokio::test]
    async fn test_dashboard_with_corrupt_storage_is_empty() {
        let storage = MemoryStorage::new();
        storage
            .set_item(TRANSACTIONS_KEY, "corrupt".to_string())
            .await
            .unwrap();
        let mut screen = DashboardScreen::new();
        let summary = screen.load(&storage, &Formatter::default()).await.unwrap();
        assert_eq!(summary.entries().last_transaction(), "");
        assert_eq!(summary.total().amount(), "R$ 0,00");
    }

    #[tokio::test]
    async fn test_resume_month_navigation() {
        let storage = seeded().await;
        let catalog = Catalog::default();
        let formatter = Formatter::default();
        let mut screen = ResumeScreen::new(Period::from_str("2023-04").unwrap());

        let april = screen.load(&storage, &catalog, &formatter).await.unwrap();
        assert_eq!(april.len(), 1);
        assert_eq!(april[0].key(), "food");

        screen.step(MonthStep::Prev);
        assert!(screen.is_loading());
        assert_eq!(screen.selected().to_string(), "2023-03");
        let march = screen.load(&storage, &catalog, &formatter).await.unwrap();
        assert_eq!(march.len(), 1);
        assert_eq!(march[0].key(), "car");
        assert_eq!(march[0].percent(), "100%");

        screen.step(MonthStep::Prev);
        let february = screen.load(&storage, &catalog, &formatter).await.unwrap();
        assert!(february.is_empty());
    }
}
