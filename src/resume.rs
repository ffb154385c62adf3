//! Spending by category for a single month.

use crate::error::DataFormatError;
use crate::format::Formatter;
use crate::model::{Amount, Catalog, Direction, Period, Transaction};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// How much was spent in one category during the selected month.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    key: String,
    name: String,
    color: String,
    /// Raw sum of the category's expenses.
    total: Decimal,
    total_formatted: String,
    /// Share of the month's expenses, e.g. `25%`.
    percent: String,
}

impl CategorySummary {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn total(&self) -> Decimal {
        self.total
    }

    pub fn total_formatted(&self) -> &str {
        &self.total_formatted
    }

    pub fn percent(&self) -> &str {
        &self.percent
    }
}

/// Sums the expenses of `period` per category of `catalog`.
///
/// Only expenses (negative direction) dated within `period` are considered. Their sum is the
/// denominator of every percentage. Categories are reported in catalog order and those with no
/// spending are left out, so a month with no expenses yields an empty list. Expenses whose
/// category is not in the catalog count toward the denominator but are not listed.
///
/// Income records are skipped without being interpreted. An expense with an unreadable date, or
/// an in-period expense with an unreadable amount, is an error, as is a month whose expenses add
/// up to more than the largest `Decimal`.
pub fn totals_by_category(
    transactions: &[Transaction],
    catalog: &Catalog,
    period: Period,
    formatter: &Formatter,
) -> Result<Vec<CategorySummary>, DataFormatError> {
    let mut expenses: Vec<(&Transaction, Amount)> = Vec::new();
    for t in transactions {
        if t.direction() != Direction::Negative || !period.contains(t.date()?) {
            continue;
        }
        expenses.push((t, t.amount()?));
    }

    let expenses_total = checked_total(expenses.iter().copied())?;
    debug!(
        "{} expenses totaling {} in {period}",
        expenses.len(),
        expenses_total
    );
    if expenses_total.is_zero() {
        return Ok(Vec::new());
    }

    let mut summaries = Vec::new();
    for category in catalog.iter() {
        let category_sum = checked_total(
            expenses
                .iter()
                .copied()
                .filter(|(t, _)| t.category() == category.key()),
        )?;
        if category_sum.is_zero() {
            continue;
        }
        trace!("Category '{}' sums to {}", category.key(), category_sum);
        summaries.push(CategorySummary {
            key: category.key().to_string(),
            name: category.name().to_string(),
            color: category.color().to_string(),
            total: category_sum.value(),
            total_formatted: formatter.money(category_sum.value()),
            percent: formatter.percent(category_sum.value(), expenses_total.value()),
        });
    }
    Ok(summaries)
}

fn checked_total<'a, I>(mut expenses: I) -> Result<Amount, DataFormatError>
where
    I: Iterator<Item = (&'a Transaction, Amount)>,
{
    expenses.try_fold(Amount::ZERO, |total, (t, amount)| {
        total
            .checked_add(amount)
            .ok_or_else(|| DataFormatError::total_overflow(t.id(), amount.to_string()))
    })
}

/// The sum of the raw totals of `summaries`.
pub fn listed_total(summaries: &[CategorySummary]) -> Decimal {
    summaries.iter().map(CategorySummary::total).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DataField;
    use crate::format::{Currency, LocaleTag};
    use crate::model::{Category, StoredAmount};
    use std::str::FromStr;

    fn tx(id: &str, amount: &str, direction: Direction, category: &str, date: &str) -> Transaction {
        Transaction::from_stored(
            id,
            format!("name {id}"),
            StoredAmount::Text(amount.to_string()),
            direction,
            category,
            date,
        )
    }

    fn expense(id: &str, amount: &str, category: &str, date: &str) -> Transaction {
        tx(id, amount, Direction::Negative, category, date)
    }

    fn april() -> Period {
        Period::from_str("2023-04").unwrap()
    }

    fn br() -> Formatter {
        Formatter::new(LocaleTag::PtBr, Currency::Brl)
    }

    #[test]
    fn test_single_category_is_one_hundred_percent() {
        let records = vec![
            expense("1", "30", "food", "2023-04-02"),
            expense("2", "10", "food", "2023-04-20"),
        ];
        let result = totals_by_category(&records, &Catalog::default(), april(), &br()).unwrap();
        assert_eq!(result.len(), 1);
        let food = &result[0];
        assert_eq!(food.key(), "food");
        assert_eq!(food.name(), "Alimentação");
        assert_eq!(food.color(), "#FF872C");
        assert_eq!(food.total(), Decimal::from(40));
        assert_eq!(food.total_formatted(), "R$ 40,00");
        assert_eq!(food.percent(), "100%");
    }

    #[test]
    fn test_filters_by_month_year_and_direction() {
        let records = vec![
            expense("1", "50", "food", "2023-04-15"),
            expense("2", "999", "food", "2023-05-01"),
            expense("3", "999", "food", "2022-04-15"),
            tx("4", "999", Direction::Positive, "salary", "2023-04-10"),
            expense("5", "150", "car", "2023-04-30T12:00:00.000Z"),
        ];
        let result = totals_by_category(&records, &Catalog::default(), april(), &br()).unwrap();
        let keys: Vec<&str> = result.iter().map(CategorySummary::key).collect();
        assert_eq!(keys, vec!["food", "car"]);
        assert_eq!(result[0].percent(), "25%");
        assert_eq!(result[1].percent(), "75%");
        assert_eq!(listed_total(&result), Decimal::from(200));
    }

    #[test]
    fn test_month_without_expenses_is_empty() {
        let records = vec![
            tx("1", "100", Direction::Positive, "salary", "2023-04-01"),
            expense("2", "10", "food", "2023-03-31"),
        ];
        let result = totals_by_category(&records, &Catalog::default(), april(), &br()).unwrap();
        assert!(result.is_empty());
        let result = totals_by_category(&[], &Catalog::default(), april(), &br()).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_zero_amount_expenses_do_not_divide_by_zero() {
        let records = vec![expense("1", "0", "food", "2023-04-02")];
        let result = totals_by_category(&records, &Catalog::default(), april(), &br()).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_rounded_percentages_stay_near_one_hundred() {
        let records = vec![
            expense("1", "1", "food", "2023-04-02"),
            expense("2", "1", "car", "2023-04-02"),
            expense("3", "1", "leisure", "2023-04-02"),
        ];
        let result = totals_by_category(&records, &Catalog::default(), april(), &br()).unwrap();
        assert!(result.iter().all(|s| s.percent() == "33%"));
        let sum: u32 = result
            .iter()
            .map(|s| s.percent().trim_end_matches('%').parse::<u32>().unwrap())
            .sum();
        assert!(sum <= 100);
    }

    #[test]
    fn test_category_totals_sum_to_the_month_total() {
        let records = vec![
            expense("1", "12.34", "food", "2023-04-02"),
            expense("2", "56.78", "purchases", "2023-04-03"),
            expense("3", "9.10", "food", "2023-04-04"),
            expense("4", "100", "studies", "2023-04-05"),
        ];
        let result = totals_by_category(&records, &Catalog::default(), april(), &br()).unwrap();
        assert_eq!(listed_total(&result), Decimal::from_str("178.22").unwrap());
        for s in &result {
            assert!(s.total() <= Decimal::from_str("178.22").unwrap());
        }
    }

    #[test]
    fn test_unknown_category_counts_toward_the_total_only() {
        let records = vec![
            expense("1", "25", "food", "2023-04-02"),
            expense("2", "75", "rent", "2023-04-02"),
        ];
        let result = totals_by_category(&records, &Catalog::default(), april(), &br()).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].percent(), "25%");
    }

    #[test]
    fn test_catalog_order_is_preserved() {
        let catalog = Catalog::new(vec![
            Category::new("b", "B", "#000"),
            Category::new("a", "A", "#fff"),
        ]);
        let records = vec![
            expense("1", "1", "a", "2023-04-02"),
            expense("2", "1", "b", "2023-04-02"),
        ];
        let result = totals_by_category(&records, &catalog, april(), &br()).unwrap();
        let keys: Vec<&str> = result.iter().map(CategorySummary::key).collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn test_malformed_amount_in_period_is_an_error() {
        let records = vec![expense("1", "lots", "food", "2023-04-02")];
        let e = totals_by_category(&records, &Catalog::default(), april(), &br()).unwrap_err();
        assert_eq!(e.field(), DataField::Amount);
    }

    #[test]
    fn test_malformed_amount_outside_period_is_ignored() {
        let records = vec![
            expense("1", "lots", "food", "2023-05-02"),
            expense("2", "5", "food", "2023-04-02"),
        ];
        let result = totals_by_category(&records, &Catalog::default(), april(), &br()).unwrap();
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_month_total_past_decimal_max_is_an_error() {
        let max = Decimal::MAX.to_string();
        let records = vec![
            expense("1", &max, "food", "2023-04-02"),
            expense("2", &max, "car", "2023-04-03"),
        ];
        let e = totals_by_category(&records, &Catalog::default(), april(), &br()).unwrap_err();
        assert_eq!(e.id(), "2");
        assert_eq!(e.field(), DataField::Amount);

        let records = vec![
            expense("1", &max, "food", "2023-04-02"),
            expense("2", &max, "car", "2023-05-03"),
        ];
        let result = totals_by_category(&records, &Catalog::default(), april(), &br()).unwrap();
        assert_eq!(result[0].percent(), "100%");
    }
}
