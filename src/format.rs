//! Locale-aware presentation of amounts, dates and percentages.
//!
//! Nothing here reads the process locale. The `Formatter` is built from the configured locale and
//! currency and passed to whatever needs to produce display strings.

use crate::model::Period;
use chrono::{Datelike, NaiveDate, NaiveTime, TimeZone, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// The locales for which display strings can be produced.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum LocaleTag {
    /// Brazilian Portuguese: `R$ 1.234,56`, `1 de abril`, `01/04/23`.
    #[default]
    #[serde(rename = "pt-BR")]
    PtBr,
    /// US English: `$1,234.56`, `April 1`, `04/01/23`.
    #[serde(rename = "en-US")]
    EnUs,
}

serde_plain::derive_display_from_serialize!(LocaleTag);
serde_plain::derive_fromstr_from_deserialize!(LocaleTag);

impl LocaleTag {
    fn chrono_locale(&self) -> chrono::Locale {
        match self {
            LocaleTag::PtBr => chrono::Locale::pt_BR,
            LocaleTag::EnUs => chrono::Locale::en_US,
        }
    }
}

/// ISO 4217 currency codes that can be displayed.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Brl,
    Usd,
    Eur,
}

serde_plain::derive_display_from_serialize!(Currency);
serde_plain::derive_fromstr_from_deserialize!(Currency);

impl Currency {
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Brl => "R$",
            Currency::Usd => "$",
            Currency::Eur => "€",
        }
    }
}

/// Produces display strings for a fixed locale and currency.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
pub struct Formatter {
    locale: LocaleTag,
    currency: Currency,
}

impl Formatter {
    pub fn new(locale: LocaleTag, currency: Currency) -> Self {
        Self { locale, currency }
    }

    pub fn locale(&self) -> LocaleTag {
        self.locale
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Formats `value` as money, rounded to cents, e.g. `R$ 1.234,56` or `-$60.00`.
    pub fn money(&self, value: Decimal) -> String {
        let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };
        let (int_sep, dec_sep) = match self.locale {
            LocaleTag::PtBr => ('.', ','),
            LocaleTag::EnUs => (',', '.'),
        };
        let digits = format!("{:.2}", rounded.abs());
        let (int_part, cents) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));
        let grouped = format!("{}{dec_sep}{cents}", group_thousands(int_part, int_sep));
        let symbol = self.currency.symbol();
        match self.locale {
            LocaleTag::PtBr => format!("{sign}{symbol} {grouped}"),
            LocaleTag::EnUs => format!("{sign}{symbol}{grouped}"),
        }
    }

    /// Day of month and month name, e.g. `1 de abril` or `April 1`.
    pub fn day_and_month(&self, date: NaiveDate) -> String {
        let month = self.localized(date, "%B");
        match self.locale {
            LocaleTag::PtBr => format!("{} de {month}", date.day()),
            LocaleTag::EnUs => format!("{month} {}", date.day()),
        }
    }

    /// A two-digit day, month and year, ordered per locale, e.g. `01/04/23` or `04/01/23`.
    pub fn short_date(&self, date: NaiveDate) -> String {
        match self.locale {
            LocaleTag::PtBr => date.format("%d/%m/%y").to_string(),
            LocaleTag::EnUs => date.format("%m/%d/%y").to_string(),
        }
    }

    /// Month name and year, e.g. `abril, 2023`.
    pub fn month_and_year(&self, period: Period) -> String {
        format!(
            "{}, {}",
            self.localized(period.first_day(), "%B"),
            period.year()
        )
    }

    /// A whole-number percentage of `part` in `whole`, rounded half away from zero, e.g. `33%`.
    /// A zero `whole` yields `0%`.
    pub fn percent(&self, part: Decimal, whole: Decimal) -> String {
        format!("{}%", percent_of(part, whole))
    }

    pub fn last_entry_label(&self, date: Option<NaiveDate>) -> String {
        self.label(date, |d| match self.locale {
            LocaleTag::PtBr => format!("Última entrada dia {d}"),
            LocaleTag::EnUs => format!("Last entry on {d}"),
        })
    }

    pub fn last_expense_label(&self, date: Option<NaiveDate>) -> String {
        self.label(date, |d| match self.locale {
            LocaleTag::PtBr => format!("Última saída dia {d}"),
            LocaleTag::EnUs => format!("Last expense on {d}"),
        })
    }

    /// The span from the start of the month to the most recent expense.
    pub fn interval_label(&self, date: Option<NaiveDate>) -> String {
        self.label(date, |d| match self.locale {
            LocaleTag::PtBr => format!("01 a {d}"),
            LocaleTag::EnUs => format!("01 to {d}"),
        })
    }

    /// An absent date renders as the empty string.
    fn label<F>(&self, date: Option<NaiveDate>, f: F) -> String
    where
        F: Fn(String) -> String,
    {
        match date {
            Some(date) => f(self.day_and_month(date)),
            None => String::new(),
        }
    }

    fn localized(&self, date: NaiveDate, fmt: &str) -> String {
        Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
            .format_localized(fmt, self.locale.chrono_locale())
            .to_string()
    }
}

/// `part / whole * 100` rounded to a whole number. Zero when `whole` is zero.
fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        return Decimal::ZERO;
    }
    (part / whole * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Inserts `sep` between every group of three digits, counting from the right.
fn group_thousands(digits: &str, sep: char) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(sep);
        }
        grouped.push(c);
    }
    grouped
}
