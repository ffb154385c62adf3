use crate::commands::Out;
use crate::error::{ErrorType, IntoResult};
use crate::format::{Formatter, LocaleTag};
use crate::model::Direction;
use crate::screen::DashboardScreen;
use crate::summary::{Highlight, Summary};
use crate::{Config, Result};
use std::fmt::Write;

/// Computes the dashboard from the stored transactions.
///
/// # Returns
///
/// On success, returns an `Out` containing the highlight cards and the transaction listing as a
/// printable message, and the `Summary` as structured data.
///
/// # Errors
///
/// - Returns an error if a stored transaction has an amount or date that cannot be interpreted.
pub async fn dashboard(config: Config) -> Result<Out<Summary>> {
    let formatter = config.formatter();
    let mut screen = DashboardScreen::new();
    let summary = screen
        .load(&config.storage(), &formatter)
        .await
        .pub_result(ErrorType::Data)?
        .clone();
    Ok(Out::new(render(&summary, &formatter), summary))
}

struct Titles {
    entries: &'static str,
    expenses: &'static str,
    total: &'static str,
    listing: &'static str,
    empty: &'static str,
}

fn titles(locale: LocaleTag) -> Titles {
    match locale {
        LocaleTag::PtBr => Titles {
            entries: "Entradas",
            expenses: "Saídas",
            total: "Total",
            listing: "Listagem",
            empty: "Nenhuma transação cadastrada",
        },
        LocaleTag::EnUs => Titles {
            entries: "Income",
            expenses: "Expenses",
            total: "Total",
            listing: "Transactions",
            empty: "No transactions yet",
        },
    }
}

fn render(summary: &Summary, formatter: &Formatter) -> String {
    let titles = titles(formatter.locale());
    let mut s = String::new();
    card(&mut s, titles.entries, summary.entries());
    card(&mut s, titles.expenses, summary.expenses());
    card(&mut s, titles.total, summary.total());
    let _ = writeln!(s, "\n{}", titles.listing);
    if summary.transactions().is_empty() {
        let _ = write!(s, "  {}", titles.empty);
    }
    for t in summary.transactions() {
        let sign = match t.direction() {
            Direction::Positive => ' ',
            Direction::Negative => '-',
        };
        let _ = writeln!(
            s,
            "  {}  {:<24} {sign}{:>16}  {}",
            t.date(),
            t.name(),
            t.amount(),
            t.category()
        );
    }
    s.trim_end().to_string()
}

fn card(s: &mut String, title: &str, highlight: &Highlight) {
    let _ = writeln!(
        s,
        "{title:<10} {:>16}  {}",
        highlight.amount(),
        highlight.last_transaction()
    );
}
