use crate::args::ResumeArgs;
use crate::commands::Out;
use crate::error::{ErrorType, IntoResult};
use crate::format::LocaleTag;
use crate::model::Period;
use crate::resume::CategorySummary;
use crate::screen::ResumeScreen;
use crate::{Config, Result};
use serde::Serialize;
use std::fmt::Write;

/// The structured output of the `resume` command.
#[derive(Debug, Clone, Serialize)]
pub struct Resume {
    /// The selected month, e.g. `2023-04`.
    pub period: Period,
    /// The selected month for display, e.g. `abril, 2023`.
    pub month: String,
    pub categories: Vec<CategorySummary>,
}

/// Computes the per-category spending breakdown of a month.
///
/// The month is `args.month()`, or the current month, moved by `args.offset()` months.
///
/// # Errors
///
/// - Returns an error if a stored expense has an amount or date that cannot be interpreted.
pub async fn resume(config: Config, args: ResumeArgs) -> Result<Out<Resume>> {
    let formatter = config.formatter();
    let selected = args
        .month()
        .unwrap_or_else(Period::current)
        .offset(args.offset());
    let mut screen = ResumeScreen::new(selected);

    let categories = screen
        .load(&config.storage(), config.catalog(), &formatter)
        .await
        .pub_result(ErrorType::Data)?
        .to_vec();

    let period = screen.selected();
    let month = formatter.month_and_year(period);
    let mut message = format!("{month}\n");
    if categories.is_empty() {
        let _ = write!(
            message,
            "  {}",
            match formatter.locale() {
                LocaleTag::PtBr => "Nenhuma saída neste mês",
                LocaleTag::EnUs => "No expenses this month",
            }
        );
    }
    for c in &categories {
        let _ = writeln!(
            message,
            "  {:<16} {:>16} {:>5}",
            c.name(),
            c.total_formatted(),
            c.percent()
        );
    }

    let resume = Resume {
        period,
        month,
        categories,
    };
    Ok(Out::new(message.trim_end(), resume))
}
