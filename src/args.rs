//! These structs provide the CLI interface for the gofinances CLI.

use crate::format::{Currency, LocaleTag};
use crate::model::{Amount, Direction, Period};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// gofinances: keep track of income and expenses.
///
/// Transactions are kept in a small local store inside the home directory. The dashboard shows
/// total income, total expenses and the balance; the resume shows how the expenses of a month are
/// split across categories.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the home directory, the configuration file and an empty store.
    Init(InitArgs),
    /// Show total income, total expenses, the balance and every transaction.
    Dashboard,
    /// Show how the expenses of a month are split across categories.
    Resume(ResumeArgs),
    /// Record a new income or expense.
    Insert(InsertArgs),
    /// Delete all stored transactions.
    Clear,
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where data and configuration are held. Defaults to ~/gofinances
    #[arg(long, env = "GOFINANCES_HOME", default_value_t = default_home())]
    home: DisplayPath,
}

impl Common {
    pub fn new(log_level: LevelFilter, home: PathBuf) -> Self {
        Self {
            log_level,
            home: home.into(),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn home(&self) -> &DisplayPath {
        &self.home
    }
}

/// Args for the `gofinances init` command.
#[derive(Debug, Parser, Clone)]
pub struct InitArgs {
    /// The locale used to display dates and numbers: pt-BR or en-US.
    #[arg(long, default_value_t = LocaleTag::default())]
    locale: LocaleTag,

    /// The currency used to display amounts: BRL, USD or EUR.
    #[arg(long, default_value_t = Currency::default())]
    currency: Currency,
}

impl InitArgs {
    pub fn new(locale: LocaleTag, currency: Currency) -> Self {
        Self { locale, currency }
    }

    pub fn locale(&self) -> LocaleTag {
        self.locale
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }
}

/// Args for the `gofinances resume` command.
#[derive(Debug, Parser, Clone)]
pub struct ResumeArgs {
    /// The month to show, as YYYY-MM. Defaults to the current month.
    #[arg(long)]
    month: Option<Period>,

    /// Move the selected month by this many months, e.g. -1 for the month before.
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    offset: i32,
}

impl ResumeArgs {
    pub fn new(month: Option<Period>, offset: i32) -> Self {
        Self { month, offset }
    }

    pub fn month(&self) -> Option<Period> {
        self.month
    }

    pub fn offset(&self) -> i32 {
        self.offset
    }
}

/// Args for the `gofinances insert` command.
#[derive(Debug, Parser, Clone)]
pub struct InsertArgs {
    /// A short description, e.g. "Lunch".
    #[arg(long)]
    name: String,

    /// The amount, without a sign. The direction is given by --type.
    #[arg(long)]
    amount: Amount,

    /// positive for income, negative for an expense.
    #[arg(long = "type")]
    direction: Direction,

    /// The category key, e.g. food.
    #[arg(long)]
    category: String,

    /// The date of the transaction as YYYY-MM-DD. Defaults to now.
    #[arg(long)]
    date: Option<NaiveDate>,
}

impl InsertArgs {
    pub fn new(
        name: impl Into<String>,
        amount: Amount,
        direction: Direction,
        category: impl Into<String>,
        date: Option<NaiveDate>,
    ) -> Self {
        Self {
            name: name.into(),
            amount,
            direction,
            category: category.into(),
            date,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }
}

fn default_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("gofinances"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --home or GOFINANCES_HOME instead of relying on the default \
                home directory. If you continue using the program right now, you may have \
                problems!",
            );
            PathBuf::from("gofinances")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn path(&self) -> &Path {
        &self.0
    }
}
