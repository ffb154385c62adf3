use chrono::{Datelike, Local, Months, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// A calendar month of a specific year, e.g. April 2023.
///
/// A `Period` can only be built from a valid date or by moving an existing `Period` by whole
/// months, so it always refers to a real month. Internally it holds the first day of that month.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Period(NaiveDate);

impl Period {
    /// The month containing `date`.
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date.with_day(1).unwrap_or(date))
    }

    /// The month containing today's date in the local time zone.
    pub fn current() -> Self {
        Self::from_date(Local::now().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// The month number, 1 through 12.
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.0
    }

    pub fn next(self) -> Self {
        self.offset(1)
    }

    pub fn prev(self) -> Self {
        self.offset(-1)
    }

    /// Moves the period by `months` whole months. A negative value moves backwards. Moving past
    /// the range of representable dates leaves the period unchanged.
    pub fn offset(self, months: i32) -> Self {
        let delta = Months::new(months.unsigned_abs());
        let moved = if months >= 0 {
            self.0.checked_add_months(delta)
        } else {
            self.0.checked_sub_months(delta)
        };
        moved.map(Self).unwrap_or(self)
    }

    /// Whether `date` falls within this month.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }
}

impl Default for Period {
    fn default() -> Self {
        Self::current()
    }
}

impl Display for Period {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl FromStr for Period {
    type Err = chrono::ParseError;

    /// Parses `YYYY-MM`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let date = NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")?;
        Ok(Self(date))
    }
}

impl Serialize for Period {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Period {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Period::from_str(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_from_date_is_first_of_month() {
        let period = Period::from_date(date(2023, 4, 17));
        assert_eq!(period.first_day(), date(2023, 4, 1));
        assert_eq!(period.year(), 2023);
        assert_eq!(period.month(), 4);
    }

    #[test]
    fn test_next_and_prev_cross_year_boundaries() {
        let december = Period::from_date(date(2022, 12, 31));
        assert_eq!(december.next(), Period::from_date(date(2023, 1, 1)));
        assert_eq!(december.next().prev(), december);

        let january = Period::from_date(date(2023, 1, 5));
        assert_eq!(january.prev().to_string(), "2022-12");
    }

    #[test]
    fn test_offset() {
        let period = Period::from_date(date(2023, 4, 1));
        assert_eq!(period.offset(0), period);
        assert_eq!(period.offset(13).to_string(), "2024-05");
        assert_eq!(period.offset(-16).to_string(), "2021-12");
    }

    #[test]
    fn test_contains() {
        let period = Period::from_date(date(2023, 4, 1));
        assert!(period.contains(date(2023, 4, 1)));
        assert!(period.contains(date(2023, 4, 30)));
        assert!(!period.contains(date(2023, 5, 1)));
        assert!(!period.contains(date(2022, 4, 15)));
    }

    #[test]
    fn test_parse_and_display() {
        let period = Period::from_str("2023-04").unwrap();
        assert_eq!(period.to_string(), "2023-04");
        assert!(Period::from_str("2023-13").is_err());
        assert!(Period::from_str("April").is_err());
    }

    #[test]
    fn test_serde() {
        let period = Period::from_str("2021-06").unwrap();
        let json = serde_json::to_string(&period).unwrap();
        assert_eq!(json, "\"2021-06\"");
        let back: Period = serde_json::from_str(&json).unwrap();
        assert_eq!(back, period);
    }
}
