use anyhow::{bail, Context};
use chrono::{Datelike, Month, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// A calendar month, written `YYYY-MM`.
///
/// Budgets are set per `YearMonth` and the rollups bucket transactions by it. A date belongs to a
/// month exactly when the first seven characters of its ISO form equal the month's string form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    /// 1 through 12.
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> crate::Result<Self> {
        if !(1..=12).contains(&month) {
            bail!("Month must be between 1 and 12, got {month}");
        }
        Ok(Self { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// The month before this one; January rolls back to December of the previous year.
    pub fn pred(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// The month after this one; December rolls over to January of the next year.
    pub fn succ(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// The `count` months ending with (and including) `self`, oldest first.
    pub fn trailing(&self, count: usize) -> Vec<YearMonth> {
        let mut months = Vec::with_capacity(count);
        let mut current = *self;
        for _ in 0..count {
            months.push(current);
            current = current.pred();
        }
        months.reverse();
        months
    }

    /// Three-letter English abbreviation, e.g. `Jun`.
    pub fn short_name(&self) -> &'static str {
        // `month` is always within 1..=12, see `new` and `of`.
        let name = Month::try_from(self.month as u8)
            .map(|m| m.name())
            .unwrap_or("???");
        &name[..3]
    }
}

impl Display for YearMonth {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (year, month) = s
            .split_once('-')
            .with_context(|| format!("Expected a month in the form YYYY-MM, got '{s}'"))?;
        if year.len() != 4 || month.len() != 2 {
            bail!("Expected a month in the form YYYY-MM, got '{s}'");
        }
        let year = year
            .parse::<i32>()
            .with_context(|| format!("Invalid year in '{s}'"))?;
        let month = month
            .parse::<u32>()
            .with_context(|| format!("Invalid month in '{s}'"))?;
        YearMonth::new(year, month)
    }
}

impl Serialize for YearMonth {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for YearMonth {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        YearMonth::from_str(&s).map_err(serde::de::Error::custom)
    }
}
