//! The month selector that threads through every aggregate query.

use std::fmt;

use time::Month;

use crate::Error;

/// Restricts aggregate views to a single month, or to none at all.
///
/// On the wire (query strings, the month selector) `0` means [MonthFilter::All]
/// and `1`-`12` select a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MonthFilter {
    /// Include every transaction.
    #[default]
    All,
    /// Include only the transactions made in this month.
    Month(Month),
}

impl MonthFilter {
    /// The wire value of the filter: 0 for all months, otherwise 1-12.
    pub fn number(self) -> u8 {
        match self {
            MonthFilter::All => 0,
            MonthFilter::Month(month) => u8::from(month),
        }
    }

    /// Whether a transaction made in `month` passes the filter.
    pub fn matches(self, month: Month) -> bool {
        match self {
            MonthFilter::All => true,
            MonthFilter::Month(selected) => selected == month,
        }
    }
}

impl TryFrom<u8> for MonthFilter {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value == 0 {
            return Ok(MonthFilter::All);
        }

        Month::try_from(value)
            .map(MonthFilter::Month)
            .map_err(|_| Error::InvalidMonth(value))
    }
}

impl fmt::Display for MonthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthFilter::All => write!(f, "All"),
            MonthFilter::Month(month) => write!(f, "{month}"),
        }
    }
}
