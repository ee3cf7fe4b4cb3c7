//! Splits sales between weekdays and the weekend.

use std::fmt;

use time::Weekday;

use crate::transaction::{Transaction, WEEKDAYS};

/// Part of the week a sale fell on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeekPart {
    /// Monday to Friday.
    Weekday,
    /// Saturday and Sunday.
    Weekend,
}

impl WeekPart {
    /// Classify a day of the week.
    pub fn of(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Saturday | Weekday::Sunday => WeekPart::Weekend,
            _ => WeekPart::Weekday,
        }
    }

    /// The label shown on charts.
    pub fn name(self) -> &'static str {
        match self {
            WeekPart::Weekday => "Weekday",
            WeekPart::Weekend => "Weekend",
        }
    }
}

impl fmt::Display for WeekPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Total sales on weekdays and on the weekend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeekPartSales {
    /// Total sales from Monday to Friday.
    pub weekday: f64,
    /// Total sales on Saturday and Sunday.
    pub weekend: f64,
    /// `weekday + weekend` rounded to two decimal places.
    pub total: f64,
}

impl WeekPartSales {
    /// Both buckets with their labels, weekday first.
    pub fn buckets(&self) -> [(WeekPart, f64); 2] {
        [
            (WeekPart::Weekday, self.weekday),
            (WeekPart::Weekend, self.weekend),
        ]
    }
}

/// Round to two decimal places, with halves rounded away from zero.
fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Sums the total price of `transactions` per weekday, then per part of the week.
pub(super) fn sales_by_week_part<'a>(
    transactions: impl IntoIterator<Item = &'a Transaction>,
) -> WeekPartSales {
    let mut totals_by_weekday = [0.0; WEEKDAYS.len()];

    for transaction in transactions {
        let column = usize::from(transaction.derived.weekday.number_days_from_monday());
        totals_by_weekday[column] += transaction.total_price();
    }

    let mut weekday = 0.0;
    let mut weekend = 0.0;

    for (day, total) in WEEKDAYS.into_iter().zip(totals_by_weekday) {
        match WeekPart::of(day) {
            WeekPart::Weekday => weekday += total,
            WeekPart::Weekend => weekend += total,
        }
    }

    WeekPartSales {
        weekday,
        weekend,
        total: round_to_cents(weekday + weekend),
    }
}

#[cfg(test)]
mod tests {
    use time::{
        Weekday,
        macros::{date, time},
    };

    use crate::{analytics::test_utils::sale, transaction::Transaction};

    use super::{WeekPart, round_to_cents, sales_by_week_part};

    #[test]
    fn classifies_saturday_and_sunday_as_weekend() {
        assert_eq!(WeekPart::of(Weekday::Saturday), WeekPart::Weekend);
        assert_eq!(WeekPart::of(Weekday::Sunday), WeekPart::Weekend);
        assert_eq!(WeekPart::of(Weekday::Monday), WeekPart::Weekday);
        assert_eq!(WeekPart::of(Weekday::Friday), WeekPart::Weekday);
    }

    #[test]
    fn sums_into_two_buckets() {
        let transactions = vec![
            // Friday
            sale("1", date!(2023 - 01 - 06), time!(08:00:00), 10.0),
            // Saturday
            sale("2", date!(2023 - 01 - 07), time!(08:00:00), 4.0),
            // Sunday
            sale("3", date!(2023 - 01 - 08), time!(08:00:00), 6.0),
            // Monday
            sale("4", date!(2023 - 01 - 09), time!(08:00:00), 5.0),
        ];

        let result = sales_by_week_part(&transactions);

        assert_eq!(result.weekday, 15.0);
        assert_eq!(result.weekend, 10.0);
        assert_eq!(result.total, 25.0);
    }

    #[test]
    fn grand_total_is_rounded_once_at_the_end() {
        let transactions = vec![
            // Monday
            sale("1", date!(2023 - 01 - 02), time!(08:00:00), 1000.004),
            // Saturday
            sale("2", date!(2023 - 01 - 07), time!(08:00:00), 500.001),
        ];

        let result = sales_by_week_part(&transactions);

        assert_eq!(result.weekday, 1000.004);
        assert_eq!(result.weekend, 500.001);
        assert_eq!(result.total, 1500.01);
    }

    #[test]
    fn empty_buckets_are_zero() {
        let result = sales_by_week_part(&Vec::<Transaction>::new());

        assert_eq!(result.weekday, 0.0);
        assert_eq!(result.weekend, 0.0);
        assert_eq!(result.total, 0.0);
        assert_eq!(result.buckets()[0], (WeekPart::Weekday, 0.0));
        assert_eq!(result.buckets()[1], (WeekPart::Weekend, 0.0));
    }

    #[test]
    fn rounds_to_cents() {
        assert_eq!(round_to_cents(12.344), 12.34);
        assert_eq!(round_to_cents(12.346), 12.35);
        assert_eq!(round_to_cents(0.0), 0.0);
    }
}
