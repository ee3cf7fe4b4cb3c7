//! Sales by day of the week and hour of the day.

use time::Weekday;

use crate::transaction::{Transaction, WEEKDAYS};

/// The number of hour rows in a [SalesHeatmap].
pub const HOURS_PER_DAY: usize = 24;

/// A dense hour × weekday matrix of total sales.
///
/// Rows are hours 0-23 and columns are [WEEKDAYS], Monday first. Cells
/// without sales hold 0.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesHeatmap {
    /// Total sales indexed by `[hour][weekday]`.
    pub cells: [[f64; WEEKDAYS.len()]; HOURS_PER_DAY],
    /// Total sales per hour across all seven weekdays.
    pub hourly_totals: [f64; HOURS_PER_DAY],
}

impl SalesHeatmap {
    /// Total sales in the cell for `hour` and `weekday`.
    ///
    /// # Panics
    /// Panics if `hour` is not in 0-23.
    pub fn get(&self, hour: u8, weekday: Weekday) -> f64 {
        self.cells[usize::from(hour)][weekday_column(weekday)]
    }

    /// The largest cell value, 0 for an empty matrix.
    pub fn max(&self) -> f64 {
        self.cells
            .iter()
            .flatten()
            .copied()
            .fold(0.0, f64::max)
    }
}

fn weekday_column(weekday: Weekday) -> usize {
    usize::from(weekday.number_days_from_monday())
}

/// Sums the total price of `transactions` into a [SalesHeatmap].
pub(super) fn sales_heatmap<'a>(
    transactions: impl IntoIterator<Item = &'a Transaction>,
) -> SalesHeatmap {
    let mut cells = [[0.0; WEEKDAYS.len()]; HOURS_PER_DAY];

    for transaction in transactions {
        let hour = usize::from(transaction.derived.hour);
        cells[hour][weekday_column(transaction.derived.weekday)] += transaction.total_price();
    }

    let hourly_totals = cells.map(|row| row.iter().sum::<f64>());

    SalesHeatmap {
        cells,
        hourly_totals,
    }
}

#[cfg(test)]
mod tests {
    use time::{
        Weekday,
        macros::{date, time},
    };

    use crate::{
        analytics::test_utils::sale,
        transaction::{Transaction, WEEKDAYS},
    };

    use super::{HOURS_PER_DAY, sales_heatmap};

    #[test]
    fn single_sale_fills_one_cell() {
        // 2023-01-02 is a Monday.
        let transactions = vec![sale("1", date!(2023 - 01 - 02), time!(09:15:00), 12.5)];

        let heatmap = sales_heatmap(&transactions);

        for hour in 0..HOURS_PER_DAY as u8 {
            for weekday in WEEKDAYS {
                let expected = if hour == 9 && weekday == Weekday::Monday {
                    12.5
                } else {
                    0.0
                };
                assert_eq!(
                    heatmap.get(hour, weekday),
                    expected,
                    "unexpected value at hour {hour} on {weekday}"
                );
            }
        }

        assert_eq!(heatmap.hourly_totals[9], 12.5);
        assert_eq!(heatmap.hourly_totals.iter().sum::<f64>(), 12.5);
    }

    #[test]
    fn columns_run_monday_to_sunday() {
        let transactions = vec![
            // Sunday
            sale("1", date!(2023 - 01 - 01), time!(07:00:00), 3.0),
            // Monday
            sale("2", date!(2023 - 01 - 02), time!(07:30:00), 5.0),
        ];

        let heatmap = sales_heatmap(&transactions);

        assert_eq!(heatmap.cells[7][0], 5.0);
        assert_eq!(heatmap.cells[7][6], 3.0);
        assert_eq!(heatmap.hourly_totals[7], 8.0);
    }

    #[test]
    fn sums_sales_in_the_same_cell() {
        let transactions = vec![
            sale("1", date!(2023 - 01 - 04), time!(13:00:00), 2.0),
            sale("2", date!(2023 - 01 - 11), time!(13:59:59), 4.0),
        ];

        let heatmap = sales_heatmap(&transactions);

        assert_eq!(heatmap.get(13, Weekday::Wednesday), 6.0);
        assert_eq!(heatmap.max(), 6.0);
    }

    #[test]
    fn empty_input_gives_zero_matrix() {
        let heatmap = sales_heatmap(&Vec::<Transaction>::new());

        assert_eq!(heatmap.cells.len(), HOURS_PER_DAY);
        assert!(heatmap.cells.iter().all(|row| row.len() == 7));
        assert!(heatmap.cells.iter().flatten().all(|&value| value == 0.0));
        assert_eq!(heatmap.max(), 0.0);
    }
}
