//! Headline figures: total sales, order count and quantity sold, overall and
//! per month with the change from the previous month.

use std::{
    collections::{BTreeMap, HashSet},
    fmt,
};

use time::Month;

use crate::transaction::Transaction;

/// Totals over a set of transactions.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct KpiTotals {
    /// Sum of the total price of every line item.
    pub total_sales: f64,
    /// Number of distinct transaction IDs.
    pub total_orders: usize,
    /// Sum of the quantity of every line item.
    pub total_quantity: u64,
}

/// Whether a metric went up or down compared to the previous month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendDirection {
    /// The percentage growth is positive.
    Increasing,
    /// The percentage growth is negative.
    Decreasing,
    /// The percentage growth is zero or undefined.
    NoChange,
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TrendDirection::Increasing => "Increasing",
            TrendDirection::Decreasing => "Decreasing",
            TrendDirection::NoChange => "No Change",
        };

        write!(f, "{label}")
    }
}

/// The change in a metric from the previous month in the data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trend {
    /// Percent change from the previous month, 0 when there is no previous
    /// month or the previous value was 0.
    pub percentage_growth: f64,
    /// Absolute change from the previous month, 0 when there is no previous month.
    pub grown_from_prev: f64,
    /// The sign of `percentage_growth`.
    pub direction: TrendDirection,
}

impl Trend {
    fn between(previous: Option<f64>, current: f64) -> Self {
        let Some(previous) = previous else {
            return Self {
                percentage_growth: 0.0,
                grown_from_prev: 0.0,
                direction: TrendDirection::NoChange,
            };
        };

        let grown_from_prev = current - previous;
        let percentage_growth =
            (previous != 0.0).then(|| grown_from_prev / previous * 100.0);

        let direction = match percentage_growth {
            Some(growth) if growth > 0.0 => TrendDirection::Increasing,
            Some(growth) if growth < 0.0 => TrendDirection::Decreasing,
            _ => TrendDirection::NoChange,
        };

        Self {
            percentage_growth: percentage_growth.unwrap_or(0.0),
            grown_from_prev,
            direction,
        }
    }
}

/// The headline figures for one month and how they changed from the month before.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlyKpi {
    /// The month the figures are for.
    pub month: Month,
    /// Sum of the total price of the month's line items.
    pub total_sales: f64,
    /// Number of distinct transaction IDs in the month.
    pub total_orders: usize,
    /// Sum of the quantity of the month's line items.
    pub total_quantity: u64,
    /// Change in `total_sales`.
    pub sales_trend: Trend,
    /// Change in `total_orders`.
    pub orders_trend: Trend,
    /// Change in `total_quantity`.
    pub quantity_trend: Trend,
}

/// The KPI row for the selected month and the transactions behind it.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyKpiView {
    /// The selected month's figures, `None` if the month has no transactions
    /// or no month is selected.
    pub summary: Option<MonthlyKpi>,
    /// The selected month's transactions, for drill-down charts.
    pub transactions: Vec<Transaction>,
}

/// Calculates the totals over `transactions`.
pub(super) fn kpi_totals<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> KpiTotals {
    let mut total_sales = 0.0;
    let mut total_quantity = 0;
    let mut order_ids = HashSet::new();

    for transaction in transactions {
        total_sales += transaction.total_price();
        total_quantity += u64::from(transaction.quantity);
        order_ids.insert(transaction.transaction_id.as_str());
    }

    KpiTotals {
        total_sales,
        total_orders: order_ids.len(),
        total_quantity,
    }
}

/// Groups `transactions` by month and calculates each month's totals and the
/// change from the previous month present in the data.
///
/// # Returns
/// One entry per month with at least one transaction, ordered by month number.
pub(super) fn monthly_kpis(transactions: &[Transaction]) -> Vec<MonthlyKpi> {
    let mut transactions_by_month: BTreeMap<u8, (Month, Vec<&Transaction>)> = BTreeMap::new();

    for transaction in transactions {
        transactions_by_month
            .entry(transaction.month_number())
            .or_insert_with(|| (transaction.derived.month, Vec::new()))
            .1
            .push(transaction);
    }

    let mut previous: Option<KpiTotals> = None;

    transactions_by_month
        .into_values()
        .map(|(month, transactions)| {
            let totals = kpi_totals(transactions);

            let row = MonthlyKpi {
                month,
                total_sales: totals.total_sales,
                total_orders: totals.total_orders,
                total_quantity: totals.total_quantity,
                sales_trend: Trend::between(
                    previous.map(|previous| previous.total_sales),
                    totals.total_sales,
                ),
                orders_trend: Trend::between(
                    previous.map(|previous| previous.total_orders as f64),
                    totals.total_orders as f64,
                ),
                quantity_trend: Trend::between(
                    previous.map(|previous| previous.total_quantity as f64),
                    totals.total_quantity as f64,
                ),
            };

            previous = Some(totals);
            row
        })
        .collect()
}
