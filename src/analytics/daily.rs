//! Per-day series for sparklines and the sales trend chart.

use std::collections::{BTreeMap, HashSet};

use time::Date;

use crate::transaction::Transaction;

/// The metric to plot on a KPI sparkline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KpiMetric {
    /// Sum of total price.
    TotalPrice,
    /// Number of distinct transaction IDs.
    OrderCount,
    /// Sum of quantity.
    Quantity,
}

/// The value of a metric on one calendar date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyValue {
    /// The calendar date.
    pub date: Date,
    /// The metric value for the date.
    pub value: f64,
}

/// Daily sales and their average.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesTrend {
    /// Total sales per date, in ascending date order. Dates without sales are absent.
    pub days: Vec<DailyValue>,
    /// Mean of the daily totals in `days`, `None` when there are no days.
    pub average: Option<f64>,
}

#[derive(Default)]
struct DayTotals<'a> {
    total_price: f64,
    order_ids: HashSet<&'a str>,
    quantity: u64,
}

/// Groups `transactions` by calendar date and calculates `metric` for each date.
///
/// # Returns
/// One value per date with at least one transaction, sorted by date ascending.
pub(super) fn daily_metric<'a>(
    transactions: impl IntoIterator<Item = &'a Transaction>,
    metric: KpiMetric,
) -> Vec<DailyValue> {
    let mut totals_by_date: BTreeMap<Date, DayTotals> = BTreeMap::new();

    for transaction in transactions {
        let totals = totals_by_date.entry(transaction.date).or_default();
        totals.total_price += transaction.total_price();
        totals.order_ids.insert(transaction.transaction_id.as_str());
        totals.quantity += u64::from(transaction.quantity);
    }

    totals_by_date
        .into_iter()
        .map(|(date, totals)| DailyValue {
            date,
            value: match metric {
                KpiMetric::TotalPrice => totals.total_price,
                KpiMetric::OrderCount => totals.order_ids.len() as f64,
                KpiMetric::Quantity => totals.quantity as f64,
            },
        })
        .collect()
}

/// Calculates total sales per date and the mean over the dates present.
pub(super) fn sales_trend<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> SalesTrend {
    let days = daily_metric(transactions, KpiMetric::TotalPrice);

    let average = if days.is_empty() {
        None
    } else {
        let total: f64 = days.iter().map(|day| day.value).sum();
        Some(total / days.len() as f64)
    };

    SalesTrend { days, average }
}
