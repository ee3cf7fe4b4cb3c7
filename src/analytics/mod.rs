//! Aggregate views over the coffee shop's transaction log.
//!
//! [TransactionAnalytics] owns the loaded dataset and a [MonthFilter]. Every
//! query is a pure read that returns freshly allocated results, so a single
//! instance can be shared by all request handlers.

mod daily;
mod heatmap;
mod kpi;
mod ranking;
mod week_part;

#[cfg(test)]
pub(crate) mod test_utils;

use std::{collections::BTreeMap, io::Read, path::Path, sync::Arc};

use time::Month;

use crate::{
    Error, MonthFilter,
    csv_import::{load_transactions, parse_transactions},
    transaction::Transaction,
};

pub use daily::{DailyValue, KpiMetric, SalesTrend};
pub use heatmap::{HOURS_PER_DAY, SalesHeatmap};
pub use kpi::{KpiTotals, MonthlyKpi, MonthlyKpiView, Trend, TrendDirection};
pub use ranking::{Dimension, GroupSales, TOP_PRODUCTS_LIMIT};
pub use week_part::{WeekPart, WeekPartSales};

/// The transaction log plus the month the aggregate views are restricted to.
///
/// Cloning is cheap: the records are shared, not copied.
#[derive(Debug, Clone)]
pub struct TransactionAnalytics {
    transactions: Arc<[Transaction]>,
    month_filter: MonthFilter,
}

impl TransactionAnalytics {
    /// Parse a transaction log from `reader`.
    ///
    /// # Errors
    /// Returns [Error::DataLoad] or [Error::Parse] if any row cannot be
    /// loaded. No partial dataset is kept.
    pub fn new<R: Read>(reader: R, month_filter: MonthFilter) -> Result<Self, Error> {
        let transactions = parse_transactions(reader)?;

        Ok(Self::from_transactions(transactions, month_filter))
    }

    /// Load the transaction log at `path`.
    ///
    /// # Errors
    /// Returns [Error::DataLoad] if the file cannot be opened, or any error
    /// returned by [TransactionAnalytics::new].
    pub fn from_path(path: &Path, month_filter: MonthFilter) -> Result<Self, Error> {
        let transactions = load_transactions(path)?;

        Ok(Self::from_transactions(transactions, month_filter))
    }

    /// Wrap records that have already been loaded.
    pub fn from_transactions(transactions: Vec<Transaction>, month_filter: MonthFilter) -> Self {
        Self {
            transactions: transactions.into(),
            month_filter,
        }
    }

    /// A view over the same records with a different month filter.
    pub fn with_month_filter(&self, month_filter: MonthFilter) -> Self {
        Self {
            transactions: Arc::clone(&self.transactions),
            month_filter,
        }
    }

    /// The month the aggregate views are restricted to.
    pub fn month_filter(&self) -> MonthFilter {
        self.month_filter
    }

    /// The number of records in the whole dataset.
    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    /// The distinct months that have at least one record, in calendar order.
    pub fn available_months(&self) -> Vec<Month> {
        let months: BTreeMap<u8, Month> = self
            .transactions
            .iter()
            .map(|transaction| (transaction.month_number(), transaction.derived.month))
            .collect();

        months.into_values().collect()
    }

    fn filtered(&self) -> impl Iterator<Item = &Transaction> {
        let month_filter = self.month_filter;

        self.transactions
            .iter()
            .filter(move |transaction| month_filter.matches(transaction.derived.month))
    }

    /// The records that pass the month filter, in load order.
    pub fn filtered_data(&self) -> Vec<Transaction> {
        self.filtered().cloned().collect()
    }

    /// Total sales, distinct order count and quantity over the whole dataset.
    ///
    /// The month filter is ignored.
    pub fn kpi_totals(&self) -> KpiTotals {
        tracing::debug!("Calculating KPI totals over {} records", self.transactions.len());
        kpi::kpi_totals(self.transactions.iter())
    }

    /// Month by month totals with the change from the previous month present
    /// in the data, ordered by month number.
    ///
    /// The month filter is ignored.
    pub fn monthly_kpis(&self) -> Vec<MonthlyKpi> {
        tracing::debug!("Calculating monthly KPIs");
        kpi::monthly_kpis(&self.transactions)
    }

    /// The KPI row for the selected month and the records behind it.
    ///
    /// The summary is `None` when the filter is [MonthFilter::All] or the
    /// month has no records.
    pub fn kpi_totals_by_month(&self) -> MonthlyKpiView {
        let MonthFilter::Month(month) = self.month_filter else {
            return MonthlyKpiView {
                summary: None,
                transactions: Vec::new(),
            };
        };

        let summary = self
            .monthly_kpis()
            .into_iter()
            .find(|row| row.month == month);

        if summary.is_none() {
            tracing::warn!("There are no transactions for {month}");
        }

        MonthlyKpiView {
            summary,
            transactions: self.filtered_data(),
        }
    }

    /// A per-day series of `metric` over `records`, sorted by date.
    pub fn kpi_trend_line(records: &[Transaction], metric: KpiMetric) -> Vec<DailyValue> {
        daily::daily_metric(records, metric)
    }

    /// Daily sales of the filtered records and their mean.
    pub fn sales_trend_by_period(&self) -> SalesTrend {
        tracing::debug!("Calculating the sales trend for {}", self.month_filter);
        daily::sales_trend(self.filtered())
    }

    /// Sales of the filtered records by hour of the day and day of the week.
    pub fn sales_by_day_and_hour(&self) -> SalesHeatmap {
        tracing::debug!("Calculating the sales heatmap for {}", self.month_filter);
        heatmap::sales_heatmap(self.filtered())
    }

    /// Sales of the filtered records ranked by `dimension`.
    pub fn sales_by_dimension(&self, dimension: Dimension) -> Vec<GroupSales> {
        tracing::debug!(
            "Ranking sales by {dimension} for {}",
            self.month_filter
        );
        ranking::sales_by_dimension(self.filtered(), dimension)
    }

    /// Sales of the filtered records split into weekdays and the weekend.
    pub fn sales_by_weekend_weekday(&self) -> WeekPartSales {
        tracing::debug!(
            "Calculating weekday and weekend sales for {}",
            self.month_filter
        );
        week_part::sales_by_week_part(self.filtered())
    }
}
