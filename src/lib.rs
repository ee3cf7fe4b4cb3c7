//! A sales dashboard for a chain of coffee shops.
//!
//! The library loads a point-of-sale transaction log into memory once and
//! computes aggregate views over it ([TransactionAnalytics]): headline KPIs
//! with month-on-month trends, daily sales, a weekday by hour heatmap and
//! sales rankings. The views can be restricted to a single month with a
//! [MonthFilter].
//!
//! It also provides a web server that renders the views as an HTML dashboard
//! with charts, and serves the rankings as JSON.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod alert;
mod analytics;
mod app_state;
mod csv_import;
mod dashboard;
mod endpoints;
mod error;
mod html;
mod internal_server_error;
mod logging;
mod month_filter;
mod not_found;
mod routing;
mod transaction;

#[cfg(test)]
mod test_utils;

pub use analytics::{
    DailyValue, Dimension, GroupSales, HOURS_PER_DAY, KpiMetric, KpiTotals, MonthlyKpi,
    MonthlyKpiView, SalesHeatmap, SalesTrend, TOP_PRODUCTS_LIMIT, TransactionAnalytics, Trend,
    TrendDirection, WeekPart, WeekPartSales,
};
pub use app_state::AppState;
pub use csv_import::{REQUIRED_COLUMNS, load_transactions, parse_transactions};
pub use error::Error;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use month_filter::MonthFilter;
pub use routing::build_router;
pub use transaction::{DerivedFields, Transaction, TransactionBuilder};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
