//! Dashboard module
//!
//! Provides the sales dashboard page with headline figures and charts for a
//! selected month, and a JSON endpoint for the sales rankings behind it.

mod api;
mod cards;
mod charts;
mod handlers;

pub use api::get_sales_by_dimension;
pub use handlers::get_dashboard_page;
