//! Dashboard HTTP handlers and view rendering.
//!
//! This module contains:
//! - The route handler for displaying the dashboard for a month
//! - HTML view functions for rendering the dashboard UI
//! - The query type shared with the JSON API

use axum::{
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::Deserialize;
use time::Month;

use crate::{
    Error, MonthFilter,
    alert::Alert,
    analytics::{Dimension, KpiMetric, TransactionAnalytics},
    dashboard::{
        cards::{KpiCard, kpi_cards_view, monthly_cards, sparkline_id, totals_cards},
        charts::{
            DashboardChart, chart_container, charts_script, heatmap_chart, hourly_sales_chart,
            ranking_chart, sales_trend_chart, sparkline_chart, week_part_chart,
        },
    },
    endpoints::{self, format_endpoint},
    html::{
        BUTTON_PRIMARY_STYLE, CARD_STYLE, FORM_LABEL_STYLE, FORM_SELECT_STYLE, HeadElement,
        PAGE_CONTAINER_STYLE, base,
    },
};

const ECHARTS_URL: &str = "https://cdn.jsdelivr.net/npm/echarts@6.0.0/dist/echarts.min.js";

const CHART_CLASS: &str = "min-h-[380px] rounded dark:bg-gray-100";

pub(super) const SALES_TREND_CHART_ID: &str = "sales-trend-chart";
pub(super) const HEATMAP_CHART_ID: &str = "sales-heatmap-chart";
pub(super) const HOURLY_SALES_CHART_ID: &str = "hourly-sales-chart";
pub(super) const CATEGORY_CHART_ID: &str = "product-category-chart";
pub(super) const PRODUCT_CHART_ID: &str = "product-type-chart";
pub(super) const WEEK_PART_CHART_ID: &str = "week-part-chart";
pub(super) const STORE_CHART_ID: &str = "store-location-chart";

/// The query string accepted by the dashboard and the sales API.
///
/// `month` is 0 or absent for all months, otherwise 1-12.
#[derive(Debug, Default, Deserialize)]
pub struct MonthQuery {
    /// The selected month.
    pub month: Option<u8>,
}

/// Turn the query string into a month filter.
///
/// # Errors
/// Returns [Error::InvalidQuery] if the query string could not be decoded and
/// [Error::InvalidMonth] if the month is not in 0-12.
pub(super) fn month_filter_from_query(
    query: Result<Query<MonthQuery>, QueryRejection>,
) -> Result<MonthFilter, Error> {
    let Query(query) = query.map_err(|rejection| Error::InvalidQuery(rejection.body_text()))?;

    match query.month {
        Some(month) => MonthFilter::try_from(month),
        None => Ok(MonthFilter::All),
    }
}

/// Holds all the data needed to render the dashboard.
struct DashboardData {
    month_filter: MonthFilter,
    available_months: Vec<Month>,
    cards: [KpiCard; 3],
    charts: Vec<DashboardChart>,
}

/// Display the sales dashboard for the month in the query string.
///
/// An invalid month falls back to all months and shows an inline error with
/// a 400 status code.
pub async fn get_dashboard_page(
    State(analytics): State<TransactionAnalytics>,
    query: Result<Query<MonthQuery>, QueryRejection>,
) -> Response {
    let (status_code, month_filter, mut alerts) = match month_filter_from_query(query) {
        Ok(month_filter) => (StatusCode::OK, month_filter, Vec::new()),
        Err(error) => {
            tracing::warn!("Rejected dashboard query: {error}");
            let (status_code, alert) = error.into_status_and_alert();
            (status_code, MonthFilter::All, vec![alert])
        }
    };

    let data = build_dashboard_data(&analytics.with_month_filter(month_filter));

    if let MonthFilter::Month(month) = month_filter
        && !data.available_months.contains(&month)
    {
        alerts.push(Alert::Warning {
            message: format!("No sales in {month}"),
            details: "There are no transactions for the selected month.".to_owned(),
        });
    }

    (status_code, dashboard_view(&data, alerts)).into_response()
}

/// Aggregates the data for every card and chart on the dashboard.
fn build_dashboard_data(analytics: &TransactionAnalytics) -> DashboardData {
    let month_filter = analytics.month_filter();
    let mut charts = Vec::new();

    let cards = match month_filter {
        MonthFilter::All => totals_cards(&analytics.kpi_totals()),
        MonthFilter::Month(_) => {
            let view = analytics.kpi_totals_by_month();

            match view.summary {
                Some(summary) => {
                    let cards = monthly_cards(&summary);

                    for (name, metric) in [
                        ("Sales", KpiMetric::TotalPrice),
                        ("Orders", KpiMetric::OrderCount),
                        ("Quantity", KpiMetric::Quantity),
                    ] {
                        let points =
                            TransactionAnalytics::kpi_trend_line(&view.transactions, metric);
                        charts.push(DashboardChart {
                            id: sparkline_id(metric),
                            options: sparkline_chart(name, &points).to_string(),
                        });
                    }

                    cards
                }
                None => totals_cards(&Default::default()),
            }
        }
    };

    let heatmap = analytics.sales_by_day_and_hour();

    charts.extend([
        DashboardChart {
            id: SALES_TREND_CHART_ID,
            options: sales_trend_chart(&analytics.sales_trend_by_period()).to_string(),
        },
        DashboardChart {
            id: HEATMAP_CHART_ID,
            options: heatmap_chart(&heatmap).to_string(),
        },
        DashboardChart {
            id: HOURLY_SALES_CHART_ID,
            options: hourly_sales_chart(&heatmap).to_string(),
        },
        DashboardChart {
            id: CATEGORY_CHART_ID,
            options: ranking_chart(
                "Sales by Product Category",
                &analytics.sales_by_dimension(Dimension::ProductCategory),
            )
            .to_string(),
        },
        DashboardChart {
            id: PRODUCT_CHART_ID,
            options: ranking_chart(
                "Sales by Products",
                &analytics.sales_by_dimension(Dimension::ProductType),
            )
            .to_string(),
        },
        DashboardChart {
            id: WEEK_PART_CHART_ID,
            options: week_part_chart(&analytics.sales_by_weekend_weekday()).to_string(),
        },
        DashboardChart {
            id: STORE_CHART_ID,
            options: ranking_chart(
                "Sales by Store Location",
                &analytics.sales_by_dimension(Dimension::StoreLocation),
            )
            .to_string(),
        },
    ]);

    DashboardData {
        month_filter,
        available_months: analytics.available_months(),
        cards,
        charts,
    }
}

/// Renders the month selector.
///
/// The form submits on change; the button is there for browsers without
/// JavaScript.
fn month_selector(month_filter: MonthFilter, available_months: &[Month]) -> Markup {
    html! {
        form
            id="month-selector"
            method="get"
            action=(endpoints::DASHBOARD_VIEW)
            class="flex items-end gap-2"
        {
            div {
                label for="month" class=(FORM_LABEL_STYLE) { "Month" }

                select
                    id="month"
                    name="month"
                    onchange="this.form.submit()"
                    class=(FORM_SELECT_STYLE)
                {
                    option value="0" selected[month_filter == MonthFilter::All] { "All" }

                    @for month in available_months {
                        option
                            value=(u8::from(*month))
                            selected[month_filter == MonthFilter::Month(*month)]
                        {
                            (month.to_string())
                        }
                    }
                }
            }

            noscript {
                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Show" }
            }
        }
    }
}

/// A titled chart panel with an optional link to the JSON behind it.
fn chart_panel(id: &str, json_link: Option<String>) -> Markup {
    html! {
        div class=(CARD_STYLE) {
            (chart_container(id, CHART_CLASS))

            @if let Some(href) = json_link {
                a
                    href=(href)
                    class="text-xs text-blue-600 hover:text-blue-500 dark:text-blue-500 underline"
                {
                    "View as JSON"
                }
            }
        }
    }
}

fn sales_json_link(dimension: Dimension, month_filter: MonthFilter) -> String {
    format!(
        "{}?month={}",
        format_endpoint(endpoints::SALES_BY_DIMENSION_API, dimension),
        month_filter.number()
    )
}

/// Renders the dashboard page with the month selector, cards and charts.
fn dashboard_view(data: &DashboardData, alerts: Vec<Alert>) -> Markup {
    let month_filter = data.month_filter;

    let content = html!(
        div id="dashboard-content" class=(PAGE_CONTAINER_STYLE)
        {
            header class="w-full flex flex-col md:flex-row md:justify-between md:items-end gap-4 mb-6"
            {
                div {
                    h1 class="text-2xl font-bold" { "Coffee Shop Sales Dashboard" }
                    p class="text-sm text-gray-600 dark:text-gray-400" {
                        "Showing " (month_filter.to_string())
                    }
                }

                (month_selector(month_filter, &data.available_months))
            }

            @for alert in alerts {
                (alert.into_html())
            }

            (kpi_cards_view(&data.cards))

            section id="charts" class="w-full mx-auto mb-4"
            {
                div class="grid grid-cols-1 mb-4"
                {
                    (chart_panel(SALES_TREND_CHART_ID, None))
                }

                div class="grid grid-cols-1 xl:grid-cols-2 gap-4 mb-4"
                {
                    (chart_panel(HEATMAP_CHART_ID, None))
                    (chart_panel(HOURLY_SALES_CHART_ID, None))
                }

                div class="grid grid-cols-1 xl:grid-cols-2 gap-4 mb-4"
                {
                    (chart_panel(
                        CATEGORY_CHART_ID,
                        Some(sales_json_link(Dimension::ProductCategory, month_filter)),
                    ))
                    (chart_panel(
                        PRODUCT_CHART_ID,
                        Some(sales_json_link(Dimension::ProductType, month_filter)),
                    ))
                }

                div class="grid grid-cols-1 xl:grid-cols-2 gap-4 mb-4"
                {
                    (chart_panel(WEEK_PART_CHART_ID, None))
                    (chart_panel(
                        STORE_CHART_ID,
                        Some(sales_json_link(Dimension::StoreLocation, month_filter)),
                    ))
                }
            }
        }
    );

    let scripts = [
        HeadElement::ScriptLink(ECHARTS_URL.to_owned()),
        charts_script(&data.charts),
    ];

    base("Dashboard", &scripts, &content)
}
