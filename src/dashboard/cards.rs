//! Card components for the headline figures.
//!
//! With all months selected the cards show plain totals. With a single month
//! selected each card also shows the change from the previous month, coloured
//! by direction, and a sparkline of the daily values.

use maud::{Markup, html};

use crate::{
    analytics::{KpiMetric, KpiTotals, MonthlyKpi, Trend, TrendDirection},
    dashboard::charts::chart_container,
    html::{CARD_STYLE, format_count, format_currency},
};

/// One headline figure ready for display.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct KpiCard {
    pub title: &'static str,
    pub value: String,
    pub trend: Option<Trend>,
    /// The metric plotted on the card's sparkline, if it has one.
    pub sparkline: Option<KpiMetric>,
}

/// The element ID of the sparkline container for `metric`.
pub(super) fn sparkline_id(metric: KpiMetric) -> &'static str {
    match metric {
        KpiMetric::TotalPrice => "sales-sparkline",
        KpiMetric::OrderCount => "orders-sparkline",
        KpiMetric::Quantity => "quantity-sparkline",
    }
}

/// Cards for totals over the whole dataset.
pub(super) fn totals_cards(totals: &KpiTotals) -> [KpiCard; 3] {
    [
        KpiCard {
            title: "Total Sales",
            value: format_currency(totals.total_sales),
            trend: None,
            sparkline: None,
        },
        KpiCard {
            title: "Total Orders",
            value: format_count(totals.total_orders as u64),
            trend: None,
            sparkline: None,
        },
        KpiCard {
            title: "Total Quantity Sold",
            value: format_count(totals.total_quantity),
            trend: None,
            sparkline: None,
        },
    ]
}

/// Cards for one month, with the change from the previous month and sparklines.
pub(super) fn monthly_cards(summary: &MonthlyKpi) -> [KpiCard; 3] {
    [
        KpiCard {
            title: "Total Sales",
            value: format_currency(summary.total_sales),
            trend: Some(summary.sales_trend),
            sparkline: Some(KpiMetric::TotalPrice),
        },
        KpiCard {
            title: "Total Orders",
            value: format_count(summary.total_orders as u64),
            trend: Some(summary.orders_trend),
            sparkline: Some(KpiMetric::OrderCount),
        },
        KpiCard {
            title: "Total Quantity Sold",
            value: format_count(summary.total_quantity),
            trend: Some(summary.quantity_trend),
            sparkline: Some(KpiMetric::Quantity),
        },
    ]
}

/// Formats a percentage with two decimals, avoiding "-0.00%".
fn format_percentage(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;

    if rounded == 0.0 {
        "0.00%".to_owned()
    } else {
        format!("{rounded:+.2}%")
    }
}

pub(super) fn kpi_cards_view(cards: &[KpiCard]) -> Markup {
    html! {
        section id="kpi-cards" class="w-full mx-auto mb-4" {
            div class="grid grid-cols-1 md:grid-cols-3 gap-4" {
                @for card in cards {
                    (kpi_card(card))
                }
            }
        }
    }
}

fn kpi_card(card: &KpiCard) -> Markup {
    html! {
        div class={"kpi-card " (CARD_STYLE)} {
            h4 class="text-sm font-medium text-gray-600 dark:text-gray-400 mb-1" {
                (card.title)
            }

            div class="kpi-value text-3xl font-bold mb-1" {
                (card.value)
            }

            @if let Some(trend) = &card.trend {
                (trend_badge(trend))
            }

            @if let Some(metric) = card.sparkline {
                (chart_container(sparkline_id(metric), "h-16 w-full mt-2"))
            }
        }
    }
}

fn trend_badge(trend: &Trend) -> Markup {
    let (arrow, style) = match trend.direction {
        TrendDirection::Increasing => ("↑", "text-green-600 dark:text-green-400"),
        TrendDirection::Decreasing => ("↓", "text-red-600 dark:text-red-400"),
        TrendDirection::NoChange => ("→", "text-gray-600 dark:text-gray-400"),
    };

    html! {
        div
            class={"kpi-trend text-sm font-medium " (style)}
            title=(trend.direction.to_string())
        {
            (arrow) " " (format_percentage(trend.percentage_growth)) " vs previous month"
        }
    }
}
