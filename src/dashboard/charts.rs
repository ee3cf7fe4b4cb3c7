//! Chart generation and rendering for the dashboard.
//!
//! This module creates interactive ECharts visualizations for the sales data:
//! - **KPI sparklines**: the daily value of each headline figure in the selected month
//! - **Sales trend**: daily sales with the period average
//! - **Heatmap**: sales by day of the week and hour of the day, plus hourly totals
//! - **Rankings**: sales by product category, product and store
//! - **Weekday/weekend split**: a donut chart with the grand total
//!
//! Each chart is generated as JSON configuration for the ECharts library and
//! rendered with corresponding HTML containers and JavaScript initialization code.

use charming::{
    Chart,
    df,
    component::{Axis, Grid, Legend, Title, VisualMap},
    element::{
        AxisLabel, AxisPointer, AxisPointerType, AxisType, JsFunction, Label, LabelPosition,
        LineStyle, LineStyleType, Orient, Tooltip, Trigger,
    },
    series::{Bar, Heatmap, Line, Pie},
};
use maud::{Markup, PreEscaped, html};

use crate::{
    analytics::{DailyValue, GroupSales, HOURS_PER_DAY, SalesHeatmap, SalesTrend, WeekPartSales},
    html::{HeadElement, format_currency},
    transaction::WEEKDAYS,
};

/// A dashboard chart with its HTML container ID and ECharts configuration.
pub(super) struct DashboardChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// Renders the HTML container for a chart.
///
/// Sparklines use a shorter container than the full size charts.
pub(super) fn chart_container(id: &str, class: &str) -> Markup {
    html!(
        div id=(id) class=(class) {}
    )
}

/// Generates JavaScript initialization code for dashboard charts.
///
/// Creates scripts that initialize ECharts instances with dark mode support
/// and responsive resizing.
///
/// # Arguments
/// * `charts` - The charts to generate initialization scripts for
///
/// # Returns
/// HeadElement containing the initialization JavaScript.
pub(super) fn charts_script(charts: &[DashboardChart]) -> HeadElement {
    let script_content = charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const chartDom = document.getElementById("{}");
                    const chart = echarts.init(chartDom);
                    const option = {};
                    chart.setOption(option);

                    window.addEventListener('resize', chart.resize);

                    const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
                    const updateTheme = () => {{
                        const isDarkMode = darkModeMediaQuery.matches;
                        chart.setTheme(isDarkMode ? 'dark' : 'default');
                    }}
                    darkModeMediaQuery.addEventListener('change', updateTheme);
                    updateTheme();
                }})();"#,
                chart.id, chart.options
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let wrapped_script = format!(
        "document.addEventListener('DOMContentLoaded', function() {{\n{}\n}});",
        script_content
    );

    HeadElement::ScriptSource(PreEscaped(wrapped_script))
}

/// A minimal line chart without axes for a KPI card.
pub(super) fn sparkline_chart(name: &str, points: &[DailyValue]) -> Chart {
    let (labels, values) = date_label_and_value_pairs(points);

    Chart::new()
        .tooltip(Tooltip::new().trigger(Trigger::Axis))
        .grid(Grid::new().left("2%").right("2%").top("10%").bottom("10%"))
        .x_axis(
            Axis::new()
                .type_(AxisType::Category)
                .show(false)
                .data(labels),
        )
        .y_axis(Axis::new().type_(AxisType::Value).show(false))
        .series(Line::new().name(name).show_symbol(false).data(values))
}

pub(super) fn sales_trend_chart(trend: &SalesTrend) -> Chart {
    let (labels, values) = date_label_and_value_pairs(&trend.days);

    let mut chart = Chart::new()
        .title(Title::new().text("Sales Trend over the Period"))
        .tooltip(currency_tooltip())
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(whole_dollar_formatter())),
        )
        .series(Bar::new().name("Daily Sales").data(values));

    if let Some(average) = trend.average {
        chart = chart.series(
            Line::new()
                .name(format!("Average Sales ({})", format_currency(average)))
                .show_symbol(false)
                .line_style(LineStyle::new().type_(LineStyleType::Dashed))
                .data(vec![average; trend.days.len()]),
        );
    }

    chart
}

pub(super) fn heatmap_chart(heatmap: &SalesHeatmap) -> Chart {
    let hours: Vec<String> = (0..HOURS_PER_DAY).map(|hour| hour.to_string()).collect();
    let weekdays: Vec<String> = WEEKDAYS.iter().map(ToString::to_string).collect();

    let mut data = Vec::with_capacity(HOURS_PER_DAY * WEEKDAYS.len());
    for (hour, row) in heatmap.cells.iter().enumerate() {
        for (column, value) in row.iter().enumerate() {
            data.push(df![hour as f64, column as f64, *value]);
        }
    }

    Chart::new()
        .title(Title::new().text("Sales by Days | Hours"))
        .tooltip(Tooltip::new().trigger(Trigger::Item))
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("18%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(hours))
        .y_axis(Axis::new().type_(AxisType::Category).data(weekdays))
        .visual_map(
            VisualMap::new()
                .min(0.0)
                .max(heatmap.max())
                .calculable(true)
                .orient(Orient::Horizontal)
                .left("center")
                .bottom("0%"),
        )
        .series(Heatmap::new().name("Sales").data(data))
}

pub(super) fn hourly_sales_chart(heatmap: &SalesHeatmap) -> Chart {
    let hours: Vec<String> = (0..HOURS_PER_DAY).map(|hour| hour.to_string()).collect();

    Chart::new()
        .title(Title::new().text("Sales by Hour"))
        .tooltip(currency_tooltip())
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(hours))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(whole_dollar_formatter())),
        )
        .series(
            Bar::new()
                .name("Sales")
                .data(heatmap.hourly_totals.to_vec()),
        )
}

/// A horizontal bar chart of ranked groups, largest at the top.
pub(super) fn ranking_chart(title: &str, groups: &[GroupSales]) -> Chart {
    // Category axes are drawn bottom up, so the last group is the top bar.
    let (names, totals): (Vec<String>, Vec<f64>) = groups
        .iter()
        .rev()
        .map(|group| (group.name.clone(), group.total_sales))
        .unzip();

    Chart::new()
        .title(Title::new().text(title))
        .tooltip(currency_tooltip())
        .grid(
            Grid::new()
                .left("3%")
                .right("12%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(whole_dollar_formatter())),
        )
        .y_axis(Axis::new().type_(AxisType::Category).data(names))
        .series(
            Bar::new()
                .name("Sales")
                .label(
                    Label::new()
                        .show(true)
                        .position(LabelPosition::Right)
                        .formatter(whole_dollar_label_formatter()),
                )
                .data(totals),
        )
}

pub(super) fn week_part_chart(sales: &WeekPartSales) -> Chart {
    let data: Vec<(f64, &str)> = sales
        .buckets()
        .iter()
        .map(|(part, total)| (*total, part.name()))
        .collect();

    Chart::new()
        .title(
            Title::new()
                .text(format_currency(sales.total))
                .subtext("Total sales")
                .left("center")
                .top("center"),
        )
        .tooltip(Tooltip::new().trigger(Trigger::Item))
        .legend(Legend::new().top("5%").left("center"))
        .series(
            Pie::new()
                .name("Sales by Weekday/Weekend")
                .radius(vec!["45%", "70%"])
                .data(data),
        )
}

fn date_label_and_value_pairs(points: &[DailyValue]) -> (Vec<String>, Vec<f64>) {
    points
        .iter()
        .map(|point| (point.date.to_string(), point.value))
        .unzip()
}

#[inline]
fn whole_dollar_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('en-US', {
              style: 'currency',
              currency: 'USD',
              maximumFractionDigits: 0
            });
            return currencyFormatter.format(number);",
    )
}

#[inline]
fn whole_dollar_label_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "params",
        "const currencyFormatter = new Intl.NumberFormat('en-US', {
              style: 'currency',
              currency: 'USD',
              maximumFractionDigits: 0
            });
            return currencyFormatter.format(params.value);",
    )
}

/// Creates a tooltip configuration for currency values
fn currency_tooltip() -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Axis)
        .value_formatter(JsFunction::new_with_args(
            "number",
            "const currencyFormatter = new Intl.NumberFormat('en-US', {
                  style: 'currency',
                  currency: 'USD'
                });
                return (number) ? currencyFormatter.format(number) : \"-\";",
        ))
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow))
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::analytics::{
        DailyValue, GroupSales, HOURS_PER_DAY, SalesHeatmap, SalesTrend, WeekPartSales,
    };

    use super::{
        DashboardChart, charts_script, heatmap_chart, ranking_chart, sales_trend_chart,
        week_part_chart,
    };
    use crate::html::{HeadElement, format_currency};

    fn trend() -> SalesTrend {
        SalesTrend {
            days: vec![
                DailyValue {
                    date: date!(2023 - 01 - 01),
                    value: 10.0,
                },
                DailyValue {
                    date: date!(2023 - 01 - 02),
                    value: 30.0,
                },
            ],
            average: Some(20.0),
        }
    }

    #[test]
    fn sales_trend_has_average_line() {
        let options = sales_trend_chart(&trend()).to_string();

        assert!(options.contains("Daily Sales"));
        assert!(options.contains("Average Sales ($20.00)"));
        assert!(options.contains("2023-01-02"));
    }

    #[test]
    fn empty_sales_trend_has_no_average_line() {
        let trend = SalesTrend {
            days: Vec::new(),
            average: None,
        };

        let options = sales_trend_chart(&trend).to_string();

        assert!(!options.contains("Average"));
    }

    #[test]
    fn heatmap_labels_weekdays_monday_first() {
        let heatmap = SalesHeatmap {
            cells: [[0.0; 7]; HOURS_PER_DAY],
            hourly_totals: [0.0; HOURS_PER_DAY],
        };

        let options = heatmap_chart(&heatmap).to_string();

        let monday = options.find("Monday").expect("Monday label missing");
        let sunday = options.find("Sunday").expect("Sunday label missing");
        assert!(monday < sunday);
    }

    #[test]
    fn heatmap_includes_every_cell() {
        let mut cells = [[0.0; 7]; HOURS_PER_DAY];
        cells[9][0] = 12.5;
        let mut hourly_totals = [0.0; HOURS_PER_DAY];
        hourly_totals[9] = 12.5;

        let options = heatmap_chart(&SalesHeatmap {
            cells,
            hourly_totals,
        })
        .to_string();

        assert!(options.contains("12.5"), "sales value missing from {options}");
        assert_eq!(options.matches("12.5").count(), 2, "value should be the cell and the scale max");
    }

    #[test]
    fn ranking_puts_largest_group_last_on_the_axis() {
        let groups = vec![
            GroupSales {
                name: "Coffee".to_owned(),
                total_sales: 100.0,
            },
            GroupSales {
                name: "Tea".to_owned(),
                total_sales: 50.0,
            },
        ];

        let options = ranking_chart("Sales by Product Category", &groups).to_string();

        let tea = options.find("\"Tea\"").expect("Tea label missing");
        let coffee = options.find("\"Coffee\"").expect("Coffee label missing");
        assert!(tea < coffee);
    }

    #[test]
    fn week_part_chart_shows_grand_total() {
        let sales = WeekPartSales {
            weekday: 1000.004,
            weekend: 500.001,
            total: 1500.01,
        };

        let options = week_part_chart(&sales).to_string();

        assert!(options.contains(&format_currency(1500.01)));
        assert!(options.contains("Weekday"));
        assert!(options.contains("Weekend"));
    }

    #[test]
    fn script_initialises_every_chart() {
        let charts = [
            DashboardChart {
                id: "first-chart",
                options: "{}".to_owned(),
            },
            DashboardChart {
                id: "second-chart",
                options: "{}".to_owned(),
            },
        ];

        let HeadElement::ScriptSource(script) = charts_script(&charts) else {
            panic!("expected an inline script");
        };

        assert!(script.0.contains("getElementById(\"first-chart\")"));
        assert!(script.0.contains("getElementById(\"second-chart\")"));
    }
}
