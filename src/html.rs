//! Shared page layout, error page and number formatting for the HTML views.

use maud::{DOCTYPE, Markup, PreEscaped, html};

use std::sync::OnceLock;

use numfmt::{Formatter, Precision};

// Page container
pub const PAGE_CONTAINER_STYLE: &str = "flex flex-col items-center px-2 lg:px-6 py-4 lg:py-8 \
    mx-auto max-w-screen-xl text-gray-900 dark:text-white";

// Card styles
pub const CARD_STYLE: &str = "bg-white dark:bg-gray-800 border border-gray-200 \
    dark:border-gray-700 rounded-lg p-4 shadow-md";

// Form styles
pub const FORM_LABEL_STYLE: &str = "block mb-2 text-sm font-medium text-gray-900 dark:text-white";
pub const FORM_SELECT_STYLE: &str = "block w-full p-2.5 rounded text-sm \
    text-gray-900 dark:text-white bg-gray-50 dark:bg-gray-700 border \
    border-gray-300 dark:border-gray-600 focus:ring-blue-600 focus:border-blue-600";

pub const BUTTON_PRIMARY_STYLE: &str = "px-4 py-2 bg-blue-500 dark:bg-blue-600 \
    hover:bg-blue-600 hover:dark:bg-blue-700 text-white rounded";

pub enum HeadElement {
    /// The file path or URL to a JavaScript script.
    ScriptLink(String),
    /// JavaScript source code.
    ScriptSource(PreEscaped<String>),
}

pub fn base(title: &str, head_elements: &[HeadElement], content: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en"
        {
            head
            {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " - Coffee Sales" }

                script src="https://cdn.tailwindcss.com" {}

                style
                {
                    r#"
                    .echarts-tooltip {
                        z-index: 30 !important;
                    }
                    "#
                }

                @for element in head_elements
                {
                    @match element
                    {
                        HeadElement::ScriptSource(text) => script { (text) }
                        HeadElement::ScriptLink(path) => script src=(path) {}
                    }
                }
            }

            body class="container max-w-full min-h-screen bg-gray-50 dark:bg-gray-900"
            {
                (content)
            }
        }
    }
}

pub fn error_view(title: &str, header: &str, description: &str, fix: &str) -> Markup {
    // Template adapted from https://flowbite.com/blocks/marketing/404/
    let content = html!(
        section class="bg-white dark:bg-gray-900"
        {
            div class="py-8 px-4 mx-auto max-w-screen-xl lg:py-16 lg:px-6"
            {
                div class="mx-auto max-w-screen-sm text-center"
                {
                    h1
                        class="mb-4 text-7xl tracking-tight font-extrabold
                            lg:text-9xl text-amber-700 dark:text-amber-500"
                    {
                        (header)
                    }

                    p
                        class="mb-4 text-3xl md:text-4xl tracking-tight
                            font-bold text-gray-900 dark:text-white"
                    {
                        (description)
                    }

                    p
                        class="mb-4 text-1xl md:text-2xl tracking-tight
                            text-gray-900 dark:text-white"
                    {
                        (fix)
                    }

                    a
                        href="/"
                        class="inline-flex text-white bg-amber-700
                            hover:bg-amber-800 focus:ring-4 focus:outline-hidden
                            focus:ring-amber-300 font-medium rounded text-sm px-5
                            py-2.5 text-center dark:focus:ring-amber-900 my-4"
                    {
                        "Back to Dashboard"
                    }
                }
            }
        }
    );

    base(title, &[], &content)
}

/// Format `number` as dollars and cents, e.g. "$1,234.50".
pub fn format_currency(number: f64) -> String {
    static POSITIVE_FMT: OnceLock<Formatter> = OnceLock::new();

    let positive_fmt = POSITIVE_FMT.get_or_init(|| {
        Formatter::currency("$")
            .expect("a single dollar sign is a valid currency prefix")
            .precision(Precision::Decimals(2))
    });

    static NEGATIVE_FMT: OnceLock<Formatter> = OnceLock::new();

    let negative_fmt = NEGATIVE_FMT.get_or_init(|| {
        Formatter::currency("-$")
            .expect("a dollar sign with a minus is a valid currency prefix")
            .precision(Precision::Decimals(2))
    });

    let number = (number * 100.0).round() / 100.0;

    let mut formatted_string = if number < 0.0 {
        negative_fmt.fmt_string(number.abs())
    } else if number > 0.0 {
        positive_fmt.fmt_string(number)
    } else {
        // Zero is hardcoded as "0", so we must specify the formatted string for zero
        "$0.00".to_owned()
    };

    // numfmt drops trailing zeros, e.g. "12.30" is rendered as "12.3".
    match formatted_string.rfind('.') {
        Some(point) if formatted_string.len() - point == 2 => formatted_string.push('0'),
        Some(_) => {}
        None => formatted_string.push_str(".00"),
    }

    formatted_string
}

/// Format a count with thousands separators, e.g. "1,234".
pub fn format_count(count: u64) -> String {
    static COUNT_FMT: OnceLock<Formatter> = OnceLock::new();

    let count_fmt = COUNT_FMT.get_or_init(|| {
        Formatter::new()
            .separator(',')
            .expect("a comma is a valid thousands separator")
            .precision(Precision::Decimals(0))
    });

    if count == 0 {
        // Zero is hardcoded as "0" by numfmt
        return "0".to_owned();
    }

    count_fmt.fmt_string(count as f64)
}

#[cfg(test)]
mod tests {
    use super::{format_count, format_currency};

    #[test]
    fn formats_cents() {
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(12.3), "$12.30");
        assert_eq!(format_currency(-4.5), "-$4.50");
    }

    #[test]
    fn rounds_to_nearest_cent() {
        assert_eq!(format_currency(0.7 + 0.1), "$0.80");
        assert_eq!(format_currency(1234.567), "$1,234.57");
        assert_eq!(format_currency(99999.999), "$100,000.00");
        assert_eq!(format_currency(0.004), "$0.00");
        assert_eq!(format_currency(-0.004), "$0.00");
    }

    #[test]
    fn groups_thousands() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(1234567), "1,234,567");
    }
}
